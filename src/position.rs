//! Cursor offset correspondence between raw markup and rendered text.
//!
//! Offsets are counted in characters. Both directions are stored as sorted
//! breakpoint tables: only offsets where the mapping leaves the straight
//! line predicted by the previous breakpoint are kept, and lookups take the
//! nearest breakpoint at or below the offset plus the residual distance.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::attributes::AttributeSet;
use crate::config::{Config, RenderConfig};
use crate::parser::Parser;
use crate::render::{self, Markup, RenderSink};
use crate::styled::StyledText;

/// Longest run of raw characters skipped to find the next rendered one.
const MAX_SKIP: usize = 256;

/// A monotone offset mapping stored as breakpoints.
#[derive(Debug, Clone, Default)]
struct OffsetTable {
    breakpoints: BTreeMap<usize, usize>,
    last_key: Option<usize>,
}

impl OffsetTable {
    /// Record `key → value`. Keys must arrive in increasing order; a repeated
    /// key keeps its first value.
    fn record(&mut self, key: usize, value: usize) {
        if self.last_key.is_some_and(|last| key <= last) {
            return;
        }
        self.last_key = Some(key);
        if self.predict(key) != Some(value) {
            self.breakpoints.insert(key, value);
        }
    }

    fn predict(&self, key: usize) -> Option<usize> {
        self.breakpoints
            .range(..=key)
            .next_back()
            .map(|(floor, value)| value + (key - floor))
    }

    fn lookup(&self, key: usize) -> usize {
        self.predict(key).unwrap_or(key)
    }

    fn len(&self) -> usize {
        self.breakpoints.len()
    }
}

/// Maps cursor offsets between raw markup and its rendered form.
///
/// The maps are rebuilt from scratch by [`PositionMapper::rebuild`]; lookups
/// outside the mapped text clamp to its end.
#[derive(Debug)]
pub struct PositionMapper {
    parser: Parser,
    render: RenderConfig,
    raw_to_rendered: OffsetTable,
    rendered_to_raw: OffsetTable,
    raw_len: usize,
    rendered_len: usize,
}

impl Default for PositionMapper {
    fn default() -> Self {
        Self::new(&Config::compiled_default())
    }
}

impl PositionMapper {
    pub fn new(config: &Config) -> Self {
        Self {
            parser: Parser::new(config),
            render: config.render.clone(),
            raw_to_rendered: OffsetTable::default(),
            rendered_to_raw: OffsetTable::default(),
            raw_len: 0,
            rendered_len: 0,
        }
    }

    /// Recompute both maps for `raw` and the styled text rendered from it.
    pub fn rebuild(&mut self, raw: &str, styled: &StyledText) {
        let tree = self.parser.parse(raw);
        let mut aligner = Aligner::new(raw);
        render::walk(&tree, &self.render, &mut aligner);
        let (raw_to_rendered, rendered_to_raw, rendered_len) = aligner.finish();

        let styled_len = styled.char_len();
        if styled_len != rendered_len {
            debug!(
                rendered_len,
                styled_len, "styled text does not match the rendered markup"
            );
        }
        self.raw_len = raw.chars().count();
        self.rendered_len = styled_len;
        self.raw_to_rendered = raw_to_rendered;
        self.rendered_to_raw = rendered_to_raw;
        trace!(
            raw_breakpoints = self.raw_to_rendered.len(),
            rendered_breakpoints = self.rendered_to_raw.len(),
            "position map rebuilt"
        );
    }

    pub fn to_rendered(&self, raw_offset: usize) -> usize {
        self.raw_to_rendered
            .lookup(raw_offset.min(self.raw_len))
            .min(self.rendered_len)
    }

    pub fn to_raw(&self, rendered_offset: usize) -> usize {
        self.rendered_to_raw
            .lookup(rendered_offset.min(self.rendered_len))
            .min(self.raw_len)
    }

    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered_len
    }

    pub fn is_empty(&self) -> bool {
        self.raw_len == 0 && self.rendered_len == 0
    }
}

/// Walks the render events against the raw characters.
struct Aligner {
    raw: Vec<char>,
    raw_pos: usize,
    rendered_pos: usize,
    /// Raw start of the markup that output-only text replaces.
    markup_start: Option<usize>,
    raw_to_rendered: OffsetTable,
    rendered_to_raw: OffsetTable,
}

impl Aligner {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.chars().collect(),
            raw_pos: 0,
            rendered_pos: 0,
            markup_start: None,
            raw_to_rendered: OffsetTable::default(),
            rendered_to_raw: OffsetTable::default(),
        }
    }

    /// Map raw characters up to `end` onto the current rendered offset.
    fn collapse(&mut self, end: usize) {
        if end <= self.raw_pos {
            return;
        }
        self.rendered_to_raw.record(self.rendered_pos, self.raw_pos);
        for raw in self.raw_pos..end {
            self.raw_to_rendered.record(raw, self.rendered_pos);
        }
        self.raw_pos = end;
    }

    fn at(&self, offset: usize) -> Option<char> {
        self.raw.get(offset).copied()
    }

    fn skip_blanks(&self, mut offset: usize) -> usize {
        while matches!(self.at(offset), Some(' ' | '\t')) {
            offset += 1;
        }
        offset
    }

    fn match_tag(&self, tag: &str) -> usize {
        let start = self.raw_pos;
        let mut offset = start;
        for expected in tag.chars() {
            if self.at(offset) != Some(expected) {
                return self.match_dynamic_tag(tag);
            }
            offset += 1;
        }
        offset
    }

    /// A `{{...}}` tag whose attributes were written differently: consume
    /// through the closing braces.
    fn match_dynamic_tag(&self, tag: &str) -> usize {
        let start = self.raw_pos;
        if !tag.starts_with("{{") || self.at(start) != Some('{') || self.at(start + 1) != Some('{')
        {
            return start;
        }
        let limit = self.raw.len().min(start + MAX_SKIP);
        (start + 2..limit.saturating_sub(1))
            .find(|&offset| self.raw[offset] == '}' && self.raw[offset + 1] == '}')
            .map_or(start, |offset| offset + 2)
    }

    /// `[ \t]*` then `-`, `*` or `N.` then one blank.
    fn match_list_marker(&self) -> usize {
        let start = self.raw_pos;
        let mut offset = self.skip_blanks(start);
        match self.at(offset) {
            Some('-' | '*') => offset += 1,
            Some(c) if c.is_ascii_digit() => {
                while self.at(offset).is_some_and(|c| c.is_ascii_digit()) {
                    offset += 1;
                }
                if self.at(offset) != Some('.') {
                    return start;
                }
                offset += 1;
            }
            _ => return start,
        }
        if matches!(self.at(offset), Some(' ' | '\t')) {
            offset + 1
        } else {
            start
        }
    }

    fn match_quote_marker(&self) -> usize {
        let mut offset = self.raw_pos;
        while self.at(offset) == Some('>') {
            offset = self.skip_blanks(offset + 1);
        }
        offset
    }

    fn match_rule(&self) -> usize {
        let mut offset = self.raw_pos;
        while self.at(offset).is_some_and(|c| c != '\n') {
            offset += 1;
        }
        offset
    }

    /// Next raw occurrence of `c`, not crossing a line break unless `c` is
    /// one.
    fn find(&self, c: char) -> Option<usize> {
        let limit = self.raw.len().min(self.raw_pos + MAX_SKIP + 1);
        for offset in self.raw_pos..limit {
            let raw = self.raw[offset];
            if raw == c {
                return Some(offset);
            }
            if raw == '\n' {
                return None;
            }
        }
        None
    }

    fn finish(mut self) -> (OffsetTable, OffsetTable, usize) {
        let raw_len = self.raw.len();
        self.collapse(raw_len);
        self.raw_to_rendered.record(raw_len, self.rendered_pos);
        self.rendered_to_raw.record(self.rendered_pos, raw_len);
        (self.raw_to_rendered, self.rendered_to_raw, self.rendered_pos)
    }
}

impl RenderSink for Aligner {
    fn markup(&mut self, markup: Markup<'_>) {
        let start = self.raw_pos;
        let end = match markup {
            Markup::Tag(tag) => self.match_tag(tag),
            Markup::ListMarker => self.match_list_marker(),
            Markup::QuoteMarker => self.match_quote_marker(),
            Markup::Rule => self.match_rule(),
        };
        self.collapse(end);
        self.markup_start = Some(start);
    }

    fn text(&mut self, text: &str, _attributes: &AttributeSet) {
        self.markup_start = None;
        for c in text.chars() {
            match self.find(c) {
                Some(offset) => {
                    self.collapse(offset);
                    self.raw_to_rendered.record(offset, self.rendered_pos);
                    self.rendered_to_raw.record(self.rendered_pos, offset);
                    self.raw_pos = offset + 1;
                }
                None => self.rendered_to_raw.record(self.rendered_pos, self.raw_pos),
            }
            self.rendered_pos += 1;
        }
    }

    fn synthetic(&mut self, text: &str, _attributes: &AttributeSet) {
        let origin = self.markup_start.unwrap_or(self.raw_pos);
        for _ in text.chars() {
            self.rendered_to_raw.record(self.rendered_pos, origin);
            self.rendered_pos += 1;
        }
    }
}
