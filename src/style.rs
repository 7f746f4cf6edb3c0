//! The catalog of supported style kinds.
//!
//! For every kind this module knows how it is detected in markup, which
//! canonical tags serialize it, and which generic attributes it renders with.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

pub use crate::attributes::StyleAttribute;
use crate::attributes::{
    AttributeSet, CustomTag, FontSlant, FontWeight, Paragraph, ParagraphRole,
};
use crate::config::RenderConfig;

/// One supported formatting construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleKind {
    Bold,
    Italic,
    Strikethrough,
    Link { url: String },
    /// Quote nesting depth, 0 for `> `.
    Quote { level: usize },
    Code,
    CodeBlock { language: Option<String> },
    Heading { level: u8 },
    HorizontalRule,
    /// Container of bullet items; `level` is the shallowest item level.
    BulletList { level: usize },
    BulletListItem { level: usize },
    NumberList { start: Option<u32>, level: usize },
    NumberListItem { number: Option<u32>, level: usize },
    Mention { user_id: String, display_name: String },
    Font { attributes: Vec<StyleAttribute> },
    Custom { name: String, attributes: Vec<StyleAttribute> },
}

const HEADING: &str = r"(?m)^(#{1,6})[ \t]+([^\n]+)$";
const CODE_BLOCK: &str = r"(?s)```([^\n`]*)\n(.*?)\n```";
const BULLET_ITEM: &str = r"^([ \t]*)[-*][ \t](.+)$";
const NUMBER_ITEM: &str = r"^([ \t]*)(\d+)\.[ \t](.+)$";
const QUOTE_LINE: &str = r"^(>[ \t]*)+(.*)$";
const HORIZONTAL_RULE: &str = r"(?m)^[ \t]*(?:\*{3,}|-{3,}|_{3,})[ \t]*$";
const BOLD: &str = r"\*\*([^*\n]+)\*\*";
const ITALIC: &str = r"_([^_\n]+)_";
const STRIKETHROUGH: &str = r"~~([^~\n]+)~~";
const CODE: &str = r"`([^`\n]+)`";
const LINK: &str = r"\[([^\]\n]+)\]\(([^)\s]+)\)";
const MENTION: &str = r"@\[([^\]\n]+)\]\(([^)\s]+)\)";
const TAG_OPEN: &str = r"\{\{(\w+)([^}]*)\}\}";
const TAG_ATTRIBUTE: &str = r#"([\w-]+)="([^"]*)""#;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("catalog pattern must compile")
}

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| compile(HEADING));
static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| compile(CODE_BLOCK));
static BULLET_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| compile(BULLET_ITEM));
static NUMBER_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| compile(NUMBER_ITEM));
static HORIZONTAL_RULE_RE: LazyLock<Regex> = LazyLock::new(|| compile(HORIZONTAL_RULE));
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| compile(BOLD));
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| compile(ITALIC));
static STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| compile(STRIKETHROUGH));
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| compile(CODE));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| compile(LINK));
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| compile(MENTION));
static TAG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| compile(TAG_OPEN));
static TAG_ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| compile(TAG_ATTRIBUTE));

impl StyleKind {
    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::Link { .. } => "link",
            StyleKind::Quote { .. } => "quote",
            StyleKind::Code => "code",
            StyleKind::CodeBlock { .. } => "code_block",
            StyleKind::Heading { .. } => "heading",
            StyleKind::HorizontalRule => "horizontal_rule",
            StyleKind::BulletList { .. } => "bullet_list",
            StyleKind::BulletListItem { .. } => "bullet_list_item",
            StyleKind::NumberList { .. } => "number_list",
            StyleKind::NumberListItem { .. } => "number_list_item",
            StyleKind::Mention { .. } => "mention",
            StyleKind::Font { .. } => "font",
            StyleKind::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, StyleKind::BulletList { .. } | StyleKind::NumberList { .. })
    }

    /// Kinds whose content is taken literally instead of being parsed.
    pub fn is_verbatim(&self) -> bool {
        matches!(self, StyleKind::Code | StyleKind::CodeBlock { .. })
    }

    /// The pattern this kind is recognized by in markup. Lists, quotes and
    /// tags are located by line or tag scanners built on these expressions.
    pub fn detection_pattern(&self) -> &'static str {
        match self {
            StyleKind::Bold => BOLD,
            StyleKind::Italic => ITALIC,
            StyleKind::Strikethrough => STRIKETHROUGH,
            StyleKind::Link { .. } => LINK,
            StyleKind::Quote { .. } => QUOTE_LINE,
            StyleKind::Code => CODE,
            StyleKind::CodeBlock { .. } => CODE_BLOCK,
            StyleKind::Heading { .. } => HEADING,
            StyleKind::HorizontalRule => HORIZONTAL_RULE,
            StyleKind::BulletList { .. } | StyleKind::BulletListItem { .. } => BULLET_ITEM,
            StyleKind::NumberList { .. } | StyleKind::NumberListItem { .. } => NUMBER_ITEM,
            StyleKind::Mention { .. } => MENTION,
            StyleKind::Font { .. } | StyleKind::Custom { .. } => TAG_OPEN,
        }
    }

    pub fn canonical_open_tag(&self) -> String {
        match self {
            StyleKind::Bold => "**".to_string(),
            StyleKind::Italic => "_".to_string(),
            StyleKind::Strikethrough => "~~".to_string(),
            StyleKind::Code => "`".to_string(),
            StyleKind::Link { .. } => "[".to_string(),
            StyleKind::Mention { .. } => "@[".to_string(),
            StyleKind::Quote { level } => "> ".repeat(level + 1),
            StyleKind::CodeBlock { language } => {
                format!("```{}\n", language.as_deref().unwrap_or(""))
            }
            StyleKind::Heading { level } => format!("{} ", "#".repeat(usize::from(*level))),
            StyleKind::HorizontalRule => "***".to_string(),
            StyleKind::BulletList { .. } | StyleKind::NumberList { .. } => String::new(),
            StyleKind::BulletListItem { level } => format!("{}- ", "  ".repeat(*level)),
            StyleKind::NumberListItem { number, level } => {
                format!("{}{}. ", "  ".repeat(*level), number.unwrap_or(1))
            }
            StyleKind::Font { attributes } => open_tag("font", attributes),
            StyleKind::Custom { name, attributes } => open_tag(name, attributes),
        }
    }

    pub fn canonical_close_tag(&self) -> String {
        match self {
            StyleKind::Bold => "**".to_string(),
            StyleKind::Italic => "_".to_string(),
            StyleKind::Strikethrough => "~~".to_string(),
            StyleKind::Code => "`".to_string(),
            StyleKind::Link { url } => format!("]({url})"),
            StyleKind::Mention { user_id, .. } => format!("]({user_id})"),
            StyleKind::CodeBlock { .. } => "\n```".to_string(),
            StyleKind::Font { .. } => "{{/font}}".to_string(),
            StyleKind::Custom { name, .. } => format!("{{{{/{name}}}}}"),
            StyleKind::Quote { .. }
            | StyleKind::Heading { .. }
            | StyleKind::HorizontalRule
            | StyleKind::BulletList { .. }
            | StyleKind::BulletListItem { .. }
            | StyleKind::NumberList { .. }
            | StyleKind::NumberListItem { .. } => String::new(),
        }
    }

    /// The generic attributes this kind contributes to its content.
    pub fn formatting_attributes(&self, config: &RenderConfig) -> AttributeSet {
        let mut attributes = AttributeSet::default();
        match self {
            StyleKind::Bold => attributes.font_weight = Some(FontWeight::BOLD),
            StyleKind::Italic => attributes.font_slant = Some(FontSlant::Italic),
            StyleKind::Strikethrough => attributes.strikethrough = true,
            StyleKind::Code => attributes.monospace = true,
            StyleKind::Link { url } => attributes.link = Some(url.clone()),
            StyleKind::Mention { user_id, .. } => {
                attributes.mention_user_id = Some(user_id.clone())
            }
            StyleKind::CodeBlock { language } => {
                attributes.monospace = true;
                attributes.paragraph = Some(Paragraph::new(ParagraphRole::CodeBlock {
                    language: language.clone(),
                }));
            }
            StyleKind::Heading { level } => {
                attributes.font_weight = Some(FontWeight::BOLD);
                attributes.font_size = Some(config.heading_size(*level));
                attributes.paragraph = Some(Paragraph::new(ParagraphRole::Heading(*level)));
            }
            StyleKind::Quote { level } => {
                let indent = config.indent(level + 1);
                attributes.paragraph =
                    Some(Paragraph::new(ParagraphRole::Quote).indented(*level, indent, indent));
            }
            StyleKind::BulletListItem { level } => {
                attributes.paragraph = Some(item_paragraph(ParagraphRole::BulletItem, *level, config));
            }
            StyleKind::NumberListItem { level, .. } => {
                attributes.paragraph = Some(item_paragraph(ParagraphRole::NumberItem, *level, config));
            }
            StyleKind::HorizontalRule => {
                attributes.paragraph = Some(Paragraph::new(ParagraphRole::Rule));
            }
            StyleKind::BulletList { .. } | StyleKind::NumberList { .. } => {}
            StyleKind::Font { attributes: pairs } => {
                for pair in pairs {
                    apply_font_attribute(&mut attributes, pair);
                }
            }
            StyleKind::Custom { name, attributes: pairs } => attributes.custom.push(CustomTag {
                name: name.clone(),
                attributes: pairs.clone(),
            }),
        }
        attributes
    }
}

fn item_paragraph(role: ParagraphRole, level: usize, config: &RenderConfig) -> Paragraph {
    let first = config.indent(level);
    Paragraph::new(role).indented(level, first, first + config.indent_step)
}

/// Parse a numeric value only when it prints back to the same text, so the
/// typed field can be serialized without loss.
fn canonical<T: std::str::FromStr + ToString>(value: &str) -> Option<T> {
    value
        .parse::<T>()
        .ok()
        .filter(|parsed| parsed.to_string() == value)
}

fn apply_font_attribute(attributes: &mut AttributeSet, pair: &StyleAttribute) {
    let value = pair.value.as_str();
    let handled = match pair.key.as_str() {
        "color" => {
            attributes.foreground = Some(value.to_string());
            true
        }
        "background-color" => {
            attributes.background = Some(value.to_string());
            true
        }
        "font-family" => {
            attributes.font_family = Some(value.to_string());
            true
        }
        "size" => canonical::<f32>(value)
            .map(|size| attributes.font_size = Some(size))
            .is_some(),
        "letter-spacing" => canonical::<f32>(value)
            .map(|spacing| attributes.letter_spacing = Some(spacing))
            .is_some(),
        "font-weight" => canonical::<u16>(value)
            .filter(|weight| *weight != FontWeight::BOLD.0)
            .map(|weight| attributes.font_weight = Some(FontWeight(weight)))
            .is_some(),
        "decoration" if value == "underline" => {
            attributes.underline = true;
            true
        }
        "decoration" if value == "strikethrough" => {
            attributes.strikethrough = true;
            true
        }
        _ => false,
    };
    if !handled {
        attributes.font_extras.push(pair.clone());
    }
}

fn open_tag(name: &str, attributes: &[StyleAttribute]) -> String {
    let mut tag = format!("{{{{{name}");
    for attribute in attributes {
        tag.push_str(&format!(" {}=\"{}\"", attribute.key, attribute.value));
    }
    tag.push_str("}}");
    tag
}

/// A detected occurrence of a style in markup.
///
/// `range` covers the whole occurrence including tags, `content` the part
/// that becomes the node's children. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchSpan {
    pub range: Range<usize>,
    pub content: Range<usize>,
    pub kind: StyleKind,
    pub priority: usize,
}

impl MatchSpan {
    fn new(range: Range<usize>, content: Range<usize>, kind: StyleKind) -> Self {
        Self {
            range,
            content,
            kind,
            priority: 0,
        }
    }
}

/// A detector in the catalog.
pub struct Pattern {
    pub name: &'static str,
    /// The expression the detector is built on.
    pub pattern: &'static str,
    /// Whether the kind can appear inside the content of another style.
    /// Block kinds are only recognized at the top level.
    pub inline: bool,
    find: fn(&str) -> Vec<MatchSpan>,
}

impl Pattern {
    pub(crate) fn find(&self, text: &str) -> Vec<MatchSpan> {
        (self.find)(text)
    }
}

static PATTERNS: [Pattern; 13] = [
    Pattern { name: "heading", pattern: HEADING, inline: false, find: find_headings },
    Pattern { name: "code_block", pattern: CODE_BLOCK, inline: false, find: find_code_blocks },
    Pattern { name: "bullet_list", pattern: BULLET_ITEM, inline: false, find: find_bullet_lists },
    Pattern { name: "number_list", pattern: NUMBER_ITEM, inline: false, find: find_number_lists },
    Pattern { name: "quote", pattern: QUOTE_LINE, inline: false, find: find_quotes },
    Pattern { name: "horizontal_rule", pattern: HORIZONTAL_RULE, inline: false, find: find_rules },
    Pattern { name: "bold", pattern: BOLD, inline: true, find: find_bold },
    Pattern { name: "italic", pattern: ITALIC, inline: true, find: find_italic },
    Pattern { name: "strikethrough", pattern: STRIKETHROUGH, inline: true, find: find_strikethrough },
    Pattern { name: "code", pattern: CODE, inline: true, find: find_code },
    Pattern { name: "link", pattern: LINK, inline: true, find: find_links },
    Pattern { name: "mention", pattern: MENTION, inline: true, find: find_mentions },
    Pattern { name: "tag", pattern: TAG_OPEN, inline: true, find: find_tags },
];

/// All detectors, highest priority first.
pub fn patterns() -> &'static [Pattern] {
    &PATTERNS
}

/// Run every detector over `text`, one pass each, tagging each span with the
/// index of the detector that found it.
pub(crate) fn find_all(text: &str) -> Vec<MatchSpan> {
    find_where(text, |_| true)
}

/// Run only the inline detectors, for the content of another style.
pub(crate) fn find_inline(text: &str) -> Vec<MatchSpan> {
    find_where(text, |pattern| pattern.inline)
}

fn find_where(text: &str, keep: impl Fn(&Pattern) -> bool) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    for (priority, pattern) in PATTERNS.iter().enumerate() {
        if !keep(pattern) {
            continue;
        }
        spans.extend(pattern.find(text).into_iter().map(|mut span| {
            span.priority = priority;
            span
        }));
    }
    spans
}

fn find_headings(text: &str) -> Vec<MatchSpan> {
    HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let hashes = caps.get(1)?;
            Some(MatchSpan::new(
                whole.range(),
                hashes.end() + 1..whole.end(),
                StyleKind::Heading {
                    level: hashes.len() as u8,
                },
            ))
        })
        .collect()
}

fn find_code_blocks(text: &str) -> Vec<MatchSpan> {
    CODE_BLOCK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let language = caps.get(1).map(|m| m.as_str()).filter(|l| !l.is_empty());
            Some(MatchSpan::new(
                whole.range(),
                caps.get(2)?.range(),
                StyleKind::CodeBlock {
                    language: language.map(str::to_string),
                },
            ))
        })
        .collect()
}

fn find_delimited(re: &Regex, text: &str, kind: StyleKind) -> Vec<MatchSpan> {
    re.captures_iter(text)
        .filter_map(|caps| {
            Some(MatchSpan::new(
                caps.get(0)?.range(),
                caps.get(1)?.range(),
                kind.clone(),
            ))
        })
        .collect()
}

fn find_bold(text: &str) -> Vec<MatchSpan> {
    find_delimited(&BOLD_RE, text, StyleKind::Bold)
}

fn find_italic(text: &str) -> Vec<MatchSpan> {
    find_delimited(&ITALIC_RE, text, StyleKind::Italic)
}

fn find_strikethrough(text: &str) -> Vec<MatchSpan> {
    find_delimited(&STRIKETHROUGH_RE, text, StyleKind::Strikethrough)
}

fn find_code(text: &str) -> Vec<MatchSpan> {
    find_delimited(&CODE_RE, text, StyleKind::Code)
}

fn find_rules(text: &str) -> Vec<MatchSpan> {
    HORIZONTAL_RULE_RE
        .find_iter(text)
        .map(|m| MatchSpan::new(m.range(), m.end()..m.end(), StyleKind::HorizontalRule))
        .collect()
}

fn find_links(text: &str) -> Vec<MatchSpan> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if text[..whole.start()].ends_with('@') {
                return None;
            }
            Some(MatchSpan::new(
                whole.range(),
                caps.get(1)?.range(),
                StyleKind::Link {
                    url: caps.get(2)?.as_str().to_string(),
                },
            ))
        })
        .collect()
}

fn find_mentions(text: &str) -> Vec<MatchSpan> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let display = caps.get(1)?;
            Some(MatchSpan::new(
                caps.get(0)?.range(),
                display.range(),
                StyleKind::Mention {
                    user_id: caps.get(2)?.as_str().to_string(),
                    display_name: display.as_str().to_string(),
                },
            ))
        })
        .collect()
}

/// Parse the `k="v"` pairs of a tag, in order.
pub(crate) fn tag_attributes(source: &str) -> Vec<StyleAttribute> {
    TAG_ATTRIBUTE_RE
        .captures_iter(source)
        .map(|caps| StyleAttribute::new(&caps[1], &caps[2]))
        .collect()
}

/// `{{name ...}}content{{/name}}`. The content may not contain `{{`, so the
/// closing tag must be the next tag after the opening one.
fn find_tags(text: &str) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    let mut resume = 0;
    for caps in TAG_OPEN_RE.captures_iter(text) {
        let (Some(open), Some(name), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if open.start() < resume {
            continue;
        }
        let rest = &text[open.end()..];
        let Some(next) = rest.find("{{") else {
            break;
        };
        let close = format!("{{{{/{}}}}}", name.as_str());
        if !rest[next..].starts_with(&close) {
            continue;
        }
        let content = open.end()..open.end() + next;
        let end = content.end + close.len();
        let attributes = tag_attributes(attrs.as_str());
        let kind = match name.as_str() {
            "font" => StyleKind::Font { attributes },
            other => StyleKind::Custom {
                name: other.to_string(),
                attributes,
            },
        };
        spans.push(MatchSpan::new(open.start()..end, content, kind));
        resume = end;
    }
    spans
}

/// Lines of `text` with their byte offsets, without terminators.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len() + 1;
        Some((start, line))
    })
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Nesting level of a list item from its indentation: one level per tab,
/// otherwise one per two spaces.
pub(crate) fn indent_level(indent: &str) -> usize {
    let tabs = indent.chars().filter(|c| *c == '\t').count();
    if tabs > 0 {
        tabs
    } else {
        indent.chars().filter(|c| *c == ' ').count() / 2
    }
}

/// A list item line split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ItemLine<'a> {
    pub indent: &'a str,
    /// `Some` for numbered items, holding the digits.
    pub number: Option<&'a str>,
    pub content: &'a str,
}

impl ItemLine<'_> {
    pub fn ordered(&self) -> bool {
        self.number.is_some()
    }

    pub fn level(&self) -> usize {
        indent_level(self.indent)
    }
}

pub(crate) fn item_line(line: &str) -> Option<ItemLine<'_>> {
    if let Some(caps) = BULLET_ITEM_RE.captures(line) {
        return Some(ItemLine {
            indent: caps.get(1)?.as_str(),
            number: None,
            content: caps.get(2)?.as_str(),
        });
    }
    let caps = NUMBER_ITEM_RE.captures(line)?;
    Some(ItemLine {
        indent: caps.get(1)?.as_str(),
        number: Some(caps.get(2)?.as_str()),
        content: caps.get(3)?.as_str(),
    })
}

/// Whether `line` continues a list item indented by `item_indent` bytes.
pub(crate) fn is_continuation(line: &str, item_indent: usize) -> bool {
    let indent = leading_whitespace(line).len();
    indent > 0 && indent < line.len() && indent >= item_indent && item_line(line).is_none()
}

struct ListBlock {
    start: usize,
    end: usize,
    item_indent: usize,
    level: usize,
    first_number: Option<u32>,
}

impl ListBlock {
    fn into_span(self, ordered: bool) -> MatchSpan {
        let kind = if ordered {
            StyleKind::NumberList {
                start: self.first_number,
                level: self.level,
            }
        } else {
            StyleKind::BulletList { level: self.level }
        };
        MatchSpan::new(self.start..self.end, self.start..self.end, kind)
    }
}

/// Blocks of item lines of one list type plus their continuation lines.
fn find_lists(text: &str, ordered: bool) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    let mut block: Option<ListBlock> = None;

    for (offset, line) in lines_with_offsets(text) {
        let item = item_line(line).filter(|item| item.ordered() == ordered);

        if let Some(current) = block.as_mut() {
            if let Some(item) = &item {
                current.end = offset + line.len();
                current.item_indent = item.indent.len();
                current.level = current.level.min(item.level());
                continue;
            }
            if is_continuation(line, current.item_indent) {
                current.end = offset + line.len();
                continue;
            }
        }
        if let Some(done) = block.take() {
            spans.push(done.into_span(ordered));
        }
        if let Some(item) = item {
            block = Some(ListBlock {
                start: offset,
                end: offset + line.len(),
                item_indent: item.indent.len(),
                level: item.level(),
                first_number: item.number.and_then(|n| n.parse().ok()),
            });
        }
    }
    if let Some(done) = block {
        spans.push(done.into_span(ordered));
    }
    spans
}

fn find_bullet_lists(text: &str) -> Vec<MatchSpan> {
    find_lists(text, false)
}

fn find_number_lists(text: &str) -> Vec<MatchSpan> {
    find_lists(text, true)
}

/// Split a quote line into its nesting level and trimmed content.
pub(crate) fn quote_line(line: &str) -> Option<(usize, &str)> {
    let mut rest = line;
    let mut depth = 0;
    while let Some(stripped) = rest.strip_prefix('>') {
        depth += 1;
        rest = stripped.trim_start_matches([' ', '\t']);
    }
    (depth > 0).then(|| (depth - 1, rest.trim_end()))
}

/// Blocks of consecutive lines starting with `>`.
fn find_quotes(text: &str) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    let mut block: Option<(Range<usize>, usize)> = None;

    for (offset, line) in lines_with_offsets(text) {
        let Some((level, _)) = quote_line(line) else {
            if let Some((range, level)) = block.take() {
                spans.push(MatchSpan::new(range.clone(), range, StyleKind::Quote { level }));
            }
            continue;
        };
        if let Some((range, min_level)) = block.as_mut() {
            range.end = offset + line.len();
            *min_level = (*min_level).min(level);
        } else {
            block = Some((offset..offset + line.len(), level));
        }
    }
    if let Some((range, level)) = block {
        spans.push(MatchSpan::new(range.clone(), range, StyleKind::Quote { level }));
    }
    spans
}
