//! Styled text back to a node tree.
//!
//! Lines are classified by their paragraph attributes and grouped into
//! blocks (lists, quotes, headings, code blocks, rules and plain text).
//! Inside each block, inline kinds are inferred per run, merged across
//! adjacent runs and nested into style nodes.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::attributes::{AttributeSet, Paragraph, ParagraphRole};
use crate::config::Config;
use crate::node::Node;
use crate::style::{StyleAttribute, StyleKind};
use crate::styled::StyledText;

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\. ").expect("number prefix pattern must compile"));

/// Rebuild a node tree from styled text.
pub fn detect(styled: &StyledText, config: &Config) -> Node {
    let (text, runs) = flatten(styled);
    let lines = classify_lines(&text, &runs, config);
    let blocks = group_blocks(&text, &lines, &config.render.bullet_symbol);
    debug!(
        runs = runs.len(),
        lines = lines.len(),
        blocks = blocks.len(),
        "detected blocks"
    );

    let builder = BlockBuilder {
        text: &text,
        runs: &runs,
        config,
    };
    let mut nodes = Vec::new();
    for (index, block) in blocks.into_iter().enumerate() {
        if index > 0 {
            nodes.push(Node::text("\n"));
        }
        builder.build(block, &mut nodes);
    }
    Node::Root(nodes)
}

struct Run<'a> {
    range: Range<usize>,
    attributes: &'a AttributeSet,
}

/// Concatenate the runs and index their byte ranges, merging neighbours with
/// equal attributes.
fn flatten(styled: &StyledText) -> (String, Vec<Run<'_>>) {
    let mut text = String::new();
    let mut runs: Vec<Run<'_>> = Vec::new();
    for run in styled.runs() {
        if run.text.is_empty() {
            continue;
        }
        let start = text.len();
        text.push_str(&run.text);
        match runs.last_mut() {
            Some(last) if last.attributes == &run.attributes => last.range.end = text.len(),
            _ => runs.push(Run {
                range: start..text.len(),
                attributes: &run.attributes,
            }),
        }
    }
    (text, runs)
}

fn attributes_at<'a>(runs: &[Run<'a>], offset: usize) -> Option<&'a AttributeSet> {
    let index = runs.partition_point(|run| run.range.end <= offset);
    runs.get(index)
        .filter(|run| run.range.start <= offset)
        .map(|run| run.attributes)
}

#[derive(Debug, Clone, PartialEq)]
enum LineRole {
    Plain,
    Heading(u8),
    Quote(usize),
    Item,
    CodeBlock(Option<String>),
    Rule,
}

struct Line<'a> {
    content: Range<usize>,
    terminator: Option<&'a AttributeSet>,
    role: LineRole,
}

impl Line<'_> {
    fn terminator_role(&self) -> Option<&ParagraphRole> {
        self.terminator.and_then(AttributeSet::role)
    }
}

fn classify_lines<'a>(text: &str, runs: &[Run<'a>], config: &Config) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        let end = start + line.len();
        let terminator = (end < text.len())
            .then(|| attributes_at(runs, end))
            .flatten();
        let first = if line.is_empty() {
            terminator
        } else {
            attributes_at(runs, start)
        };
        let role = first
            .and_then(|attributes| attributes.paragraph.as_ref())
            .map_or(LineRole::Plain, |paragraph| line_role(paragraph, config));
        lines.push(Line {
            content: start..end,
            terminator,
            role,
        });
        start = end + 1;
    }
    lines
}

fn line_role(paragraph: &Paragraph, config: &Config) -> LineRole {
    match &paragraph.role {
        Some(ParagraphRole::Quote) => LineRole::Quote(paragraph.indent_level),
        Some(ParagraphRole::BulletItem | ParagraphRole::NumberItem) => LineRole::Item,
        Some(ParagraphRole::Heading(level)) => LineRole::Heading((*level).clamp(1, 6)),
        Some(ParagraphRole::CodeBlock { language }) => LineRole::CodeBlock(language.clone()),
        Some(ParagraphRole::Rule) => LineRole::Rule,
        None => indent_role(paragraph, config),
    }
}

/// Classify a paragraph that carries only indents.
fn indent_role(paragraph: &Paragraph, config: &Config) -> LineRole {
    let first = paragraph.first_line_indent;
    let head = paragraph.head_indent;
    if first < head && head >= config.detect.list_min_head_indent {
        LineRole::Item
    } else if first == head && head >= config.detect.quote_min_indent {
        let step = config.render.indent_step;
        let depth = if step > 0.0 {
            (head / step).round() as usize
        } else {
            0
        };
        LineRole::Quote(depth.saturating_sub(1).max(paragraph.indent_level))
    } else {
        LineRole::Plain
    }
}

struct ItemPrefix {
    level: usize,
    number: Option<u32>,
    /// Set for numbered items even when the digits overflow.
    ordered: bool,
    len: usize,
}

/// Read the rendered `\t\t• ` or `\t2. ` prefix of an item line.
fn item_prefix(line: &str, bullet_symbol: &str) -> Option<ItemPrefix> {
    let rest = line.trim_start_matches('\t');
    let level = line.len() - rest.len();
    if let Some(caps) = NUMBER_PREFIX.captures(rest) {
        let whole = caps.get(0)?;
        return Some(ItemPrefix {
            level,
            number: caps[1].parse().ok(),
            ordered: true,
            len: level + whole.len(),
        });
    }
    let after = rest.strip_prefix(bullet_symbol)?.strip_prefix(' ')?;
    Some(ItemPrefix {
        level,
        number: None,
        ordered: false,
        len: line.len() - after.len(),
    })
}

struct ItemBlock {
    level: usize,
    number: Option<u32>,
    content: Range<usize>,
}

enum Block {
    Inline(Range<usize>),
    Heading(u8, Range<usize>),
    Rule,
    CodeBlock(Option<String>, Range<usize>),
    Quote(Vec<(usize, Range<usize>)>),
    List { ordered: bool, items: Vec<ItemBlock> },
}

fn group_blocks(text: &str, lines: &[Line<'_>], bullet_symbol: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut previous: Option<&Line<'_>> = None;

    for line in lines {
        let content = line.content.clone();
        let continues = |role: fn(&ParagraphRole) -> bool| {
            previous
                .and_then(Line::terminator_role)
                .is_some_and(role)
        };
        match &line.role {
            LineRole::Item => match item_prefix(&text[content.clone()], bullet_symbol) {
                Some(prefix) => {
                    let item = ItemBlock {
                        level: prefix.level,
                        number: prefix.number,
                        content: content.start + prefix.len..content.end,
                    };
                    if let Some(Block::List { ordered, items }) = blocks.last_mut()
                        && *ordered == prefix.ordered
                    {
                        items.push(item);
                    } else {
                        blocks.push(Block::List {
                            ordered: prefix.ordered,
                            items: vec![item],
                        });
                    }
                }
                None => {
                    if let Some(Block::List { items, .. }) = blocks.last_mut()
                        && let Some(item) = items.last_mut()
                    {
                        item.content.end = content.end;
                    } else {
                        push_inline(&mut blocks, content);
                    }
                }
            },
            LineRole::Plain => push_inline(&mut blocks, content),
            LineRole::Heading(level) => blocks.push(Block::Heading(*level, content)),
            LineRole::Rule => blocks.push(Block::Rule),
            LineRole::CodeBlock(language) => {
                let joined = continues(|role| matches!(role, ParagraphRole::CodeBlock { .. }));
                match blocks.last_mut() {
                    Some(Block::CodeBlock(current, range)) if joined && current == language => {
                        range.end = content.end;
                    }
                    _ => blocks.push(Block::CodeBlock(language.clone(), content)),
                }
            }
            LineRole::Quote(level) => {
                let joined = continues(|role| matches!(role, ParagraphRole::Quote));
                match blocks.last_mut() {
                    Some(Block::Quote(segments)) => match segments.last_mut() {
                        Some((current, range)) if joined && current == level => {
                            range.end = content.end;
                        }
                        _ => segments.push((*level, content)),
                    },
                    _ => blocks.push(Block::Quote(vec![(*level, content)])),
                }
            }
        }
        previous = Some(line);
    }
    blocks
}

fn push_inline(blocks: &mut Vec<Block>, content: Range<usize>) {
    match blocks.last_mut() {
        Some(Block::Inline(range)) => range.end = content.end,
        _ => blocks.push(Block::Inline(content)),
    }
}

struct BlockBuilder<'a> {
    text: &'a str,
    runs: &'a [Run<'a>],
    config: &'a Config,
}

impl BlockBuilder<'_> {
    fn build(&self, block: Block, nodes: &mut Vec<Node>) {
        match block {
            Block::Inline(range) => nodes.extend(self.inline(range, &AttributeSet::default())),
            Block::Heading(level, range) => {
                let kind = StyleKind::Heading { level };
                nodes.push(self.block_style(kind, range));
            }
            Block::Rule => nodes.push(Node::style(StyleKind::HorizontalRule, Vec::new())),
            Block::CodeBlock(language, range) => {
                let children = if range.is_empty() {
                    Vec::new()
                } else {
                    vec![Node::text(&self.text[range])]
                };
                nodes.push(Node::style(StyleKind::CodeBlock { language }, children));
            }
            Block::Quote(segments) => {
                for (index, (level, range)) in segments.into_iter().enumerate() {
                    if index > 0 {
                        nodes.push(Node::text("\n"));
                    }
                    nodes.push(self.block_style(StyleKind::Quote { level }, range));
                }
            }
            Block::List { ordered, items } => {
                let level = items.iter().map(|item| item.level).min().unwrap_or(0);
                let kind = if ordered {
                    StyleKind::NumberList {
                        start: items.first().and_then(|item| item.number),
                        level,
                    }
                } else {
                    StyleKind::BulletList { level }
                };
                let children = items
                    .into_iter()
                    .map(|item| {
                        let kind = if ordered {
                            StyleKind::NumberListItem {
                                number: item.number,
                                level: item.level,
                            }
                        } else {
                            StyleKind::BulletListItem { level: item.level }
                        };
                        self.block_style(kind, item.content)
                    })
                    .collect();
                nodes.push(Node::style(kind, children));
            }
        }
    }

    /// A block style whose own attributes are not inferred again inline.
    fn block_style(&self, kind: StyleKind, range: Range<usize>) -> Node {
        let implied = kind.formatting_attributes(&self.config.render);
        Node::style(kind, self.inline(range, &implied))
    }

    fn inline(&self, range: Range<usize>, implied: &AttributeSet) -> Vec<Node> {
        let spans = collect_spans(self.text, self.runs, range.clone(), implied);
        nest(self.text, range, spans)
    }
}

/// A kind applied over a byte range. `order` is the detection order: lower
/// values nest closer to the text.
#[derive(Debug, Clone)]
struct KindSpan {
    range: Range<usize>,
    kind: StyleKind,
    order: usize,
}

/// Kinds whose markup may span a line break.
fn crosses_lines(kind: &StyleKind) -> bool {
    matches!(kind, StyleKind::Font { .. } | StyleKind::Custom { .. })
}

fn format_number(value: f32) -> String {
    value.to_string()
}

const BOLD_ORDER: usize = 0;
const ITALIC_ORDER: usize = 1;
const CODE_ORDER: usize = 2;
const STRIKETHROUGH_ORDER: usize = 3;
const LINK_ORDER: usize = 4;
const MENTION_ORDER: usize = 5;
const FONT_ORDER: usize = 6;
const CUSTOM_ORDER: usize = 7;

/// Infer inline kinds for one attribute set, paired with their detection
/// order.
fn inline_kinds(attributes: &AttributeSet, implied: &AttributeSet) -> Vec<(usize, StyleKind)> {
    let mut kinds = Vec::new();
    if attributes.is_bold() && !implied.is_bold() {
        kinds.push((BOLD_ORDER, StyleKind::Bold));
    }
    if attributes.is_italic() && !implied.is_italic() {
        kinds.push((ITALIC_ORDER, StyleKind::Italic));
    }
    if attributes.monospace && !implied.monospace {
        kinds.push((CODE_ORDER, StyleKind::Code));
    }
    if attributes.strikethrough && !implied.strikethrough {
        kinds.push((STRIKETHROUGH_ORDER, StyleKind::Strikethrough));
    }
    if let Some(url) = &attributes.link
        && implied.link.as_ref() != Some(url)
    {
        kinds.push((LINK_ORDER, StyleKind::Link { url: url.clone() }));
    }
    if let Some(user_id) = &attributes.mention_user_id
        && implied.mention_user_id.as_ref() != Some(user_id)
    {
        let kind = StyleKind::Mention {
            user_id: user_id.clone(),
            display_name: String::new(),
        };
        kinds.push((MENTION_ORDER, kind));
    }

    let mut font = Vec::new();
    if let Some(color) = &attributes.foreground
        && implied.foreground.as_ref() != Some(color)
    {
        font.push(StyleAttribute::new("color", color));
    }
    if let Some(color) = &attributes.background
        && implied.background.as_ref() != Some(color)
    {
        font.push(StyleAttribute::new("background-color", color));
    }
    if let Some(size) = attributes.font_size
        && implied.font_size != Some(size)
    {
        font.push(StyleAttribute::new("size", format_number(size)));
    }
    if let Some(family) = &attributes.font_family
        && implied.font_family.as_ref() != Some(family)
    {
        font.push(StyleAttribute::new("font-family", family));
    }
    if let Some(weight) = attributes.font_weight
        && !weight.is_bold()
        && implied.font_weight != Some(weight)
    {
        font.push(StyleAttribute::new("font-weight", weight.0.to_string()));
    }
    if attributes.underline && !implied.underline {
        font.push(StyleAttribute::new("decoration", "underline"));
    }
    if let Some(spacing) = attributes.letter_spacing
        && implied.letter_spacing != Some(spacing)
    {
        font.push(StyleAttribute::new("letter-spacing", format_number(spacing)));
    }
    font.extend(
        attributes
            .font_extras
            .iter()
            .filter(|extra| !implied.font_extras.contains(extra))
            .cloned(),
    );
    if !font.is_empty() {
        kinds.push((FONT_ORDER, StyleKind::Font { attributes: font }));
    }

    for (position, tag) in attributes.custom.iter().enumerate() {
        if !implied.custom.contains(tag) {
            let kind = StyleKind::Custom {
                name: tag.name.clone(),
                attributes: tag.attributes.clone(),
            };
            kinds.push((CUSTOM_ORDER + position, kind));
        }
    }
    kinds
}

/// Infer kinds run by run over `range` and merge each kind across adjacent
/// runs into one span.
fn collect_spans(
    text: &str,
    runs: &[Run<'_>],
    range: Range<usize>,
    implied: &AttributeSet,
) -> Vec<KindSpan> {
    let mut spans: Vec<KindSpan> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let first = runs.partition_point(|run| run.range.end <= range.start);

    for run in runs[first..]
        .iter()
        .take_while(|run| run.range.start < range.end)
    {
        let clipped = run.range.start.max(range.start)..run.range.end.min(range.end);
        let kinds = inline_kinds(run.attributes, implied);
        for piece in split_lines(text, clipped) {
            let is_newline = &text[piece.clone()] == "\n";
            let mut still_open = Vec::with_capacity(kinds.len());
            for (order, kind) in &kinds {
                if is_newline && !crosses_lines(kind) {
                    continue;
                }
                let existing = open.iter().copied().find(|&index| {
                    spans[index].kind == *kind && spans[index].range.end == piece.start
                });
                match existing {
                    Some(index) => {
                        spans[index].range.end = piece.end;
                        still_open.push(index);
                    }
                    None => {
                        spans.push(KindSpan {
                            range: piece.clone(),
                            kind: kind.clone(),
                            order: *order,
                        });
                        still_open.push(spans.len() - 1);
                    }
                }
            }
            open = still_open;
        }
    }

    for span in &mut spans {
        if let StyleKind::Mention { display_name, .. } = &mut span.kind {
            *display_name = text[span.range.clone()].to_string();
        }
    }
    spans
}

/// Split a range so that every `\n` is a piece of its own.
fn split_lines(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut start = range.start;
    for (offset, _) in text[range.clone()].match_indices('\n') {
        let newline = range.start + offset;
        if newline > start {
            pieces.push(start..newline);
        }
        pieces.push(newline..newline + 1);
        start = newline + 1;
    }
    if start < range.end {
        pieces.push(start..range.end);
    }
    pieces
}

fn push_text(nodes: &mut Vec<Node>, text: &str, range: Range<usize>) {
    if !range.is_empty() {
        nodes.push(Node::text(&text[range]));
    }
}

/// Turn spans over `range` into nodes. Overlapping spans form clusters that
/// are nested as a unit; text between clusters stays plain.
fn nest(text: &str, range: Range<usize>, mut spans: Vec<KindSpan>) -> Vec<Node> {
    spans.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.end.cmp(&a.range.end))
            .then(b.order.cmp(&a.order))
    });

    let mut nodes = Vec::new();
    let mut cursor = range.start;
    let mut spans = spans.into_iter().peekable();
    while let Some(first) = spans.next() {
        let start = first.range.start;
        let mut end = first.range.end;
        let mut cluster = vec![first];
        while let Some(next) = spans.next_if(|span| span.range.start < end) {
            end = end.max(next.range.end);
            cluster.push(next);
        }
        push_text(&mut nodes, text, cursor..start);
        nodes.extend(nest_cluster(text, start..end, cluster));
        cursor = end;
    }
    push_text(&mut nodes, text, cursor..range.end);
    nodes
}

fn nest_cluster(text: &str, range: Range<usize>, mut spans: Vec<KindSpan>) -> Vec<Node> {
    let covering = spans
        .iter()
        .enumerate()
        .filter(|(_, span)| span.range == range)
        .max_by_key(|(_, span)| span.order)
        .map(|(index, _)| index);
    if let Some(index) = covering {
        let outer = spans.swap_remove(index);
        return vec![Node::style(outer.kind, nest(text, range, spans))];
    }

    // No span covers the cluster: split at every boundary and stack the
    // applicable kinds on each piece.
    let mut bounds: Vec<usize> = spans
        .iter()
        .flat_map(|span| [span.range.start, span.range.end])
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut nodes = Vec::new();
    for pair in bounds.windows(2) {
        let piece = pair[0]..pair[1];
        let mut applicable: Vec<&KindSpan> = spans
            .iter()
            .filter(|span| span.range.start <= piece.start && span.range.end >= piece.end)
            .collect();
        applicable.sort_by_key(|span| span.order);
        let mut node = Node::text(&text[piece]);
        for span in applicable {
            node = Node::style(span.kind.clone(), vec![node]);
        }
        nodes.push(node);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{CustomTag, FontWeight};
    use crate::styled::TextRun;

    fn detect_default(styled: &StyledText) -> Node {
        detect(styled, &Config::default())
    }

    fn bold() -> AttributeSet {
        AttributeSet {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        }
    }

    fn red() -> AttributeSet {
        AttributeSet {
            foreground: Some("#FF0000".into()),
            ..Default::default()
        }
    }

    #[test]
    fn bold_run_becomes_bold_node() {
        let styled = StyledText::from_runs([TextRun::new("bold", bold())]);
        assert_eq!(
            detect_default(&styled),
            Node::Root(vec![Node::style(StyleKind::Bold, vec![Node::text("bold")])])
        );
    }

    #[test]
    fn same_range_kinds_nest_outermost_last() {
        let styled = StyledText::from_runs([TextRun::new(
            "x",
            AttributeSet {
                foreground: Some("#FF0000".into()),
                ..bold()
            },
        )]);
        assert_eq!(
            detect_default(&styled),
            Node::Root(vec![Node::style(
                StyleKind::Font {
                    attributes: vec![StyleAttribute::new("color", "#FF0000")]
                },
                vec![Node::style(StyleKind::Bold, vec![Node::text("x")])]
            )])
        );
    }

    #[test]
    fn contained_span_nests_inside_longer_one() {
        let styled = StyledText::from_runs([
            TextRun::new("ab", red()),
            TextRun::new(
                "c",
                AttributeSet {
                    foreground: Some("#FF0000".into()),
                    ..bold()
                },
            ),
        ]);
        let font = StyleKind::Font {
            attributes: vec![StyleAttribute::new("color", "#FF0000")],
        };
        assert_eq!(
            detect_default(&styled),
            Node::Root(vec![Node::style(
                font,
                vec![
                    Node::text("ab"),
                    Node::style(StyleKind::Bold, vec![Node::text("c")])
                ]
            )])
        );
    }

    #[test]
    fn partial_overlap_is_split() {
        let italic_bold = AttributeSet {
            font_slant: Some(crate::attributes::FontSlant::Italic),
            ..bold()
        };
        let italic = AttributeSet {
            font_slant: Some(crate::attributes::FontSlant::Italic),
            ..Default::default()
        };
        let styled = StyledText::from_runs([
            TextRun::new("a", bold()),
            TextRun::new("b", italic_bold),
            TextRun::new("c", italic),
        ]);
        assert_eq!(
            detect_default(&styled),
            Node::Root(vec![
                Node::style(StyleKind::Bold, vec![Node::text("a")]),
                Node::style(
                    StyleKind::Italic,
                    vec![Node::style(StyleKind::Bold, vec![Node::text("b")])]
                ),
                Node::style(StyleKind::Italic, vec![Node::text("c")]),
            ])
        );
    }

    #[test]
    fn emphasis_stops_at_line_breaks() {
        let styled = StyledText::from_runs([TextRun::new("a\nb", bold())]);
        assert_eq!(
            detect_default(&styled),
            Node::Root(vec![
                Node::style(StyleKind::Bold, vec![Node::text("a")]),
                Node::text("\n"),
                Node::style(StyleKind::Bold, vec![Node::text("b")]),
            ])
        );
    }

    #[test]
    fn font_spans_line_breaks() {
        let styled = StyledText::from_runs([TextRun::new("a\nb", red())]);
        let root = detect_default(&styled);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children(), &[Node::text("a\nb")]);
    }

    #[test]
    fn mention_display_name_comes_from_text() {
        let styled = StyledText::from_runs([TextRun::new(
            "Ann",
            AttributeSet {
                mention_user_id: Some("u1".into()),
                ..Default::default()
            },
        )]);
        assert_eq!(
            detect_default(&styled).children()[0].kind(),
            Some(&StyleKind::Mention {
                user_id: "u1".into(),
                display_name: "Ann".into()
            })
        );
    }

    #[test]
    fn custom_tags_nest_innermost_first() {
        let styled = StyledText::from_runs([TextRun::new(
            "x",
            AttributeSet {
                custom: vec![
                    CustomTag {
                        name: "inner".into(),
                        attributes: vec![],
                    },
                    CustomTag {
                        name: "outer".into(),
                        attributes: vec![],
                    },
                ],
                ..Default::default()
            },
        )]);
        let root = detect_default(&styled);
        let outer = &root.children()[0];
        assert_eq!(outer.kind().map(StyleKind::name), Some("outer"));
        assert_eq!(outer.children()[0].kind().map(StyleKind::name), Some("inner"));
    }

    #[test]
    fn unknown_attributes_degrade_to_plain_text() {
        let styled = StyledText::from_runs([TextRun::new(
            "x",
            AttributeSet {
                paragraph: Some(Paragraph {
                    role: None,
                    indent_level: 0,
                    first_line_indent: 3.0,
                    head_indent: 3.0,
                }),
                ..Default::default()
            },
        )]);
        assert_eq!(detect_default(&styled), Node::Root(vec![Node::text("x")]));
    }

    #[test]
    fn indent_heuristic_without_roles() {
        let config = Config::default();
        let list = Paragraph {
            role: None,
            indent_level: 0,
            first_line_indent: 0.0,
            head_indent: 20.0,
        };
        assert_eq!(indent_role(&list, &config), LineRole::Item);
        let quote = Paragraph {
            first_line_indent: 40.0,
            head_indent: 40.0,
            ..list.clone()
        };
        assert_eq!(indent_role(&quote, &config), LineRole::Quote(1));
        let mut strict = Config::default();
        strict.detect.quote_min_indent = 50.0;
        strict.detect.list_min_head_indent = 50.0;
        assert_eq!(indent_role(&quote, &strict), LineRole::Plain);
        assert_eq!(indent_role(&list, &strict), LineRole::Plain);
    }

    #[test]
    fn item_prefixes() {
        let bullet = item_prefix("\t\t• x", "•").unwrap();
        assert_eq!((bullet.level, bullet.ordered, bullet.len), (2, false, 2 + "• ".len()));
        let number = item_prefix("\t12. x", "•").unwrap();
        assert_eq!((number.level, number.number, number.len), (1, Some(12), 5));
        assert!(item_prefix("x", "•").is_none());
    }

    #[test]
    fn split_lines_isolates_newlines() {
        assert_eq!(split_lines("a\n\nb", 0..4), vec![0..1, 1..2, 2..3, 3..4]);
        assert_eq!(split_lines("ab", 0..2), vec![0..2]);
    }
}
