use tracing::{debug, trace};

use crate::config::Config;
use crate::node::Node;
use crate::normalize::Normalizer;
use crate::style::{self, MatchSpan, StyleKind};

/// Turns markup into a [`Node`] tree.
#[derive(Debug, Default)]
pub struct Parser {
    normalizer: Normalizer,
}

impl Parser {
    pub fn new(config: &Config) -> Self {
        Self::with_normalizer(Normalizer::from_config(&config.normalize))
    }

    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalize and parse markup. Always returns a `Root`; text that
    /// matches no style stays literal.
    pub fn parse(&self, markup: &str) -> Node {
        let normalized = self.normalizer.normalize(markup);
        let children = parse_nodes(&normalized);
        debug!(
            bytes = normalized.len(),
            top_level = children.len(),
            "parsed markup"
        );
        Node::Root(children)
    }
}

/// Parse normalized markup into sibling nodes.
pub(crate) fn parse_nodes(text: &str) -> Vec<Node> {
    build_nodes(text, style::find_all(text))
}

/// Parse the content of a style. Block markup inside it stays literal, so
/// nesting is bounded by the inline kinds.
fn parse_inline(text: &str) -> Vec<Node> {
    build_nodes(text, style::find_inline(text))
}

fn build_nodes(text: &str, spans: Vec<MatchSpan>) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    let spans = resolve(spans);
    if spans.is_empty() {
        return vec![Node::text(text)];
    }

    let mut nodes = Vec::new();
    let mut cursor = 0;
    for span in spans {
        trace!(
            kind = span.kind.name(),
            start = span.range.start,
            end = span.range.end,
            "resolved span"
        );
        if span.range.start > cursor {
            nodes.push(Node::text(&text[cursor..span.range.start]));
        }
        cursor = span.range.end;
        build_span(text, span, &mut nodes);
    }
    if cursor < text.len() {
        nodes.push(Node::text(&text[cursor..]));
    }
    nodes
}

fn build_span(text: &str, span: MatchSpan, nodes: &mut Vec<Node>) {
    match span.kind {
        StyleKind::BulletList { .. } | StyleKind::NumberList { .. } => {
            nodes.push(build_list(&text[span.range], span.kind));
        }
        StyleKind::Quote { .. } => nodes.extend(build_quote(&text[span.range])),
        StyleKind::HorizontalRule => nodes.push(Node::style(span.kind, Vec::new())),
        kind if kind.is_verbatim() => {
            let content = &text[span.content];
            let children = if content.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(content)]
            };
            nodes.push(Node::style(kind, children));
        }
        kind => nodes.push(Node::style(kind, parse_inline(&text[span.content]))),
    }
}

struct Item {
    level: usize,
    number: Option<u32>,
    content: String,
}

/// Split a list block into items. Continuation lines join the item above
/// with their indentation removed.
fn build_list(block: &str, kind: StyleKind) -> Node {
    let mut items: Vec<Item> = Vec::new();
    for line in block.split('\n') {
        if let Some(item) = style::item_line(line) {
            items.push(Item {
                level: item.level(),
                number: item.number.and_then(|n| n.parse().ok()),
                content: item.content.to_string(),
            });
        } else if let Some(current) = items.last_mut() {
            current.content.push('\n');
            current.content.push_str(line.trim_start_matches([' ', '\t']));
        }
    }

    let ordered = matches!(kind, StyleKind::NumberList { .. });
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
            Node::style(kind, parse_inline(&item.content))
        })
        .collect();
    Node::style(kind, children)
}

/// Split a quote block into one `Quote` node per run of equal-level lines,
/// separated by newline text.
fn build_quote(block: &str) -> Vec<Node> {
    let mut segments: Vec<(usize, String)> = Vec::new();
    for line in block.split('\n') {
        let Some((level, content)) = style::quote_line(line) else {
            continue;
        };
        match segments.last_mut() {
            Some((current, text)) if *current == level => {
                text.push('\n');
                text.push_str(content);
            }
            _ => segments.push((level, content.to_string())),
        }
    }

    let mut nodes = Vec::with_capacity(segments.len() * 2);
    for (index, (level, content)) in segments.into_iter().enumerate() {
        if index > 0 {
            nodes.push(Node::text("\n"));
        }
        nodes.push(Node::style(StyleKind::Quote { level }, parse_inline(&content)));
    }
    nodes
}

/// For spans sorted by start then longest first, whether each one is
/// strictly contained by a span accepted by `counts`.
fn strictly_contained(spans: &[MatchSpan], counts: impl Fn(&MatchSpan) -> bool) -> Vec<bool> {
    let mut contained = vec![false; spans.len()];
    // Furthest end among counted spans starting before the current group.
    let mut max_end: Option<usize> = None;
    let mut group = 0;
    while group < spans.len() {
        let start = spans[group].range.start;
        let mut group_end: Option<usize> = None;
        let mut next = group;
        while next < spans.len() && spans[next].range.start == start {
            let end = spans[next].range.end;
            contained[next] = max_end.is_some_and(|outer| outer >= end)
                || group_end.is_some_and(|outer| outer > end);
            if counts(&spans[next]) {
                group_end = group_end.max(Some(end));
            }
            next += 1;
        }
        max_end = max_end.max(group_end);
        group = next;
    }
    contained
}

/// Keep the first span at each position, by start then priority, and drop
/// spans starting inside one already kept.
fn sweep(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_by_key(|span| (span.range.start, span.priority));
    let mut cursor = 0;
    spans.retain(|span| {
        if span.range.start < cursor {
            return false;
        }
        cursor = span.range.end;
        true
    });
    spans
}

fn intersects_any(sorted: &[MatchSpan], span: &MatchSpan) -> bool {
    let first = sorted.partition_point(|other| other.range.end <= span.range.start);
    sorted
        .get(first)
        .is_some_and(|other| other.range.start < span.range.end)
}

/// Reduce all detected spans to pairwise disjoint top-level spans.
///
/// A span is outer when no other span strictly contains it. List blocks are
/// only checked against non-list spans, and outer lists beat every span that
/// intersects them. Partial overlaps left after that go to the span that
/// starts first.
pub(crate) fn resolve(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });
    let contained = strictly_contained(&spans, |_| true);
    let contained_by_inline = strictly_contained(&spans, |span| !span.kind.is_list());

    let mut lists = Vec::new();
    let mut others = Vec::new();
    for ((span, contained), contained_by_inline) in
        spans.into_iter().zip(contained).zip(contained_by_inline)
    {
        if span.kind.is_list() {
            if !contained_by_inline {
                lists.push(span);
            }
        } else if !contained {
            others.push(span);
        }
    }

    if lists.is_empty() {
        return sweep(others);
    }
    let mut survivors = sweep(lists);
    others.retain(|span| !intersects_any(&survivors, span));
    survivors.extend(others);
    sweep(survivors)
}
