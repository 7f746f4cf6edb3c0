//! Node tree to styled text.
//!
//! The traversal reports what it produces to a [`RenderSink`]. The styled
//! text builder and the position mapper both consume the same event stream,
//! so offsets computed by the mapper follow the rendered output exactly.

use tracing::debug;

use crate::attributes::AttributeSet;
use crate::config::RenderConfig;
use crate::node::Node;
use crate::style::StyleKind;
use crate::styled::StyledText;

/// Source text that is dropped from the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Markup<'a> {
    /// A canonical open or close tag.
    Tag(&'a str),
    /// The `- ` or `N. ` marker of a list item.
    ListMarker,
    /// The `> ` markers of a quote line.
    QuoteMarker,
    /// A horizontal rule line.
    Rule,
}

pub(crate) trait RenderSink {
    /// Markup that has no rendered counterpart.
    fn markup(&mut self, markup: Markup<'_>);
    /// Text present both in the source and in the output.
    fn text(&mut self, text: &str, attributes: &AttributeSet);
    /// Output-only text such as list prefixes and rule glyphs.
    fn synthetic(&mut self, text: &str, attributes: &AttributeSet);
}

/// Render a node tree into attributed runs.
pub fn render(node: &Node, config: &RenderConfig) -> StyledText {
    let mut builder = StyledBuilder::default();
    walk(node, config, &mut builder);
    debug!(runs = builder.output.runs().len(), "rendered styled text");
    builder.output
}

pub(crate) fn walk(node: &Node, config: &RenderConfig, sink: &mut impl RenderSink) {
    walk_node(node, &AttributeSet::default(), config, sink);
}

fn walk_children(
    children: &[Node],
    separator: Option<&str>,
    attributes: &AttributeSet,
    config: &RenderConfig,
    sink: &mut impl RenderSink,
) {
    for (index, child) in children.iter().enumerate() {
        if index > 0
            && let Some(separator) = separator
        {
            sink.text(separator, attributes);
        }
        walk_node(child, attributes, config, sink);
    }
}

/// `inherited` is the combined attributes of every enclosing style.
fn walk_node(
    node: &Node,
    inherited: &AttributeSet,
    config: &RenderConfig,
    sink: &mut impl RenderSink,
) {
    let (kind, children) = match node {
        Node::Text(content) => {
            if !content.is_empty() {
                sink.text(content, inherited);
            }
            return;
        }
        Node::Root(children) => {
            walk_children(children, None, inherited, config, sink);
            return;
        }
        Node::Style { kind, children } => (kind, children),
    };

    let attributes = kind.formatting_attributes(config).nested_in(inherited);
    match kind {
        StyleKind::BulletList { .. } | StyleKind::NumberList { .. } => {
            walk_children(children, Some("\n"), &attributes, config, sink);
        }
        StyleKind::BulletListItem { level } => {
            let prefix = format!("{}{} ", "\t".repeat(*level), config.bullet_symbol);
            sink.markup(Markup::ListMarker);
            sink.synthetic(&prefix, &attributes);
            walk_children(children, None, &attributes, config, sink);
        }
        StyleKind::NumberListItem { number, level } => {
            let prefix = format!("{}{}. ", "\t".repeat(*level), number.unwrap_or(1));
            sink.markup(Markup::ListMarker);
            sink.synthetic(&prefix, &attributes);
            walk_children(children, None, &attributes, config, sink);
        }
        StyleKind::Quote { .. } => {
            sink.markup(Markup::QuoteMarker);
            walk_children(children, None, &attributes, config, sink);
        }
        StyleKind::HorizontalRule => {
            sink.markup(Markup::Rule);
            sink.synthetic(&config.rule_text, &attributes);
        }
        _ => {
            let open = kind.canonical_open_tag();
            let close = kind.canonical_close_tag();
            if !open.is_empty() {
                sink.markup(Markup::Tag(&open));
            }
            walk_children(children, None, &attributes, config, sink);
            if !close.is_empty() {
                sink.markup(Markup::Tag(&close));
            }
        }
    }
}

#[derive(Default)]
struct StyledBuilder {
    output: StyledText,
}

impl RenderSink for StyledBuilder {
    fn markup(&mut self, _markup: Markup<'_>) {}

    fn text(&mut self, text: &str, attributes: &AttributeSet) {
        self.output.push(text, attributes);
    }

    fn synthetic(&mut self, text: &str, attributes: &AttributeSet) {
        self.output.push(text, attributes);
    }
}
