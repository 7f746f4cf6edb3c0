use crate::node::{Fold, Node};
use crate::style::StyleKind;

/// Write a node tree back as markup using canonical tags.
pub fn serialize(node: &Node) -> String {
    node.fold(&mut MarkupWriter)
}

struct MarkupWriter;

impl Fold for MarkupWriter {
    type Output = String;

    fn text(&mut self, content: &str) -> String {
        content.to_string()
    }

    fn style(&mut self, kind: &StyleKind, children: Vec<String>) -> String {
        match kind {
            StyleKind::BulletList { .. } | StyleKind::NumberList { .. } => children.join("\n"),
            StyleKind::BulletListItem { .. } | StyleKind::NumberListItem { .. } => {
                list_item(&kind.canonical_open_tag(), &children.concat())
            }
            StyleKind::Quote { .. } => quote(&kind.canonical_open_tag(), &children.concat()),
            StyleKind::HorizontalRule => kind.canonical_open_tag(),
            _ => {
                let mut out = kind.canonical_open_tag();
                for child in &children {
                    out.push_str(child);
                }
                out.push_str(&kind.canonical_close_tag());
                out
            }
        }
    }

    fn root(&mut self, children: Vec<String>) -> String {
        children.concat()
    }
}

/// The first line follows the item marker; later lines are indented to
/// line up with the first line's text.
fn list_item(prefix: &str, content: &str) -> String {
    let indent = " ".repeat(prefix.chars().count());
    let mut out = String::with_capacity(prefix.len() + content.len());
    for (index, line) in content.split('\n').enumerate() {
        if index == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// Every line gets the full marker; empty lines keep only the `>`s.
fn quote(prefix: &str, content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
