use crate::style::StyleKind;

/// The parsed form of markup.
///
/// A `Style` node's children cover exactly the content of that style;
/// styles nearer the leaves are applied first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Style { kind: StyleKind, children: Vec<Node> },
    Root(Vec<Node>),
}

/// A bottom-up transformation of a [`Node`] tree.
///
/// Children are folded first and their results handed to the parent.
pub trait Fold {
    type Output;

    fn text(&mut self, content: &str) -> Self::Output;
    fn style(&mut self, kind: &StyleKind, children: Vec<Self::Output>) -> Self::Output;
    fn root(&mut self, children: Vec<Self::Output>) -> Self::Output;
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn style(kind: StyleKind, children: Vec<Node>) -> Self {
        Node::Style { kind, children }
    }

    pub fn kind(&self) -> Option<&StyleKind> {
        match self {
            Node::Style { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Style { children, .. } | Node::Root(children) => children,
        }
    }

    pub fn fold<F: Fold>(&self, algebra: &mut F) -> F::Output {
        match self {
            Node::Text(content) => algebra.text(content),
            Node::Style { kind, children } => {
                let children = children.iter().map(|child| child.fold(algebra)).collect();
                algebra.style(kind, children)
            }
            Node::Root(children) => {
                let children = children.iter().map(|child| child.fold(algebra)).collect();
                algebra.root(children)
            }
        }
    }

    /// The text of all leaves, without any markup.
    pub fn plain_text(&self) -> String {
        self.fold(&mut PlainText)
    }
}

struct PlainText;

impl Fold for PlainText {
    type Output = String;

    fn text(&mut self, content: &str) -> String {
        content.to_string()
    }

    fn style(&mut self, _kind: &StyleKind, children: Vec<String>) -> String {
        children.concat()
    }

    fn root(&mut self, children: Vec<String>) -> String {
        children.concat()
    }
}
