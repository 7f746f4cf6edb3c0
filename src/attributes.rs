use serde::Serialize;

/// A `key="value"` pair carried by font and custom tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StyleAttribute {
    pub key: String,
    pub value: String,
}

impl StyleAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A custom `{{name ...}}` tag the core does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTag {
    pub name: String,
    pub attributes: Vec<StyleAttribute>,
}

/// CSS-style numeric font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(self) -> bool {
        self >= Self::BOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    Upright,
    Italic,
}

/// The block construct a paragraph belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphRole {
    Quote,
    BulletItem,
    NumberItem,
    Heading(u8),
    CodeBlock { language: Option<String> },
    Rule,
}

/// Paragraph-level attributes. Indents are in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ParagraphRole>,
    pub indent_level: usize,
    pub first_line_indent: f32,
    pub head_indent: f32,
}

impl Paragraph {
    pub fn new(role: ParagraphRole) -> Self {
        Self {
            role: Some(role),
            indent_level: 0,
            first_line_indent: 0.0,
            head_indent: 0.0,
        }
    }

    pub fn indented(mut self, level: usize, first_line_indent: f32, head_indent: f32) -> Self {
        self.indent_level = level;
        self.first_line_indent = first_line_indent;
        self.head_indent = head_indent;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Generic formatting attributes attached to a run of styled text.
///
/// The set is independent of any rich-text toolkit; a UI layer
/// maps it onto its native representation. The default value is plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_slant: Option<FontSlant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub monospace: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Foreground color as written in markup, usually `#RRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
    /// Font tag keys without a dedicated field, in markup order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub font_extras: Vec<StyleAttribute>,
    /// Custom tags, innermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomTag>,
}

impl AttributeSet {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight.is_some_and(FontWeight::is_bold)
    }

    pub fn is_italic(&self) -> bool {
        self.font_slant == Some(FontSlant::Italic)
    }

    pub fn role(&self) -> Option<&ParagraphRole> {
        self.paragraph.as_ref().and_then(|p| p.role.as_ref())
    }

    /// Combine `self` (the inner style) with the attributes of an enclosing
    /// style.
    ///
    /// Font traits accumulate: the heavier weight wins and a slant survives
    /// from either side, while size and family keep the inner value. Flags
    /// are unioned. Every other attribute takes the outer value when the
    /// outer style sets it. The rule is associative.
    pub fn nested_in(&self, outer: &AttributeSet) -> AttributeSet {
        AttributeSet {
            font_weight: self.font_weight.max(outer.font_weight),
            font_slant: self.font_slant.or(outer.font_slant),
            font_size: self.font_size.or(outer.font_size),
            font_family: self.font_family.clone().or_else(|| outer.font_family.clone()),
            monospace: self.monospace || outer.monospace,
            strikethrough: self.strikethrough || outer.strikethrough,
            underline: self.underline || outer.underline,
            foreground: outer.foreground.clone().or_else(|| self.foreground.clone()),
            background: outer.background.clone().or_else(|| self.background.clone()),
            link: outer.link.clone().or_else(|| self.link.clone()),
            mention_user_id: outer
                .mention_user_id
                .clone()
                .or_else(|| self.mention_user_id.clone()),
            letter_spacing: outer.letter_spacing.or(self.letter_spacing),
            paragraph: outer.paragraph.clone().or_else(|| self.paragraph.clone()),
            font_extras: self
                .font_extras
                .iter()
                .chain(&outer.font_extras)
                .cloned()
                .collect(),
            custom: self.custom.iter().chain(&outer.custom).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> AttributeSet {
        AttributeSet {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        }
    }

    fn italic() -> AttributeSet {
        AttributeSet {
            font_slant: Some(FontSlant::Italic),
            ..Default::default()
        }
    }

    #[test]
    fn bold_inside_italic_keeps_both_traits() {
        let merged = bold().nested_in(&italic());
        assert!(merged.is_bold());
        assert!(merged.is_italic());
        assert_eq!(merged, italic().nested_in(&bold()));
    }

    #[test]
    fn size_comes_from_inner_style() {
        let inner = AttributeSet {
            font_size: Some(12.0),
            ..Default::default()
        };
        let outer = AttributeSet {
            font_size: Some(28.0),
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        };
        let merged = inner.nested_in(&outer);
        assert_eq!(merged.font_size, Some(12.0));
        assert!(merged.is_bold());
    }

    #[test]
    fn non_font_attributes_come_from_outer_style() {
        let inner = AttributeSet {
            foreground: Some("#00FF00".into()),
            ..Default::default()
        };
        let outer = AttributeSet {
            foreground: Some("#FF0000".into()),
            paragraph: Some(Paragraph::new(ParagraphRole::Quote)),
            ..Default::default()
        };
        let merged = inner.nested_in(&outer);
        assert_eq!(merged.foreground.as_deref(), Some("#FF0000"));
        assert_eq!(merged.role(), Some(&ParagraphRole::Quote));

        let merged = inner.nested_in(&AttributeSet::default());
        assert_eq!(merged.foreground.as_deref(), Some("#00FF00"));
    }

    #[test]
    fn merge_is_associative() {
        let a = AttributeSet {
            custom: vec![CustomTag {
                name: "a".into(),
                attributes: vec![],
            }],
            font_size: Some(10.0),
            ..Default::default()
        };
        let b = AttributeSet {
            link: Some("https://x".into()),
            ..bold()
        };
        let c = AttributeSet {
            custom: vec![CustomTag {
                name: "c".into(),
                attributes: vec![],
            }],
            link: Some("https://y".into()),
            ..italic()
        };
        assert_eq!(
            a.nested_in(&b).nested_in(&c),
            a.nested_in(&b.nested_in(&c))
        );
    }

    #[test]
    fn default_is_plain() {
        assert!(AttributeSet::default().is_plain());
        assert!(!bold().is_plain());
    }
}
