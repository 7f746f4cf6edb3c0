use serde::Serialize;

use crate::attributes::AttributeSet;

/// A piece of text sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub attributes: AttributeSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, AttributeSet::default())
    }
}

/// Rendered output: an ordered list of attributed runs.
///
/// Runs are kept maximal. Empty runs are never stored and neighbours with
/// equal attributes are merged on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        runs.into_iter().collect()
    }

    /// Append text, extending the last run when the attributes match.
    pub fn push(&mut self, text: &str, attributes: &AttributeSet) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.attributes == *attributes => last.text.push_str(text),
            _ => self.runs.push(TextRun::new(text, attributes.clone())),
        }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// The concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Length in characters, the unit cursor offsets use.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl FromIterator<TextRun> for StyledText {
    fn from_iter<I: IntoIterator<Item = TextRun>>(iter: I) -> Self {
        let mut styled = StyledText::new();
        for run in iter {
            styled.push(&run.text, &run.attributes);
        }
        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::FontWeight;

    #[test]
    fn push_merges_equal_neighbours_and_skips_empty() {
        let bold = AttributeSet {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        };
        let mut styled = StyledText::new();
        styled.push("a", &AttributeSet::default());
        styled.push("", &bold);
        styled.push("b", &AttributeSet::default());
        styled.push("c", &bold);
        assert_eq!(styled.runs().len(), 2);
        assert_eq!(styled.runs()[0].text, "ab");
        assert_eq!(styled.text(), "abc");
    }

    #[test]
    fn char_len_counts_characters() {
        let styled = StyledText::from_runs([TextRun::plain("列表"), TextRun::plain("ab")]);
        assert_eq!(styled.char_len(), 4);
        assert_eq!(styled.runs().len(), 1);
    }
}
