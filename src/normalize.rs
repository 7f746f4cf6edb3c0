//! Text rewrites applied to markup before parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::NormalizeConfig;

/// A pure markup rewrite.
pub trait NormalizeRule: Send + Sync {
    fn apply(&self, text: &str) -> String;
}

impl<F> NormalizeRule for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, text: &str) -> String {
        self(text)
    }
}

static EMPHASIS_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\*{3,})([^*\n]+?)(\*{3,})").expect("emphasis pattern must compile")
});

/// Collapse `***x***`, `****x****` and longer runs to `**x**`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseEmphasis;

impl NormalizeRule for CollapseEmphasis {
    fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        // Each rewrite shortens the text, so this terminates.
        loop {
            let next = EMPHASIS_RUN.replace_all(&current, "**$2**");
            if next == current {
                return current;
            }
            current = next.into_owned();
        }
    }
}

/// An ordered pipeline of [`NormalizeRule`]s.
pub struct Normalizer {
    rules: Vec<Box<dyn NormalizeRule>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_rules(vec![Box::new(CollapseEmphasis)])
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn NormalizeRule>>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &NormalizeConfig) -> Self {
        if config.collapse_emphasis {
            Self::default()
        } else {
            Self::with_rules(Vec::new())
        }
    }

    pub fn push_rule(&mut self, rule: impl NormalizeRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn normalize(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |text, rule| rule.apply(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_long_emphasis_runs() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("***x***"), "**x**");
        assert_eq!(normalizer.normalize("****x****"), "**x**");
        assert_eq!(normalizer.normalize("a ***b*** c ***d***"), "a **b** c **d**");
    }

    #[test]
    fn leaves_canonical_markup_and_rules_alone() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("**x**"), "**x**");
        assert_eq!(normalizer.normalize("a\n***\nb\n***"), "a\n***\nb\n***");
    }

    #[test]
    fn is_idempotent() {
        let normalizer = Normalizer::new();
        for input in ["***a*****b***", "*****", "***a***b***", "** ***x*** **"] {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn rules_apply_in_order() {
        let mut normalizer = Normalizer::with_rules(Vec::new());
        normalizer.push_rule(|text: &str| text.replace("<b>", "**"));
        normalizer.push_rule(|text: &str| text.to_uppercase());
        assert_eq!(normalizer.normalize("<b>x<b>"), "**X**");
    }

    #[test]
    fn collapse_can_be_disabled() {
        let normalizer = Normalizer::from_config(&NormalizeConfig {
            collapse_emphasis: false,
        });
        assert_eq!(normalizer.normalize("***x***"), "***x***");
    }
}
