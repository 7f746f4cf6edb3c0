mod attributes;
mod config;
mod detect;
mod error;
mod node;
mod normalize;
mod parser;
mod position;
mod render;
mod serialize;
mod style;
mod styled;

use std::sync::LazyLock;

pub use attributes::{
    AttributeSet, CustomTag, FontSlant, FontWeight, Paragraph, ParagraphRole, StyleAttribute,
};
pub use config::{Config, DetectConfig, NormalizeConfig, RenderConfig};
pub use detect::detect;
pub use error::ConfigError;
pub use node::{Fold, Node};
pub use normalize::{CollapseEmphasis, NormalizeRule, Normalizer};
pub use parser::Parser;
pub use position::PositionMapper;
pub use render::render as render_node;
pub use serialize::serialize;
pub use style::{Pattern, StyleKind, patterns};
pub use styled::{StyledText, TextRun};

static DEFAULT_CONFIG: LazyLock<Config> = LazyLock::new(Config::compiled_default);

/// Parse markup into a node tree with the built-in configuration.
pub fn parse(markup: &str) -> Node {
    parse_with_config(markup, &DEFAULT_CONFIG)
}

pub fn parse_with_config(markup: &str, config: &Config) -> Node {
    Parser::new(config).parse(markup)
}

/// Render markup into styled text.
pub fn render(markup: &str) -> StyledText {
    render_with_config(markup, &DEFAULT_CONFIG)
}

pub fn render_with_config(markup: &str, config: &Config) -> StyledText {
    render::render(&parse_with_config(markup, config), &config.render)
}

/// Write styled text back as canonical markup.
pub fn to_markup(styled: &StyledText) -> String {
    to_markup_with_config(styled, &DEFAULT_CONFIG)
}

pub fn to_markup_with_config(styled: &StyledText, config: &Config) -> String {
    serialize(&detect(styled, config))
}

/// Apply the default normalization rules to markup.
pub fn normalize(markup: &str) -> String {
    Normalizer::from_config(&DEFAULT_CONFIG.normalize).normalize(markup)
}
