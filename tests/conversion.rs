use tmarkup::{
    AttributeSet, FontWeight, Node, Paragraph, ParagraphRole, PositionMapper, StyleAttribute,
    StyleKind, StyledText, TextRun,
};

fn round_trip(markup: &str) -> String {
    tmarkup::to_markup(&tmarkup::render(markup))
}

fn styled(kind: StyleKind, children: Vec<Node>) -> Node {
    Node::style(kind, children)
}

#[test]
fn bold_renders_to_a_bold_run_and_back() {
    let styled_text = tmarkup::render("**bold**");
    assert_eq!(
        styled_text.runs(),
        &[TextRun::new(
            "bold",
            AttributeSet {
                font_weight: Some(FontWeight::BOLD),
                ..Default::default()
            }
        )]
    );
    assert_eq!(tmarkup::to_markup(&styled_text), "**bold**");
}

#[test]
fn bold_run_serializes_to_markup() {
    let run = TextRun::new(
        "bold",
        AttributeSet {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        },
    );
    assert_eq!(tmarkup::to_markup(&StyledText::from_runs([run])), "**bold**");
}

#[test]
fn bullet_items() {
    assert_eq!(
        tmarkup::parse("- a\n- b"),
        Node::Root(vec![styled(
            StyleKind::BulletList { level: 0 },
            vec![
                styled(StyleKind::BulletListItem { level: 0 }, vec![Node::text("a")]),
                styled(StyleKind::BulletListItem { level: 0 }, vec![Node::text("b")]),
            ]
        )])
    );
    assert_eq!(round_trip("- a\n- b"), "- a\n- b");
}

#[test]
fn quote_levels() {
    let root = tmarkup::parse("> L1\n> > L2\n> L1-1");
    let levels: Vec<_> = root
        .children()
        .iter()
        .filter_map(|node| match node.kind() {
            Some(StyleKind::Quote { level }) => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, [0, 1, 0]);
    assert_eq!(round_trip("> L1\n> > L2\n> L1-1"), "> L1\n> > L2\n> L1-1");
}

#[test]
fn quote_with_inline_styles() {
    assert_eq!(tmarkup::render("> a **b**").text(), "a b");
    for markup in ["> a **b**", "> a _b_ c\n# H", "> > x ~~y~~ `z`\n> w"] {
        assert_eq!(round_trip(markup), markup);
    }
}

#[test]
fn block_markup_inside_items_and_quotes_stays_literal() {
    for markup in ["> - a", "- - a", "1. - a", "- > a", "> # T", "> ```\n> x\n> ```"] {
        assert_eq!(round_trip(markup), markup);
    }
}

#[test]
fn quote_run_starting_with_a_dash() {
    let run = TextRun::new(
        "- a",
        AttributeSet {
            paragraph: Some(Paragraph::new(ParagraphRole::Quote).indented(0, 20.0, 20.0)),
            ..Default::default()
        },
    );
    let markup = tmarkup::to_markup(&StyledText::from_runs([run]));
    assert_eq!(markup, "> - a");
    assert_eq!(round_trip(&markup), "> - a");
}

#[test]
fn long_marker_chain_converts_both_ways() {
    let markup = "- ".repeat(5000) + "a";
    let styled_text = tmarkup::render(&markup);
    assert!(styled_text.text().ends_with("- a"));
    assert_eq!(tmarkup::to_markup(&styled_text), markup);
}

#[test]
fn bold_inside_a_heading_merges_into_the_heading_weight() {
    assert_eq!(round_trip("# **T**"), "# T");
    assert_eq!(round_trip("# T _i_"), "# T _i_");
}

#[test]
fn code_block_without_language() {
    assert_eq!(
        tmarkup::parse("```\nx\n```"),
        Node::Root(vec![styled(
            StyleKind::CodeBlock { language: None },
            vec![Node::text("x")]
        )])
    );
    assert_eq!(round_trip("```\nx\n```"), "```\nx\n```");
}

#[test]
fn font_color() {
    let markup = r##"{{font color="#FF0000"}}x{{/font}}"##;
    assert_eq!(
        tmarkup::parse(markup),
        Node::Root(vec![styled(
            StyleKind::Font {
                attributes: vec![StyleAttribute::new("color", "#FF0000")]
            },
            vec![Node::text("x")]
        )])
    );
    assert_eq!(round_trip(markup), markup);
}

#[test]
fn two_tab_item_is_level_two() {
    let root = tmarkup::parse("\t\t- x");
    assert_eq!(
        root.children()[0].children()[0].kind(),
        Some(&StyleKind::BulletListItem { level: 2 })
    );
}

#[test]
fn list_then_font_line() {
    let markup = "- abc\n- def\n{{font color=\"#FF0000\"}}my world{{/font}}";
    assert_eq!(round_trip(markup), markup);
}

#[test]
fn nested_bullets_round_trip() {
    assert_eq!(round_trip("- a\n  - b\n    - c\n- d"), "- a\n  - b\n    - c\n- d");
}

#[test]
fn numbered_items_keep_their_numbers() {
    assert_eq!(round_trip("3. a\n4. b"), "3. a\n4. b");
}

#[test]
fn headings_and_rules() {
    for markup in ["# Title\nbody", "### Third", "a\n***\nb", "## A\n## B"] {
        assert_eq!(round_trip(markup), markup);
    }
}

#[test]
fn mixed_inline_styles() {
    let markup = "a **b** _c_ ~~d~~ `e` [f](https://x.io) @[Ann](u1)";
    assert_eq!(round_trip(markup), markup);
    assert_eq!(round_trip("_a **b**_"), "_a **b**_");
}

#[test]
fn triple_emphasis_comes_back_normalized() {
    assert_eq!(tmarkup::normalize("***x***"), "**x**");
    assert_eq!(round_trip("***x***"), "**x**");
}

#[test]
fn custom_tags_round_trip() {
    let markup = r#"{{spoiler mode="blur"}}hidden{{/spoiler}}"#;
    assert_eq!(round_trip(markup), markup);
}

#[test]
fn plain_text_maps_to_itself() {
    let raw = "hello world\nsecond line";
    let mut mapper = PositionMapper::default();
    mapper.rebuild(raw, &tmarkup::render(raw));
    for offset in 0..=raw.chars().count() {
        assert_eq!(mapper.to_rendered(offset), offset);
        assert_eq!(mapper.to_raw(offset), offset);
    }
}

#[test]
fn mapping_around_bold() {
    let raw = "a **b** c";
    let mut mapper = PositionMapper::default();
    mapper.rebuild(raw, &tmarkup::render(raw));
    assert_eq!(mapper.rendered_len(), 5);
    assert_eq!(mapper.to_rendered(4), 2);
    assert_eq!(mapper.to_rendered(8), 4);
    assert_eq!(mapper.to_raw(2), 2);
    assert_eq!(mapper.to_raw(4), 8);
}

#[test]
fn custom_config_changes_bullets() {
    let config = tmarkup::Config::from_toml_str("[render]\nbullet_symbol = \"◦\"\n").unwrap();
    let styled_text = tmarkup::render_with_config("- a", &config);
    assert_eq!(styled_text.text(), "◦ a");
    assert_eq!(tmarkup::to_markup_with_config(&styled_text, &config), "- a");
}
