//! Converter-level tests.
//!
//! Fixture pairs live in `fixtures/`: `<name>.md` is the input and
//! `<name>.mrkdwn` the expected output.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{FenceState, MrkdwnConverter};
use crate::encoding::OutputEncoding;
use crate::error::ConvertError;

fn converter() -> MrkdwnConverter {
    MrkdwnConverter::new().unwrap()
}

// Fixture tests

#[test]
fn fixture_ai_answer() {
    assert_fixture("ai_answer");
}

#[test]
fn fixture_unclosed_fence() {
    assert_fixture("unclosed_fence");
}

#[test]
fn fixture_nested_lists() {
    assert_fixture("nested_lists");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/convert/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();
    let expected = std::fs::read_to_string(format!("{fixtures_dir}/{name}.mrkdwn")).unwrap();

    assert_eq!(converter().convert(&md), expected.trim_end());
}

// Pipeline tests

#[test]
fn empty_input_is_empty_output() {
    assert_eq!(converter().convert(""), "");
}

#[test]
fn whitespace_only_input_trims_to_empty() {
    assert_eq!(converter().convert(" \n\t\n "), "");
}

#[rstest]
#[case("Just a sentence.")]
#[case("  padded on both sides  ")]
#[case("Line one\nLine two\n\nLine four")]
#[case("2 * 3 = 6 and a_b_c")]
#[case("price: $5, path: C:\\temp")]
fn plain_text_is_only_trimmed(#[case] input: &str) {
    assert_eq!(converter().convert(input), input.trim());
}

#[test]
fn table_round_trip() {
    let out = converter().convert("| A | B |\n|---|---|\n| 1 | 2 |");
    assert_eq!(out, "*A* | *B*\n1 | 2");
}

#[test]
fn table_cells_are_shielded_from_line_rules() {
    let out = converter().convert("| Key | Value |\n|---|---|\n| - item | # not heading |");
    assert_eq!(out, "*Key* | *Value*\n- item | # not heading");
}

#[test]
fn table_between_paragraphs() {
    let md = "Results for **today**:\n\n| Name | Score |\n|:-----|------:|\n| Ann | 9 |\n| Bob | 7 |\n\nSee *notes* below.";
    assert_snapshot!(converter().convert(md), @r"
    Results for *today*:

    *Name* | *Score*
    Ann | 9
    Bob | 7

    See _notes_ below.
    ");
}

#[test]
fn code_fence_content_passes_through() {
    let md = "```rust\n# heading?\n- list?\n**bold?**\n```\n# Real heading";
    assert_snapshot!(converter().convert(md), @r"
    ```rust
    # heading?
    - list?
    **bold?**
    ```
    *Real heading*
    ");
}

#[test]
fn closing_fence_loses_its_tag() {
    let out = converter().convert("```js\nlet a;\n```js\nafter **x**");
    assert_eq!(out, "```js\nlet a;\n```\nafter *x*");
}

#[test]
fn fence_state_does_not_leak_between_calls() {
    let conv = converter();
    assert_eq!(conv.convert("```\n- open forever"), "```\n- open forever");
    assert_eq!(conv.convert("- fresh"), "• fresh");
}

#[test]
fn heading_longest_prefix_wins() {
    assert_eq!(converter().convert("## Two"), "*Two*");
}

#[test]
fn nested_emphasis_keeps_both_markers() {
    assert_eq!(
        converter().convert("**bold *and* italic**"),
        "*bold _and_ italic*"
    );
}

#[test]
fn horizontal_rule_glyph_is_exact() {
    assert_eq!(converter().convert("---"), "\u{2500}".repeat(10));
}

#[test]
fn no_placeholder_artifacts_remain() {
    let table = "| a | b |\n|---|---|\n| 1 | 2 |";
    let md = format!("{table}\n\n```\n{table}\n```\n\n{table}");
    let out = converter().convert(&md);
    assert!(!out.contains("%%"), "{out}");
}

// Line-level state machine

#[test]
fn convert_line_threads_fence_state() {
    let conv = converter();

    let (line, state) = conv.convert_line("```py", FenceState::Outside);
    assert_eq!((line.as_str(), state), ("```py", FenceState::Inside));

    let (line, state) = conv.convert_line("# comment", state);
    assert_eq!((line.as_str(), state), ("# comment", FenceState::Inside));

    let (line, state) = conv.convert_line("```", state);
    assert_eq!((line.as_str(), state), ("```", FenceState::Outside));

    let (line, state) = conv.convert_line("# Title", state);
    assert_eq!((line.as_str(), state), ("*Title*", FenceState::Outside));
}

#[test]
fn placeholder_line_is_untouched_inside_or_outside_fence() {
    let conv = converter();
    let token = "%%TABLE_PLACEHOLDER_abc__def__%%";
    for state in [FenceState::Outside, FenceState::Inside] {
        let (line, next) = conv.convert_line(token, state);
        assert_eq!(line, token);
        assert_eq!(next, state);
    }
}

// Failure policy

#[test]
fn unencodable_output_falls_back_to_original_input() {
    let latin = OutputEncoding::for_label("windows-1252").unwrap();
    let conv = MrkdwnConverter::with_encoding(latin).unwrap();
    let md = "  - [ ] todo  \n";

    assert_eq!(conv.convert(md), md);
    assert!(matches!(
        conv.try_convert(md),
        Err(ConvertError::Unencodable { .. })
    ));
}

#[test]
fn encodable_output_converts_normally() {
    let latin = OutputEncoding::for_label("latin1").unwrap();
    let conv = MrkdwnConverter::with_encoding(latin).unwrap();
    assert_eq!(conv.encoding().name(), "windows-1252");
    assert_eq!(conv.convert("**café**"), "*café*");
}

#[test]
fn converter_is_shareable_across_threads() {
    let conv = converter();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let conv = &conv;
                s.spawn(move || conv.convert(&format!("```\n# {i}\n```\n# {i}")))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("```\n# {i}\n```\n*{i}*"));
        }
    });
}
