//! End-to-end scenarios for the public entry points.

use rstest::rstest;
use sanitex_core::{
    ensure_closed_markdown_fences, normalize_display_math, prepare_lesson_for_render,
    sanitize_flashcard_content, sanitize_lesson_body, sanitize_lesson_body_with, SanitizeOptions,
    Sanitizer,
};

#[test]
fn display_math_after_prose() {
    let output = normalize_display_math("Solve \\[ x^2 + 1 = 0 \\]\nDone.");
    insta::assert_debug_snapshot!(output, @r#""Solve \n$$\nx^2 + 1 = 0\n$$\n\nDone.""#);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Solve ");
    assert!(lines.contains(&"x^2 + 1 = 0"));
    assert_eq!(lines.last(), Some(&"Done."));
}

#[rstest]
#[case::odd_backslashes("\\[x\\]", "$$\nx\n$$\n")]
#[case::even_backslashes("\\\\[x\\\\]", "\\\\[x\\\\]")]
fn escape_parity_decides_conversion(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_display_math(input), expected);
}

#[test]
fn display_math_inside_fence_is_untouched() {
    let input = "```\n\\[ x \\]\n```";
    assert_eq!(normalize_display_math(input), input);
}

#[test]
fn unterminated_fence_is_closed_once() {
    let input = "```js\nconsole.log(1);";
    let closed = ensure_closed_markdown_fences(input);
    insta::assert_debug_snapshot!(closed, @r#""```js\nconsole.log(1);\n```""#);
    assert_eq!(ensure_closed_markdown_fences(&closed), closed);
}

#[test]
fn flashcard_subscripts() {
    let output = sanitize_flashcard_content("x_1 and \\theta_0");
    insta::assert_debug_snapshot!(output, @r#""$x_1$ and \\theta_0""#);
}

#[test]
fn lesson_body_keeps_math_commands() {
    let raw = "---\ntopic: trig\n---\n\\tan \\theta = y\\nx \\ge 0\u{1}";
    assert_eq!(sanitize_lesson_body(raw), "\\tan \\theta = y\nx \\ge 0");
}

#[test]
fn lesson_body_decodes_newline_before_prose() {
    assert_eq!(sanitize_lesson_body("yes\\ni agree"), "yes\ni agree");
}

#[test]
fn lesson_body_with_latex_guard() {
    let options = SanitizeOptions {
        preserve_latex_commands: true,
        ..SanitizeOptions::default()
    };
    let sanitizer = Sanitizer::new(&options);
    assert_eq!(sanitizer.lesson_body("x \\neq 0\\ny"), "x \\neq 0\ny");
}

#[test]
fn lesson_body_with_injected_stripper() {
    let stripper = |text: &str| text.trim_start_matches("META\n").to_string();
    assert_eq!(sanitize_lesson_body_with("META\na\\nb", &stripper), "a\nb");
}

#[test]
fn lesson_ready_for_render() {
    let raw = "---\ntitle: Roots\n---\nFind the roots:\\n\\[ x^2 = 4 \\]\\nThen run:\\n```python\\nprint(2)";
    let output = prepare_lesson_for_render(raw);
    insta::assert_debug_snapshot!(
        output,
        @r#""Find the roots:\n$$\nx^2 = 4\n$$\n\nThen run:\n```python\nprint(2)\n```""#
    );
}

#[test]
fn doubly_escaped_newlines_decode() {
    assert_eq!(sanitize_lesson_body("one\\\\ntwo"), "one\ntwo");
}

#[rstest]
#[case::empty("")]
#[case::only_backslashes("\\\\\\\\\\")]
#[case::only_markers("```~~~``")]
#[case::dangling_open("\\[")]
#[case::dangling_close("\\]")]
fn degenerate_inputs_do_not_panic(#[case] input: &str) {
    let _ = sanitize_lesson_body(input);
    let _ = sanitize_flashcard_content(input);
    let _ = normalize_display_math(input);
    let _ = ensure_closed_markdown_fences(input);
    let _ = prepare_lesson_for_render(input);
}
