//! Display-math normalizer
//!
//! A single left-to-right pass over the text that tracks whether the cursor
//! sits in prose, an inline code span or a fenced block (see
//! [`LexState`]). In prose, every `\[ ... \]` pair is rewritten into the
//! canonical block form
//!
//! ```text
//! $$
//! interior
//! $$
//! ```
//!
//! and everything else is copied through untouched. Markers inside code are
//! never rewritten. An open marker without a matching close marker is copied
//! through as ordinary text.
//!
//! A marker only counts when the backslash in front of the bracket is live,
//! i.e. preceded by an odd number of backslashes in total: `\[` converts,
//! `\\[` (an escaped backslash followed by a literal bracket) does not.

use crate::options::Delimiters;
use crate::scan::{is_escaped, run_length, LexState, Marker};

/// A matched `\[` ... `\]` pair. `open` is the index of the opening
/// backslash, `close` the index of the closing bracket, both in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMathSpan {
    pub open: usize,
    pub close: usize,
}

impl DisplayMathSpan {
    /// Char range of the text between the markers.
    pub fn interior(&self) -> std::ops::Range<usize> {
        self.open + 2..self.close - 1
    }
}

/// True when the bracket `bracket` (`[` or `]`) at `index` is a live display
/// math marker.
pub fn is_display_marker(chars: &[char], index: usize, bracket: char) -> bool {
    chars.get(index) == Some(&bracket) && index > 0 && is_escaped(chars, index)
}

/// Nearest live `\]` whose bracket sits at or after `from`.
pub fn find_display_close(chars: &[char], from: usize) -> Option<usize> {
    (from.max(1)..chars.len()).find(|&i| is_display_marker(chars, i, ']'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMathNormalizer {
    pub delimiters: Delimiters,
}

impl Default for DisplayMathNormalizer {
    fn default() -> Self {
        DisplayMathNormalizer {
            delimiters: Delimiters::new("$$", "$$"),
        }
    }
}

impl DisplayMathNormalizer {
    pub fn new(delimiters: Delimiters) -> Self {
        DisplayMathNormalizer { delimiters }
    }

    pub fn normalize(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len() + 16);
        let mut copied = 0;

        for span in display_math_spans(&chars) {
            out.extend(&chars[copied..span.open]);
            self.emit_block(&mut out, &chars[span.interior()]);
            copied = span.close + 1;
        }
        out.extend(&chars[copied..]);

        out
    }

    fn emit_block(&self, out: &mut String, interior: &[char]) {
        let interior: String = interior.iter().collect();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.delimiters.open);
        out.push('\n');
        out.push_str(interior.trim());
        out.push('\n');
        out.push_str(&self.delimiters.close);
        out.push('\n');
    }
}

/// All `\[ ... \]` pairs outside code, in order.
pub fn display_math_spans(chars: &[char]) -> Vec<DisplayMathSpan> {
    let mut spans = Vec::new();
    let mut state = LexState::Plain;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(marker) = Marker::from_char(c) {
            let len = run_length(chars, i, c);
            state = state.after_run(marker, len);
            i += len;
            continue;
        }
        if state.is_plain() && is_display_marker(chars, i + 1, '[') {
            match find_display_close(chars, i + 2) {
                Some(close) => {
                    spans.push(DisplayMathSpan { open: i, close });
                    i = close + 1;
                    continue;
                }
                // Every later close search would start further right and fail too.
                None => {
                    tracing::debug!(at = i, "unterminated display math, kept as text");
                    break;
                }
            }
        }
        i += 1;
    }

    spans
}

/// Rewrite `\[ ... \]` outside code into `$$` blocks.
pub fn normalize_display_math(input: &str) -> String {
    DisplayMathNormalizer::default().normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_converts_simple_span() {
        assert_eq!(normalize_display_math(r"\[x\]"), "$$\nx\n$$\n");
    }

    #[test]
    fn test_trims_interior() {
        assert_eq!(
            normalize_display_math("A \\[  \n a+b \n \\] B"),
            "A \n$$\na+b\n$$\n B"
        );
    }

    #[test]
    fn test_no_extra_newline_after_line_break() {
        assert_eq!(normalize_display_math("A\n\\[x\\]"), "A\n$$\nx\n$$\n");
    }

    #[rstest]
    #[case::escaped_backslash(r"\\[x\\]")]
    #[case::inline_code(r"`\[x\]`")]
    #[case::double_inline_code(r"`` a ` \[x\] ``")]
    #[case::fenced("```\n\\[ x \\]\n```")]
    #[case::tilde_fence("~~~\n\\[ x \\]\n~~~")]
    #[case::tilde_inline(r"~\[x\]~")]
    #[case::double_tilde_inline(r"~~ \[x\] ~~")]
    #[case::unterminated(r"\[ x + 1")]
    #[case::lone_close(r"x \]")]
    #[case::plain_brackets("[a] and [b]")]
    fn passes_through(#[case] input: &str) {
        assert_eq!(normalize_display_math(input), input);
    }

    #[test]
    fn test_three_backslashes_convert() {
        assert_eq!(normalize_display_math(r"\\\[x\]"), "\\\\\n$$\nx\n$$\n");
    }

    #[test]
    fn test_nearest_close_wins() {
        assert_eq!(
            normalize_display_math(r"\[a\] mid \[b\]"),
            "$$\na\n$$\n mid \n$$\nb\n$$\n"
        );
    }

    #[test]
    fn test_math_after_closed_fence_converts() {
        let input = "```\ncode\n```\n\\[y\\]";
        assert_eq!(normalize_display_math(input), "```\ncode\n```\n$$\ny\n$$\n");
    }

    #[test]
    fn test_mismatched_fence_marker_stays_fenced() {
        let input = "```\n~~~\n\\[y\\]";
        assert_eq!(normalize_display_math(input), input);
    }

    #[test]
    fn test_unterminated_open_before_valid_pair() {
        // The first open pairs with the only close; the second open is text.
        assert_eq!(normalize_display_math(r"\[a \[b\]"), "$$\na \\[b\n$$\n");
    }

    #[test]
    fn test_custom_delimiters() {
        let normalizer =
            DisplayMathNormalizer::new(Delimiters::new(r"\begin{equation}", r"\end{equation}"));
        assert_eq!(
            normalizer.normalize(r"\[x\]"),
            "\\begin{equation}\nx\n\\end{equation}\n"
        );
    }

    #[test]
    fn test_spans_report_positions() {
        let chars: Vec<char> = r"ab\[x\]`\[y\]`".chars().collect();
        let spans = display_math_spans(&chars);
        assert_eq!(spans, vec![DisplayMathSpan { open: 2, close: 6 }]);
        assert_eq!(spans[0].interior(), 4..5);
    }

    #[test]
    fn test_multibyte_text_preserved() {
        assert_eq!(
            normalize_display_math("Δ \\[ ∑ x \\] é"),
            "Δ \n$$\n∑ x\n$$\n é"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_display_math(""), "");
    }
}
