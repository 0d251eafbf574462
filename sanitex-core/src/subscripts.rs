//! Subscript auto-wrapper for flashcard content
//!
//! Flashcards are short and often written as `x_1` or `a_n` without any
//! math delimiters. This pass wraps such tokens in inline math. It is a
//! heuristic: tokens after a backslash (`\theta_0`), tokens already inside
//! math and tokens inside code are left alone.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::math::find_display_close;
use crate::options::Delimiters;
use crate::scan::{is_escaped, run_length, LexState, Marker};

/// One word, a single underscore, one word.
static SUBSCRIPT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9]+_[A-Za-z0-9]+\b").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptWrapper {
    pub delimiters: Delimiters,
}

impl Default for SubscriptWrapper {
    fn default() -> Self {
        SubscriptWrapper {
            delimiters: Delimiters::new("$", "$"),
        }
    }
}

impl SubscriptWrapper {
    pub fn new(delimiters: Delimiters) -> Self {
        SubscriptWrapper { delimiters }
    }

    pub fn wrap(&self, input: &str) -> String {
        let protected = protected_ranges(input);
        let mut out = String::with_capacity(input.len() + 8);
        let mut last = 0;

        for token in SUBSCRIPT_TOKEN.find_iter(input) {
            let before = &input[..token.start()];
            let after = &input[token.end()..];

            let bounded = before.ends_with(&self.delimiters.open)
                && after.starts_with(&self.delimiters.close);
            if before.ends_with('\\')
                || bounded
                || protected.iter().any(|r| r.contains(&token.start()))
            {
                continue;
            }

            out.push_str(&input[last..token.start()]);
            out.push_str(&self.delimiters.open);
            out.push_str(token.as_str());
            out.push_str(&self.delimiters.close);
            last = token.end();
        }

        out.push_str(&input[last..]);
        out
    }
}

/// Byte ranges covered by code or existing math.
fn protected_ranges(input: &str) -> Vec<Range<usize>> {
    let chars: Vec<char> = input.chars().collect();
    let mut offsets: Vec<usize> = input.char_indices().map(|(b, _)| b).collect();
    offsets.push(input.len());

    let mut ranges = Vec::new();
    let mut state = LexState::Plain;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(marker) = Marker::from_char(c) {
            let len = run_length(&chars, i, c);
            let before = state;
            state = state.after_run(marker, len);
            if !before.is_plain() || !state.is_plain() {
                ranges.push(offsets[i]..offsets[i + len]);
            }
            i += len;
            continue;
        }

        if !state.is_plain() {
            ranges.push(offsets[i]..offsets[i + 1]);
            i += 1;
            continue;
        }

        if let Some(end) = math_span_end(&chars, i) {
            ranges.push(offsets[i]..offsets[end]);
            i = end;
            continue;
        }

        i += 1;
    }

    ranges
}

/// If a math span opens at `i`, the char index just past its close.
fn math_span_end(chars: &[char], i: usize) -> Option<usize> {
    let c = chars[i];
    let next = chars.get(i + 1).copied();

    if c == '$' && !is_escaped(chars, i) {
        if next == Some('$') {
            return (i + 2..chars.len().saturating_sub(1))
                .find(|&j| chars[j] == '$' && chars[j + 1] == '$' && !is_escaped(chars, j))
                .map(|j| j + 2);
        }
        return (i + 1..chars.len())
            .take_while(|&j| chars[j] != '\n')
            .find(|&j| chars[j] == '$' && !is_escaped(chars, j))
            .map(|j| j + 1);
    }

    if c == '\\' && is_escaped(chars, i + 1) {
        match next {
            Some('(') => {
                return (i + 2..chars.len())
                    .find(|&j| chars[j] == ')' && is_escaped(chars, j))
                    .map(|j| j + 1);
            }
            Some('[') => return find_display_close(chars, i + 2).map(|j| j + 1),
            _ => {}
        }
    }

    None
}

/// Wrap bare `a_b` tokens in `$...$`.
pub fn wrap_subscripts(input: &str) -> String {
    SubscriptWrapper::default().wrap(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("x_1 and \\theta_0", "$x_1$ and \\theta_0")]
    #[case("a_n + b_n", "$a_n$ + $b_n$")]
    #[case("Index a_i.", "Index $a_i$.")]
    #[case("Δ x_2", "Δ $x_2$")]
    fn wraps(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(wrap_subscripts(input), expected);
    }

    #[rstest]
    #[case::already_wrapped("$x_1$")]
    #[case::inside_inline_math("$a + x_1$")]
    #[case::inside_display_math("$$\nx_1 + y_2\n$$")]
    #[case::inside_paren_math(r"\(x_1\)")]
    #[case::inside_bracket_math(r"\[x_1\]")]
    #[case::after_backslash(r"\alpha_1")]
    #[case::snake_case("snake_case_name")]
    #[case::leading_underscore("_private")]
    #[case::inline_code("`x_1`")]
    #[case::fenced("```\nx_1\n```")]
    fn leaves_alone(#[case] input: &str) {
        assert_eq!(wrap_subscripts(input), input);
    }

    #[test]
    fn test_unclosed_dollar_does_not_protect() {
        assert_eq!(wrap_subscripts("costs $5, x_1"), "costs $5, $x_1$");
    }

    #[test]
    fn test_inline_math_stops_at_line_end() {
        assert_eq!(wrap_subscripts("$5\nx_1 $"), "$5\n$x_1$ $");
    }

    #[test]
    fn test_custom_delimiters() {
        let wrapper = SubscriptWrapper::new(Delimiters::new(r"\(", r"\)"));
        assert_eq!(wrapper.wrap("x_1"), r"\(x_1\)");
    }
}
