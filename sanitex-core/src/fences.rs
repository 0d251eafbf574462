//! Fence balancer
//!
//! Truncated AI output regularly stops in the middle of a code block, and
//! an unclosed fence swallows the rest of the rendered page. The balancer
//! walks the document line by line, tracks the one active fence and, if the
//! document ends inside it, appends a matching closing line.

use crate::scan::{Marker, MIN_FENCE_LEN};

/// An open code fence: its marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub marker: Marker,
    pub len: usize,
}

impl Fence {
    /// The line that closes this fence.
    pub fn closing_line(&self) -> String {
        std::iter::repeat(self.marker.as_char())
            .take(self.len)
            .collect()
    }
}

/// A physical line that looks like a fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceLine<'a> {
    pub fence: Fence,
    /// Whatever follows the marker run, untrimmed.
    pub info: &'a str,
}

impl<'a> FenceLine<'a> {
    /// Classify `line`. Leading spaces and tabs are ignored; runs shorter
    /// than three are ordinary text.
    pub fn parse(line: &'a str) -> Option<FenceLine<'a>> {
        let body = line.trim_start_matches([' ', '\t']);
        let first = body.chars().next()?;
        let marker = Marker::from_char(first)?;
        let len = body.chars().take_while(|&c| c == first).count();
        if len < MIN_FENCE_LEN {
            return None;
        }
        // Marker characters are ASCII, so `len` is also a byte offset.
        Some(FenceLine {
            fence: Fence { marker, len },
            info: &body[len..],
        })
    }

    /// Backtick info strings may not contain backticks.
    pub fn can_open(&self) -> bool {
        self.fence.marker != Marker::Backtick || !self.info.contains('`')
    }

    /// True when `self` closes `open`: same marker, at least as long, and
    /// nothing but whitespace after the run.
    pub fn closes(&self, open: &Fence) -> bool {
        self.fence.marker == open.marker && self.fence.len >= open.len && self.info.trim().is_empty()
    }
}

/// The fence still open at the end of `text`, if any.
pub fn unclosed_fence(text: &str) -> Option<Fence> {
    let mut active: Option<Fence> = None;

    for line in text.lines() {
        let Some(fence_line) = FenceLine::parse(line) else {
            continue;
        };
        active = match active {
            None if fence_line.can_open() => Some(fence_line.fence),
            Some(open) if fence_line.closes(&open) => None,
            other => other,
        };
    }

    active
}

/// Append a closing fence if `input` ends inside a fenced block.
pub fn ensure_closed_markdown_fences(input: &str) -> String {
    let Some(open) = unclosed_fence(input) else {
        return input.to_string();
    };

    tracing::debug!(marker = ?open.marker, len = open.len, "closing unterminated code fence");
    let mut out = String::with_capacity(input.len() + open.len + 1);
    out.push_str(input);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&open.closing_line());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_appends_missing_close() {
        let input = "```js\nconsole.log(1);";
        assert_eq!(
            ensure_closed_markdown_fences(input),
            "```js\nconsole.log(1);\n```"
        );
    }

    #[test]
    fn test_close_matches_open_length_and_marker() {
        assert_eq!(ensure_closed_markdown_fences("~~~~\nx\n"), "~~~~\nx\n~~~~");
    }

    #[rstest]
    #[case::balanced("```\nx\n```\n")]
    #[case::longer_close("```\nx\n`````")]
    #[case::indented("  ```rust\n  let x = 1;\n  ```")]
    #[case::no_fences("plain text\n")]
    #[case::short_runs("``x``\n~~strike~~")]
    #[case::empty("")]
    fn leaves_balanced(#[case] input: &str) {
        assert_eq!(ensure_closed_markdown_fences(input), input);
    }

    #[test]
    fn test_shorter_run_does_not_close() {
        assert_eq!(ensure_closed_markdown_fences("````\n```\n"), "````\n```\n````");
    }

    #[test]
    fn test_other_marker_does_not_close() {
        assert_eq!(ensure_closed_markdown_fences("```\n~~~\n"), "```\n~~~\n```");
    }

    #[test]
    fn test_info_string_line_does_not_close() {
        assert_eq!(
            ensure_closed_markdown_fences("```\n```python\n"),
            "```\n```python\n```"
        );
    }

    #[test]
    fn test_backtick_info_with_backtick_does_not_open() {
        assert_eq!(unclosed_fence("``` a ` b\ntext"), None);
    }

    #[test]
    fn test_second_call_is_noop() {
        let once = ensure_closed_markdown_fences("```\nfn main() {");
        assert_eq!(ensure_closed_markdown_fences(&once), once);
    }

    #[test]
    fn test_fence_line_parse() {
        let line = FenceLine::parse("\t~~~ toml ").unwrap();
        assert_eq!(
            line.fence,
            Fence {
                marker: Marker::Tilde,
                len: 3
            }
        );
        assert_eq!(line.info, " toml ");
        assert!(FenceLine::parse("``").is_none());
        assert!(FenceLine::parse("a```").is_none());
    }
}
