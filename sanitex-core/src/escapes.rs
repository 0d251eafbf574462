//! Escape decoder
//!
//! AI output frequently arrives with its line breaks still written as the
//! two-character sequence `\n` (or `\r\n`), sometimes escaped twice. The
//! decoder turns those into real line breaks, one escaping layer per pass,
//! until the text stops changing or the pass cap is reached.
//!
//! `\t` is never decoded: `\tan`, `\theta`, `\times` and friends are LaTeX
//! commands, and a tab in their place breaks the math. The same hazard exists
//! for `\nabla`, `\neq` or `\nu`, but the words after `\n` also collide with
//! prose (`\ni`, `\not`), so that guard is opt-in through
//! [`EscapeDecoder::preserve_latex_commands`].

use crate::options::DEFAULT_MAX_ESCAPE_PASSES;

/// LaTeX commands that begin with `n` and would otherwise read as `\n`.
const N_COMMANDS: &[&str] = &[
    "nabla", "natural", "ncong", "ne", "nearrow", "neg", "neq", "newline", "nexists", "ngeq",
    "ngtr", "ni", "nleftarrow", "nleq", "nless", "nmid", "nobreak", "noindent", "nolimits",
    "nonumber", "normalsize", "not", "notin", "nparallel", "nprec", "nrightarrow", "nsim",
    "nsubseteq", "nsucc", "nsupseteq", "ntriangleleft", "ntriangleright", "nu", "nvdash",
    "nwarrow",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeDecoder {
    pub max_passes: usize,
    pub preserve_latex_commands: bool,
}

impl Default for EscapeDecoder {
    fn default() -> Self {
        EscapeDecoder {
            max_passes: DEFAULT_MAX_ESCAPE_PASSES,
            preserve_latex_commands: false,
        }
    }
}

impl EscapeDecoder {
    pub fn new(max_passes: usize, preserve_latex_commands: bool) -> Self {
        EscapeDecoder {
            max_passes,
            preserve_latex_commands,
        }
    }

    /// Decode escaped line breaks until stable, giving up silently after
    /// `max_passes` passes.
    pub fn decode(&self, input: &str) -> String {
        let mut current = input.to_string();
        for pass in 0..self.max_passes {
            let next = self.decode_pass(&current);
            if next == current {
                tracing::trace!(passes = pass, "escape decoding reached a fixed point");
                return current;
            }
            current = next;
        }
        tracing::trace!(
            max_passes = self.max_passes,
            "escape decoding stopped at the pass cap"
        );
        current
    }

    /// Peel one escaping layer off every newline escape in `input`.
    pub fn decode_pass(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len());
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '\\' {
                out.push(chars[i]);
                i += 1;
                continue;
            }

            let run = crate::scan::run_length(&chars, i, '\\');
            let after = i + run;

            match self.match_newline_escape(&chars, after, run) {
                Some((consumed, _)) if run == 1 => {
                    out.push('\n');
                    i = after + consumed;
                }
                Some((consumed, crlf)) if run == 2 => {
                    out.push_str(if crlf { "\\r\\n" } else { "\\n" });
                    i = after + consumed;
                }
                _ => {
                    out.extend(&chars[i..after]);
                    i = after;
                }
            }
        }

        out
    }

    /// Recognise `n` or `r` + `run` backslashes + `n` at `at`. Returns the
    /// number of characters consumed after the leading backslash run and
    /// whether the sequence was a CRLF escape.
    fn match_newline_escape(&self, chars: &[char], at: usize, run: usize) -> Option<(usize, bool)> {
        match chars.get(at) {
            Some('n') => {
                if self.preserve_latex_commands && starts_latex_command(chars, at) {
                    return None;
                }
                Some((1, false))
            }
            Some('r') => {
                let inner = crate::scan::run_length(chars, at + 1, '\\');
                let n_at = at + 1 + inner;
                if inner == run && chars.get(n_at) == Some(&'n') {
                    if self.preserve_latex_commands && starts_latex_command(chars, n_at) {
                        return None;
                    }
                    Some((1 + inner + 1, true))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// True when the ASCII-letter word starting at `at` is a known command.
fn starts_latex_command(chars: &[char], at: usize) -> bool {
    let word: String = chars[at..]
        .iter()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    N_COMMANDS.binary_search(&word.as_str()).is_ok()
}

/// Decode escaped line breaks with the default pass cap.
pub fn decode_escaped_newlines(input: &str) -> String {
    EscapeDecoder::default().decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_command_table_is_sorted() {
        let mut sorted = N_COMMANDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, N_COMMANDS);
    }

    #[rstest]
    #[case(r"line1\nline2", "line1\nline2")]
    #[case(r"line1\r\nline2", "line1\nline2")]
    #[case(r"a\\nb", "a\nb")]
    #[case(r"a\\r\\nb", "a\nb")]
    #[case(r"\tan x + \theta", r"\tan x + \theta")]
    #[case(r"yes\ni agree", "yes\ni agree")]
    #[case(r"x \neq y", "x \neq y")]
    #[case(r"end\nnext", "end\nnext")]
    #[case(r"\\\n", r"\\\n")]
    #[case("", "")]
    fn decodes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_escaped_newlines(input), expected);
    }

    #[rstest]
    #[case(r"x \neq y", r"x \neq y")]
    #[case(r"\nabla f", r"\nabla f")]
    #[case(r"a\r\nu", r"a\r\nu")]
    #[case(r"end\nnext", "end\nnext")]
    fn latex_guard_keeps_commands(#[case] input: &str, #[case] expected: &str) {
        let decoder = EscapeDecoder::new(DEFAULT_MAX_ESCAPE_PASSES, true);
        assert_eq!(decoder.decode(input), expected);
    }

    #[test]
    fn test_guard_is_off_by_default() {
        assert!(!EscapeDecoder::default().preserve_latex_commands);
        assert_eq!(decode_escaped_newlines(r"\nu = 2"), "\nu = 2");
    }

    #[test]
    fn test_single_pass_peels_one_layer() {
        let decoder = EscapeDecoder::default();
        assert_eq!(decoder.decode_pass(r"a\\nb"), r"a\nb");
        assert_eq!(decoder.decode_pass(r"a\nb"), "a\nb");
    }

    #[test]
    fn test_pass_cap_leaves_residue() {
        let decoder = EscapeDecoder::new(1, true);
        assert_eq!(decoder.decode(r"a\\nb"), r"a\nb");

        let decoder = EscapeDecoder::new(0, true);
        assert_eq!(decoder.decode(r"a\nb"), r"a\nb");
    }

    #[test]
    fn test_real_newlines_untouched() {
        assert_eq!(decode_escaped_newlines("a\nb\r\nc"), "a\nb\r\nc");
    }
}
