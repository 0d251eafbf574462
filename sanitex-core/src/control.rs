//! Control-character filter

/// True for C0 controls and DEL, except newline and tab.
pub fn is_stripped_control(c: char) -> bool {
    (c <= '\u{1F}' || c == '\u{7F}') && c != '\n' && c != '\t'
}

/// Remove control characters the renderer cannot cope with.
pub fn strip_control_chars(input: &str) -> String {
    let mut out = input.to_string();
    out.retain(|c| !is_stripped_control(c));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_newline_and_tab() {
        assert_eq!(strip_control_chars("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_removes_c0_and_del() {
        assert_eq!(strip_control_chars("a\u{0}b\u{7}c\u{1B}[0md\u{7F}"), "abc[0md");
    }

    #[test]
    fn test_carriage_return_is_removed() {
        assert_eq!(strip_control_chars("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_c1_and_unicode_untouched() {
        assert_eq!(strip_control_chars("é\u{85}∑"), "é\u{85}∑");
    }
}
