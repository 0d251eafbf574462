//! Scanner primitives shared by the lexer, the fence balancer and the
//! subscript wrapper.
//!
//! Everything here works on a slice of `char`s so that positions are
//! scalar-value indices, never byte offsets.

/// Character that can open a code fence or an inline code span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Backtick,
    Tilde,
}

impl Marker {
    pub fn from_char(c: char) -> Option<Marker> {
        match c {
            '`' => Some(Marker::Backtick),
            '~' => Some(Marker::Tilde),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Marker::Backtick => '`',
            Marker::Tilde => '~',
        }
    }
}

/// Minimum run length for a marker run to count as a fence.
pub const MIN_FENCE_LEN: usize = 3;

/// Lexical context at a scan position.
///
/// `InlineCode` is only entered from `Plain` and never while `Fenced`, and
/// `Fenced` is only entered from `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Plain,
    InlineCode { marker: Marker, len: usize },
    Fenced { marker: Marker, len: usize },
}

impl LexState {
    pub fn is_plain(&self) -> bool {
        matches!(self, LexState::Plain)
    }

    pub fn is_fenced(&self) -> bool {
        matches!(self, LexState::Fenced { .. })
    }

    pub fn is_inline_code(&self) -> bool {
        matches!(self, LexState::InlineCode { .. })
    }

    /// Apply a marker run of `len` copies of `marker` and return the new state.
    pub fn after_run(self, marker: Marker, len: usize) -> LexState {
        if len >= MIN_FENCE_LEN && !self.is_inline_code() {
            return match self {
                LexState::Plain => LexState::Fenced { marker, len },
                LexState::Fenced { marker: open, .. } if open == marker => LexState::Plain,
                other => other,
            };
        }
        if self.is_fenced() {
            return self;
        }
        match self {
            LexState::Plain => LexState::InlineCode { marker, len },
            LexState::InlineCode {
                marker: open,
                len: open_len,
            } if open == marker && open_len == len => LexState::Plain,
            other => other,
        }
    }
}

/// Length of the run of `c` starting at `start`.
pub fn run_length(chars: &[char], start: usize, c: char) -> usize {
    chars
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|&&x| x == c).count())
}

/// Number of consecutive backslashes immediately before `index`.
pub fn backslashes_before(chars: &[char], index: usize) -> usize {
    chars[..index.min(chars.len())]
        .iter()
        .rev()
        .take_while(|&&c| c == '\\')
        .count()
}

/// True when the character at `index` is preceded by an odd number of
/// backslashes, i.e. the backslash directly before it is live.
pub fn is_escaped(chars: &[char], index: usize) -> bool {
    backslashes_before(chars, index) % 2 == 1
}
