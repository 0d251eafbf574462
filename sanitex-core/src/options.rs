//! Knobs shared by every sanitizer component.
//!
//! `SanitizeOptions::default()` mirrors the embedded defaults of the
//! `sanitex-config` crate, so library users never need the config layer.

/// Default cap on escape-decoding passes.
pub const DEFAULT_MAX_ESCAPE_PASSES: usize = 5;

/// Open/close pair used when emitting math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Delimiters {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Options for the whole sanitization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Upper bound on escape-decoding passes.
    pub max_escape_passes: usize,
    /// Leave `\n`-initial LaTeX commands (`\nabla`, `\neq`, ...) undecoded.
    pub preserve_latex_commands: bool,
    /// Markers written around normalized display math.
    pub block_math: Delimiters,
    /// Markers written around auto-wrapped subscripts.
    pub inline_math: Delimiters,
    pub strip_front_matter: bool,
    pub strip_footer: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        SanitizeOptions {
            max_escape_passes: DEFAULT_MAX_ESCAPE_PASSES,
            preserve_latex_commands: false,
            block_math: Delimiters::new("$$", "$$"),
            inline_math: Delimiters::new("$", "$"),
            strip_front_matter: true,
            strip_footer: true,
        }
    }
}
