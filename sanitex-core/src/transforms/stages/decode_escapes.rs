//! Escape decoding stage

use crate::escapes::EscapeDecoder;
use crate::options::SanitizeOptions;
use crate::transforms::{Runnable, TransformError};

/// Turns escaped `\n` / `\r\n` sequences into line breaks.
///
/// # Input
/// - `String` - raw text, possibly with literal escape sequences
///
/// # Output
/// - `String` - the same text with escaped line breaks decoded
#[derive(Default)]
pub struct DecodeEscapes {
    decoder: EscapeDecoder,
}

impl DecodeEscapes {
    pub fn new(options: &SanitizeOptions) -> Self {
        DecodeEscapes {
            decoder: EscapeDecoder::new(options.max_escape_passes, options.preserve_latex_commands),
        }
    }
}

impl Runnable<String, String> for DecodeEscapes {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.decoder.decode(&input))
    }
}
