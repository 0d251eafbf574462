//! Control-character filtering stage

use crate::control::strip_control_chars;
use crate::transforms::{Runnable, TransformError};

pub struct FilterControlChars;

impl FilterControlChars {
    pub fn new() -> Self {
        FilterControlChars
    }
}

impl Default for FilterControlChars {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for FilterControlChars {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(strip_control_chars(&input))
    }
}
