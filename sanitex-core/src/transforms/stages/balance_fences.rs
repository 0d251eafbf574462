//! Fence balancing stage

use crate::fences::ensure_closed_markdown_fences;
use crate::transforms::{Runnable, TransformError};

/// Appends a closing fence when the text ends inside a code block.
pub struct BalanceFences;

impl BalanceFences {
    pub fn new() -> Self {
        BalanceFences
    }
}

impl Default for BalanceFences {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for BalanceFences {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(ensure_closed_markdown_fences(&input))
    }
}
