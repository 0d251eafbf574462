//! Display-math normalization stage

use crate::math::DisplayMathNormalizer;
use crate::options::SanitizeOptions;
use crate::transforms::{Runnable, TransformError};

/// Rewrites `\[ ... \]` outside code into canonical block math.
#[derive(Default)]
pub struct NormalizeDisplayMath {
    normalizer: DisplayMathNormalizer,
}

impl NormalizeDisplayMath {
    pub fn new(options: &SanitizeOptions) -> Self {
        NormalizeDisplayMath {
            normalizer: DisplayMathNormalizer::new(options.block_math.clone()),
        }
    }
}

impl Runnable<String, String> for NormalizeDisplayMath {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.normalizer.normalize(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_math_stage() {
        let result = NormalizeDisplayMath::default()
            .run(r"see \[a\]".to_string())
            .unwrap();
        assert_eq!(result, "see \n$$\na\n$$\n");
    }
}
