//! Subscript wrapping stage

use crate::options::SanitizeOptions;
use crate::subscripts::SubscriptWrapper;
use crate::transforms::{Runnable, TransformError};

#[derive(Default)]
pub struct WrapSubscripts {
    wrapper: SubscriptWrapper,
}

impl WrapSubscripts {
    pub fn new(options: &SanitizeOptions) -> Self {
        WrapSubscripts {
            wrapper: SubscriptWrapper::new(options.inline_math.clone()),
        }
    }
}

impl Runnable<String, String> for WrapSubscripts {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.wrapper.wrap(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_subscripts_stage() {
        let result = WrapSubscripts::default().run("x_1".to_string()).unwrap();
        assert_eq!(result, "$x_1$");
    }
}
