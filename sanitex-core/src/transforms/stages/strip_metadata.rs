//! Metadata stripping stage

use crate::metadata::{FrontMatterStripper, MetadataStripper};
use crate::options::SanitizeOptions;
use crate::transforms::{Runnable, TransformError};

/// Removes front matter and metadata footers, or whatever the injected
/// [`MetadataStripper`] considers metadata.
pub struct StripMetadata {
    stripper: Box<dyn MetadataStripper + Send + Sync>,
}

impl StripMetadata {
    pub fn new(options: &SanitizeOptions) -> Self {
        StripMetadata::with(FrontMatterStripper {
            header: options.strip_front_matter,
            footer: options.strip_footer,
        })
    }

    pub fn with<S>(stripper: S) -> Self
    where
        S: MetadataStripper + Send + Sync + 'static,
    {
        StripMetadata {
            stripper: Box::new(stripper),
        }
    }
}

impl Default for StripMetadata {
    fn default() -> Self {
        StripMetadata::with(FrontMatterStripper::default())
    }
}

impl Runnable<String, String> for StripMetadata {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.stripper.strip(&input))
    }
}
