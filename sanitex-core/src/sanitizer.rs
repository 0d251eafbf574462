//! The two content paths, lesson and flashcard, wired from their
//! components according to a [`SanitizeOptions`].

use tracing::instrument;

use crate::control::strip_control_chars;
use crate::escapes::EscapeDecoder;
use crate::fences::ensure_closed_markdown_fences;
use crate::math::DisplayMathNormalizer;
use crate::metadata::{FrontMatterStripper, MetadataStripper};
use crate::options::SanitizeOptions;
use crate::subscripts::SubscriptWrapper;

pub struct Sanitizer {
    decoder: EscapeDecoder,
    normalizer: DisplayMathNormalizer,
    wrapper: SubscriptWrapper,
    stripper: Box<dyn MetadataStripper + Send + Sync>,
}

impl Sanitizer {
    pub fn new(options: &SanitizeOptions) -> Self {
        Sanitizer {
            decoder: EscapeDecoder::new(options.max_escape_passes, options.preserve_latex_commands),
            normalizer: DisplayMathNormalizer::new(options.block_math.clone()),
            wrapper: SubscriptWrapper::new(options.inline_math.clone()),
            stripper: Box::new(FrontMatterStripper {
                header: options.strip_front_matter,
                footer: options.strip_footer,
            }),
        }
    }

    /// Replace the metadata stripper.
    pub fn with_stripper<S>(mut self, stripper: S) -> Self
    where
        S: MetadataStripper + Send + Sync + 'static,
    {
        self.stripper = Box::new(stripper);
        self
    }

    /// Metadata strip, escape decode, control filter.
    #[instrument(level = "trace", skip_all, fields(len = raw.len()))]
    pub fn lesson_body(&self, raw: &str) -> String {
        self.lesson_body_with(raw, self.stripper.as_ref())
    }

    /// [`Sanitizer::lesson_body`] with `stripper` in place of the configured one.
    pub fn lesson_body_with<S>(&self, raw: &str, stripper: &S) -> String
    where
        S: MetadataStripper + ?Sized,
    {
        let body = stripper.strip(raw);
        let decoded = self.decoder.decode(&body);
        strip_control_chars(&decoded)
    }

    /// Escape decode, control filter, subscript wrapping.
    #[instrument(level = "trace", skip_all, fields(len = raw.len()))]
    pub fn flashcard(&self, raw: &str) -> String {
        let decoded = self.decoder.decode(raw);
        let filtered = strip_control_chars(&decoded);
        self.wrapper.wrap(&filtered)
    }

    /// The lesson body plus display-math normalization and fence balancing,
    /// ready for a Markdown+math renderer.
    #[instrument(level = "trace", skip_all, fields(len = raw.len()))]
    pub fn lesson_for_render(&self, raw: &str) -> String {
        let body = self.lesson_body(raw);
        let normalized = self.normalizer.normalize(&body);
        ensure_closed_markdown_fences(&normalized)
    }

}

impl Default for Sanitizer {
    fn default() -> Self {
        Sanitizer::new(&SanitizeOptions::default())
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("decoder", &self.decoder)
            .field("normalizer", &self.normalizer)
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}
