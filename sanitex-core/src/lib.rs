//! # sanitex
//!
//! Rewrites AI-generated or user-supplied lesson and flashcard text (Markdown
//! mixed with LaTeX math and code) into a canonical form that a Markdown+math
//! renderer can display safely.
//!
//! Components, leaf first:
//!
//! - [`escapes`]: decodes escaped line breaks, never `\t`.
//! - [`metadata`]: strips front matter and metadata footers.
//! - [`control`]: drops control characters other than newline and tab.
//! - [`math`]: the delimiter-aware lexer that rewrites `\[ ... \]` outside
//!   code into `$$` blocks.
//! - [`fences`]: closes a code fence left open at the end of the text.
//! - [`subscripts`]: wraps bare `x_1` tokens in inline math (flashcards).
//!
//! Lesson path: metadata → escapes → control, then (by the consumer)
//! display math and fences. Flashcard path: escapes → control → subscripts.
//!
//! Every function here is total: malformed input degrades to literal text or
//! an auto-closed fence, never to an error. There is no shared state, so
//! calls may run concurrently from any number of threads.
//!
//! The [`transforms`] module exposes each component as a composable pipeline
//! stage.

pub mod control;
pub mod escapes;
pub mod fences;
pub mod math;
pub mod metadata;
pub mod options;
pub mod sanitizer;
pub mod scan;
pub mod subscripts;
pub mod transforms;

pub use fences::ensure_closed_markdown_fences;
pub use math::normalize_display_math;
pub use metadata::MetadataStripper;
pub use options::{Delimiters, SanitizeOptions};
pub use sanitizer::Sanitizer;

use once_cell::sync::Lazy;

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(Sanitizer::default);

/// Metadata strip → escape decode → control filter.
///
/// Display math and fences are left for the caller; see
/// [`prepare_lesson_for_render`] for the full chain.
pub fn sanitize_lesson_body(raw: &str) -> String {
    DEFAULT_SANITIZER.lesson_body(raw)
}

/// [`sanitize_lesson_body`] with a caller-supplied metadata stripper.
pub fn sanitize_lesson_body_with<S>(raw: &str, stripper: &S) -> String
where
    S: MetadataStripper + ?Sized,
{
    DEFAULT_SANITIZER.lesson_body_with(raw, stripper)
}

/// Escape decode → control filter → subscript auto-wrapping.
pub fn sanitize_flashcard_content(raw: &str) -> String {
    DEFAULT_SANITIZER.flashcard(raw)
}

/// Lesson body, then display-math normalization, then fence balancing.
pub fn prepare_lesson_for_render(raw: &str) -> String {
    DEFAULT_SANITIZER.lesson_for_render(raw)
}
