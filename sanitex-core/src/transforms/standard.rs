//! Standard transform definitions
//!
//! Builders for every named pipeline, plus default-option instances of the
//! common ones as `once_cell::sync::Lazy` statics.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::options::SanitizeOptions;
use crate::transforms::stages::{
    BalanceFences, DecodeEscapes, FilterControlChars, NormalizeDisplayMath, StripMetadata,
    WrapSubscripts,
};
use crate::transforms::Transform;

/// Every pipeline in this module maps text to text.
pub type TextTransform = Transform<String, String>;

/// Metadata strip → escape decode → control filter.
pub fn lesson_body(options: &SanitizeOptions) -> TextTransform {
    Transform::from_fn(Ok)
        .then(StripMetadata::new(options))
        .then(DecodeEscapes::new(options))
        .then(FilterControlChars::new())
}

/// Escape decode → control filter → subscript wrapping.
pub fn flashcard(options: &SanitizeOptions) -> TextTransform {
    Transform::from_fn(Ok)
        .then(DecodeEscapes::new(options))
        .then(FilterControlChars::new())
        .then(WrapSubscripts::new(options))
}

/// The lesson body followed by display-math normalization and fence
/// balancing.
pub fn lesson_render(options: &SanitizeOptions) -> TextTransform {
    lesson_body(options)
        .then(NormalizeDisplayMath::new(options))
        .then(BalanceFences::new())
}

/// Display-math normalization alone.
pub fn display_math(options: &SanitizeOptions) -> TextTransform {
    Transform::from_fn(Ok).then(NormalizeDisplayMath::new(options))
}

/// Fence balancing alone.
pub fn fences(_options: &SanitizeOptions) -> TextTransform {
    Transform::from_fn(Ok).then(BalanceFences::new())
}

pub static LESSON_BODY: Lazy<TextTransform> =
    Lazy::new(|| lesson_body(&SanitizeOptions::default()));

pub static FLASHCARD: Lazy<TextTransform> = Lazy::new(|| flashcard(&SanitizeOptions::default()));

pub static LESSON_RENDER: Lazy<TextTransform> =
    Lazy::new(|| lesson_render(&SanitizeOptions::default()));

/// The named pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    Lesson,
    Flashcard,
    LessonRender,
    DisplayMath,
    Fences,
}

impl PipelineKind {
    pub fn all() -> &'static [PipelineKind] {
        &[
            PipelineKind::Lesson,
            PipelineKind::Flashcard,
            PipelineKind::LessonRender,
            PipelineKind::DisplayMath,
            PipelineKind::Fences,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PipelineKind::Lesson => "lesson",
            PipelineKind::Flashcard => "flashcard",
            PipelineKind::LessonRender => "lesson-render",
            PipelineKind::DisplayMath => "display-math",
            PipelineKind::Fences => "fences",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PipelineKind::Lesson => "Strip metadata, decode escapes, drop control characters",
            PipelineKind::Flashcard => {
                "Decode escapes, drop control characters, wrap bare subscripts in math"
            }
            PipelineKind::LessonRender => {
                "Lesson body plus display-math normalization and fence balancing"
            }
            PipelineKind::DisplayMath => "Rewrite \\[ ... \\] outside code into block math",
            PipelineKind::Fences => "Close a code fence left open at the end of the text",
        }
    }

    pub fn build(self, options: &SanitizeOptions) -> TextTransform {
        match self {
            PipelineKind::Lesson => lesson_body(options),
            PipelineKind::Flashcard => flashcard(options),
            PipelineKind::LessonRender => lesson_render(options),
            PipelineKind::DisplayMath => display_math(options),
            PipelineKind::Fences => fences(options),
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a pipeline name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPipeline(pub String);

impl fmt::Display for UnknownPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pipeline '{}'", self.0)
    }
}

impl std::error::Error for UnknownPipeline {}

impl FromStr for PipelineKind {
    type Err = UnknownPipeline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownPipeline(s.to_string()))
    }
}
