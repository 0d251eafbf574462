//! Individual transformation stages
//!
//! One stage per sanitizer component, each a `Runnable<String, String>`.

pub mod balance_fences;
pub mod decode_escapes;
pub mod display_math;
pub mod filter_control;
pub mod strip_metadata;
pub mod wrap_subscripts;

pub use balance_fences::BalanceFences;
pub use decode_escapes::DecodeEscapes;
pub use display_math::NormalizeDisplayMath;
pub use filter_control::FilterControlChars;
pub use strip_metadata::StripMetadata;
pub use wrap_subscripts::WrapSubscripts;
