//! Data model for presentation analysis.
//!
//! These types are the analyzer's output vocabulary: per-slide records
//! produced by fact extraction, and the whole-presentation [`Report`]
//! aggregate handed to front ends.

mod report;
mod slide;

pub use report::*;
pub use slide::*;
