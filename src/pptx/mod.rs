//! PPTX (PresentationML) analysis.
//!
//! Walks a presentation container in manifest order and extracts one
//! record per slide: hidden flag, effect presence, and font references.

mod analyzer;
mod facts;
mod theme;

pub use analyzer::PptxAnalyzer;
pub use facts::{extract_font_refs, extract_slide_facts};
pub use theme::parse_theme;
