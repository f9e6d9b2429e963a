//! # slideaudit
//!
//! Structural and typographic analysis of PowerPoint (.pptx)
//! presentations: hidden slides, animation and transition effects, and
//! font usage cross-checked against the fonts installed on the host.
//!
//! The analyzer opens the OOXML container, walks the part relationships
//! to visit slides in presentation order, extracts per-slide facts from
//! the PresentationML markup, resolves theme placeholder fonts to
//! concrete family names, and folds everything into a [`Report`].
//!
//! Font availability is checked against a [`FontCatalog`] the caller
//! supplies; the library itself never enumerates OS fonts, which keeps
//! analysis deterministic and testable with synthetic catalogs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slideaudit::{analyze_file, FontCatalog};
//!
//! let catalog = FontCatalog::from_names(["Arial", "Calibri"]);
//! let report = analyze_file("deck.pptx", &catalog)?;
//!
//! println!("{} slides, {} hidden", report.slide_count, report.hidden_slides.len());
//! for font in &report.missing_fonts {
//!     println!("missing: {} (slides {:?})", font, report.font_slides[font]);
//! }
//! # Ok::<(), slideaudit::Error>(())
//! ```
//!
//! ## Staged API
//!
//! ```no_run
//! use slideaudit::{PptxAnalyzer, FontCatalog};
//!
//! let analyzer = PptxAnalyzer::open("deck.pptx")?;
//! println!("manifest lists {} slides", analyzer.slide_count());
//! let report = analyzer.analyze(&FontCatalog::empty())?;
//! assert!(report.catalog_empty);
//! # Ok::<(), slideaudit::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod fonts;
pub mod model;
pub mod pptx;
pub mod report;
pub mod xml;

// Re-exports
pub use container::{PptxContainer, Relationship, Relationships};
pub use error::{Error, Result};
pub use fonts::FontCatalog;
pub use model::{
    EffectKind, FontOrigin, FontUsage, Presentation, Report, Slide, SlideEffects, SlideFault,
    Theme,
};
pub use pptx::PptxAnalyzer;
pub use xml::{XmlNode, XmlTree};

use std::path::Path;

/// Analyze a presentation file against an installed-font catalog.
pub fn analyze_file(path: impl AsRef<Path>, catalog: &FontCatalog) -> Result<Report> {
    PptxAnalyzer::open(path)?.analyze(catalog)
}

/// Analyze a presentation from container bytes.
pub fn analyze_bytes(data: &[u8], catalog: &FontCatalog) -> Result<Report> {
    PptxAnalyzer::from_bytes(data.to_vec())?.analyze(catalog)
}
