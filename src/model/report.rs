//! The whole-presentation report aggregate.

use crate::model::EffectKind;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Effects found on one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideEffects {
    /// 1-based slide index.
    pub slide: usize,
    /// Effect kinds present on the slide (never empty: slides without
    /// effects simply have no entry in the effects list).
    pub kinds: BTreeSet<EffectKind>,
}

/// A slide whose part could not be analyzed.
///
/// Recorded explicitly so a reporting gap is distinguishable from a
/// slide with nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideFault {
    /// 1-based slide index.
    pub slide: usize,
    /// Archive path of the offending part.
    pub part: String,
    /// Human-readable parse failure.
    pub reason: String,
}

/// Analysis results for one presentation.
///
/// All collections use ordered containers, so serializing the same input
/// twice yields byte-identical output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Total slides per the presentation manifest.
    pub slide_count: usize,
    /// Hidden slide indices, in presentation order.
    pub hidden_slides: Vec<usize>,
    /// Slides carrying effects, in presentation order.
    pub effect_slides: Vec<SlideEffects>,
    /// Resolved font name to the slides referencing it.
    pub font_slides: BTreeMap<String, BTreeSet<usize>>,
    /// Resolved font names absent from the supplied catalog. Always a
    /// subset of `font_slides` keys.
    pub missing_fonts: BTreeSet<String>,
    /// Slides that could not be analyzed, in presentation order.
    pub unanalyzable_slides: Vec<SlideFault>,
    /// True when the supplied catalog contained no families at all, in
    /// which case "missing" means "nothing verified".
    pub catalog_empty: bool,
}

impl Report {
    /// Slides referencing fonts that are not installed.
    pub fn slides_with_missing_fonts(&self) -> BTreeSet<usize> {
        self.missing_fonts
            .iter()
            .filter_map(|f| self.font_slides.get(f))
            .flatten()
            .copied()
            .collect()
    }

    /// Number of distinct resolved fonts referenced anywhere.
    pub fn font_count(&self) -> usize {
        self.font_slides.len()
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// Output is byte-stable for identical inputs: all collections are
    /// ordered containers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slides_with_missing_fonts() {
        let mut report = Report {
            slide_count: 3,
            ..Default::default()
        };
        report
            .font_slides
            .insert("Arial".to_string(), BTreeSet::from([1, 2]));
        report
            .font_slides
            .insert("Wingdings".to_string(), BTreeSet::from([2, 3]));
        report.missing_fonts.insert("Wingdings".to_string());

        assert_eq!(report.slides_with_missing_fonts(), BTreeSet::from([2, 3]));
        assert_eq!(report.font_count(), 2);
    }
}
