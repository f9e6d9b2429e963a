//! Report aggregation: fold per-slide records into the final report.

use crate::fonts::FontCatalog;
use crate::model::{Presentation, Report, SlideEffects, SlideFault};
use std::collections::{BTreeMap, BTreeSet};

/// Fold the full slide sequence into a [`Report`].
///
/// Pure function over already-validated records: no failure mode of its
/// own. Hidden and effect lists preserve presentation order; the
/// font-to-slides mapping deduplicates by resolved name; the missing set
/// is the set difference of resolved names minus catalog entries.
pub fn aggregate(
    presentation: &Presentation,
    faults: Vec<SlideFault>,
    catalog: &FontCatalog,
) -> Report {
    let mut hidden_slides = Vec::new();
    let mut effect_slides = Vec::new();
    let mut font_slides: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();

    for slide in &presentation.slides {
        if slide.hidden {
            hidden_slides.push(slide.index);
        }
        if !slide.effects.is_empty() {
            effect_slides.push(SlideEffects {
                slide: slide.index,
                kinds: slide.effects.clone(),
            });
        }
        for usage in &slide.fonts {
            font_slides
                .entry(usage.resolved.clone())
                .or_default()
                .insert(usage.slide);
        }
    }

    let missing_fonts = font_slides
        .keys()
        .filter(|name| !catalog.contains(name))
        .cloned()
        .collect();

    Report {
        slide_count: presentation.slide_count,
        hidden_slides,
        effect_slides,
        font_slides,
        missing_fonts,
        unanalyzable_slides: faults,
        catalog_empty: catalog.is_empty(),
    }
}
