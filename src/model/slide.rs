//! Per-slide records and theme data.

use serde::Serialize;
use std::collections::BTreeSet;

/// Kind of effect attached to a slide.
///
/// A closed set: the timing/transition markup exposes a bounded family of
/// node shapes, and only presence is reported, never parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// At least one animation behavior node in the slide's timing tree.
    Animation,
    /// A slide transition that actually performs an effect.
    Transition,
}

/// Where a font reference was found in slide markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontOrigin {
    /// Run-level property (`rPr` > `latin`/`ea`/`cs`).
    DirectRun,
    /// Paragraph or run default (`defRPr`, `endParaRPr`, list styles).
    ParagraphDefault,
    /// Theme placeholder resolved against the major font scheme.
    ThemeMajor,
    /// Theme placeholder resolved against the minor font scheme.
    ThemeMinor,
}

/// One observed font reference: (font name, slide) with provenance.
///
/// Uniqueness is not enforced here; the aggregator deduplicates by
/// resolved name when building the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontUsage {
    /// Font name exactly as written in the markup (may be a theme
    /// placeholder token such as `+mn-lt`). Kept for diagnostics.
    pub raw: String,
    /// Concrete family name after theme-placeholder substitution.
    pub resolved: String,
    /// Markup context the reference was found in.
    pub origin: FontOrigin,
    /// 1-based slide index in presentation order.
    pub slide: usize,
}

/// Facts extracted from one slide.
#[derive(Debug, Clone, Serialize)]
pub struct Slide {
    /// 1-based index in presentation order (manifest order, not archive
    /// entry order).
    pub index: usize,
    /// True when the slide carries `show="0"`/`show="false"`.
    pub hidden: bool,
    /// Effects present on this slide. Empty set means "no effects";
    /// every analyzed slide always has a full record.
    pub effects: BTreeSet<EffectKind>,
    /// Every font reference observed in the slide body.
    pub fonts: Vec<FontUsage>,
}

impl Slide {
    /// A slide record with no facts yet.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            hidden: false,
            effects: BTreeSet::new(),
            fonts: Vec::new(),
        }
    }
}

/// Default font families from the presentation's theme part.
///
/// Missing scheme entries stay `None`; placeholder tokens that cannot be
/// resolved fall back to their raw form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Major (heading) scheme latin family.
    pub major_latin: Option<String>,
    /// Minor (body) scheme latin family.
    pub minor_latin: Option<String>,
    /// Major scheme east asian family.
    pub major_east_asian: Option<String>,
    /// Minor scheme east asian family.
    pub minor_east_asian: Option<String>,
    /// Major scheme complex script family.
    pub major_complex_script: Option<String>,
    /// Minor scheme complex script family.
    pub minor_complex_script: Option<String>,
}

/// A fully analyzed presentation: ordered slides plus resolved theme.
///
/// Constructed once per run and immutable afterwards; the report
/// aggregator folds it into the final [`crate::Report`].
#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    /// Slides in manifest order. Slides whose parts failed to parse are
    /// absent here and recorded as faults instead.
    pub slides: Vec<Slide>,
    /// Resolved theme font scheme.
    pub theme: Theme,
    /// Total slide count per the manifest, including unanalyzable ones.
    pub slide_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_has_empty_effect_set() {
        let slide = Slide::new(3);
        assert_eq!(slide.index, 3);
        assert!(!slide.hidden);
        assert!(slide.effects.is_empty());
        assert!(slide.fonts.is_empty());
    }

    #[test]
    fn test_effect_kind_ordering_is_stable() {
        let mut set = BTreeSet::new();
        set.insert(EffectKind::Transition);
        set.insert(EffectKind::Animation);
        let kinds: Vec<_> = set.into_iter().collect();
        assert_eq!(kinds, vec![EffectKind::Animation, EffectKind::Transition]);
    }
}
