//! Font catalog matching and theme placeholder resolution.
//!
//! The catalog is an injected capability: the host enumerates installed
//! family names however it likes (OS API, fixture file, hard-coded set)
//! and hands the result in as plain strings. The core never queries the
//! OS, so classification stays deterministic and testable.

use crate::model::{FontOrigin, Theme};
use serde::Serialize;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Set of installed font family names, matched case-insensitively.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FontCatalog {
    families: BTreeSet<String>,
}

impl FontCatalog {
    /// Build a catalog from family names.
    ///
    /// Names are NFC-normalized, trimmed, and lowercased once here so
    /// membership tests are a plain set lookup.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let families = names
            .into_iter()
            .map(|n| normalize_family(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        Self { families }
    }

    /// An empty catalog: every font classifies as missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-insensitive family-name membership. Exact family equality
    /// only: no fuzzy matching, no style or weight awareness.
    pub fn contains(&self, family: &str) -> bool {
        self.families.contains(&normalize_family(family))
    }

    /// Number of distinct families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// True when no families were supplied. Callers must surface this:
    /// with nothing installed, "missing" means "nothing verified".
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Canonical comparison form of a family name.
fn normalize_family(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

/// True for font markers that never name a real family.
///
/// `@`-prefixed names are vertical-layout fallback variants of another
/// referenced family and are skipped rather than reported.
pub fn is_internal_marker(raw: &str) -> bool {
    raw.is_empty() || raw.starts_with('@')
}

/// Substitute a theme placeholder token with the concrete family name.
///
/// Returns the resolved name plus the theme origin when `raw` was a
/// placeholder, or `None` when it already names a concrete family. A
/// token whose scheme slot is absent from the theme resolves to itself,
/// preserving the raw form for diagnostics.
pub fn resolve_placeholder(raw: &str, theme: &Theme) -> Option<(String, FontOrigin)> {
    let (family, origin) = match raw {
        "+mj-lt" | "+major" => (&theme.major_latin, FontOrigin::ThemeMajor),
        "+mj-ea" => (&theme.major_east_asian, FontOrigin::ThemeMajor),
        "+mj-cs" => (&theme.major_complex_script, FontOrigin::ThemeMajor),
        "+mn-lt" | "+minor" | "+body" => (&theme.minor_latin, FontOrigin::ThemeMinor),
        "+mn-ea" => (&theme.minor_east_asian, FontOrigin::ThemeMinor),
        "+mn-cs" => (&theme.minor_complex_script, FontOrigin::ThemeMinor),
        _ => return None,
    };
    Some((family.clone().unwrap_or_else(|| raw.to_string()), origin))
}
