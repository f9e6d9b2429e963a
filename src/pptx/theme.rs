//! Theme part parsing: the font scheme referenced by placeholder tokens.

use crate::model::Theme;
use crate::xml::{XmlNode, XmlTree};

/// Extract the major/minor font scheme from a parsed theme part.
///
/// Absent scheme slots (common for `ea`/`cs` in latin-only themes, where
/// the typeface attribute is an empty string) stay `None`.
pub fn parse_theme(tree: &XmlTree) -> Theme {
    let mut theme = Theme::default();

    let scheme = match tree.root().descendants("fontScheme").first() {
        Some(scheme) => *scheme,
        None => return theme,
    };

    if let Some(major) = scheme.child("majorFont") {
        theme.major_latin = typeface(major, "latin");
        theme.major_east_asian = typeface(major, "ea");
        theme.major_complex_script = typeface(major, "cs");
    }
    if let Some(minor) = scheme.child("minorFont") {
        theme.minor_latin = typeface(minor, "latin");
        theme.minor_east_asian = typeface(minor, "ea");
        theme.minor_complex_script = typeface(minor, "cs");
    }

    theme
}

fn typeface(font: &XmlNode, script: &str) -> Option<String> {
    font.child(script)
        .and_then(|n| n.attr("typeface"))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
