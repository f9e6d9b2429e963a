//! Slide fact extraction: hidden flag, effects, font references.

use crate::fonts::{is_internal_marker, resolve_placeholder};
use crate::model::{EffectKind, FontOrigin, FontUsage, Slide, Theme};
use crate::xml::{XmlNode, XmlTree};

/// Timing nodes that actually perform an animation. Presence of any one
/// of these inside the slide's timing tree marks the slide as animated;
/// a timing tree holding only build/trigger structure does not.
const BEHAVIOR_NODES: [&str; 6] = [
    "anim",
    "animClr",
    "animEffect",
    "animMotion",
    "animRot",
    "animScale",
];

/// Elements carrying a `typeface` attribute worth reporting.
const FONT_ELEMENTS: [&str; 4] = ["latin", "ea", "cs", "sym"];

/// Extract all facts from one slide's parsed part.
///
/// Structurally absent subtrees (no timing tree, no text) contribute
/// nothing; they are normal, not errors.
pub fn extract_slide_facts(tree: &XmlTree, index: usize, theme: &Theme) -> Slide {
    let root = tree.root();
    let mut slide = Slide::new(index);

    slide.hidden = is_hidden(root);
    if has_animation(root) {
        slide.effects.insert(EffectKind::Animation);
    }
    if has_transition(root) {
        slide.effects.insert(EffectKind::Transition);
    }

    // Only the slide body counts for fonts. Notes pages and masters are
    // separate parts and are never read; walking cSld alone keeps layout
    // boilerplate out of the font list.
    if let Some(body) = root.child("cSld") {
        slide.fonts = extract_font_refs(body, index, theme);
    }

    slide
}

/// Hidden iff the root carries an explicit `show="0"`/`show="false"`.
/// No attribute means visible; there is no inheritance to consult.
fn is_hidden(root: &XmlNode) -> bool {
    matches!(root.attr("show"), Some("0") | Some("false"))
}

fn has_animation(root: &XmlNode) -> bool {
    root.child("timing")
        .map(|timing| BEHAVIOR_NODES.iter().any(|n| timing.has_descendant(n)))
        .unwrap_or(false)
}

/// A transition element counts only when it actually performs an effect:
/// an effect child, or an auto-advance/duration attribute. A bare
/// `<p:transition/>` is the explicit "no transition" marker.
fn has_transition(root: &XmlNode) -> bool {
    root.descendants("transition").iter().any(|t| {
        t.children().next().is_some()
            || nonzero_attr(t, "advTm")
            || nonzero_attr(t, "dur")
    })
}

fn nonzero_attr(node: &XmlNode, name: &str) -> bool {
    node.attr(name).is_some_and(|v| v != "0" && !v.is_empty())
}

/// Walk a content subtree and collect every run-level and default font
/// reference, with theme placeholders substituted.
///
/// Shared between slide bodies and embedded chart parts: both use the
/// same DrawingML run properties.
pub fn extract_font_refs(node: &XmlNode, index: usize, theme: &Theme) -> Vec<FontUsage> {
    let mut fonts = Vec::new();
    walk_fonts(node, None, index, theme, &mut fonts);
    fonts
}

fn walk_fonts(
    node: &XmlNode,
    context: Option<FontOrigin>,
    index: usize,
    theme: &Theme,
    out: &mut Vec<FontUsage>,
) {
    let context = match node.name() {
        "rPr" => Some(FontOrigin::DirectRun),
        "defRPr" | "endParaRPr" => Some(FontOrigin::ParagraphDefault),
        _ => context,
    };

    if let Some(origin) = context {
        if FONT_ELEMENTS.contains(&node.name()) {
            if let Some(raw) = node.attr("typeface") {
                if let Some(usage) = font_usage(raw, origin, index, theme) {
                    out.push(usage);
                }
            }
        }
    }

    for child in node.children() {
        walk_fonts(child, context, index, theme, out);
    }
}

fn font_usage(
    raw: &str,
    context_origin: FontOrigin,
    index: usize,
    theme: &Theme,
) -> Option<FontUsage> {
    if is_internal_marker(raw) {
        return None;
    }
    let (resolved, origin) = match resolve_placeholder(raw, theme) {
        Some((resolved, theme_origin)) => (resolved, theme_origin),
        None => (raw.to_string(), context_origin),
    };
    Some(FontUsage {
        raw: raw.to_string(),
        resolved,
        origin,
        slide: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlTree;

    fn slide_xml(attrs: &str, body: &str, extra: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"{attrs}>
  <p:cSld><p:spTree>{body}</p:spTree></p:cSld>
  {extra}
</p:sld>"#
        )
    }

    fn extract(attrs: &str, body: &str, extra: &str) -> Slide {
        let xml = slide_xml(attrs, body, extra);
        let tree = XmlTree::parse(&xml).unwrap();
        extract_slide_facts(&tree, 1, &Theme::default())
    }

    #[test]
    fn test_hidden_attribute() {
        assert!(extract(r#" show="0""#, "", "").hidden);
        assert!(extract(r#" show="false""#, "", "").hidden);
        assert!(!extract(r#" show="1""#, "", "").hidden);
        assert!(!extract("", "", "").hidden);
    }

    #[test]
    fn test_animation_requires_behavior_node() {
        let with_anim = extract(
            "",
            "",
            "<p:timing><p:tnLst><p:par><p:anim/></p:par></p:tnLst></p:timing>",
        );
        assert!(with_anim.effects.contains(&EffectKind::Animation));

        // A timing tree with only build structure is not an animation
        let bare_timing = extract("", "", "<p:timing><p:tnLst><p:par/></p:tnLst></p:timing>");
        assert!(!bare_timing.effects.contains(&EffectKind::Animation));

        let none = extract("", "", "");
        assert!(none.effects.is_empty());
    }

    #[test]
    fn test_transition_detection() {
        let with_fade = extract("", "", "<p:transition><p:fade/></p:transition>");
        assert!(with_fade.effects.contains(&EffectKind::Transition));

        let auto_advance = extract("", "", r#"<p:transition advTm="3000"/>"#);
        assert!(auto_advance.effects.contains(&EffectKind::Transition));

        // Empty transition element is the explicit no-transition marker
        let empty = extract("", "", "<p:transition/>");
        assert!(!empty.effects.contains(&EffectKind::Transition));
    }

    #[test]
    fn test_run_font_extraction() {
        let slide = extract(
            "",
            r#"<a:p>
                 <a:r><a:rPr lang="en-US"><a:latin typeface="Arial"/></a:rPr><a:t>x</a:t></a:r>
                 <a:endParaRPr><a:latin typeface="Wingdings"/></a:endParaRPr>
               </a:p>"#,
            "",
        );
        assert_eq!(slide.fonts.len(), 2);
        assert_eq!(slide.fonts[0].raw, "Arial");
        assert_eq!(slide.fonts[0].origin, FontOrigin::DirectRun);
        assert_eq!(slide.fonts[1].raw, "Wingdings");
        assert_eq!(slide.fonts[1].origin, FontOrigin::ParagraphDefault);
    }

    #[test]
    fn test_theme_placeholder_resolution_keeps_raw() {
        let xml = slide_xml(
            "",
            r#"<a:p><a:r><a:rPr><a:latin typeface="+mn-lt"/></a:rPr><a:t>x</a:t></a:r></a:p>"#,
            "",
        );
        let tree = XmlTree::parse(&xml).unwrap();
        let theme = Theme {
            minor_latin: Some("Calibri".to_string()),
            ..Default::default()
        };
        let slide = extract_slide_facts(&tree, 4, &theme);

        assert_eq!(slide.fonts.len(), 1);
        let usage = &slide.fonts[0];
        assert_eq!(usage.raw, "+mn-lt");
        assert_eq!(usage.resolved, "Calibri");
        assert_eq!(usage.origin, FontOrigin::ThemeMinor);
        assert_eq!(usage.slide, 4);
    }

    #[test]
    fn test_vertical_variant_markers_skipped() {
        let slide = extract(
            "",
            r#"<a:p><a:r><a:rPr><a:latin typeface="@Yu Gothic"/></a:rPr><a:t>x</a:t></a:r></a:p>"#,
            "",
        );
        assert!(slide.fonts.is_empty());
    }

    #[test]
    fn test_typeface_outside_run_properties_ignored() {
        // buFont names a bullet glyph font outside any run context
        let slide = extract(
            "",
            r#"<a:p><a:pPr><a:buFont typeface="Wingdings"/></a:pPr><a:t>x</a:t></a:p>"#,
            "",
        );
        assert!(slide.fonts.is_empty());
    }

    #[test]
    fn test_table_cell_fonts_included() {
        let slide = extract(
            "",
            r#"<a:tbl><a:tr><a:tc><a:txBody>
                 <a:p><a:r><a:rPr><a:latin typeface="Consolas"/></a:rPr><a:t>c</a:t></a:r></a:p>
               </a:txBody></a:tc></a:tr></a:tbl>"#,
            "",
        );
        assert_eq!(slide.fonts.len(), 1);
        assert_eq!(slide.fonts[0].raw, "Consolas");
    }
}
