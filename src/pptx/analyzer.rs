//! Presentation-level analysis: manifest-ordered slide traversal,
//! theme resolution, and the per-part partial-failure policy.

use crate::container::{PptxContainer, REL_TYPE_CHART, REL_TYPE_THEME};
use crate::error::{Error, Result};
use crate::fonts::FontCatalog;
use crate::model::{FontUsage, Presentation, Report, Slide, SlideFault, Theme};
use crate::pptx::facts::{extract_font_refs, extract_slide_facts};
use crate::pptx::theme::parse_theme;
use crate::report::aggregate;
use crate::xml::XmlTree;
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Analyzer for one PPTX container.
///
/// Construction resolves the slide part list and theme part from the
/// presentation manifest; [`PptxAnalyzer::analyze`] then runs the whole
/// pipeline against a caller-supplied [`FontCatalog`].
pub struct PptxAnalyzer {
    container: PptxContainer,
    slide_paths: Vec<String>,
    theme_path: Option<String>,
}

impl PptxAnalyzer {
    /// Open a presentation file for analysis.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_container(PptxContainer::open(path)?)
    }

    /// Create an analyzer from container bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_container(PptxContainer::from_bytes(data)?)
    }

    fn from_container(container: PptxContainer) -> Result<Self> {
        let manifest_xml = container.read_xml(PRESENTATION_PART)?;
        let manifest = XmlTree::parse(&manifest_xml)?;
        // A broken manifest rels part leaves every slide unreachable, so
        // unlike slide parts it is fatal.
        let rels = container
            .relationships_for(PRESENTATION_PART)
            .map_err(|e| Error::XmlParse(e.to_string()))?;

        // Slide order comes from the manifest's sldIdLst, joined against
        // the relationship map. Archives commonly store slide parts out
        // of presentation order, so archive entry order and file-name
        // order are both wrong here.
        let mut slide_paths = Vec::new();
        for sld_id in manifest.root().descendants("sldId") {
            let rel_id = sld_id
                .prefixed_attr("id")
                .ok_or_else(|| Error::XmlParse("sldId without relationship id".to_string()))?;
            let rel = rels.get(rel_id).ok_or_else(|| {
                Error::MissingPart(format!("no relationship {} for slide", rel_id))
            })?;
            let path = PptxContainer::resolve_target(PRESENTATION_PART, &rel.target);
            if !container.exists(&path) {
                return Err(Error::MissingPart(path));
            }
            slide_paths.push(path);
        }

        let theme_path = rels
            .with_type_suffix(REL_TYPE_THEME)
            .next()
            .map(|rel| PptxContainer::resolve_target(PRESENTATION_PART, &rel.target));
        if theme_path.is_none() {
            log::warn!("presentation has no theme part; placeholder fonts will stay raw");
        }

        Ok(Self {
            container,
            slide_paths,
            theme_path,
        })
    }

    /// Number of slides in the manifest.
    pub fn slide_count(&self) -> usize {
        self.slide_paths.len()
    }

    /// Slide part paths in presentation order.
    pub fn slide_paths(&self) -> &[String] {
        &self.slide_paths
    }

    /// Run the full pipeline and fold the results into a report.
    pub fn analyze(&self, catalog: &FontCatalog) -> Result<Report> {
        if catalog.is_empty() {
            log::warn!("font catalog is empty: every font will classify as missing");
        }
        let (presentation, faults) = self.extract()?;
        Ok(aggregate(&presentation, faults, catalog))
    }

    /// Extract per-slide records, collecting part-level faults instead of
    /// aborting: a corrupt slide part costs that slide, not the run.
    pub fn extract(&self) -> Result<(Presentation, Vec<SlideFault>)> {
        let theme = self.load_theme();
        let mut slides = Vec::with_capacity(self.slide_paths.len());
        let mut faults = Vec::new();

        for (i, path) in self.slide_paths.iter().enumerate() {
            let index = i + 1;
            match self.extract_slide(path, index, &theme) {
                Ok(slide) => slides.push(slide),
                Err(err) => {
                    log::warn!("slide {} ({}) unanalyzable: {}", index, path, err);
                    faults.push(SlideFault {
                        slide: index,
                        part: path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let presentation = Presentation {
            slides,
            theme,
            slide_count: self.slide_paths.len(),
        };
        Ok((presentation, faults))
    }

    fn extract_slide(&self, path: &str, index: usize, theme: &Theme) -> Result<Slide> {
        let xml = self.container.read_xml(path)?;
        let tree = XmlTree::parse(&xml).map_err(|e| Error::MalformedPart {
            part: path.to_string(),
            reason: e.to_string(),
        })?;
        let mut slide = extract_slide_facts(&tree, index, theme);
        slide
            .fonts
            .extend(self.chart_fonts(path, index, theme));
        Ok(slide)
    }

    /// Fonts referenced by charts embedded in a slide.
    ///
    /// Chart parts are followed opportunistically via the slide's rels; a
    /// missing or malformed chart part degrades to "no chart fonts" for
    /// that slide rather than a fault.
    fn chart_fonts(&self, slide_path: &str, index: usize, theme: &Theme) -> Vec<FontUsage> {
        let mut fonts = Vec::new();
        let rels = match self.container.relationships_for(slide_path) {
            Ok(rels) => rels,
            Err(_) => return fonts,
        };
        for rel in rels.with_type_suffix(REL_TYPE_CHART) {
            let chart_path = PptxContainer::resolve_target(slide_path, &rel.target);
            match self
                .container
                .read_xml(&chart_path)
                .and_then(|xml| XmlTree::parse(&xml))
            {
                Ok(tree) => fonts.extend(extract_font_refs(tree.root(), index, theme)),
                Err(err) => {
                    log::warn!("chart part {} skipped: {}", chart_path, err);
                }
            }
        }
        fonts
    }

    fn load_theme(&self) -> Theme {
        let Some(path) = &self.theme_path else {
            return Theme::default();
        };
        match self
            .container
            .read_xml(path)
            .and_then(|xml| XmlTree::parse(&xml))
        {
            Ok(tree) => parse_theme(&tree),
            Err(err) => {
                log::warn!("theme part {} unparseable ({}); placeholder fonts stay raw", path, err);
                Theme::default()
            }
        }
    }
}

impl std::fmt::Debug for PptxAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PptxAnalyzer")
            .field("slides", &self.slide_paths.len())
            .field("theme", &self.theme_path)
            .finish()
    }
}
