//! Namespace-agnostic XML tree for OOXML parts.
//!
//! PresentationML parts bind the same schemas to arbitrary prefixes
//! (`p:`, `a:`, `r:` by convention, but nothing guarantees it). This
//! module parses a part once into an owned tree and answers all queries
//! by local name, so extraction code never needs to know which prefix a
//! producer happened to use.

use crate::error::{Error, Result};
use quick_xml::events::Event;

/// One parsed XML part.
#[derive(Debug, Clone)]
pub struct XmlTree {
    root: XmlNode,
}

/// One element in a parsed part.
#[derive(Debug, Clone)]
pub struct XmlNode {
    local: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlTree {
    /// Parse one part's XML content.
    ///
    /// Fails with [`Error::XmlParse`] on unparseable content or when the
    /// document has no root element.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(node_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let node = node_from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| Error::XmlParse("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::XmlParse(e.to_string()))?;
                        parent.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::XmlParse("unclosed element at end of input".to_string()));
        }
        match root {
            Some(root) => Ok(Self { root }),
            None => Err(Error::XmlParse("no root element".to_string())),
        }
    }

    /// The document element.
    pub fn root(&self) -> &XmlNode {
        &self.root
    }
}

fn node_from_start(e: &quick_xml::events::BytesStart<'_>) -> Result<XmlNode> {
    let local = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
        // Keep the qualified key as written; lookups split off the prefix.
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attrs.push((key, value));
    }
    Ok(XmlNode {
        local,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

fn local_part(qualified: &str) -> &str {
    match qualified.find(':') {
        Some(colon) => &qualified[colon + 1..],
        None => qualified,
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(Error::XmlParse("multiple root elements".to_string())),
    }
}

impl XmlNode {
    /// The element's local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.local
    }

    /// Look up an attribute by local name, whatever its prefix.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| local_part(k) == local)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a namespace-prefixed attribute by local name.
    ///
    /// `sldId` carries both `id` (slide id) and `r:id` (relationship id);
    /// this resolves the prefixed one without naming the `r` binding.
    pub fn prefixed_attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.contains(':') && local_part(k) == local)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter()
    }

    /// First direct child with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.local == local)
    }

    /// All descendant elements (self excluded) with the given local name,
    /// in document order.
    pub fn descendants<'a>(&'a self, local: &'a str) -> Vec<&'a XmlNode> {
        let mut out = Vec::new();
        self.collect_descendants(local, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, local: &str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.local == local {
                out.push(child);
            }
            child.collect_descendants(local, out);
        }
    }

    /// True when any descendant has the given local name.
    pub fn has_descendant(&self, local: &str) -> bool {
        self.children
            .iter()
            .any(|c| c.local == local || c.has_descendant(local))
    }

    /// Concatenated text content of this element and all descendants,
    /// in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
