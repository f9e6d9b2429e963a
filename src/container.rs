//! ZIP container access for PPTX presentation packages.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// ZIP local file header signature: PK\x03\x04.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Relationship type URI suffix for slide parts.
pub const REL_TYPE_SLIDE: &str = "/relationships/slide";
/// Relationship type URI suffix for the theme part.
pub const REL_TYPE_THEME: &str = "/relationships/theme";
/// Relationship type URI suffix for embedded chart parts.
pub const REL_TYPE_CHART: &str = "/relationships/chart";

/// A relationship entry from a .rels part.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the owning part's directory
    pub target: String,
}

/// Collection of relationships parsed from one .rels part.
///
/// Keyed by relationship ID in a sorted map so iteration order is
/// deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: BTreeMap<String, Relationship>,
}

impl Relationships {
    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Iterate relationships whose type URI ends with the given suffix.
    pub fn with_type_suffix<'a>(
        &'a self,
        suffix: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.by_id.values().filter(move |r| r.rel_type.ends_with(suffix))
    }

    fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if no relationships were found.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Read-only view of a presentation package's ZIP archive.
///
/// Provides XML part reading (with encoding detection) and relationship
/// resolution. All reads go through an in-memory copy of the archive; the
/// container performs no writes.
pub struct PptxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl PptxContainer {
    /// Open a presentation container from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a presentation container from a byte vector.
    ///
    /// Returns [`Error::NotAnArchive`] when the bytes do not start with a
    /// ZIP signature, before handing them to the ZIP reader.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < ZIP_MAGIC.len() || data[..ZIP_MAGIC.len()] != ZIP_MAGIC {
            return Err(Error::NotAnArchive);
        }
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// Read one part's raw bytes.
    pub fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingPart(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an XML part as a string, handling UTF-8 and UTF-16 encodings.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_part(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read and parse the .rels part that describes `part_path`.
    ///
    /// A missing .rels part yields an empty collection: parts without
    /// relationships simply have no .rels sibling.
    pub fn relationships_for(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = match part_path.rfind('/') {
            Some(slash) => format!(
                "{}/_rels/{}.rels",
                &part_path[..slash],
                &part_path[slash + 1..]
            ),
            None => format!("_rels/{}.rels", part_path),
        };

        let content = match self.read_xml(&rels_path) {
            Ok(c) => c,
            Err(_) => return Ok(Relationships::default()),
        };
        parse_relationships(&content).map_err(|e| Error::MalformedPart {
            part: rels_path,
            reason: e.to_string(),
        })
    }

    /// Resolve a relationship target against the directory of a base part.
    ///
    /// Targets starting with `/` are package-absolute; others are relative
    /// to the base part's directory and may contain `..` segments.
    pub fn resolve_target(base: &str, target: &str) -> String {
        if let Some(stripped) = target.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut segments: Vec<&str> = match base.rfind('/') {
            Some(slash) => base[..slash].split('/').collect(),
            None => Vec::new(),
        };
        for seg in target.split('/') {
            match seg {
                "." | "" => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

impl std::fmt::Debug for PptxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PptxContainer")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}

/// Parse the XML of one .rels part.
fn parse_relationships(content: &str) -> Result<Relationships> {
    let mut rels = Relationships::default();
    if content.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if e.name().local_name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if !id.is_empty() && !target.is_empty() {
                    rels.add(Relationship {
                        id,
                        rel_type,
                        target,
                    });
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Decode XML part bytes, honoring a UTF-8 or UTF-16 byte order mark.
///
/// PPTX parts are almost always UTF-8, but UTF-16 encoded parts occur in
/// the wild. After transcoding UTF-16 the XML declaration still claims
/// UTF-16, which quick-xml would trip over, so the declaration is patched.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::XmlParse(e.to_string()));
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Ok(fix_encoding_declaration(&decode_utf16(&bytes[2..], u16::from_le_bytes)?));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Ok(fix_encoding_declaration(&decode_utf16(&bytes[2..], u16::from_be_bytes)?));
    }
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn decode_utf16(bytes: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<String> {
    let len = bytes.len() & !1;
    let units = (0..len)
        .step_by(2)
        .map(|i| from_bytes([bytes[i], bytes[i + 1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(e.to_string()))
}

fn fix_encoding_declaration(content: &str) -> String {
    if let Some(end) = content.find("?>") {
        if content.starts_with("<?xml") {
            let decl = content[..end + 2]
                .replace("UTF-16", "UTF-8")
                .replace("utf-16", "UTF-8");
            return format!("{}{}", decl, &content[end + 2..]);
        }
    }
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            PptxContainer::resolve_target("ppt/presentation.xml", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(
            PptxContainer::resolve_target("ppt/slides/slide1.xml", "../charts/chart1.xml"),
            "ppt/charts/chart1.xml"
        );
        assert_eq!(
            PptxContainer::resolve_target("ppt/presentation.xml", "/ppt/theme/theme1.xml"),
            "ppt/theme/theme1.xml"
        );
    }

    #[test]
    fn test_rejects_non_zip_bytes() {
        let err = PptxContainer::from_bytes(b"<?xml version=\"1.0\"?>".to_vec()).unwrap_err();
        assert!(matches!(err, Error::NotAnArchive));

        let err = PptxContainer::from_bytes(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NotAnArchive));
    }

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#;
        let rels = parse_relationships(xml).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.get("rId1").unwrap().target, "slides/slide1.xml");
        assert_eq!(rels.with_type_suffix(REL_TYPE_THEME).count(), 1);
        assert_eq!(rels.with_type_suffix(REL_TYPE_SLIDE).count(), 1);
    }

    #[test]
    fn test_decode_utf16_bytes() {
        let utf16_le = b"\xFF\xFE<\0a\0/\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<a/>");

        let utf16_be = b"\xFE\xFF\0<\0a\0/\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<a/>");

        let utf8_bom = b"\xEF\xBB\xBF<a/>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<a/>");

        assert_eq!(decode_xml_bytes(b"<a/>").unwrap(), "<a/>");
    }

    #[test]
    fn test_utf16_declaration_patched() {
        let decl = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in decl.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert!(decoded.contains("UTF-8"));
        assert!(!decoded.contains("UTF-16"));
    }
}
