//! Shared helpers for the streaming XML readers
//!
//! quick-xml checks tag pairing but not document shape, so both readers feed
//! their events through [`DocumentShape`] to reject truncated files, stray
//! text and multiple roots.

use crate::domain::Result;
use quick_xml::events::BytesStart;

/// Tracks element nesting for one document
#[derive(Debug, Default)]
pub(crate) struct DocumentShape {
    depth: usize,
    roots: usize,
}

impl DocumentShape {
    /// Number of currently open elements
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Records a start tag
    pub(crate) fn open(&mut self) -> std::result::Result<(), String> {
        if self.depth == 0 {
            self.roots += 1;
            if self.roots > 1 {
                return Err("more than one root element".to_string());
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Records a self-closing tag
    pub(crate) fn empty(&mut self) -> std::result::Result<(), String> {
        self.open()?;
        self.close();
        Ok(())
    }

    /// Records an end tag
    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Rejects character data outside the root element
    pub(crate) fn text(&self, text: &str) -> std::result::Result<(), String> {
        if self.depth == 0 && !text.trim().is_empty() {
            return Err("text outside the root element".to_string());
        }
        Ok(())
    }

    /// Checks the document once the reader reports end of file
    pub(crate) fn finish(&self) -> std::result::Result<(), String> {
        if self.roots == 0 {
            return Err("no root element".to_string());
        }
        if self.depth > 0 {
            return Err(format!(
                "unexpected end of file with {} unclosed element(s)",
                self.depth
            ));
        }
        Ok(())
    }
}

/// Reads and unescapes one attribute by its qualified name
pub(crate) fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root_is_accepted() {
        let mut shape = DocumentShape::default();
        shape.open().unwrap();
        shape.empty().unwrap();
        assert_eq!(shape.depth(), 1);
        shape.close();
        assert!(shape.finish().is_ok());
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut shape = DocumentShape::default();
        shape.empty().unwrap();
        assert!(shape.open().is_err());
    }

    #[test]
    fn test_truncated_document_is_rejected() {
        let mut shape = DocumentShape::default();
        shape.open().unwrap();
        shape.open().unwrap();
        shape.close();
        let err = shape.finish().unwrap_err();
        assert!(err.contains("1 unclosed"));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert!(DocumentShape::default().finish().is_err());
    }

    #[test]
    fn test_text_outside_root() {
        let mut shape = DocumentShape::default();
        assert!(shape.text("  \n").is_ok());
        assert!(shape.text("junk").is_err());
        shape.open().unwrap();
        assert!(shape.text("inside").is_ok());
    }

    #[test]
    fn test_attribute_is_unescaped() {
        let element = BytesStart::from_content(
            r#"Workout sourceName="Tom &amp; Jerry's Apple Watch" duration="30""#,
            7,
        );
        assert_eq!(
            attribute(&element, "sourceName").unwrap().as_deref(),
            Some("Tom & Jerry's Apple Watch")
        );
        assert_eq!(attribute(&element, "duration").unwrap().as_deref(), Some("30"));
        assert_eq!(attribute(&element, "missing").unwrap(), None);
    }
}
