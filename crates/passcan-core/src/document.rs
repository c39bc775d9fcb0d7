//! Submitted documents and the page-rendering seam.

use std::path::Path;

use crate::error::DocumentError;

/// Kind of submitted container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A single page image.
    Image,
    /// A (possibly multi-page) PDF.
    Pdf,
}

impl DocumentKind {
    /// Classify by MIME content type.
    pub fn from_content_type(content_type: &str) -> Result<Self, DocumentError> {
        let content_type = content_type.trim().to_lowercase();
        if content_type.starts_with("image/") {
            Ok(Self::Image)
        } else if content_type == "application/pdf" {
            Ok(Self::Pdf)
        } else {
            Err(DocumentError::UnsupportedFormat(content_type))
        }
    }

    /// Classify by file extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "webp" | "gif" => Ok(Self::Image),
            _ => Err(DocumentError::UnsupportedFormat(extension)),
        }
    }
}

/// A rendered page image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Encoded image bytes (PNG, JPEG, ...).
    pub data: Vec<u8>,
}

impl PageImage {
    pub fn new(number: u32, data: Vec<u8>) -> Self {
        Self { number, data }
    }
}

/// Trait for turning a multi-page container into page images.
pub trait PageRenderer {
    /// Render every page, in order, numbered from 1.
    ///
    /// Unreadable containers must be reported as [`DocumentError::Unreadable`].
    fn render_pages(&self, data: &[u8]) -> Result<Vec<PageImage>, DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_type() {
        assert_eq!(DocumentKind::from_content_type("image/png"), Ok(DocumentKind::Image));
        assert_eq!(DocumentKind::from_content_type("image/jpeg"), Ok(DocumentKind::Image));
        assert_eq!(
            DocumentKind::from_content_type("Application/PDF"),
            Ok(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_content_type("text/plain"),
            Err(DocumentError::UnsupportedFormat("text/plain".to_string()))
        );
    }

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("scan.PDF")), Ok(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("page.jpeg")), Ok(DocumentKind::Image));
        assert!(DocumentKind::from_path(Path::new("notes.docx")).is_err());
        assert!(DocumentKind::from_path(Path::new("noextension")).is_err());
    }
}
