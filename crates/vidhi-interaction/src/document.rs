//! Inline document encoding for multimodal requests.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use vidhi_core::error::{Result, VidhiError};

/// Mime types accepted for document analysis.
pub const SUPPORTED_MEDIA_TYPES: [&str; 4] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/webp",
];

/// A validated, transport-ready inline representation of an uploaded
/// document: standard base64 of the raw bytes paired with the mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineDocument {
    mime_type: String,
    data: String,
}

impl InlineDocument {
    /// Encodes raw bytes for inline transport.
    ///
    /// # Errors
    ///
    /// Returns [`VidhiError::UnsupportedMediaType`] when `mime_type` is
    /// outside [`SUPPORTED_MEDIA_TYPES`]. No backend call is involved.
    pub fn encode(bytes: &[u8], mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        if !SUPPORTED_MEDIA_TYPES.contains(&mime_type.as_str()) {
            return Err(VidhiError::unsupported_media(mime_type));
        }

        Ok(Self {
            mime_type,
            data: BASE64_STANDARD.encode(bytes),
        })
    }

    /// Reads a file and encodes it, inferring the mime type from the
    /// extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        Self::encode(&bytes, mime_type)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 payload as sent on the wire.
    pub fn data(&self) -> &str {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mime_outside_allow_list() {
        let err = InlineDocument::encode(b"PK\x03\x04", "application/zip").unwrap_err();
        assert!(matches!(err, VidhiError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn pdf_round_trips_through_base64() {
        let bytes = b"%PDF-1.7 sample content";
        let doc = InlineDocument::encode(bytes, "application/pdf").unwrap();

        assert_eq!(doc.mime_type(), "application/pdf");
        let decoded = BASE64_STANDARD.decode(doc.data()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn accepts_every_listed_type() {
        for mime in SUPPORTED_MEDIA_TYPES {
            assert!(InlineDocument::encode(b"\x00", mime).is_ok(), "{mime}");
        }
    }

    #[tokio::test]
    async fn from_path_infers_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notice.pdf");
        tokio::fs::write(&path, b"%PDF-1.7").await.unwrap();

        let doc = InlineDocument::from_path(&path).await.unwrap();
        assert_eq!(doc.mime_type(), "application/pdf");
    }

    #[tokio::test]
    async fn from_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.zip");
        tokio::fs::write(&path, b"PK").await.unwrap();

        assert!(InlineDocument::from_path(&path).await.is_err());
    }
}
