//! MIME type detection and coarse classification for uploaded files.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "svg"          => "image/svg+xml",
        "bmp"          => "image/bmp",

        // Documents
        "pdf"          => "application/pdf",
        "txt"          => "text/plain",
        "md"           => "text/markdown",
        "html" | "htm" => "text/html",
        "csv"          => "text/csv",
        "json"         => "application/json",
        "jsonl"        => "application/x-ndjson",
        "geojson"      => "application/geo+json",

        _              => "application/octet-stream",
    }
}

/// How the side panel renders an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaClass {
    Image,
    Document,
    Text,
    Other,
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether a MIME type is a PDF document.
pub fn is_pdf(mime: &str) -> bool {
    mime == "application/pdf"
}

/// Whether a MIME type can be shown inline as text.
pub fn is_text_like(mime: &str) -> bool {
    mime.starts_with("text/") || mime.contains("json")
}

/// Classify a MIME type. Checks run image, pdf, text, in that order.
pub fn classify_mime(mime: &str) -> MediaClass {
    let mime = mime.trim().to_ascii_lowercase();
    if is_image(&mime) {
        MediaClass::Image
    } else if is_pdf(&mime) {
        MediaClass::Document
    } else if is_text_like(&mime) {
        MediaClass::Text
    } else {
        MediaClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_mime_type(&PathBuf::from("photo.JPG")), "image/jpeg");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(detect_mime_type(&PathBuf::from("file.xyz")), "application/octet-stream");
    }

    #[test]
    fn classifies_by_prefix() {
        assert_eq!(classify_mime("image/png"), MediaClass::Image);
        assert_eq!(classify_mime("application/pdf"), MediaClass::Document);
        assert_eq!(classify_mime("text/csv"), MediaClass::Text);
        assert_eq!(classify_mime("application/ld+json"), MediaClass::Text);
        assert_eq!(classify_mime("Application/JSON"), MediaClass::Text);
        assert_eq!(classify_mime("application/zip"), MediaClass::Other);
    }
}
