//! Attachment classification into side-panel display items.

use std::path::Path;

use switchyard_core::{AttachmentRef, DisplayItem};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::mime_detect::{MediaClass, classify_mime, detect_mime_type};

/// Effective MIME type: the declared one, or a guess from the file name.
pub fn effective_mime(attachment: &AttachmentRef) -> String {
    match attachment.mime_type.as_deref() {
        Some(mime) if !mime.trim().is_empty() => mime.to_string(),
        _ => detect_mime_type(std::path::Path::new(&attachment.name)).to_string(),
    }
}

/// Largest text attachment shown inline. Bigger files become file references.
pub const MAX_INLINE_BYTES: u64 = 1024 * 1024;

/// Read at most [`MAX_INLINE_BYTES`] of `path` as UTF-8. `Ok(None)` means the
/// file is over the limit.
async fn read_inline_text(path: &Path) -> std::io::Result<Option<String>> {
    let file = fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.take(MAX_INLINE_BYTES + 1).read_to_end(&mut bytes).await?;
    if bytes.len() as u64 > MAX_INLINE_BYTES {
        return Ok(None);
    }
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Classify one attachment. Text content is read best-effort: a failed read,
/// invalid UTF-8 or an oversized file degrades to a plain file reference
/// instead of failing the turn.
pub async fn classify_attachment(attachment: &AttachmentRef) -> DisplayItem {
    let mime = effective_mime(attachment);
    let name = attachment.name.clone();
    let path = attachment.content_path.clone();

    match classify_mime(&mime) {
        MediaClass::Image => DisplayItem::Image { name, path },
        MediaClass::Document => DisplayItem::Document { name, path },
        MediaClass::Text => match read_inline_text(&path).await {
            Ok(Some(content)) => {
                debug!(name = %name, bytes = content.len(), "Read inline text attachment");
                DisplayItem::InlineText { name, content }
            }
            Ok(None) => {
                debug!(name = %name, limit = MAX_INLINE_BYTES, "Text attachment too large to inline");
                file_reference(name, path).await
            }
            Err(e) => {
                warn!(name = %name, path = %path.display(), "Failed to read text attachment: {}", e);
                file_reference(name, path).await
            }
        },
        MediaClass::Other => file_reference(name, path).await,
    }
}

/// Classify every attachment, keeping upload order.
pub async fn classify_all(attachments: &[AttachmentRef]) -> Vec<DisplayItem> {
    let mut items = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        items.push(classify_attachment(attachment).await);
    }
    items
}

async fn file_reference(name: String, path: std::path::PathBuf) -> DisplayItem {
    let size_bytes = fs::metadata(&path).await.ok().map(|m| m.len());
    DisplayItem::File { name, path, size_bytes }
}

/// Human-readable size, as shown next to generic file references.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn image_and_pdf_are_references() {
        let img = AttachmentRef::new("cat.png", Some("image/png"), "/nope/cat.png");
        let pdf = AttachmentRef::new("paper.pdf", Some("application/pdf"), "/nope/paper.pdf");
        assert!(matches!(classify_attachment(&img).await, DisplayItem::Image { .. }));
        assert!(matches!(classify_attachment(&pdf).await, DisplayItem::Document { .. }));
    }

    #[tokio::test]
    async fn text_is_read_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"ok\": true}}").unwrap();
        let att = AttachmentRef::new("data.json", Some("application/json"), file.path());
        match classify_attachment(&att).await {
            DisplayItem::InlineText { content, .. } => assert_eq!(content, "{\"ok\": true}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_text_degrades_to_file() {
        let att = AttachmentRef::new("gone.txt", Some("text/plain"), "/definitely/not/here.txt");
        match classify_attachment(&att).await {
            DisplayItem::File { name, size_bytes, .. } => {
                assert_eq!(name, "gone.txt");
                assert_eq!(size_bytes, None);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_text_becomes_file_reference() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_INLINE_BYTES + 1).unwrap();
        let att = AttachmentRef::new("huge.log", Some("text/plain"), file.path());
        match classify_attachment(&att).await {
            DisplayItem::File { name, size_bytes, .. } => {
                assert_eq!(name, "huge.log");
                assert_eq!(size_bytes, Some(MAX_INLINE_BYTES + 1));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn text_at_the_limit_is_still_inlined() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_INLINE_BYTES).unwrap();
        let att = AttachmentRef::new("edge.txt", Some("text/plain"), file.path());
        match classify_attachment(&att).await {
            DisplayItem::InlineText { content, .. } => assert_eq!(content.len() as u64, MAX_INLINE_BYTES),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_utf8_becomes_file_reference() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe, 0x6f]).unwrap();
        let att = AttachmentRef::new("latin1.txt", Some("text/plain"), file.path());
        match classify_attachment(&att).await {
            DisplayItem::File { size_bytes, .. } => assert_eq!(size_bytes, Some(5)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_mime_is_guessed_from_name() {
        let att = AttachmentRef::new("scan.pdf", None, "/nope/scan.pdf");
        assert_eq!(effective_mime(&att), "application/pdf");
        assert!(matches!(classify_attachment(&att).await, DisplayItem::Document { .. }));
    }

    #[tokio::test]
    async fn order_is_preserved() {
        let items = classify_all(&[
            AttachmentRef::new("b.zip", Some("application/zip"), "/nope/b.zip"),
            AttachmentRef::new("a.png", Some("image/png"), "/nope/a.png"),
        ])
        .await;
        let names: Vec<_> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["b.zip", "a.png"]);
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
    }
}
