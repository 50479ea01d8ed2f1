//! Attachment handling: MIME detection and side-panel classification.

pub mod classify;
pub mod mime_detect;

pub use classify::{classify_all, classify_attachment, effective_mime, format_file_size, MAX_INLINE_BYTES};
pub use mime_detect::{classify_mime, detect_mime_type, is_image, is_pdf, is_text_like, MediaClass};
