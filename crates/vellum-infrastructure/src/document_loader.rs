//! Reads a user-selected file into a [`Document`].
//!
//! Only PDFs are accepted. The check looks at the file extension, the same
//! filter a file picker applies; contents are not validated.

use std::fs;
use std::path::Path;
use vellum_core::document::{Document, PDF_MIME_TYPE};
use vellum_core::error::{Result, VellumError};

/// Loads the file at `path` as a PDF document.
///
/// # Errors
///
/// - `UnsupportedDocument` if the extension is not a PDF one or the file is empty
/// - `Io` if the file cannot be read
pub fn load_document(path: &Path) -> Result<Document> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| VellumError::unsupported_document(path.display().to_string(), "not a file"))?;

    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    if mime != PDF_MIME_TYPE {
        return Err(VellumError::unsupported_document(
            name,
            format!("expected a PDF file, got {mime}"),
        ));
    }

    let bytes = fs::read(path).map_err(|e| {
        VellumError::io(format!("Failed to read document at {:?}: {}", path, e))
    })?;
    if bytes.is_empty() {
        return Err(VellumError::unsupported_document(name, "file is empty"));
    }

    tracing::info!(
        "[DocumentLoader] Loaded '{}' ({} bytes)",
        name,
        bytes.len()
    );
    Ok(Document::new(name, bytes).with_mime_type(mime))
}
