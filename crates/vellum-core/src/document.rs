//! The user-selected document that gets submitted for analysis.

use std::fmt;
use std::sync::Arc;

/// MIME type of the only accepted document kind.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// An opaque binary blob with a display name.
///
/// The bytes are shared behind an `Arc` so the copy the session hands to each
/// submission does not duplicate the file. A `Document` is never mutated; selecting
/// another file replaces it wholesale.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl Document {
    /// Creates a PDF document from its file name and contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: PDF_MIME_TYPE.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Overrides the MIME type sent with the upload.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// File name shown to the user and sent as the upload file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Contents are omitted; documents can be several megabytes.
impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
