use uuid::Uuid;

/// Transient ingestion input, consumed exactly once by the orchestrator.
///
/// `declared_mime` comes from the transport layer and is advisory only.
#[derive(Clone)]
pub struct RawUpload {
    pub data: Vec<u8>,
    pub declared_mime: String,
    pub filename: String,
    pub uploader: Uuid,
}

impl RawUpload {
    pub fn new(
        data: Vec<u8>,
        declared_mime: impl Into<String>,
        filename: impl Into<String>,
        uploader: Uuid,
    ) -> Self {
        Self {
            data,
            declared_mime: declared_mime.into(),
            filename: filename.into(),
            uploader,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Payloads can be tens of megabytes; keep them out of debug output and logs.
impl std::fmt::Debug for RawUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawUpload")
            .field("size_bytes", &self.data.len())
            .field("declared_mime", &self.declared_mime)
            .field("filename", &self.filename)
            .field("uploader", &self.uploader)
            .finish()
    }
}
