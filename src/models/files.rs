use serde::{Deserialize, Serialize};

/// A file persisted by the upload pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// The name written to disk, after the rename policy was applied.
    pub stored_name: String,
    /// The name the client supplied.
    pub original_name: String,
    /// Bytes written.
    pub size: u64,
}
