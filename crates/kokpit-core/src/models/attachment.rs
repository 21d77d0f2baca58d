//! Attachment metadata.

use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// A file attached to a story on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        is_image_file(&self.filename)
    }
}

/// Whether a file name looks like an image, judged by its extension.
pub fn is_image_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
