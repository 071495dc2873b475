//! Media kinds and the extension allow-list.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions classified as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Extensions classified as video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];

/// Kind of a media file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (.jpg, .jpeg, .png, .webp).
    Image,
    /// Video clip (.mp4, .webm).
    Video,
}

impl MediaKind {
    /// Classify an extension (without the dot), case-insensitively.
    ///
    /// Returns `None` for anything outside the allow-list.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Classify a file by its path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
