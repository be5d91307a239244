//! Cover image classification
//!
//! Magic-number sniffing over the leading bytes of a buffer. Pure and
//! stateless; the only formats accepted into the picture slot are PNG and
//! JPEG.

use serde::{Deserialize, Serialize};

/// Recognized cover image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// File extension used when staging the image in the workspace
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
        }
    }
}

/// Classify a byte buffer as a supported cover image format.
///
/// Returns `None` for anything that is not PNG or JPEG (including other
/// valid image types; the tag container only carries these two).
pub fn classify(bytes: &[u8]) -> Option<ImageKind> {
    match infer::get(bytes)?.mime_type() {
        "image/png" => Some(ImageKind::Png),
        "image/jpeg" => Some(ImageKind::Jpeg),
        _ => None,
    }
}
