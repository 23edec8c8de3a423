use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest accepted image, measured after base64 decoding (4 MiB).
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// An uploaded image as it arrives in a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImagePayload {
    /// Base64-encoded file content. A `data:<mime>;base64,` prefix is accepted
    /// and ignored.
    pub data: String,
    /// File extension without the dot (e.g. `"png"`).
    #[cfg_attr(feature = "openapi", schema(example = "png"))]
    pub extension: String,
}

/// Allowlisted image file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageExtension {
    /// Parse a declared extension, case-insensitively and ignoring a leading dot.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::Webp),
            _ => Err(ValidationError::UnsupportedImageType(raw.to_owned())),
        }
    }

    /// The extension as written into file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, decoded image ready to be written.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub extension: ImageExtension,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl DecodedImage {
    /// File name for this image given a slug, e.g. `hello-world.png`.
    pub fn file_name(&self, slug: &str) -> String {
        format!("{slug}.{}", self.extension)
    }
}

impl ImagePayload {
    /// Check the extension, decode the payload and enforce the size cap.
    ///
    /// The extension is checked first so disallowed types are rejected
    /// without decoding anything.
    pub fn decode(&self) -> Result<DecodedImage, ValidationError> {
        let extension = ImageExtension::parse(&self.extension)?;

        let encoded = strip_data_url_prefix(&self.data);
        // Browsers and some editors wrap base64 at 76 columns.
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        // Reject obviously oversized payloads before allocating the decode buffer.
        let estimated = compact.len() / 4 * 3;
        if estimated > MAX_IMAGE_BYTES + 3 {
            return Err(ValidationError::ImageTooLarge {
                size: estimated,
                max: MAX_IMAGE_BYTES,
            });
        }

        let bytes = B64
            .decode(compact.as_bytes())
            .map_err(|e| ValidationError::InvalidImageData(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ValidationError::InvalidImageData("image is empty".into()));
        }

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }

        Ok(DecodedImage { extension, bytes })
    }
}

fn strip_data_url_prefix(data: &str) -> &str {
    let trimmed = data.trim();
    if trimmed.starts_with("data:")
        && let Some((_, rest)) = trimmed.split_once(',')
    {
        return rest;
    }
    trimmed
}
