//! Image upload request in the `{base64, type}` shape.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::forms::FormError;

/// Largest accepted decoded image.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted content types with the extension files are stored under.
pub const ALLOWED_IMAGE_TYPES: [(&str, &str); 4] = [
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadImageForm {
    /// Base64 payload, optionally as a `data:` URL.
    pub base64: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl UploadImageForm {
    /// Encodes a local file the way the upload endpoint expects it.
    pub fn from_bytes(bytes: &[u8], content_type: impl Into<String>) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
            content_type: content_type.into(),
        }
    }
}

/// Decoded and type-checked image.
#[derive(Debug, PartialEq)]
pub struct UploadPayload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

impl TryFrom<UploadImageForm> for UploadPayload {
    type Error = FormError;

    fn try_from(form: UploadImageForm) -> Result<Self, Self::Error> {
        let requested = form.content_type.trim().to_ascii_lowercase();
        let (content_type, extension) = ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(mime, _)| *mime == requested)
            .copied()
            .ok_or_else(|| FormError::InvalidImage(format!("unsupported type {requested}")))?;

        let encoded = form.base64.trim();
        let encoded = match encoded.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => encoded,
        };

        // Base64 inflates by 4/3; reject oversized bodies before decoding.
        if encoded.len() / 4 * 3 > MAX_UPLOAD_BYTES + 3 {
            return Err(FormError::InvalidImage("file is larger than 5 MB".to_string()));
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| FormError::InvalidImage("malformed base64 data".to_string()))?;

        if bytes.is_empty() {
            return Err(FormError::InvalidImage("file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(FormError::InvalidImage("file is larger than 5 MB".to_string()));
        }

        Ok(Self {
            bytes,
            content_type,
            extension,
        })
    }
}
