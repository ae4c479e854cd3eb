//! Base64 data-URI decoding for uploaded images.
//!
//! Recipe images and avatars arrive inline as
//! `data:image/<ext>;base64,<payload>`. This module turns that form into
//! raw bytes plus a file extension for the blob store; it never touches
//! storage itself.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Decoding failures for inline image payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageDecodeError {
    /// Payload does not start with `data:image/`.
    #[error("image must be a data:image/... URI")]
    NotAnImageUri,
    /// Payload is missing the `;base64,` marker.
    #[error("image data URI must be base64 encoded")]
    MissingBase64Marker,
    /// The declared extension is empty or contains path characters.
    #[error("image data URI has an invalid extension")]
    InvalidExtension,
    /// The base64 payload failed to decode.
    #[error("image payload is not valid base64")]
    InvalidPayload,
}

/// A decoded inline image: raw bytes plus the declared extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// File extension declared by the data URI, e.g. `png`.
    pub extension: String,
    /// Decoded image bytes.
    pub bytes: Vec<u8>,
}

/// Decode a `data:image/<ext>;base64,<payload>` string.
pub fn decode_data_uri(value: &str) -> Result<DecodedImage, ImageDecodeError> {
    let rest = value
        .strip_prefix("data:image/")
        .ok_or(ImageDecodeError::NotAnImageUri)?;
    let (extension, payload) = rest
        .split_once(";base64,")
        .ok_or(ImageDecodeError::MissingBase64Marker)?;
    if extension.is_empty()
        || !extension
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '+')
    {
        return Err(ImageDecodeError::InvalidExtension);
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| ImageDecodeError::InvalidPayload)?;
    Ok(DecodedImage {
        // "svg+xml" style subtypes keep only the leading token.
        extension: extension
            .split('+')
            .next()
            .unwrap_or(extension)
            .to_owned(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_a_png_data_uri() {
        let decoded = decode_data_uri("data:image/png;base64,aGVsbG8=").expect("decodes");
        assert_eq!(decoded.extension, "png");
        assert_eq!(decoded.bytes, b"hello");
    }

    #[rstest]
    fn keeps_the_leading_subtype_token() {
        let decoded = decode_data_uri("data:image/svg+xml;base64,aGVsbG8=").expect("decodes");
        assert_eq!(decoded.extension, "svg");
    }

    #[rstest]
    #[case("data:text/plain;base64,aGVsbG8=", ImageDecodeError::NotAnImageUri)]
    #[case("data:image/png,aGVsbG8=", ImageDecodeError::MissingBase64Marker)]
    #[case("data:image/;base64,aGVsbG8=", ImageDecodeError::InvalidExtension)]
    #[case("data:image/png;base64,not-base64!!", ImageDecodeError::InvalidPayload)]
    fn rejects_malformed_uris(#[case] raw: &str, #[case] expected: ImageDecodeError) {
        assert_eq!(decode_data_uri(raw).expect_err("must reject"), expected);
    }
}
