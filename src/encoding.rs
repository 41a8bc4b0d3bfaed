//! Transport encoding of file content.
//!
//! The contents endpoint requires base64; callers declare whether their
//! content is raw or already encoded, so nothing is guessed and nothing is
//! double-encoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::types::ContentEncoding;

/// Encode content for the contents endpoint according to its declared
/// encoding. `Raw` content is base64-encoded; `Base64` content passes
/// through untouched.
#[must_use]
pub fn transport_encode(content: &str, encoding: ContentEncoding) -> String {
    match encoding {
        ContentEncoding::Raw => BASE64.encode(content.as_bytes()),
        ContentEncoding::Base64 => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_content_is_encoded() {
        assert_eq!(transport_encode("# demo", ContentEncoding::Raw), "IyBkZW1v");
    }

    #[test]
    fn test_pre_encoded_content_passes_through() {
        // "IyBkZW1v" is itself valid base64; declared encoding, not content
        // shape, decides whether it gets encoded again.
        assert_eq!(
            transport_encode("IyBkZW1v", ContentEncoding::Base64),
            "IyBkZW1v"
        );
    }

    #[test]
    fn test_raw_content_that_looks_encoded_is_still_encoded() {
        let encoded = transport_encode("IyBkZW1v", ContentEncoding::Raw);
        assert_ne!(encoded, "IyBkZW1v");
        assert_eq!(
            BASE64.decode(encoded).expect("valid base64"),
            b"IyBkZW1v".to_vec()
        );
    }
}
