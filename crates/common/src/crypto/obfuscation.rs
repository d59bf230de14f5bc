//! Keyless obfuscation for values written to shared storage.
//!
//! This is standard Base64 over the UTF-8 bytes. It keeps a token from being
//! readable at a glance in a file listing and nothing more: anyone with read
//! access to the file can reverse it. Confidentiality comes from the store's
//! access control.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Failure to reverse an obfuscated value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObfuscationError {
    #[error("value is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,
}

/// Encode `plain` for storage.
#[must_use]
pub fn obfuscate(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}

/// Decode a value produced by [`obfuscate`].
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`ObfuscationError`] if the input is not Base64 or does not decode
/// to UTF-8.
pub fn reveal(encoded: &str) -> Result<String, ObfuscationError> {
    let bytes = STANDARD
        .decode(encoded.trim().as_bytes())
        .map_err(|e| ObfuscationError::InvalidEncoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| ObfuscationError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(obfuscate("RT1"), "UlQx");
        assert_eq!(reveal("UlQx\n").unwrap(), "RT1");
    }

    #[test]
    fn printable_tokens_round_trip() {
        for token in ["1//0gabc-DEF_ghi", "a", "トークン", "with space/and+plus="] {
            assert_eq!(reveal(&obfuscate(token)).unwrap(), token);
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(reveal("not base64!!"), Err(ObfuscationError::InvalidEncoding(_))));
        // 0xff 0xfe is valid base64 but not UTF-8.
        assert_eq!(reveal("//4="), Err(ObfuscationError::InvalidUtf8));
    }
}
