//! Base64 helpers.
//!
//! Every byte-valued field on the wire is standard base64 with padding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

pub use base64::DecodeError;

/// Encode bytes as padded standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode padded standard base64.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    BASE64.decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            to_base64(b"off_chain_data_raw_signature_from_js"),
            "b2ZmX2NoYWluX2RhdGFfcmF3X3NpZ25hdHVyZV9mcm9tX2pz"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_base64(&[]), "");
        assert_eq!(from_base64("").unwrap(), Vec::<u8>::new());
    }
}
