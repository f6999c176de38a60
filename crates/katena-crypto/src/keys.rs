//! Key sizes and the error shared by every key wrapper.

/// Ed25519 private key: 32-byte seed followed by the 32-byte public key.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 64;
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// X25519 private key: 32-byte secret followed by the 32-byte public key.
pub const X25519_PRIVATE_KEY_LENGTH: usize = 64;
pub const X25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Error type for key construction and signature checks.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("public key half does not match the private seed")]
    KeyPairMismatch,
    #[error("invalid base64 key encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature length: expected {expected}, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },
    #[error("invalid signature")]
    InvalidSignature,
}

/// Copy `bytes` into a fixed-size array, failing on any length mismatch.
pub(crate) fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], KeyError> {
    bytes.try_into().map_err(|_| KeyError::InvalidKeyLength {
        expected: N,
        got: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_accepts_exact_length() {
        let arr: [u8; 32] = fixed(&[1u8; 32]).unwrap();
        assert_eq!(arr, [1u8; 32]);
    }

    #[test]
    fn test_fixed_reports_lengths() {
        let err = fixed::<64>(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            KeyError::InvalidKeyLength {
                expected: 64,
                got: 10
            }
        );
        assert_eq!(err.to_string(), "invalid key length: expected 64, got 10");
    }
}
