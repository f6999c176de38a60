//! Ed25519 key wrappers.
//!
//! Private keys use the 64-byte `seed || public` layout that Katena
//! tooling hands out; the public half is checked against the seed on
//! construction so a wrapper can never pair a seed with a foreign key.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::encoding::{from_base64, to_base64};
use crate::keys::{
    fixed, KeyError, ED25519_PRIVATE_KEY_LENGTH, ED25519_PUBLIC_KEY_LENGTH,
    ED25519_SIGNATURE_LENGTH,
};
use crate::utils::constant_time_compare;

/// Ed25519 public key (32 bytes). Equality and encoding are byte-exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyEd25519([u8; ED25519_PUBLIC_KEY_LENGTH]);

impl PublicKeyEd25519 {
    /// Wrap raw key bytes. Only the length is checked here; curve point
    /// validity is checked when the key is used to verify.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self(fixed(bytes)?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&from_base64(encoded)?)
    }

    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        to_base64(&self.0)
    }

    /// Verify a detached signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), KeyError> {
        let sig: [u8; ED25519_SIGNATURE_LENGTH] =
            signature
                .try_into()
                .map_err(|_| KeyError::InvalidSignatureLength {
                    expected: ED25519_SIGNATURE_LENGTH,
                    got: signature.len(),
                })?;
        verify_signature(&self.0, message, &sig)
    }
}

impl fmt::Debug for PublicKeyEd25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKeyEd25519")
            .field(&self.to_base64())
            .finish()
    }
}

impl fmt::Display for PublicKeyEd25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

/// Ed25519 private key.
///
/// The underlying `SigningKey` zeroizes itself on drop.
#[derive(Clone)]
pub struct PrivateKeyEd25519 {
    sign_key: SigningKey,
}

impl PrivateKeyEd25519 {
    /// Generate a new random key using the OS random source.
    pub fn generate() -> Self {
        Self {
            sign_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic key from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            sign_key: SigningKey::from_bytes(seed),
        }
    }

    /// Build a key from its 64-byte `seed || public` form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let keypair: Zeroizing<[u8; ED25519_PRIVATE_KEY_LENGTH]> = Zeroizing::new(fixed(bytes)?);
        let sign_key =
            SigningKey::from_keypair_bytes(&keypair).map_err(|_| KeyError::KeyPairMismatch)?;
        Ok(Self { sign_key })
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&from_base64(encoded)?)
    }

    /// Public key derived from the seed. Pure, no I/O.
    pub fn public_key(&self) -> PublicKeyEd25519 {
        PublicKeyEd25519(self.sign_key.verifying_key().to_bytes())
    }

    /// The 64-byte `seed || public` form.
    pub fn to_bytes(&self) -> [u8; ED25519_PRIVATE_KEY_LENGTH] {
        self.sign_key.to_keypair_bytes()
    }

    pub fn to_base64(&self) -> String {
        to_base64(&self.to_bytes())
    }

    /// Deterministic detached Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; ED25519_SIGNATURE_LENGTH] {
        let signature: Signature = self.sign_key.sign(message);
        signature.to_bytes()
    }
}

impl PartialEq for PrivateKeyEd25519 {
    fn eq(&self, other: &Self) -> bool {
        let ours = Zeroizing::new(self.to_bytes());
        let theirs = Zeroizing::new(other.to_bytes());
        constant_time_compare(&ours[..], &theirs[..])
    }
}

impl Eq for PrivateKeyEd25519 {}

impl fmt::Debug for PrivateKeyEd25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyEd25519")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Verify an Ed25519 signature.
///
/// # Arguments
/// * `pub_key` - The signer's Ed25519 public key (32 bytes)
/// * `message` - The message that was signed
/// * `signature` - The 64-byte Ed25519 signature
pub fn verify_signature(
    pub_key: &[u8; ED25519_PUBLIC_KEY_LENGTH],
    message: &[u8],
    signature: &[u8; ED25519_SIGNATURE_LENGTH],
) -> Result<(), KeyError> {
    let verifying_key =
        VerifyingKey::from_bytes(pub_key).map_err(|_| KeyError::InvalidPublicKey)?;
    let sig = Signature::from_bytes(signature);
    verifying_key
        .verify_strict(message, &sig)
        .map_err(|_| KeyError::InvalidSignature)
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::PublicKeyEd25519;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for PublicKeyEd25519 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_base64())
        }
    }

    impl<'de> Deserialize<'de> for PublicKeyEd25519 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let encoded = String::deserialize(deserializer)?;
            PublicKeyEd25519::from_base64(&encoded).map_err(de::Error::custom)
        }
    }
}
