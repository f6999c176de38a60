//! X25519 key wrappers and NaCl box sealing.
//!
//! `seal`/`open` implement the NaCl `crypto_box` construction
//! (X25519 + XSalsa20-Poly1305) so that secrets written by any NaCl
//! implementation can be opened here and vice versa.

use std::fmt;

use crypto_box::aead::{generic_array::GenericArray, Aead};
use crypto_box::SalsaBox;
use rand_core::OsRng;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::encoding::{from_base64, to_base64};
use crate::keys::{fixed, KeyError, X25519_PRIVATE_KEY_LENGTH, X25519_PUBLIC_KEY_LENGTH};
use crate::utils::constant_time_compare;

/// NaCl box nonce length.
pub const NONCE_LENGTH: usize = 24;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BoxError {
    #[error("invalid nonce length: expected {expected}, got {got}")]
    InvalidNonceLength { expected: usize, got: usize },
    #[error("random source unavailable")]
    RandomUnavailable,
    #[error("encryption failed")]
    EncryptFailed,
}

/// X25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyX25519([u8; X25519_PUBLIC_KEY_LENGTH]);

impl PublicKeyX25519 {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self(fixed(bytes)?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&from_base64(encoded)?)
    }

    pub fn as_bytes(&self) -> &[u8; X25519_PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        to_base64(&self.0)
    }

    fn box_key(&self) -> crypto_box::PublicKey {
        crypto_box::PublicKey::from(self.0)
    }
}

impl fmt::Debug for PublicKeyX25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKeyX25519")
            .field(&self.to_base64())
            .finish()
    }
}

impl fmt::Display for PublicKeyX25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

/// Output of [`PrivateKeyX25519::seal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    pub nonce: [u8; NONCE_LENGTH],
    pub ciphertext: Vec<u8>,
}

/// X25519 private key.
///
/// `StaticSecret` zeroizes itself on drop.
#[derive(Clone)]
pub struct PrivateKeyX25519 {
    kex_key: StaticSecret,
}

impl PrivateKeyX25519 {
    /// Generate a new random key using the OS random source.
    pub fn generate() -> Self {
        Self {
            kex_key: StaticSecret::random_from_rng(OsRng),
        }
    }

    /// Build a key from its 64-byte `secret || public` form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let keypair: Zeroizing<[u8; X25519_PRIVATE_KEY_LENGTH]> = Zeroizing::new(fixed(bytes)?);
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&keypair[..32]);
        let key = Self {
            kex_key: StaticSecret::from(*secret),
        };
        if key.public_key().as_bytes()[..] != keypair[32..] {
            return Err(KeyError::KeyPairMismatch);
        }
        Ok(key)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&from_base64(encoded)?)
    }

    pub fn public_key(&self) -> PublicKeyX25519 {
        PublicKeyX25519(X25519PublicKey::from(&self.kex_key).to_bytes())
    }

    /// The 64-byte `secret || public` form.
    pub fn to_bytes(&self) -> [u8; X25519_PRIVATE_KEY_LENGTH] {
        let mut out = [0u8; X25519_PRIVATE_KEY_LENGTH];
        out[..32].copy_from_slice(Zeroizing::new(self.kex_key.to_bytes()).as_slice());
        out[32..].copy_from_slice(self.public_key().as_bytes());
        out
    }

    pub fn to_base64(&self) -> String {
        to_base64(&self.to_bytes())
    }

    fn salsa_box(&self, peer: &PublicKeyX25519) -> SalsaBox {
        let secret = crypto_box::SecretKey::from(*Zeroizing::new(self.kex_key.to_bytes()));
        SalsaBox::new(&peer.box_key(), &secret)
    }

    /// Encrypt `plaintext` for `recipient`. A fresh random nonce is drawn
    /// for every call.
    pub fn seal(
        &self,
        plaintext: &[u8],
        recipient: &PublicKeyX25519,
    ) -> Result<SealedBox, BoxError> {
        let mut nonce = [0u8; NONCE_LENGTH];
        getrandom::getrandom(&mut nonce).map_err(|_| BoxError::RandomUnavailable)?;

        let ciphertext = self
            .salsa_box(recipient)
            .encrypt(GenericArray::from_slice(&nonce), plaintext)
            .map_err(|_| BoxError::EncryptFailed)?;

        Ok(SealedBox { nonce, ciphertext })
    }

    /// Decrypt a box sent by `sender`.
    ///
    /// Returns `Ok(None)` when authentication fails: the content was not
    /// addressed to this key, or was sealed by someone else. A nonce of
    /// the wrong size is a malformed input and returns an error instead.
    pub fn open(
        &self,
        ciphertext: &[u8],
        sender: &PublicKeyX25519,
        nonce: &[u8],
    ) -> Result<Option<Vec<u8>>, BoxError> {
        if nonce.len() != NONCE_LENGTH {
            return Err(BoxError::InvalidNonceLength {
                expected: NONCE_LENGTH,
                got: nonce.len(),
            });
        }
        Ok(self
            .salsa_box(sender)
            .decrypt(GenericArray::from_slice(nonce), ciphertext)
            .ok())
    }
}

impl PartialEq for PrivateKeyX25519 {
    fn eq(&self, other: &Self) -> bool {
        let ours = Zeroizing::new(self.to_bytes());
        let theirs = Zeroizing::new(other.to_bytes());
        constant_time_compare(&ours[..], &theirs[..])
    }
}

impl Eq for PrivateKeyX25519 {}

impl fmt::Debug for PrivateKeyX25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyX25519")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::PublicKeyX25519;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for PublicKeyX25519 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_base64())
        }
    }

    impl<'de> Deserialize<'de> for PublicKeyX25519 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let encoded = String::deserialize(deserializer)?;
            PublicKeyX25519::from_base64(&encoded).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_CRYPT_PRIVATE_KEY: &str =
        "nyCzhimWnTQifh6ucXLuJwOz3RgiBpo33LcX1NjMAsP1ZkQcdlDq64lTwxaDx0lq6LCQAUeYywyMUtfsvTUEeQ==";
    const ALICE_CRYPT_PUBLIC_KEY: &str = "9WZEHHZQ6uuJU8MWg8dJauiwkAFHmMsMjFLX7L01BHk=";
    const BOB_CRYPT_PRIVATE_KEY: &str =
        "quGBP8awD/J3hjSvwGD/sZRcMDks8DPz9Vw0HD4+zecqJP0ojBoc4wQtyq08ywxUksTkdz0/rQNkOsEZBwqWTw==";
    const BOB_CRYPT_PUBLIC_KEY: &str = "KiT9KIwaHOMELcqtPMsMVJLE5Hc9P60DZDrBGQcKlk8=";

    #[test]
    fn test_fixture_keys_derive_their_public_half() {
        let alice = PrivateKeyX25519::from_base64(ALICE_CRYPT_PRIVATE_KEY).unwrap();
        let bob = PrivateKeyX25519::from_base64(BOB_CRYPT_PRIVATE_KEY).unwrap();
        assert_eq!(alice.public_key().to_base64(), ALICE_CRYPT_PUBLIC_KEY);
        assert_eq!(bob.public_key().to_base64(), BOB_CRYPT_PUBLIC_KEY);
        assert_eq!(alice.to_base64(), ALICE_CRYPT_PRIVATE_KEY);
    }

    #[test]
    fn test_key_length_validation() {
        assert_eq!(
            PrivateKeyX25519::from_bytes(&[0u8; 32]).unwrap_err(),
            KeyError::InvalidKeyLength {
                expected: 64,
                got: 32
            }
        );
        assert!(PublicKeyX25519::from_bytes(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_seal_open_round_trip() {
        let alice = PrivateKeyX25519::from_base64(ALICE_CRYPT_PRIVATE_KEY).unwrap();
        let bob = PrivateKeyX25519::from_base64(BOB_CRYPT_PRIVATE_KEY).unwrap();
        let content = b"off_chain_secret_to_crypt_from_rs";

        let sealed = alice.seal(content, &bob.public_key()).unwrap();
        assert_ne!(sealed.ciphertext.as_slice(), content.as_slice());

        let opened = bob
            .open(&sealed.ciphertext, &alice.public_key(), &sealed.nonce)
            .unwrap();
        assert_eq!(opened.as_deref(), Some(content.as_slice()));
    }

    #[test]
    fn test_open_with_wrong_key_is_soft_failure() {
        let alice = PrivateKeyX25519::generate();
        let bob = PrivateKeyX25519::generate();
        let eve = PrivateKeyX25519::generate();

        let sealed = alice.seal(b"for bob only", &bob.public_key()).unwrap();
        let opened = eve
            .open(&sealed.ciphertext, &alice.public_key(), &sealed.nonce)
            .unwrap();
        assert_eq!(opened, None);
    }

    #[test]
    fn test_open_with_wrong_sender_is_soft_failure() {
        let alice = PrivateKeyX25519::generate();
        let bob = PrivateKeyX25519::generate();
        let mallory = PrivateKeyX25519::generate();

        let sealed = alice.seal(b"hello", &bob.public_key()).unwrap();
        let opened = bob
            .open(&sealed.ciphertext, &mallory.public_key(), &sealed.nonce)
            .unwrap();
        assert!(opened.is_none());
    }

    #[test]
    fn test_open_rejects_bad_nonce_length() {
        let alice = PrivateKeyX25519::generate();
        let bob = PrivateKeyX25519::generate();
        let sealed = alice.seal(b"hello", &bob.public_key()).unwrap();
        assert_eq!(
            bob.open(&sealed.ciphertext, &alice.public_key(), &sealed.nonce[..12]),
            Err(BoxError::InvalidNonceLength {
                expected: 24,
                got: 12
            })
        );
    }

    #[test]
    fn test_seal_draws_fresh_nonces() {
        let alice = PrivateKeyX25519::generate();
        let bob = PrivateKeyX25519::generate();
        let first = alice.seal(b"same", &bob.public_key()).unwrap();
        let second = alice.seal(b"same", &bob.public_key()).unwrap();
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_tampered_ciphertext_is_soft_failure() {
        let alice = PrivateKeyX25519::generate();
        let bob = PrivateKeyX25519::generate();
        let mut sealed = alice.seal(b"integrity", &bob.public_key()).unwrap();
        sealed.ciphertext[0] ^= 0x01;
        assert_eq!(
            bob.open(&sealed.ciphertext, &alice.public_key(), &sealed.nonce),
            Ok(None)
        );
    }
}
