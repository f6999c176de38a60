//! Key wrappers and signature scheme adapter for the Katena client SDK.
//!
//! - [`ed25519`]: signing keys, detached signatures and verification
//! - [`nacl`]: X25519 encryption keys and NaCl box seal/open
//! - [`encoding`]: base64 as used on the wire

#![forbid(unsafe_code)]

pub mod encoding;
pub mod keys;
pub mod utils;

pub mod ed25519;
pub mod nacl;

#[cfg(test)]
mod proptests;

pub use ed25519::{verify_signature, PrivateKeyEd25519, PublicKeyEd25519};
pub use keys::KeyError;
pub use nacl::{BoxError, PrivateKeyX25519, PublicKeyX25519, SealedBox};
