//! `certify` namespace: certificates and encrypted secrets.

use katena_crypto::{PublicKeyEd25519, PublicKeyX25519, SealedBox};
use serde::Serialize;

use super::{serialize_base64, TxDataVariant};
use crate::codec::fields::FieldReader;
use crate::errors::DecodeError;

pub const NAMESPACE: &str = "certify";
pub const CERTIFICATE_STATE_KEY: &str = "certify.certificate";
pub const SECRET_STATE_KEY: &str = "certify.secret";

/// Opaque certificate bytes anchored on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRawV1 {
    id: String,
    #[serde(serialize_with = "serialize_base64")]
    value: Vec<u8>,
}

impl CertificateRawV1 {
    pub fn new(id: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl TxDataVariant for CertificateRawV1 {
    const TYPE: &'static str = "certify.certificate.raw.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = CERTIFICATE_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
            value: fields.bytes("value")?,
        })
    }
}

/// Certificate made of an Ed25519 signature and the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateEd25519V1 {
    id: String,
    signer: PublicKeyEd25519,
    #[serde(serialize_with = "serialize_base64")]
    signature: Vec<u8>,
}

impl CertificateEd25519V1 {
    pub fn new(id: impl Into<String>, signer: PublicKeyEd25519, signature: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            signer,
            signature,
        }
    }

    pub fn signer(&self) -> &PublicKeyEd25519 {
        &self.signer
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl TxDataVariant for CertificateEd25519V1 {
    const TYPE: &'static str = "certify.certificate.ed25519.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = CERTIFICATE_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
            signer: fields.key("signer", PublicKeyEd25519::from_bytes)?,
            signature: fields.bytes("signature")?,
        })
    }
}

/// Secret sealed in a NaCl box by `sender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretNaclBoxV1 {
    id: String,
    sender: PublicKeyX25519,
    #[serde(serialize_with = "serialize_base64")]
    nonce: Vec<u8>,
    #[serde(serialize_with = "serialize_base64")]
    content: Vec<u8>,
}

impl SecretNaclBoxV1 {
    pub fn new(
        id: impl Into<String>,
        sender: PublicKeyX25519,
        nonce: Vec<u8>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            nonce,
            content,
        }
    }

    /// Wrap the output of [`katena_crypto::PrivateKeyX25519::seal`].
    pub fn from_sealed(id: impl Into<String>, sender: PublicKeyX25519, sealed: SealedBox) -> Self {
        Self::new(id, sender, sealed.nonce.to_vec(), sealed.ciphertext)
    }

    pub fn sender(&self) -> &PublicKeyX25519 {
        &self.sender
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl TxDataVariant for SecretNaclBoxV1 {
    const TYPE: &'static str = "certify.secret.nacl_box.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = SECRET_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
            sender: fields.key("sender", PublicKeyX25519::from_bytes)?,
            nonce: fields.bytes("nonce")?,
            content: fields.bytes("content")?,
        })
    }
}
