//! Signed transaction envelope.

use katena_crypto::encoding::{from_base64, to_base64};
use katena_crypto::{PrivateKeyEd25519, PublicKeyEd25519};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::clock::Clock;
use crate::codec::signing_bytes;
use crate::errors::{DecodeError, EncodeError, TxError, TX_TAG};
use crate::fqid::company_of;
use crate::txdata::TxData;

/// How an envelope names its signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerIdentity {
    /// Raw public key, sent as `signer`.
    PublicKey(PublicKeyEd25519),
    /// Company-scoped key id, sent as `signer_fqid`.
    Fqid(String),
}

/// Which [`SignerIdentity`] form a client puts on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerIdentityKind {
    #[default]
    Fqid,
    PublicKey,
}

/// A company key id together with its private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSigner {
    fqid: String,
    private_key: PrivateKeyEd25519,
}

impl TxSigner {
    pub fn new(fqid: impl Into<String>, private_key: PrivateKeyEd25519) -> Self {
        Self {
            fqid: fqid.into(),
            private_key,
        }
    }

    pub fn fqid(&self) -> &str {
        &self.fqid
    }

    pub fn private_key(&self) -> &PrivateKeyEd25519 {
        &self.private_key
    }

    /// Company part of the signer fqid.
    pub fn company_bcid(&self) -> Option<&str> {
        company_of(&self.fqid)
    }

    pub fn identity(&self, kind: SignerIdentityKind) -> SignerIdentity {
        match kind {
            SignerIdentityKind::Fqid => SignerIdentity::Fqid(self.fqid.clone()),
            SignerIdentityKind::PublicKey => SignerIdentity::PublicKey(self.private_key.public_key()),
        }
    }
}

/// A signed transaction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TxWire")]
pub struct Tx {
    nonce_time: String,
    data: TxData,
    signer: SignerIdentity,
    signature: Vec<u8>,
}

impl Tx {
    /// Stamp `data` with the clock's nonce time and sign the canonical
    /// bytes for `chain_id`.
    pub fn build_and_sign(
        data: TxData,
        chain_id: &str,
        signer: SignerIdentity,
        private_key: &PrivateKeyEd25519,
        clock: &dyn Clock,
    ) -> Result<Self, EncodeError> {
        let nonce_time = clock.nonce_time();
        let message = signing_bytes(chain_id, &nonce_time, &data)?;
        let signature = private_key.sign(&message).to_vec();
        Ok(Self {
            nonce_time,
            data,
            signer,
            signature,
        })
    }

    /// Assemble an envelope from parts that were signed elsewhere.
    pub fn from_parts(
        nonce_time: impl Into<String>,
        data: TxData,
        signer: SignerIdentity,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            nonce_time: nonce_time.into(),
            data,
            signer,
            signature,
        }
    }

    pub fn nonce_time(&self) -> &str {
        &self.nonce_time
    }

    pub fn data(&self) -> &TxData {
        &self.data
    }

    pub fn signer(&self) -> &SignerIdentity {
        &self.signer
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The bytes this envelope's signature is expected to cover.
    pub fn signing_bytes(&self, chain_id: &str) -> Result<Vec<u8>, EncodeError> {
        signing_bytes(chain_id, &self.nonce_time, &self.data)
    }

    pub fn verify(&self, chain_id: &str, public_key: &PublicKeyEd25519) -> Result<(), TxError> {
        let message = self.signing_bytes(chain_id)?;
        public_key.verify(&message, &self.signature)?;
        Ok(())
    }

    /// Verify against the public key carried in `signer`.
    pub fn verify_embedded_signer(&self, chain_id: &str) -> Result<(), TxError> {
        match &self.signer {
            SignerIdentity::PublicKey(key) => self.verify(chain_id, key),
            SignerIdentity::Fqid(_) => Err(TxError::SignerNotAKey),
        }
    }
}

impl Serialize for Tx {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tx", 4)?;
        state.serialize_field("nonce_time", &self.nonce_time)?;
        state.serialize_field("data", &self.data)?;
        match &self.signer {
            SignerIdentity::PublicKey(key) => state.serialize_field("signer", &key.to_base64())?,
            SignerIdentity::Fqid(fqid) => state.serialize_field("signer_fqid", fqid)?,
        }
        state.serialize_field("signature", &to_base64(&self.signature))?;
        state.end()
    }
}

/// Envelope as read from the wire, before field validation.
#[derive(Debug, Deserialize)]
pub(crate) struct TxWire {
    nonce_time: String,
    data: Box<RawValue>,
    #[serde(default)]
    signer: Option<String>,
    #[serde(default)]
    signer_fqid: Option<String>,
    signature: String,
}

fn envelope_bytes(field: &'static str, encoded: &str) -> Result<Vec<u8>, DecodeError> {
    from_base64(encoded).map_err(|source| DecodeError::InvalidBase64 {
        tag: TX_TAG.to_string(),
        field,
        source,
    })
}

impl TryFrom<TxWire> for Tx {
    type Error = DecodeError;

    fn try_from(wire: TxWire) -> Result<Self, Self::Error> {
        let signer = match (wire.signer, wire.signer_fqid) {
            (Some(_), Some(_)) => return Err(DecodeError::AmbiguousSigner),
            (None, None) => {
                return Err(DecodeError::MissingField {
                    tag: TX_TAG.to_string(),
                    field: "signer",
                })
            }
            (Some(encoded), None) => {
                let bytes = envelope_bytes("signer", &encoded)?;
                let key = PublicKeyEd25519::from_bytes(&bytes).map_err(|source| {
                    DecodeError::InvalidKey {
                        tag: TX_TAG.to_string(),
                        field: "signer",
                        source,
                    }
                })?;
                SignerIdentity::PublicKey(key)
            }
            (None, Some(fqid)) => SignerIdentity::Fqid(fqid),
        };

        Ok(Self {
            nonce_time: wire.nonce_time,
            data: TxData::try_from(wire.data)?,
            signer,
            signature: envelope_bytes("signature", &wire.signature)?,
        })
    }
}
