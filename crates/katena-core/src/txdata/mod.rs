//! Transaction payload variants.
//!
//! Every known payload implements [`TxDataVariant`] and has a matching arm
//! in [`TxData`]. Payloads with a type tag this build does not know are
//! carried as [`UnknownTxData`] and re-encode to the bytes they were read
//! from.

use std::collections::BTreeMap;

use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::codec::fields::FieldReader;
use crate::codec::{registry, RawTxData};
use crate::errors::{DecodeError, EncodeError};
use crate::fqid::concat_fqid;

pub mod account;
pub mod certify;
pub mod unknown;

pub use account::{KeyCreateV1, KeyRevokeV1, KeyRotateV1, KeyV1};
pub use certify::{CertificateEd25519V1, CertificateRawV1, SecretNaclBoxV1};
pub use unknown::UnknownTxData;

/// Logical state category -> fqid of the state a payload affects.
pub type StateIds = BTreeMap<&'static str, String>;

/// Capability interface shared by all known payloads.
///
/// `Serialize` must emit the payload's `value` object with fields in the
/// canonical order, which is the struct's declaration order.
pub trait TxDataVariant: Serialize + Sized + Into<TxData> {
    /// Wire discriminator, `<namespace>.<subtype>.<version>`.
    const TYPE: &'static str;
    /// Top-level category, used for routing and logging.
    const NAMESPACE: &'static str;
    /// State category written by this payload.
    const STATE_KEY: &'static str;

    /// Local (company-scoped) id carried by the payload.
    fn id(&self) -> &str;

    /// Rebuild the payload from its decoded `value` fields.
    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError>;

    fn type_tag(&self) -> &'static str {
        Self::TYPE
    }

    fn namespace(&self) -> &'static str {
        Self::NAMESPACE
    }

    fn state_ids(&self, signer_company_bcid: &str) -> StateIds {
        StateIds::from([(Self::STATE_KEY, concat_fqid(signer_company_bcid, self.id()))])
    }

    /// The `value` object as compact JSON.
    fn encode_fields(&self) -> Result<Box<RawValue>, EncodeError> {
        Ok(serde_json::value::to_raw_value(self)?)
    }
}

/// Tagged union over every payload kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Box<RawValue>")]
pub enum TxData {
    CertificateRawV1(CertificateRawV1),
    CertificateEd25519V1(CertificateEd25519V1),
    SecretNaclBoxV1(SecretNaclBoxV1),
    KeyCreateV1(KeyCreateV1),
    KeyRotateV1(KeyRotateV1),
    KeyRevokeV1(KeyRevokeV1),
    Unknown(UnknownTxData),
}

impl TxData {
    pub fn type_tag(&self) -> &str {
        match self {
            TxData::CertificateRawV1(v) => v.type_tag(),
            TxData::CertificateEd25519V1(v) => v.type_tag(),
            TxData::SecretNaclBoxV1(v) => v.type_tag(),
            TxData::KeyCreateV1(v) => v.type_tag(),
            TxData::KeyRotateV1(v) => v.type_tag(),
            TxData::KeyRevokeV1(v) => v.type_tag(),
            TxData::Unknown(v) => v.type_tag(),
        }
    }

    /// Top-level category. For unknown payloads this is the first dotted
    /// segment of the tag.
    pub fn namespace(&self) -> &str {
        match self {
            TxData::CertificateRawV1(v) => v.namespace(),
            TxData::CertificateEd25519V1(v) => v.namespace(),
            TxData::SecretNaclBoxV1(v) => v.namespace(),
            TxData::KeyCreateV1(v) => v.namespace(),
            TxData::KeyRotateV1(v) => v.namespace(),
            TxData::KeyRevokeV1(v) => v.namespace(),
            TxData::Unknown(v) => v.namespace(),
        }
    }

    /// State ids touched by this payload. Empty for unknown payloads.
    pub fn state_ids(&self, signer_company_bcid: &str) -> StateIds {
        match self {
            TxData::CertificateRawV1(v) => v.state_ids(signer_company_bcid),
            TxData::CertificateEd25519V1(v) => v.state_ids(signer_company_bcid),
            TxData::SecretNaclBoxV1(v) => v.state_ids(signer_company_bcid),
            TxData::KeyCreateV1(v) => v.state_ids(signer_company_bcid),
            TxData::KeyRotateV1(v) => v.state_ids(signer_company_bcid),
            TxData::KeyRevokeV1(v) => v.state_ids(signer_company_bcid),
            TxData::Unknown(_) => StateIds::new(),
        }
    }

    /// The `value` object as compact JSON.
    pub fn encode_fields(&self) -> Result<Box<RawValue>, EncodeError> {
        match self {
            TxData::CertificateRawV1(v) => v.encode_fields(),
            TxData::CertificateEd25519V1(v) => v.encode_fields(),
            TxData::SecretNaclBoxV1(v) => v.encode_fields(),
            TxData::KeyCreateV1(v) => v.encode_fields(),
            TxData::KeyRotateV1(v) => v.encode_fields(),
            TxData::KeyRevokeV1(v) => v.encode_fields(),
            TxData::Unknown(v) => Ok(v.compact_value()?),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TxData::Unknown(_))
    }

    /// Dispatch a `{type, value}` pair through the registry, falling back
    /// to [`UnknownTxData`] for unregistered tags.
    pub(crate) fn from_raw(raw: RawTxData) -> Result<Self, DecodeError> {
        match registry::lookup(&raw.type_tag) {
            Some(codec) => codec.decode(&raw.value),
            None => Ok(TxData::Unknown(UnknownTxData::new(raw.type_tag, raw.value))),
        }
    }

    /// `{"type":..,"value":{..}}` as compact JSON, the form that gets
    /// signed. Unknown payloads use their compacted `value`.
    pub(crate) fn serialize_canonical<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TxData", 2)?;
        state.serialize_field("type", self.type_tag())?;
        match self {
            TxData::CertificateRawV1(v) => state.serialize_field("value", v)?,
            TxData::CertificateEd25519V1(v) => state.serialize_field("value", v)?,
            TxData::SecretNaclBoxV1(v) => state.serialize_field("value", v)?,
            TxData::KeyCreateV1(v) => state.serialize_field("value", v)?,
            TxData::KeyRotateV1(v) => state.serialize_field("value", v)?,
            TxData::KeyRevokeV1(v) => state.serialize_field("value", v)?,
            TxData::Unknown(v) => {
                let value = v.compact_value().map_err(S::Error::custom)?;
                state.serialize_field("value", &value)?
            }
        }
        state.end()
    }
}

/// Decodes from the full `{type, value}` text so unknown payloads can
/// keep it verbatim.
impl TryFrom<Box<RawValue>> for TxData {
    type Error = DecodeError;

    fn try_from(document: Box<RawValue>) -> Result<Self, Self::Error> {
        let raw: RawTxData = serde_json::from_str(document.get())?;
        Ok(match TxData::from_raw(raw)? {
            TxData::Unknown(unknown) => TxData::Unknown(unknown.with_document(document)),
            known => known,
        })
    }
}

/// Known payloads serialize canonically. Unknown payloads decoded from the
/// wire serialize as the exact text they were read from.
impl Serialize for TxData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let TxData::Unknown(unknown) = self {
            if let Some(document) = unknown.document() {
                return document.serialize(serializer);
            }
        }
        self.serialize_canonical(serializer)
    }
}

macro_rules! impl_into_tx_data {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for TxData {
                fn from(v: $variant) -> Self {
                    TxData::$variant(v)
                }
            }
        )*
    };
}

impl_into_tx_data!(
    CertificateRawV1,
    CertificateEd25519V1,
    SecretNaclBoxV1,
    KeyCreateV1,
    KeyRotateV1,
    KeyRevokeV1,
);

impl From<UnknownTxData> for TxData {
    fn from(v: UnknownTxData) -> Self {
        TxData::Unknown(v)
    }
}

/// `serialize_with` helper: byte fields travel as base64 strings.
pub(crate) fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&katena_crypto::encoding::to_base64(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use katena_crypto::PublicKeyEd25519;

    #[test]
    fn test_serialize_is_type_then_value() {
        let data: TxData = CertificateRawV1::new("abc", b"raw".to_vec()).into();
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"type":"certify.certificate.raw.v1","value":{"id":"abc","value":"cmF3"}}"#
        );
    }

    #[test]
    fn test_namespaces() {
        let cert: TxData = CertificateRawV1::new("a", vec![]).into();
        let key: TxData = KeyRevokeV1::new("a").into();
        assert_eq!(cert.namespace(), "certify");
        assert_eq!(key.namespace(), "account");
    }

    #[test]
    fn test_state_ids_use_signer_company() {
        let key = PublicKeyEd25519::from_bytes(&[3u8; 32]).unwrap();
        let data: TxData = KeyCreateV1::new("key-1", key, account::DEFAULT_ROLE_ID).into();
        let ids = data.state_ids("abcdef");
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.get("account.key").map(String::as_str), Some("abcdef-key-1"));
    }

    #[test]
    fn test_encode_fields_matches_serialized_value() {
        let data: TxData = KeyRevokeV1::new("k").into();
        assert_eq!(data.encode_fields().unwrap().get(), r#"{"id":"k"}"#);
    }
}
