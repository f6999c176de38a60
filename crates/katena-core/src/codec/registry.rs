//! Static type tag -> codec table.
//!
//! The table is built at compile time; a duplicated tag fails the build.

use serde_json::value::RawValue;

use super::fields::FieldReader;
use crate::errors::DecodeError;
use crate::txdata::{
    CertificateEd25519V1, CertificateRawV1, KeyCreateV1, KeyRevokeV1, KeyRotateV1,
    SecretNaclBoxV1, TxData, TxDataVariant,
};

/// Decode entry for one registered payload type. Encoding goes through
/// [`TxDataVariant::encode_fields`].
#[derive(Clone, Copy)]
pub struct VariantCodec {
    pub tag: &'static str,
    pub namespace: &'static str,
    decode_fn: fn(&RawValue) -> Result<TxData, DecodeError>,
}

impl VariantCodec {
    const fn of<T: TxDataVariant>() -> Self {
        Self {
            tag: T::TYPE,
            namespace: T::NAMESPACE,
            decode_fn: decode_variant::<T>,
        }
    }

    /// Decode a `value` object into this codec's variant.
    pub fn decode(&self, value: &RawValue) -> Result<TxData, DecodeError> {
        (self.decode_fn)(value)
    }
}

impl std::fmt::Debug for VariantCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantCodec")
            .field("tag", &self.tag)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

fn decode_variant<T: TxDataVariant>(value: &RawValue) -> Result<TxData, DecodeError> {
    let fields = FieldReader::parse(T::TYPE, value)?;
    Ok(T::decode_fields(&fields)?.into())
}

const CODECS: [VariantCodec; 6] = [
    VariantCodec::of::<CertificateRawV1>(),
    VariantCodec::of::<CertificateEd25519V1>(),
    VariantCodec::of::<SecretNaclBoxV1>(),
    VariantCodec::of::<KeyCreateV1>(),
    VariantCodec::of::<KeyRotateV1>(),
    VariantCodec::of::<KeyRevokeV1>(),
];

const _: () = assert!(tags_are_unique(&CODECS), "duplicate tx data type tag");

static REGISTRY: [VariantCodec; 6] = CODECS;

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn tags_are_unique(codecs: &[VariantCodec]) -> bool {
    let mut i = 0;
    while i < codecs.len() {
        let mut j = i + 1;
        while j < codecs.len() {
            if str_eq(codecs[i].tag, codecs[j].tag) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Codec registered for `tag`, or `None` for unknown types.
pub fn lookup(tag: &str) -> Option<&'static VariantCodec> {
    REGISTRY.iter().find(|codec| codec.tag == tag)
}

pub fn registered_tags() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|codec| codec.tag)
}
