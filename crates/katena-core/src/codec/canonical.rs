//! Signing bytes.
//!
//! The signed message is the compact JSON text of
//! `{"chain_id":..,"data":{"type":..,"value":{..}},"nonce_time":..}`.
//! Member order is fixed by the struct below and by each payload's field
//! declaration order; the network rebuilds the same bytes to check the
//! signature.

use serde::{Serialize, Serializer};

use crate::errors::EncodeError;
use crate::txdata::TxData;

#[derive(Serialize)]
struct SigningDocument<'a> {
    chain_id: &'a str,
    data: CanonicalTxData<'a>,
    nonce_time: &'a str,
}

struct CanonicalTxData<'a>(&'a TxData);

impl Serialize for CanonicalTxData<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_canonical(serializer)
    }
}

/// Canonical bytes signed for `data` on `chain_id` at `nonce_time`.
pub fn signing_bytes(
    chain_id: &str,
    nonce_time: &str,
    data: &TxData,
) -> Result<Vec<u8>, EncodeError> {
    let document = SigningDocument {
        chain_id,
        data: CanonicalTxData(data),
        nonce_time,
    };
    Ok(serde_json::to_vec(&document)?)
}
