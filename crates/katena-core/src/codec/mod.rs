//! Wire codec for payloads and envelopes.
//!
//! - [`canonical`]: the exact bytes that get signed
//! - [`registry`]: type tag dispatch
//! - [`fields`]: field-level decoding with tag/field aware errors

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::errors::{DecodeError, EncodeError};
use crate::tx::{Tx, TxWire};
use crate::txdata::TxData;

pub mod canonical;
pub mod fields;
pub mod registry;

pub use canonical::signing_bytes;

/// `{type, value}` as read from the wire, before dispatch.
#[derive(Debug, Deserialize)]
pub struct RawTxData {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: Box<RawValue>,
}

pub fn encode_tx_data(data: &TxData) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(data)?)
}

/// Decode a `{type, value}` document. Unregistered tags yield
/// [`TxData::Unknown`].
pub fn decode_tx_data(json: &str) -> Result<TxData, DecodeError> {
    let document: Box<RawValue> = serde_json::from_str(json)?;
    TxData::try_from(document)
}

pub fn encode_tx(tx: &Tx) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(tx)?)
}

/// Decode an envelope. Exactly one of `signer` and `signer_fqid` must be
/// present.
pub fn decode_tx(json: &str) -> Result<Tx, DecodeError> {
    let wire: TxWire = serde_json::from_str(json)?;
    Tx::try_from(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txdata::{CertificateRawV1, KeyRevokeV1};

    #[test]
    fn test_known_tag_decodes_to_variant() {
        let json = r#"{"type":"certify.certificate.raw.v1","value":{"id":"x","value":"AQI="}}"#;
        assert_eq!(
            decode_tx_data(json).unwrap(),
            CertificateRawV1::new("x", vec![1, 2]).into()
        );
    }

    #[test]
    fn test_unknown_tag_round_trips_verbatim() {
        let json = r#"{"type":"future.widget.v3","value":{"z":[1,2,{"k":null}],"a":"é"}}"#;
        let data = decode_tx_data(json).unwrap();
        assert!(data.is_unknown());
        assert_eq!(data.type_tag(), "future.widget.v3");
        assert_eq!(encode_tx_data(&data).unwrap(), json);
    }

    #[test]
    fn test_unknown_tag_keeps_member_order_and_whitespace() {
        for json in [
            r#"{"value":{"a":1},"type":"future.widget.v3"}"#,
            "{ \"type\" : \"future.widget.v3\",\n  \"value\": { \"a\": 1 } }",
        ] {
            let data = decode_tx_data(json).unwrap();
            assert!(data.is_unknown());
            assert_eq!(encode_tx_data(&data).unwrap(), json);
            assert_eq!(data.encode_fields().unwrap().get(), r#"{"a":1}"#);
        }
    }

    #[test]
    fn test_unknown_tag_without_value_is_error() {
        let err = decode_tx_data(r#"{"type":"future.widget.v3"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_missing_field_is_not_defaulted() {
        let err = decode_tx_data(r#"{"type":"certify.certificate.raw.v1","value":{"id":"x"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingField { ref tag, field: "value" } if tag == "certify.certificate.raw.v1"
        ));
    }

    #[test]
    fn test_nested_decode_keeps_message() {
        // Inside larger documents the error travels as a serde message.
        let json = r#"[{"type":"certify.certificate.raw.v1","value":{"id":"x","value":"%%"}}]"#;
        let err = serde_json::from_str::<Vec<TxData>>(json).unwrap_err();
        assert!(err.to_string().contains("invalid base64 in field `value`"));
    }

    #[test]
    fn test_encode_decode_known() {
        let data: TxData = KeyRevokeV1::new("k").into();
        let json = encode_tx_data(&data).unwrap();
        assert_eq!(json, r#"{"type":"account.key.revoke.v1","value":{"id":"k"}}"#);
        assert_eq!(decode_tx_data(&json).unwrap(), data);
    }
}
