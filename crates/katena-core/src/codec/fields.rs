//! Typed access to the fields of a payload `value` object.

use katena_crypto::encoding::from_base64;
use katena_crypto::KeyError;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::errors::DecodeError;

/// Reader over one payload's `value` object. Every accessor reports
/// failures with the payload tag and field name.
#[derive(Debug)]
pub struct FieldReader<'a> {
    tag: &'a str,
    fields: Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    pub fn parse(tag: &'a str, value: &RawValue) -> Result<Self, DecodeError> {
        let fields = serde_json::from_str(value.get()).map_err(|source| DecodeError::Malformed {
            tag: tag.to_string(),
            source,
        })?;
        Ok(Self { tag, fields })
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Required string field. `null` counts as missing.
    pub fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(DecodeError::MissingField {
                tag: self.tag.to_string(),
                field,
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(DecodeError::WrongType {
                tag: self.tag.to_string(),
                field,
                expected: "string",
            }),
        }
    }

    /// Required base64 byte field.
    pub fn bytes(&self, field: &'static str) -> Result<Vec<u8>, DecodeError> {
        let encoded = self.string(field)?;
        from_base64(&encoded).map_err(|source| DecodeError::InvalidBase64 {
            tag: self.tag.to_string(),
            field,
            source,
        })
    }

    /// Required base64 key field, validated by `parse`.
    pub fn key<K>(
        &self,
        field: &'static str,
        parse: fn(&[u8]) -> Result<K, KeyError>,
    ) -> Result<K, DecodeError> {
        let bytes = self.bytes(field)?;
        parse(&bytes).map_err(|source| DecodeError::InvalidKey {
            tag: self.tag.to_string(),
            field,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katena_crypto::PublicKeyEd25519;

    fn reader(json: &str) -> FieldReader<'static> {
        let raw = RawValue::from_string(json.to_string()).unwrap();
        FieldReader::parse("test.tag.v1", &raw).unwrap()
    }

    #[test]
    fn test_non_object_is_malformed() {
        let raw = RawValue::from_string("[1,2]".to_string()).unwrap();
        let err = FieldReader::parse("test.tag.v1", &raw).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn test_missing_and_null_fields() {
        let fields = reader(r#"{"a":null}"#);
        assert!(matches!(
            fields.string("a"),
            Err(DecodeError::MissingField { field: "a", .. })
        ));
        assert!(matches!(
            fields.string("b"),
            Err(DecodeError::MissingField { field: "b", .. })
        ));
    }

    #[test]
    fn test_wrong_type() {
        let fields = reader(r#"{"id":42}"#);
        assert!(matches!(
            fields.string("id"),
            Err(DecodeError::WrongType {
                field: "id",
                expected: "string",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_base64_names_field() {
        let fields = reader(r#"{"value":"not base64!"}"#);
        let err = fields.bytes("value").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64 { field: "value", .. }));
        assert!(err.to_string().contains("test.tag.v1"));
    }

    #[test]
    fn test_key_length_checked() {
        let fields = reader(r#"{"signer":"AAAA"}"#);
        let err = fields
            .key("signer", PublicKeyEd25519::from_bytes)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidKey {
                field: "signer",
                source: KeyError::InvalidKeyLength { expected: 32, got: 3 },
                ..
            }
        ));
    }
}
