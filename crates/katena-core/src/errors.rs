//! Error types for the Katena client.
//!
//! Codec and signing errors are raised to the immediate caller. The two
//! designed soft failures are not errors: unknown payload types decode to
//! [`TxData::Unknown`](crate::txdata::TxData::Unknown) and failed box
//! authentication returns `Ok(None)`.

use katena_crypto::encoding::DecodeError as Base64Error;
use katena_crypto::KeyError;
use thiserror::Error;

/// Tag used in decode errors for envelope-level fields.
pub const TX_TAG: &str = "tx";

/// Wire decode failures. Each variant names the payload tag (or
/// [`TX_TAG`]) and, when known, the offending field.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input is not valid JSON or does not have the envelope shape
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload `value` is not a JSON object
    #[error("{tag}: malformed payload: {source}")]
    Malformed {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// Required field absent
    #[error("{tag}: missing field `{field}`")]
    MissingField { tag: String, field: &'static str },

    /// Field present with the wrong JSON type
    #[error("{tag}: field `{field}` must be a {expected}")]
    WrongType {
        tag: String,
        field: &'static str,
        expected: &'static str,
    },

    /// Byte field is not valid base64
    #[error("{tag}: invalid base64 in field `{field}`: {source}")]
    InvalidBase64 {
        tag: String,
        field: &'static str,
        #[source]
        source: Base64Error,
    },

    /// Key field decoded but is not a valid key
    #[error("{tag}: invalid key in field `{field}`: {source}")]
    InvalidKey {
        tag: String,
        field: &'static str,
        #[source]
        source: KeyError,
    },

    /// Envelope carries both `signer` and `signer_fqid`
    #[error("tx: both `signer` and `signer_fqid` are present")]
    AmbiguousSigner,
}

/// Wire encode failures.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Envelope signing and verification errors.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("signature check failed: {0}")]
    Key(#[from] KeyError),

    /// Envelope identifies its signer by fqid, so no key is embedded
    #[error("envelope signer is an fqid, not a public key")]
    SignerNotAKey,
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Scripted transport ran out of responses
    #[error("no response available")]
    NoResponse,
}

/// Errors surfaced by the API handler and transactor.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Application-level error reported by the API
    #[error("api error:\n  Code: {code}\n  Message: {message}")]
    Api { code: i64, message: String },

    /// Unexpected status with a body that is not an API error document
    #[error("unexpected response: status={status} body={body:?}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Send operation on a transactor built without a signer
    #[error("transactor has no tx signer")]
    MissingSigner,
}

impl ClientError {
    /// Code reported by the API, if this is an application error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("invalid signer key: {0}")]
    Key(#[from] KeyError),

    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
}
