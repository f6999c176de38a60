//! Katena client SDK.
//!
//! This crate implements:
//! - Typed transaction payloads and the static type tag registry
//! - Canonical signing bytes and the `{type, value}` wire codec
//! - Signed transaction envelopes
//! - API handler, transactor and transport abstraction
//! - Client configuration

#![forbid(unsafe_code)]

// Payloads and codec
pub mod codec;
pub mod txdata;
pub mod tx;

// API facade
pub mod api;
pub mod handler;
pub mod transactor;
pub mod transport;

// Supporting modules
pub mod clock;
pub mod config;
pub mod errors;
pub mod fqid;
pub mod testing;

// Optional transport implementations
#[cfg(feature = "http")]
pub mod http_transport;

#[cfg(test)]
mod proptests;

pub use api::{SendTxResult, TxResult, TxResults, TxStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ClientConfig;
pub use errors::{ClientError, ConfigError, DecodeError, EncodeError, TransportError, TxError};
pub use handler::Handler;
pub use transactor::Transactor;
pub use transport::{ApiRequest, Pagination, RawResponse, Transport};
pub use tx::{SignerIdentity, SignerIdentityKind, Tx, TxSigner};
pub use txdata::{TxData, TxDataVariant};

#[cfg(feature = "http")]
pub use http_transport::HttpTransport;
