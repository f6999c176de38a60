//! Typed wrappers over the Katena API routes.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{ApiErrorBody, SendTxResult, TxResult, TxResults};
use crate::codec::encode_tx;
use crate::errors::{ClientError, DecodeError};
use crate::transport::{ApiRequest, Pagination, Transport};
use crate::tx::Tx;
use crate::txdata::KeyV1;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ACCEPTED: u16 = 202;

pub const TXS_PATH: &str = "txs";
pub const CERTIFICATES_PATH: &str = "certificates";
pub const SECRETS_PATH: &str = "secrets";
pub const KEYS_PATH: &str = "keys";
pub const COMPANIES_PATH: &str = "companies";
pub const LAST_PATH: &str = "last";

/// Maps API routes to typed requests and responses. Submissions must
/// answer `202 Accepted`, reads `200 OK`; anything else is an error.
#[derive(Debug, Clone)]
pub struct Handler<T> {
    transport: T,
}

impl<T: Transport> Handler<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send_tx(&self, tx: &Tx) -> Result<SendTxResult, ClientError> {
        let body = encode_tx(tx)?;
        debug!(
            tx_type = tx.data().type_tag(),
            nonce_time = tx.nonce_time(),
            signature = %short_hex(tx.signature()),
            "submitting tx"
        );
        self.fetch(ApiRequest::post([TXS_PATH], body), STATUS_ACCEPTED)
            .await
    }

    pub async fn retrieve_last_certificate(&self, fqid: &str) -> Result<TxResult, ClientError> {
        self.fetch(ApiRequest::get([CERTIFICATES_PATH, fqid, LAST_PATH]), STATUS_OK).await
    }

    pub async fn retrieve_certificates(
        &self,
        fqid: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.fetch(
            ApiRequest::get([CERTIFICATES_PATH, fqid]).with_pagination(pagination),
            STATUS_OK,
        )
        .await
    }

    pub async fn retrieve_secrets(
        &self,
        fqid: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.fetch(
            ApiRequest::get([SECRETS_PATH, fqid]).with_pagination(pagination),
            STATUS_OK,
        )
        .await
    }

    pub async fn retrieve_last_key(&self, fqid: &str) -> Result<TxResult, ClientError> {
        self.fetch(ApiRequest::get([KEYS_PATH, fqid, LAST_PATH]), STATUS_OK).await
    }

    pub async fn retrieve_key_txs(
        &self,
        fqid: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.fetch(
            ApiRequest::get([KEYS_PATH, fqid, TXS_PATH]).with_pagination(pagination),
            STATUS_OK,
        )
        .await
    }

    /// Current key state.
    pub async fn retrieve_key(&self, fqid: &str) -> Result<KeyV1, ClientError> {
        self.fetch(ApiRequest::get([KEYS_PATH, fqid]), STATUS_OK).await
    }

    pub async fn retrieve_company_keys(
        &self,
        company_bcid: &str,
        pagination: Pagination,
    ) -> Result<Vec<KeyV1>, ClientError> {
        self.fetch(
            ApiRequest::get([COMPANIES_PATH, company_bcid, KEYS_PATH]).with_pagination(pagination),
            STATUS_OK,
        )
        .await
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        expected: u16,
    ) -> Result<R, ClientError> {
        let method = request.method.as_str();
        let route = request.route();
        debug!(method, route = %route, "api request");

        let response = self.transport.execute(request).await?;
        if response.status != expected {
            let err = api_error(response.status, response.body);
            warn!(method, route = %route, error = %err, "api request failed");
            return Err(err);
        }

        debug!(method, route = %route, status = response.status, "api response");
        let decoded = serde_json::from_str(&response.body).map_err(DecodeError::Json)?;
        Ok(decoded)
    }
}

/// Interpret a non-success answer. Bodies that are not `{code, message}`
/// documents are reported verbatim.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(ApiErrorBody { code, message }) => ClientError::Api { code, message },
        Err(_) => ClientError::UnexpectedResponse { status, body },
    }
}

fn short_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(8)])
}
