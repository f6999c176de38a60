//! High-level client: builds, signs and submits payloads, and reads them
//! back by company and local id.

use katena_crypto::{PublicKeyEd25519, PublicKeyX25519};
use tracing::info;

use crate::api::{SendTxResult, TxResult, TxResults};
use crate::clock::{Clock, SystemClock};
use crate::errors::ClientError;
use crate::fqid::concat_fqid;
use crate::handler::Handler;
use crate::transport::{Pagination, Transport};
use crate::tx::{SignerIdentityKind, Tx, TxSigner};
use crate::txdata::{
    CertificateEd25519V1, CertificateRawV1, KeyCreateV1, KeyRevokeV1, KeyRotateV1, KeyV1,
    SecretNaclBoxV1, TxData,
};

pub struct Transactor<T, C = SystemClock> {
    handler: Handler<T>,
    chain_id: String,
    tx_signer: Option<TxSigner>,
    signer_identity: SignerIdentityKind,
    clock: C,
}

impl<T: Transport> Transactor<T, SystemClock> {
    /// Transactor using the wall clock. Without a signer only the
    /// retrieve helpers work.
    pub fn new(transport: T, chain_id: impl Into<String>, tx_signer: Option<TxSigner>) -> Self {
        Self::with_clock(transport, chain_id, tx_signer, SystemClock)
    }
}

#[cfg(feature = "http")]
impl Transactor<crate::http_transport::HttpTransport, SystemClock> {
    /// HTTP transactor configured from a [`ClientConfig`](crate::config::ClientConfig).
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, crate::errors::ConfigError> {
        config.validate()?;
        let transport =
            crate::http_transport::HttpTransport::new(&config.api_url, config.timeout())?;
        Ok(Self::new(transport, config.chain_id.clone(), config.tx_signer()?)
            .with_signer_identity(config.signer_identity))
    }
}

impl<T: Transport, C: Clock> Transactor<T, C> {
    pub fn with_clock(
        transport: T,
        chain_id: impl Into<String>,
        tx_signer: Option<TxSigner>,
        clock: C,
    ) -> Self {
        Self {
            handler: Handler::new(transport),
            chain_id: chain_id.into(),
            tx_signer,
            signer_identity: SignerIdentityKind::default(),
            clock,
        }
    }

    /// Choose how envelopes name their signer. Defaults to the fqid.
    pub fn with_signer_identity(mut self, kind: SignerIdentityKind) -> Self {
        self.signer_identity = kind;
        self
    }

    pub fn handler(&self) -> &Handler<T> {
        &self.handler
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn tx_signer(&self) -> Option<&TxSigner> {
        self.tx_signer.as_ref()
    }

    /// Sign `data` without sending it.
    pub fn build_tx(&self, data: TxData) -> Result<Tx, ClientError> {
        let signer = self.tx_signer.as_ref().ok_or(ClientError::MissingSigner)?;
        let tx = Tx::build_and_sign(
            data,
            &self.chain_id,
            signer.identity(self.signer_identity),
            signer.private_key(),
            &self.clock,
        )?;
        Ok(tx)
    }

    pub async fn send_tx_data(&self, data: TxData) -> Result<SendTxResult, ClientError> {
        let tx = self.build_tx(data)?;
        let result = self.handler.send_tx(&tx).await?;
        info!(
            tx_type = tx.data().type_tag(),
            hash = %result.hash,
            code = result.status.code,
            "tx submitted"
        );
        Ok(result)
    }

    pub async fn send_certificate_raw_v1(
        &self,
        id: &str,
        value: Vec<u8>,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(CertificateRawV1::new(id, value).into())
            .await
    }

    pub async fn send_certificate_ed25519_v1(
        &self,
        id: &str,
        signer: PublicKeyEd25519,
        signature: Vec<u8>,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(CertificateEd25519V1::new(id, signer, signature).into())
            .await
    }

    pub async fn send_secret_nacl_box_v1(
        &self,
        id: &str,
        sender: PublicKeyX25519,
        nonce: Vec<u8>,
        content: Vec<u8>,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(SecretNaclBoxV1::new(id, sender, nonce, content).into())
            .await
    }

    pub async fn send_key_create_v1(
        &self,
        id: &str,
        public_key: PublicKeyEd25519,
        role: &str,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(KeyCreateV1::new(id, public_key, role).into())
            .await
    }

    pub async fn send_key_rotate_v1(
        &self,
        id: &str,
        public_key: PublicKeyEd25519,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(KeyRotateV1::new(id, public_key).into())
            .await
    }

    pub async fn send_key_revoke_v1(&self, id: &str) -> Result<SendTxResult, ClientError> {
        self.send_tx_data(KeyRevokeV1::new(id).into()).await
    }

    pub async fn retrieve_last_certificate_tx(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        self.handler
            .retrieve_last_certificate(&concat_fqid(company_bcid, id))
            .await
    }

    pub async fn retrieve_certificate_txs(
        &self,
        company_bcid: &str,
        id: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.handler
            .retrieve_certificates(&concat_fqid(company_bcid, id), pagination)
            .await
    }

    pub async fn retrieve_secret_txs(
        &self,
        company_bcid: &str,
        id: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.handler
            .retrieve_secrets(&concat_fqid(company_bcid, id), pagination)
            .await
    }

    pub async fn retrieve_last_key_tx(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        self.handler
            .retrieve_last_key(&concat_fqid(company_bcid, id))
            .await
    }

    pub async fn retrieve_key_txs(
        &self,
        company_bcid: &str,
        id: &str,
        pagination: Pagination,
    ) -> Result<TxResults, ClientError> {
        self.handler
            .retrieve_key_txs(&concat_fqid(company_bcid, id), pagination)
            .await
    }

    pub async fn retrieve_key(&self, company_bcid: &str, id: &str) -> Result<KeyV1, ClientError> {
        self.handler.retrieve_key(&concat_fqid(company_bcid, id)).await
    }

    pub async fn retrieve_company_keys(
        &self,
        company_bcid: &str,
        pagination: Pagination,
    ) -> Result<Vec<KeyV1>, ClientError> {
        self.handler
            .retrieve_company_keys(company_bcid, pagination)
            .await
    }
}
