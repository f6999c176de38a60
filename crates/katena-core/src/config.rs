//! Client configuration.
//!
//! ```toml
//! api_url = "https://nodes.test.katena.transchain.io/api/v1"
//! chain_id = "katena-chain-test"
//! signer_identity = "fqid"
//!
//! [signer]
//! fqid = "abcdef-admin"
//! private_key = "<base64, 64 bytes>"
//! ```

use std::path::Path;
use std::time::Duration;

use katena_crypto::PrivateKeyEd25519;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::transport::{Pagination, DEFAULT_PER_PAGE};
use crate::tx::{SignerIdentityKind, TxSigner};

pub const ENV_API_URL: &str = "KATENA_API_URL";
pub const ENV_CHAIN_ID: &str = "KATENA_CHAIN_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub chain_id: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub signer_identity: SignerIdentityKind,
    #[serde(default)]
    pub signer: Option<SignerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    pub fqid: String,
    /// Base64 of the 64-byte Ed25519 private key.
    pub private_key: String,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            chain_id: chain_id.into(),
            timeout_seconds: default_timeout_seconds(),
            per_page: default_per_page(),
            signer_identity: SignerIdentityKind::default(),
            signer: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Override `api_url` and `chain_id` from `KATENA_API_URL` and
    /// `KATENA_CHAIN_ID` when set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(api_url) = lookup(ENV_API_URL) {
            self.api_url = api_url;
        }
        if let Some(chain_id) = lookup(ENV_CHAIN_ID) {
            self.chain_id = chain_id;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::Validation("api_url must not be empty".to_string()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api_url must be an http(s) url: {}",
                self.api_url
            )));
        }
        if self.chain_id.is_empty() {
            return Err(ConfigError::Validation("chain_id must not be empty".to_string()));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Validation("timeout_seconds must be > 0".to_string()));
        }
        if self.per_page == 0 {
            return Err(ConfigError::Validation("per_page must be > 0".to_string()));
        }
        if let Some(signer) = &self.signer {
            if signer.fqid.is_empty() {
                return Err(ConfigError::Validation("signer.fqid must not be empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// First page with the configured page size.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(1, self.per_page)
    }

    /// Decode the configured signer, if any.
    pub fn tx_signer(&self) -> Result<Option<TxSigner>, ConfigError> {
        self.signer
            .as_ref()
            .map(|signer| -> Result<TxSigner, ConfigError> {
                let key = PrivateKeyEd25519::from_base64(&signer.private_key)?;
                Ok(TxSigner::new(signer.fqid.clone(), key))
            })
            .transpose()
    }
}
