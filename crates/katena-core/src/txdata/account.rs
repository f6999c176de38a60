//! `account` namespace: company key management.

use katena_crypto::PublicKeyEd25519;
use serde::{Deserialize, Serialize};

use super::TxDataVariant;
use crate::codec::fields::FieldReader;
use crate::errors::DecodeError;

pub const NAMESPACE: &str = "account";
pub const KEY_STATE_KEY: &str = "account.key";

/// Role given to ordinary company keys.
pub const DEFAULT_ROLE_ID: &str = "default";
/// Role allowed to manage the company's other keys.
pub const COMPANY_ADMIN_ROLE_ID: &str = "company_admin";

/// Register a new public key for the signer's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCreateV1 {
    id: String,
    public_key: PublicKeyEd25519,
    role: String,
}

impl KeyCreateV1 {
    pub fn new(id: impl Into<String>, public_key: PublicKeyEd25519, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            public_key,
            role: role.into(),
        }
    }

    pub fn public_key(&self) -> &PublicKeyEd25519 {
        &self.public_key
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl TxDataVariant for KeyCreateV1 {
    const TYPE: &'static str = "account.key.create.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = KEY_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
            public_key: fields.key("public_key", PublicKeyEd25519::from_bytes)?,
            role: fields.string("role")?,
        })
    }
}

/// Replace the public key behind an existing key id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRotateV1 {
    id: String,
    public_key: PublicKeyEd25519,
}

impl KeyRotateV1 {
    pub fn new(id: impl Into<String>, public_key: PublicKeyEd25519) -> Self {
        Self {
            id: id.into(),
            public_key,
        }
    }

    pub fn public_key(&self) -> &PublicKeyEd25519 {
        &self.public_key
    }
}

impl TxDataVariant for KeyRotateV1 {
    const TYPE: &'static str = "account.key.rotate.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = KEY_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
            public_key: fields.key("public_key", PublicKeyEd25519::from_bytes)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRevokeV1 {
    id: String,
}

impl KeyRevokeV1 {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl TxDataVariant for KeyRevokeV1 {
    const TYPE: &'static str = "account.key.revoke.v1";
    const NAMESPACE: &'static str = NAMESPACE;
    const STATE_KEY: &'static str = KEY_STATE_KEY;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_fields(fields: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.string("id")?,
        })
    }
}

/// Key state as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyV1 {
    pub fqid: String,
    pub public_key: PublicKeyEd25519,
    pub is_active: bool,
    pub role: String,
}

impl KeyV1 {
    pub fn is_company_admin(&self) -> bool {
        self.role == COMPANY_ADMIN_ROLE_ID
    }
}
