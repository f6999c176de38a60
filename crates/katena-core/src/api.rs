//! Response shapes returned by the Katena API.

use serde::{Deserialize, Serialize};

use crate::tx::Tx;

/// Status attached to a submitted transaction. `code == 0` means the
/// transaction was accepted into the mempool or committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub code: i64,
    pub message: String,
}

impl TxStatus {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// Answer to `POST txs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTxResult {
    pub hash: String,
    pub status: TxStatus,
}

/// A committed transaction and its position on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub hash: String,
    pub height: i64,
    pub index: u32,
    pub tx: Tx,
    pub status: TxStatus,
}

/// One page of transactions, with the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResults {
    pub txs: Vec<TxResult>,
    pub total: u32,
}

/// Error document returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: i64,
    pub message: String,
}
