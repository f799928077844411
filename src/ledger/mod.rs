//! Ledger client abstraction.
//!
//! The gateway never signs or broadcasts anything itself. Every ledger
//! operation goes through a [`LedgerClient`], which owns the logged-in
//! account session. The HTTP implementation lives in [`client`].

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::models::transaction::TransactionPage;

pub mod client;

/// Receipt returned by the ledger for a submitted transfer. Passed through to
/// callers untouched.
pub type TransferReceipt = serde_json::Value;

/// A transfer to be signed and submitted by the ledger session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    /// Destination address
    pub to: String,
    /// Amount in DAG
    pub amount: f64,
    /// Fee in DAG
    pub fee: f64,
    pub memo: String,
}

/// Parameters of a single transaction history page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub cursor: Option<String>,
}

/// Operations the gateway needs from the ledger session.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Address of the account the session is logged in as.
    fn address(&self) -> &str;

    /// Current balance of the session account, in DAG.
    async fn get_balance(&self) -> eyre::Result<f64>;

    /// Signs and submits a transfer from the session account.
    async fn transfer_dag(&self, request: TransferRequest) -> eyre::Result<TransferReceipt>;

    /// Fetches one page of the session account's transaction history.
    async fn get_transactions(&self, request: PageRequest) -> eyre::Result<TransactionPage>;
}
