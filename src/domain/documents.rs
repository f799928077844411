//! Recovers memo documents from the session account's transaction history.

use log::info;
use serde::Serialize;

use super::{memo, pagination};
use crate::ledger::LedgerClient;

/// Documents recovered from one full history walk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Number of transactions fetched, with or without memo
    pub total_transactions: usize,
    /// One document per transaction that had a memo, in history order
    pub documents: Vec<memo::Document>,
}

/// Fetches the whole history and decodes every memo found in it.
///
/// Transactions without a memo produce no document. Undecodable memos
/// produce a fallback document rather than an error.
///
/// # Errors
///
/// Returns an error if any page fetch fails.
pub async fn build_documents(
    client: &dyn LedgerClient,
    page_size: u32,
) -> eyre::Result<DocumentReport> {
    let transactions = pagination::fetch_all_transactions(client, page_size).await?;

    let documents: Vec<_> = transactions
        .iter()
        .filter_map(|tx| tx.memo().map(|m| memo::decode(m, tx.hash.as_deref())))
        .collect();

    info!(
        "Recovered {} documents from {} transactions ({} unparsed)",
        documents.len(),
        transactions.len(),
        documents.iter().filter(|d| d.is_fallback()).count()
    );

    Ok(DocumentReport {
        total_transactions: transactions.len(),
        documents,
    })
}
