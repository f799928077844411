//! Walks the full transaction history of the ledger session account.

use log::{debug, warn};

use crate::{
    domain::models::transaction::{RawTransaction, TransactionPage},
    ledger::{LedgerClient, PageRequest},
};

/// Fetches every page of transaction history, in upstream order.
///
/// Pages are requested one after another, each with the cursor returned by
/// the previous one, until a page comes back without a cursor. A page that
/// has neither the list nor the envelope shape ends the walk, as does an
/// empty page that still carries a cursor.
///
/// # Errors
///
/// Returns the first page fetch error. Nothing fetched so far is returned.
pub async fn fetch_all_transactions(
    client: &dyn LedgerClient,
    page_size: u32,
) -> eyre::Result<Vec<RawTransaction>> {
    let mut transactions = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = client
            .get_transactions(PageRequest {
                limit: page_size,
                cursor: cursor.take(),
            })
            .await?;
        pages += 1;

        let (items, next) = match page {
            TransactionPage::BareList(items) => (items, None),
            TransactionPage::Envelope { data, cursor } => (data, cursor),
            TransactionPage::Unrecognized => {
                warn!("Unrecognized transaction page shape on page {}, stopping", pages);
                break;
            }
        };

        debug!(
            "Page {}: {} transactions, cursor {:?}",
            pages,
            items.len(),
            next
        );

        let exhausted = items.is_empty();
        transactions.extend(items);
        cursor = next;

        match &cursor {
            Some(stale) if exhausted => {
                warn!("Empty page {} still returned cursor {}, stopping", pages, stale);
                break;
            }
            Some(_) => continue,
            None => break,
        }
    }

    Ok(transactions)
}
