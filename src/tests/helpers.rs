use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    api::{AppState, Session},
    domain::models::transaction::{RawTransaction, TransactionPage},
    ledger::{LedgerClient, PageRequest, TransferReceipt, TransferRequest},
};

pub const TEST_ADDRESS: &str = "DAG0test0000000000000000000000000000000000";

/// In-memory ledger that replays scripted history pages and records every call.
#[derive(Default)]
pub struct ScriptedLedger {
    pub pages: Mutex<VecDeque<eyre::Result<TransactionPage>>>,
    pub page_requests: Mutex<Vec<PageRequest>>,
    pub transfers: Mutex<Vec<TransferRequest>>,
    pub balance: f64,
    pub fail_balance: bool,
}

impl ScriptedLedger {
    pub fn with_pages(pages: impl IntoIterator<Item = TransactionPage>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            ..Default::default()
        }
    }

    pub fn push_failure(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(eyre::eyre!(message.to_string())));
    }

    pub fn calls(&self) -> usize {
        self.page_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    fn address(&self) -> &str {
        TEST_ADDRESS
    }

    async fn get_balance(&self) -> eyre::Result<f64> {
        if self.fail_balance {
            eyre::bail!("balance endpoint down");
        }
        Ok(self.balance)
    }

    async fn transfer_dag(&self, request: TransferRequest) -> eyre::Result<TransferReceipt> {
        let receipt = json!({ "hash": format!("tx_{}", self.transfers.lock().unwrap().len()) });
        self.transfers.lock().unwrap().push(request);
        Ok(receipt)
    }

    async fn get_transactions(&self, request: PageRequest) -> eyre::Result<TransactionPage> {
        self.page_requests.lock().unwrap().push(request);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(TransactionPage::BareList(vec![])))
    }
}

pub fn app_state(ledger: Arc<ScriptedLedger>) -> AppState {
    AppState {
        session: Session::Ready(ledger),
        page_size: 100,
        default_memo: "DAG Transfer".into(),
    }
}

pub fn tx_with_memo(hash: &str, memo: &str) -> RawTransaction {
    RawTransaction {
        hash: Some(hash.to_string()),
        memo: Some(memo.to_string()),
        transaction_original: None,
    }
}

pub fn tx_without_memo(hash: &str) -> RawTransaction {
    RawTransaction {
        hash: Some(hash.to_string()),
        ..Default::default()
    }
}

/// `count` memo-less transactions with hashes `{prefix}_{i}`.
pub fn create_mock_transactions(prefix: &str, count: usize) -> Vec<RawTransaction> {
    (0..count)
        .map(|i| tx_without_memo(&format!("{}_{}", prefix, i)))
        .collect()
}

pub fn envelope(data: Vec<RawTransaction>, cursor: Option<&str>) -> TransactionPage {
    TransactionPage::Envelope {
        data,
        cursor: cursor.map(str::to_string),
    }
}

pub fn raw(value: Value) -> RawTransaction {
    RawTransaction::from_value(value)
}
