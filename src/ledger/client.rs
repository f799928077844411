//! HTTP client for the ledger wallet bridge.
//!
//! The bridge runs the ledger SDK session (network config, key login,
//! signing) and exposes it as a small JSON API. This module is the only
//! place that knows its URLs and payload shapes.

use std::time::Duration;

use async_trait::async_trait;
use eyre::{bail, WrapErr};
use log::info;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use super::{LedgerClient, PageRequest, TransferReceipt, TransferRequest};
use crate::domain::models::transaction::TransactionPage;

/// Connection settings for the ledger bridge.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub url: Url,
    pub api_key: Option<String>,
    /// Network the bridge must report being connected to
    pub network: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    address: String,
    network: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: f64,
}

/// [`LedgerClient`] backed by the ledger bridge's JSON API.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    address: String,
}

impl HttpLedgerClient {
    /// Opens a session against the ledger bridge.
    ///
    /// Fetches the logged-in account, which both checks that the bridge is
    /// reachable and that its session is on the configured network.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The bridge is unreachable or answers with a non-success status
    /// * The bridge has no logged-in account
    /// * The bridge is connected to a different network
    pub async fn connect(config: LedgerConfig) -> eyre::Result<Self> {
        let mut base_url = config.url;

        // Endpoints are joined relative to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let mut client = Self {
            http,
            base_url,
            api_key: config.api_key,
            address: String::new(),
        };

        let account: AccountInfo = client
            .call(client.http.get(client.endpoint("account")?))
            .await
            .wrap_err("Ledger bridge login failed")?;

        if let Some(network) = account.network.filter(|n| *n != config.network) {
            bail!(
                "Ledger bridge is connected to {}, expected {}",
                network,
                config.network
            );
        }

        info!(
            "Logged in to {} as {}",
            config.network, account.address
        );
        client.address = account.address;

        Ok(client)
    }

    fn endpoint(&self, path: &str) -> eyre::Result<Url> {
        let mut url = self.base_url.join(path)?;

        if let Some(api_key) = &self.api_key {
            url.query_pairs_mut().append_pair("api-key", api_key);
        }

        Ok(url)
    }

    /// Sends a bridge request and decodes its JSON answer.
    ///
    /// Request URLs carry the api key, so they are stripped from every error
    /// before it leaves this client.
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> eyre::Result<T> {
        let value = request
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(reqwest::Error::without_url)?
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        Ok(value)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn get_balance(&self) -> eyre::Result<f64> {
        let response: BalanceResponse = self.call(self.http.get(self.endpoint("balance")?)).await?;

        Ok(response.balance)
    }

    async fn transfer_dag(&self, request: TransferRequest) -> eyre::Result<TransferReceipt> {
        self.call(self.http.post(self.endpoint("transfer")?).json(&request))
            .await
    }

    async fn get_transactions(&self, request: PageRequest) -> eyre::Result<TransactionPage> {
        let mut url = self.endpoint("transactions")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &request.limit.to_string());
            if let Some(cursor) = &request.cursor {
                query.append_pair("cursor", cursor);
            }
        }

        self.call(self.http.get(url)).await
    }
}
