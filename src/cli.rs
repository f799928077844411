//! Command-line interface configuration for the DAG data gateway.
//!
//! This module defines the command-line arguments and environment variables
//! that can be used to configure the application. It uses the clap framework
//! for argument parsing and supports both command-line flags and environment
//! variables for configuration.

use std::{net::IpAddr, time::Duration};

use clap::Parser;
use url::Url;

use crate::ledger::client::LedgerConfig;

/// Command-line arguments for configuring the application.
///
/// These arguments can be provided via command-line flags or environment
/// variables. Use --help to see all available options.
#[derive(Parser)]
#[clap(author, version, about = "HTTP gateway for DAG ledger balances, transfers and memo documents")]
pub struct Args {
    /// Base URL of the ledger wallet bridge holding the signing session.
    #[clap(short, long, env = "LEDGER_URL", default_value = "http://127.0.0.1:3030/")]
    pub ledger_url: Url,

    /// API key for authenticated access to the ledger bridge.
    /// Can be set via LEDGER_API_KEY environment variable.
    #[clap(short = 'k', long, env = "LEDGER_API_KEY")]
    pub ledger_api_key: Option<String>,

    /// Ledger network the bridge is expected to be connected to.
    #[clap(short, long, env = "LEDGER_NETWORK", default_value = "IntegrationNet")]
    pub network: String,

    /// Timeout in seconds applied to every request sent to the ledger bridge.
    #[clap(short = 't', long, env = "LEDGER_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout: u64,

    /// Interface for the API server to listen on.
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port for the API server to listen on.
    #[clap(short, long, env = "PORT", default_value = "5001")]
    pub port: u16,

    /// Number of transactions requested per page when walking the history.
    #[clap(long, env = "PAGE_SIZE", default_value = "100")]
    pub page_size: u32,

    /// Memo attached to transfers that do not carry one.
    #[clap(long, env = "DEFAULT_MEMO", default_value = "DAG Transfer")]
    pub default_memo: String,
}

impl Args {
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            url: self.ledger_url.clone(),
            api_key: self.ledger_api_key.clone(),
            network: self.network.clone(),
            timeout: Duration::from_secs(self.request_timeout),
        }
    }
}
