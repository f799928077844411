use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use log::{error, info};

use api::{AppState, Session};
use ledger::client::HttpLedgerClient;

mod api;
mod cli;
mod domain;
mod error;
mod ledger;
mod logger;

#[cfg(test)]
mod tests;

async fn init() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let session = match HttpLedgerClient::connect(args.ledger_config()).await {
        Ok(client) => Session::Ready(Arc::new(client)),
        Err(e) => {
            error!("Ledger session failed to initialize: {:?}", e);
            Session::NotReady(format!("{:#}", e).into())
        }
    };

    let state = AppState {
        session,
        page_size: args.page_size,
        default_memo: args.default_memo.into(),
    };

    let listener = tokio::net::TcpListener::bind(SocketAddr::new(args.host, args.port)).await?;

    api::start(listener, state).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    logger::setup();

    info!("DAG data gateway started, initializing services....");

    if let Err(e) = init().await {
        error!("Initialization error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
