use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::{
    domain::documents::{self, DocumentReport},
    error::GatewayError,
    ledger::{LedgerClient, TransferReceipt, TransferRequest},
};

/// Ledger session readiness, decided once at startup.
#[derive(Clone)]
pub enum Session {
    Ready(Arc<dyn LedgerClient>),
    /// Holds why the session could not be opened
    NotReady(Arc<str>),
}

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub page_size: u32,
    pub default_memo: Arc<str>,
}

impl AppState {
    fn client(&self) -> Result<&dyn LedgerClient, GatewayError> {
        match &self.session {
            Session::Ready(client) => Ok(client.as_ref()),
            Session::NotReady(_) => Err(GatewayError::NotReady),
        }
    }
}

#[derive(Serialize)]
pub struct BalanceResponse {
    address: String,
    balance: f64,
}

#[derive(Deserialize)]
pub struct SendDagRequest {
    to: Option<String>,
    amount: Option<Value>,
    memo: Option<Value>,
}

#[derive(Serialize)]
pub struct SendDagResponse {
    success: bool,
    tx: TransferReceipt,
}

#[derive(Serialize)]
pub struct DagDataResponse {
    success: bool,
    #[serde(flatten)]
    report: DocumentReport,
}

async fn health() -> &'static str {
    "DAG data gateway is running"
}

#[debug_handler]
async fn balance(State(state): State<AppState>) -> Result<Json<BalanceResponse>, GatewayError> {
    let client = state.client()?;

    let balance = client.get_balance().await.map_err(GatewayError::Balance)?;

    Ok(Json(BalanceResponse {
        address: client.address().to_string(),
        balance,
    }))
}

#[debug_handler]
async fn send_dag(
    State(state): State<AppState>,
    body: Result<Json<SendDagRequest>, JsonRejection>,
) -> Result<Json<SendDagResponse>, GatewayError> {
    let client = state.client()?;

    let Json(body) = body.map_err(|rejection| GatewayError::BadRequest(rejection.body_text()))?;

    let (to, amount) = match (body.to, body.amount) {
        (Some(to), Some(amount)) if !to.is_empty() && !is_blank(&amount) => (to, amount),
        _ => {
            return Err(GatewayError::BadRequest(
                "Missing required fields: 'to' or 'amount'.".to_string(),
            ))
        }
    };

    let amount = parse_amount(&amount)
        .ok_or_else(|| GatewayError::BadRequest("Invalid amount.".to_string()))?;

    let balance = client.get_balance().await.map_err(GatewayError::Transfer)?;

    if amount > balance {
        return Err(GatewayError::InsufficientFunds {
            balance,
            requested: amount,
        });
    }

    let memo = match body.memo {
        None | Some(Value::Null) => state.default_memo.to_string(),
        Some(Value::String(memo)) => memo,
        Some(memo) => memo.to_string(),
    };

    info!("Sending {} DAG to {}", amount, to);

    let tx = client
        .transfer_dag(TransferRequest {
            to,
            amount,
            fee: 0.0,
            memo,
        })
        .await
        .map_err(GatewayError::Transfer)?;

    Ok(Json(SendDagResponse { success: true, tx }))
}

#[debug_handler]
async fn dag_data(State(state): State<AppState>) -> Result<Json<DagDataResponse>, GatewayError> {
    let client = state.client()?;

    let report = documents::build_documents(client, state.page_size)
        .await
        .map_err(GatewayError::Documents)?;

    Ok(Json(DagDataResponse {
        success: true,
        report,
    }))
}

/// Treats `0`, `""`, `false` and `null` as a missing value.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Accepts a JSON number or a numeric string, finite and positive.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount > 0.0).then_some(amount)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/balance", get(balance))
        .route("/send-dag", post(send_dag))
        .route("/dag-data", get(dag_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    if let Session::NotReady(reason) = &state.session {
        warn!(
            "Ledger session is not ready ({}), ledger endpoints will answer 503",
            reason
        );
    }

    info!("Starting API server on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
