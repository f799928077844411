//! Errors surfaced by the HTTP API.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use log::error;
use serde_json::json;
use thiserror::Error;

/// An error answered to an API caller as `{success: false, error}`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The ledger session could not be opened at startup
    #[error("Network not ready.")]
    NotReady,

    #[error("{0}")]
    BadRequest(String),

    #[error("Insufficient funds. Balance: {balance}, Requested: {requested}")]
    InsufficientFunds { balance: f64, requested: f64 },

    #[error("Failed to fetch balance.")]
    Balance(eyre::Report),

    #[error("Transaction failed: {0}")]
    Transfer(eyre::Report),

    #[error("Failed to fetch DAG data: {0}")]
    Documents(eyre::Report),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) | Self::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            Self::Balance(_) | Self::Transfer(_) | Self::Documents(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Balance(report) | Self::Transfer(report) | Self::Documents(report) => {
                error!("{}: {:?}", self, report)
            }
            _ => {}
        }

        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}
