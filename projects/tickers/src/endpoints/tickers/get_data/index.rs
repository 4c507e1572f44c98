use axum::{
	extract::{Extension, Json},
	http::StatusCode,
	response::IntoResponse,
};
use thiserror::Error;
use tracing::error;

use crate::db::{store::StoreError, ticker::models::Ticker};
use crate::state::AppState;

pub const FAILURE_MESSAGE: &str = "Error retrieving data";

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error("GetTickers: {source}")]
	GetTickers {
		#[from]
		source: StoreError,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> axum::response::Response {
		error!(error = &self as &(dyn std::error::Error + 'static), "Error retrieving data");
		(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE).into_response()
	}
}

/// Axum handler: GET /get-data
pub async fn handler(
	Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Ticker>>, HandlerError> {
	let tickers = state.store.list(state.limit).await?;

	Ok(Json(tickers))
}
