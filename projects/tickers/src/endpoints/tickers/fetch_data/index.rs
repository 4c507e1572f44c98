use axum::{
	extract::Extension,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use futures::future::try_join_all;
use interfaces_wazirx_tickers::{
	index::{fetch_tickers, FetchTickersError, TickerFeedResult},
	snapshot::{ParseTickerSnapshotError, TickerSnapshot},
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::db::{
	store::{StoreError, TickerStore},
	ticker::models::Ticker,
};
use crate::state::{AppState, TickerFeed};

pub const SUCCESS_MESSAGE: &str = "Data fetched and stored successfully.";
pub const FAILURE_MESSAGE: &str = "Error fetching data";

#[derive(Debug, Error)]
pub enum FetchTickerSnapshotError {
	#[error("FetchTickers: {source}")]
	FetchTickers {
		#[from]
		source: FetchTickersError,
	},

	#[error("UnexpectedStatus: {status}")]
	UnexpectedStatus { status: reqwest::StatusCode },

	#[error("ParseSnapshot: {source}")]
	ParseSnapshot {
		#[from]
		source: ParseTickerSnapshotError,
	},
}

#[derive(Debug, Error)]
pub enum RefreshTickersError {
	#[error("UpstreamFailure: {source}")]
	UpstreamFailure {
		#[from]
		source: FetchTickerSnapshotError,
	},

	#[error("StoreFailure: {source}")]
	StoreFailure {
		#[from]
		source: StoreError,
	},
}

impl IntoResponse for RefreshTickersError {
	fn into_response(self) -> Response {
		error!(error = &self as &(dyn std::error::Error + 'static), "Error fetching data");
		(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE).into_response()
	}
}

/// Axum handler: GET /fetch-data
pub async fn handler(
	Extension(state): Extension<AppState>,
) -> Result<&'static str, RefreshTickersError> {
	let inserted = refresh_tickers(&state.feed, state.store.as_ref(), state.limit).await?;

	info!(inserted, "Data fetched and stored successfully.");
	Ok(SUCCESS_MESSAGE)
}

pub async fn fetch_ticker_snapshot(
	feed: &TickerFeed,
) -> Result<TickerSnapshot, FetchTickerSnapshotError> {
	let TickerFeedResult { body, status } = fetch_tickers(&feed.client, &feed.url).await?;

	if !status.is_success() {
		return Err(FetchTickerSnapshotError::UnexpectedStatus { status });
	}

	Ok(TickerSnapshot::from_body(&body)?)
}

/// Replaces the table with the first `limit` entries of the current feed.
///
/// The delete and the inserts are separate statements with no transaction
/// around them. Inserts are issued together and joined fail-fast: the first
/// error is returned, rows already written stay written.
pub async fn refresh_tickers(
	feed: &TickerFeed,
	store: &dyn TickerStore,
	limit: usize,
) -> Result<usize, RefreshTickersError> {
	let snapshot = fetch_ticker_snapshot(feed).await?;
	let top: Vec<Ticker> = snapshot
		.top(limit)
		.map_err(FetchTickerSnapshotError::from)?
		.into_iter()
		.map(Ticker::from)
		.collect();

	let deleted = store.delete_all().await?;
	debug!(deleted, upstream_entries = snapshot.len(), "cleared tickers table");

	let inserted = top.len();
	try_join_all(top.into_iter().map(|ticker| store.insert(ticker))).await?;

	Ok(inserted)
}
