use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const WAZIRX_TICKERS_URL: &str = "https://api.wazirx.com/api/v2/tickers";

pub struct TickerFeedResult {
    pub body: String,
    pub status: StatusCode,
}

/// Shared client for the feed. No request timeout is configured, a stalled
/// upstream keeps the caller waiting.
pub fn build_client() -> Result<Client, BuildClientError> {
    Client::builder()
        .user_agent(concat!("ticker-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| BuildClientError::Build { source })
}

#[derive(Debug, Error)]
pub enum BuildClientError {
    #[error("Build: {source}")]
    Build {
        source: reqwest::Error,
    },
}

pub async fn fetch_tickers(
    client: &Client,
    url: &str,
) -> Result<TickerFeedResult, FetchTickersError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|source| FetchTickersError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchTickersError::ResponseRead { source })?;

    Ok(TickerFeedResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchTickersError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
