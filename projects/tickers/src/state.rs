use std::sync::Arc;

use reqwest::Client;

use crate::db::store::TickerStore;

/// Where the ingestion handler pulls the ticker list from.
#[derive(Clone)]
pub struct TickerFeed {
    pub client: Client,
    pub url: String,
}

impl TickerFeed {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

/// Built once in `main` and handed to every handler through an `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TickerStore>,
    pub feed: TickerFeed,
    /// Rows written per ingestion and returned per query.
    pub limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn TickerStore>, feed: TickerFeed, limit: usize) -> Self {
        Self { store, feed, limit }
    }
}
