//! Ticker relay service
//!
//! - REST API endpoints in `endpoints/`
//! - PostgreSQL models, queries and the store seam in `db/`
//! - Environment configuration in `config`
//! - Upstream feed is the WazirX ticker list (see `interfaces_wazirx_tickers`)

pub mod config;
pub mod db;
pub mod endpoints;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
