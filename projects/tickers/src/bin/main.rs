use std::net::SocketAddr;
use std::sync::Arc;

use axum::serve;
use interfaces_wazirx_tickers::index::build_client;
use projects_tickers::{
	config::{Config, ConfigError},
	db::{build_pool, store::PgTickerStore},
	router::create_router,
	state::{AppState, TickerFeed},
};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use utils_trace::tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("LoadConfig: {source}")]
	LoadConfig {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("BuildFeedClient: {source}")]
	BuildFeedClient {
		#[source]
		source: interfaces_wazirx_tickers::index::BuildClientError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let dotenv = dotenvy::dotenv();

	let config = Config::from_env()
		.map_err(|source| MainError::LoadConfig { source })?;

	tracing_init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	match dotenv {
		Ok(path) => info!("Loaded environment from {}", path.display()),
		Err(err) if err.not_found() => debug!("No .env file found"),
		Err(err) => warn!(error = %err, "Failed to load .env file"),
	}

	// Never log the password.
	info!(
		db_host = %config.db_host,
		db_port = config.db_port,
		db_user = %config.db_user,
		db_name = %config.db_name,
		ticker_feed_url = %config.ticker_feed_url,
		ticker_limit = config.ticker_limit,
		"Configuration loaded"
	);

	let pool = build_pool(&config.connection_string(), config.db_pool_size);
	let store = PgTickerStore::new(pool);

	match store.check_connection().await {
		Ok(()) => info!("Database connected successfully."),
		Err(err) => error!(error = &err as &(dyn std::error::Error + 'static), "Database connection error"),
	}

	let client = build_client()
		.map_err(|source| MainError::BuildFeedClient { source })?;

	let state = AppState::new(
		Arc::new(store),
		TickerFeed::new(client, config.ticker_feed_url.clone()),
		config.ticker_limit,
	);

	let app = create_router(state, &config.static_dir);

	let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running at http://localhost:{}/", config.server_port);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}
