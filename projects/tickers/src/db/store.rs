use async_trait::async_trait;
use diesel::PgConnection;
use thiserror::Error;

use crate::db::{
    ticker::{
        models::{NewTicker, Ticker},
        queries::{
            delete_all_tickers, get_tickers, insert_ticker, DeleteAllTickersError, GetTickersError,
            InsertTickerError,
        },
    },
    PgPool,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error(transparent)]
    DeleteAllTickers {
        #[from]
        source: DeleteAllTickersError,
    },
    #[error(transparent)]
    InsertTicker {
        #[from]
        source: InsertTickerError,
    },
    #[error(transparent)]
    GetTickers {
        #[from]
        source: GetTickersError,
    },
    #[error("BlockingTask: {source}")]
    BlockingTask {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Persistence used by the handlers. Each call is one independent statement;
/// nothing here opens a transaction.
#[async_trait]
pub trait TickerStore: Send + Sync {
    /// Removes every row, returning how many were deleted.
    async fn delete_all(&self) -> Result<usize, StoreError>;

    async fn insert(&self, ticker: Ticker) -> Result<(), StoreError>;

    /// At most `limit` rows, in no particular order.
    async fn list(&self, limit: usize) -> Result<Vec<Ticker>, StoreError>;
}

/// Postgres-backed store. Diesel is blocking, so every operation checks out
/// its own connection on tokio's blocking pool.
#[derive(Clone)]
pub struct PgTickerStore {
    pool: PgPool,
}

impl PgTickerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Checks out one connection to confirm the database is reachable.
    pub async fn check_connection(&self) -> Result<(), StoreError> {
        self.run(|_| Ok(())).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        // A dropped caller does not abort the task; an issued statement
        // always runs to completion.
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn)
        })
        .await?
    }
}

#[async_trait]
impl TickerStore for PgTickerStore {
    async fn delete_all(&self) -> Result<usize, StoreError> {
        self.run(|conn| Ok(delete_all_tickers(conn)?)).await
    }

    async fn insert(&self, ticker: Ticker) -> Result<(), StoreError> {
        self.run(move |conn| {
            insert_ticker(conn, &NewTicker::from(&ticker))?;
            Ok(())
        })
        .await
    }

    async fn list(&self, limit: usize) -> Result<Vec<Ticker>, StoreError> {
        let max_rows = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run(move |conn| Ok(get_tickers(conn, max_rows)?)).await
    }
}
