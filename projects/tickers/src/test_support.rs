use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use interfaces_wazirx_tickers::index::build_client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::db::store::{StoreError, TickerStore};
use crate::db::ticker::models::Ticker;
use crate::db::ticker::queries::{DeleteAllTickersError, GetTickersError, InsertTickerError};
use crate::state::TickerFeed;

pub const FEED_PATH: &str = "/api/v2/tickers";

#[derive(Default)]
struct MemoryTable {
    rows: Vec<Ticker>,
    delete_calls: usize,
    fail_insert_for: Option<String>,
}

/// Vec-backed stand-in for the tickers table.
#[derive(Clone, Default)]
pub struct MemoryTickerStore {
    table: Arc<Mutex<MemoryTable>>,
}

impl MemoryTickerStore {
    pub fn with_rows(rows: Vec<Ticker>) -> Self {
        let store = Self::default();
        store.table.lock().unwrap().rows = rows;
        store
    }

    /// Inserts of the ticker called `name` fail; every other insert lands.
    pub fn failing_insert_for(name: &str) -> Self {
        let store = Self::default();
        store.table.lock().unwrap().fail_insert_for = Some(name.to_string());
        store
    }

    pub fn rows(&self) -> Vec<Ticker> {
        self.table.lock().unwrap().rows.clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.table.lock().unwrap().delete_calls
    }
}

#[async_trait]
impl TickerStore for MemoryTickerStore {
    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut table = self.table.lock().unwrap();
        table.delete_calls += 1;
        let deleted = table.rows.len();
        table.rows.clear();
        Ok(deleted)
    }

    async fn insert(&self, ticker: Ticker) -> Result<(), StoreError> {
        let mut table = self.table.lock().unwrap();
        if table.fail_insert_for.as_deref() == Some(ticker.name.as_str()) {
            return Err(InsertTickerError::InsertTicker {
                source: DieselError::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    Box::new("duplicate key value".to_string()),
                ),
            }
            .into());
        }
        table.rows.push(ticker);
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Ticker>, StoreError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().take(limit).cloned().collect())
    }
}

/// Every call fails as if the server had closed the connection.
pub struct UnreachableTickerStore;

fn connection_closed() -> DieselError {
    DieselError::DatabaseError(
        DatabaseErrorKind::ClosedConnection,
        Box::new("could not connect to server: Connection refused".to_string()),
    )
}

#[async_trait]
impl TickerStore for UnreachableTickerStore {
    async fn delete_all(&self) -> Result<usize, StoreError> {
        Err(DeleteAllTickersError::DeleteAllTickers { source: connection_closed() }.into())
    }

    async fn insert(&self, _ticker: Ticker) -> Result<(), StoreError> {
        Err(InsertTickerError::InsertTicker { source: connection_closed() }.into())
    }

    async fn list(&self, _limit: usize) -> Result<Vec<Ticker>, StoreError> {
        Err(GetTickersError::GetTickers { source: connection_closed() }.into())
    }
}

pub fn ticker(index: usize) -> Ticker {
    Ticker {
        name: format!("SYM{index}/INR"),
        last: format!("{}", 100 + index),
        buy: format!("{}", 99 + index),
        sell: format!("{}", 101 + index),
        volume: "12.5".to_string(),
        base_unit: "inr".to_string(),
    }
}

/// A feed body with `count` entries shaped like the WazirX ticker list.
pub fn feed_body(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            let t = ticker(i);
            format!(
                r#""sym{i}inr":{{"base_unit":"{}","quote_unit":"inr","low":"1","high":"2","last":"{}","type":"SPOT","open":"1","volume":"{}","sell":"{}","buy":"{}","at":1700000000,"name":"{}"}}"#,
                t.base_unit, t.last, t.volume, t.sell, t.buy, t.name
            )
        })
        .collect();
    format!("{{{}}}", entries.join(","))
}

/// Starts a mock upstream answering `FEED_PATH` with `status` and `body`.
/// The server must outlive the returned feed.
pub async fn mock_feed(status: u16, body: String) -> (MockServer, TickerFeed) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let feed = TickerFeed::new(build_client().unwrap(), format!("{}{FEED_PATH}", server.uri()));
    (server, feed)
}

/// Nothing listens on port 1 in the test environment.
pub fn unreachable_feed() -> TickerFeed {
    TickerFeed::new(build_client().unwrap(), format!("http://127.0.0.1:1{FEED_PATH}"))
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a plain-text fmt subscriber and returns what it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
