pub mod schema;
pub mod store;
pub mod ticker;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Connections are opened lazily, so an unreachable database does not stop
/// the process from starting.
pub fn build_pool(connection_string: &str, max_size: u32) -> PgPool {
    Pool::builder()
        .max_size(max_size)
        .build_unchecked(ConnectionManager::new(connection_string))
}
