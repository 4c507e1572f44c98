use diesel::{dsl, pg::Pg, prelude::*};
use thiserror::Error;
use crate::db::{ticker::models::*, schema::tickers};

/// `DELETE FROM tickers`, no filter.
pub(crate) fn delete_all_statement() -> dsl::delete<tickers::table> {
    diesel::delete(tickers::table)
}

pub(crate) fn insert_statement<'a>(
    new: &'a NewTicker<'a>,
) -> dsl::Values<dsl::insert_into<tickers::table>, &'a NewTicker<'a>> {
    diesel::insert_into(tickers::table).values(new)
}

/// No ORDER BY: rows come back in whatever order the scan yields.
pub(crate) fn select_statement(
    max_rows: i64,
) -> dsl::Limit<dsl::Select<tickers::table, dsl::AsSelect<Ticker, Pg>>> {
    tickers::table.select(Ticker::as_select()).limit(max_rows)
}

#[derive(Debug, Error)]
pub enum DeleteAllTickersError {
    #[error("DeleteAllTickers: {source}")]
    DeleteAllTickers {
        #[from]
        source: diesel::result::Error,
    },
}

/// Runs on its own, outside any transaction.
pub fn delete_all_tickers(
    conn: &mut PgConnection,
) -> Result<usize, DeleteAllTickersError> {
    delete_all_statement()
        .execute(conn)
        .map_err(|source| DeleteAllTickersError::DeleteAllTickers { source })
}

#[derive(Debug, Error)]
pub enum InsertTickerError {
    #[error("InsertTicker: {source}")]
    InsertTicker {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_ticker(
    conn: &mut PgConnection,
    new: &NewTicker,
) -> Result<usize, InsertTickerError> {
    insert_statement(new)
        .execute(conn)
        .map_err(|source| InsertTickerError::InsertTicker { source })
}

#[derive(Debug, Error)]
pub enum GetTickersError {
    #[error("GetTickers: {source}")]
    GetTickers {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_tickers(
    conn: &mut PgConnection,
    max_rows: i64,
) -> Result<Vec<Ticker>, GetTickersError> {
    select_statement(max_rows)
        .load(conn)
        .map_err(|source| GetTickersError::GetTickers { source })
}
