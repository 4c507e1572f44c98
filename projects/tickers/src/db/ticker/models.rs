use diesel::prelude::*;
use interfaces_wazirx_tickers::snapshot::WazirxTicker;
use serde::Serialize;

use crate::db::schema::tickers;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = tickers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ticker {
    pub name: String,
    pub last: String,
    pub buy: String,
    pub sell: String,
    pub volume: String,
    pub base_unit: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickers)]
pub struct NewTicker<'a> {
    pub name: &'a str,
    pub last: &'a str,
    pub buy: &'a str,
    pub sell: &'a str,
    pub volume: &'a str,
    pub base_unit: &'a str,
}

impl<'a> From<&'a Ticker> for NewTicker<'a> {
    fn from(ticker: &'a Ticker) -> Self {
        NewTicker {
            name: &ticker.name,
            last: &ticker.last,
            buy: &ticker.buy,
            sell: &ticker.sell,
            volume: &ticker.volume,
            base_unit: &ticker.base_unit,
        }
    }
}

impl From<WazirxTicker> for Ticker {
    fn from(upstream: WazirxTicker) -> Self {
        Ticker {
            name: upstream.name,
            last: upstream.last,
            buy: upstream.buy,
            sell: upstream.sell,
            volume: upstream.volume,
            base_unit: upstream.base_unit,
        }
    }
}
