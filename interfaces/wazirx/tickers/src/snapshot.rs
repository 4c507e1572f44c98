use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One entry of the ticker list. Prices and volume are kept as the text the
/// feed sent; numeric JSON values are rendered to their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WazirxTicker {
    pub name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub last: String,
    #[serde(deserialize_with = "text_or_number")]
    pub buy: String,
    #[serde(deserialize_with = "text_or_number")]
    pub sell: String,
    #[serde(deserialize_with = "text_or_number")]
    pub volume: String,
    pub base_unit: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}

/// The feed body: an object keyed by symbol, entries in document order.
#[derive(Debug, Clone)]
pub struct TickerSnapshot {
    entries: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum ParseTickerSnapshotError {
    #[error("DeserializeSnapshot: {source}")]
    DeserializeSnapshot {
        #[from]
        source: serde_json::Error,
    },

    #[error("InvalidEntry `{symbol}`: {source}")]
    InvalidEntry {
        symbol: String,
        source: serde_json::Error,
    },
}

impl TickerSnapshot {
    /// Fails when the body is not a JSON object.
    pub fn from_body(body: &str) -> Result<Self, ParseTickerSnapshotError> {
        let entries: Map<String, Value> = serde_json::from_str(body)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes the first `limit` entries. Entries past the limit are never
    /// inspected, so a malformed tail does not fail the call.
    pub fn top(&self, limit: usize) -> Result<Vec<WazirxTicker>, ParseTickerSnapshotError> {
        self.entries
            .iter()
            .take(limit)
            .map(|(symbol, value)| {
                WazirxTicker::deserialize(value).map_err(|source| {
                    ParseTickerSnapshotError::InvalidEntry {
                        symbol: symbol.clone(),
                        source,
                    }
                })
            })
            .collect()
    }
}
