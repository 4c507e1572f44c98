//! Client for the WazirX public ticker list.
//!
//! - `index` performs the HTTP call and hands back the raw body
//! - `snapshot` decodes the symbol-keyed object into ticker entries

pub mod index;
pub mod snapshot;
