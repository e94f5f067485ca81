//! Database operations for the `outlets` table.

mod read;
mod types;
mod write;

pub use read::{get_outlet, list_outlet_records, list_outlets};
pub use types::{OutletRow, UpsertOutcome};
pub use write::{upsert_outlet, upsert_outlets};
