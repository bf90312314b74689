//! # Bestiary Store
//!
//! Key-indexed in-memory tables, one per record kind.
//!
//! Each `Table` sits behind a single `parking_lot::RwLock`. Reads clone rows out;
//! writes run their checks and build the new row while holding the write lock, so
//! a uniqueness check and the insert it guards can never interleave with another
//! writer. Concurrent updates to the same row serialize, and the last one wins.

mod database;
mod error;
mod table;

pub use database::Database;
pub use error::StoreError;
pub use table::{Record, Table};
