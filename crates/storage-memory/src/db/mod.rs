//! The document store engine.
//!
//! Documents are JSON objects grouped into named collections and addressed
//! by id. Writes are expressed per field, so a single write can mix plain
//! values with field transforms (server timestamp, atomic increment, array
//! union). Queries are linear scans with a conjunction of field filters,
//! at most one sort key, and an optional row limit.

mod query;
mod store;

pub use query::{Direction, Filter, FilterOp, OrderBy};
pub use store::{field, DocumentData, MemoryStore, WriteField};
