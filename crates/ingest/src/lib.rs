//! # Ingest
//!
//! The path a raw OHLCV record takes before it reaches storage: every record
//! is validated, invalid ones are itemised and skipped, and valid ones are
//! upserted into a [`BarStore`] keyed on `(symbol, timestamp)`.
//!
//! ## Public API
//!
//! - `ingest_batch`: Validates a slice of `RawPriceBar`s and writes the valid ones.
//! - `BatchResult`: Overall validity, itemised errors and the inserted count.
//! - `BarStore`: The storage collaborator seam.
//! - `InMemoryBarStore`: A `BTreeMap`-backed store with last-write-wins upserts.
//! - `StoreError`: The errors a store may return for a single write.

pub mod batch;
pub mod error;
pub mod store;

pub use batch::{ingest_batch, BatchResult};
pub use error::StoreError;
pub use store::{BarStore, InMemoryBarStore};
