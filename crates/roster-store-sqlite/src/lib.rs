//! SQLite backend for the roster contact store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Every multi-statement write is
//! wrapped in an explicit transaction; listener vetoes roll the whole
//! operation back.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteStore, StoreOptions};
