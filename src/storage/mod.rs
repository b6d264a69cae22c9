//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - items(id, name, description, contact, price, status, created_at)
//!
//! CSV export lives beside the store since it only ever reads from it.

pub mod schema;
pub mod sqlite;
pub mod export;

pub use sqlite::{ItemStore, StoreStats};
pub use export::EXPORT_HEADER;
