//! # Revive - secondhand item listings
//!
//! A small local tool for registering things you want to sell or give away.
//!
//! Revive provides:
//! - A typed [`Item`] record and input validation
//! - SQLite-backed storage with ordered listing, substring search and CSV export
//! - Configuration resolution for the database and export paths
//! - Terminal helpers shared by the CLI and the interactive form

pub mod item;
pub mod storage;
pub mod config;
pub mod ui;
#[cfg(feature = "form")]
pub mod form;

// Re-exports for convenient access
pub use item::{Item, ItemStatus, NewItem, OrderBy, price_label};
pub use storage::{ItemStore, StoreStats};
pub use config::{ReviveConfig, Settings};

/// Result type alias for Revive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Revive operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Price must be a non-negative number, got {0:?}")]
    InvalidPrice(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid item status: {0}")]
    InvalidStatus(String),
}

impl Error {
    /// True for errors caused by user input rather than the store or file system
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingField(_) | Error::InvalidPrice(_))
    }
}
