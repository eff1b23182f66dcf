//! Unified error type for the crate.

use thiserror::Error;

/// All failures surfaced by the persistence, widget and export layers.
///
/// The aggregator itself is infallible and never produces one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or invalid user input
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Underlying `SeaORM` failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Product lookup failed or product is deleted
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// Sale lookup failed
    #[error("Sale not found: {id}")]
    SaleNotFound {
        /// Id used for the lookup
        id: i64,
    },

    /// A sale could not be recorded as requested
    #[error("Invalid sale: {message}")]
    InvalidSale {
        /// Human-readable explanation
        message: String,
    },

    /// JSON encoding or decoding of the widget summary failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system failure (settings file, recap export)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
