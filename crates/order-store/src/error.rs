use thiserror::Error;

/// Errors that can occur when reading or writing orders.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another order already uses this order number.
    #[error("Order number already exists: {0}")]
    DuplicateOrderNumber(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row no longer satisfies the order invariants.
    #[error("Corrupt order record: {0}")]
    CorruptRecord(String),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
