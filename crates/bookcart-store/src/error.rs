//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ├──► read_cart: logged, cart reads as empty                      │
//! │       │                                                                 │
//! │       └──► add / remove / clear: returned to the caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value or envelope could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used as a storage location.
    ///
    /// ## When This Occurs
    /// - Empty key
    /// - Key containing path separators or other characters outside
    ///   `[A-Za-z0-9._-]` (FileStore maps keys to file names)
    #[error("Invalid store key: '{0}'")]
    InvalidKey(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
