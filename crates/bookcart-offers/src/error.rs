//! # Offer Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Offer Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Rejected (non-2xx)     │ │
//! │  │  InvalidUrl     │  │  Transport      │  │  Parse                  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Rejected` is the "the server said no" outcome: it carries the server's
//! own error body. It is never turned into an empty offer list.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for offer operations.
pub type OffersResult<T> = Result<T, OffersError>;

#[derive(Debug, Error)]
pub enum OffersError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid offers configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid offers URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport.
    #[error("Transport error: {0}")]
    Transport(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The endpoint answered with a non-success status.
    #[error("Offers request rejected with status {status}: {body}")]
    Rejected { status: u16, body: Value },

    /// A success response whose body is not a commercial offers document.
    #[error("Failed to parse offers response: {0}")]
    Parse(String),
}

impl OffersError {
    /// The error body sent by the server, for rejected requests.
    pub fn rejection_body(&self) -> Option<&Value> {
        match self {
            OffersError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}
