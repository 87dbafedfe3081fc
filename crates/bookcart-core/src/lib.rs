//! # bookcart-core: Pure Business Logic for bookcart
//!
//! This crate is the **heart** of bookcart. It contains the cart's domain
//! types and the discount-selection algorithm as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bookcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (CLI / web adapter)                │   │
//! │  │    Add button ──► Cart badge ──► Cart page ──► Discount line    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        bookcart-store (cart manager)  +  bookcart-offers        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bookcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ discount  │  │ validation│                  │   │
//! │  │   │ LineItem  │  │  tracks   │  │  payload  │                  │   │
//! │  │   │  Offer    │  │ best pick │  │  decoding │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Offer, CommercialOffers)
//! - [`discount`] - Best-discount selection across the three offer tracks
//! - [`error`] - Domain error types
//! - [`validation`] - Payload decoding and field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bookcart_core::discount::compute_discount;
//! use bookcart_core::types::Offer;
//!
//! let offers = vec![
//!     Offer::percentage(4.0),
//!     Offer::minus(15.0),
//!     Offer::slice(100.0, 12.0),
//! ];
//!
//! // 65.00 in the cart: -4% = 62.40, -15 = 50.00, slice does not apply
//! assert_eq!(compute_discount(65.0, Some(&offers)), 15.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{best_offer, compute_discount, round_cents, DiscountBreakdown};
pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cpascher_cart";

/// Lifetime of the persisted cart, in days.
///
/// Every write refreshes the expiry, so an idle cart disappears one day
/// after its last modification.
pub const CART_TTL_DAYS: u32 = 1;
