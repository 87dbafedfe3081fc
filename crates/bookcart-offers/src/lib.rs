//! # bookcart-offers: Commercial Offer Retrieval
//!
//! Asks the remote catalogue which discounts apply to the books currently in
//! the cart. The result feeds [`bookcart_core::compute_discount`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     get_offers_from_bulk(total)                         │
//! │                                                                         │
//! │  total == 0 ──────────────► callback(Skipped), no request              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  isbns = cart.isbns()  ──► "<base>/books/a,b,c/commercialOffers"        │
//! │       │                    (remembered as resource_url)                 │
//! │       ▼                                                                 │
//! │  OfferTransport::get   ──► 2xx: parse CommercialOffers                  │
//! │       │                     │    callback(Found(offers)), Ok(..)        │
//! │       │                     └──► non-2xx: callback(Rejected { body })   │
//! │       │                                   Err(Rejected { body })        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Offers endpoint configuration
//! - [`error`] - Offer retrieval errors
//! - [`transport`] - HTTP seam (reqwest in production, fakes in tests)
//! - [`service`] - The retrieval service itself

pub mod config;
pub mod error;
pub mod service;
pub mod transport;

pub use config::OffersConfig;
pub use error::{OffersError, OffersResult};
pub use service::{OfferLookup, OfferService};
pub use transport::{HttpTransport, OfferTransport, TransportResponse};
