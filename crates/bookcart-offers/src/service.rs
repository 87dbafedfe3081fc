//! # Offer Service
//!
//! Fetches the commercial offers for every book in the cart with one bulk
//! request.
//!
//! ## Outcomes
//! ```text
//! ┌───────────────────┬──────────────────────┬──────────────────────────────┐
//! │ Situation         │ Callback             │ Return                       │
//! ├───────────────────┼──────────────────────┼──────────────────────────────┤
//! │ total == 0        │ Skipped              │ Ok(Skipped), no request      │
//! │ 2xx + valid body  │ Found(offers)        │ Ok(Found(offers))            │
//! │ 2xx + bad body    │ not invoked          │ Err(Parse)                   │
//! │ non-2xx           │ Rejected { body }    │ Err(Rejected { body })       │
//! │ no response       │ not invoked          │ Err(Http / Transport)        │
//! └───────────────────┴──────────────────────┴──────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use bookcart_core::{CommercialOffers, Offer};
use bookcart_store::{CartManager, CartStore};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::OffersConfig;
use crate::error::{OffersError, OffersResult};
use crate::transport::{HttpTransport, OfferTransport};

/// What a lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferLookup {
    /// Cart total was zero; nothing was requested.
    Skipped,
    /// Offers returned by the endpoint.
    Found(CommercialOffers),
    /// The endpoint answered with a non-success status and this error body.
    /// Only ever passed to the callback; the caller receives
    /// [`OffersError::Rejected`].
    Rejected { status: u16, body: Value },
}

impl OfferLookup {
    /// Offer list to hand to the discount calculator. `None` when skipped
    /// or rejected.
    pub fn offers(&self) -> Option<&[Offer]> {
        match self {
            OfferLookup::Skipped | OfferLookup::Rejected { .. } => None,
            OfferLookup::Found(found) => Some(&found.offers),
        }
    }
}

/// Offer retrieval service.
#[derive(Debug)]
pub struct OfferService<T> {
    transport: T,
    config: OffersConfig,
    resource_url: Mutex<Option<String>>,
}

impl OfferService<HttpTransport> {
    /// Validates `config` and builds a service on a fresh HTTP client.
    pub fn http(config: OffersConfig) -> OffersResult<Self> {
        config.validate()?;
        Ok(Self::new(HttpTransport::new()?, config))
    }
}

impl<T: OfferTransport> OfferService<T> {
    pub fn new(transport: T, config: OffersConfig) -> Self {
        Self {
            transport,
            config,
            resource_url: Mutex::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &OffersConfig {
        &self.config
    }

    /// URL of the most recent request, if any was made.
    pub fn resource_url(&self) -> Option<String> {
        self.resource_url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches the offers for the ISBNs currently in `cart`, in cart order.
    ///
    /// `callback` sees `Skipped` when `total` is zero, `Found` after a
    /// successful parse and `Rejected` with the server's error body on a
    /// non-success status. Transport and parse failures are only reported
    /// through the returned error.
    pub async fn get_offers_from_bulk<S, F>(
        &self,
        cart: &CartManager<S>,
        total: f64,
        callback: Option<F>,
    ) -> OffersResult<OfferLookup>
    where
        S: CartStore,
        F: FnOnce(&OfferLookup),
    {
        if total == 0.0 {
            debug!("Cart total is zero, skipping offers request");
            let lookup = OfferLookup::Skipped;
            if let Some(callback) = callback {
                callback(&lookup);
            }
            return Ok(lookup);
        }

        let isbns = cart.isbns();
        if isbns.is_empty() {
            warn!(total, "Requesting offers for an empty cart");
        }

        let url = self.config.offers_url(&isbns);
        *self.resource_url.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.clone());

        debug!(url = %url, books = isbns.len(), "Requesting commercial offers");
        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            let body = serde_json::from_str::<Value>(&response.body)
                .unwrap_or(Value::String(response.body));
            warn!(status = response.status, body = %body, "Offers request rejected");
            if let Some(callback) = callback {
                callback(&OfferLookup::Rejected {
                    status: response.status,
                    body: body.clone(),
                });
            }
            return Err(OffersError::Rejected {
                status: response.status,
                body,
            });
        }

        let offers: CommercialOffers = serde_json::from_str(&response.body)
            .map_err(|e| OffersError::Parse(e.to_string()))?;
        info!(count = offers.offers.len(), "Commercial offers received");

        let lookup = OfferLookup::Found(offers);
        if let Some(callback) = callback {
            callback(&lookup);
        }
        Ok(lookup)
    }

    /// [`Self::get_offers_from_bulk`] without a callback.
    pub async fn fetch_offers<S: CartStore>(
        &self,
        cart: &CartManager<S>,
        total: f64,
    ) -> OffersResult<OfferLookup> {
        self.get_offers_from_bulk(cart, total, None::<fn(&OfferLookup)>)
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
