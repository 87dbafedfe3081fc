//! # Discount Module
//!
//! Picks the single best discount among the commercial offers of a cart.
//!
//! ## Three Independent Tracks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total = 65.00, offers = [4%, -15, 12 per 100]                          │
//! │                                                                         │
//! │  percentage track:  65.00 × (1 − 4/100)          = 62.40                │
//! │  minus track:       65.00 − 15                   = 50.00  ◄── lowest    │
//! │  slice track:       65.00 ≤ 100, unchanged       = 65.00                │
//! │                                                                         │
//! │  discount = 65.00 − min(62.40, 50.00, 65.00)     = 15.00                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The kinds are alternatives, never stacked. Within a kind, the last offer
//! in the input replaces any earlier one.

use crate::types::{Offer, OfferKind};

/// The three track totals for one cart total, and the discount they yield.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountBreakdown {
    pub total: f64,
    pub percentage_track: f64,
    pub minus_track: f64,
    pub slice_track: f64,
    /// Track that produced the lowest price, `None` when no track beats
    /// the undiscounted total.
    pub best: Option<OfferKind>,
    /// `total - min(tracks)`, rounded to cents.
    pub discount: f64,
}

impl DiscountBreakdown {
    /// Price the customer pays after the discount.
    pub fn discounted_total(&self) -> f64 {
        round_cents(self.total - self.discount)
    }
}

/// Evaluates every track against `total` and selects the cheapest.
pub fn best_offer(total: f64, offers: &[Offer]) -> DiscountBreakdown {
    let mut percentage_track = total;
    let mut minus_track = total;
    let mut slice_track = total;

    for offer in offers {
        match offer.kind {
            OfferKind::Percentage => percentage_track = total * (1.0 - offer.value / 100.0),
            OfferKind::Minus => minus_track = total - offer.value,
            OfferKind::Slice => slice_track = slice_price(total, offer),
            OfferKind::Unknown => {}
        }
    }

    let lowest = percentage_track.min(minus_track).min(slice_track);
    let best = [
        (OfferKind::Percentage, percentage_track),
        (OfferKind::Minus, minus_track),
        (OfferKind::Slice, slice_track),
    ]
    .into_iter()
    .find(|&(_, track)| track == lowest && track < total)
    .map(|(kind, _)| kind);

    DiscountBreakdown {
        total,
        percentage_track,
        minus_track,
        slice_track,
        best,
        discount: round_cents(total - lowest),
    }
}

/// Computes the best discount for `total`.
///
/// Returns 0 when the cart is empty (`total == 0`) or no offers were
/// retrieved. Never fails.
pub fn compute_discount(total: f64, offers: Option<&[Offer]>) -> f64 {
    match offers {
        Some(offers) if total != 0.0 => best_offer(total, offers).discount,
        _ => 0.0,
    }
}

// A slice without a positive width never applies.
fn slice_price(total: f64, offer: &Offer) -> f64 {
    match offer.slice_value {
        Some(width) if width > 0.0 && total > width => {
            total - (total / width).floor() * offer.value
        }
        _ => total,
    }
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
