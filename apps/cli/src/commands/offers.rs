//! # Offers Command
//!
//! Fetches the commercial offers for the current cart and prints how each
//! discount track prices it.
//!
//! ```text
//! Subtotal:   65.00
//! Offers:     percentage 5, minus 15, slice 12 per 100
//! Best offer: minus
//! Discount:   15.00
//! To pay:     50.00
//! ```

use std::io::Write;

use bookcart_core::{best_offer, round_cents, Offer, OfferKind};
use bookcart_offers::{OfferLookup, OfferService, OfferTransport};
use bookcart_store::{CartManager, CartStore};
use tracing::debug;

use crate::error::CliResult;

pub async fn show<S, T>(
    cart: &CartManager<S>,
    service: &OfferService<T>,
    out: &mut impl Write,
) -> CliResult<()>
where
    S: CartStore,
    T: OfferTransport,
{
    let total = round_cents(cart.total());

    let lookup = service
        .get_offers_from_bulk(
            cart,
            total,
            Some(|lookup: &OfferLookup| debug!(?lookup, "Offer lookup finished")),
        )
        .await?;

    let Some(offers) = lookup.offers() else {
        writeln!(out, "Cart total is 0.00, no offers requested")?;
        return Ok(());
    };

    let breakdown = best_offer(total, offers);
    let listed = if offers.is_empty() {
        "none".to_string()
    } else {
        offers.iter().map(describe).collect::<Vec<_>>().join(", ")
    };

    writeln!(out, "Subtotal:   {total:.2}")?;
    writeln!(out, "Offers:     {listed}")?;
    match breakdown.best {
        Some(kind) => writeln!(out, "Best offer: {kind}")?,
        None => writeln!(out, "Best offer: none")?,
    }
    writeln!(out, "Discount:   {:.2}", breakdown.discount)?;
    writeln!(out, "To pay:     {:.2}", breakdown.discounted_total())?;
    Ok(())
}

fn describe(offer: &Offer) -> String {
    match (offer.kind, offer.slice_value) {
        (OfferKind::Slice, Some(width)) => format!("slice {} per {}", offer.value, width),
        (kind, _) => format!("{kind} {}", offer.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookcart_offers::{OffersConfig, OffersError, OffersResult, TransportResponse};
    use bookcart_store::MemoryStore;
    use serde_json::json;

    struct CannedTransport(u16, &'static str);

    impl OfferTransport for CannedTransport {
        async fn get(&self, _url: &str) -> OffersResult<TransportResponse> {
            Ok(TransportResponse {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    fn service(status: u16, body: &'static str) -> OfferService<CannedTransport> {
        OfferService::new(CannedTransport(status, body), OffersConfig::new("http://books.test"))
    }

    fn cart_with_prices<'a>(
        store: &'a MemoryStore,
        prices: &[f64],
    ) -> CartManager<&'a MemoryStore> {
        let cart = CartManager::new(store);
        for (i, price) in prices.iter().enumerate() {
            let payload = json!({ "isbn": format!("isbn-{i}"), "price": price });
            cart.add_to_cart(payload.as_object().cloned()).unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn test_prints_best_offer() {
        let store = MemoryStore::new();
        let cart = cart_with_prices(&store, &[35.0, 30.0]);
        let service = service(
            200,
            r#"{"offers":[{"type":"percentage","value":5},{"type":"minus","value":15},{"type":"slice","sliceValue":100,"value":12}]}"#,
        );

        let mut out = Vec::new();
        show(&cart, &service, &mut out).await.unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(
            printed,
            "Subtotal:   65.00\n\
             Offers:     percentage 5, minus 15, slice 12 per 100\n\
             Best offer: minus\n\
             Discount:   15.00\n\
             To pay:     50.00\n"
        );
        assert_eq!(
            service.resource_url().as_deref(),
            Some("http://books.test/books/isbn-0,isbn-1/commercialOffers")
        );
    }

    #[tokio::test]
    async fn test_empty_cart_skips_request() {
        let store = MemoryStore::new();
        let cart = cart_with_prices(&store, &[]);
        let service = service(500, "should not be requested");

        let mut out = Vec::new();
        show(&cart, &service, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Cart total is 0.00, no offers requested\n"
        );
        assert!(service.resource_url().is_none());
    }

    #[tokio::test]
    async fn test_rejection_is_an_error() {
        let store = MemoryStore::new();
        let cart = cart_with_prices(&store, &[10.0]);
        let service = service(404, r#"{"error":"unknown book"}"#);

        let mut out = Vec::new();
        let err = show(&cart, &service, &mut out).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Offers(OffersError::Rejected { status: 404, .. })
        ));
        assert_eq!(err.exit_code(), 65);
        assert!(out.is_empty());
    }
}
