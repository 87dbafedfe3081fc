//! # Cart Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bookcart add '%7B%22isbn%22%3A...%7D'  ──► decode ──► add_to_cart      │
//! │  bookcart remove <keyid>                ──► remove_from_cart            │
//! │  bookcart list                          ──► read_cart + total           │
//! │  bookcart count                         ──► print_count                 │
//! │  bookcart clear                         ──► clear_cart                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use bookcart_core::validation::decode_trigger_payload;
use bookcart_core::round_cents;
use bookcart_store::{CartManager, CartStore};
use tracing::debug;

use crate::error::CliResult;

/// Adds the item described by a URL-encoded JSON trigger payload.
///
/// A payload that does not decode, or has no usable `isbn`, adds nothing.
pub fn add<S: CartStore>(cart: &CartManager<S>, raw: &str, out: &mut impl Write) -> CliResult<()> {
    let payload = match decode_trigger_payload(raw) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(error = %e, "Ignoring undecodable trigger payload");
            None
        }
    };

    match cart.add_to_cart(payload)? {
        Some(item) => writeln!(out, "Added {} as {}", item.isbn, item.keyid)?,
        None => writeln!(out, "Nothing added: payload has no usable isbn")?,
    }
    Ok(())
}

pub fn remove<S: CartStore>(
    cart: &CartManager<S>,
    keyid: &str,
    out: &mut impl Write,
) -> CliResult<()> {
    let before = cart.count();
    cart.remove_from_cart(keyid)?;
    let after = cart.count();

    if after < before {
        writeln!(out, "Removed {keyid}")?;
    } else {
        writeln!(out, "No item with keyid {keyid}")?;
    }
    Ok(())
}

pub fn list<S: CartStore>(cart: &CartManager<S>, out: &mut impl Write) -> CliResult<()> {
    let items = cart.read_cart();
    if items.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for item in &items {
        let price = item
            .price()
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{}  {}  {}  {}",
            item.keyid,
            item.isbn,
            item.title().unwrap_or("(untitled)"),
            price
        )?;
    }
    writeln!(out, "Total: {:.2}", round_cents(bookcart_core::cart_total(&items)))?;
    Ok(())
}

pub fn count<S: CartStore>(cart: &CartManager<S>, out: &mut impl Write) -> CliResult<()> {
    let mut badge = String::new();
    cart.print_count(Some(&mut badge));
    writeln!(out, "{badge}")?;
    Ok(())
}

pub fn clear<S: CartStore>(cart: &CartManager<S>, out: &mut impl Write) -> CliResult<()> {
    cart.clear_cart()?;
    writeln!(out, "Cart cleared")?;
    Ok(())
}
