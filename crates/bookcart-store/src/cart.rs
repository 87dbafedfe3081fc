//! # Cart State
//!
//! Cart operations against an injected [`CartStore`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Front end action         CartManager              Store change         │
//! │  ────────────────         ───────────              ────────────         │
//! │                                                                         │
//! │  Click "add" ────────────► add_to_cart() ────────► [..items, new]       │
//! │                                                                         │
//! │  Click "remove" ─────────► remove_from_cart() ───► items − keyid        │
//! │                                                                         │
//! │  Empty the cart ─────────► clear_cart() ─────────► []                   │
//! │                                                                         │
//! │  Render badge ───────────► count() / print_count()  (read only)        │
//! │                                                                         │
//! │  NOTE: every write re-serializes the WHOLE sequence and refreshes the   │
//! │        TTL. There is no incremental update and no transaction.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookcart_core::{cart_total, ItemPayload, LineItem, CART_TTL_DAYS, DEFAULT_CART_KEY};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::CartStore;

/// Anything the cart count can be written into (a badge, a label, a buffer).
pub trait DisplaySink {
    fn set_text(&mut self, text: &str);
}

impl DisplaySink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Cart operations bound to one store key.
///
/// Holds no cart data itself: every call goes back to the store, so several
/// managers over the same store always agree.
///
/// ## Usage
/// ```rust,ignore
/// let cart = CartManager::new(FileStore::new(dir))
///     .with_key("cpascher_cart")
///     .with_ttl_days(1);
/// cart.add_to_cart(payload)?;
/// ```
#[derive(Debug, Clone)]
pub struct CartManager<S> {
    store: S,
    key: String,
    ttl_days: u32,
}

impl<S: CartStore> CartManager<S> {
    /// Creates a manager using the default key and a one-day TTL.
    pub fn new(store: S) -> Self {
        CartManager {
            store,
            key: DEFAULT_CART_KEY.to_string(),
            ttl_days: CART_TTL_DAYS,
        }
    }

    /// Sets the store key the cart is kept under.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the TTL applied on every write.
    pub fn with_ttl_days(mut self, ttl_days: u32) -> Self {
        self.ttl_days = ttl_days;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cart contents in insertion order.
    ///
    /// Never fails: a missing, expired, unreadable or corrupt cart reads as
    /// empty.
    pub fn read_cart(&self) -> Vec<LineItem> {
        let raw = match self.store.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart store unreadable, treating cart as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is corrupt, treating cart as empty");
                Vec::new()
            }
        }
    }

    /// Appends an item built from `payload` and persists the cart.
    ///
    /// ## Behavior
    /// - `None`, or a payload without a usable `isbn`: nothing happens,
    ///   `Ok(None)` is returned
    /// - Otherwise the item gets a fresh `keyid` unique within the cart and
    ///   is returned
    ///
    /// Only a failed write is an error.
    pub fn add_to_cart(&self, payload: Option<ItemPayload>) -> StoreResult<Option<LineItem>> {
        let Some(payload) = payload else {
            debug!("add_to_cart called without payload, ignoring");
            return Ok(None);
        };

        let mut item = match LineItem::from_payload(payload) {
            Ok(item) => item,
            Err(e) => {
                debug!(error = %e, "Unusable item payload, ignoring");
                return Ok(None);
            }
        };

        let mut items = self.read_cart();
        while items.iter().any(|existing| existing.keyid == item.keyid) {
            item.keyid = bookcart_core::new_keyid();
        }
        items.push(item.clone());

        self.persist(&items)?;
        debug!(isbn = %item.isbn, keyid = %item.keyid, count = items.len(), "Item added to cart");
        Ok(Some(item))
    }

    /// Removes the item with `keyid` and persists the remaining items in
    /// their original order. Removing an unknown `keyid` changes nothing.
    pub fn remove_from_cart(&self, keyid: &str) -> StoreResult<()> {
        let items = self.read_cart();
        let before = items.len();

        let remaining: Vec<LineItem> = items
            .into_iter()
            .filter(|item| item.keyid != keyid)
            .collect();

        self.persist(&remaining)?;
        debug!(
            keyid,
            removed = before - remaining.len(),
            count = remaining.len(),
            "remove_from_cart"
        );
        Ok(())
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> StoreResult<()> {
        self.persist(&[])?;
        debug!(key = %self.key, "Cart cleared");
        Ok(())
    }

    /// Number of items in the cart, 0 when there is no cart.
    pub fn count(&self) -> usize {
        self.read_cart().len()
    }

    /// Writes the current count into `sink`. Does nothing without a sink.
    pub fn print_count(&self, sink: Option<&mut dyn DisplaySink>) {
        if let Some(sink) = sink {
            sink.set_text(&self.count().to_string());
        }
    }

    /// Sum of the item prices currently in the cart.
    pub fn total(&self) -> f64 {
        cart_total(&self.read_cart())
    }

    /// The ISBN of every item, in cart order (duplicates kept).
    pub fn isbns(&self) -> Vec<String> {
        self.read_cart().into_iter().map(|item| item.isbn).collect()
    }

    fn persist(&self, items: &[LineItem]) -> StoreResult<()> {
        let json = serde_json::to_string(items)?;
        self.store.save(&self.key, &json, self.ttl_days)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn book(isbn: &str, price: f64) -> Option<ItemPayload> {
        match json!({ "isbn": isbn, "title": format!("Book {isbn}"), "price": price }) {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl CartStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str, _ttl_days: u32) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_empty_cart_reads_empty() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);

        assert!(cart.read_cart().is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_add_appends_with_unique_keyid() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);

        let first = cart.add_to_cart(book("a", 35.0)).unwrap().unwrap();
        let before = cart.read_cart();

        let second = cart.add_to_cart(book("a", 35.0)).unwrap().unwrap();
        let after = cart.read_cart();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last(), Some(&second));
        assert_ne!(first.keyid, second.keyid);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_without_usable_payload_is_noop() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);
        cart.add_to_cart(book("a", 35.0)).unwrap();

        assert!(cart.add_to_cart(None).unwrap().is_none());

        let no_isbn = json!({ "title": "anonymous" }).as_object().cloned();
        assert!(cart.add_to_cart(no_isbn).unwrap().is_none());

        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);

        let a = cart.add_to_cart(book("a", 35.0)).unwrap().unwrap();
        let b = cart.add_to_cart(book("b", 30.0)).unwrap().unwrap();
        let c = cart.add_to_cart(book("c", 29.0)).unwrap().unwrap();

        cart.remove_from_cart(&b.keyid).unwrap();

        assert_eq!(cart.read_cart(), vec![a, c]);
    }

    #[test]
    fn test_remove_unknown_keyid_is_noop() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);
        cart.add_to_cart(book("a", 35.0)).unwrap();
        let before = cart.read_cart();

        cart.remove_from_cart("no-such-key").unwrap();
        assert_eq!(cart.read_cart(), before);

        // Removing from a cart that was never created leaves it empty
        let empty = CartManager::new(MemoryStore::new());
        empty.remove_from_cart("no-such-key").unwrap();
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_clear_and_total() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);
        cart.add_to_cart(book("a", 35.0)).unwrap();
        cart.add_to_cart(book("b", 30.0)).unwrap();

        assert_eq!(cart.total(), 65.0);
        assert_eq!(cart.isbns(), vec!["a".to_string(), "b".to_string()]);

        cart.clear_cart().unwrap();
        assert_eq!(cart.count(), 0);
        assert_eq!(store.load(DEFAULT_CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_cart_reads_empty() {
        let store = MemoryStore::new();
        store.save(DEFAULT_CART_KEY, "{not a list", 1).unwrap();

        let cart = CartManager::new(&store);
        assert!(cart.read_cart().is_empty());

        // The next write replaces the corrupt value
        cart.add_to_cart(book("a", 35.0)).unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_persisted_form_is_a_json_array() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store).with_key("other_cart");
        let item = cart.add_to_cart(book("a", 35.0)).unwrap().unwrap();

        let raw = store.load("other_cart").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!([{ "isbn": "a", "keyid": item.keyid, "title": "Book a", "price": 35.0 }])
        );
        assert!(store.load(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_expired_cart_reads_empty() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store).with_ttl_days(0);
        cart.add_to_cart(book("a", 35.0)).unwrap();

        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_write_failure_surfaces() {
        let cart = CartManager::new(ReadOnlyStore);
        assert!(matches!(
            cart.add_to_cart(book("a", 35.0)),
            Err(StoreError::Io(_))
        ));
        assert!(cart.remove_from_cart("x").is_err());
    }

    #[test]
    fn test_print_count() {
        let store = MemoryStore::new();
        let cart = CartManager::new(&store);
        cart.add_to_cart(book("a", 35.0)).unwrap();
        cart.add_to_cart(book("b", 30.0)).unwrap();

        let mut badge = String::from("stale");
        cart.print_count(Some(&mut badge));
        assert_eq!(badge, "2");

        cart.print_count(None);
    }
}
