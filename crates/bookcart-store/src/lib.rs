//! # bookcart-store: Cart Persistence for bookcart
//!
//! The cart lives in a small expiring key-value store, the same way a web
//! storefront keeps it in a cookie. This crate provides that store as an
//! injected capability and the cart operations that run against it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bookcart Data Flow                               │
//! │                                                                         │
//! │  `bookcart add <payload>`                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bookcart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐          ┌─────────────────────────┐  │   │
//! │  │   │  CartManager       │          │  CartStore              │  │   │
//! │  │   │  (cart.rs)         │          │  (store.rs)             │  │   │
//! │  │   │                    │  load    │                         │  │   │
//! │  │   │  read_cart         │◄─────────│  MemoryStore            │  │   │
//! │  │   │  add_to_cart       │  save    │  FileStore              │  │   │
//! │  │   │  remove_from_cart  │─────────►│  (key, json, ttl_days)  │  │   │
//! │  │   │  count             │          │                         │  │   │
//! │  │   └────────────────────┘          └─────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bookcart_store::{CartManager, MemoryStore};
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! let cart = CartManager::new(&store);
//!
//! let payload = json!({ "isbn": "c8fabf68", "price": 35 });
//! let item = cart.add_to_cart(payload.as_object().cloned()).unwrap().unwrap();
//!
//! assert_eq!(cart.count(), 1);
//! cart.remove_from_cart(&item.keyid).unwrap();
//! assert_eq!(cart.count(), 0);
//! ```
//!
//! ## Concurrency
//! Each store call is internally synchronized, but a cart mutation is
//! `load → modify → save` with no transaction around it. Two overlapping
//! mutations of the same cart can lose one update. The cart belongs to a
//! single user, so this is accepted.

pub mod cart;
pub mod error;
pub mod store;

pub use cart::{CartManager, DisplaySink};
pub use error::{StoreError, StoreResult};
pub use store::{validate_key, CartStore, FileStore, MemoryStore};
