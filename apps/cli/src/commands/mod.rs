//! # CLI Commands
//!
//! One module per command group. Commands write their human-readable output
//! to the `out` writer they are given (stdout in `main`, a buffer in tests)
//! and leave logging to `tracing`, which goes to stderr.
//!
//! - [`cart`] - add, remove, list, count, clear
//! - [`offers`] - fetch offers for the cart and explain the best discount
//! - [`config`] - print the effective configuration

pub mod cart;
pub mod config;
pub mod offers;
