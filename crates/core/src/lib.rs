//! Cartwheel Core - Shared domain types.
//!
//! This crate provides the types shared by Cartwheel components:
//! - `storefront` - Public-facing store server
//!
//! # Architecture
//!
//! The core crate contains only types and their operations - no I/O, no
//! HTTP clients, no storage backends. Everything here is deterministic and
//! testable without a running server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for SKUs and cart line IDs
//! - [`cart`] - The ordered cart sequence and its operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
