//! `stocktrader-core` — state module building blocks.
//!
//! This crate contains the **pure** primitives shared by every state module
//! (no locking, no IO).

pub mod error;
pub mod module;

pub use error::{StoreError, StoreResult};
pub use module::{ExpectedVersion, Module, Versioned};
