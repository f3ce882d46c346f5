//! `stocktrader-store` — composition root for state modules.
//!
//! A `Store` owns exactly one state instance, serializes every write through
//! its module's mutations, keeps an audit history and notifies subscribers.

pub mod cli;
pub mod config;
pub mod stocks;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use config::StoreConfig;
pub use stocks::{DynStocksModule, StocksStore, stock_source, stocks_store};
pub use store::{DispatchError, LocalStore, RecordOf, Store};
