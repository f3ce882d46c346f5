//! Stocks state module.
//!
//! Holds the list of stocks shown by the trading client and mediates every
//! change to it through named actions and mutations. There is no pricing or
//! order logic here; the list comes from a `StockSource` and is only ever
//! replaced wholesale.

pub mod module;
pub mod source;
pub mod stock;

pub use module::{
    MODULE_NAME, StocksAction, StocksActionKind, StocksModule, StocksMutation,
    StocksMutationKind, StocksState,
};
pub use source::{DefaultStocks, JsonFileStocks, StaticStocks, StockSource, default_stocks};
pub use stock::{Stock, StockOrder};
