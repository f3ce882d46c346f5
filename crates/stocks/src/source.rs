//! The external stock-data collaborator consumed by `initStocks`.

use std::path::PathBuf;

use stocktrader_core::{StoreError, StoreResult};

use crate::Stock;

/// Supplies the default stock collection.
///
/// The format behind a source is its own business; the module only sees the
/// resulting list.
pub trait StockSource: Send + Sync + core::fmt::Debug {
    fn load(&self) -> StoreResult<Vec<Stock>>;
}

impl<T> StockSource for std::sync::Arc<T>
where
    T: StockSource + ?Sized,
{
    fn load(&self) -> StoreResult<Vec<Stock>> {
        (**self).load()
    }
}

/// The built-in stock universe.
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultStocks;

impl StockSource for DefaultStocks {
    fn load(&self) -> StoreResult<Vec<Stock>> {
        Ok(default_stocks())
    }
}

/// The stocks the client boots with when no data file is configured.
pub fn default_stocks() -> Vec<Stock> {
    vec![
        Stock::new(1, "BMW", 110),
        Stock::new(2, "Google", 200),
        Stock::new(3, "Apple", 250),
        Stock::new(4, "Twitter", 8),
    ]
}

/// A fixed, caller-supplied list (fixtures, embedding hosts).
#[derive(Debug, Clone, Default)]
pub struct StaticStocks(Vec<Stock>);

impl StaticStocks {
    pub fn new(stocks: Vec<Stock>) -> Self {
        Self(stocks)
    }
}

impl StockSource for StaticStocks {
    fn load(&self) -> StoreResult<Vec<Stock>> {
        Ok(self.0.clone())
    }
}

/// Reads a JSON array of stocks from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileStocks {
    path: PathBuf,
}

impl JsonFileStocks {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StockSource for JsonFileStocks {
    fn load(&self) -> StoreResult<Vec<Stock>> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::unavailable(format!("{}: {e}", self.path.display())))?;
        let stocks: Vec<Stock> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::parse(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), count = stocks.len(), "loaded stock data");
        Ok(stocks)
    }
}
