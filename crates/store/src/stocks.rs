//! Wiring of the stocks module into a store.

use std::sync::Arc;

use stocktrader_events::MutationBus;
use stocktrader_stocks::{
    DefaultStocks, JsonFileStocks, MODULE_NAME, Stock, StockOrder, StockSource, StocksAction,
    StocksModule, StocksState,
};

use crate::config::StoreConfig;
use crate::store::{DispatchError, LocalStore, RecordOf, Store};

/// The stocks module with its data source chosen at runtime.
pub type DynStocksModule = StocksModule<Arc<dyn StockSource>>;

/// The stocks store as hosted by the binary.
pub type StocksStore = LocalStore<DynStocksModule>;

/// Pick the stock-data source named by the configuration.
pub fn stock_source(config: &StoreConfig) -> Arc<dyn StockSource> {
    match &config.stocks_file {
        Some(path) => Arc::new(JsonFileStocks::new(path)),
        None => Arc::new(DefaultStocks),
    }
}

/// Build an empty stocks store (`{ stocks: [] }`) from configuration.
pub fn stocks_store(config: &StoreConfig) -> StocksStore {
    let module = StocksModule::new(stock_source(config));
    Store::with_config(MODULE_NAME, module, StocksState::new(), config)
}

impl<S, B> Store<StocksModule<S>, B>
where
    S: StockSource,
    B: MutationBus<RecordOf<StocksModule<S>>>,
{
    /// Getter `stocks`, copied out of the lock.
    pub fn stocks(&self) -> Result<Vec<Stock>, DispatchError> {
        self.read(|state| state.stocks().to_vec())
    }

    /// Action `initStocks`.
    pub fn init_stocks(&self) -> Result<Vec<RecordOf<StocksModule<S>>>, DispatchError> {
        self.dispatch(StocksAction::InitStocks)
    }

    /// Action `randomizeStocks`.
    pub fn randomize_stocks(&self) -> Result<Vec<RecordOf<StocksModule<S>>>, DispatchError> {
        self.dispatch(StocksAction::RandomizeStocks)
    }

    /// Action `buyStock`.
    pub fn buy_stock(
        &self,
        order: StockOrder,
    ) -> Result<Vec<RecordOf<StocksModule<S>>>, DispatchError> {
        self.dispatch(StocksAction::BuyStock(order))
    }
}
