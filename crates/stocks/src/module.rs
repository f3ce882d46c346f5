//! The stocks state module: state container, mutators, actions, getter.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stocktrader_core::{Module, StoreError, Versioned};
use stocktrader_events::{Action, Mutation};

use crate::{Stock, StockOrder, StockSource};

/// Name under which this module's mutations are recorded.
pub const MODULE_NAME: &str = "stocks";

/// State container: the current stock collection.
///
/// Fields are private; `StocksModule::commit` is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StocksState {
    stocks: Vec<Stock>,
    version: u64,
}

impl StocksState {
    /// Initial state: `{ stocks: [] }`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Getter `stocks`: the collection as last committed.
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }
}

impl Versioned for StocksState {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Mutation: the committed transitions of the stocks module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StocksMutation {
    /// Replace the collection wholesale.
    #[serde(rename = "SET_STOCKS")]
    SetStocks(Vec<Stock>),
    /// Declared re-randomisation of the collection. Stub: leaves state as is.
    #[serde(rename = "RND_STOCKS")]
    RandomizeStocks,
    /// Committed by `buyStock`. No buy semantics are defined for this module,
    /// so this is a stub as well.
    #[serde(rename = "BUY_STOCK")]
    BuyStock(StockOrder),
}

impl StocksMutation {
    pub fn kind(&self) -> StocksMutationKind {
        match self {
            StocksMutation::SetStocks(_) => StocksMutationKind::SetStocks,
            StocksMutation::RandomizeStocks => StocksMutationKind::RandomizeStocks,
            StocksMutation::BuyStock(_) => StocksMutationKind::BuyStock,
        }
    }
}

impl Mutation for StocksMutation {
    fn mutation_type(&self) -> &'static str {
        self.kind().as_str()
    }

    fn is_noop(&self) -> bool {
        !matches!(self, StocksMutation::SetStocks(_))
    }
}

/// Payload-free mutation names (`"SET_STOCKS"`, `"RND_STOCKS"`, `"BUY_STOCK"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StocksMutationKind {
    SetStocks,
    RandomizeStocks,
    BuyStock,
}

impl StocksMutationKind {
    pub const ALL: [StocksMutationKind; 3] = [
        StocksMutationKind::SetStocks,
        StocksMutationKind::RandomizeStocks,
        StocksMutationKind::BuyStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StocksMutationKind::SetStocks => "SET_STOCKS",
            StocksMutationKind::RandomizeStocks => "RND_STOCKS",
            StocksMutationKind::BuyStock => "BUY_STOCK",
        }
    }
}

impl FromStr for StocksMutationKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StoreError::unknown_mutation(s))
    }
}

/// Action: public entry points of the stocks module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum StocksAction {
    BuyStock(StockOrder),
    InitStocks,
    RandomizeStocks,
}

impl StocksAction {
    pub fn kind(&self) -> StocksActionKind {
        match self {
            StocksAction::BuyStock(_) => StocksActionKind::BuyStock,
            StocksAction::InitStocks => StocksActionKind::InitStocks,
            StocksAction::RandomizeStocks => StocksActionKind::RandomizeStocks,
        }
    }
}

impl Action for StocksAction {
    fn action_type(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Payload-free action names (`"buyStock"`, `"initStocks"`, `"randomizeStocks"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StocksActionKind {
    BuyStock,
    InitStocks,
    RandomizeStocks,
}

impl StocksActionKind {
    pub const ALL: [StocksActionKind; 3] = [
        StocksActionKind::BuyStock,
        StocksActionKind::InitStocks,
        StocksActionKind::RandomizeStocks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StocksActionKind::BuyStock => "buyStock",
            StocksActionKind::InitStocks => "initStocks",
            StocksActionKind::RandomizeStocks => "randomizeStocks",
        }
    }
}

impl FromStr for StocksActionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StoreError::unknown_action(s))
    }
}

/// The stocks module, parameterised over its stock-data collaborator.
#[derive(Debug, Clone, Default)]
pub struct StocksModule<S> {
    source: S,
}

impl<S> StocksModule<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> Module for StocksModule<S>
where
    S: StockSource,
{
    type State = StocksState;
    type Action = StocksAction;
    type Mutation = StocksMutation;
    type Error = StoreError;

    fn commit(state: &mut StocksState, mutation: StocksMutation) {
        match mutation {
            StocksMutation::SetStocks(stocks) => set_stocks(state, stocks),
            StocksMutation::RandomizeStocks => randomize_stocks(state),
            StocksMutation::BuyStock(order) => buy_stock(state, &order),
        }

        // One version per commit, stubs included.
        state.version += 1;
    }

    fn dispatch(
        &self,
        _state: &StocksState,
        action: &StocksAction,
    ) -> Result<Vec<StocksMutation>, StoreError> {
        match action {
            StocksAction::BuyStock(order) => Ok(vec![StocksMutation::BuyStock(order.clone())]),
            StocksAction::InitStocks => {
                let stocks = self.source.load()?;
                tracing::info!(count = stocks.len(), "initialising stocks");
                Ok(vec![StocksMutation::SetStocks(stocks)])
            }
            StocksAction::RandomizeStocks => Ok(vec![StocksMutation::RandomizeStocks]),
        }
    }
}

fn set_stocks(state: &mut StocksState, stocks: Vec<Stock>) {
    state.stocks = stocks;
}

fn randomize_stocks(_state: &mut StocksState) {
    // No randomisation rule is defined yet; the collection is left unchanged.
    tracing::warn!("RND_STOCKS committed; stock randomisation is not defined, state unchanged");
}

fn buy_stock(_state: &mut StocksState, order: &StockOrder) {
    tracing::warn!(
        stock_id = order.stock_id,
        quantity = order.quantity,
        "BUY_STOCK committed; stocks module defines no buy transition, state unchanged"
    );
}
