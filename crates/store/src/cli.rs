//! Command-line action parsing for the `stocktrader` binary.

use stocktrader_core::{StoreError, StoreResult};
use stocktrader_stocks::{StocksAction, StocksActionKind};

/// Parse one command-line action: a bare action name for payload-free
/// actions, or a JSON object such as
/// `{"type":"buyStock","payload":{"stockId":1,"stockPrice":110,"quantity":5}}`.
pub fn parse_action(arg: &str) -> StoreResult<StocksAction> {
    if arg.trim_start().starts_with('{') {
        return serde_json::from_str(arg)
            .map_err(|e| StoreError::parse(format!("invalid action JSON {arg}: {e}")));
    }
    match arg.parse::<StocksActionKind>()? {
        StocksActionKind::InitStocks => Ok(StocksAction::InitStocks),
        StocksActionKind::RandomizeStocks => Ok(StocksAction::RandomizeStocks),
        StocksActionKind::BuyStock => Err(StoreError::parse(
            "buyStock needs an order payload; pass it as JSON",
        )),
    }
}

/// Parse every argument in order; no arguments means `initStocks`.
pub fn parse_actions<I, S>(args: I) -> StoreResult<Vec<StocksAction>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let actions = args
        .into_iter()
        .map(|a| parse_action(a.as_ref()))
        .collect::<StoreResult<Vec<_>>>()?;
    if actions.is_empty() {
        return Ok(vec![StocksAction::InitStocks]);
    }
    Ok(actions)
}
