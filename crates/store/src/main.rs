use anyhow::Context;

use stocktrader_observability::LogFormat;
use stocktrader_store::{StoreConfig, cli, stocks_store};

fn main() -> anyhow::Result<()> {
    // Logging first so configuration warnings are not lost.
    stocktrader_observability::init_with(LogFormat::from_json_flag(
        StoreConfig::json_logs_from_env(),
    ));
    let config = StoreConfig::from_env();

    let actions = cli::parse_actions(std::env::args().skip(1))?;

    let store = stocks_store(&config);
    for action in actions {
        let records = store
            .dispatch(action.clone())
            .with_context(|| format!("dispatching {action:?}"))?;
        tracing::info!(module = store.name(), committed = records.len(), "action applied");
    }

    let stocks = store.stocks()?;
    println!("{}", serde_json::to_string_pretty(&stocks)?);
    Ok(())
}
