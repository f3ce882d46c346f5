//! Store-level tests for the stocks module.
//!
//! Tests: Action → Module::dispatch → Module::commit → history / subscribers → getter
//!
//! Verifies:
//! - The init → randomize → buy scenario leaves the collection as loaded
//! - History and subscribers see every commit, stubs included, in order
//! - Version checks and replay

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    use stocktrader_core::ExpectedVersion;
    use stocktrader_events::{
        InMemoryMutationBus, Mutation, MutationBus, ReplayError, Subscription,
    };
    use stocktrader_stocks::{
        MODULE_NAME, StaticStocks, Stock, StockOrder, StocksAction, StocksModule, StocksMutation,
        StocksState, default_stocks,
    };

    use crate::config::StoreConfig;
    use crate::stocks::stocks_store;
    use crate::store::{DispatchError, LocalStore, RecordOf, Store};

    fn acme() -> Vec<Stock> {
        vec![Stock::new(1, "ACME", 10)]
    }

    fn setup() -> LocalStore<StocksModule<StaticStocks>> {
        Store::new(
            MODULE_NAME,
            StocksModule::new(StaticStocks::new(acme())),
            StocksState::new(),
        )
    }

    fn order() -> StockOrder {
        StockOrder {
            stock_id: 1,
            stock_price: 10,
            quantity: 5,
        }
    }

    #[test]
    fn init_randomize_buy_scenario() {
        let store = setup();
        assert!(store.stocks().unwrap().is_empty());

        store.init_stocks().unwrap();
        assert_eq!(store.stocks().unwrap(), acme());

        store.randomize_stocks().unwrap();
        assert_eq!(store.stocks().unwrap(), acme());

        // Documented gap: buying does not touch the stock list.
        store.buy_stock(order()).unwrap();
        assert_eq!(store.stocks().unwrap(), acme());

        let names: Vec<_> = store
            .history()
            .unwrap()
            .iter()
            .map(|r| r.mutation_type())
            .collect();
        assert_eq!(names, ["SET_STOCKS", "RND_STOCKS", "BUY_STOCK"]);
        assert_eq!(store.version().unwrap(), 3);
    }

    #[test]
    fn dispatch_returns_committed_records() {
        let store = setup();
        let records = store.init_stocks().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence_number(), 1);
        assert_eq!(records[0].module(), MODULE_NAME);
        assert_eq!(records[0].payload(), &StocksMutation::SetStocks(acme()));

        let again = store.init_stocks().unwrap();
        assert_ne!(again[0].record_id(), records[0].record_id());
    }

    #[test]
    fn direct_commit_replaces_wholesale() {
        let store = setup();
        store.init_stocks().unwrap();

        let replacement = vec![Stock::new(9, "NEW", 1), Stock::new(10, "NEWER", 2)];
        store
            .commit(StocksMutation::SetStocks(replacement.clone()))
            .unwrap();

        assert_eq!(store.stocks().unwrap(), replacement);
        assert!(store.read(|s| s.stocks().iter().all(|st| st.name != "ACME")).unwrap());
    }

    #[test]
    fn subscribers_receive_commits_in_order() {
        let store = setup();
        let sub = store.subscribe();

        store.init_stocks().unwrap();
        store.randomize_stocks().unwrap();
        store.buy_stock(order()).unwrap();

        let first = sub.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(first.mutation_type(), "SET_STOCKS");

        let mut seen = vec![first];
        seen.extend(sub.drain());
        let seqs: Vec<_> = seen.iter().map(|r| r.sequence_number()).collect();
        assert_eq!(seqs, [1, 2, 3]);
        assert!(!seen[0].payload().is_noop());
        assert!(seen[1].payload().is_noop());
        assert!(seen[2].payload().is_noop());
    }

    #[test]
    fn stale_version_is_rejected_without_commit() {
        let store = setup();
        store.init_stocks().unwrap();

        let err = store
            .dispatch_expecting(ExpectedVersion::Exact(0), StocksAction::RandomizeStocks)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Conflict(_)));
        assert_eq!(store.version().unwrap(), 1);

        store
            .dispatch_expecting(ExpectedVersion::Exact(1), StocksAction::RandomizeStocks)
            .unwrap();
        assert_eq!(store.version().unwrap(), 2);
    }

    #[test]
    fn history_is_bounded_and_can_be_disabled() {
        let config = StoreConfig {
            history_limit: 2,
            ..StoreConfig::default()
        };
        let store = Store::with_config(
            MODULE_NAME,
            StocksModule::new(StaticStocks::new(acme())),
            StocksState::new(),
            &config,
        );
        store.init_stocks().unwrap();
        store.randomize_stocks().unwrap();
        store.randomize_stocks().unwrap();

        let seqs: Vec<_> = store
            .history()
            .unwrap()
            .iter()
            .map(|r| r.sequence_number())
            .collect();
        assert_eq!(seqs, [2, 3]);

        let silent = Store::with_config(
            MODULE_NAME,
            StocksModule::new(StaticStocks::new(acme())),
            StocksState::new(),
            &StoreConfig {
                history_limit: 0,
                ..StoreConfig::default()
            },
        );
        silent.init_stocks().unwrap();
        assert!(silent.history().unwrap().is_empty());
        assert_eq!(silent.stocks().unwrap(), acme());
    }

    #[test]
    fn rehydrated_store_matches_original() {
        let original = setup();
        original.init_stocks().unwrap();
        original.buy_stock(order()).unwrap();
        let history = original.history().unwrap();

        // Replay never calls the source, so an empty one is fine here.
        let restored: LocalStore<StocksModule<StaticStocks>> = Store::rehydrate(
            MODULE_NAME,
            StocksModule::new(StaticStocks::default()),
            StocksState::new(),
            &history,
            InMemoryMutationBus::new(),
            &StoreConfig::default(),
        )
        .unwrap_or_else(|e| panic!("rehydrate failed: {e}"));

        assert_eq!(restored.stocks().unwrap(), original.stocks().unwrap());
        assert_eq!(restored.version().unwrap(), original.version().unwrap());

        let next = restored.randomize_stocks().unwrap();
        assert_eq!(next[0].sequence_number(), 3);
    }

    #[test]
    fn trimmed_history_cannot_be_rehydrated() {
        let config = StoreConfig {
            history_limit: 2,
            ..StoreConfig::default()
        };
        let original = Store::with_config(
            MODULE_NAME,
            StocksModule::new(StaticStocks::new(acme())),
            StocksState::new(),
            &config,
        );
        original.init_stocks().unwrap();
        original.randomize_stocks().unwrap();
        original.randomize_stocks().unwrap();

        // SET_STOCKS fell out of the retained history.
        let history = original.history().unwrap();
        assert_eq!(history[0].sequence_number(), 2);

        let result: Result<LocalStore<StocksModule<StaticStocks>>, _> = Store::rehydrate(
            MODULE_NAME,
            StocksModule::new(StaticStocks::default()),
            StocksState::new(),
            &history,
            InMemoryMutationBus::new(),
            &config,
        );
        match result {
            Err(err) => assert_eq!(err, ReplayError::SequenceGap { expected: 1, found: 2 }),
            Ok(_) => panic!("rehydrate accepted a trimmed history"),
        }
    }

    type StaticRecord = RecordOf<StocksModule<StaticStocks>>;

    #[derive(Debug, Default)]
    struct ClosedBus;

    impl MutationBus<StaticRecord> for ClosedBus {
        type Error = &'static str;

        fn publish(&self, _message: StaticRecord) -> Result<(), Self::Error> {
            Err("bus closed")
        }

        fn subscribe(&self) -> Subscription<StaticRecord> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    #[test]
    fn publish_failure_does_not_fail_the_commit() {
        let store = Store::with_bus(
            MODULE_NAME,
            StocksModule::new(StaticStocks::new(acme())),
            StocksState::new(),
            ClosedBus,
            &StoreConfig::default(),
        );

        let records = store.init_stocks().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(store.stocks().unwrap(), acme());
        assert_eq!(store.history().unwrap().len(), 1);

        store.commit(StocksMutation::RandomizeStocks).unwrap();
        assert_eq!(store.version().unwrap(), 2);
    }

    #[test]
    fn failing_source_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            stocks_file: Some(dir.path().join("missing.json")),
            ..StoreConfig::default()
        };
        let store = stocks_store(&config);

        let err = store.init_stocks().unwrap_err();
        assert!(matches!(err, DispatchError::Rejected(_)));
        assert!(store.stocks().unwrap().is_empty());
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn configured_file_feeds_init() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&acme()).unwrap().as_bytes())
            .unwrap();
        let config = StoreConfig {
            stocks_file: Some(file.path().to_path_buf()),
            ..StoreConfig::default()
        };

        let store = stocks_store(&config);
        store.init_stocks().unwrap();
        assert_eq!(store.stocks().unwrap(), acme());
    }

    #[test]
    fn default_config_uses_builtin_stocks() {
        let store = stocks_store(&StoreConfig::default());
        assert_eq!(store.name(), MODULE_NAME);
        store.init_stocks().unwrap();
        assert_eq!(store.stocks().unwrap(), default_stocks());
    }

    #[test]
    fn concurrent_dispatch_is_serialized() {
        let store = Arc::new(setup());
        store.init_stocks().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.randomize_stocks().unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.version().unwrap(), 201);
        assert_eq!(store.stocks().unwrap(), acme());
        let seqs: Vec<_> = store
            .history()
            .unwrap()
            .iter()
            .map(|r| r.sequence_number())
            .collect();
        assert_eq!(seqs, (1..=201).collect::<Vec<_>>());
    }
}
