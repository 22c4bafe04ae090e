//! Unit tests for signal state persistence.

#[cfg(test)]
mod storage_tests {
    use crate::error::StateError;
    use crate::models::SignalState;
    use crate::storage::*;
    use std::collections::BTreeMap;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> SignalStore {
        SignalStore::new(dir.path().join("signals.json"))
    }

    // ============= Load Tests =============

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let states = store.load_all().unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StateError::Corrupt { .. }));
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(store.load_all().is_err());
    }

    // ============= Save Tests =============

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut states = BTreeMap::new();
        let mut spy = SignalState::new("SPY");
        spy.signal_1_triggered = true;
        spy.signal_1_price = Some(420.0);
        states.insert("SPY".to_string(), spy);
        states.insert("AAPL".to_string(), SignalState::new("AAPL"));

        store.save_all(&states).unwrap();
        let loaded = store.load_all().unwrap();

        assert_eq!(loaded, states);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_all(&BTreeMap::new()).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut states = BTreeMap::new();
        states.insert("SPY".to_string(), SignalState::new("SPY"));
        store.save_all(&states).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        // Committed alongside the workflow, so diffs must stay readable
        assert!(raw.contains("\n  \"SPY\""));
    }

    #[test]
    fn test_unknown_symbols_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"DELISTED": {"symbol": "DELISTED", "signal_1_triggered": true}}"#,
        )
        .unwrap();

        let mut states = store.load_all().unwrap();
        states.insert("SPY".to_string(), SignalState::new("SPY"));
        store.save_all(&states).unwrap();

        let reloaded = store.load_all().unwrap();
        assert!(reloaded.contains_key("DELISTED"));
        assert!(reloaded["DELISTED"].signal_1_triggered);
        assert!(reloaded.contains_key("SPY"));
    }

    // ============= state_for Tests =============

    #[test]
    fn test_state_for_inserts_zero_state() {
        let mut states: BTreeMap<String, SignalState> = BTreeMap::new();

        let state = state_for(&mut states, "NVDA");
        assert_eq!(state.symbol, "NVDA");
        assert!(!state.signal_1_triggered);

        state.signal_1_triggered = true;
        assert!(state_for(&mut states, "NVDA").signal_1_triggered);
        assert_eq!(states.len(), 1);
    }
}
