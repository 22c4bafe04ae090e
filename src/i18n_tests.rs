//! Unit tests for the embedded locale tables.

#[cfg(test)]
mod i18n_tests {
    use crate::i18n::Translator;

    // Every key the formatter renders. Both tables must cover all of
    // them, otherwise a run would ship [Missing: ...] markers to chat.
    const MESSAGE_KEYS: [&str; 25] = [
        "summary.title",
        "summary.date",
        "summary.signals_generated",
        "summary.no_signals",
        "summary.footer",
        "status.header",
        "status.line_above",
        "status.line_below",
        "status.line_plain",
        "status.closest_to_trigger",
        "status.approaching_trigger",
        "signal.entry",
        "signal.type",
        "signal.signal_1",
        "signal.signal_2",
        "signal.price",
        "signal.ma120_detail",
        "signal.signal_1_price",
        "signal.position",
        "errors.header",
        "errors.entry",
        "strategy_info.header",
        "notification.error_title",
        "notification.error_details",
        "notification.check_logs",
    ];

    #[test]
    fn test_known_key_resolves() {
        let t = Translator::new("en");
        assert_eq!(t.get("signal.signal_1"), "Signal 1");
    }

    #[test]
    fn test_missing_key_is_marked() {
        let t = Translator::new("en");
        assert_eq!(t.get("summary.does_not_exist"), "[Missing: summary.does_not_exist]");
        assert_eq!(t.get("no_such_section.x"), "[Missing: no_such_section.x]");
    }

    #[test]
    fn test_get_with_substitutes_placeholders() {
        let t = Translator::new("en");
        let line = t.get_with(
            "status.line_below",
            &[("symbol", "SPY"), ("price", "420.00"), ("dev", "11.50")],
        );
        assert_eq!(line, "• **SPY**: $420.00 (11.50% below MA120)");
    }

    #[test]
    fn test_get_with_leaves_unknown_placeholders() {
        let t = Translator::new("en");
        let line = t.get_with("status.line_below", &[("symbol", "SPY")]);
        assert!(line.contains("SPY"));
        assert!(line.contains("{price}"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let t = Translator::new("fr");
        assert_eq!(t.locale(), "en");
        assert_eq!(t.get("signal.signal_1"), "Signal 1");
    }

    #[test]
    fn test_chinese_table_is_translated() {
        let en = Translator::new("en");
        let zh = Translator::new("zh_CN");

        assert_eq!(zh.locale(), "zh_CN");
        assert_ne!(zh.get("summary.no_signals"), en.get("summary.no_signals"));
    }

    #[test]
    fn test_all_message_keys_present_in_every_locale() {
        for locale in ["en", "zh_CN"] {
            let t = Translator::new(locale);
            for key in MESSAGE_KEYS {
                let text = t.get(key);
                assert!(
                    !text.starts_with("[Missing:"),
                    "{locale} is missing {key}"
                );
                assert!(!text.is_empty(), "{locale} has empty {key}");
            }
        }
    }
}
