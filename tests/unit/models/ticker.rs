//! Unit tests for ticker cleaning

use btock::models::ticker::{clean_ticker_symbol, unique_tickers, MAX_TICKER_LEN};

#[test]
fn symbols_are_trimmed_and_upper_cased() {
    assert_eq!(clean_ticker_symbol(" aapl ").as_deref(), Some("AAPL"));
    assert_eq!(clean_ticker_symbol("brk.b").as_deref(), Some("BRK.B"));
    assert_eq!(clean_ticker_symbol("BF-B").as_deref(), Some("BF-B"));
}

#[test]
fn disallowed_characters_are_stripped() {
    assert_eq!(clean_ticker_symbol("$TSLA!").as_deref(), Some("TSLA"));
    assert_eq!(clean_ticker_symbol("msft 2").as_deref(), Some("MSFT2"));
}

#[test]
fn placeholders_are_rejected() {
    for raw in ["N/A", "n/a", "null", "None", " ERROR "] {
        assert_eq!(clean_ticker_symbol(raw), None, "{raw}");
    }
}

#[test]
fn empty_and_long_symbols_are_rejected() {
    assert_eq!(clean_ticker_symbol(""), None);
    assert_eq!(clean_ticker_symbol("   "), None);
    assert_eq!(clean_ticker_symbol("!!!"), None);

    let longest = "A".repeat(MAX_TICKER_LEN);
    assert_eq!(clean_ticker_symbol(&longest), Some(longest.clone()));
    assert_eq!(clean_ticker_symbol(&"A".repeat(MAX_TICKER_LEN + 1)), None);
}

#[test]
fn duplicates_keep_first_occurrence() {
    let tickers = unique_tickers(["msft", "AAPL", " msft", "n/a", "GOOG", "aapl"]);
    assert_eq!(tickers, vec!["MSFT", "AAPL", "GOOG"]);
}

#[test]
fn unique_tickers_accepts_owned_strings() {
    let raw = vec!["spy".to_string(), "SPY".to_string()];
    assert_eq!(unique_tickers(&raw), vec!["SPY"]);
    assert!(unique_tickers(Vec::<String>::new()).is_empty());
}
