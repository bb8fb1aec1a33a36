//! Ticker symbol cleaning

use std::collections::HashSet;

pub const MAX_TICKER_LEN: usize = 10;

/// Placeholder values spreadsheets put in place of a symbol.
const PLACEHOLDERS: [&str; 4] = ["N/A", "NULL", "NONE", "ERROR"];

/// Normalize a raw symbol: trim, upper-case, keep only `[A-Z0-9.-]`.
///
/// Returns `None` for placeholders and for results outside 1..=10 characters.
/// Placeholders are matched both before and after stripping, so `N/A` is
/// rejected rather than turned into `NA`.
pub fn clean_ticker_symbol(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if PLACEHOLDERS.contains(&upper.as_str()) {
        return None;
    }

    let cleaned: String = upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || cleaned.len() > MAX_TICKER_LEN {
        return None;
    }
    if PLACEHOLDERS.contains(&cleaned.as_str()) {
        return None;
    }
    Some(cleaned)
}

/// Clean every symbol and drop invalid ones and repeats, keeping first occurrences in order.
pub fn unique_tickers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|t| clean_ticker_symbol(t.as_ref()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
