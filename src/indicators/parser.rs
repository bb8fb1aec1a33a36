//! Textual indicator input (form fields, CSV cells) to typed values

use std::collections::HashMap;

use crate::indicators::error::IndicatorError;
use crate::models::indicators::IndicatorSet;

pub fn parse_f64(value: &str) -> Result<f64, IndicatorError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))
}

/// Parse a named value, rejecting blanks and anything that is not a finite number.
pub fn parse_indicator_value(name: &str, value: &str) -> Result<f64, IndicatorError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IndicatorError::MissingField(name.to_string()));
    }
    let parsed = value
        .parse::<f64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(name.to_string()))?;
    if !parsed.is_finite() {
        return Err(IndicatorError::InvalidValue {
            name: name.to_string(),
            value: parsed,
        });
    }
    Ok(parsed)
}

/// Parse every entry of `data` into an [`IndicatorSet`].
///
/// Names are trimmed and lower-cased; blank names are skipped.
pub fn parse_indicator_set_from_map(
    data: &HashMap<String, String>,
) -> Result<IndicatorSet, IndicatorError> {
    data.iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| {
            let name = name.trim().to_lowercase();
            let value = parse_indicator_value(&name, value)?;
            Ok((name, value))
        })
        .collect()
}
