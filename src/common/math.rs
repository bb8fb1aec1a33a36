//! Moving averages, smoothing and summary statistics over `f64` slices.
//!
//! Series helpers return values aligned to the end of the input: the last
//! element always corresponds to the last input value.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rolling simple moving average, one value per complete window.
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

/// One EMA step using the standard `2 / (period + 1)` smoothing factor.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// Exponential moving average series seeded with the SMA of the first window.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(seed) = sma(&values[..period.min(values.len())], period) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for &value in &values[period..] {
        prev = ema_from_previous(value, prev, period);
        out.push(prev);
    }
    out
}

/// Latest exponential moving average value.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}

/// Wilder's smoothing (RMA), seeded with the SMA of the first window.
pub fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(seed) = sma(&values[..period.min(values.len())], period) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for &value in &values[period..] {
        prev += (value - prev) / period as f64;
        out.push(prev);
    }
    out
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let range = high - low;
    let up = (high - prev_close).abs();
    let down = (low - prev_close).abs();
    range.max(up).max(down)
}

pub fn highest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn lowest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentage distance of `value` from `base`.
pub fn percent_change(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some((value - base) / base * 100.0)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
