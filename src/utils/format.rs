//! Display formatting for elapsed time

use std::time::Duration;

const NANOS_PER_CENTISECOND: u128 = 10_000_000;

/// Render elapsed time as seconds with exactly two decimals.
///
/// Rounds half-up on the exact nanosecond value, so `12.345s` becomes
/// `"12.35"`. Pure integer arithmetic: no negative sign, no exponent.
pub fn format_elapsed(elapsed: Duration) -> String {
    let centis = (elapsed.as_nanos() + NANOS_PER_CENTISECOND / 2) / NANOS_PER_CENTISECOND;
    format!("{}.{:02}", centis / 100, centis % 100)
}

/// Elapsed time as fractional milliseconds
pub fn millis_f64(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}
