//! Formatting utilities for human-readable output.
//!
//! Sizes, percentages, timestamps and uptimes as the CLI and the record
//! projections present them.

use chrono::{Local, TimeZone};

const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Render an epoch timestamp in local time, e.g. `03/14/2024 01:05:09 PM`.
///
/// Out-of-range values render as the raw number.
pub fn format_epoch(epoch_secs: i64) -> String {
    match Local.timestamp_opt(epoch_secs, 0).single() {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => epoch_secs.to_string(),
    }
}

/// Render a fractional epoch (`1700000000.123`) the same way as [`format_epoch`].
pub fn format_epoch_f64(epoch_secs: f64) -> String {
    format_epoch(epoch_secs.trunc() as i64)
}

/// Render a duration in seconds as `1 day 2 hrs 3 mins 4 secs`.
///
/// Units are pluralised only above one; zero units are omitted.
///
/// # Examples
///
/// ```
/// use splunkd_client::format::pretty_time_delta;
///
/// assert_eq!(pretty_time_delta(93_784), "1 day 2 hrs 3 mins 4 secs");
/// assert_eq!(pretty_time_delta(61), "1 min 1 sec");
/// assert_eq!(pretty_time_delta(0), "0 secs");
/// ```
pub fn pretty_time_delta(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let parts: Vec<String> = [
        (days, "day", "days"),
        (hours, "hr", "hrs"),
        (minutes, "min", "mins"),
        (secs, "sec", "secs"),
    ]
    .into_iter()
    .filter(|(n, _, _)| *n > 0)
    .map(|(n, one, many)| format!("{} {}", n, if n > 1 { many } else { one }))
    .collect();

    if parts.is_empty() {
        "0 secs".to_string()
    } else {
        parts.join(" ")
    }
}

/// Bytes shown as gigabytes with two decimals.
pub fn format_bytes_as_gb(bytes: f64) -> String {
    format!("{:.2} GB", bytes / 1024.0 / 1024.0 / 1024.0)
}

/// Megabytes shown as gigabytes with two decimals.
pub fn format_mb_as_gb(megabytes: f64) -> String {
    format!("{:.2} GB", megabytes / 1024.0)
}

/// `used / total` as a one-decimal percentage; a zero total is `0.0%`.
pub fn format_ratio_percent(used: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", used / total * 100.0)
}

/// Shortest representation of a percentage, e.g. `100%` or `37.5%`.
pub fn format_percent_compact(value: f64) -> String {
    format!("{}%", value)
}

pub fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_time_delta_plurals() {
        assert_eq!(pretty_time_delta(1), "1 sec");
        assert_eq!(pretty_time_delta(2), "2 secs");
        assert_eq!(pretty_time_delta(3_600), "1 hr");
        assert_eq!(pretty_time_delta(2 * 86_400 + 120), "2 days 2 mins");
    }

    #[test]
    fn test_pretty_time_delta_full() {
        assert_eq!(pretty_time_delta(93_784), "1 day 2 hrs 3 mins 4 secs");
    }

    #[test]
    fn test_size_formatting() {
        assert_eq!(format_bytes_as_gb(1_073_741_824.0), "1.00 GB");
        assert_eq!(format_mb_as_gb(51_200.0), "50.00 GB");
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(format_ratio_percent(25.0, 100.0), "25.0%");
        assert_eq!(format_ratio_percent(1.0, 0.0), "0.0%");
    }

    #[test]
    fn test_percent_compact() {
        assert_eq!(format_percent_compact(100.0), "100%");
        assert_eq!(format_percent_compact(37.5), "37.5%");
    }

    #[test]
    fn test_format_epoch_shape() {
        let rendered = format_epoch(1_700_000_000);
        assert_eq!(rendered.len(), "11/14/2023 10:13:20 PM".len());
        assert!(rendered.ends_with("AM") || rendered.ends_with("PM"));
    }
}
