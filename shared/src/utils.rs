// Time helpers shared by the engine and the chart front-end.
use chrono::{DateTime, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats an epoch timestamp for log lines. Values below 10^11 are taken as
/// seconds, anything larger as milliseconds.
pub fn format_timestamp(ts: i64) -> String {
    let parsed = if ts.unsigned_abs() < 100_000_000_000 {
        DateTime::from_timestamp(ts, 0)
    } else {
        DateTime::from_timestamp_millis(ts)
    };
    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}
