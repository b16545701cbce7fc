//! Human-readable sizes and dates.

use chrono::{Local, TimeZone};

const BASE: u64 = 1024;
const SUFFIXES: [&str; 8] = ["K", "M", "G", "T", "P", "E", "Z", "Y"];

/// GNU-style size with base 1024: `512B`, `1.5K`, `2.0M`.
pub fn human_size(bytes: u64) -> String {
    if bytes < BASE {
        return format!("{bytes}B");
    }
    let value = bytes as f64;
    let mut unit = BASE as f64;
    for suffix in SUFFIXES {
        let next = unit * BASE as f64;
        if value < next {
            return format!("{:.1}{suffix}", value / unit);
        }
        unit = next;
    }
    format!("{:.1}{}", value / (unit / BASE as f64), SUFFIXES[SUFFIXES.len() - 1])
}

/// Local time as `YYYY-MM-DD HH:MM`; falls back to the raw timestamp when
/// it cannot be represented.
pub fn readable_date(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_gnu_style() {
        assert_eq!(human_size(0), "0B");
        assert_eq!(human_size(1023), "1023B");
        assert_eq!(human_size(1024), "1.0K");
        assert_eq!(human_size(1536), "1.5K");
        assert_eq!(human_size(30 * 1024 * 1024), "30.0M");
        assert_eq!(human_size(2 * 1024 * 1024 * 1024), "2.0G");
    }

    #[test]
    fn dates_have_minute_precision() {
        let rendered = readable_date(0);
        assert_eq!(rendered.len(), "1970-01-01 00:00".len());
        assert!(rendered.starts_with("19"));
    }
}
