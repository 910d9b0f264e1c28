//! Display helpers used by the list pages: dates, truncation, file sizes,
//! percentages.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Default length at which table cells cut long text.
pub const TRUNCATE_LENGTH: usize = 50;

/// Date display formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `DD/MM/YYYY`
    Display,
    /// `DD/MM/YYYY HH:mm`
    DisplayWithTime,
    /// `YYYY-MM-DD`
    Api,
    /// `YYYY-MM-DDTHH:mm:ss`
    ApiWithTime,
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Display => "%d/%m/%Y",
            DateFormat::DisplayWithTime => "%d/%m/%Y %H:%M",
            DateFormat::Api => "%Y-%m-%d",
            DateFormat::ApiWithTime => "%Y-%m-%dT%H:%M:%S",
        }
    }
}

/// Formats a timestamp in its own timezone. `None` renders as an empty cell.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use retail_core::format::{format_date, DateFormat};
///
/// let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
/// assert_eq!(format_date(Some(&dt), DateFormat::Display), "09/03/2024");
/// assert_eq!(format_date(Some(&dt), DateFormat::DisplayWithTime), "09/03/2024 14:05");
/// ```
pub fn format_date<Tz>(date: Option<&DateTime<Tz>>, format: DateFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match date {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => String::new(),
    }
}

/// Cuts `text` to `max_len` characters and appends `...` when it was longer.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push_str("...");
    cut
}

/// Human readable file size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`.
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// `value / total` as a whole percentage. A zero total yields 0.
pub fn percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 || !total.is_finite() {
        return 0;
    }
    (value / total * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_date_variants() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 1, 7, 30, 15).unwrap();
        assert_eq!(format_date(Some(&dt), DateFormat::Api), "2024-12-01");
        assert_eq!(
            format_date(Some(&dt), DateFormat::ApiWithTime),
            "2024-12-01T07:30:15"
        );
        assert_eq!(format_date::<Utc>(None, DateFormat::Display), "");
    }

    #[test]
    fn test_format_date_uses_local_offset() {
        let ict = FixedOffset::east_opt(7 * 3600).unwrap();
        let dt = Utc
            .with_ymd_and_hms(2024, 12, 31, 20, 0, 0)
            .unwrap()
            .with_timezone(&ict);
        assert_eq!(format_date(Some(&dt), DateFormat::Display), "01/01/2025");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", TRUNCATE_LENGTH), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        // multi-byte characters count once
        assert_eq!(truncate_text("Nước suối", 4), "Nước...");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(file_size(0), "0 Bytes");
        assert_eq!(file_size(512), "512 Bytes");
        assert_eq!(file_size(1536), "1.5 KB");
        assert_eq!(file_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(5.0, 0.0), 0);
    }
}
