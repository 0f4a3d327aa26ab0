//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::commit::{Priority, Sentiment};
use crate::events::Worker;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use ratatui::prelude::Color;
use std::fmt::Display;

const DATE_TIME_FORMAT: &str = "%b %-d, %Y, %I:%M:%S %p";

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Fetcher => Color::Cyan,
        Worker::Ingester => Color::Yellow,
        Worker::Scheduler => Color::Green,
    }
}

/// Format a backend timestamp in the viewer's local time zone.
pub fn format_date_time(input: Option<&str>) -> String {
    format_date_time_in(input, &Local)
}

/// Format a backend timestamp in `tz`, e.g. `Jan 15, 2024, 10:30:00 AM UTC`.
///
/// Returns `Never` for a missing or empty input and `Invalid Date` when the
/// input is not a recognizable date.
pub fn format_date_time_in<Tz>(input: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let input = match input.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return "Never".to_string(),
    };

    match parse_instant(input, tz) {
        Some(dt) => {
            let local = dt.with_timezone(tz);
            let offset_secs = local.offset().fix().local_minus_utc();
            format!(
                "{} {}",
                local.format(DATE_TIME_FORMAT),
                zone_label(offset_secs)
            )
        }
        None => "Invalid Date".to_string(),
    }
}

/// Date-times without an offset are wall-clock time in `tz`; bare dates are UTC midnight.
fn parse_instant<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn zone_label(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "UTC".to_string();
    }
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let minutes_total = offset_secs.unsigned_abs() / 60;
    let (hours, minutes) = (minutes_total / 60, minutes_total % 60);
    if minutes == 0 {
        format!("GMT{}{}", sign, hours)
    } else {
        format!("GMT{}{}:{:02}", sign, hours, minutes)
    }
}

pub fn sentiment_color(sentiment: Option<&Sentiment>) -> &'static str {
    match sentiment {
        Some(Sentiment::Positive) => "#4CAF50",
        Some(Sentiment::Negative) => "#F44336",
        _ => "#FF9800",
    }
}

pub fn priority_color(priority: Option<&Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "#F44336",
        Some(Priority::Medium) => "#FF9800",
        _ => "#4CAF50",
    }
}

/// Color for the data source indicator in the stats panel.
pub fn data_source_color(source: &str) -> &'static str {
    if source == "database" {
        "#4CAF50"
    } else if source.contains("fallback") {
        "#FF9800"
    } else {
        "#666666"
    }
}

/// Convert a `#RRGGBB` string into a terminal color.
pub fn hex_to_color(hex: &str) -> Color {
    hex.parse::<Color>().unwrap_or(Color::Reset)
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..8)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Shorten transport errors for the activity log.
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("error sending request") {
        return match msg.split_once(": Reqwest error") {
            Some((prefix, _)) => format!("{}: backend unreachable", prefix),
            None => "Backend unreachable".to_string(),
        };
    }
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_missing_date_is_never() {
        assert_eq!(format_date_time(None), "Never");
        assert_eq!(format_date_time(Some("")), "Never");
        assert_eq!(format_date_time(Some("   ")), "Never");
    }

    #[test]
    fn test_garbage_date_is_invalid() {
        assert_eq!(format_date_time(Some("not-a-date")), "Invalid Date");
        assert_eq!(format_date_time(Some("2024-13-45T99:00:00Z")), "Invalid Date");
    }

    #[test]
    fn test_local_format_mentions_year_and_month() {
        let formatted = format_date_time(Some("2024-01-15T10:30:00Z"));
        assert!(formatted.contains("2024"), "{}", formatted);
        assert!(formatted.contains("Jan"), "{}", formatted);
    }

    #[test]
    fn test_utc_rendering() {
        assert_eq!(
            format_date_time_in(Some("2024-01-15T10:30:00Z"), &Utc),
            "Jan 15, 2024, 10:30:00 AM UTC"
        );
        assert_eq!(
            format_date_time_in(Some("2024-07-04T21:05:09.123+00:00"), &Utc),
            "Jul 4, 2024, 09:05:09 PM UTC"
        );
    }

    #[test]
    fn test_offset_rendering_shifts_wall_clock() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(
            format_date_time_in(Some("2024-01-15T10:30:00Z"), &ist),
            "Jan 15, 2024, 04:00:00 PM GMT+5:30"
        );

        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_date_time_in(Some("2024-01-15T10:30:00Z"), &est),
            "Jan 15, 2024, 05:30:00 AM GMT-5"
        );
    }

    #[test]
    fn test_naive_inputs() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        // No offset: wall-clock time in the viewer's zone.
        assert_eq!(
            format_date_time_in(Some("2024-01-15 10:30:00"), &est),
            "Jan 15, 2024, 10:30:00 AM GMT-5"
        );
        // Date only: UTC midnight.
        assert_eq!(
            format_date_time_in(Some("2024-01-15"), &est),
            "Jan 14, 2024, 07:00:00 PM GMT-5"
        );
    }

    #[test]
    fn test_sentiment_colors() {
        assert_eq!(sentiment_color(Some(&Sentiment::Positive)), "#4CAF50");
        assert_eq!(sentiment_color(Some(&Sentiment::Negative)), "#F44336");
        assert_eq!(sentiment_color(Some(&Sentiment::Neutral)), "#FF9800");
        assert_eq!(
            sentiment_color(Some(&Sentiment::Other("mixed".to_string()))),
            "#FF9800"
        );
        assert_eq!(sentiment_color(None), "#FF9800");
    }

    #[test]
    fn test_priority_colors() {
        assert_eq!(priority_color(Some(&Priority::High)), "#F44336");
        assert_eq!(priority_color(Some(&Priority::Medium)), "#FF9800");
        assert_eq!(priority_color(Some(&Priority::Low)), "#4CAF50");
        assert_eq!(priority_color(None), "#4CAF50");
    }

    #[test]
    fn test_data_source_colors() {
        assert_eq!(data_source_color("database"), "#4CAF50");
        assert_eq!(data_source_color("github_fallback"), "#FF9800");
        assert_eq!(data_source_color("fallback"), "#FF9800");
        assert_eq!(data_source_color("unknown"), "#666666");
        assert_eq!(data_source_color(""), "#666666");
    }

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#4CAF50"), Color::Rgb(0x4C, 0xAF, 0x50));
        assert_eq!(hex_to_color("nope"), Color::Reset);
    }

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(
            format_compact_timestamp("2024-01-15 10:30:45"),
            "01-15 10:30:45"
        );
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message(
                "Error connecting to server: Reqwest error: error sending request for url (http://127.0.0.1:9/track-now)"
            ),
            "Error connecting to server: backend unreachable"
        );
        assert_eq!(
            clean_http_error_message("Loaded 3 commits"),
            "Loaded 3 commits"
        );
    }
}
