//! Human-readable durations and timestamps.

use chrono::{Local, TimeZone};

use crate::timer::timestamp;

/// `MM:SS.cc`, or `HH:MM:SS.cc` once an hour has passed.
///
/// Centiseconds are floored, never rounded, so the display never runs ahead
/// of the clock. Hours keep counting past 24.
pub fn format_time(ms: u64) -> String {
    let centis = (ms % 1_000) / 10;
    let seconds = (ms / 1_000) % 60;
    let minutes = (ms / 60_000) % 60;
    let hours = ms / 3_600_000;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{centis:02}")
    } else {
        format!("{minutes:02}:{seconds:02}.{centis:02}")
    }
}

/// Short day-first timestamp (`dd/mm, HH:MM`) in the local time zone.
pub fn format_date(epoch_ms: u64) -> String {
    format_date_in(epoch_ms, &Local)
}

/// [`format_date`] in an explicit time zone.
pub fn format_date_in<Tz: TimeZone>(epoch_ms: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp(epoch_ms)
        .with_timezone(tz)
        .format("%d/%m, %H:%M")
        .to_string()
}
