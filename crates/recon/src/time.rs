use std::sync::OnceLock;

use regex::Regex;

use crate::model::TimeOfDay;

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+):(\d{2}):(\d{2})").expect("valid time pattern"))
}

/// Pull `H:MM:SS` out of a sign-in time string such as `07:55:00`,
/// `7:55:00 AM` or `2025-10-09 07:55:00`. Seconds are matched but dropped.
///
/// `None` when no such substring exists, or when the hour is too large to
/// express in minutes; the caller counts the row as signed in but leaves it
/// unclassified.
pub fn parse_time(raw: &str) -> Option<TimeOfDay> {
    let caps = time_pattern().captures(raw)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)?;
    Some(TimeOfDay { hours, minutes })
}
