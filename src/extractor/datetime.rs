use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Hour used when the text names a day but no time.
pub const DEFAULT_HOUR: i64 = 9;

const TOMORROW: &str = "tomorrow";

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(next\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("regex compiles")
});

static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b").expect("regex compiles")
});

static TWELVE_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").expect("regex compiles")
});

static TWENTY_FOUR_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2}):(\d{2})\b").expect("regex compiles")
});

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeMatch<Tz: TimeZone> {
    /// Every matched span, space-joined.
    pub raw: String,
    /// The individual spans in the order they were matched. Each one is
    /// removed from the working buffer on its own.
    pub spans: Vec<String>,
    pub datetime: DateTime<Tz>,
}

/// Resolves day and time cues relative to `now`.
///
/// The date stages run in a fixed order ("tomorrow", weekday, numeric date)
/// and each one that matches overwrites the date set by the ones before it.
/// The time comes from a 12-hour clock if present, otherwise a valid 24-hour
/// clock, otherwise [`DEFAULT_HOUR`]. The result is that wall-clock time in
/// `now`'s zone, so a date past a DST change gets that date's offset.
/// Returns `None` when nothing matched.
pub fn extract_datetime<Tz: TimeZone>(
    text: &str,
    now: &DateTime<Tz>,
) -> Option<DateTimeMatch<Tz>> {
    let today = now.date_naive();
    let mut date = today;
    let mut spans: Vec<String> = Vec::new();

    // Plain containment, so "tomorrowland" counts too. The span is the
    // lowercase word, so "Tomorrow" sets the date but stays in the details.
    if text.to_lowercase().contains(TOMORROW) {
        date = today + Duration::days(1);
        spans.push(TOMORROW.to_string());
    }

    if let Some(caps) = WEEKDAY_RE.captures(text) {
        if let Some(target) = parse_weekday(&caps[2]) {
            let next = caps.get(1).is_some();
            date = today + Duration::days(days_until(today.weekday(), target, next));
            spans.push(caps[0].to_string());
        }
    }

    if let Some(caps) = NUMERIC_DATE_RE.captures(text) {
        if let Some(explicit) = numeric_date(&caps, today.year()) {
            date = explicit;
            spans.push(caps[0].to_string());
        }
    }

    let mut time = None;
    if let Some(caps) = TWELVE_HOUR_RE.captures(text) {
        if let Some(hm) = twelve_hour_time(&caps) {
            time = Some(hm);
            spans.push(caps[0].to_string());
        }
    } else if let Some(caps) = TWENTY_FOUR_HOUR_RE.captures(text) {
        if let Some(hm) = twenty_four_hour_time(&caps) {
            time = Some(hm);
            spans.push(caps[0].to_string());
        }
    }

    if spans.is_empty() {
        return None;
    }

    let (hour, minute) = time.unwrap_or((DEFAULT_HOUR, 0));
    let naive = date.and_hms_opt(0, 0, 0)? + Duration::hours(hour) + Duration::minutes(minute);
    let datetime = resolve_local(&now.timezone(), &naive)?;

    let raw = spans.join(" ").trim().to_string();
    Some(DateTimeMatch {
        raw,
        spans,
        datetime,
    })
}

/// Places a wall-clock time in `tz`. When clocks fall back the earlier of
/// the two instants wins; a time skipped when clocks spring forward moves
/// ahead by the hour that was skipped.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*naive + Duration::hours(1))).earliest())
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days from `from` to the coming `target`. Today and "next" both roll a
/// full week forward.
fn days_until(from: Weekday, target: Weekday, next: bool) -> i64 {
    let mut offset = (i64::from(target.num_days_from_sunday())
        - i64::from(from.num_days_from_sunday()))
    .rem_euclid(7);
    if offset == 0 || next {
        offset += 7;
    }
    offset
}

fn numeric_date(caps: &Captures, current_year: i32) -> Option<NaiveDate> {
    let month: i32 = caps.get(1)?.as_str().parse().ok()?;
    let day: i64 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
        Some(y) => y.as_str().parse().ok()?,
        None => current_year,
    };
    overflowing_date(year, month, day)
}

/// Builds a date the lenient way: month 13 is January of the next year,
/// February 30 lands in March, day 0 is the last day of the previous month.
fn overflowing_date(year: i32, month: i32, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let first = NaiveDate::from_ymd_opt(
        months.div_euclid(12),
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first.checked_add_signed(Duration::days(day - 1))
}

fn twelve_hour_time(caps: &Captures) -> Option<(i64, i64)> {
    let hour: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minute: i64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let pm = caps.get(3)?.as_str().eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some((hour, minute))
}

fn twenty_four_hour_time(caps: &Captures) -> Option<(i64, i64)> {
    let hour: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minute: i64 = caps.get(2)?.as_str().parse().ok()?;
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return None;
    }
    Some((hour, minute))
}
