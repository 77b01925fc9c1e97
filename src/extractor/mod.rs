//! Rule-based extraction of appointment fields from a free-text sentence.
//!
//! Each stage looks for its own pattern in what is left of the text and the
//! matched span is cut out before the next stage runs, so whatever survives
//! all stages becomes the appointment details.

pub mod datetime;
pub mod name;
pub mod phone;

use std::fmt::Display;

use chrono::{DateTime, Local, SecondsFormat, TimeZone};

use crate::models::ParsedAppointment;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NO_PHONE: &str = "No phone";
pub const NO_DETAILS: &str = "No details provided";

/// Extracts an appointment relative to the local clock.
pub fn extract(text: &str) -> Option<ParsedAppointment> {
    extract_at(text, Local::now())
}

/// Extracts an appointment, resolving relative dates against `now`.
///
/// Returns `None` only when `text` is blank. Any field that cannot be found
/// is filled with its sentinel; a missing date/time falls back to `now`.
/// Dates are resolved as wall-clock times in `now`'s zone.
pub fn extract_at<Tz>(text: &str, now: DateTime<Tz>) -> Option<ParsedAppointment>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut buffer = text.to_string();

    let name = name::extract_name(&buffer).map(str::to_string);
    if let Some(name) = &name {
        remove_first(&mut buffer, name);
    }

    let phone = phone::extract_phone(&buffer);
    if let Some(phone) = &phone {
        remove_first(&mut buffer, &phone.raw);
    }

    let when = datetime::extract_datetime(&buffer, &now);
    if let Some(when) = &when {
        for span in &when.spans {
            remove_first(&mut buffer, span);
        }
    }

    let details = buffer.trim().to_string();

    Some(ParsedAppointment {
        name: name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        phone: phone.map_or_else(|| NO_PHONE.to_string(), |p| p.formatted),
        datetime: format_timestamp(&when.map_or(now, |w| w.datetime)),
        details: if details.is_empty() {
            NO_DETAILS.to_string()
        } else {
            details
        },
    })
}

/// RFC 3339 with second precision, e.g. `2026-10-20T15:00:00+00:00`.
pub fn format_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn remove_first(buffer: &mut String, needle: &str) {
    if needle.is_empty() {
        return;
    }
    *buffer = buffer.replacen(needle, "", 1);
}
