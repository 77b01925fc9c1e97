use anyhow::Context;
use chrono::Duration;

use crate::extractor::NO_PHONE;
use crate::models::Appointment;

/// Every appointment is exported as a one-hour event.
pub const EVENT_MINUTES: i64 = 60;

pub fn generate_ics(appointment: &Appointment) -> anyhow::Result<String> {
    let start = appointment
        .starts_at()
        .with_context(|| format!("invalid datetime: {}", appointment.parsed.datetime))?;

    let dtstart = start.format("%Y%m%dT%H%M%SZ").to_string();
    let dtend = (start + Duration::minutes(EVENT_MINUTES))
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    let dtstamp = appointment.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = format!("{}@appt-intake", appointment.id);

    let parsed = &appointment.parsed;
    let summary = escape_text(&format!("Appointment with {}", parsed.name));
    let description = if parsed.phone == NO_PHONE {
        escape_text(&parsed.details)
    } else {
        escape_text(&format!("{}\n{}", parsed.details, parsed.phone))
    };

    Ok(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Appt Intake//Scheduler//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

// RFC 5545 TEXT escaping
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}
