use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four fields recovered from one sentence. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAppointment {
    pub name: String,
    pub phone: String,
    pub datetime: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseSource {
    Smart,
    Rules,
}

impl ParseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseSource::Smart => "smart",
            ParseSource::Rules => "rules",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(flatten)]
    pub parsed: ParsedAppointment,
    pub source: ParseSource,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(parsed: ParsedAppointment, source: ParseSource) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            parsed,
            source,
            created_at: Utc::now(),
        }
    }

    /// Parsed start time, if the stored timestamp is well formed.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.parsed.datetime)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed() -> ParsedAppointment {
        ParsedAppointment {
            name: "John Doe".to_string(),
            phone: "720-555-1212".to_string(),
            datetime: "2026-10-20T15:00:00-06:00".to_string(),
            details: "wants estimate".to_string(),
        }
    }

    #[test]
    fn test_appointment_serializes_flat() {
        let appt = Appointment::new(parsed(), ParseSource::Rules);
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["name"], "John Doe");
        assert_eq!(json["phone"], "720-555-1212");
        assert_eq!(json["details"], "wants estimate");
        assert_eq!(json["source"], "rules");
        assert!(json.get("parsed").is_none());
    }

    #[test]
    fn test_starts_at_converts_to_utc() {
        let appt = Appointment::new(parsed(), ParseSource::Smart);
        let start = appt.starts_at().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-10-20T21:00:00+00:00");
    }

    #[test]
    fn test_starts_at_rejects_garbage() {
        let mut p = parsed();
        p.datetime = "next week".to_string();
        assert!(Appointment::new(p, ParseSource::Rules).starts_at().is_none());
    }
}
