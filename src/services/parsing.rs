use std::fmt::Display;

use chrono::{DateTime, Local, Offset, TimeZone};

use crate::extractor;
use crate::models::{ParseSource, ParsedAppointment};
use crate::services::ai::SmartExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub appointment: ParsedAppointment,
    pub source: ParseSource,
}

/// Runs the smart extractor when one is configured and falls back to the
/// rule-based extractor on any failure. Callers never see a smart error.
pub struct AppointmentParser {
    smart: Option<Box<dyn SmartExtractor>>,
}

impl AppointmentParser {
    pub fn rules_only() -> Self {
        Self { smart: None }
    }

    pub fn with_smart(smart: Box<dyn SmartExtractor>) -> Self {
        Self { smart: Some(smart) }
    }

    pub fn has_smart(&self) -> bool {
        self.smart.is_some()
    }

    pub async fn parse(&self, text: &str) -> Option<ParseOutcome> {
        self.parse_at(text, Local::now()).await
    }

    pub async fn parse_at<Tz>(&self, text: &str, now: DateTime<Tz>) -> Option<ParseOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if text.trim().is_empty() {
            return None;
        }

        if let Some(smart) = &self.smart {
            let context = now.with_timezone(&now.offset().fix());
            match smart.attempt(text, &context).await {
                Ok(appointment) => {
                    return Some(ParseOutcome {
                        appointment,
                        source: ParseSource::Smart,
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "smart extraction failed, using rule-based extractor");
                }
            }
        }

        extractor::extract_at(text, now).map(|appointment| ParseOutcome {
            appointment,
            source: ParseSource::Rules,
        })
    }
}
