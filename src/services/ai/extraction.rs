use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::extractor::{self, phone, NO_DETAILS, NO_PHONE, UNKNOWN_NAME};
use crate::models::ParsedAppointment;
use crate::services::ai::{LlmProvider, Message, SmartExtractor};

const SYSTEM_PROMPT: &str = r#"You extract appointment details from a single sentence typed by a contractor.

Return ONLY valid JSON (no markdown, no explanation) with exactly these keys:
{
  "name": "the customer's full name, or \"Unknown\"",
  "phone": "10-digit phone as XXX-XXX-XXXX, or \"No phone\"",
  "datetime": "RFC 3339 timestamp with offset, e.g. 2025-01-15T14:00:00-07:00",
  "details": "what the appointment is for, or \"No details provided\""
}

Rules:
- Resolve relative days ("tomorrow", "next Friday") against the current date below.
- If a day is given without a time, use 09:00.
- If no day or time is given, use the current date and time.
- Never invent a name or phone number that is not in the text.
"#;

#[derive(Debug, Deserialize)]
struct ExtractionReply {
    name: String,
    phone: String,
    datetime: String,
    details: String,
}

/// Asks an LLM for the appointment fields.
pub struct LlmExtractor {
    llm: Box<dyn LlmProvider>,
}

impl LlmExtractor {
    pub fn new(llm: Box<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SmartExtractor for LlmExtractor {
    async fn attempt(
        &self,
        text: &str,
        now: &DateTime<FixedOffset>,
    ) -> anyhow::Result<ParsedAppointment> {
        let system = format!(
            "{SYSTEM_PROMPT}\nCurrent date and time: {} ({})",
            extractor::format_timestamp(now),
            now.format("%A"),
        );
        let messages = [Message {
            role: "user".to_string(),
            content: text.to_string(),
        }];

        let response = self.llm.chat(&system, &messages).await?;
        parse_extraction_response(&response)
    }
}

fn parse_extraction_response(response: &str) -> anyhow::Result<ParsedAppointment> {
    let reply = decode_reply(response)?;

    let datetime = DateTime::parse_from_rfc3339(reply.datetime.trim())
        .with_context(|| format!("unparsable datetime from LLM: {}", reply.datetime))?;

    Ok(ParsedAppointment {
        name: or_sentinel(&reply.name, UNKNOWN_NAME),
        phone: phone::format_phone(&reply.phone).unwrap_or_else(|| NO_PHONE.to_string()),
        datetime: extractor::format_timestamp(&datetime),
        details: or_sentinel(&reply.details, NO_DETAILS),
    })
}

fn decode_reply(response: &str) -> anyhow::Result<ExtractionReply> {
    if let Ok(reply) = serde_json::from_str::<ExtractionReply>(response) {
        return Ok(reply);
    }

    // Strip markdown code fences
    let trimmed = response.trim();
    let cleaned = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(reply) = serde_json::from_str::<ExtractionReply>(cleaned) {
        return Ok(reply);
    }

    // Last resort: the outermost JSON object in the text
    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            return serde_json::from_str(&cleaned[start..=end])
                .context("LLM reply is not a complete appointment record");
        }
    }

    anyhow::bail!("LLM reply contains no JSON object")
}

fn or_sentinel(value: &str, sentinel: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}
