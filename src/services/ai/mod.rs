pub mod extraction;
pub mod groq;
pub mod ollama;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::ParsedAppointment;

pub use extraction::LlmExtractor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String>;
}

/// An alternate source for the same record the rule-based extractor builds.
/// One attempt per call; any error means "use the rules instead".
#[async_trait]
pub trait SmartExtractor: Send + Sync {
    async fn attempt(
        &self,
        text: &str,
        now: &DateTime<FixedOffset>,
    ) -> anyhow::Result<ParsedAppointment>;
}
