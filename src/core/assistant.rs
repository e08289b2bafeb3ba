use crate::domain::model::ChatReply;
use crate::domain::ports::ChatResponder;
use crate::utils::error::{DealMindError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

pub const GREETING: &str = "Hello! I'm your DealMind AI assistant. I can help you analyze contracts, compare terms, and answer questions about your deals. What would you like to know?";

pub const PREDEFINED_QUESTIONS: [&str; 6] = [
    "What's the current margin for iPhone 17?",
    "Compare SLA requirements between Apple and Samsung",
    "Which contracts are expiring soon?",
    "What territories are covered in the Oppo contract?",
    "Show me payment terms for all brands",
    "What's my negotiation position with Xiaomi?",
];

pub const FALLBACK_RESPONSE: &str = "I understand you're asking about contract terms. Based on your current contracts, I can provide insights on margins, SLAs, territories, payment terms, and negotiation strategies. Could you be more specific about what aspect you'd like to explore?";

/// Ordered keyword rules; the first rule with any matching keyword wins.
const RESPONSE_RULES: &[(&[&str], &str)] = &[
    (
        &["margin", "iphone 17"],
        "The current margin for iPhone 17 is 12%. This represents a 1% improvement from the iPhone 16 margin of 11%. The margin has been steadily increasing over the past 6 months.",
    ),
    (
        &["sla", "compare"],
        "SLA comparison: Apple iPhone 17 requires 12-hour response time, while Samsung Galaxy S24 requires 18 hours. Apple has stricter SLA requirements but offers higher margins.",
    ),
    (
        &["expiring", "soon"],
        "You have 2 contracts expiring soon: Samsung Galaxy S24 (expires May 20, 2025 - 5 months remaining) and Oppo Reno X (expires December 10, 2025 - 11 months remaining).",
    ),
    (
        &["territory", "oppo"],
        "The Oppo contract covers the following territories: Delhi, Mumbai, Bangalore, Chennai, and Hyderabad. This represents the top 5 metropolitan markets in India.",
    ),
    (
        &["payment"],
        "Payment terms vary by brand: Apple (Net 30 days), Samsung (Net 45 days), Oppo (Net 30 days), Vivo (Net 60 days), Xiaomi (Net 30 days).",
    ),
    (
        &["negotiation", "xiaomi"],
        "Your negotiation position with Xiaomi is strong. You have consistent order volumes, good payment history, and their current margin of 9% has room for improvement. Consider negotiating for 10-11% margin.",
    ),
];

pub fn canned_response(message: &str) -> &'static str {
    let message = message.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| message.contains(*k)))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_RESPONSE)
}

/// Keyword-table assistant. No model behind it.
#[derive(Debug, Clone, Default)]
pub struct CannedAssistant {
    reply_delay: Duration,
}

impl CannedAssistant {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    pub async fn reply(&self, message: &str) -> Result<ChatReply> {
        let reply = self.respond(message).await?;
        Ok(ChatReply {
            reply,
            sender: "bot".to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl ChatResponder for CannedAssistant {
    async fn respond(&self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(DealMindError::InvalidRequest {
                message: "chat message cannot be empty".to_string(),
            });
        }

        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }

        let response = canned_response(message);
        tracing::debug!("🤖 Assistant matched {} chars of input", message.len());
        Ok(response.to_string())
    }
}
