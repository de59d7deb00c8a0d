use chrono::NaiveDate;
use frame_art_sdk::{ChatInput, ChatMessage, ChatModel, ServiceResult};
use std::sync::Arc;
use tracing::{error, info};

pub const SYSTEM_INSTRUCTION: &str = "Be precise and concise.";

/// Asks a chat model short questions, e.g. for today's headlines to turn
/// into an image prompt.
pub struct NewsFetcher {
    model: Arc<dyn ChatModel>,
}

impl NewsFetcher {
    #[must_use]
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// The answer to `question`, or `None` when the request fails for any
    /// reason. Failures are logged.
    pub async fn get_prompt(&self, question: &str) -> Option<String> {
        match self.fetch_summary(question).await {
            Ok(summary) => {
                info!(
                    provider = self.model.provider(),
                    model = %self.model.model_id(),
                    "retrieved news summary"
                );
                Some(summary)
            }
            Err(err) => {
                error!(
                    provider = self.model.provider(),
                    model = %self.model.model_id(),
                    error = %err,
                    "news summary request failed"
                );
                None
            }
        }
    }

    pub async fn fetch_summary(&self, question: &str) -> ServiceResult<String> {
        self.model
            .complete(ChatInput {
                messages: vec![
                    ChatMessage::system(SYSTEM_INSTRUCTION),
                    ChatMessage::user(question),
                ],
            })
            .await
    }
}

pub fn daily_headlines_question(date: NaiveDate) -> String {
    format!(
        "What are the major news headlines for {}?",
        date.format("%Y-%m-%d")
    )
}
