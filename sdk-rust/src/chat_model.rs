use crate::{ChatInput, ServiceResult};

#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    /// Returns the text of the first completion choice.
    async fn complete(&self, input: ChatInput) -> ServiceResult<String>;
}
