use crate::{ChatInput, ChatModel, ServiceError, ServiceResult};
use std::{collections::VecDeque, sync::Mutex};

#[derive(Default)]
struct MockChatModelState {
    mocked_results: VecDeque<ServiceResult<String>>,
    tracked_inputs: Vec<ChatInput>,
}

/// A mock chat model that tracks inputs and yields predefined outputs.
pub struct MockChatModel {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockChatModelState>,
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-chat-model".to_string(),
            state: Mutex::new(MockChatModelState::default()),
        }
    }
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a completion text for the next `complete` call.
    pub fn enqueue_text(&self, text: impl Into<String>) -> &Self {
        self.enqueue(Ok(text.into()))
    }

    /// Enqueue an error for the next `complete` call.
    pub fn enqueue_error(&self, error: ServiceError) -> &Self {
        self.enqueue(Err(error))
    }

    fn enqueue(&self, result: ServiceResult<String>) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.push_back(result);
        drop(state);
        self
    }

    /// Retrieve the tracked inputs accumulated so far.
    pub fn tracked_inputs(&self) -> Vec<ChatInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clone()
    }
}

#[async_trait::async_trait]
impl ChatModel for MockChatModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn complete(&self, input: ChatInput) -> ServiceResult<String> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.push(input);

        state.mocked_results.pop_front().unwrap_or_else(|| {
            Err(ServiceError::Invariant(
                self.provider,
                "no mocked complete results available".into(),
            ))
        })
    }
}
