use crate::{
    ImageGenerationInput, ImageGenerationResponse, ImageModel, ImageOutput, ServiceError,
    ServiceResult,
};
use std::{collections::VecDeque, sync::Mutex};

#[derive(Default)]
struct MockImageModelState {
    mocked_results: VecDeque<ServiceResult<ImageGenerationResponse>>,
    tracked_inputs: Vec<ImageGenerationInput>,
}

/// A mock image model that tracks inputs and yields predefined outputs.
pub struct MockImageModel {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockImageModelState>,
}

impl Default for MockImageModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-image-model".to_string(),
            state: Mutex::new(MockImageModelState::default()),
        }
    }
}

impl MockImageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a result for the next `generate` call.
    pub fn enqueue(&self, result: ServiceResult<ImageGenerationResponse>) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.push_back(result);
        drop(state);
        self
    }

    /// Convenience to enqueue a response holding one image at `url`.
    pub fn enqueue_url(&self, url: impl Into<String>) -> &Self {
        self.enqueue(Ok(ImageGenerationResponse {
            images: vec![ImageOutput {
                url: url.into(),
                revised_prompt: None,
            }],
        }))
    }

    /// Enqueue an error for the next `generate` call.
    pub fn enqueue_error(&self, error: ServiceError) -> &Self {
        self.enqueue(Err(error))
    }

    /// Retrieve the tracked inputs accumulated so far.
    pub fn tracked_inputs(&self) -> Vec<ImageGenerationInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clone()
    }
}

#[async_trait::async_trait]
impl ImageModel for MockImageModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(
        &self,
        input: ImageGenerationInput,
    ) -> ServiceResult<ImageGenerationResponse> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.push(input);

        state.mocked_results.pop_front().unwrap_or_else(|| {
            Err(ServiceError::Invariant(
                self.provider,
                "no mocked generate results available".into(),
            ))
        })
    }
}
