use crate::{ImageGenerationInput, ImageGenerationResponse, ServiceResult};

#[async_trait::async_trait]
pub trait ImageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, input: ImageGenerationInput)
        -> ServiceResult<ImageGenerationResponse>;
}
