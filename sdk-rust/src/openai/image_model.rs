use super::images_api::{CreateImageRequest, ImageResponseFormat, ImagesResponse};
use crate::{
    client_utils, opentelemetry::trace_call, ImageGenerationInput, ImageGenerationResponse,
    ImageModel, ImageOutput, ServiceError, ServiceResult,
};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};

const PROVIDER: &str = "openai";

pub struct OpenAIImageModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct OpenAIImageModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
}

impl OpenAIImageModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: OpenAIImageModelOptions) -> Self {
        let OpenAIImageModelOptions {
            base_url,
            api_key,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
        }
    }

    fn request_headers(&self) -> ServiceResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                ServiceError::InvalidInput(format!("Invalid OpenAI API key header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ImageModel for OpenAIImageModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(
        &self,
        input: ImageGenerationInput,
    ) -> ServiceResult<ImageGenerationResponse> {
        trace_call(PROVIDER, "images.generate", async move {
            let request = convert_to_openai_image_request(input, &self.model_id);
            let headers = self.request_headers()?;

            let response: ImagesResponse = client_utils::send_json(
                &self.client,
                &format!("{}/images/generations", self.base_url),
                &request,
                headers,
                None,
            )
            .await?;

            map_openai_images_response(response)
        })
        .await
    }
}

fn convert_to_openai_image_request(
    input: ImageGenerationInput,
    model_id: &str,
) -> CreateImageRequest {
    CreateImageRequest {
        prompt: input.prompt,
        model: model_id.to_string(),
        n: Some(input.n),
        quality: input.quality,
        response_format: Some(ImageResponseFormat::Url),
        size: input.size,
    }
}

fn map_openai_images_response(response: ImagesResponse) -> ServiceResult<ImageGenerationResponse> {
    let images = response
        .data
        .into_iter()
        .map(|image| {
            let url = image.url.ok_or_else(|| {
                ServiceError::Invariant(PROVIDER, "Image in response has no url".to_string())
            })?;
            Ok(ImageOutput {
                url,
                revised_prompt: image.revised_prompt,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    if images.is_empty() {
        return Err(ServiceError::Invariant(
            PROVIDER,
            "No images in response".to_string(),
        ));
    }

    Ok(ImageGenerationResponse { images })
}
