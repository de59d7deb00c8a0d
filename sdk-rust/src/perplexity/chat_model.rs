use super::chat_api::{ChatCompletionRequest, ChatCompletionResponse};
use crate::{
    client_utils, opentelemetry::trace_call, ChatInput, ChatModel, ServiceError, ServiceResult,
};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use std::time::Duration;

const PROVIDER: &str = "perplexity";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct PerplexityChatModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

#[derive(Clone, Default)]
pub struct PerplexityChatModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
    /// Bound on the whole request. Defaults to 10 seconds.
    pub timeout: Option<Duration>,
}

impl PerplexityChatModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: PerplexityChatModelOptions) -> Self {
        let PerplexityChatModelOptions {
            base_url,
            api_key,
            client,
            timeout,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.perplexity.ai".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    fn request_headers(&self) -> ServiceResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                ServiceError::InvalidInput(format!(
                    "Invalid Perplexity API key header value: {error}"
                ))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ChatModel for PerplexityChatModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn complete(&self, input: ChatInput) -> ServiceResult<String> {
        trace_call(PROVIDER, "chat.completions", async move {
            let request = ChatCompletionRequest {
                model: self.model_id.clone(),
                messages: input.messages,
            };
            let headers = self.request_headers()?;

            let response: ChatCompletionResponse = client_utils::send_json(
                &self.client,
                &format!("{}/chat/completions", self.base_url),
                &request,
                headers,
                Some(self.timeout),
            )
            .await?;

            first_choice_content(response)
        })
        .await
    }
}

fn first_choice_content(response: ChatCompletionResponse) -> ServiceResult<String> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ServiceError::Invariant(PROVIDER, "No choices in response".to_string())
    })?;

    choice
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| {
            ServiceError::Invariant(PROVIDER, "First choice has no message content".to_string())
        })
}
