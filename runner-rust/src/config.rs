use crate::ConfigError;
use std::{env, fmt, path::PathBuf};

pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_NEWS_MODEL: &str = "llama-3.1-sonar-huge-128k-online";
const DEFAULT_TV_CLIENT_NAME: &str = "FrameArt";
const DEFAULT_ART_MATTE: &str = "shadowbox_polar";

/// Settings read once at startup. Only presence of the required values is
/// checked.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub tv_ip_address: String,
    /// The prompt used when no news question is configured or the news
    /// lookup returns nothing.
    pub prompt: String,
    pub perplexity_api_key: Option<String>,
    /// When set, the news summary for this question becomes the prompt.
    pub news_question: Option<String>,
    pub images_dir: PathBuf,
    pub tv_token: Option<String>,
    pub tv_client_name: String,
    pub art_matte: String,
}

impl Config {
    /// Read the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let news_question = optional("NEWS_QUESTION");
        let perplexity_api_key = if news_question.is_some() {
            Some(required("PPX_API_KEY")?)
        } else {
            optional("PPX_API_KEY")
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            tv_ip_address: required("TV_IP_ADDRESS")?,
            prompt: required("PROMPT")?,
            perplexity_api_key,
            news_question,
            images_dir: optional("IMAGES_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR), PathBuf::from),
            tv_token: optional("TV_TOKEN"),
            tv_client_name: optional("TV_CLIENT_NAME")
                .unwrap_or_else(|| DEFAULT_TV_CLIENT_NAME.to_string()),
            art_matte: optional("ART_MATTE").unwrap_or_else(|| DEFAULT_ART_MATTE.to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("tv_ip_address", &self.tv_ip_address)
            .field("prompt", &self.prompt)
            .field(
                "perplexity_api_key",
                &self.perplexity_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("news_question", &self.news_question)
            .field("images_dir", &self.images_dir)
            .field("tv_token", &self.tv_token.as_ref().map(|_| "<redacted>"))
            .field("tv_client_name", &self.tv_client_name)
            .field("art_matte", &self.art_matte)
            .finish()
    }
}
