use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content ids of art uploaded by this tool carry this prefix. Pre-installed
/// and store art never does.
pub const SCRIPT_OWNED_PREFIX: &str = "MY";

/// Defines the input to an image model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationInput {
    /// A text description of the desired image.
    pub prompt: String,
    /// The quality tier of the image, e.g. `hd`.
    pub quality: Option<String>,
    /// The number of images to generate.
    pub n: u32,
    /// The size of the generated image, e.g. `1792x1024`.
    pub size: Option<String>,
}

impl ImageGenerationInput {
    /// One high-detail image for `prompt`.
    pub fn hd(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            quality: Some("hd".to_string()),
            n: 1,
            size: None,
        }
    }
}

/// An image produced by an image model. The URL is temporary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOutput {
    pub url: String,
    /// The prompt after the provider rewrote it, when it reports one.
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub images: Vec<ImageOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Defines the input to a chat model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatInput {
    pub messages: Vec<ChatMessage>,
}

/// One entry stored on the TV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtItem {
    pub content_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matte_id: Option<String>,
}

impl ArtItem {
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            title: None,
            category_id: None,
            matte_id: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether this entry was uploaded by this tool.
    pub fn is_script_owned(&self) -> bool {
        self.content_id.starts_with(SCRIPT_OWNED_PREFIX)
    }
}

/// The descriptor the TV returns for the artwork currently on screen.
/// Fields the TV adds beyond the named ones are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentArtwork {
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub matte_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for sending an image to the TV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// `png` or `jpg`.
    pub file_type: String,
    pub matte: String,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            file_type: "png".to_string(),
            matte: "shadowbox_polar".to_string(),
        }
    }
}
