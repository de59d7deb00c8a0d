use serde::{Deserialize, Serialize};

// https://platform.openai.com/docs/api-reference/images/create

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateImageRequest {
    /// A text description of the desired image(s). The maximum length is
    /// 4000 characters for `dall-e-3`.
    pub prompt: String,

    /// The model to use for image generation.
    pub model: String,

    /// The number of images to generate. For `dall-e-3`, only `n=1` is
    /// supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    /// The quality of the image that will be generated. `hd` creates images
    /// with finer details and greater consistency across the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// The format in which the generated images are returned. URLs are only
    /// valid for 60 minutes after the image has been generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,

    /// The size of the generated images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesResponse {
    /// The Unix timestamp (in seconds) of when the image was created.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// The URL of the generated image, if `response_format` is `url`.
    #[serde(default)]
    pub url: Option<String>,
    /// The prompt that was used to generate the image, if there was any
    /// revision to the prompt.
    #[serde(default)]
    pub revised_prompt: Option<String>,
}
