use crate::RunError;
use chrono::{Local, NaiveDateTime};
use frame_art_sdk::{client_utils, ImageGenerationInput, ImageModel, ServiceError};
use futures::{pin_mut, Stream, StreamExt};
use reqwest::Client;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{error, info, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// An image generated for a prompt and saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    /// Where the provider served the image. Expires shortly after
    /// generation.
    pub url: String,
    pub file_name: String,
    pub file_path: PathBuf,
}

/// Generates one image per call and writes it under the images directory.
/// Earlier images are never touched.
pub struct ImageGenerator {
    model: Arc<dyn ImageModel>,
    client: Client,
    images_dir: PathBuf,
}

impl ImageGenerator {
    #[must_use]
    pub fn new(model: Arc<dyn ImageModel>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            client: Client::new(),
            images_dir: images_dir.into(),
        }
    }

    /// Use `client` for image downloads.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, RunError> {
        self.try_generate(prompt).await.inspect_err(|err| {
            error!(error = %err, prompt, "image generation failed");
        })
    }

    async fn try_generate(&self, prompt: &str) -> Result<GeneratedImage, RunError> {
        let response = self
            .model
            .generate(ImageGenerationInput::hd(prompt))
            .await?;

        let image = response.images.into_iter().next().ok_or_else(|| {
            ServiceError::Invariant(self.model.provider(), "No image returned".to_string())
        })?;

        let stream = client_utils::get_stream(&self.client, &image.url).await?;

        let file_name = image_file_name(prompt, &Local::now().naive_local());
        let file_path = self.images_dir.join(&file_name);

        fs::create_dir_all(&self.images_dir)
            .await
            .map_err(|source| RunError::Io {
                path: self.images_dir.display().to_string(),
                source,
            })?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
            .map_err(|source| RunError::Io {
                path: file_path.display().to_string(),
                source,
            })?;

        let size = match write_stream(&mut file, stream, &file_path).await {
            Ok(size) => size,
            Err(err) => {
                drop(file);
                if let Err(remove_err) = fs::remove_file(&file_path).await {
                    warn!(
                        path = %file_path.display(),
                        error = %remove_err,
                        "failed to remove partial image"
                    );
                }
                return Err(err);
            }
        };

        info!(
            path = %file_path.display(),
            bytes = size,
            model = %self.model.model_id(),
            "saved generated image"
        );

        Ok(GeneratedImage {
            prompt: prompt.to_string(),
            url: image.url,
            file_name,
            file_path,
        })
    }
}

async fn write_stream<S, B>(
    file: &mut fs::File,
    stream: S,
    path: &Path,
) -> Result<usize, RunError>
where
    S: Stream<Item = Result<B, ServiceError>>,
    B: AsRef<[u8]>,
{
    let io_error = |source| RunError::Io {
        path: path.display().to_string(),
        source,
    };
    pin_mut!(stream);

    let mut size = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk = chunk.as_ref();
        size += chunk.len();
        file.write_all(chunk).await.map_err(io_error)?;
    }
    file.flush().await.map_err(io_error)?;
    Ok(size)
}

/// `<first word>_<second word>_<YYYY-MM-DD_HH-MM-SS>.png`. Path separators
/// in the words become `-`.
pub fn image_file_name(prompt: &str, timestamp: &NaiveDateTime) -> String {
    let mut parts: Vec<String> = prompt
        .split_whitespace()
        .take(2)
        .map(|word| word.replace(['/', '\\'], "-"))
        .collect();
    parts.push(timestamp.format(TIMESTAMP_FORMAT).to_string());
    format!("{}.png", parts.join("_"))
}
