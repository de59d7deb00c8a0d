use crate::{ArtController, GeneratedImage, ImageGenerator, NewsFetcher, RunError};
use tracing::{info, warn};

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub image: GeneratedImage,
    /// Script-owned art removed before the upload.
    pub deleted: usize,
    pub uploaded_content_id: String,
    /// `None` when the TV listed no script-owned art after the upload.
    pub selected_content_id: Option<String>,
}

/// Runs the fixed sequence: check support, generate, clean up, upload,
/// select. Every step is awaited before the next starts.
pub struct Orchestrator {
    controller: ArtController,
    generator: ImageGenerator,
    news: Option<NewsFetcher>,
    prompt: String,
    news_question: Option<String>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        controller: ArtController,
        generator: ImageGenerator,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            controller,
            generator,
            news: None,
            prompt: prompt.into(),
            news_question: None,
        }
    }

    /// Ask `news` for `question` and use the answer as the prompt.
    #[must_use]
    pub fn with_news(mut self, news: NewsFetcher, question: impl Into<String>) -> Self {
        self.news = Some(news);
        self.news_question = Some(question.into());
        self
    }

    pub async fn run(&self) -> Result<RunOutcome, RunError> {
        if !self.controller.check_art_mode_support().await {
            return Err(RunError::ArtModeUnsupported);
        }

        let prompt = self.resolve_prompt().await;
        info!(prompt, "generating image");
        let image = self.generator.generate(&prompt).await?;

        let deleted = self.controller.clean_old_art().await?;
        info!(deleted, "removed old art");

        let uploaded_content_id = self.controller.upload_image(&image.file_path).await?;

        let selected_content_id = self.controller.set_latest_art().await?;
        match &selected_content_id {
            Some(content_id) => info!(content_id, "art updated"),
            None => warn!(uploaded_content_id, "uploaded art was not selected"),
        }

        Ok(RunOutcome {
            image,
            deleted,
            uploaded_content_id,
            selected_content_id,
        })
    }

    async fn resolve_prompt(&self) -> String {
        if let (Some(news), Some(question)) = (&self.news, &self.news_question) {
            if let Some(summary) = news.get_prompt(question).await {
                return summary;
            }
            warn!("no news summary, using the configured prompt");
        }
        self.prompt.clone()
    }
}
