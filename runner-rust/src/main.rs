use frame_art_runner::{
    ArtController, Config, ImageGenerator, NewsFetcher, Orchestrator, RunError,
    DEFAULT_IMAGE_MODEL, DEFAULT_NEWS_MODEL,
};
use frame_art_sdk::{
    openai::{OpenAIImageModel, OpenAIImageModelOptions},
    perplexity::{PerplexityChatModel, PerplexityChatModelOptions},
    samsung::{SamsungTv, SamsungTvOptions},
};
use std::{process::ExitCode, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "frame-art run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RunError> {
    let config = Config::from_env()?;
    info!(tv = %config.tv_ip_address, images_dir = %config.images_dir.display(), "starting");

    let tv = SamsungTv::new(
        config.tv_ip_address.clone(),
        SamsungTvOptions {
            name: Some(config.tv_client_name.clone()),
            token: config.tv_token.clone(),
            ..Default::default()
        },
    );
    let controller = ArtController::new(Arc::new(tv)).with_matte(config.art_matte.clone());

    let image_model = OpenAIImageModel::new(
        DEFAULT_IMAGE_MODEL,
        OpenAIImageModelOptions {
            api_key: config.openai_api_key.clone(),
            ..Default::default()
        },
    );
    let generator = ImageGenerator::new(Arc::new(image_model), config.images_dir.clone());

    let mut orchestrator = Orchestrator::new(controller, generator, config.prompt.clone());
    if let (Some(question), Some(api_key)) = (&config.news_question, &config.perplexity_api_key) {
        let chat_model = PerplexityChatModel::new(
            DEFAULT_NEWS_MODEL,
            PerplexityChatModelOptions {
                api_key: api_key.clone(),
                ..Default::default()
            },
        );
        orchestrator =
            orchestrator.with_news(NewsFetcher::new(Arc::new(chat_model)), question.clone());
    }

    let outcome = orchestrator.run().await?;
    info!(
        file = %outcome.image.file_path.display(),
        deleted = outcome.deleted,
        uploaded = %outcome.uploaded_content_id,
        selected = ?outcome.selected_content_id,
        "run complete"
    );
    Ok(())
}
