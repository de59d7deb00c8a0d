mod config;
mod controller;
mod errors;
mod imager;
mod news;
mod orchestrator;

pub use config::{Config, DEFAULT_IMAGES_DIR, DEFAULT_IMAGE_MODEL, DEFAULT_NEWS_MODEL};
pub use controller::ArtController;
pub use errors::{ArtError, ConfigError, RunError};
pub use imager::{image_file_name, GeneratedImage, ImageGenerator};
pub use news::{daily_headlines_question, NewsFetcher, SYSTEM_INSTRUCTION};
pub use orchestrator::{Orchestrator, RunOutcome};
