mod art_client;
mod chat_model;
pub mod client_utils;
mod errors;
mod image_model;
pub mod openai;
pub mod opentelemetry;
pub mod perplexity;
pub mod samsung;
pub mod sdk_test;
mod types;

pub use art_client::ArtClient;
pub use chat_model::ChatModel;
pub use errors::*;
pub use image_model::ImageModel;
pub use types::*;
