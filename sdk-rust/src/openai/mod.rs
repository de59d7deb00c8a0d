mod image_model;
mod images_api;

pub use image_model::{OpenAIImageModel, OpenAIImageModelOptions};
