//! In-memory stand-ins for the service traits, for tests of code built on
//! this crate.

mod art_client;
mod chat_model;
mod image_model;

pub use art_client::{ArtCall, ArtOperation, MockArtClient};
pub use chat_model::MockChatModel;
pub use image_model::MockImageModel;
