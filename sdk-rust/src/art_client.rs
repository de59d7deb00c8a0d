use crate::{ArtItem, CurrentArtwork, ServiceResult, UploadOptions};

/// The art-mode surface of a TV. Implementations own their connection to the
/// device; callers hold one client per device.
#[async_trait::async_trait]
pub trait ArtClient: Send + Sync {
    /// Whether the device supports art mode at all.
    async fn supported(&self) -> ServiceResult<bool>;
    async fn set_artmode(&self, on: bool) -> ServiceResult<()>;
    /// Sends image bytes to the device and returns the content id it
    /// assigned.
    async fn upload(&self, data: Vec<u8>, options: UploadOptions) -> ServiceResult<String>;
    async fn available(&self) -> ServiceResult<Vec<ArtItem>>;
    async fn delete(&self, content_id: &str) -> ServiceResult<()>;
    async fn get_current(&self) -> ServiceResult<CurrentArtwork>;
    async fn select_image(&self, content_id: &str) -> ServiceResult<()>;
}
