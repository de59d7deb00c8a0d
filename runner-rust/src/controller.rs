use crate::ArtError;
use frame_art_sdk::{ArtClient, ArtItem, UploadOptions};
use std::{path::Path, sync::Arc};
use tracing::{error, info, warn};

/// Manages the art this tool puts on one TV.
///
/// Art the tool uploaded is recognised only by the `MY` prefix of its
/// content id. Nothing about the device is cached between calls.
pub struct ArtController {
    client: Arc<dyn ArtClient>,
    upload_options: UploadOptions,
}

impl ArtController {
    #[must_use]
    pub fn new(client: Arc<dyn ArtClient>) -> Self {
        Self {
            client,
            upload_options: UploadOptions::default(),
        }
    }

    /// Use `matte` for uploaded images instead of `shadowbox_polar`.
    #[must_use]
    pub fn with_matte(mut self, matte: impl Into<String>) -> Self {
        self.upload_options.matte = matte.into();
        self
    }

    /// Whether the TV supports art mode. Any failure to find out counts as
    /// unsupported.
    pub async fn check_art_mode_support(&self) -> bool {
        match self.client.supported().await {
            Ok(supported) => {
                info!(supported, "art mode support");
                supported
            }
            Err(err) => {
                error!(error = %err, "failed to query art mode support");
                false
            }
        }
    }

    pub async fn set_art_mode(&self, on: bool) -> Result<(), ArtError> {
        self.client
            .set_artmode(on)
            .await
            .map_err(ArtError::from)
            .inspect_err(|err| error!(error = %err, on, "failed to switch art mode"))
    }

    /// Switch the TV to art mode and upload the image at `path`. Returns the
    /// content id the TV assigned.
    pub async fn upload_image(&self, path: impl AsRef<Path>) -> Result<String, ArtError> {
        let path = path.as_ref();
        let result = async {
            self.client.set_artmode(true).await?;
            let data = tokio::fs::read(path).await.map_err(|source| ArtError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let content_id = self
                .client
                .upload(data, self.upload_options.clone())
                .await?;
            Ok::<_, ArtError>(content_id)
        }
        .await;

        match &result {
            Ok(content_id) => info!(path = %path.display(), content_id, "uploaded image"),
            Err(err) => error!(path = %path.display(), error = %err, "failed to upload image"),
        }
        result
    }

    pub async fn delete_art(&self, content_id: &str) -> Result<(), ArtError> {
        self.client
            .delete(content_id)
            .await
            .map_err(ArtError::from)
            .inspect(|()| info!(content_id, "deleted art"))
            .inspect_err(|err| error!(content_id, error = %err, "failed to delete art"))
    }

    pub async fn list_art(&self) -> Result<Vec<ArtItem>, ArtError> {
        self.client
            .available()
            .await
            .map_err(ArtError::from)
            .inspect_err(|err| error!(error = %err, "failed to list art"))
    }

    /// The content id of the artwork on screen, if the TV reports one.
    pub async fn get_current_art_content_id(&self) -> Result<Option<String>, ArtError> {
        let current = self
            .client
            .get_current()
            .await
            .inspect_err(|err| error!(error = %err, "failed to get current art"))?;
        Ok(current.content_id)
    }

    /// Delete every script-owned entry. A failed listing aborts; a failed
    /// delete is logged and the rest still run. Returns the number deleted.
    pub async fn clean_old_art(&self) -> Result<usize, ArtError> {
        let items = self.list_art().await?;

        let mut deleted = 0;
        for item in items.iter().filter(|item| item.is_script_owned()) {
            info!(content_id = %item.content_id, "removing old art");
            if self.delete_art(&item.content_id).await.is_ok() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Show the script-owned entry with the greatest content id. Returns
    /// `None`, without selecting anything, when there is none.
    pub async fn set_latest_art(&self) -> Result<Option<String>, ArtError> {
        let items = self.list_art().await?;

        let Some(latest) = latest_script_owned(&items) else {
            warn!("no script-owned art to select");
            return Ok(None);
        };

        self.client
            .select_image(&latest.content_id)
            .await
            .inspect_err(|err| {
                error!(content_id = %latest.content_id, error = %err, "failed to select art");
            })?;
        info!(content_id = %latest.content_id, "selected latest art");
        Ok(Some(latest.content_id.clone()))
    }
}

/// Content ids sort in upload order, so the greatest is the newest.
fn latest_script_owned(items: &[ArtItem]) -> Option<&ArtItem> {
    items
        .iter()
        .filter(|item| item.is_script_owned())
        .max_by(|a, b| a.content_id.cmp(&b.content_id))
}
