use crate::{
    ArtClient, ArtItem, CurrentArtwork, ServiceError, ServiceResult, UploadOptions,
    SCRIPT_OWNED_PREFIX,
};
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

/// The operations of [`ArtClient`], used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtOperation {
    Supported,
    SetArtmode,
    Upload,
    Available,
    Delete,
    GetCurrent,
    SelectImage,
}

/// A call received by the mock, in order of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtCall {
    Supported,
    SetArtmode(bool),
    Upload { size: usize, options: UploadOptions },
    Available,
    Delete(String),
    GetCurrent,
    SelectImage(String),
}

struct MockArtClientState {
    supported: bool,
    art_mode: bool,
    items: Vec<ArtItem>,
    current: Option<String>,
    next_upload: u32,
    failures: HashMap<ArtOperation, VecDeque<ServiceError>>,
    calls: Vec<ArtCall>,
}

impl Default for MockArtClientState {
    fn default() -> Self {
        Self {
            supported: true,
            art_mode: false,
            items: Vec::new(),
            current: None,
            next_upload: 1,
            failures: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

impl MockArtClientState {
    fn record(&mut self, operation: ArtOperation, call: ArtCall) -> ServiceResult<()> {
        self.calls.push(call);
        match self
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// An in-memory TV that keeps its art list between calls, tracks every call
/// and fails on demand.
///
/// Uploads are assigned ids `MY-F0001`, `MY-F0002`, ... in order.
#[derive(Default)]
pub struct MockArtClient {
    state: Mutex<MockArtClientState>,
}

impl MockArtClient {
    /// Construct a new mock TV with no art and art mode supported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a mock TV that already stores `items`.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ArtItem>,
    {
        let client = Self::new();
        client.set_items(items);
        client
    }

    /// Replace the stored art.
    pub fn set_items<I>(&self, items: I) -> &Self
    where
        I: IntoIterator<Item = ArtItem>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.items = items.into_iter().collect();
        drop(state);
        self
    }

    /// Override the art-mode capability the mock reports.
    pub fn set_supported(&self, supported: bool) -> &Self {
        self.state.lock().expect("mock state poisoned").supported = supported;
        self
    }

    /// Set the content id reported as currently shown.
    pub fn set_current(&self, content_id: Option<&str>) -> &Self {
        self.state.lock().expect("mock state poisoned").current = content_id.map(ToString::to_string);
        self
    }

    /// Make the next call of `operation` fail with `error`. Calls queue up.
    pub fn fail_next(&self, operation: ArtOperation, error: ServiceError) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
        drop(state);
        self
    }

    /// Retrieve the calls received so far.
    pub fn calls(&self) -> Vec<ArtCall> {
        self.state.lock().expect("mock state poisoned").calls.clone()
    }

    /// Content ids passed to `delete`, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ArtCall::Delete(content_id) => Some(content_id),
                _ => None,
            })
            .collect()
    }

    /// Content ids passed to `select_image`, in order.
    pub fn selected(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ArtCall::SelectImage(content_id) => Some(content_id),
                _ => None,
            })
            .collect()
    }

    /// The art currently stored.
    pub fn items(&self) -> Vec<ArtItem> {
        self.state.lock().expect("mock state poisoned").items.clone()
    }

    pub fn art_mode(&self) -> bool {
        self.state.lock().expect("mock state poisoned").art_mode
    }

    pub fn current(&self) -> Option<String> {
        self.state.lock().expect("mock state poisoned").current.clone()
    }

    /// Clear tracked calls without touching stored art or queued failures.
    pub fn reset(&self) {
        self.state.lock().expect("mock state poisoned").calls.clear();
    }
}

#[async_trait::async_trait]
impl ArtClient for MockArtClient {
    async fn supported(&self) -> ServiceResult<bool> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(ArtOperation::Supported, ArtCall::Supported)?;
        Ok(state.supported)
    }

    async fn set_artmode(&self, on: bool) -> ServiceResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(ArtOperation::SetArtmode, ArtCall::SetArtmode(on))?;
        state.art_mode = on;
        Ok(())
    }

    async fn upload(&self, data: Vec<u8>, options: UploadOptions) -> ServiceResult<String> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(
            ArtOperation::Upload,
            ArtCall::Upload {
                size: data.len(),
                options: options.clone(),
            },
        )?;

        let content_id = format!("{SCRIPT_OWNED_PREFIX}-F{:04}", state.next_upload);
        state.next_upload += 1;
        state.items.push(ArtItem {
            matte_id: Some(options.matte),
            ..ArtItem::new(content_id.clone())
        });
        Ok(content_id)
    }

    async fn available(&self) -> ServiceResult<Vec<ArtItem>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(ArtOperation::Available, ArtCall::Available)?;
        Ok(state.items.clone())
    }

    async fn delete(&self, content_id: &str) -> ServiceResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(ArtOperation::Delete, ArtCall::Delete(content_id.to_string()))?;

        let before = state.items.len();
        state.items.retain(|item| item.content_id != content_id);
        if state.items.len() == before {
            return Err(ServiceError::Device(format!(
                "no art with content_id {content_id}"
            )));
        }
        if state.current.as_deref() == Some(content_id) {
            state.current = None;
        }
        Ok(())
    }

    async fn get_current(&self) -> ServiceResult<CurrentArtwork> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(ArtOperation::GetCurrent, ArtCall::GetCurrent)?;
        Ok(CurrentArtwork {
            content_id: state.current.clone(),
            ..Default::default()
        })
    }

    async fn select_image(&self, content_id: &str) -> ServiceResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.record(
            ArtOperation::SelectImage,
            ArtCall::SelectImage(content_id.to_string()),
        )?;

        if !state.items.iter().any(|item| item.content_id == content_id) {
            return Err(ServiceError::Device(format!(
                "no art with content_id {content_id}"
            )));
        }
        state.current = Some(content_id.to_string());
        Ok(())
    }
}
