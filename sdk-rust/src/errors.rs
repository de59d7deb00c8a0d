use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the service failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the service did not have the expected shape (e.g.
    /// no choices returned in a chat completion)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
    /// The TV rejected a request or reported an error event.
    #[error("Device error: {0}")]
    Device(String),
    /// The art channel to the TV closed before the awaited response.
    #[error("Art channel closed {0}")]
    ChannelClosed(String),
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// No response arrived within the configured wait.
    #[error("Timed out waiting for {0}")]
    Timeout(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
