use crate::ServiceError;
use futures::{Stream, StreamExt};
use reqwest::{header::HeaderMap, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Create a JSON request, parse the response.
/// Throws error on non OK status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
    timeout: Option<Duration>,
) -> Result<R, ServiceError> {
    let mut request = client.post(url).headers(headers).json(data);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }
    let response = send_checked(request).await?;
    Ok(response.json::<R>().await?)
}

/// Issue a GET request and parse the JSON body.
/// Throws error on non OK status code.
pub async fn get_json<R: DeserializeOwned>(
    client: &Client,
    url: &str,
    timeout: Option<Duration>,
) -> Result<R, ServiceError> {
    let mut request = client.get(url);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }
    let response = send_checked(request).await?;
    Ok(response.json::<R>().await?)
}

/// Issue a GET request and return the body as a byte stream.
/// Throws error on non OK status code before any byte is read.
pub async fn get_stream(
    client: &Client,
    url: &str,
) -> Result<impl Stream<Item = Result<bytes::Bytes, ServiceError>>, ServiceError> {
    let response = send_checked(client.get(url)).await?;
    Ok(response
        .bytes_stream()
        .map(|chunk| chunk.map_err(ServiceError::from)))
}

async fn send_checked(request: RequestBuilder) -> Result<Response, ServiceError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}
