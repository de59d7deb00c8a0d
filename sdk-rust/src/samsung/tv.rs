use super::art_api::{self, ChannelMessage, DeviceInfo, UploadHeader};
use crate::{
    client_utils, opentelemetry::trace_call, ArtClient, ArtItem, CurrentArtwork, ServiceError,
    ServiceResult, UploadOptions,
};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use futures::{SinkExt, StreamExt};
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    sync::Mutex,
};
use tokio_tungstenite::{
    tungstenite::Message, Connector, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info};
use uuid::Uuid;

const PROVIDER: &str = "samsung";
const DEFAULT_NAME: &str = "FrameArt";
const DEFAULT_REST_PORT: u16 = 8001;
const DEFAULT_WS_PORT: u16 = 8002;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type ArtChannel = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Art-mode client for a Samsung Frame TV on the local network.
///
/// The art channel websocket is opened on the first art request and kept
/// for the lifetime of the client. A transport failure drops it so the next
/// request reconnects.
pub struct SamsungTv {
    host: String,
    name: String,
    token: Option<String>,
    rest_port: u16,
    ws_port: u16,
    secure: bool,
    timeout: Duration,
    client: Client,
    channel: Mutex<Option<ArtChannel>>,
}

#[derive(Clone, Default)]
pub struct SamsungTvOptions {
    /// Client name shown in the TV's device list. Defaults to `FrameArt`.
    pub name: Option<String>,
    /// Pairing token the TV issued to this client on an earlier connection.
    pub token: Option<String>,
    pub rest_port: Option<u16>,
    pub ws_port: Option<u16>,
    /// Use `wss` for the art channel. Defaults to true; the TV's certificate
    /// is self-signed and is not verified.
    pub secure: Option<bool>,
    /// Bound on every wait for a response from the TV.
    pub timeout: Option<Duration>,
    pub client: Option<Client>,
}

impl SamsungTv {
    #[must_use]
    pub fn new(host: impl Into<String>, options: SamsungTvOptions) -> Self {
        let SamsungTvOptions {
            name,
            token,
            rest_port,
            ws_port,
            secure,
            timeout,
            client,
        } = options;

        Self {
            host: host.into(),
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            token,
            rest_port: rest_port.unwrap_or(DEFAULT_REST_PORT),
            ws_port: ws_port.unwrap_or(DEFAULT_WS_PORT),
            secure: secure.unwrap_or(true),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            client: client.unwrap_or_else(Client::new),
            channel: Mutex::new(None),
        }
    }

    /// The REST device descriptor.
    pub async fn device_info(&self) -> ServiceResult<DeviceInfo> {
        client_utils::get_json(
            &self.client,
            &format!("http://{}:{}/api/v2/", self.host, self.rest_port),
            Some(self.timeout),
        )
        .await
    }

    fn channel_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let mut url = format!(
            "{scheme}://{}:{}/api/v2/channels/{}?name={}",
            self.host,
            self.ws_port,
            art_api::ART_CHANNEL,
            BASE64_STANDARD.encode(&self.name)
        );
        if let Some(token) = &self.token {
            url.push_str("&token=");
            url.push_str(token);
        }
        url
    }

    async fn connect(&self) -> ServiceResult<ArtChannel> {
        let connector = if self.secure {
            Some(Connector::NativeTls(insecure_tls()?))
        } else {
            None
        };
        let (mut channel, _) = tokio_tungstenite::connect_async_tls_with_config(
            self.channel_url(),
            None,
            false,
            connector,
        )
        .await?;

        tokio::time::timeout(self.timeout, wait_until_ready(&mut channel))
            .await
            .map_err(|_| ServiceError::Timeout("ms.channel.ready".to_string()))??;

        info!(host = %self.host, "connected to art channel");
        Ok(channel)
    }

    async fn art_request(
        &self,
        request: Value,
        wait_for_event: Option<&str>,
    ) -> ServiceResult<Value> {
        let mut guard = self.channel.lock().await;
        if guard.is_none() {
            *guard = Some(self.connect().await?);
        }
        let Some(channel) = guard.as_mut() else {
            return Err(ServiceError::ChannelClosed("not open".to_string()));
        };

        let result = self.exchange(channel, request, wait_for_event).await;
        if is_connection_failure(&result) {
            *guard = None;
        }
        result
    }

    async fn exchange(
        &self,
        channel: &mut ArtChannel,
        mut request: Value,
        wait_for_event: Option<&str>,
    ) -> ServiceResult<Value> {
        let id = Uuid::new_v4().to_string();
        if let Some(fields) = request.as_object_mut() {
            fields.insert("id".to_string(), Value::String(id.clone()));
            fields.insert("request_id".to_string(), Value::String(id.clone()));
        }
        debug!(request = %request, "sending art request");

        channel
            .send(Message::Text(art_api::emit_envelope(&request).to_string()))
            .await?;

        self.wait_for(channel, Some(id.as_str()), wait_for_event).await
    }

    async fn wait_for(
        &self,
        channel: &mut ArtChannel,
        id: Option<&str>,
        event: Option<&str>,
    ) -> ServiceResult<Value> {
        let label = event.unwrap_or("art response").to_string();
        let closed = format!("while waiting for {label}");
        let wait = async move {
            while let Some(message) = channel.next().await {
                let Message::Text(text) = message? else {
                    continue;
                };
                if let ChannelMessage::Art(response) = art_api::parse_channel_message(&text)? {
                    art_api::check_error(&response)?;
                    if art_api::is_response_to(&response, id, event) {
                        return Ok(response);
                    }
                }
            }
            Err(ServiceError::ChannelClosed(closed))
        };

        tokio::time::timeout(self.timeout, wait)
            .await
            .map_err(|_| ServiceError::Timeout(label))?
    }

    async fn send_image(&self, data: Vec<u8>, options: UploadOptions) -> ServiceResult<String> {
        let file_type = match options.file_type.to_lowercase().as_str() {
            "jpeg" => "jpg".to_string(),
            other => other.to_string(),
        };
        let image_date = chrono::Local::now().format("%Y:%m:%d %H:%M:%S").to_string();
        let connection_id: u64 = rand::thread_rng().gen_range(0..4 * 1024 * 1024 * 1024);
        let transfer_id = Uuid::new_v4().to_string();

        let request = json!({
            "request": "send_image",
            "file_type": file_type,
            "conn_info": {
                "d2d_mode": "socket",
                "connection_id": connection_id,
                "id": transfer_id,
            },
            "image_date": image_date,
            "matte_id": options.matte,
            "portrait_matte_id": options.matte,
            "file_size": data.len(),
        });

        let mut guard = self.channel.lock().await;
        if guard.is_none() {
            *guard = Some(self.connect().await?);
        }
        let Some(channel) = guard.as_mut() else {
            return Err(ServiceError::ChannelClosed("not open".to_string()));
        };

        let result = async {
            let ready = self
                .exchange(channel, request, Some("ready_to_use"))
                .await?;
            let conn_info = art_api::parse_conn_info(&ready)?;
            let header = serde_json::to_vec(&UploadHeader::new(
                data.len(),
                &file_type,
                &conn_info.key,
            ))
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid upload header: {e}")))?;

            let stream = TcpStream::connect((conn_info.ip.as_str(), conn_info.port()?)).await?;
            if conn_info.secured {
                let connector = tokio_native_tls::TlsConnector::from(insecure_tls()?);
                let stream = connector.connect(&conn_info.ip, stream).await?;
                write_upload(stream, &header, &data).await?;
            } else {
                write_upload(stream, &header, &data).await?;
            }

            let added = self.wait_for(channel, None, Some("image_added")).await?;
            art_api::content_id(&added)
        }
        .await;

        if is_connection_failure(&result) {
            *guard = None;
        }
        result
    }
}

#[async_trait::async_trait]
impl ArtClient for SamsungTv {
    async fn supported(&self) -> ServiceResult<bool> {
        trace_call(PROVIDER, "supported", async {
            Ok::<_, ServiceError>(self.device_info().await?.supports_art_mode())
        })
        .await
    }

    async fn set_artmode(&self, on: bool) -> ServiceResult<()> {
        trace_call(PROVIDER, "set_artmode_status", async {
            let value = if on { "on" } else { "off" };
            self.art_request(
                json!({"request": "set_artmode_status", "value": value}),
                None,
            )
            .await?;
            Ok::<_, ServiceError>(())
        })
        .await
    }

    async fn upload(&self, data: Vec<u8>, options: UploadOptions) -> ServiceResult<String> {
        trace_call(PROVIDER, "send_image", self.send_image(data, options)).await
    }

    async fn available(&self) -> ServiceResult<Vec<ArtItem>> {
        trace_call(PROVIDER, "get_content_list", async {
            let response = self
                .art_request(
                    json!({"request": "get_content_list", "category": Value::Null}),
                    None,
                )
                .await?;
            art_api::parse_content_list(&response)
        })
        .await
    }

    async fn delete(&self, content_id: &str) -> ServiceResult<()> {
        trace_call(PROVIDER, "delete_image_list", async {
            self.art_request(
                json!({
                    "request": "delete_image_list",
                    "content_id_list": [{"content_id": content_id}],
                }),
                Some("image_deleted"),
            )
            .await?;
            Ok::<_, ServiceError>(())
        })
        .await
    }

    async fn get_current(&self) -> ServiceResult<CurrentArtwork> {
        trace_call(PROVIDER, "get_current_artwork", async {
            let response = self
                .art_request(json!({"request": "get_current_artwork"}), None)
                .await?;
            art_api::parse_current_artwork(response)
        })
        .await
    }

    async fn select_image(&self, content_id: &str) -> ServiceResult<()> {
        trace_call(PROVIDER, "select_image", async {
            self.art_request(
                json!({
                    "request": "select_image",
                    "category_id": Value::Null,
                    "content_id": content_id,
                    "show": true,
                }),
                None,
            )
            .await?;
            Ok::<_, ServiceError>(())
        })
        .await
    }
}

async fn wait_until_ready(channel: &mut ArtChannel) -> ServiceResult<()> {
    while let Some(message) = channel.next().await {
        let Message::Text(text) = message? else {
            continue;
        };
        match art_api::parse_channel_message(&text)? {
            ChannelMessage::Ready => return Ok(()),
            ChannelMessage::Connect { token: Some(token) } => {
                info!(token = %token, "TV issued a pairing token; set TV_TOKEN to reuse it");
            }
            ChannelMessage::Unauthorized => {
                return Err(ServiceError::Device(
                    "TV refused the connection; allow this client on the TV".to_string(),
                ));
            }
            _ => {}
        }
    }
    Err(ServiceError::ChannelClosed("during handshake".to_string()))
}

async fn write_upload<S>(mut stream: S, header: &[u8], data: &[u8]) -> ServiceResult<()>
where
    S: AsyncWrite + Unpin,
{
    let header_length = u32::try_from(header.len())
        .map_err(|_| ServiceError::InvalidInput("Upload header too large".to_string()))?;
    stream.write_all(&header_length.to_be_bytes()).await?;
    stream.write_all(header).await?;
    stream.write_all(data).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    Ok(())
}

fn insecure_tls() -> ServiceResult<native_tls::TlsConnector> {
    Ok(native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()?)
}

fn is_connection_failure<T>(result: &ServiceResult<T>) -> bool {
    matches!(
        result,
        Err(ServiceError::WebSocket(_) | ServiceError::Timeout(_) | ServiceError::ChannelClosed(_))
    )
}
