#![allow(dead_code)]

use axum::Router;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::tungstenite::Message;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// An axum router served on an ephemeral local port.
pub struct StubServer {
    url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(router: Router) -> Result<Self, BoxedError> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Self {
            url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn port(&self) -> u16 {
        self.url
            .rsplit(':')
            .next()
            .and_then(|port| port.parse().ok())
            .unwrap_or_default()
    }

    pub async fn stop(mut self) -> Result<(), BoxedError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .map_err(|err| format!("Failed to join stub server task: {err}"))?;
        Ok(())
    }
}

type Responder = Arc<dyn Fn(&Value) -> Vec<Value> + Send + Sync>;

/// A plain `ws://` stand-in for the TV's art channel. Every art request is
/// recorded and answered with the payloads `responder` returns for it.
pub struct StubArtChannel {
    pub port: u16,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl StubArtChannel {
    pub async fn start(
        responder: impl Fn(&Value) -> Vec<Value> + Send + Sync + 'static,
    ) -> Result<Self, BoxedError> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Responder = Arc::new(responder);

        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let Ok(socket) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };
                serve_art_channel(socket, recorded.clone(), responder.clone()).await;
            }
        });

        Ok(Self {
            port,
            requests,
            handle,
        })
    }

    /// The decoded art requests received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().expect("requests poisoned").clone()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

async fn serve_art_channel(
    mut socket: tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    requests: Arc<Mutex<Vec<Value>>>,
    responder: Responder,
) {
    let handshake = [
        json!({"event": "ms.channel.connect", "data": {"id": "client", "token": "12345"}}),
        json!({"event": "ms.channel.ready", "data": {}}),
    ];
    for event in handshake {
        if socket.send(Message::Text(event.to_string())).await.is_err() {
            return;
        }
    }

    while let Some(Ok(message)) = socket.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        let Ok(envelope) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        let Some(request) = envelope["params"]["data"]
            .as_str()
            .and_then(|data| serde_json::from_str::<Value>(data).ok())
        else {
            continue;
        };

        requests.lock().expect("requests poisoned").push(request.clone());

        for mut payload in responder(&request) {
            if payload.get("id").is_none() {
                if let Some(fields) = payload.as_object_mut() {
                    fields.insert("id".to_string(), request["id"].clone());
                }
            }
            let event = json!({
                "event": "d2d_service_message",
                "data": payload.to_string(),
            });
            if socket.send(Message::Text(event.to_string())).await.is_err() {
                return;
            }
        }
    }
}
