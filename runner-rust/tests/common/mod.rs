#![allow(dead_code)]

use axum::{body::Body, http::StatusCode, routing::get, Router};
use frame_art_sdk::ArtItem;
use futures::{stream, StreamExt};
use std::{io, time::Duration};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nframe-art-test-image";

/// Image downloads served on an ephemeral local port:
/// `/image.png` returns `PNG_BYTES`, `/missing.png` a 404 and
/// `/truncated.png` a few bytes before the body fails.
pub struct StubServer {
    url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn images() -> Result<Self, BoxedError> {
        let router = Router::new()
            .route("/image.png", get(|| async { PNG_BYTES }))
            .route(
                "/missing.png",
                get(|| async { (StatusCode::NOT_FOUND, "expired") }),
            )
            .route("/truncated.png", get(|| async { truncated_body() }));

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

fn truncated_body() -> Body {
    let head = stream::once(async { Ok::<_, io::Error>(b"\x89PNG half".to_vec()) });
    let reset = stream::once(async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Err(io::Error::other("connection reset"))
    });
    Body::from_stream(head.chain(reset))
}

/// Two script-owned entries and two the user put there.
pub fn mixed_art() -> Vec<ArtItem> {
    vec![
        ArtItem::new("SAM-S0700").with_title("Store art"),
        ArtItem::new("MY001"),
        ArtItem::new("USER-photo"),
        ArtItem::new("MY002"),
    ]
}
