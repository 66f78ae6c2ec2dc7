use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::time::{sleep, Duration};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::api::gateway::AdminApi;
use crate::api::types::Notification;
use crate::core::AppError;
use crate::notify::store::NotificationStore;

/// Websocket listener for pushed notification events.
///
/// Responsibilities:
/// - Connect to the backend's push endpoint with the bearer token
/// - Fetch the full notification history once per (re)connect
/// - Append pushed events to the shared `NotificationStore`
/// - Reconnect with backoff on disconnect/error
///
/// Reconnect ownership sits here, not with callers: `spawn` keeps the
/// bridge alive for the life of the process.
#[derive(Clone)]
pub struct NotificationBridge<A: AdminApi + ?Sized + 'static> {
    ws_url: String,
    bearer: String,
    api: Arc<A>,
    store: Arc<NotificationStore>,
}

impl<A: AdminApi + ?Sized + 'static> NotificationBridge<A> {
    pub fn new(
        ws_url: impl Into<String>,
        bearer: impl Into<String>,
        api: Arc<A>,
        store: Arc<NotificationStore>,
    ) -> Self {
        Self {
            ws_url: ws_url.into(),
            bearer: bearer.into(),
            api,
            store,
        }
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run_forever().await {
                warn!(error = %e, "notification bridge exited");
            }
        })
    }

    async fn run_forever(&self) -> Result<(), AppError> {
        let mut backoff = Duration::from_millis(250);
        let max_backoff = Duration::from_secs(30);

        loop {
            match self.run_once().await {
                Ok(()) => {
                    // A clean close still reconnects (server drops idle connections).
                    backoff = Duration::from_millis(250);
                }
                Err(e) => {
                    warn!(error = %e, sleep_ms = backoff.as_millis() as u64, "notification socket error; reconnecting");
                    sleep(backoff).await;
                    backoff = (backoff * 2).min(max_backoff);
                }
            }
        }
    }

    async fn run_once(&self) -> Result<(), AppError> {
        let url = format!(
            "{}?token={}",
            self.ws_url,
            urlencoding::encode(&self.bearer)
        );

        info!(url = %self.ws_url, "connecting notification websocket");
        let mut req = url
            .into_client_request()
            .map_err(|e| AppError::Ws(format!("request build failed: {e}")))?;

        let auth = format!("Bearer {}", self.bearer);
        req.headers_mut().insert(
            "Authorization",
            HeaderValue::from_str(&auth)
                .map_err(|e| AppError::Ws(format!("bad bearer token: {e}")))?,
        );
        req.headers_mut().insert(
            "User-Agent",
            HeaderValue::from_static("stockpick-admin-rust/0.1"),
        );

        let (ws_stream, resp) = tokio_tungstenite::connect_async(req)
            .await
            .map_err(|e| AppError::Ws(format!("connect failed: {e}")))?;

        info!(status = %resp.status(), "notification websocket connected");

        // Full history once per connect; pushes missed while offline are
        // picked up here.
        let history = self.api.notifications().await?;
        info!(count = history.len(), "notification history loaded");
        self.store.replace_all(history);

        let (mut write, mut read) = ws_stream.split();

        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(txt)) => match serde_json::from_str::<Notification>(&txt) {
                    Ok(notification) => {
                        debug!(
                            id = %notification.id,
                            category = ?notification.category,
                            action = ?notification.action,
                            "notification received"
                        );
                        self.store.push(notification);
                    }
                    Err(e) => {
                        // Control frames and unknown shapes are not fatal.
                        debug!(error = %e, frame = %txt, "unparsed notification frame");
                    }
                },
                Ok(Message::Ping(p)) => {
                    write
                        .send(Message::Pong(p))
                        .await
                        .map_err(|e| AppError::Ws(format!("pong send failed: {e}")))?;
                }
                Ok(Message::Pong(_)) => {}
                Ok(Message::Close(frame)) => {
                    info!(close = ?frame, "notification websocket closed");
                    return Ok(());
                }
                Err(e) => {
                    return Err(AppError::Ws(format!("read error: {e}")));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
