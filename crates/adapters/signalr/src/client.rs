//! Hub client: connection setup and the per-connection task.

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use relaydash_app::ports::{ConnectionGuard, HubMessage, PushChannel, PushHub};
use relaydash_domain::error::RelayDashError;

use crate::config::HubConfig;
use crate::error::HubError;
use crate::negotiate::negotiate;
use crate::protocol::{self, HubFrame};

const CHANNEL_CAPACITY: usize = 64;

/// [`PushHub`] speaking the SignalR JSON protocol.
#[derive(Debug, Clone)]
pub struct SignalRHub {
    client: reqwest::Client,
    config: HubConfig,
}

impl SignalRHub {
    /// # Errors
    ///
    /// Returns [`HubError::Negotiate`] if the HTTP client cannot be built.
    pub fn new(config: HubConfig) -> Result<Self, HubError> {
        let client = reqwest::Client::builder()
            .timeout(config.handshake_timeout)
            .build()
            .map_err(|source| HubError::Negotiate {
                url: config.url.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    async fn open(&self) -> Result<PushChannel, HubError> {
        let url = negotiate(&self.client, &self.config.url).await?;
        tracing::debug!(host = url.host_str().unwrap_or_default(), "opening hub websocket");
        let (mut ws, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let pending = handshake(&mut ws).await?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(
            ws,
            pending,
            tx,
            shutdown_rx,
            self.config.keepalive,
            self.config.server_timeout,
        ));
        Ok(PushChannel {
            messages: rx,
            guard: ConnectionGuard::new(shutdown_tx, Some(task)),
        })
    }
}

impl PushHub for SignalRHub {
    async fn connect(&self) -> Result<PushChannel, RelayDashError> {
        let channel = tokio::time::timeout(self.config.handshake_timeout, self.open())
            .await
            .map_err(|_| HubError::HandshakeTimeout)??;
        tracing::info!(hub = %self.config.url, "push hub connected");
        Ok(channel)
    }
}

/// Send the protocol handshake and wait for the reply.
///
/// Returns any records that arrived in the same frame as the reply.
async fn handshake<S>(ws: &mut S) -> Result<Vec<String>, HubError>
where
    S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
{
    ws.send(Message::text(protocol::handshake_request())).await?;
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => {
                let mut records = protocol::split_records(text.as_str());
                let Some(reply) = records.next() else {
                    continue;
                };
                if let Some(reason) = protocol::parse_handshake(reply)? {
                    return Err(HubError::HandshakeRejected(reason));
                }
                return Ok(records.map(str::to_string).collect());
            }
            Some(Ok(Message::Close(_))) | None => return Err(HubError::HandshakeInterrupted),
            Some(Ok(_)) => {}
            Some(Err(err)) => return Err(err.into()),
        }
    }
}

enum Flow {
    Continue,
    /// The hub closed the connection, with its error if any.
    Closed(Option<String>),
    /// Nobody listens any more.
    Detached,
}

async fn deliver(messages: &mpsc::Sender<HubMessage>, frame: &str) -> Flow {
    for record in protocol::split_records(frame) {
        match protocol::parse_record(record) {
            Ok(HubFrame::Invocation { target, arguments }) => {
                if messages
                    .send(HubMessage::Invocation { target, arguments })
                    .await
                    .is_err()
                {
                    return Flow::Detached;
                }
            }
            Ok(HubFrame::Ping) => {}
            Ok(HubFrame::Close { error }) => return Flow::Closed(error),
            Ok(HubFrame::Other(kind)) => tracing::debug!(kind, "ignoring hub message"),
            Err(err) => tracing::warn!(error = %err, "dropping unreadable hub record"),
        }
    }
    Flow::Continue
}

fn close_reason(frame: Option<&CloseFrame>) -> Option<String> {
    match frame {
        Some(frame) if frame.code != CloseCode::Normal => Some(format!(
            "websocket closed with code {}: {}",
            u16::from(frame.code),
            frame.reason.as_str()
        )),
        _ => None,
    }
}

async fn run<S>(
    ws: S,
    pending: Vec<String>,
    messages: mpsc::Sender<HubMessage>,
    mut shutdown: oneshot::Receiver<()>,
    keepalive: Duration,
    server_timeout: Duration,
) where
    S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Send + Unpin,
{
    let (mut sink, mut stream) = ws.split();

    for frame in &pending {
        match deliver(&messages, frame).await {
            Flow::Continue => {}
            Flow::Closed(error) => {
                let _ = messages.send(HubMessage::Closed { error }).await;
                return;
            }
            Flow::Detached => return,
        }
    }

    let mut ping = tokio::time::interval_at(Instant::now() + keepalive, keepalive);
    let silence = tokio::time::sleep(server_timeout);
    tokio::pin!(silence);

    let error = loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("closing push connection");
                let _ = sink.send(Message::text(protocol::close())).await;
                let _ = sink.close().await;
                return;
            }
            _ = ping.tick() => {
                if let Err(err) = sink.send(Message::text(protocol::ping())).await {
                    break Some(format!("keep-alive failed: {err}"));
                }
            }
            () = &mut silence => {
                break Some(format!("no message from hub in {}s", server_timeout.as_secs_f32()));
            }
            frame = stream.next() => {
                silence.as_mut().reset(Instant::now() + server_timeout);
                let flow = match frame {
                    Some(Ok(Message::Text(text))) => deliver(&messages, text.as_str()).await,
                    Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => deliver(&messages, text).await,
                        Err(_) => Flow::Continue,
                    },
                    Some(Ok(Message::Close(frame))) => Flow::Closed(close_reason(frame.as_ref())),
                    Some(Ok(_)) => Flow::Continue,
                    Some(Err(err)) => Flow::Closed(Some(err.to_string())),
                    None => Flow::Closed(Some("connection reset".to_string())),
                };
                match flow {
                    Flow::Continue => {}
                    Flow::Closed(error) => break error,
                    Flow::Detached => return,
                }
            }
        }
    };

    match &error {
        Some(reason) => tracing::warn!(%reason, "push connection lost"),
        None => tracing::info!("push connection closed by hub"),
    }
    let _ = sink.close().await;
    let _ = messages.send(HubMessage::Closed { error }).await;
}
