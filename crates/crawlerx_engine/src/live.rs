use std::sync::mpsc;

use crawlerx_logging::{log_debug, log_info, log_warn};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{EngineEvent, FeedEvent, Ticket};

pub trait FeedSink: Send + Sync {
    fn emit(&self, event: FeedEvent);
}

/// Forwards feed events into the engine's event channel, tagged with the
/// ticket of the mount that opened the feed.
pub struct ChannelFeedSink {
    ticket: Ticket,
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelFeedSink {
    pub fn new(ticket: Ticket, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { ticket, tx }
    }
}

impl FeedSink for ChannelFeedSink {
    fn emit(&self, event: FeedEvent) {
        let _ = self.tx.send(EngineEvent::Feed {
            ticket: self.ticket,
            event,
        });
    }
}

/// Runs one live-update connection until the server closes it, a transport
/// error occurs, or `shutdown` fires.
///
/// Reports `Opened` once connected, every text frame as `Message`, then
/// exactly one of `Closed` or `Error`. Nothing is reported after a
/// shutdown. There is no reconnect.
pub async fn run_live_feed(url: Url, sink: &dyn FeedSink, shutdown: CancellationToken) {
    log_info!("Live feed connecting to {}", url);
    let connected = tokio::select! {
        _ = shutdown.cancelled() => return,
        result = connect_async(url.as_str()) => result,
    };
    let mut stream = match connected {
        Ok((stream, _response)) => stream,
        Err(err) => {
            log_warn!("Live feed connect to {} failed: {}", url, err);
            sink.emit(FeedEvent::Error(err.to_string()));
            return;
        }
    };
    log_info!("Live feed connected");
    sink.emit(FeedEvent::Opened);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                if let Err(err) = stream.close(None).await {
                    log_debug!("Live feed close handshake failed: {}", err);
                }
                log_info!("Live feed closed by client");
                return;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    sink.emit(FeedEvent::Message(text.as_str().to_owned()));
                }
                Some(Ok(Message::Close(_))) | None => {
                    log_info!("Live feed closed by server");
                    sink.emit(FeedEvent::Closed);
                    return;
                }
                Some(Ok(Message::Binary(bytes))) => {
                    log_debug!("Live feed ignoring {} byte binary frame", bytes.len());
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    log_warn!("Live feed transport error: {}", err);
                    sink.emit(FeedEvent::Error(err.to_string()));
                    return;
                }
            }
        }
    }
}
