use std::time::Duration;

use crawlerx_engine::{run_live_feed, FeedEvent, FeedSink};
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use url::Url;

struct TestSink {
    tx: mpsc::UnboundedSender<FeedEvent>,
}

impl FeedSink for TestSink {
    fn emit(&self, event: FeedEvent) {
        let _ = self.tx.send(event);
    }
}

fn sink() -> (TestSink, mpsc::UnboundedReceiver<FeedEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TestSink { tx }, rx)
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<FeedEvent>) -> FeedEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event in time")
        .expect("sink open")
}

async fn listener() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let url = Url::parse(&format!("ws://{addr}/api/v1/ws")).expect("ws url");
    (listener, url)
}

#[tokio::test]
async fn forwards_text_frames_then_reports_server_close() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        ws.send(Message::Text(r#"{"id":"j1","status":"done"}"#.into()))
            .await
            .expect("send text");
        ws.send(Message::Binary(vec![1u8, 2, 3].into()))
            .await
            .expect("send binary");
        ws.send(Message::Text("second".into())).await.expect("send text");
        ws.close(None).await.expect("close");
    });

    let (sink, mut rx) = sink();
    run_live_feed(url, &sink, CancellationToken::new()).await;
    server.await.expect("server task");

    assert_eq!(next_event(&mut rx).await, FeedEvent::Opened);
    assert_eq!(
        next_event(&mut rx).await,
        FeedEvent::Message(r#"{"id":"j1","status":"done"}"#.to_string())
    );
    assert_eq!(next_event(&mut rx).await, FeedEvent::Message("second".to_string()));
    assert_eq!(next_event(&mut rx).await, FeedEvent::Closed);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn cancellation_closes_quietly() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        // Hold the connection until the client leaves.
        while let Some(Ok(frame)) = ws.next().await {
            if frame.is_close() {
                break;
            }
        }
    });

    let (sink, mut rx) = sink();
    let token = CancellationToken::new();
    let feed = {
        let token = token.clone();
        tokio::spawn(async move { run_live_feed(url, &sink, token).await })
    };

    assert_eq!(next_event(&mut rx).await, FeedEvent::Opened);
    token.cancel();
    tokio::time::timeout(Duration::from_secs(5), feed)
        .await
        .expect("feed stops")
        .expect("feed task");
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server sees close")
        .expect("server task");

    assert!(rx.recv().await.is_none(), "no events after cancellation");
}

#[tokio::test]
async fn refused_connection_reports_error() {
    let (listener, url) = listener().await;
    drop(listener);

    let (sink, mut rx) = sink();
    run_live_feed(url, &sink, CancellationToken::new()).await;

    assert!(matches!(next_event(&mut rx).await, FeedEvent::Error(_)));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn cancelled_before_connect_reports_nothing() {
    let (_listener, url) = listener().await;
    let token = CancellationToken::new();
    token.cancel();

    let (sink, mut rx) = sink();
    run_live_feed(url, &sink, token).await;
    drop(sink);

    assert!(rx.recv().await.is_none());
}
