use std::time::Duration;

use crawlerx_core::ExportFormat;
use crawlerx_engine::{ApiSettings, EngineEvent, EngineHandle, FailureKind, FeedEvent};
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    let engine = engine.clone();
    tokio::task::spawn_blocking(move || engine.recv_timeout(Duration::from_secs(5)))
        .await
        .expect("receiver task")
        .expect("engine event in time")
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_echo_their_ticket() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": "j1", "URL": "https://a.example", "Status": "pending" }
        ])))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiSettings::with_base_url(server.uri())).expect("engine");
    engine.list_jobs(42);

    match next_event(&engine).await {
        EngineEvent::JobsListed { ticket, result } => {
            assert_eq!(ticket, 42);
            let jobs = result.expect("jobs");
            assert_eq!(jobs.len(), 1);
            assert_eq!(jobs[0].id, "j1");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn get_job_carries_requested_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/j9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "j9", "URL": "https://a.example", "Status": "done"
        })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiSettings::with_base_url(server.uri())).expect("engine");
    engine.get_job(3, "j9");

    match next_event(&engine).await {
        EngineEvent::JobLoaded {
            ticket,
            job_id,
            result,
        } => {
            assert_eq!(ticket, 3);
            assert_eq!(job_id, "j9");
            assert_eq!(result.expect("loaded").map(|job| job.id), Some("j9".to_string()));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_failure_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ApiSettings::with_base_url(server.uri())).expect("engine");
    engine.create_job(1, "https://example.com");

    match next_event(&engine).await {
        EngineEvent::JobCreated { ticket, result } => {
            assert_eq!(ticket, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(400));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_the_feed_replaces_the_old_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move {
        // First connection: wait for the client to hang up.
        let (stream, _) = listener.accept().await.expect("accept first");
        let mut first = accept_async(stream).await.expect("first handshake");
        while let Some(Ok(frame)) = first.next().await {
            if frame.is_close() {
                break;
            }
        }
        // Second connection: push one notice.
        let (stream, _) = listener.accept().await.expect("accept second");
        let mut second = accept_async(stream).await.expect("second handshake");
        second
            .send(Message::Text(r#"{"id":"j1","status":"done"}"#.into()))
            .await
            .expect("send");
        while let Some(Ok(frame)) = second.next().await {
            if frame.is_close() {
                break;
            }
        }
    });

    let engine =
        EngineHandle::new(ApiSettings::with_base_url(format!("http://{addr}"))).expect("engine");
    engine.open_feed(1);
    assert_eq!(
        next_event(&engine).await,
        EngineEvent::Feed {
            ticket: 1,
            event: FeedEvent::Opened
        }
    );

    engine.open_feed(2);
    assert_eq!(
        next_event(&engine).await,
        EngineEvent::Feed {
            ticket: 2,
            event: FeedEvent::Opened
        }
    );
    assert_eq!(
        next_event(&engine).await,
        EngineEvent::Feed {
            ticket: 2,
            event: FeedEvent::Message(r#"{"id":"j1","status":"done"}"#.to_string())
        }
    );

    // A stale close for the replaced feed leaves the live one alone.
    engine.close_feed(1);
    engine.close_feed(2);
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server sees close")
        .expect("server task");
    assert_eq!(engine.try_recv(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_feed_reports_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let engine =
        EngineHandle::new(ApiSettings::with_base_url(format!("http://{addr}"))).expect("engine");
    engine.open_feed(7);

    match next_event(&engine).await {
        EngineEvent::Feed {
            ticket: 7,
            event: FeedEvent::Error(_),
        } => {}
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn export_url_points_at_backend() {
    let engine = EngineHandle::new(ApiSettings::with_base_url("http://localhost:8080"))
        .expect("engine");
    assert_eq!(
        engine.export_url("abc", ExportFormat::Json).expect("url").as_str(),
        "http://localhost:8080/api/v1/jobs/export/abc?format=json"
    );
}
