mod common;

use common::{init_logging, job, started_home};
use crawlerx_core::{
    update, AppState, DetailTab, DetailView, Effect, ExportFormat, Job, JobDetailView, JobStatus,
    LinkKind, Msg, PageView, RequestFailure, ResultsView, Route,
};

fn open_detail(id: &str) -> (AppState, u64) {
    let (state, _) = started_home();
    let (state, effects) = update(state, Msg::Navigate(Route::Job(id.to_string())));
    let mount = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchJob { mount, job_id } if job_id == id => Some(*mount),
            _ => None,
        })
        .expect("fetch job effect");
    (state, mount)
}

fn detail(state: &AppState) -> DetailView {
    match state.view().page {
        PageView::Detail(detail) => detail,
        other => panic!("expected detail page, got {other:?}"),
    }
}

fn loaded(state: &AppState) -> JobDetailView {
    match detail(state) {
        DetailView::Loaded(view) => *view,
        other => panic!("expected loaded detail, got {other:?}"),
    }
}

fn deliver(state: AppState, mount: u64, id: &str, result: Result<Option<Job>, RequestFailure>) -> AppState {
    update(
        state,
        Msg::JobFetched {
            mount,
            job_id: id.to_string(),
            result,
        },
    )
    .0
}

#[test]
fn starts_loading_on_overview() {
    init_logging();
    let (state, _) = open_detail("abc");
    assert_eq!(detail(&state), DetailView::Loading);
    assert_eq!(state.detail().map(|d| d.tab()), Some(DetailTab::Overview));
}

#[test]
fn fetch_error_shows_status_or_transport_message() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let state = deliver(state, mount, "abc", Err(RequestFailure::Status(404)));
    assert_eq!(
        detail(&state),
        DetailView::Failed {
            message: "Failed to load job details: 404".to_string()
        }
    );

    let (state, mount) = open_detail("abc");
    let state = deliver(
        state,
        mount,
        "abc",
        Err(RequestFailure::Transport("timed out".into())),
    );
    assert_eq!(
        detail(&state),
        DetailView::Failed {
            message: "Failed to load job details: timed out".to_string()
        }
    );
}

#[test]
fn empty_record_is_not_found() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let state = deliver(state.clone(), mount, "abc", Ok(None));
    assert_eq!(detail(&state), DetailView::NotFound);

    let (state, mount) = open_detail("abc");
    let state = deliver(state, mount, "abc", Ok(Some(Job::default())));
    assert_eq!(detail(&state), DetailView::NotFound);
}

#[test]
fn overview_uses_fallbacks() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let mut record = job("abc", "https://example.com", JobStatus::Pending);
    record.title = Some(String::new());
    let state = deliver(state, mount, "abc", Ok(Some(record)));

    let view = loaded(&state);
    assert_eq!(view.overview.title, "N/A");
    assert_eq!(view.overview.link_count, 0);
    assert_eq!(view.overview.status_label, "pending");
    assert_eq!(view.overview.description, "No description available");
}

#[test]
fn overview_shows_completed_fields() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let mut record = job("abc", "https://example.com", JobStatus::Done);
    record.title = Some("Example Domain".into());
    record.description = Some("An example".into());
    record.links = vec!["/a".into(), "https://b.test".into()];
    let state = deliver(state, mount, "abc", Ok(Some(record)));

    let view = loaded(&state);
    assert_eq!(view.overview.title, "Example Domain");
    assert_eq!(view.overview.link_count, 2);
    assert_eq!(view.overview.description, "An example");
}

#[test]
fn pending_job_without_links_gets_progress_hint() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let state = deliver(
        state,
        mount,
        "abc",
        Ok(Some(job("abc", "https://example.com", JobStatus::Pending))),
    );
    assert_eq!(
        loaded(&state).results,
        ResultsView::Empty {
            still_running: true
        }
    );

    let (state, mount) = open_detail("abc");
    let state = deliver(
        state,
        mount,
        "abc",
        Ok(Some(job("abc", "https://example.com", JobStatus::Done))),
    );
    assert_eq!(
        loaded(&state).results,
        ResultsView::Empty {
            still_running: false
        }
    );
}

#[test]
fn results_classify_and_resolve_links() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let mut record = job("abc", "https://example.com/blog/post", JobStatus::Done);
    record.links = vec!["/about".into(), "https://other.test/page".into()];
    let state = deliver(state, mount, "abc", Ok(Some(record)));

    let ResultsView::Links(rows) = loaded(&state).results else {
        panic!("expected link rows");
    };
    assert_eq!(rows[0].kind, LinkKind::Internal);
    assert_eq!(rows[0].target, "https://example.com/about");
    assert_eq!(rows[0].display, "/about");
    assert_eq!(rows[1].kind, LinkKind::External);
    assert_eq!(rows[1].target, "https://other.test/page");
}

#[test]
fn logs_show_timestamps_error_and_raw_record() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let mut record = job("abc", "https://example.com", JobStatus::Failed);
    record.error = Some("dns lookup failed".into());
    record.created_at = Some("2025-03-01T10:00:00Z".into());
    record.updated_at = Some("2025-03-01T10:00:05Z".into());
    let state = deliver(state, mount, "abc", Ok(Some(record)));

    let logs = loaded(&state).logs;
    assert_eq!(logs.error.as_deref(), Some("dns lookup failed"));
    assert_eq!(logs.created_at.as_deref(), Some("2025-03-01T10:00:00Z"));
    assert_eq!(logs.updated_at.as_deref(), Some("2025-03-01T10:00:05Z"));
    assert!(logs.raw_record.contains("\"Error\": \"dns lookup failed\""));
    assert!(logs.raw_record.contains("\"ID\": \"abc\""));
}

#[test]
fn raw_data_shows_the_record_as_the_backend_sent_it() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let record: Job = serde_json::from_str(
        r#"{"id":"abc","url":"https://example.com","status":"failed","error":null,"links":null}"#,
    )
    .expect("decode");
    let state = deliver(state, mount, "abc", Ok(Some(record)));

    let raw = loaded(&state).logs.raw_record;
    assert!(raw.contains("\"error\": null"));
    assert!(raw.contains("\"links\": null"));
    assert!(!raw.contains("\"ID\""));
}

#[test]
fn tabs_switch_without_refetching() {
    init_logging();
    let (state, mount) = open_detail("abc");
    let state = deliver(
        state,
        mount,
        "abc",
        Ok(Some(job("abc", "https://example.com", JobStatus::Done))),
    );
    let (state, effects) = update(state, Msg::TabSelected(DetailTab::Results));
    assert!(effects.is_empty());
    assert_eq!(loaded(&state).tab, DetailTab::Results);
    let (state, _) = update(state, Msg::TabSelected(DetailTab::Logs));
    assert_eq!(loaded(&state).tab, DetailTab::Logs);
}

#[test]
fn changing_id_while_mounted_refetches_and_drops_stale_answers() {
    init_logging();
    let (state, first) = open_detail("one");
    let (state, _) = update(state, Msg::TabSelected(DetailTab::Logs));
    let (state, effects) = update(state, Msg::Navigate(Route::Job("two".into())));
    let second = match effects.as_slice() {
        [Effect::FetchJob { mount, job_id }] if job_id == "two" => *mount,
        other => panic!("expected a single refetch, got {other:?}"),
    };
    assert_ne!(first, second);
    assert_eq!(state.detail().map(|d| d.tab()), Some(DetailTab::Logs));

    let state = deliver(
        state,
        first,
        "one",
        Ok(Some(job("one", "https://one.test", JobStatus::Done))),
    );
    assert_eq!(detail(&state), DetailView::Loading);

    let state = deliver(
        state,
        second,
        "two",
        Ok(Some(job("two", "https://two.test", JobStatus::Done))),
    );
    assert_eq!(loaded(&state).id, "two");
}

#[test]
fn exports_and_links_become_effects() {
    init_logging();
    let (state, _) = open_detail("abc");
    let (state, effects) = update(
        state,
        Msg::ExportRequested {
            job_id: "abc".into(),
            format: ExportFormat::Csv,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::OpenExport {
            job_id: "abc".into(),
            format: ExportFormat::Csv,
        }]
    );
    let (_, effects) = update(state, Msg::OpenUrl("https://example.com/about".into()));
    assert_eq!(
        effects,
        vec![Effect::OpenUrl {
            url: "https://example.com/about".into()
        }]
    );
}
