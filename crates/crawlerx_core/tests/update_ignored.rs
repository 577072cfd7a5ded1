mod common;

use crawlerx_core::{update, AppState, DetailTab, JobStatus, Msg, RequestFailure};

use common::{job, started_home};

#[test]
fn input_before_start_changes_nothing() {
    let state = AppState::new();
    for msg in [
        Msg::UrlInputChanged("https://example.com".into()),
        Msg::SubmitClicked,
        Msg::SearchChanged("abc".into()),
        Msg::RefreshClicked,
        Msg::TabSelected(DetailTab::Logs),
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}

#[test]
fn responses_for_unknown_mounts_are_dropped() {
    let (mut state, mount) = started_home();
    state.consume_dirty();

    let (next, effects) = update(
        state.clone(),
        Msg::JobsFetched {
            mount: mount + 100,
            result: Ok(vec![job("j1", "https://a.example", JobStatus::Done)]),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(
        state.clone(),
        Msg::JobFetched {
            mount,
            job_id: "j1".into(),
            result: Err(RequestFailure::Status(500)),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn detail_tabs_do_nothing_on_the_home_page() {
    let (mut state, _) = started_home();
    state.consume_dirty();
    let (next, effects) = update(state.clone(), Msg::TabSelected(DetailTab::Results));
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
