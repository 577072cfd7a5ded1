#![allow(dead_code)]

use std::sync::Once;

use crawlerx_core::{update, AppState, Effect, Job, JobStatus, JobSummary, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(crawlerx_logging::initialize_for_tests);
}

pub fn job(id: &str, url: &str, status: JobStatus) -> Job {
    Job {
        id: id.to_string(),
        url: url.to_string(),
        status,
        ..Job::default()
    }
}

pub fn summary(id: &str) -> JobSummary {
    JobSummary {
        id: id.to_string(),
        ..JobSummary::default()
    }
}

/// Boots the app on the home page and returns the listing's mount id.
pub fn started_home() -> (AppState, u64) {
    let (state, effects) = update(AppState::new(), Msg::Started);
    let mount = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchJobs { mount } => Some(*mount),
            _ => None,
        })
        .expect("fetch effect on mount");
    (state, mount)
}

pub fn fetch_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::FetchJobs { .. }))
        .count()
}
