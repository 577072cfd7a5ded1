use crate::links::LinkRow;
use crate::view_model::{DetailView, JobDetailView, LogsView, OverviewView, ResultsView};
use crate::{Effect, Job, MountId, RequestFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Results,
    Logs,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Overview, DetailTab::Results, DetailTab::Logs];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Results => "Results",
            DetailTab::Logs => "Logs",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Loading,
    Failed(RequestFailure),
    NotFound,
    Loaded(Box<Job>),
}

/// Detail page for one job. Fetches once per id and never polls.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    mount: MountId,
    job_id: String,
    phase: Phase,
    tab: DetailTab,
}

impl DetailState {
    pub(crate) fn open(mount: MountId, job_id: String) -> (Self, Effect) {
        let effect = Effect::FetchJob {
            mount,
            job_id: job_id.clone(),
        };
        let state = Self {
            mount,
            job_id,
            phase: Phase::Loading,
            tab: DetailTab::default(),
        };
        (state, effect)
    }

    /// The id in the route changed while the page stayed up. The tab choice
    /// survives; the record does not.
    pub(crate) fn retarget(&mut self, mount: MountId, job_id: String) -> Effect {
        self.mount = mount;
        self.job_id = job_id;
        self.phase = Phase::Loading;
        Effect::FetchJob {
            mount,
            job_id: self.job_id.clone(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    /// Ignores responses for an earlier mount or another id.
    pub(crate) fn apply_fetched(
        &mut self,
        mount: MountId,
        job_id: &str,
        result: Result<Option<Job>, RequestFailure>,
    ) -> bool {
        if mount != self.mount || job_id != self.job_id {
            return false;
        }
        self.phase = match result {
            Ok(Some(job)) if job.is_usable() => Phase::Loaded(Box::new(job)),
            Ok(_) => Phase::NotFound,
            Err(failure) => Phase::Failed(failure),
        };
        true
    }

    pub(crate) fn select_tab(&mut self, tab: DetailTab) -> bool {
        if self.tab == tab {
            return false;
        }
        self.tab = tab;
        true
    }

    pub(crate) fn view(&self) -> DetailView {
        match &self.phase {
            Phase::Loading => DetailView::Loading,
            Phase::Failed(failure) => DetailView::Failed {
                message: format!("Failed to load job details: {failure}"),
            },
            Phase::NotFound => DetailView::NotFound,
            Phase::Loaded(job) => DetailView::Loaded(Box::new(loaded_view(job, self.tab))),
        }
    }
}

fn loaded_view(job: &Job, tab: DetailTab) -> JobDetailView {
    let overview = OverviewView {
        title: non_empty(job.title.as_deref()).unwrap_or("N/A").to_string(),
        link_count: job.links.len(),
        status_label: job.status.label().to_string(),
        description: non_empty(job.description.as_deref())
            .unwrap_or("No description available")
            .to_string(),
    };

    let results = if job.links.is_empty() {
        ResultsView::Empty {
            still_running: job.status == crate::JobStatus::Pending,
        }
    } else {
        ResultsView::Links(
            job.links
                .iter()
                .map(|link| LinkRow::new(&job.url, link))
                .collect(),
        )
    };

    let logs = LogsView {
        created_at: job.created_at.clone(),
        updated_at: job.updated_at.clone(),
        error: non_empty(job.error.as_deref()).map(ToOwned::to_owned),
        raw_record: job.raw_record(),
    };

    JobDetailView {
        id: job.id.clone(),
        url: job.url.clone(),
        status: job.status.clone(),
        created_at: job.created_at.clone(),
        tab,
        overview,
        results,
        logs,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
