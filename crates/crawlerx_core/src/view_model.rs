use crate::links::LinkRow;
use crate::{ConnectionStatus, DetailTab, Job, JobStatus, StatusFilter, StatusTone};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub dark_mode: bool,
    pub page: PageView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageView {
    /// Nothing mounted yet.
    #[default]
    Blank,
    Home(HomeView),
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub submission: SubmissionView,
    pub listing: ListingView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionView {
    pub input: String,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub in_flight: bool,
    pub button_label: &'static str,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView {
    pub connection: ConnectionStatus,
    pub connection_label: &'static str,
    pub refreshing: bool,
    pub query: String,
    pub status_filter: StatusFilter,
    pub can_clear_filters: bool,
    pub summary: String,
    pub total: usize,
    pub body: ListBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// First fetch still running and nothing to show.
    Loading,
    /// The backend has no jobs.
    Empty,
    /// Jobs exist but the filter hides all of them.
    NoMatches,
    Rows(Vec<JobRowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: String,
    pub short_id: String,
    pub url: String,
    pub status: JobStatus,
    pub tone: StatusTone,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            short_id: job.short_id().to_string(),
            url: job.url.clone(),
            status: job.status.clone(),
            tone: job.status.tone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    Failed { message: String },
    NotFound,
    Loaded(Box<JobDetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailView {
    pub id: String,
    pub url: String,
    pub status: JobStatus,
    pub created_at: Option<String>,
    pub tab: DetailTab,
    pub overview: OverviewView,
    pub results: ResultsView,
    pub logs: LogsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewView {
    pub title: String,
    pub link_count: usize,
    pub status_label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Links(Vec<LinkRow>),
    /// No links; `still_running` adds the in-progress hint.
    Empty { still_running: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogsView {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub error: Option<String>,
    pub raw_record: String,
}
