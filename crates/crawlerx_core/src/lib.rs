//! CrawlerX core: pure dashboard state machine, job model and view-model helpers.
pub mod bus;
mod detail;
mod effect;
mod failure;
mod filter;
mod job;
pub mod links;
mod listing;
mod live;
mod msg;
mod route;
mod state;
mod submission;
mod update;
mod view_model;

pub use bus::{JobSubmitted, NotificationBus, SubscriptionId};
pub use detail::{DetailState, DetailTab};
pub use effect::{Effect, ExportFormat};
pub use failure::RequestFailure;
pub use filter::{JobFilter, StatusFilter};
pub use job::{short_id, Job, JobStatus, JobSummary, StatusTone, SHORT_ID_LEN};
pub use links::{classify_link, resolve_link, LinkKind, LinkRow};
pub use listing::ListingState;
pub use live::{is_change_notice, ConnectionStatus, LiveEvent};
pub use msg::Msg;
pub use route::Route;
pub use state::{AppState, MountId, MAX_HISTORY};
pub use submission::SubmissionState;
pub use update::update;
pub use view_model::{
    AppViewModel, DetailView, HomeView, JobDetailView, JobRowView, ListBody, ListingView,
    LogsView, Notice, OverviewView, PageView, ResultsView, SubmissionView,
};
