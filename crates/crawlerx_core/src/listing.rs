use crate::live::is_change_notice;
use crate::view_model::{JobRowView, ListBody, ListingView};
use crate::{
    ConnectionStatus, Effect, Job, JobFilter, LiveEvent, MountId, RequestFailure, StatusFilter,
};

/// Job list on the home page. Lives exactly as long as the home route is
/// mounted; everything here is dropped on unmount.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    mount: MountId,
    jobs: Vec<Job>,
    pending_fetches: u32,
    connection: ConnectionStatus,
    filter: JobFilter,
    last_failure: Option<RequestFailure>,
}

impl ListingState {
    pub(crate) fn new(mount: MountId) -> Self {
        Self {
            mount,
            jobs: Vec::new(),
            pending_fetches: 0,
            connection: ConnectionStatus::Connecting,
            filter: JobFilter::default(),
            last_failure: None,
        }
    }

    pub(crate) fn mount(&self) -> MountId {
        self.mount
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filter(&self) -> &JobFilter {
        &self.filter
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn last_failure(&self) -> Option<&RequestFailure> {
        self.last_failure.as_ref()
    }

    /// Every trigger goes through here. Concurrent fetches are not merged.
    pub(crate) fn begin_fetch(&mut self) -> Effect {
        self.pending_fetches += 1;
        Effect::FetchJobs { mount: self.mount }
    }

    /// Whichever response arrives last wins. A failure keeps what is shown.
    pub(crate) fn apply_fetched(&mut self, result: Result<Vec<Job>, RequestFailure>) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        match result {
            Ok(jobs) => {
                self.jobs = jobs;
                self.last_failure = None;
            }
            Err(failure) => self.last_failure = Some(failure),
        }
    }

    /// Returns the follow-up effects and whether anything visible changed.
    pub(crate) fn apply_live(&mut self, event: LiveEvent) -> (Vec<Effect>, bool) {
        let next = match event {
            LiveEvent::Opened => ConnectionStatus::Connected,
            LiveEvent::Closed => ConnectionStatus::Disconnected,
            LiveEvent::Error(_) => ConnectionStatus::Error,
            LiveEvent::Message(payload) => {
                if is_change_notice(&payload) {
                    return (vec![self.begin_fetch()], true);
                }
                return (Vec::new(), false);
            }
        };
        let changed = self.connection != next;
        self.connection = next;
        (Vec::new(), changed)
    }

    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.filter.query == query {
            return false;
        }
        self.filter.query = query;
        true
    }

    pub(crate) fn set_status_filter(&mut self, status: StatusFilter) -> bool {
        if self.filter.status == status {
            return false;
        }
        self.filter.status = status;
        true
    }

    pub(crate) fn clear_filters(&mut self) -> bool {
        if !self.filter.is_active() {
            return false;
        }
        self.filter = JobFilter::default();
        true
    }

    pub(crate) fn view(&self) -> ListingView {
        let visible = self.filter.apply(&self.jobs);
        let total = self.jobs.len();

        let summary = if self.filter.is_active() {
            let noun = if visible.len() == 1 { "job" } else { "jobs" };
            let mut text = format!("Found {} {} matching your filters", visible.len(), noun);
            if visible.len() != total {
                text.push_str(&format!(" (out of {total} total)"));
            }
            text
        } else {
            format!("Showing all {total} jobs")
        };

        let body = if self.pending_fetches > 0 && self.jobs.is_empty() {
            ListBody::Loading
        } else if self.jobs.is_empty() {
            ListBody::Empty
        } else if visible.is_empty() {
            ListBody::NoMatches
        } else {
            ListBody::Rows(visible.into_iter().map(JobRowView::from_job).collect())
        };

        ListingView {
            connection: self.connection,
            connection_label: self.connection.label(),
            refreshing: self.pending_fetches > 0,
            query: self.filter.query.clone(),
            status_filter: self.filter.status.clone(),
            can_clear_filters: self.filter.is_active(),
            summary,
            total,
            body,
        }
    }
}
