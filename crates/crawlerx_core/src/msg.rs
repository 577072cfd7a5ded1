use crate::{
    DetailTab, ExportFormat, Job, JobSummary, LiveEvent, MountId, RequestFailure, Route,
    StatusFilter,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The window is up; mount the initial route.
    Started,
    /// User followed a link to another page.
    Navigate(Route),
    /// User pressed a back control.
    NavigateBack,
    ThemeToggled,
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User clicked the submit button.
    SubmitClicked,
    /// User pressed Enter in the URL input box.
    UrlInputEnter,
    /// Backend answered a create-job request.
    JobCreated {
        mount: MountId,
        result: Result<JobSummary, RequestFailure>,
    },
    SearchChanged(String),
    StatusFilterChanged(StatusFilter),
    ClearFilters,
    RefreshClicked,
    /// Backend answered a list request.
    JobsFetched {
        mount: MountId,
        result: Result<Vec<Job>, RequestFailure>,
    },
    /// Live-update connection activity.
    LiveFeed { mount: MountId, event: LiveEvent },
    /// A job-submitted notification reached the listing's subscription.
    JobSubmittedNotice { mount: MountId, job: JobSummary },
    /// Backend answered a single-job request. `Ok(None)` means the response
    /// carried no record.
    JobFetched {
        mount: MountId,
        job_id: String,
        result: Result<Option<Job>, RequestFailure>,
    },
    TabSelected(DetailTab),
    ExportRequested { job_id: String, format: ExportFormat },
    OpenUrl(String),
}
