use crate::{JobSummary, MountId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CreateJob { mount: MountId, url: String },
    PublishJobSubmitted { job: JobSummary },
    FetchJobs { mount: MountId },
    OpenLiveFeed { mount: MountId },
    CloseLiveFeed { mount: MountId },
    SubscribeJobSubmitted { mount: MountId },
    UnsubscribeJobSubmitted { mount: MountId },
    FetchJob { mount: MountId, job_id: String },
    OpenExport { job_id: String, format: ExportFormat },
    OpenUrl { url: String },
}

/// Download formats offered by the backend export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}
