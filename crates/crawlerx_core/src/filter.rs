use crate::{Job, JobStatus};

/// Status restriction applied to the job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    /// The choices offered by the status dropdown, in display order.
    pub fn choices() -> [StatusFilter; 4] {
        [
            StatusFilter::All,
            StatusFilter::Only(JobStatus::Done),
            StatusFilter::Only(JobStatus::Pending),
            StatusFilter::Only(JobStatus::Failed),
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All Statuses",
            StatusFilter::Only(JobStatus::Done) => "Completed",
            StatusFilter::Only(JobStatus::Pending) => "Pending",
            StatusFilter::Only(JobStatus::Failed) => "Failed",
            StatusFilter::Only(other) => other.label(),
        }
    }

    pub fn admits(&self, status: &JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Search text plus status restriction. Purely derived; never touches the
/// collection it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl JobFilter {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.status != StatusFilter::All
    }

    pub fn matches(&self, job: &Job) -> bool {
        self.matches_query(job) && self.status.admits(&job.status)
    }

    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }

    fn matches_query(&self, job: &Job) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        job.url.to_lowercase().contains(&needle) || job.id.to_lowercase().contains(&needle)
    }
}
