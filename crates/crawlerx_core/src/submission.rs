use crate::view_model::{Notice, SubmissionView};
use crate::{Effect, JobSummary, MountId, RequestFailure};

/// URL form on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionState {
    mount: MountId,
    input: String,
    in_flight: bool,
    notice: Option<Notice>,
}

impl SubmissionState {
    pub(crate) fn new(mount: MountId) -> Self {
        Self {
            mount,
            input: String::new(),
            in_flight: false,
            notice: None,
        }
    }

    pub(crate) fn mount(&self) -> MountId {
        self.mount
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    /// The input box is read-only while a request is in flight.
    pub(crate) fn set_input(&mut self, text: String) -> bool {
        if self.in_flight || self.input == text {
            return false;
        }
        self.input = text;
        true
    }

    pub(crate) fn submit(&mut self) -> Option<Effect> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        self.notice = None;
        Some(Effect::CreateJob {
            mount: self.mount,
            url: self.input.trim().to_string(),
        })
    }

    pub(crate) fn finish(&mut self, result: &Result<JobSummary, RequestFailure>) {
        self.in_flight = false;
        match result {
            Ok(job) => {
                self.input.clear();
                self.notice = Some(Notice::Success(format!(
                    "Job submitted successfully! ID: {}",
                    job.short_id()
                )));
            }
            Err(failure) => {
                self.notice = Some(Notice::Error(format!("Error: {failure}")));
            }
        }
    }

    pub(crate) fn view(&self) -> SubmissionView {
        SubmissionView {
            input: self.input.clone(),
            input_enabled: !self.in_flight,
            submit_enabled: self.can_submit(),
            in_flight: self.in_flight,
            button_label: if self.in_flight {
                "Processing..."
            } else {
                "Start Crawling"
            },
            notice: self.notice.clone(),
        }
    }
}
