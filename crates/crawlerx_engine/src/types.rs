use std::fmt;

use crawlerx_core::{Job, JobSummary};
use thiserror::Error;

/// Opaque tag echoed back on every event produced for a command. The app
/// passes its mount id here.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

/// Activity on the live-update WebSocket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    JobCreated {
        ticket: Ticket,
        result: Result<JobSummary, ApiError>,
    },
    JobsListed {
        ticket: Ticket,
        result: Result<Vec<Job>, ApiError>,
    },
    JobLoaded {
        ticket: Ticket,
        job_id: String,
        result: Result<Option<Job>, ApiError>,
    },
    Feed {
        ticket: Ticket,
        event: FeedEvent,
    },
}
