use std::fmt;

/// Why a backend request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The backend answered with an error status.
    Status(u16),
    /// No response: connection, DNS, timeout or an undecodable body.
    Transport(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Status(code) => write!(f, "{code}"),
            RequestFailure::Transport(message) => f.write_str(message),
        }
    }
}
