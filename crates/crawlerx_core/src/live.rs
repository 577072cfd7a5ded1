use serde_json::Value;

/// State of the listing's live-update connection. Display only; nothing is
/// gated on it and a lost connection is never re-opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Error,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Live updates active",
            ConnectionStatus::Disconnected | ConnectionStatus::Error => "Disconnected",
        }
    }
}

/// What the live-update connection reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

/// True when a live-update payload announces a job change: a JSON object
/// carrying a truthy `id` and a truthy `status`. The values themselves are
/// not used.
pub fn is_change_notice(payload: &str) -> bool {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(payload) else {
        return false;
    };
    fields.get("id").is_some_and(is_truthy) && fields.get("status").is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
