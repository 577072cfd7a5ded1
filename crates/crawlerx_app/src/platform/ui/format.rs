use chrono::{DateTime, Local};

const MISSING: &str = "N/A";

/// Renders a backend RFC 3339 timestamp in local time.
pub fn timestamp(raw: Option<&str>) -> String {
    raw.and_then(|text| DateTime::parse_from_rfc3339(text.trim()).ok())
        .map(|moment| {
            moment
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| MISSING.to_string())
}
