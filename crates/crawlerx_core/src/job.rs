use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Number of id characters shown in compact displays.
pub const SHORT_ID_LEN: usize = 8;

/// Crawl status as reported by the backend.
///
/// The set is open: anything the client does not recognise is kept verbatim
/// in `Other` and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Done,
    Failed,
    Other(String),
}

/// Badge colouring for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Failure,
    InProgress,
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "done" => JobStatus::Done,
            "failed" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        !matches!(self, JobStatus::Done | JobStatus::Failed)
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            JobStatus::Done => StatusTone::Success,
            JobStatus::Failed => StatusTone::Failure,
            _ => StatusTone::InProgress,
        }
    }

    /// Display label; a missing status renders as `N/A`.
    pub fn label(&self) -> &str {
        match self.as_str() {
            "" => "N/A",
            raw => raw,
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Other(String::new())
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        JobStatus::parse(&raw)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Serialize for JobStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(JobStatus::from).unwrap_or_default())
    }
}

/// One crawl job as held by the client.
///
/// Field names follow the backend's PascalCase encoding; lower-case
/// spellings are accepted too. Keys the client does not model are kept in
/// `extra`, and a decoded record keeps the payload it came from in `raw`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Job {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Status")]
    pub status: JobStatus,
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Links")]
    pub links: Vec<String>,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The record exactly as the backend sent it; `Null` for jobs built locally.
    #[serde(skip)]
    pub raw: Value,
}

impl Job {
    /// A record without an id cannot be addressed and counts as not found.
    pub fn is_usable(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Pretty-printed JSON of the full record, for the raw data view.
    ///
    /// Decoded records print the backend payload untouched. Records that
    /// never came off the wire fall back to their typed fields.
    pub fn raw_record(&self) -> String {
        let printed = if self.raw.is_null() {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string_pretty(&self.raw)
        };
        printed.unwrap_or_else(|err| format!("<unprintable: {err}>"))
    }
}

impl<'de> Deserialize<'de> for Job {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let fields = JobFields::deserialize(&raw).map_err(<D::Error as de::Error>::custom)?;
        Ok(Job {
            id: fields.id,
            url: fields.url,
            status: fields.status,
            title: fields.title,
            description: fields.description,
            links: fields.links,
            error: fields.error,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
            extra: fields.extra,
            raw,
        })
    }
}

/// Wire shape of a job record.
#[derive(Deserialize)]
struct JobFields {
    #[serde(rename = "ID", alias = "id", default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(rename = "URL", alias = "url", default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(rename = "Status", alias = "status", default)]
    status: JobStatus,
    #[serde(rename = "Title", alias = "title", default)]
    title: Option<String>,
    #[serde(rename = "Description", alias = "description", default)]
    description: Option<String>,
    #[serde(rename = "Links", alias = "links", default, deserialize_with = "null_as_default")]
    links: Vec<String>,
    #[serde(rename = "Error", alias = "error", default)]
    error: Option<String>,
    #[serde(rename = "CreatedAt", alias = "createdAt", alias = "created_at", default)]
    created_at: Option<String>,
    #[serde(rename = "UpdatedAt", alias = "updatedAt", alias = "updated_at", default)]
    updated_at: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// The create-job response. Only `id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(alias = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl JobSummary {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// First [`SHORT_ID_LEN`] characters of an id.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
