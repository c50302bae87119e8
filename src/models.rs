use crate::config::Config;
use crate::types::JobStatus;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Read model of a queue job as the backend serializes it.
///
/// The backend owns every field; the dash never mutates a job directly, it
/// only requests transitions through the action endpoints. Numeric transfer
/// fields default to zero so older backends that omit them still parse.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub out_dir: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(default)]
    pub bytes_done: i64,
    #[serde(default)]
    pub download_speed: i64,
    #[serde(default)]
    pub eta_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

// Request/response bodies for the job endpoints

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddJobRequest {
    pub url: String,
    pub out_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddJobResponse {
    pub id: i64,
}

/// Inputs shared by every URL in a batch submission.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchRequest {
    pub urls: Vec<String>,
    pub out_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

/// Per-URL outcome of a batch submission. Exactly one of `id` and `error`
/// is set, matching `ok`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchResult {
    pub url: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ActionResponse {
    pub status: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub out_dir_presets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SettingsView {
    pub concurrency: i64,
    pub max_attempts: i64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<i64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BrowseResponse {
    pub path: String,
    pub parent: String,
    pub dirs: Vec<String>,
    pub is_root: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MkdirResponse {
    pub ok: bool,
    pub path: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
}

/// Jobs per closed-set status. Unrecognized statuses are counted nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatusCounts {
    pub queued: usize,
    pub resolving: usize,
    pub downloading: usize,
    pub paused: usize,
    pub completed: usize,
    pub failed: usize,
    pub deleted: usize,
}

impl StatusCounts {
    /// Jobs the queue is still working on (or holding).
    pub fn active(&self) -> usize {
        self.queued + self.resolving + self.downloading + self.paused
    }

    /// Jobs that reached a terminal outcome.
    pub fn done(&self) -> usize {
        self.completed + self.failed
    }
}
