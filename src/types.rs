// Type definitions and enums

/// Lifecycle state reported by the queue backend.
///
/// The backend owns the status set. Values outside the closed set (the
/// backend emits `decrypting` and `decrypt_failed` during archive handling)
/// are preserved verbatim in `Other` instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Queued,
    Resolving,
    Downloading,
    Paused,
    Completed,
    Failed,
    Deleted,
    #[serde(untagged)]
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Resolving => "resolving",
            JobStatus::Downloading => "downloading",
            JobStatus::Paused => "paused",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Deleted => "deleted",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutations a client may request on an existing job. Anything else is
/// rejected before a backend call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Retry,
    Remove,
    Pause,
    Resume,
}

impl JobAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobAction::Retry => "retry",
            JobAction::Remove => "remove",
            JobAction::Pause => "pause",
            JobAction::Resume => "resume",
        }
    }
}

impl std::fmt::Display for JobAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobAction {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retry" => Ok(JobAction::Retry),
            "remove" => Ok(JobAction::Remove),
            "pause" => Ok(JobAction::Pause),
            "resume" => Ok(JobAction::Resume),
            other => Err(DashError::InvalidRequest(format!(
                "unsupported action: {}",
                other
            ))),
        }
    }
}

/// Column a job list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Status,
    Name,
    Progress,
    Speed,
    Eta,
    Path,
    Url,
}

impl std::str::FromStr for SortKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "status" => Ok(SortKey::Status),
            "name" => Ok(SortKey::Name),
            "progress" => Ok(SortKey::Progress),
            "speed" => Ok(SortKey::Speed),
            "eta" => Ok(SortKey::Eta),
            "path" => Ok(SortKey::Path),
            "url" => Ok(SortKey::Url),
            other => Err(DashError::InvalidRequest(format!(
                "unknown sort key: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl std::str::FromStr for SortDir {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(DashError::InvalidRequest(format!(
                "unknown sort direction: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// Error reported by the backend, already reduced to its message.
    #[error("{0}")]
    Api(String),

    /// Transport-level failure before any response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type DashResult<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_serde_known_values() {
        let status: JobStatus = serde_json::from_str("\"downloading\"").unwrap();
        assert_eq!(status, JobStatus::Downloading);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"downloading\"");
    }

    #[test]
    fn test_status_serde_preserves_unknown_values() {
        let status: JobStatus = serde_json::from_str("\"decrypting\"").unwrap();
        assert_eq!(status, JobStatus::Other("decrypting".to_string()));
        assert_eq!(status.as_str(), "decrypting");
        // Round-trips back to the raw string
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"decrypting\"");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(JobAction::from_str("retry").unwrap(), JobAction::Retry);
        assert_eq!(JobAction::from_str("resume").unwrap(), JobAction::Resume);
        assert!(JobAction::from_str("explode").is_err());
        assert!(JobAction::from_str("Retry").is_err());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("progress").unwrap(), SortKey::Progress);
        assert_eq!(SortKey::from_str("url").unwrap(), SortKey::Url);
        assert!(SortKey::from_str("size").is_err());
        assert_eq!(SortDir::from_str("desc").unwrap(), SortDir::Desc);
        assert!(SortDir::from_str("down").is_err());
    }
}
