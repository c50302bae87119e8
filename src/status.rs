// Display-status rules.
//
// Webshare cannot hold a download in a resumable state, so a paused
// webshare job is presented as "stopped". The stored status is never
// touched; this is presentation only.

use crate::jobs::detect_site;
use crate::models::Job;
use crate::types::JobStatus;

/// True when the job is tagged `webshare` or its URL detects as such.
pub fn is_webshare_job(job: &Job) -> bool {
    if job.site.trim().eq_ignore_ascii_case("webshare") {
        return true;
    }
    detect_site(&job.url) == "webshare"
}

/// Status string to render for a job.
pub fn display_status(job: &Job) -> String {
    if job.status == JobStatus::Paused && is_webshare_job(job) {
        return "stopped".to_string();
    }
    job.status.to_string()
}

/// Label for a status filter value in the UI.
pub fn display_status_filter(status: &str) -> String {
    if status.is_empty() {
        return "all statuses".to_string();
    }
    if status == "paused" {
        return "paused/stopped".to_string();
    }
    status.to_string()
}
