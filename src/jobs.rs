// URL-list parsing, site detection, and job-list shaping (counts, sorting).

use std::cmp::Ordering;
use url::Url;

use crate::format::{file_name, folder_path};
use crate::models::{Job, StatusCounts};
use crate::types::{JobStatus, SortDir, SortKey};

/// Split free-form text into URL tokens.
///
/// Lines are trimmed; blank lines and `#` comments are skipped; the rest is
/// split on runs of whitespace or commas. Order follows the input.
pub fn parse_urls(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for token in line.split(|c: char| c.is_whitespace() || c == ',') {
            if !token.is_empty() {
                out.push(token.to_string());
            }
        }
    }
    out
}

/// Best-effort site tag for a URL: `"mega"`, `"webshare"`, or `""`.
///
/// The hostname of a well-formed URL is checked first; input that does not
/// parse falls back to a substring scan of the raw string, so partial
/// pastes still detect.
pub fn detect_site(url: &str) -> &'static str {
    if url.is_empty() {
        return "";
    }
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("").to_lowercase();
            site_for(&host)
        }
        Err(_) => site_for(&url.to_lowercase()),
    }
}

fn site_for(s: &str) -> &'static str {
    if s.contains("mega.nz") || s.contains("mega.co.nz") {
        return "mega";
    }
    if s.contains("webshare.cz") {
        return "webshare";
    }
    ""
}

/// Tally jobs per closed-set status. Unknown statuses increment nothing.
pub fn counts_for(jobs: &[Job]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for job in jobs {
        match job.status {
            JobStatus::Queued => counts.queued += 1,
            JobStatus::Resolving => counts.resolving += 1,
            JobStatus::Downloading => counts.downloading += 1,
            JobStatus::Paused => counts.paused += 1,
            JobStatus::Completed => counts.completed += 1,
            JobStatus::Failed => counts.failed += 1,
            JobStatus::Deleted => counts.deleted += 1,
            JobStatus::Other(_) => {}
        }
    }
    counts
}

/// Return a new vector sorted by the derived key. The sort is stable, so
/// jobs with equal keys keep their input order.
pub fn sort_jobs(jobs: &[Job], key: SortKey, dir: SortDir) -> Vec<Job> {
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_by_key(a, b, key);
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare_by_key(a: &Job, b: &Job, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::Name => file_name(a).cmp(&file_name(b)),
        SortKey::Progress => progress_value(a).total_cmp(&progress_value(b)),
        SortKey::Speed => a.download_speed.cmp(&b.download_speed),
        SortKey::Eta => a.eta_seconds.cmp(&b.eta_seconds),
        SortKey::Path => folder_path(a).cmp(&folder_path(b)),
        SortKey::Url => a.url.cmp(&b.url),
    }
}

// Jobs without a known total sort by absolute bytes; the rest by fraction.
fn progress_value(job: &Job) -> f64 {
    let total = job.size_bytes.unwrap_or(0);
    if total <= 0 {
        return job.bytes_done as f64;
    }
    job.bytes_done as f64 / total as f64
}
