//! Human-readable rendering of raw job fields.
//!
//! Every function here is total: invalid or missing numeric input renders as
//! a sentinel (`"0.0B"` or `"-"`) instead of failing.

use crate::models::Job;
use crate::types::JobStatus;

const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Binary-prefixed byte count with one decimal digit, saturating at PiB.
/// Non-finite and non-positive inputs render as `"0.0B"`.
pub fn human_bytes(n: f64) -> String {
    if !n.is_finite() || n <= 0.0 {
        return "0.0B".to_string();
    }
    let mut val = n;
    let mut idx = 0;
    while val >= 1024.0 && idx < UNITS.len() - 1 {
        val /= 1024.0;
        idx += 1;
    }
    format!("{:.1}{}", val, UNITS[idx])
}

/// Compact duration: `1h02m`, `2m05s`, or `45s`. Non-positive and
/// non-finite inputs render as `"-"`.
pub fn human_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "-".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}h{:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m{:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

fn display_name(job: &Job) -> String {
    if let Some(filename) = job.filename.as_deref() {
        if !filename.is_empty() {
            return filename.to_string();
        }
    }
    if !job.name.is_empty() {
        return job.name.clone();
    }
    short_url(&job.url)
}

/// Filename a job will (or did) produce: explicit filename, then the name
/// override, then a shortened URL. `"-"` when nothing is known.
pub fn file_name(job: &Job) -> String {
    let name = display_name(job);
    if name.is_empty() {
        return "-".to_string();
    }
    name
}

/// Full destination path for a job, joining the output directory with the
/// resolved name.
pub fn file_path(job: &Job) -> String {
    let name = display_name(job);
    if name.is_empty() {
        return short_url(&job.url);
    }
    let dir = job.out_dir.strip_suffix('/').unwrap_or(&job.out_dir);
    format!("{}/{}", dir, name)
}

/// Output directory normalized to end with a slash. Empty and root paths
/// pass through unchanged.
pub fn folder_path(job: &Job) -> String {
    let out_dir = &job.out_dir;
    if out_dir.is_empty() || out_dir == "/" {
        return out_dir.clone();
    }
    if out_dir.ends_with('/') {
        return out_dir.clone();
    }
    format!("{}/", out_dir)
}

/// Progress cell: `done / total (pct%)` while transferring, just the total
/// once complete, and a bare byte count when the total is unknown.
///
/// Jobs past the download phase can report zero `bytes_done`; a known total
/// is imputed for them so completed work never shows as empty.
pub fn format_progress(job: &Job) -> String {
    let total = job.size_bytes.unwrap_or(0);
    let mut done = job.bytes_done;
    let past_download = matches!(
        job.status.as_str(),
        "completed" | "decrypting" | "decrypt_failed"
    );
    if done == 0 && past_download && total > 0 {
        done = total;
    }
    if total <= 0 {
        return human_bytes(done as f64);
    }
    let pct = ((done as f64 / total as f64) * 100.0).min(100.0);
    if pct >= 100.0 {
        return human_bytes(total as f64);
    }
    format!(
        "{} / {} ({:.1}%)",
        human_bytes(done as f64),
        human_bytes(total as f64),
        pct
    )
}

/// Transfer rate, only meaningful while downloading; `"-"` otherwise.
pub fn format_speed(job: &Job) -> String {
    if job.status != JobStatus::Downloading || job.download_speed <= 0 {
        return "-".to_string();
    }
    format!("{}/s", human_bytes(job.download_speed as f64))
}

/// Remaining time, only meaningful while downloading; `"-"` otherwise.
pub fn format_eta(job: &Job) -> String {
    if job.status != JobStatus::Downloading || job.eta_seconds <= 0 {
        return "-".to_string();
    }
    human_duration(job.eta_seconds as f64)
}

/// URLs longer than 64 characters are cut to 61 plus an ellipsis.
pub fn short_url(url: &str) -> String {
    if url.chars().count() <= 64 {
        return url.to_string();
    }
    let head: String = url.chars().take(61).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        let cases: &[(f64, &str)] = &[
            (0.0, "0.0B"),
            (-5.0, "0.0B"),
            (f64::NAN, "0.0B"),
            (f64::INFINITY, "0.0B"),
            (1.0, "1.0B"),
            (512.0, "512.0B"),
            (1023.0, "1023.0B"),
            (1024.0, "1.0KiB"),
            (1536.0, "1.5KiB"),
            (1048576.0, "1.0MiB"),
            (3.5 * 1024.0 * 1024.0 * 1024.0, "3.5GiB"),
            (1024f64.powi(5), "1.0PiB"),
            // Saturates at the largest unit instead of inventing one
            (1024f64.powi(6), "1024.0PiB"),
        ];
        for (input, expected) in cases {
            assert_eq!(human_bytes(*input), *expected, "input {}", input);
        }
    }

    #[test]
    fn test_human_duration() {
        let cases: &[(f64, &str)] = &[
            (0.0, "-"),
            (-1.0, "-"),
            (f64::NAN, "-"),
            (1.0, "1s"),
            (45.0, "45s"),
            (59.9, "59s"),
            (60.0, "1m00s"),
            (125.0, "2m05s"),
            (3599.0, "59m59s"),
            (3600.0, "1h00m"),
            (3725.0, "1h02m"),
            (86400.0, "24h00m"),
        ];
        for (input, expected) in cases {
            assert_eq!(human_duration(*input), *expected, "input {}", input);
        }
    }

    #[test]
    fn test_file_name_priority() {
        let mut job = Job {
            filename: Some("archive.zip".to_string()),
            name: "override".to_string(),
            url: "https://example.com/dl/archive".to_string(),
            ..Job::default()
        };
        assert_eq!(file_name(&job), "archive.zip");

        job.filename = None;
        assert_eq!(file_name(&job), "override");

        job.name.clear();
        assert_eq!(file_name(&job), "https://example.com/dl/archive");

        job.url.clear();
        assert_eq!(file_name(&job), "-");
    }

    #[test]
    fn test_file_path_strips_trailing_slash() {
        let job = Job {
            filename: Some("movie.mkv".to_string()),
            out_dir: "/data/downloads/".to_string(),
            ..Job::default()
        };
        assert_eq!(file_path(&job), "/data/downloads/movie.mkv");

        let job = Job {
            filename: Some("movie.mkv".to_string()),
            out_dir: "/data/downloads".to_string(),
            ..Job::default()
        };
        assert_eq!(file_path(&job), "/data/downloads/movie.mkv");
    }

    #[test]
    fn test_folder_path() {
        let mut job = Job::default();
        assert_eq!(folder_path(&job), "");
        job.out_dir = "/".to_string();
        assert_eq!(folder_path(&job), "/");
        job.out_dir = "/data".to_string();
        assert_eq!(folder_path(&job), "/data/");
        job.out_dir = "/data/".to_string();
        assert_eq!(folder_path(&job), "/data/");
    }

    #[test]
    fn test_format_progress_partial() {
        let job = Job {
            status: JobStatus::Downloading,
            size_bytes: Some(2048),
            bytes_done: 1024,
            ..Job::default()
        };
        assert_eq!(format_progress(&job), "1.0KiB / 2.0KiB (50.0%)");
    }

    #[test]
    fn test_format_progress_unknown_total() {
        let job = Job {
            status: JobStatus::Downloading,
            bytes_done: 1536,
            ..Job::default()
        };
        assert_eq!(format_progress(&job), "1.5KiB");
    }

    #[test]
    fn test_format_progress_imputes_total_after_download() {
        // Backends report bytes_done 0 once the transfer phase is over
        let completed = Job {
            status: JobStatus::Completed,
            size_bytes: Some(4096),
            bytes_done: 0,
            ..Job::default()
        };
        assert_eq!(format_progress(&completed), "4.0KiB");

        let decrypting = Job {
            status: JobStatus::Other("decrypting".to_string()),
            size_bytes: Some(4096),
            bytes_done: 0,
            ..Job::default()
        };
        assert_eq!(format_progress(&decrypting), "4.0KiB");

        // A queued job with bytes_done 0 still shows as empty
        let queued = Job {
            status: JobStatus::Queued,
            size_bytes: Some(4096),
            bytes_done: 0,
            ..Job::default()
        };
        assert_eq!(format_progress(&queued), "0.0B / 4.0KiB (0.0%)");
    }

    #[test]
    fn test_format_progress_caps_at_total() {
        let job = Job {
            status: JobStatus::Downloading,
            size_bytes: Some(1024),
            bytes_done: 4096,
            ..Job::default()
        };
        assert_eq!(format_progress(&job), "1.0KiB");
    }

    #[test]
    fn test_speed_and_eta_only_while_downloading() {
        let mut job = Job {
            status: JobStatus::Downloading,
            download_speed: 2048,
            eta_seconds: 125,
            ..Job::default()
        };
        assert_eq!(format_speed(&job), "2.0KiB/s");
        assert_eq!(format_eta(&job), "2m05s");

        job.status = JobStatus::Paused;
        assert_eq!(format_speed(&job), "-");
        assert_eq!(format_eta(&job), "-");

        job.status = JobStatus::Downloading;
        job.download_speed = 0;
        job.eta_seconds = 0;
        assert_eq!(format_speed(&job), "-");
        assert_eq!(format_eta(&job), "-");
    }

    #[test]
    fn test_short_url() {
        assert_eq!(short_url(""), "");
        let short = "https://example.com/file";
        assert_eq!(short_url(short), short);

        let exactly_64 = "a".repeat(64);
        assert_eq!(short_url(&exactly_64), exactly_64);

        let long = format!("https://example.com/{}", "x".repeat(100));
        let shortened = short_url(&long);
        assert_eq!(shortened.chars().count(), 64);
        assert!(shortened.ends_with("..."));
        assert!(long.starts_with(shortened.trim_end_matches("...")));

        // Cut in characters, not bytes: the 61st char of this URL sits on
        // an odd byte offset
        let accented = format!("https://example.com/{}", "é".repeat(60));
        let shortened = short_url(&accented);
        assert_eq!(shortened.chars().count(), 64);
        assert!(shortened.ends_with("..."));
        assert!(accented.starts_with(shortened.trim_end_matches("...")));
    }
}
