//! Command-line interface.
//!
//! `serve` runs the dash HTTP server; every other subcommand drives a
//! running dash over its REST surface, so the terminal and the browser see
//! the queue through the same endpoints.

use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use crate::client::ApiClient;
use crate::config::Config;
use crate::format::{file_name, file_path, folder_path, format_eta, format_progress, format_speed};
use crate::jobs::{counts_for, detect_site, parse_urls, sort_jobs};
use crate::models::{AppState, BatchRequest, Job, UpdateSettingsRequest};
use crate::routes::create_router;
use crate::status::display_status;
use crate::types::{JobAction, SortDir, SortKey};

/// Dash origin used when neither `--api` nor DLQ_DASH_URL is set.
pub const DEFAULT_DASH_ORIGIN: &str = "http://127.0.0.1:8098";

#[derive(Debug, Parser)]
#[command(name = "dlq-dash", version)]
#[command(about = "DLQ dash: proxy server and terminal client for the download queue", long_about = None)]
pub struct Cli {
    /// Dash origin to talk to (falls back to DLQ_DASH_URL, then localhost).
    #[arg(long, global = true, value_name = "URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the dash HTTP server in front of the DLQ backend.
    Serve,

    /// Show a queue summary and the job table.
    Status {
        /// Only show jobs in this state (e.g. failed, downloading).
        #[arg(long)]
        status: Option<String>,
        /// Column to sort by: id, status, name, progress, speed, eta, path, url.
        #[arg(long, default_value = "id")]
        sort: String,
        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,
        /// Keep refreshing until no job is active.
        #[arg(long)]
        watch: bool,
        /// Refresh interval in seconds while watching.
        #[arg(long, default_value_t = 1)]
        interval: u64,
    },

    /// List every job with its destination path, deleted ones included.
    Files,

    /// Print the recent event log of a job.
    Logs {
        /// Job identifier.
        id: i64,
        /// Number of log lines to fetch.
        #[arg(long, default_value_t = 50)]
        tail: u32,
    },

    /// Queue one or more URLs for download.
    Add(AddArgs),

    /// Re-queue a failed job.
    Retry {
        /// Job identifier.
        id: i64,
    },

    /// Pause an active job.
    Pause {
        /// Job identifier.
        id: i64,
    },

    /// Resume a paused job.
    Resume {
        /// Job identifier.
        id: i64,
    },

    /// Remove a job from the queue.
    Remove {
        /// Job identifier.
        id: i64,
    },

    /// Clear every job and its event log from the queue.
    Clear,

    /// Show queue settings, or update the ones passed as flags.
    Settings {
        /// Number of jobs downloaded in parallel.
        #[arg(long)]
        concurrency: Option<i64>,
        /// Retry budget applied to new jobs.
        #[arg(long)]
        max_attempts: Option<i64>,
    },

    /// Show client and server build and configuration details.
    Info,
}

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// URLs to queue.
    pub urls: Vec<String>,
    /// Destination directory on the download host.
    #[arg(long)]
    pub out: String,
    /// Override the stored filename (single URL only).
    #[arg(long)]
    pub name: Option<String>,
    /// Force a site handler instead of detecting one per URL.
    #[arg(long)]
    pub site: Option<String>,
    /// Retry budget per job.
    #[arg(long)]
    pub max_attempts: Option<u32>,
    /// Read additional URLs from a file (repeatable).
    #[arg(long)]
    pub file: Vec<PathBuf>,
    /// Read additional URLs from standard input.
    #[arg(long)]
    pub stdin: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let Cli { api, command } = cli;
    match command {
        Commands::Serve => serve().await,
        Commands::Status {
            status,
            sort,
            desc,
            watch,
            interval,
        } => {
            run_status(
                &client_for(api.as_deref()),
                status,
                &sort,
                desc,
                watch,
                interval,
            )
            .await
        }
        Commands::Files => run_files(&client_for(api.as_deref())).await,
        Commands::Logs { id, tail } => run_logs(&client_for(api.as_deref()), id, tail).await,
        Commands::Add(args) => run_add(&client_for(api.as_deref()), args).await,
        Commands::Retry { id } => run_action(&client_for(api.as_deref()), id, JobAction::Retry).await,
        Commands::Pause { id } => run_action(&client_for(api.as_deref()), id, JobAction::Pause).await,
        Commands::Resume { id } => {
            run_action(&client_for(api.as_deref()), id, JobAction::Resume).await
        }
        Commands::Remove { id } => {
            run_action(&client_for(api.as_deref()), id, JobAction::Remove).await
        }
        Commands::Clear => run_clear(&client_for(api.as_deref())).await,
        Commands::Settings {
            concurrency,
            max_attempts,
        } => run_settings(&client_for(api.as_deref()), concurrency, max_attempts).await,
        Commands::Info => run_info(&client_for(api.as_deref())).await,
    }
}

fn client_for(api: Option<&str>) -> ApiClient {
    ApiClient::new(&resolve_origin(api))
}

fn resolve_origin(api: Option<&str>) -> String {
    if let Some(flag) = api {
        let flag = flag.trim();
        if !flag.is_empty() {
            return flag.trim_end_matches('/').to_string();
        }
    }
    if let Ok(from_env) = std::env::var("DLQ_DASH_URL") {
        let from_env = from_env.trim();
        if !from_env.is_empty() {
            return from_env.trim_end_matches('/').to_string();
        }
    }
    DEFAULT_DASH_ORIGIN.to_string()
}

async fn serve() -> Result<()> {
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    info!("Forwarding to DLQ backend at {}", config.backend.base_url);

    let state = AppState::new(config.clone());
    let app = create_router(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Dash listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn run_status(
    client: &ApiClient,
    status: Option<String>,
    sort: &str,
    desc: bool,
    watch: bool,
    interval: u64,
) -> Result<()> {
    let key = SortKey::from_str(sort)?;
    let dir = if desc { SortDir::Desc } else { SortDir::Asc };
    let interval = interval.max(1);
    // Deleted jobs are hidden by the backend unless asked for explicitly.
    let include_deleted = status.as_deref() == Some("deleted");

    loop {
        if watch {
            // Home the cursor and wipe the screen between refreshes
            print!("\x1b[H\x1b[2J");
        }
        let jobs = client.list_jobs(status.as_deref(), include_deleted).await?;
        let jobs = sort_jobs(&jobs, key, dir);
        println!("{}", summary_line(&jobs));
        print_jobs(&jobs);
        if !watch || counts_for(&jobs).active() == 0 {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}

fn summary_line(jobs: &[Job]) -> String {
    let counts = counts_for(jobs);
    format!(
        "Jobs: {} total | active: {} (queued {}, resolving {}, downloading {}, paused {}) | done: {} (completed {}, failed {})",
        jobs.len(),
        counts.active(),
        counts.queued,
        counts.resolving,
        counts.downloading,
        counts.paused,
        counts.done(),
        counts.completed,
        counts.failed
    )
}

fn print_jobs(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs.");
        return;
    }
    println!(
        "{:<6} {:<12} {:<28} {:<12} {:<8} {:<22} {}",
        "ID", "STATUS", "PROGRESS", "SPEED", "ETA", "OUT", "NAME/URL"
    );
    for job in jobs {
        println!(
            "{:<6} {:<12} {:<28} {:<12} {:<8} {:<22} {}",
            job.id,
            display_status(job),
            format_progress(job),
            format_speed(job),
            format_eta(job),
            folder_path(job),
            file_name(job)
        );
        if let Some(code) = job.error_code.as_deref() {
            if !code.is_empty() {
                println!(
                    "{:<6} error: {} ({})",
                    "",
                    code,
                    job.error.as_deref().unwrap_or("")
                );
            }
        }
    }
}

async fn run_files(client: &ApiClient) -> Result<()> {
    let jobs = client.list_jobs(None, true).await?;
    if jobs.is_empty() {
        println!("No jobs.");
        return Ok(());
    }
    println!("{:<6} {:<12} {:<48} {}", "ID", "STATUS", "PATH", "URL");
    for job in &jobs {
        println!(
            "{:<6} {:<12} {:<48} {}",
            job.id,
            display_status(job),
            file_path(job),
            job.url
        );
    }
    Ok(())
}

async fn run_logs(client: &ApiClient, id: i64, tail: u32) -> Result<()> {
    let lines = client.get_events(id, Some(tail)).await?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

async fn run_add(client: &ApiClient, args: AddArgs) -> Result<()> {
    let AddArgs {
        mut urls,
        out,
        name,
        site,
        max_attempts,
        file: files,
        stdin,
    } = args;
    if stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading urls from stdin")?;
        urls.extend(parse_urls(&text));
    }
    for path in &files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading urls from {}", path.display()))?;
        urls.extend(parse_urls(&text));
    }
    if urls.is_empty() {
        bail!("no urls given");
    }
    if urls.len() > 1 && name.is_some() {
        bail!("--name only applies to a single url");
    }

    let request = BatchRequest {
        urls,
        out_dir: out,
        name,
        site,
        max_attempts,
    };
    let results = client
        .add_jobs_batch(&request, |url| {
            let site = detect_site(url);
            (!site.is_empty()).then(|| site.to_string())
        })
        .await;

    let mut failed = 0;
    for result in &results {
        if result.ok {
            println!(
                "queued job id {} ({})",
                result.id.unwrap_or_default(),
                result.url
            );
        } else {
            eprintln!(
                "error for {}: {}",
                result.url,
                result.error.as_deref().unwrap_or("unknown error")
            );
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{} of {} urls failed", failed, results.len());
    }
    Ok(())
}

async fn run_action(client: &ApiClient, id: i64, action: JobAction) -> Result<()> {
    let resp = client.post_action(id, action).await?;
    println!("{}", resp.status);
    Ok(())
}

async fn run_clear(client: &ApiClient) -> Result<()> {
    let resp = client.clear_jobs().await?;
    println!("{}", resp.status);
    Ok(())
}

async fn run_settings(
    client: &ApiClient,
    concurrency: Option<i64>,
    max_attempts: Option<i64>,
) -> Result<()> {
    let view = if concurrency.is_none() && max_attempts.is_none() {
        client.get_settings().await?
    } else {
        client
            .update_settings(&UpdateSettingsRequest {
                concurrency,
                max_attempts,
            })
            .await?
    };
    println!("concurrency: {}", view.concurrency);
    println!("max_attempts: {}", view.max_attempts);
    Ok(())
}

async fn run_info(client: &ApiClient) -> Result<()> {
    println!("CLI:");
    println!("  version: dlq-dash {}", env!("CARGO_PKG_VERSION"));
    println!("  api: {}", client.base());
    match std::env::var("DLQ_DASH_URL") {
        Ok(value) => println!("  env.DLQ_DASH_URL: {}", value),
        Err(_) => println!("  env.DLQ_DASH_URL: (unset)"),
    }

    println!();
    println!("Server:");
    let meta = match client.get_meta().await {
        Ok(meta) => meta,
        Err(err) => {
            println!("  status: error ({})", err);
            return Ok(());
        }
    };
    println!("  status: ok");
    if let Some(version) = meta.version.as_deref() {
        if !version.is_empty() {
            println!("  version: {}", version);
        }
    }
    println!("  out_dir_presets: {}", meta.out_dir_presets.len());
    for preset in &meta.out_dir_presets {
        println!("    - {}", preset);
    }
    if let Ok(settings) = client.get_settings().await {
        println!("  settings:");
        println!("    concurrency: {}", settings.concurrency);
        println!("    max_attempts: {}", settings.max_attempts);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobStatus;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_status_flags() {
        let cli = parse(&[
            "dlq-dash", "status", "--watch", "--sort", "progress", "--desc", "--interval", "5",
        ]);
        match cli.command {
            Commands::Status {
                status,
                sort,
                desc,
                watch,
                interval,
            } => {
                assert_eq!(status, None);
                assert_eq!(sort, "progress");
                assert!(desc);
                assert!(watch);
                assert_eq!(interval, 5);
            }
            _ => panic!("expected Status"),
        }
    }

    #[test]
    fn test_parse_add_with_flags() {
        let cli = parse(&[
            "dlq-dash",
            "add",
            "https://mega.nz/file/a",
            "https://mega.nz/file/b",
            "--out",
            "/data/downloads",
            "--max-attempts",
            "3",
        ]);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.urls.len(), 2);
                assert_eq!(args.out, "/data/downloads");
                assert_eq!(args.name, None);
                assert_eq!(args.site, None);
                assert_eq!(args.max_attempts, Some(3));
                assert!(args.file.is_empty());
                assert!(!args.stdin);
            }
            _ => panic!("expected Add"),
        }
    }

    #[test]
    fn test_parse_add_requires_out() {
        assert!(Cli::try_parse_from(["dlq-dash", "add", "https://a.example/1"]).is_err());
    }

    #[test]
    fn test_api_flag_is_global() {
        let cli = parse(&["dlq-dash", "status", "--api", "http://dash.lan:8098"]);
        assert_eq!(cli.api.as_deref(), Some("http://dash.lan:8098"));
    }

    #[test]
    fn test_resolve_origin_prefers_flag_and_trims() {
        assert_eq!(
            resolve_origin(Some("http://dash.lan:8098/")),
            "http://dash.lan:8098"
        );
    }

    #[test]
    fn test_summary_line_counts() {
        let job = |status: JobStatus| Job {
            status,
            ..Job::default()
        };
        let jobs = vec![
            job(JobStatus::Queued),
            job(JobStatus::Downloading),
            job(JobStatus::Completed),
            job(JobStatus::Failed),
        ];
        assert_eq!(
            summary_line(&jobs),
            "Jobs: 4 total | active: 2 (queued 1, resolving 0, downloading 1, paused 0) | done: 2 (completed 1, failed 1)"
        );
    }
}
