// Typed client for the dash HTTP surface.
//
// Every capability is one method and one round trip; there is no caching
// and no retry. Error bodies are reduced to a single human-readable
// message before they reach the caller.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::models::{
    ActionResponse, AddJobRequest, AddJobResponse, BatchRequest, BatchResult, BrowseResponse, Job,
    Meta, MkdirResponse, SettingsView, UpdateSettingsRequest,
};
use crate::types::{DashError, DashResult, JobAction};

pub const DEFAULT_EVENT_LIMIT: u32 = 50;

pub struct ApiClient {
    client: Client,
    base: String,
}

// Error envelope the dash and the backend both use
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiClient {
    /// Create a client for a dash origin, e.g. `http://127.0.0.1:8098`.
    pub fn new(origin: &str) -> Self {
        Self {
            client: Client::new(),
            base: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// List jobs, optionally filtered by status. Deleted jobs are hidden
    /// unless explicitly requested.
    pub async fn list_jobs(
        &self,
        status: Option<&str>,
        include_deleted: bool,
    ) -> DashResult<Vec<Job>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(status) = status {
            if !status.is_empty() {
                params.push(("status", status));
            }
        }
        if include_deleted {
            params.push(("include_deleted", "1"));
        }
        let request = self.client.get(self.url("/api/jobs")).query(&params);
        self.send_json(request).await
    }

    pub async fn get_job(&self, id: i64) -> DashResult<Job> {
        let request = self.client.get(self.url(&format!("/api/jobs/{}", id)));
        self.send_json(request).await
    }

    /// Recent event lines for a job, newest last.
    pub async fn get_events(&self, id: i64, limit: Option<u32>) -> DashResult<Vec<String>> {
        let limit = limit.unwrap_or(DEFAULT_EVENT_LIMIT);
        let request = self
            .client
            .get(self.url(&format!("/api/jobs/{}/events", id)))
            .query(&[("limit", limit.to_string())]);
        self.send_json(request).await
    }

    pub async fn add_job(&self, request: &AddJobRequest) -> DashResult<AddJobResponse> {
        let request = self.client.post(self.url("/api/jobs")).json(request);
        self.send_json(request).await
    }

    /// Submit a batch of URLs strictly one at a time.
    ///
    /// A failed URL is recorded and does not stop the rest of the batch.
    /// Results are returned in input order, one per URL, duplicates
    /// included. When the batch carries no explicit site, `site_resolver`
    /// supplies a per-URL tag.
    pub async fn add_jobs_batch<F>(
        &self,
        request: &BatchRequest,
        site_resolver: F,
    ) -> Vec<BatchResult>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut results = Vec::with_capacity(request.urls.len());
        for url in &request.urls {
            let site = request.site.clone().or_else(|| site_resolver(url));
            let add = AddJobRequest {
                url: url.clone(),
                out_dir: request.out_dir.clone(),
                name: request.name.clone(),
                site,
                max_attempts: request.max_attempts,
            };
            match self.add_job(&add).await {
                Ok(resp) => results.push(BatchResult {
                    url: url.clone(),
                    ok: true,
                    id: Some(resp.id),
                    error: None,
                }),
                Err(err) => results.push(BatchResult {
                    url: url.clone(),
                    ok: false,
                    id: None,
                    error: Some(err.to_string()),
                }),
            }
        }
        results
    }

    /// Request a state transition on a job.
    pub async fn post_action(&self, id: i64, action: JobAction) -> DashResult<ActionResponse> {
        let request = self
            .client
            .post(self.url(&format!("/api/jobs/{}/{}", id, action.as_str())))
            .json(&serde_json::json!({}));
        self.send_json(request).await
    }

    pub async fn clear_jobs(&self) -> DashResult<ActionResponse> {
        let request = self
            .client
            .post(self.url("/api/jobs/clear"))
            .json(&serde_json::json!({}));
        self.send_json(request).await
    }

    pub async fn get_meta(&self) -> DashResult<Meta> {
        let request = self.client.get(self.url("/api/meta"));
        self.send_json(request).await
    }

    pub async fn get_settings(&self) -> DashResult<SettingsView> {
        let request = self.client.get(self.url("/api/settings"));
        self.send_json(request).await
    }

    /// Partial update; the full settings view comes back.
    pub async fn update_settings(
        &self,
        updates: &UpdateSettingsRequest,
    ) -> DashResult<SettingsView> {
        let request = self.client.post(self.url("/api/settings")).json(updates);
        self.send_json(request).await
    }

    pub async fn browse(&self, path: Option<&str>) -> DashResult<BrowseResponse> {
        let mut request = self.client.get(self.url("/api/browse"));
        if let Some(path) = path {
            request = request.query(&[("path", path)]);
        }
        self.send_json(request).await
    }

    pub async fn mkdir(&self, path: &str) -> DashResult<MkdirResponse> {
        let request = self
            .client
            .post(self.url("/api/browse/mkdir"))
            .json(&serde_json::json!({ "path": path }));
        self.send_json(request).await
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> DashResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DashError::Api(extract_error(response).await));
        }
        Ok(response.json().await?)
    }
}

async fn extract_error(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error_message(status, &body)
}

/// Reduce an error response to one message: a JSON body with a string
/// `error` field wins, any other non-empty body is used verbatim, and an
/// empty body falls back to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    if body.is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(error) = parsed.error {
            return error;
        }
    }
    body.to_string()
}
