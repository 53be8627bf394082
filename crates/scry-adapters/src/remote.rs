//! The remote analysis service contract and its HTTP implementation.
//!
//! Responses come back as loose JSON values: the server's schemas are the
//! source of truth and the core interprets them defensively, so nothing
//! here forces a shape beyond "it parsed as JSON".

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use serde_json::{json, Value};

/// Name of the analysis configuration shared by every call that references
/// a snapshot's analysis setup.
pub const ANALYSIS_CONFIG: &str = "analysis.json";

/// One page of an output query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPage {
    pub start: u32,
    pub count: u32,
    /// Only return results about the application code.
    pub app_only: bool,
}

impl Default for OutputPage {
    fn default() -> Self {
        Self {
            start: 0,
            count: 50,
            app_only: false,
        }
    }
}

/// The remote operations the sync engine depends on. Implementations are
/// implicitly authenticated with the session's (user, token) pair.
pub trait Remote: Send + Sync {
    fn list_projects<'a>(&'a self, user: &'a str) -> BoxFuture<'a, Result<Value>>;

    fn list_snapshots<'a>(&'a self, user: &'a str, project: &'a str)
        -> BoxFuture<'a, Result<Value>>;

    /// The analysis-type catalog of a project; each record's `id` is a
    /// profile id.
    fn get_project_analyses<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
    ) -> BoxFuture<'a, Result<Value>>;

    /// A snapshot's analysis configuration. Errors when the snapshot has
    /// no analysis data.
    fn get_configuration<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
    ) -> BoxFuture<'a, Result<Value>>;

    /// Start an analysis. Fire-and-forget: no structured response is
    /// consumed.
    fn analyze<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        profile_id: &'a str,
        options: &'a [String],
    ) -> BoxFuture<'a, Result<()>>;

    /// One page of an analysis output table.
    fn get_output<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        run_id: &'a str,
        output_id: &'a str,
        page: &'a OutputPage,
    ) -> BoxFuture<'a, Result<Value>>;

    /// Server results for one source line of a file.
    fn get_symbols<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        file: &'a str,
        line: &'a str,
    ) -> BoxFuture<'a, Result<Value>>;
}

/// [`Remote`] over HTTP via reqwest.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRemote {
    /// `base_url` is scheme-qualified with no trailing slash
    /// (see `Config::http_url`).
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("scry/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn config_url(
        &self,
        user: &str,
        project: &str,
        snapshot: &str,
        config: &str,
        tail: &str,
    ) -> String {
        self.url(&format!(
            "/u/{user}/projects/{project}/snapshots/{snapshot}/configs/{config}{tail}"
        ))
    }

    async fn get_json(&self, url: String, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Could not reach server at {url}"))?
            .error_for_status()
            .with_context(|| format!("Server rejected request {url}"))?;
        response
            .json()
            .await
            .context("Failed to parse server response")
    }

    async fn post_json(&self, url: String, body: Value) -> Result<()> {
        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Could not reach server at {url}"))?
            .error_for_status()
            .with_context(|| format!("Server rejected request {url}"))?;
        Ok(())
    }
}

impl Remote for HttpRemote {
    fn list_projects<'a>(&'a self, user: &'a str) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            self.get_json(self.url(&format!("/u/{user}/projects")), &[])
                .await
        })
    }

    fn list_snapshots<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            self.get_json(self.url(&format!("/u/{user}/projects/{project}/snapshots")), &[])
                .await
        })
    }

    fn get_project_analyses<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            self.get_json(self.url(&format!("/u/{user}/projects/{project}/analyses")), &[])
                .await
        })
    }

    fn get_configuration<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            self.get_json(self.config_url(user, project, snapshot, config, ""), &[])
                .await
        })
    }

    fn analyze<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        profile_id: &'a str,
        options: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.post_json(
                self.config_url(user, project, snapshot, config, "/analyses"),
                json!({ "profile": profile_id, "options": options }),
            )
            .await
        })
    }

    fn get_output<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        run_id: &'a str,
        output_id: &'a str,
        page: &'a OutputPage,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let url = self.config_url(
                user,
                project,
                snapshot,
                config,
                &format!("/analyses/{run_id}/outputs/{output_id}"),
            );
            self.get_json(
                url,
                &[
                    ("start", page.start.to_string()),
                    ("count", page.count.to_string()),
                    ("appOnly", page.app_only.to_string()),
                ],
            )
            .await
        })
    }

    fn get_symbols<'a>(
        &'a self,
        user: &'a str,
        project: &'a str,
        snapshot: &'a str,
        config: &'a str,
        file: &'a str,
        line: &'a str,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let url = self.config_url(user, project, snapshot, config, "/symbols");
            self.get_json(
                url,
                &[("file", file.to_string()), ("line", line.to_string())],
            )
            .await
        })
    }
}
