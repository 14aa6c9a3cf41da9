//! GitLab API client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::GitLabApi;
use crate::types::{CreateCommit, EntryKind, TreeEntry};

/// Header GitLab reads personal and project access tokens from.
const PRIVATE_TOKEN: &str = "PRIVATE-TOKEN";

// === Internal API response types ===

/// Internal representation of a tree entry from the GitLab API.
#[derive(serde::Deserialize)]
struct ApiTreeEntry {
    path: String,
    #[serde(rename = "type")]
    object_type: String,
}

impl ApiTreeEntry {
    /// Convert to the domain type, dropping submodule entries.
    fn into_tree_entry(self) -> Option<TreeEntry> {
        EntryKind::from_object_type(&self.object_type).map(|kind| TreeEntry {
            path: self.path,
            kind,
        })
    }
}

/// GitLab API client.
pub struct GitLabClient {
    client: Client,
    /// API root, e.g. `https://gitlab.com/api/v4`.
    api_url: Url,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
    page_size: usize,
}

impl GitLabClient {
    /// Default GitLab instance.
    pub const DEFAULT_URL: &'static str = "https://gitlab.com";

    /// Default number of tree entries requested per page (GitLab's maximum).
    pub const DEFAULT_PAGE_SIZE: usize = 100;

    /// Create a new GitLab client for the instance at `base_url`.
    ///
    /// A URL without scheme is taken to be `https`.
    ///
    /// # Errors
    /// Returns error if the URL is unusable or the HTTP client cannot be built.
    pub fn new(base_url: &str, token: SecretString) -> Result<Self> {
        let base = normalize_base_url(base_url);
        let api_url = Url::parse(&format!("{base}/api/v4"))
            .map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("tagbump"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_url,
            token,
            page_size: Self::DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the number of tree entries requested per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Build an API URL from path segments, percent-encoding each one.
    ///
    /// A segment containing `/` stays a single segment (`a%2Fb`), which is
    /// what GitLab expects for file paths and namespaced project names.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send an authenticated request and map error statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header(PRIVATE_TOKEN, self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 => Err(Error::AuthenticationFailed),
            status_code => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    /// Make a GET request and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let response = self.send(self.client.get(url).query(query)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // === Repository Operations ===

    /// List the repository tree, following pagination.
    ///
    /// Pages are requested until one comes back shorter than the page
    /// size. Entries keep the order the server returned them in.
    ///
    /// # Errors
    /// Returns error if any page request fails.
    pub async fn list_tree(
        &self,
        project_id: u64,
        branch: &str,
        path: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "repository", "tree"])?;

        let mut entries = Vec::new();
        let mut page: u32 = 1;
        loop {
            let mut query = vec![
                ("ref", branch.to_string()),
                ("recursive", "true".to_string()),
                ("per_page", self.page_size.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(path) = path {
                query.push(("path", path.to_string()));
            }

            let batch: Vec<ApiTreeEntry> = self.get_json(url.clone(), &query).await?;
            let count = batch.len();
            debug!(project_id, page, count, "fetched repository tree page");

            entries.extend(batch.into_iter().filter_map(ApiTreeEntry::into_tree_entry));

            if count < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(entries)
    }

    /// Fetch the raw content of a file.
    ///
    /// # Errors
    /// Returns error if the file does not exist on `branch`, the request
    /// fails, or the content is not valid UTF-8.
    pub async fn get_raw_file(&self, project_id: u64, branch: &str, file_path: &str) -> Result<String> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "repository", "files", file_path, "raw"])?;

        let response = self
            .send(self.client.get(url).query(&[("ref", branch)]))
            .await?;
        let bytes = response.bytes().await?;
        let content = String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidEncoding {
            path: file_path.to_string(),
        })?;
        debug!(project_id, file_path, bytes = content.len(), "fetched raw file");

        Ok(content)
    }

    // === Project Operations ===

    /// Resolve a project path (`group/subgroup/project`) to its numeric id.
    ///
    /// A purely numeric name is already an id and is returned without a request.
    ///
    /// # Errors
    /// Returns error if the project is unknown or the request fails.
    pub async fn resolve_project_id(&self, name: &str) -> Result<u64> {
        #[derive(serde::Deserialize)]
        struct ProjectInfo {
            id: u64,
        }

        if let Ok(id) = name.parse::<u64>() {
            return Ok(id);
        }

        let url = self.endpoint(&["projects", name])?;
        let info: ProjectInfo = self.get_json(url, &[]).await?;
        debug!(name, id = info.id, "resolved project id");
        Ok(info.id)
    }

    // === Commit Operations ===

    /// Create a commit with several file actions (single attempt).
    ///
    /// # Errors
    /// Returns error if the request fails or the server rejects the commit.
    pub async fn create_commit(
        &self,
        project_id: u64,
        commit: &CreateCommit,
    ) -> Result<serde_json::Value> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "repository", "commits"])?;

        let response = self.send(self.client.post(url).json(commit)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

/// Prepend `https://` to a scheme-less host and drop trailing slashes.
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

// === Trait Implementation ===

impl GitLabApi for GitLabClient {
    async fn list_tree(
        &self,
        project_id: u64,
        branch: &str,
        path: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        self.list_tree(project_id, branch, path).await
    }

    async fn get_raw_file(&self, project_id: u64, branch: &str, file_path: &str) -> Result<String> {
        self.get_raw_file(project_id, branch, file_path).await
    }

    async fn resolve_project_id(&self, name: &str) -> Result<u64> {
        self.resolve_project_id(name).await
    }

    async fn create_commit(
        &self,
        project_id: u64,
        commit: &CreateCommit,
    ) -> Result<serde_json::Value> {
        self.create_commit(project_id, commit).await
    }
}
