//! Mock implementations for testing the engine.
//!
//! `MockGitLab` implements `GitLabApi` over an in-memory tree so the
//! browser, aggregator and submitter can be tested without a server.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;
use tagbump_gitlab::{CreateCommit, Error, GitLabApi, Result, TreeEntry};

/// Mock implementation of `GitLabApi` for testing.
#[derive(Default)]
pub struct MockGitLab {
    tree: Vec<TreeEntry>,
    files: HashMap<String, String>,
    tree_error: Option<u16>,
    fetched: Mutex<Vec<String>>,
    commits: Mutex<Vec<CreateCommit>>,
    commit_responses: Mutex<VecDeque<Result<Value>>>,
}

impl MockGitLab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry with content.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.tree.push(TreeEntry::file(path));
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_directory(mut self, path: &str) -> Self {
        self.tree.push(TreeEntry::directory(path));
        self
    }

    /// Add a file entry whose content cannot be fetched.
    pub fn with_missing_file(mut self, path: &str) -> Self {
        self.tree.push(TreeEntry::file(path));
        self
    }

    pub fn with_tree_error(mut self, status: u16) -> Self {
        self.tree_error = Some(status);
        self
    }

    /// Queue a response for the next `create_commit` call.
    pub fn with_commit_response(self, response: Result<Value>) -> Self {
        self.commit_responses.lock().unwrap().push_back(response);
        self
    }

    /// Paths requested through `get_raw_file`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    /// Every commit request received, including failed attempts.
    pub fn commits(&self) -> Vec<CreateCommit> {
        self.commits.lock().unwrap().clone()
    }
}

impl GitLabApi for MockGitLab {
    async fn list_tree(
        &self,
        _project_id: u64,
        _branch: &str,
        path: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        if let Some(status) = self.tree_error {
            return Err(Error::ApiError {
                status,
                message: "tree listing failed".into(),
            });
        }

        let entries = match path {
            Some(path) => {
                let prefix = format!("{path}/");
                self.tree
                    .iter()
                    .filter(|entry| entry.path.starts_with(&prefix))
                    .cloned()
                    .collect()
            }
            None => self.tree.clone(),
        };
        Ok(entries)
    }

    async fn get_raw_file(&self, _project_id: u64, _branch: &str, file_path: &str) -> Result<String> {
        self.fetched.lock().unwrap().push(file_path.to_string());
        self.files.get(file_path).cloned().ok_or_else(|| Error::ApiError {
            status: 404,
            message: "404 File Not Found".into(),
        })
    }

    async fn resolve_project_id(&self, _name: &str) -> Result<u64> {
        Ok(103)
    }

    async fn create_commit(&self, _project_id: u64, commit: &CreateCommit) -> Result<Value> {
        self.commits.lock().unwrap().push(commit.clone());
        self.commit_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({"id": "abc123", "status": null})))
    }
}

/// A single-container Deployment using `image`.
pub fn deployment(image: &str) -> String {
    format!(
        "apiVersion: apps/v1\n\
         kind: Deployment\n\
         metadata:\n  name: service\n\
         spec:\n  replicas: 1\n  template:\n    spec:\n      containers:\n      \
         - name: service\n        image: {image}\n"
    )
}
