//! Recognized workload kinds and navigation to their container list.

use std::fmt;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Path from a pod template to its containers, shared by every kind.
const POD_CONTAINERS: [&str; 4] = ["spec", "template", "spec", "containers"];

/// Path used by `CronJob`, which wraps the pod template in a job template.
const CRONJOB_CONTAINERS: [&str; 6] = [
    "spec",
    "jobTemplate",
    "spec",
    "template",
    "spec",
    "containers",
];

/// Kubernetes object kinds whose container image is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    Job,
    CronJob,
}

impl WorkloadKind {
    /// Map a manifest `kind` value to a workload kind.
    ///
    /// Returns `None` for every other kind (`Service`, `ConfigMap`, ...).
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "Deployment" => Some(Self::Deployment),
            "StatefulSet" => Some(Self::StatefulSet),
            "Job" => Some(Self::Job),
            "CronJob" => Some(Self::CronJob),
            _ => None,
        }
    }

    /// Determine the workload kind of a parsed document, if it is one.
    #[must_use]
    pub fn of(document: &Value) -> Option<Self> {
        document
            .get("kind")
            .and_then(Value::as_str)
            .and_then(Self::from_kind)
    }

    /// The manifest `kind` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::Job => "Job",
            Self::CronJob => "CronJob",
        }
    }

    /// Mapping keys leading from the document root to the container list.
    #[must_use]
    pub const fn container_path(self) -> &'static [&'static str] {
        match self {
            Self::CronJob => &CRONJOB_CONTAINERS,
            Self::Deployment | Self::StatefulSet | Self::Job => &POD_CONTAINERS,
        }
    }

    /// Borrow the container list of a document of this kind.
    ///
    /// # Errors
    /// Returns `MalformedWorkload` if any key along the path is missing or
    /// the final value is not a sequence.
    pub fn containers_mut(self, document: &mut Value) -> Result<&mut Vec<Value>> {
        let path = self.container_path();
        let value = lookup_mut(document, path).map_err(|missing| Error::MalformedWorkload {
            kind: self,
            reason: format!("missing `{missing}`"),
        })?;

        match value {
            Value::Sequence(containers) => Ok(containers),
            _ => Err(Error::MalformedWorkload {
                kind: self,
                reason: format!("`{}` is not a list", path.join(".")),
            }),
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow a chain of mapping keys.
///
/// On failure returns the dotted path up to and including the first key
/// that could not be found.
fn lookup_mut<'v>(value: &'v mut Value, path: &[&str]) -> std::result::Result<&'v mut Value, String> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get_mut(*key)
            .ok_or_else(|| path[..=depth].join("."))?;
    }
    Ok(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(
            WorkloadKind::from_kind("StatefulSet"),
            Some(WorkloadKind::StatefulSet)
        );
        assert_eq!(WorkloadKind::from_kind("Service"), None);
        assert_eq!(WorkloadKind::from_kind("deployment"), None);
    }

    #[test]
    fn test_of_document() {
        assert_eq!(
            WorkloadKind::of(&yaml("kind: CronJob")),
            Some(WorkloadKind::CronJob)
        );
        assert_eq!(WorkloadKind::of(&yaml("apiVersion: v1")), None);
        assert_eq!(WorkloadKind::of(&yaml("kind: [Job]")), None);
    }

    #[test]
    fn test_cronjob_containers() {
        let mut document = yaml(
            "kind: CronJob
spec:
  jobTemplate:
    spec:
      template:
        spec:
          containers:
          - image: repo/job:1
",
        );

        let containers = WorkloadKind::CronJob.containers_mut(&mut document).unwrap();
        assert_eq!(containers.len(), 1);
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let mut document = yaml(
            "kind: Deployment
spec:
  template:
    metadata: {}
",
        );

        let err = WorkloadKind::Deployment
            .containers_mut(&mut document)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedWorkload { ref reason, .. } if reason == "missing `spec.template.spec`"
        ));
    }

    #[test]
    fn test_cronjob_with_pod_layout_is_malformed() {
        let mut document = yaml(
            "kind: CronJob
spec:
  template:
    spec:
      containers:
      - image: repo/job:1
",
        );

        let result = WorkloadKind::CronJob.containers_mut(&mut document);
        assert!(matches!(result, Err(Error::MalformedWorkload { .. })));
    }

    #[test]
    fn test_containers_not_a_list() {
        let mut document = yaml(
            "kind: Job
spec:
  template:
    spec:
      containers: {image: repo/job:1}
",
        );

        let result = WorkloadKind::Job.containers_mut(&mut document);
        assert!(matches!(result, Err(Error::MalformedWorkload { .. })));
    }
}
