//! Workload patching for multi-document manifests.
//!
//! A manifest is split into its YAML documents. Documents whose `kind` is
//! a [`WorkloadKind`] get their single container image retagged; every
//! other document is carried through unchanged.
//!
//! Patching edits the source text rather than re-serializing parsed
//! values. Untouched documents keep their exact bytes, and inside a
//! retagged document only the image scalar changes. Kubernetes reads
//! manifests with YAML 1.1 rules, so re-emitting `"yes"` or `"on"`
//! without quotes would silently turn strings into booleans.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::image::ImageReference;
use crate::workload::WorkloadKind;

/// Result of patching one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// The full document stream, with retagged images.
    pub content: String,
    /// Tags that were replaced by the target tag.
    pub replaced_tags: BTreeSet<String>,
}

impl PatchOutcome {
    /// Whether at least one workload was retagged.
    ///
    /// An unchanged outcome means the manifest needs no commit.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.replaced_tags.is_empty()
    }
}

/// An image rewrite applied to one workload document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retag {
    /// Kind of the retagged workload.
    pub kind: WorkloadKind,
    /// Image before the rewrite.
    pub from: ImageReference,
    /// Image after the rewrite.
    pub to: ImageReference,
}

/// Set the image tag of every workload in `text` to `target_tag`.
///
/// Empty documents (such as the one produced by a leading `---`) are
/// ignored. Reaching the end without retagging anything is not an error;
/// callers decide what an unchanged outcome means. An unchanged outcome
/// carries `text` as-is.
///
/// # Errors
/// Returns `Yaml` if the text does not parse, and `TooManyContainers`,
/// `MalformedWorkload` or `InvalidImageFormat` for a workload that does
/// not have exactly one well-formed container.
pub fn patch_manifest(text: &str, target_tag: &str) -> Result<PatchOutcome> {
    let mut content = String::with_capacity(text.len());
    let mut replaced_tags = BTreeSet::new();

    for span in split_documents(text) {
        content.push_str(&patch_span(span, target_tag, &mut replaced_tags)?);
    }

    Ok(PatchOutcome {
        content,
        replaced_tags,
    })
}

/// Retag a single parsed document if it is a workload.
///
/// Returns the applied rewrite, or `None` when the document is not a
/// workload or already carries `target_tag`.
///
/// # Errors
/// See [`patch_manifest`].
pub fn retag_workload(document: &mut Value, target_tag: &str) -> Result<Option<Retag>> {
    let Some(kind) = WorkloadKind::of(document) else {
        return Ok(None);
    };

    let container = match kind.containers_mut(document)?.as_mut_slice() {
        [container] => container,
        [] => {
            return Err(Error::MalformedWorkload {
                kind,
                reason: "container list is empty".into(),
            });
        }
        containers => {
            return Err(Error::TooManyContainers {
                kind,
                count: containers.len(),
            });
        }
    };

    let image_field = container
        .get_mut("image")
        .ok_or_else(|| Error::MalformedWorkload {
            kind,
            reason: "container has no `image`".into(),
        })?;
    let image: ImageReference = image_field
        .as_str()
        .ok_or_else(|| Error::MalformedWorkload {
            kind,
            reason: "`image` is not a string".into(),
        })?
        .parse()?;

    if image.tag == target_tag {
        return Ok(None);
    }

    let retagged = image.with_tag(target_tag);
    *image_field = Value::String(retagged.to_string());
    Ok(Some(Retag {
        kind,
        from: image,
        to: retagged,
    }))
}

/// Retag the workloads of one document span, editing its text.
fn patch_span(span: &str, target_tag: &str, replaced_tags: &mut BTreeSet<String>) -> Result<String> {
    let mut content = span.to_string();
    let mut documents = parse_documents(span)?;

    for index in 0..documents.len() {
        let mut expected = documents.clone();
        let Some(retag) = retag_workload(&mut expected[index], target_tag)? else {
            continue;
        };
        content = replace_image(&content, &retag, &expected)?;
        documents = expected;
        replaced_tags.insert(retag.from.tag);
    }

    Ok(content)
}

/// Rewrite the occurrence of the old image that is the image scalar.
///
/// Each textual occurrence is tried in turn; the one whose replacement
/// parses to exactly `expected` wins. Occurrences elsewhere (an annotation
/// naming the same image, a longer scalar containing it) are left alone.
fn replace_image(text: &str, retag: &Retag, expected: &[Value]) -> Result<String> {
    let from = retag.from.to_string();
    let to = retag.to.to_string();

    for (offset, _) in text.match_indices(&from) {
        let candidate = format!("{}{to}{}", &text[..offset], &text[offset + from.len()..]);
        if parse_documents(&candidate).is_ok_and(|documents| documents == expected) {
            return Ok(candidate);
        }
    }

    Err(Error::MalformedWorkload {
        kind: retag.kind,
        reason: format!("image `{from}` is not written as a plain or quoted scalar"),
    })
}

/// Split a YAML stream into per-document text spans.
///
/// A span starts at a `---` marker line and ends before the next one, or
/// after a `...` end marker. Concatenating the spans gives back `text`.
fn split_documents(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if is_marker(line, "---") && offset > start {
            spans.push(&text[start..offset]);
            start = offset;
        }
        offset += line.len();
        if is_marker(line, "...") {
            spans.push(&text[start..offset]);
            start = offset;
        }
    }
    if start < text.len() {
        spans.push(&text[start..]);
    }

    spans
}

/// Whether `line` is a document marker: the marker at column zero,
/// followed by whitespace or nothing.
fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Parse a YAML stream, discarding null documents.
fn parse_documents(text: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document)?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    Ok(documents)
}
