//! Container image references.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A container image reference split into repository name and tag.
///
/// Only the plain `name:tag` form is accepted: the string must contain
/// exactly one `:`. Registry hosts with a port (`host:5000/img:tag`) and
/// untagged images are rejected as [`Error::InvalidImageFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    /// Repository name, including any registry host.
    pub name: String,
    /// Image tag.
    pub tag: String,
}

impl ImageReference {
    /// Return the same image with a different tag.
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            tag: tag.into(),
        }
    }
}

impl FromStr for ImageReference {
    type Err = Error;

    fn from_str(image: &str) -> Result<Self, Self::Err> {
        let mut parts = image.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(tag), None) => Ok(Self {
                name: name.to_string(),
                tag: tag.to_string(),
            }),
            _ => Err(Error::InvalidImageFormat(image.to_string())),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
