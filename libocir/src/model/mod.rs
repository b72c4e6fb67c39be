//! Registry resources: identifiers, repositories and images.
//!
//! The record types double as wire types: they deserialize directly from the
//! camelCase summaries the Artifacts API returns.

use crate::error::{OcirError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


macro_rules! ocid_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = OcirError;

            fn from_str(s: &str) -> Result<Self> {
                validate_ocid(s, $kind)?;
                Ok(Self(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

ocid_type!(
    /// Identifier of the compartment that scopes every registry call.
    CompartmentId,
    "compartment"
);

ocid_type!(
    /// Identifier of a container repository, unique within its compartment.
    RepositoryId,
    "repository"
);

ocid_type!(
    /// Identifier of a container image, unique within its repository.
    ImageId,
    "image"
);

/// Identifiers are opaque, but an empty one or one with whitespace can only
/// come from a broken input and would produce a malformed request URL.
fn validate_ocid(s: &str, kind: &str) -> Result<()> {
    if s.is_empty() {
        return Err(OcirError::validation(format!(
            "Invalid {} identifier: cannot be empty",
            kind
        )));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(OcirError::validation(format!(
            "Invalid {} identifier '{}': contains whitespace",
            kind, s
        )));
    }
    Ok(())
}

/// A container repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: RepositoryId,
    /// Display name; not guaranteed to be unique within a compartment.
    pub display_name: String,
    pub compartment_id: CompartmentId,
    /// Image count as reported by the registry (may lag behind listings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
}

/// A container image inside a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub display_name: String,
    pub time_created: DateTime<Utc>,
    pub repository_id: RepositoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Tag the image was pushed with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
