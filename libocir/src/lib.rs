//! libocir - Container Registry Retention Library
//!
//! libocir talks to the Oracle Cloud Infrastructure Artifacts API to keep
//! container repositories tidy: it deletes images beyond a retention count and
//! audits which repositories hold more images than a threshold.
//!
//! # Quick Start
//!
//! ```no_run
//! use libocir::{ArtifactsClient, CompartmentId, Config, RetentionPolicy};
//! use libocir::batch::{BatchOptions, run_batch};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let client = ArtifactsClient::from_config(&config)?;
//!
//!     let options = BatchOptions::new(
//!         "ocid1.compartment.oc1..example".parse::<CompartmentId>()?,
//!         RetentionPolicy::new(10)?,
//!     );
//!     let report = run_batch(&client, &["my-app".to_string()], &options);
//!     println!("Deleted {} images", report.images_deleted());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`client`] - blocking HTTP adapter for the Artifacts API
//! - [`registry`] - the [`RegistryApi`] trait every component calls through
//! - [`resolver`] - maps repository display names to identifiers
//! - [`retention`] - keeps the newest N images of a repository
//! - [`batch`] - applies retention to a list of repository names
//! - [`scan`] - reports repositories over an image-count threshold

#![warn(clippy::all)]

/// Returns the libocir crate version.
///
/// # Examples
///
/// ```
/// let version = libocir::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use auth::Credentials;
pub use client::{ArtifactsClient, ClientConfig};
pub use config::Config;
pub use error::{OcirError, Result};
pub use model::{CompartmentId, Image, ImageId, Repository, RepositoryId};
pub use registry::RegistryApi;
pub use resolver::{AmbiguityPolicy, Resolution};
pub use retention::RetentionPolicy;

pub mod auth;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod retention;
pub mod scan;

#[cfg(test)]
pub(crate) mod testing;
