//! Threshold scan over every repository of a compartment.
//!
//! A read-only report: repositories holding more images than a limit are
//! listed, nothing is deleted.

use crate::error::{OcirError, Result};
use crate::model::{CompartmentId, RepositoryId};
use crate::registry::RegistryApi;
use serde::Serialize;


/// Image count above which a repository is reported.
pub const DEFAULT_IMAGE_LIMIT: usize = 10;

/// A repository over the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdHit {
    pub name: String,
    pub image_count: usize,
    pub repository_id: RepositoryId,
}

/// A repository whose images could not be counted.
#[derive(Debug)]
pub struct ScanFailure {
    pub name: String,
    pub repository_id: RepositoryId,
    pub error: OcirError,
}

/// Result of a scan, in registry listing order.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub limit: usize,
    /// Number of repositories whose images were counted.
    pub scanned: usize,
    pub over_limit: Vec<ThresholdHit>,
    pub failures: Vec<ScanFailure>,
}

/// Lists the repositories of a compartment holding more than `limit` images.
///
/// Fails only when the repositories themselves cannot be listed. A repository
/// whose image listing fails is recorded in [`ScanReport::failures`].
pub fn scan_repositories(
    api: &impl RegistryApi,
    compartment_id: &CompartmentId,
    limit: usize,
) -> Result<ScanReport> {
    let repositories = api.list_repositories(compartment_id, None)?;
    tracing::debug!(
        count = repositories.len(),
        %compartment_id,
        "listed repositories"
    );

    let mut report = ScanReport {
        limit,
        ..ScanReport::default()
    };

    for repository in repositories {
        match api.list_images(&repository.id, compartment_id) {
            Ok(images) => {
                report.scanned += 1;
                let image_count = images.len();
                tracing::debug!(
                    "Repository {} has {} images",
                    repository.display_name,
                    image_count
                );
                if image_count > limit {
                    report.over_limit.push(ThresholdHit {
                        name: repository.display_name,
                        image_count,
                        repository_id: repository.id,
                    });
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Error listing images of repository {}: {}",
                    repository.display_name,
                    e
                );
                report.failures.push(ScanFailure {
                    name: repository.display_name,
                    repository_id: repository.id,
                    error: e,
                });
            }
        }
    }

    Ok(report)
}
