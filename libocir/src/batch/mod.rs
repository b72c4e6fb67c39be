//! Batch retention over a list of repository names.
//!
//! Names are processed sequentially in input order. Every failure is scoped to
//! the repository it happened in: a name that does not resolve, an ambiguous
//! name, or a repository whose metadata cannot be read is recorded and the
//! batch moves on to the next name.

use crate::error::{OcirError, Result};
use crate::model::CompartmentId;
use crate::registry::RegistryApi;
use crate::resolver::{AmbiguityPolicy, Resolution, resolve_repository};
use crate::retention::{RetentionPolicy, RetentionReport, enforce_retention};
use std::fs;
use std::path::Path;


/// Parses a line-delimited list of repository names.
///
/// Lines are trimmed and blank lines are skipped. Order is kept and
/// duplicates are not removed.
///
/// # Examples
///
/// ```
/// use libocir::batch::parse_repository_list;
///
/// let names = parse_repository_list("team/api\n\n  team/web  \nteam/api\n");
/// assert_eq!(names, ["team/api", "team/web", "team/api"]);
/// ```
pub fn parse_repository_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads and parses a repository list file.
///
/// An unreadable file is a configuration error.
pub fn read_repository_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        OcirError::config_with_source(
            "Failed to read repository list".to_string(),
            Some(path.display().to_string()),
            e,
        )
    })?;
    Ok(parse_repository_list(&contents))
}

/// Settings applied uniformly to every repository of a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub compartment_id: CompartmentId,
    pub policy: RetentionPolicy,
    pub ambiguity: AmbiguityPolicy,
}

impl BatchOptions {
    /// Creates options with the default ambiguity policy.
    pub fn new(compartment_id: CompartmentId, policy: RetentionPolicy) -> Self {
        Self {
            compartment_id,
            policy,
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }
}

/// What happened to one name of the batch.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Retention ran; per-image results are in the report.
    Enforced(RetentionReport),
    /// No repository carries this name.
    NotFound,
    /// Several repositories carry this name; none was touched.
    Ambiguous(usize),
    /// Resolving the name or reading the repository failed.
    Failed(OcirError),
}

/// One processed name.
#[derive(Debug)]
pub struct BatchEntry {
    pub name: String,
    pub outcome: BatchOutcome,
}

/// Results of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Names for which retention ran.
    pub fn processed(&self) -> usize {
        self.reports().count()
    }

    /// Names that matched no repository.
    pub fn not_found(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, BatchOutcome::NotFound))
            .count()
    }

    /// Names shared by several repositories and left untouched.
    pub fn ambiguous(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, BatchOutcome::Ambiguous(_)))
            .count()
    }

    /// Names whose processing failed before any deletion.
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, BatchOutcome::Failed(_)))
            .count()
    }

    pub fn images_deleted(&self) -> usize {
        self.reports().map(RetentionReport::deleted_count).sum()
    }

    pub fn images_planned(&self) -> usize {
        self.reports().map(RetentionReport::planned_count).sum()
    }

    /// Images whose deletion failed, across all repositories.
    pub fn image_failures(&self) -> usize {
        self.reports().map(RetentionReport::failed_count).sum()
    }

    /// Retention reports of the enforced repositories.
    pub fn reports(&self) -> impl Iterator<Item = &RetentionReport> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            BatchOutcome::Enforced(report) => Some(report),
            _ => None,
        })
    }
}

/// Applies the retention policy to every named repository.
///
/// Never fails as a whole: per-name problems are recorded in the report.
pub fn run_batch(api: &impl RegistryApi, names: &[String], options: &BatchOptions) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        let outcome = process_name(api, name, options);
        report.entries.push(BatchEntry {
            name: name.clone(),
            outcome,
        });
    }

    tracing::info!(
        processed = report.processed(),
        not_found = report.not_found(),
        ambiguous = report.ambiguous(),
        failed = report.failed(),
        "Batch finished"
    );
    report
}

fn process_name(api: &impl RegistryApi, name: &str, options: &BatchOptions) -> BatchOutcome {
    tracing::info!("Fetching OCID for the repository: {}", name);

    let resolution = match resolve_repository(api, &options.compartment_id, name, options.ambiguity)
    {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::error!("Error looking up repository {}: {}", name, e);
            return BatchOutcome::Failed(e);
        }
    };

    match resolution {
        Resolution::Found(repository) => {
            match enforce_retention(
                api,
                &repository.id,
                &options.compartment_id,
                &options.policy,
            ) {
                Ok(report) => BatchOutcome::Enforced(report),
                Err(e) => {
                    tracing::error!("Error processing repository {}: {}", repository.id, e);
                    BatchOutcome::Failed(e)
                }
            }
        }
        Resolution::NotFound => {
            tracing::warn!(
                "Repository {} not found in compartment {}.",
                name,
                options.compartment_id
            );
            BatchOutcome::NotFound
        }
        Resolution::Ambiguous(repositories) => {
            tracing::warn!(
                "Repository name {} matches {} repositories in compartment {}; skipping.",
                name,
                repositories.len(),
                options.compartment_id
            );
            BatchOutcome::Ambiguous(repositories.len())
        }
    }
}
