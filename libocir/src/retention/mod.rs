//! Image retention for a single repository.
//!
//! The enforcer keeps the `retain_count` newest images of a repository and
//! deletes the rest. Deletion is best-effort: every image in the deletion set
//! is attempted, a failure is recorded in the report and never stops the
//! remaining deletions, and nothing is rolled back.

use crate::error::{OcirError, Result};
use crate::model::{CompartmentId, Image, Repository, RepositoryId};
use crate::registry::RegistryApi;


/// Number of images kept when nothing else is configured.
pub const DEFAULT_RETAIN_COUNT: usize = 10;

/// How many images to keep, and whether to actually delete the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retain_count: usize,
    dry_run: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            retain_count: DEFAULT_RETAIN_COUNT,
            dry_run: false,
        }
    }
}

impl RetentionPolicy {
    /// Creates a policy keeping the `retain_count` newest images.
    ///
    /// A retain count of zero would empty the repository and is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use libocir::RetentionPolicy;
    ///
    /// let policy = RetentionPolicy::new(5).unwrap().with_dry_run(true);
    /// assert_eq!(policy.retain_count(), 5);
    /// assert!(policy.is_dry_run());
    ///
    /// assert!(RetentionPolicy::new(0).is_err());
    /// ```
    pub fn new(retain_count: usize) -> Result<Self> {
        if retain_count == 0 {
            return Err(OcirError::validation("Retain count must be at least 1"));
        }
        Ok(Self {
            retain_count,
            dry_run: false,
        })
    }

    /// Only report what would be deleted.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn retain_count(&self) -> usize {
        self.retain_count
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// What happened to one image of the deletion set.
#[derive(Debug)]
pub enum DeletionStatus {
    Deleted,
    /// Selected for deletion in a dry run; no delete call was made.
    Planned,
    Failed(OcirError),
}

/// One image of the deletion set and its outcome.
#[derive(Debug)]
pub struct ImageDeletion {
    pub image: Image,
    pub status: DeletionStatus,
}

/// Result of enforcing retention on one repository.
#[derive(Debug)]
pub struct RetentionReport {
    pub repository: Repository,
    /// Images found in the repository before any deletion.
    pub image_count: usize,
    pub retain_count: usize,
    pub dry_run: bool,
    /// The deletion set, oldest last, in the order deletions were attempted.
    pub deletions: Vec<ImageDeletion>,
}

impl RetentionReport {
    /// True when the repository already held `retain_count` images or fewer.
    pub fn nothing_to_delete(&self) -> bool {
        self.deletions.is_empty()
    }

    pub fn deleted_count(&self) -> usize {
        self.count(|s| matches!(s, DeletionStatus::Deleted))
    }

    pub fn planned_count(&self) -> usize {
        self.count(|s| matches!(s, DeletionStatus::Planned))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, DeletionStatus::Failed(_)))
    }

    /// Images whose deletion failed, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (&Image, &OcirError)> {
        self.deletions.iter().filter_map(|d| match &d.status {
            DeletionStatus::Failed(e) => Some((&d.image, e)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&DeletionStatus) -> bool) -> usize {
        self.deletions.iter().filter(|d| pred(&d.status)).count()
    }
}

/// Returns the images outside the retained set.
///
/// `images` must be ordered newest first; the result is the tail starting at
/// index `retain_count`, or empty when there are not more images than that.
///
/// # Examples
///
/// ```
/// use libocir::retention::deletion_candidates;
///
/// let newest_first = ["v5", "v4", "v3", "v2", "v1"];
/// assert_eq!(deletion_candidates(&newest_first, 3), ["v2", "v1"]);
/// assert!(deletion_candidates(&newest_first, 5).is_empty());
/// ```
pub fn deletion_candidates<T>(images: &[T], retain_count: usize) -> &[T] {
    images.get(retain_count..).unwrap_or(&[])
}

/// Keeps the newest images of a repository and deletes the rest.
///
/// Fails without deleting anything if the repository metadata or its image
/// listing cannot be fetched. Once deletions start, the call always returns a
/// report; per-image failures are inside it.
pub fn enforce_retention(
    api: &impl RegistryApi,
    repository_id: &RepositoryId,
    compartment_id: &CompartmentId,
    policy: &RetentionPolicy,
) -> Result<RetentionReport> {
    let repository = api.get_repository(repository_id)?;
    tracing::info!(
        "Processing repository: {} ({})",
        repository.display_name,
        repository_id
    );

    let images = api.list_images(repository_id, compartment_id)?;
    let image_count = images.len();
    let retain_count = policy.retain_count();

    let candidates = deletion_candidates(&images, retain_count);
    if candidates.is_empty() {
        tracing::info!(
            "Repository {} already has {} images (retaining {}). Nothing to delete.",
            repository.display_name,
            image_count,
            retain_count
        );
        return Ok(RetentionReport {
            repository,
            image_count,
            retain_count,
            dry_run: policy.is_dry_run(),
            deletions: Vec::new(),
        });
    }

    let deletions = if policy.is_dry_run() {
        tracing::info!(
            "Would delete {} images in repository {} (dry run)",
            candidates.len(),
            repository.display_name
        );
        candidates
            .iter()
            .map(|image| {
                tracing::info!("Would delete image {}", image.display_name);
                ImageDeletion {
                    image: image.clone(),
                    status: DeletionStatus::Planned,
                }
            })
            .collect()
    } else {
        tracing::info!(
            "Deleting {} images in repository {}...",
            candidates.len(),
            repository.display_name
        );
        candidates
            .iter()
            .map(|image| ImageDeletion {
                image: image.clone(),
                status: delete_one(api, image),
            })
            .collect()
    };

    Ok(RetentionReport {
        repository,
        image_count,
        retain_count,
        dry_run: policy.is_dry_run(),
        deletions,
    })
}

fn delete_one(api: &impl RegistryApi, image: &Image) -> DeletionStatus {
    match api.delete_image(&image.id) {
        Ok(()) => {
            tracing::info!("Image {} deleted.", image.display_name);
            DeletionStatus::Deleted
        }
        Err(e) => {
            tracing::warn!("Error deleting image {}: {}", image.display_name, e);
            DeletionStatus::Failed(e)
        }
    }
}
