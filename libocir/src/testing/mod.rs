//! In-memory registry used by the component tests.

use crate::error::{OcirError, Result};
use crate::model::{CompartmentId, Image, ImageId, Repository, RepositoryId};
use crate::registry::RegistryApi;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashSet;

pub(crate) const COMPARTMENT: &str = "ocid1.compartment.oc1..test";

struct StoredRepository {
    repository: Repository,
    /// Newest first, as the registry lists them.
    images: Vec<Image>,
}

/// Fake registry holding repositories and images in memory.
///
/// Image `i` of a repository with `n` images is named `<name>:v<i>`, with
/// `v0` the oldest and `v<n-1>` the newest.
#[derive(Default)]
pub(crate) struct FakeRegistry {
    repositories: RefCell<Vec<StoredRepository>>,
    failing_deletes: HashSet<ImageId>,
    failing_image_lists: HashSet<RepositoryId>,
    fail_repository_listing: bool,
    /// Every delete call, successful or not, in call order.
    pub delete_calls: RefCell<Vec<ImageId>>,
    /// Number of `get_repository` calls.
    pub metadata_calls: RefCell<usize>,
}

pub(crate) fn compartment() -> CompartmentId {
    COMPARTMENT.parse().expect("valid compartment id")
}

fn slug(name: &str) -> String {
    name.replace('/', "-")
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

impl FakeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a repository holding `image_count` images.
    pub(crate) fn with_repository(self, name: &str, image_count: usize) -> Self {
        let index = self.repositories.borrow().len();
        let repository_id: RepositoryId = format!("ocid1.containerrepo.oc1..{}-{}", slug(name), index)
            .parse()
            .expect("valid repository id");

        let images = (0..image_count)
            .rev()
            .map(|i| Image {
                id: format!("ocid1.containerimage.oc1..{}-{}-{}", slug(name), index, i)
                    .parse()
                    .expect("valid image id"),
                display_name: format!("{}:v{}", name, i),
                time_created: base_time() + Duration::hours(i as i64),
                repository_id: repository_id.clone(),
                digest: None,
                version: Some(format!("v{}", i)),
            })
            .collect();

        self.repositories.borrow_mut().push(StoredRepository {
            repository: Repository {
                id: repository_id,
                display_name: name.to_string(),
                compartment_id: compartment(),
                image_count: Some(image_count as u64),
                time_created: Some(base_time()),
            },
            images,
        });
        self
    }

    /// Makes deleting the image `<name>:v<version>` fail.
    pub(crate) fn fail_delete(mut self, name: &str, version: usize) -> Self {
        let id = self.image_id(name, version);
        self.failing_deletes.insert(id);
        self
    }

    /// Makes listing the images of `name` fail.
    pub(crate) fn fail_image_list(mut self, name: &str) -> Self {
        let id = self.repository_id(name);
        self.failing_image_lists.insert(id);
        self
    }

    /// Makes every `list_repositories` call fail.
    pub(crate) fn fail_repository_listing(mut self) -> Self {
        self.fail_repository_listing = true;
        self
    }

    /// Identifier of the first repository called `name`.
    pub(crate) fn repository_id(&self, name: &str) -> RepositoryId {
        self.repositories
            .borrow()
            .iter()
            .find(|r| r.repository.display_name == name)
            .map(|r| r.repository.id.clone())
            .expect("repository exists")
    }

    /// Identifier of image `<name>:v<version>`, whether or not it still exists.
    pub(crate) fn image_id(&self, name: &str, version: usize) -> ImageId {
        let repos = self.repositories.borrow();
        let index = repos
            .iter()
            .position(|r| r.repository.display_name == name)
            .expect("repository exists");
        format!("ocid1.containerimage.oc1..{}-{}-{}", slug(name), index, version)
            .parse()
            .expect("valid image id")
    }

    /// Display names of the images still stored for `name`, newest first.
    pub(crate) fn remaining(&self, name: &str) -> Vec<String> {
        self.repositories
            .borrow()
            .iter()
            .find(|r| r.repository.display_name == name)
            .map(|r| r.images.iter().map(|i| i.display_name.clone()).collect())
            .unwrap_or_default()
    }
}

impl RegistryApi for FakeRegistry {
    fn list_repositories(
        &self,
        compartment_id: &CompartmentId,
        display_name: Option<&str>,
    ) -> Result<Vec<Repository>> {
        if self.fail_repository_listing {
            return Err(OcirError::server("listing unavailable", 503));
        }

        Ok(self
            .repositories
            .borrow()
            .iter()
            .map(|r| &r.repository)
            .filter(|r| &r.compartment_id == compartment_id)
            .filter(|r| display_name.is_none_or(|name| r.display_name == name))
            .cloned()
            .collect())
    }

    fn get_repository(&self, repository_id: &RepositoryId) -> Result<Repository> {
        *self.metadata_calls.borrow_mut() += 1;
        self.repositories
            .borrow()
            .iter()
            .find(|r| &r.repository.id == repository_id)
            .map(|r| r.repository.clone())
            .ok_or_else(|| OcirError::not_found("repository", repository_id.as_str()))
    }

    fn list_images(
        &self,
        repository_id: &RepositoryId,
        _compartment_id: &CompartmentId,
    ) -> Result<Vec<Image>> {
        if self.failing_image_lists.contains(repository_id) {
            return Err(OcirError::server("image listing failed", 500));
        }

        self.repositories
            .borrow()
            .iter()
            .find(|r| &r.repository.id == repository_id)
            .map(|r| r.images.clone())
            .ok_or_else(|| OcirError::not_found("repository", repository_id.as_str()))
    }

    fn delete_image(&self, image_id: &ImageId) -> Result<()> {
        self.delete_calls.borrow_mut().push(image_id.clone());

        if self.failing_deletes.contains(image_id) {
            return Err(OcirError::server("delete rejected", 500));
        }

        let mut repos = self.repositories.borrow_mut();
        for stored in repos.iter_mut() {
            if let Some(pos) = stored.images.iter().position(|i| &i.id == image_id) {
                stored.images.remove(pos);
                return Ok(());
            }
        }
        Err(OcirError::not_found("image", image_id.as_str()))
    }
}
