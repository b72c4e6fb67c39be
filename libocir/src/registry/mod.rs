//! The registry operations every component is written against.
//!
//! [`RegistryApi`] is implemented by [`ArtifactsClient`](crate::client::ArtifactsClient)
//! for the real service. Calls are blocking request/response round-trips; an
//! implementation keeps no state between calls and never retries.

use crate::error::Result;
use crate::model::{CompartmentId, Image, ImageId, Repository, RepositoryId};

/// Operations consumed from the remote artifact registry.
pub trait RegistryApi {
    /// Lists the repositories of a compartment, in registry order.
    ///
    /// With `display_name`, only repositories carrying exactly that name are
    /// returned.
    fn list_repositories(
        &self,
        compartment_id: &CompartmentId,
        display_name: Option<&str>,
    ) -> Result<Vec<Repository>>;

    /// Fetches repository metadata. Fails with `NotFound` if it does not exist.
    fn get_repository(&self, repository_id: &RepositoryId) -> Result<Repository>;

    /// Lists the images of a repository, newest first.
    ///
    /// The ordering is requested from the registry itself; callers rely on it
    /// and do not re-sort.
    fn list_images(
        &self,
        repository_id: &RepositoryId,
        compartment_id: &CompartmentId,
    ) -> Result<Vec<Image>>;

    /// Deletes one image.
    fn delete_image(&self, image_id: &ImageId) -> Result<()>;
}
