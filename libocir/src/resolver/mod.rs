//! Repository name resolution.
//!
//! Retention works on repository identifiers, while operators think in
//! display names. Display names are not guaranteed to be unique inside a
//! compartment, so resolution makes the ambiguous case explicit.

use crate::error::Result;
use crate::model::{CompartmentId, Repository};
use crate::registry::RegistryApi;


/// What to do when several repositories share a display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Report the name as ambiguous and resolve nothing.
    #[default]
    Reject,
    /// Take the first repository in registry order.
    FirstMatch,
}

/// Outcome of resolving a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one repository matched (or the first one, under
    /// [`AmbiguityPolicy::FirstMatch`]).
    Found(Repository),
    /// No repository carries this name.
    NotFound,
    /// Several repositories carry this name, in registry order.
    Ambiguous(Vec<Repository>),
}

/// Resolves a repository display name within a compartment.
///
/// Not finding the repository is a [`Resolution`], not an error; errors are
/// reserved for failed registry calls.
///
/// # Examples
///
/// ```no_run
/// use libocir::{AmbiguityPolicy, ArtifactsClient, Config, Resolution};
/// use libocir::resolver::resolve_repository;
///
/// # fn main() -> libocir::Result<()> {
/// let client = ArtifactsClient::from_config(&Config::load(None)?)?;
/// let compartment = "ocid1.compartment.oc1..example".parse()?;
///
/// match resolve_repository(&client, &compartment, "team/api", AmbiguityPolicy::Reject)? {
///     Resolution::Found(repo) => println!("{}", repo.id),
///     Resolution::NotFound => println!("no such repository"),
///     Resolution::Ambiguous(repos) => println!("{} repositories share that name", repos.len()),
/// }
/// # Ok(())
/// # }
/// ```
pub fn resolve_repository(
    api: &impl RegistryApi,
    compartment_id: &CompartmentId,
    name: &str,
    policy: AmbiguityPolicy,
) -> Result<Resolution> {
    let mut matches: Vec<Repository> = api
        .list_repositories(compartment_id, Some(name))?
        .into_iter()
        // Only exact matches count, whatever the registry filter does
        .filter(|repo| repo.display_name == name)
        .collect();

    let resolution = match (matches.len(), policy) {
        (0, _) => Resolution::NotFound,
        (1, _) | (_, AmbiguityPolicy::FirstMatch) => Resolution::Found(matches.remove(0)),
        (_, AmbiguityPolicy::Reject) => Resolution::Ambiguous(matches),
    };

    tracing::debug!(name, ?resolution, "resolved repository name");
    Ok(resolution)
}
