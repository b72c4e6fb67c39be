pub mod prune;
pub mod scan;

use crate::context::AppContext;
use libocir::{ArtifactsClient, CompartmentId, Result};

/// Parses the compartment identifier given on the command line.
fn parse_compartment(value: &str) -> Result<CompartmentId> {
    value.trim().parse()
}

/// Builds the registry client from the resolved profile.
fn build_client(ctx: &AppContext) -> Result<ArtifactsClient> {
    let client = ArtifactsClient::from_config(&ctx.config)?;
    tracing::debug!("Using Artifacts endpoint {}", client.base_url());
    Ok(client)
}
