// Shared helpers for the binary tests.
#![allow(dead_code)]

use assert_cmd::Command;

pub const COMPARTMENT: &str = "ocid1.compartment.oc1..test";

/// Isolates a binary from the user's profile and environment and points it
/// at `endpoint`.
pub fn configure(mut cmd: Command, home: &std::path::Path, endpoint: &str) -> Command {
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env("OCIR_REGISTRY__ENDPOINT", endpoint)
        .env("OCIR_AUTH__TOKEN", "test-token")
        .env("OCIR_COMPARTMENT_ID", COMPARTMENT)
        .env_remove("RUST_LOG")
        .env_remove("OCIR_PROFILE")
        .env_remove("OCIR_RETAIN_COUNT")
        .env_remove("OCIR_IMAGE_LIMIT")
        .env_remove("OCIR_REPO_LIST_FILE");
    cmd
}

pub fn repository_id(slug: &str) -> String {
    format!("ocid1.containerrepo.oc1..{}", slug)
}

pub fn image_id(slug: &str, version: usize) -> String {
    format!("ocid1.containerimage.oc1..{}-{}", slug, version)
}

pub fn repository_json(slug: &str, name: &str) -> String {
    format!(
        r#"{{"id":"{}","displayName":"{}","compartmentId":"{}"}}"#,
        repository_id(slug),
        name,
        COMPARTMENT
    )
}

pub fn collection(items: &[String]) -> String {
    format!(r#"{{"items":[{}]}}"#, items.join(","))
}

/// `count` images of a repository, newest first, named `<name>:v<i>`.
pub fn images_json(slug: &str, name: &str, count: usize) -> String {
    let items: Vec<String> = (0..count)
        .rev()
        .map(|i| {
            format!(
                r#"{{"id":"{}","displayName":"{}:v{}","repositoryId":"{}","timeCreated":"2024-01-01T{:02}:00:00Z"}}"#,
                image_id(slug, i),
                name,
                i,
                repository_id(slug),
                i
            )
        })
        .collect();
    collection(&items)
}
