//! Application context that holds the resolved profile
//!
//! The profile is resolved with the following precedence:
//! 1. Built-in defaults
//! 2. Profile file (`--profile`, or `~/.ocir/config.yaml` when it exists)
//! 3. `OCIR_*` environment variables
//!
//! Once built, the context is passed as read-only to the commands.

use libocir::{Config, Result};
use std::path::{Path, PathBuf};

/// How much the binaries print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl VerbosityLevel {
    /// Maps the `-v` count and `-q` flag to a level.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    pub fn is_quiet(&self) -> bool {
        *self == Self::Quiet
    }
}

/// Returns the default profile location, `~/.ocir/config.yaml`.
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ocir").join("config.yaml"))
}

/// Application context with resolved configuration
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Loads the profile.
    ///
    /// An explicit profile must exist; the default one is optional.
    pub fn build(profile: Option<&Path>, verbosity: VerbosityLevel) -> Result<Self> {
        let path = match profile {
            Some(p) => Some(p.to_path_buf()),
            None => default_profile_path().filter(|p| p.exists()),
        };

        match &path {
            Some(p) => tracing::debug!("Loading profile from {}", p.display()),
            None => tracing::debug!("No profile file, using environment only"),
        }

        let config = Config::load(path.as_deref())?;
        Ok(Self { config, verbosity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(VerbosityLevel::from_flags(0, false), VerbosityLevel::Normal);
        assert_eq!(VerbosityLevel::from_flags(1, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(2, false), VerbosityLevel::Trace);
        assert_eq!(VerbosityLevel::from_flags(5, false), VerbosityLevel::Trace);
        assert_eq!(VerbosityLevel::from_flags(0, true), VerbosityLevel::Quiet);
        assert!(VerbosityLevel::Quiet.is_quiet());
    }

    #[test]
    fn test_default_profile_path() {
        if let Some(path) = default_profile_path() {
            assert!(path.ends_with(".ocir/config.yaml"));
        }
    }

    #[test]
    fn test_build_with_explicit_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile.yaml");
        fs::write(
            &profile,
            "registry:\n  endpoint: http://localhost:9000\nauth:\n  token: abc\n",
        )
        .unwrap();

        let ctx = AppContext::build(Some(&profile), VerbosityLevel::Verbose).unwrap();

        assert_eq!(ctx.verbosity, VerbosityLevel::Verbose);
        assert_eq!(ctx.config.endpoint().unwrap(), "http://localhost:9000");
    }

    #[test]
    fn test_build_with_missing_explicit_profile_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");

        let err = AppContext::build(Some(&missing), VerbosityLevel::Normal).unwrap_err();
        assert!(err.is_config());
    }
}
