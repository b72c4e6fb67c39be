//! Flags shared by both binaries.

use crate::context::VerbosityLevel;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Profile file (defaults to ~/.ocir/config.yaml when it exists)
    #[arg(long, global = true, env = "OCIR_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn verbosity(&self) -> VerbosityLevel {
        VerbosityLevel::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_verbose_is_counted() {
        let cli = TestCli::parse_from(["test", "-vv"]);
        assert_eq!(cli.common.verbose, 2);
        assert_eq!(cli.common.verbosity(), VerbosityLevel::Trace);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(TestCli::try_parse_from(["test", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_profile_flag() {
        let cli = TestCli::parse_from(["test", "--profile", "/tmp/profile.yaml"]);
        assert_eq!(cli.common.profile, Some(PathBuf::from("/tmp/profile.yaml")));
        assert_eq!(cli.common.verbosity(), VerbosityLevel::Normal);
    }
}
