//! Command-line front end for libocir.
//!
//! Two binaries share this crate: `ocir-prune` deletes the oldest images of
//! a list of repositories and `ocir-scan` reports repositories holding more
//! images than a limit.

pub mod cli;
pub mod commands;
pub mod context;
pub mod format;
pub mod logging;
