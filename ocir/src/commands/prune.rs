//! `ocir-prune`: keep the newest images of each listed repository.

use super::{build_client, parse_compartment};
use crate::context::{AppContext, VerbosityLevel};
use crate::format::OutputFormatter;
use clap::Args;
use libocir::batch::{BatchOptions, BatchOutcome, BatchReport, read_repository_list, run_batch};
use libocir::retention::{DEFAULT_RETAIN_COUNT, RetentionReport};
use libocir::{AmbiguityPolicy, Result, RetentionPolicy};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    /// Compartment holding the repositories
    #[arg(long, env = "OCIR_COMPARTMENT_ID")]
    pub compartment_id: String,

    /// File with one repository name per line
    #[arg(long, env = "OCIR_REPO_LIST_FILE", default_value = "repositories.txt")]
    pub repo_list_file: PathBuf,

    /// Number of newest images to keep in each repository
    #[arg(long, env = "OCIR_RETAIN_COUNT", default_value_t = DEFAULT_RETAIN_COUNT)]
    pub retain_count: usize,

    /// Show what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// When several repositories share a name, use the first one
    #[arg(long)]
    pub first_match: bool,
}

impl PruneArgs {
    /// Validates the arguments into batch options.
    pub fn batch_options(&self) -> Result<BatchOptions> {
        let compartment_id = parse_compartment(&self.compartment_id)?;
        let policy = RetentionPolicy::new(self.retain_count)?.with_dry_run(self.dry_run);
        let ambiguity = if self.first_match {
            AmbiguityPolicy::FirstMatch
        } else {
            AmbiguityPolicy::Reject
        };
        Ok(BatchOptions::new(compartment_id, policy).with_ambiguity(ambiguity))
    }
}

/// Runs the batch.
///
/// Errors returned here are fatal and happen before any delete call:
/// invalid arguments, an unreadable repository list or an incomplete profile.
pub fn run(ctx: &AppContext, args: &PruneArgs) -> Result<BatchReport> {
    let options = args.batch_options()?;
    let names = read_repository_list(&args.repo_list_file)?;
    tracing::debug!(
        "Read {} repository names from {}",
        names.len(),
        args.repo_list_file.display()
    );

    let client = build_client(ctx)?;
    Ok(run_batch(&client, &names, &options))
}

/// One line of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryLine {
    Success(String),
    Warning(String),
    Error(String),
}

/// Builds the summary of a batch, one or more lines per repository name.
pub fn summarize(report: &BatchReport) -> Vec<SummaryLine> {
    let mut lines = Vec::new();

    for entry in &report.entries {
        match &entry.outcome {
            BatchOutcome::Enforced(retention) => {
                summarize_retention(&entry.name, retention, &mut lines)
            }
            BatchOutcome::NotFound => lines.push(SummaryLine::Warning(format!(
                "{}: repository not found",
                entry.name
            ))),
            BatchOutcome::Ambiguous(count) => lines.push(SummaryLine::Warning(format!(
                "{}: name matches {} repositories, skipped (use --first-match to pick the first)",
                entry.name, count
            ))),
            BatchOutcome::Failed(e) => {
                lines.push(SummaryLine::Error(format!("{}: {}", entry.name, e)))
            }
        }
    }

    let total = report.entries.len();
    let totals = if report.images_planned() > 0 {
        format!(
            "Processed {} of {} repositories, {} images would be deleted",
            report.processed(),
            total,
            report.images_planned()
        )
    } else {
        format!(
            "Processed {} of {} repositories, deleted {} images",
            report.processed(),
            total,
            report.images_deleted()
        )
    };

    if report.processed() == total && report.image_failures() == 0 {
        lines.push(SummaryLine::Success(totals));
    } else {
        lines.push(SummaryLine::Warning(totals));
    }
    lines
}

fn summarize_retention(name: &str, report: &RetentionReport, lines: &mut Vec<SummaryLine>) {
    if report.nothing_to_delete() {
        lines.push(SummaryLine::Success(format!(
            "{}: {} images, nothing to delete",
            name, report.image_count
        )));
        return;
    }

    if report.dry_run {
        lines.push(SummaryLine::Success(format!(
            "{}: would delete {} of {} images",
            name,
            report.planned_count(),
            report.image_count
        )));
        return;
    }

    lines.push(SummaryLine::Success(format!(
        "{}: deleted {} of {} images",
        name,
        report.deleted_count(),
        report.image_count
    )));
    for (image, error) in report.failures() {
        lines.push(SummaryLine::Warning(format!(
            "{}: failed to delete {}: {}",
            name, image.display_name, error
        )));
    }
}

/// Prints the summary. Success lines are dropped in quiet mode.
pub fn print_summary(
    formatter: &dyn OutputFormatter,
    verbosity: VerbosityLevel,
    report: &BatchReport,
) {
    for line in summarize(report) {
        match line {
            SummaryLine::Success(msg) if !verbosity.is_quiet() => formatter.success(&msg),
            SummaryLine::Success(_) => {}
            SummaryLine::Warning(msg) => formatter.warning(&msg),
            SummaryLine::Error(msg) => formatter.error(&msg),
        }
    }
}
