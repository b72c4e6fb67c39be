//! `ocir-scan`: report repositories holding more images than a limit.

use super::{build_client, parse_compartment};
use crate::context::AppContext;
use crate::format::{Formattable, OutputFormat, OutputFormatter};
use clap::Args;
use libocir::Result;
use libocir::scan::{DEFAULT_IMAGE_LIMIT, ScanFailure, ScanReport, ThresholdHit, scan_repositories};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Compartment to scan
    #[arg(long, env = "OCIR_COMPARTMENT_ID")]
    pub compartment_id: String,

    /// Report repositories with more images than this
    #[arg(long, env = "OCIR_IMAGE_LIMIT", default_value_t = DEFAULT_IMAGE_LIMIT)]
    pub limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Scans the compartment.
///
/// Fails when the profile is incomplete or the repositories cannot be listed.
pub fn run(ctx: &AppContext, formatter: &dyn OutputFormatter, args: &ScanArgs) -> Result<ScanReport> {
    let compartment_id = parse_compartment(&args.compartment_id)?;
    let client = build_client(ctx)?;

    // Keep structured output clean
    let spinner = (args.format == OutputFormat::Pretty)
        .then(|| formatter.spinner(&format!("Scanning repositories in {}...", compartment_id)));

    let result = scan_repositories(&client, &compartment_id, args.limit);

    if let Some(spinner) = spinner {
        match &result {
            Ok(report) => formatter.finish_progress(
                spinner,
                &format!("Scanned {} repositories", report.scanned),
            ),
            Err(_) => spinner.finish_and_clear(),
        }
    }
    result
}

/// A repository over the limit, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ScanRow {
    #[tabled(rename = "REPOSITORY")]
    pub name: String,

    #[tabled(rename = "IMAGES")]
    pub image_count: usize,

    #[tabled(rename = "OCID")]
    pub repository_id: String,
}

impl From<&ThresholdHit> for ScanRow {
    fn from(hit: &ThresholdHit) -> Self {
        Self {
            name: hit.name.clone(),
            image_count: hit.image_count,
            repository_id: hit.repository_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRow {
    pub name: String,
    pub repository_id: String,
    pub error: String,
}

impl From<&ScanFailure> for FailureRow {
    fn from(failure: &ScanFailure) -> Self {
        Self {
            name: failure.name.clone(),
            repository_id: failure.repository_id.to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// Printable form of a [`ScanReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutput {
    pub limit: usize,
    pub repositories: Vec<ScanRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureRow>,
}

impl From<&ScanReport> for ScanOutput {
    fn from(report: &ScanReport) -> Self {
        Self {
            limit: report.limit,
            repositories: report.over_limit.iter().map(ScanRow::from).collect(),
            failures: report.failures.iter().map(FailureRow::from).collect(),
        }
    }
}

impl Formattable for ScanOutput {
    fn format_pretty(&self) -> String {
        if self.repositories.is_empty() {
            return format!("No repositories with more than {} images.", self.limit);
        }

        let table = Table::new(&self.repositories).with(Style::empty()).to_string();
        format!(
            "Repositories with more than {} images:\n{}",
            self.limit, table
        )
    }
}

/// Prints the report in the requested format.
///
/// Repositories that could not be counted are reported as warnings.
pub fn print_report(
    formatter: &dyn OutputFormatter,
    report: &ScanReport,
    format: OutputFormat,
) -> std::result::Result<(), String> {
    let output = ScanOutput::from(report);
    println!("{}", crate::format::format_output(&output, format)?);

    for failure in &output.failures {
        formatter.warning(&format!(
            "Could not count images of {}: {}",
            failure.name, failure.error
        ));
    }
    Ok(())
}
