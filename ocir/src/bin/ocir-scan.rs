use clap::Parser;
use ocir::cli::CommonArgs;
use ocir::commands::scan::{self, ScanArgs};
use ocir::context::AppContext;
use ocir::{format, logging};

/// ocir-scan - find container repositories holding too many images
///
/// Lists every repository of a compartment and reports those with more
/// images than the limit. Nothing is deleted.
#[derive(Parser, Debug)]
#[command(name = "ocir-scan")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    scan: ScanArgs,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.common.verbosity();
    logging::init(verbosity);
    let formatter = format::create_formatter();

    let ctx = match AppContext::build(cli.common.profile.as_deref(), verbosity) {
        Ok(ctx) => ctx,
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let report = match scan::run(&ctx, formatter.as_ref(), &cli.scan) {
        Ok(report) => report,
        Err(e) => {
            formatter.error(&format!("Failed to scan repositories: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = scan::print_report(formatter.as_ref(), &report, cli.scan.format) {
        formatter.error(&e);
        std::process::exit(1);
    }
}
