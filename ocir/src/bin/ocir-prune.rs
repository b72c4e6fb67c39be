use clap::Parser;
use ocir::cli::CommonArgs;
use ocir::commands::prune::{self, PruneArgs};
use ocir::context::AppContext;
use ocir::{format, logging};

/// ocir-prune - delete the oldest images of container repositories
///
/// Reads repository names from a file, one per line, and keeps only the
/// newest images of each repository.
#[derive(Parser, Debug)]
#[command(name = "ocir-prune")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    prune: PruneArgs,

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

    match prune::run(&ctx, &cli.prune) {
        Ok(report) => prune::print_summary(formatter.as_ref(), verbosity, &report),
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}
