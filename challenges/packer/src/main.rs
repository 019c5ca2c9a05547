use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use packer::parser::{Limits, DEFAULT_MAX_CAPACITY, DEFAULT_MAX_CELLS, DEFAULT_MAX_ITEMS};

#[derive(Parser, Debug)]
#[command(name = "packer")]
#[command(about = "Pick the most valuable items that fit in each package", long_about = None)]
struct Cli {
    /// File with one package per line, e.g. `81 : (1,53.38,€45) (2,88.62,€98)`
    file: PathBuf,

    /// Packages solved in parallel, defaults to the number of logical cores
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Lines with a larger capacity are skipped
    #[arg(long, default_value_t = DEFAULT_MAX_CAPACITY)]
    max_capacity: usize,

    /// Lines with more items are skipped
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Lines whose items × (capacity + 1) board is larger are skipped
    #[arg(long, default_value_t = DEFAULT_MAX_CELLS)]
    max_cells: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    // logs go to stderr, stdout carries the answers. Level from RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let limits = Limits {
        max_capacity: args.max_capacity,
        max_items: args.max_items,
        max_cells: args.max_cells,
    };
    let jobs = args.jobs.unwrap_or_else(num_cpus::get);

    let result = if jobs <= 1 {
        packer::pack_with(&args.file, &limits)
    } else {
        packer::runner::pack_concurrent(&args.file, jobs, limits).await
    };

    match result {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("packer: {}", err);
            ExitCode::FAILURE
        }
    }
}
