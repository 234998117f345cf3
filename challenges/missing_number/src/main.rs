use clap::Parser;
use log::error;
use missing_number::{Config, DEFAULT_BOUND, Writer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "missing_number")]
#[command(about = "Find the one number missing from 1..=N", long_about = None)]
struct Cli {
    /// Upper bound N of the range [1, N]
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_BOUND,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    bound: u64,

    /// Seed for the random choice of the missing number (defaults to the clock)
    #[arg(short = 's', long)]
    seed: Option<u64>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            bound: cli.bound,
            seed: cli.seed,
        }
    }
}

fn main() {
    // install global collector configured based on RUST_LOG env var.
    // stdout is reserved for the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Cli::parse());
    let mut out = Writer::new();

    if let Err(err) = missing_number::run(&config, &mut out) {
        error!("could not run trial: {}", err);
    }
    if let Err(err) = out.write_to(&mut std::io::stdout().lock()) {
        error!("failed to write report: {}", err);
    }
}
