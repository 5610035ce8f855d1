mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "bankparse",
    version,
    about = "Extract transaction tables from bank statement PDFs and check them against a reference CSV"
)]
struct Cli {
    /// Log extraction and comparison details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a target's statement and validate it against its reference CSV
    Run {
        /// Bank name (e.g. icici, sbi)
        #[arg(short, long)]
        target: String,

        /// Directory holding <target>/<target> sample.pdf and <target>/result.csv
        #[arg(short, long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// JSON settings file with per-target path overrides
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract and normalize the transaction table of a PDF (without comparing)
    Extract {
        /// Path to the statement PDF
        input_file: PathBuf,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the table to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            target,
            data_dir,
            config,
            output,
        } => commands::run::run(&target, data_dir, config, &output),
        Commands::Extract {
            input_file,
            output,
            out,
        } => commands::extract::run(input_file, &output, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
