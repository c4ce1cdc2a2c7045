use clap::Parser;
use colored::Colorize;
use tracing::{Level, debug};

use jmex::cli::JmexArgs;
use jmex::config::ExtractorConfig;
use jmex::errors::AppError;
use jmex::pipeline::{self, RunSummary};

fn main() {
    let args = JmexArgs::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match run_app(&args) {
        Ok(summary) => {
            if !args.quiet {
                println!(
                    "{} {} methods to {}",
                    "Wrote".green().bold(),
                    summary.methods_written,
                    summary.output_path.display()
                );
            }
        }
        Err(e) => {
            debug!("Application failed: {:?}", e);
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run_app(args: &JmexArgs) -> Result<RunSummary, AppError> {
    let mut config = ExtractorConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;
    pipeline::run(&args.path, args.output_dir.as_deref(), &config)
}
