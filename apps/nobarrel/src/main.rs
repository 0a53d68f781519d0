use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use log::{debug, info};
use nobarrel_discover::DiscoverConfig;
use nobarrel_replace::ReplaceConfig;
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nobarrel")]
#[command(about = "Find barrel files and replace imports that go through them", long_about = None)]
struct Cli {
    /// Enable verbose output for detailed logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the number of barrel files
    Count(DiscoverConfig),
    /// List the barrel files
    Display(DiscoverConfig),
    /// Replace barrel file imports with direct paths
    Replace(ReplaceConfig),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let start = Instant::now();

    match cli.command {
        Commands::Count(cfg) | Commands::Display(cfg) if cfg.json => {
            let result = nobarrel_discover::find_barrel_files(&cfg.project)?;
            nobarrel_discover::print_json(&mut stdout, &result)?;
        }
        Commands::Count(cfg) => {
            let result = nobarrel_discover::find_barrel_files(&cfg.project)?;
            nobarrel_discover::print_count(&mut stdout, &result)?;
            print_footer(&mut stdout, start, result.files_scanned, true)?;
        }
        Commands::Display(cfg) => {
            let result = nobarrel_discover::find_barrel_files(&cfg.project)?;
            nobarrel_discover::print_barrels(&mut stdout, &result)?;
            print_footer(&mut stdout, start, result.files_scanned, true)?;
        }
        Commands::Replace(cfg) => {
            info!("Running replace (dry run: {}, partial: {:?})", cfg.dry_run, cfg.partial);
            let result = nobarrel_replace::run_replace(&cfg)?;
            if cfg.json {
                nobarrel_replace::print_json(&mut stdout, &result)?;
            } else {
                nobarrel_replace::print_replace_summary(&mut stdout, &result)?;
                print_footer(&mut stdout, start, result.files_scanned, false)?;
            }
        }
    }

    Ok(())
}

fn print_footer<W: Write>(
    writer: &mut W,
    start: Instant,
    files: usize,
    parallel: bool,
) -> Result<()> {
    let elapsed_ms = start.elapsed().as_millis();
    write!(
        writer,
        "\n{} Finished in {}ms on {} files",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        files.to_string().cyan()
    )?;
    if parallel {
        write!(writer, " (using {} threads)", rayon::current_num_threads().to_string().cyan())?;
    }
    writeln!(writer, ".")?;
    writer.flush()?;
    Ok(())
}
