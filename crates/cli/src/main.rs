// Stowage CLI - loading-list extraction and reconciliation
//
// Reads carrier spreadsheets, pulls container/bill rows out of whatever
// layout each sheet uses, and reconciles the batch into a combined table,
// a rejects table, and per-vessel loading lists.

mod exit_codes;
mod inspect;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

// Re-export exit codes from registry (single source of truth)
use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_NO_DATA, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Container loading-list extraction and reconciliation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over one or more carrier spreadsheets
    #[command(after_help = "\
Examples:
  stowage run june/*.xlsx --out-dir out/
  stowage run bookings.xlsx --config stowage.toml --out-dir out/ --json
  stowage run legacy.xls extra.ods --out-dir out/ --quiet")]
    Run {
        /// Input spreadsheet files (xlsx, xls, xlsb, ods)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for output artifacts (created if missing)
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Pipeline configuration file (TOML)
        #[arg(long, value_name = "FILE", env = "STOWAGE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the run report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress per-file progress and the stderr summary
        #[arg(long)]
        quiet: bool,
    },

    /// Show which sheets carry a detectable header and what was found
    #[command(after_help = "\
Examples:
  stowage inspect bookings.xlsx
  stowage inspect bookings.xlsx --config stowage.toml --json")]
    Inspect {
        /// Input spreadsheet file
        file: PathBuf,

        /// Pipeline configuration file (TOML)
        #[arg(long, value_name = "FILE", env = "STOWAGE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the inspection report as JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            files,
            out_dir,
            config,
            json,
            quiet,
        } => run::cmd_run(files, out_dir, config, json, quiet),
        Commands::Inspect { file, config, json } => inspect::cmd_inspect(file, config, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_NO_DATA,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: msg.into(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Load the pipeline config: explicit file if given, built-in defaults
/// otherwise. Parse and validation failures both land on the config exit
/// code so schedulers can tell a bad config from a bad batch.
fn load_config(path: Option<&std::path::Path>) -> Result<stowage_recon::PipelineConfig, CliError> {
    let Some(path) = path else {
        return Ok(stowage_recon::PipelineConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("Failed to read '{}': {}", path.display(), e)))?;
    stowage_recon::PipelineConfig::from_toml(&contents).map_err(|e| CliError::config(e.to_string()))
}
