//! CLI interface for the candidate screener

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "candidate-screener")]
#[command(about = "Skill-driven candidate screening interviews")]
#[command(long_about = "Map a resume onto job requirements, run an adaptive screening interview, \
    score answer authenticity and produce a PASS/HOLD/REJECT recommendation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the interview plan for a resume and a job
    Plan {
        #[command(flatten)]
        screening: ScreeningArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive screening in the terminal
    Interview {
        #[command(flatten)]
        screening: ScreeningArgs,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Score a recorded transcript against the interview plan
    Evaluate {
        #[command(flatten)]
        screening: ScreeningArgs,

        /// Recorded answers (JSON)
        #[arg(short, long)]
        transcript: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScreeningArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job requirements (TOML, JSON) or a job description (TXT, MD)
    #[arg(short, long)]
    pub job: PathBuf,

    /// Number of main questions
    #[arg(short = 'n', long)]
    pub questions: Option<usize>,

    /// Seed for question and follow-up selection
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save the report to a file (or into a directory)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Render the candidate-facing feedback instead of the recruiter report
    #[arg(long)]
    pub feedback: bool,

    /// Output detailed analysis
    #[arg(short, long)]
    pub detailed: bool,

    /// Write the complete screening outcome as JSON
    #[arg(long)]
    pub outcome: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
