//! CLI interface for the resume screener

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Extract contact details, skills and experience from PDF and Word resumes")]
#[command(long_about = "Screen a batch of resumes: pull out names, emails and phone numbers, match a skill list, check a years-of-experience threshold, and export the table as CSV")]
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
    /// Screen a batch of resumes
    Screen {
        /// Resume files (.pdf or .docx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Skills to look for, comma-separated (e.g. "python, gen ai, sql")
        #[arg(short, long)]
        skills: Option<String>,

        /// Required years of experience
        #[arg(short, long)]
        years: Option<u32>,

        /// Output format: console, csv, json, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Also write the results as CSV to the configured export file
        #[arg(long)]
        export_csv: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Add accepted variants for a canonical skill name
    AddAlias {
        /// Canonical skill name reported in results (e.g. "kubernetes")
        canonical: String,

        /// Spellings that count as this skill (e.g. k8s kube)
        #[arg(required = true)]
        variants: Vec<String>,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        "json" => Ok(crate::config::OutputFormat::Json),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, csv, json, html", format)),
    }
}
