//! Resume screener: contact, skill and experience extraction for resume batches

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::report::{CriteriaSummary, ReportMetadata, ScreeningReport};
use resume_screener::processing::screener::{Screener, ScreeningCriteria, ScreeningSession};
use resume_screener::processing::skills::SkillCriteria;
use resume_screener::{Config, Result, ResumeScreenerError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Screen {
            files,
            skills,
            years,
            output,
            save,
            export_csv,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeScreenerError::InvalidInput)?,
                None => config.output.format,
            };

            let skills = match skills {
                Some(skills) => SkillCriteria::parse(&skills),
                None => SkillCriteria::new(&config.screening.default_skills),
            };
            let years = years.unwrap_or(config.screening.default_experience_years);
            let criteria = ScreeningCriteria::new(skills, years);

            info!(
                "Screening {} resumes for skills [{}] and {}+ years",
                files.len(),
                criteria.skills.skills().join(", "),
                criteria.experience_years
            );

            let started = Instant::now();
            let uploads = InputManager::new().load_batch(&files).await;

            let progress = ProgressBar::new(uploads.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let mut session = ScreeningSession::new(Screener::new(config.skills.aliases.clone()));
            session.process_batch_with(uploads, &criteria, |record| {
                progress.set_message(record.filename.clone());
                progress.inc(1);
            });
            progress.finish_and_clear();

            let report = ScreeningReport {
                results: session.results().clone(),
                criteria: CriteriaSummary {
                    skills: criteria.skills.skills().to_vec(),
                    experience_years: criteria.experience_years,
                },
                metadata: ReportMetadata::new(started.elapsed().as_millis() as u64),
            };

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match &save {
                Some(path) => {
                    save_report_to_file(rendered.as_bytes(), path)?;
                    println!("Results saved to {}", path.display());
                }
                None => print!("{}", rendered),
            }

            if export_csv {
                let csv_path = PathBuf::from(&config.output.csv_file_name);
                save_report_to_file(&generator.csv_bytes(&report.results)?, &csv_path)?;
                println!("CSV exported to {}", csv_path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}\n", config_path.display());
                println!("Default experience requirement: {} years", config.screening.default_experience_years);
                println!(
                    "Default skills: {}",
                    if config.screening.default_skills.is_empty() {
                        "(none)".to_string()
                    } else {
                        config.screening.default_skills.join(", ")
                    }
                );
                println!("Output format: {:?}", config.output.format);
                println!("CSV export file: {}", config.output.csv_file_name);
                println!("\nSkill aliases:");
                for (canonical, variants) in config.aliases().iter() {
                    println!(
                        "  • {}: {}",
                        canonical,
                        variants.iter().cloned().collect::<Vec<_>>().join(", ")
                    );
                }
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::AddAlias { canonical, variants }) => {
                config.skills.aliases.insert(&canonical, &variants);
                config.save_to(config_path)?;
                println!(
                    "'{}' now matches: {}",
                    canonical.trim().to_lowercase(),
                    variants.join(", ")
                );
            }
        },
    }

    Ok(())
}
