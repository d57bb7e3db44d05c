//! Resume fit: resume and job description compatibility analyzer

use clap::Parser;
use log::{error, info};
use resume_fit::cli::{self, Cli, Commands, ConfigAction};
use resume_fit::config::Config;
use resume_fit::error::{Result, ResumeFitError};
use resume_fit::output::formatter::format_report;
use resume_fit::processing::analyzer::MatchEngine;
use resume_fit::processing::document::Document;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            keyword_weight,
            semantic_weight,
            top_n,
            top_n_missing,
            no_color,
        } => {
            cli::validate_file_extension(&resume, &["txt", "md"])
                .map_err(|e| ResumeFitError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeFitError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeFitError::InvalidInput)?;

            if let Some(weight) = keyword_weight {
                config.scoring.keyword_weight = weight;
            }
            if let Some(weight) = semantic_weight {
                config.scoring.semantic_weight = weight;
            }
            if let Some(n) = top_n {
                config.keywords.top_n = n;
            }
            if let Some(n) = top_n_missing {
                config.keywords.top_n_missing = n;
            }

            info!("Reading input files");
            let resume_text = std::fs::read_to_string(&resume)?;
            let job_text = std::fs::read_to_string(&job)?;

            let resume_doc = Document::resume(resume_text);
            let job_doc = Document::job_description(job_text);

            info!("Initializing match engine");
            let engine = MatchEngine::new(&config)?;

            let report = engine.analyze(&resume_doc, &job_doc);

            let color = config.output.color_output && !no_color;
            let rendered = format_report(&report, &output_format, color)?;
            println!("{}", rendered);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration\n");
                println!("Models Directory: {}", config.models.models_dir.display());
                println!("Embedding Model: {}", config.models.embedding_model);
                println!("\nScoring Weights:");
                println!("  Keywords: {:.1}%", config.scoring.keyword_weight * 100.0);
                println!("  Semantic: {:.1}%", config.scoring.semantic_weight * 100.0);
                println!("\nKeywords:");
                println!("  Top N per document: {}", config.keywords.top_n);
                println!("  Missing listed in feedback: {}", config.keywords.top_n_missing);
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
