//! Resume scorer: hybrid rule-based and LLM resume scoring tool

use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info, warn};
use resume_scorer::analysis::engine::HybridScoreEngine;
use resume_scorer::analysis::recommendations::{RecommendationComposer, Recommendations};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::OutputFormat;
use resume_scorer::llm::client::LlmClient;
use resume_scorer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_scorer::output::report::ScoreReport;
use resume_scorer::{Config, Result, ResumeScorerError};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            detailed,
            save,
            no_llm,
            suggestions,
        } => {
            info!("Starting resume scoring analysis");

            // Validate input files
            cli::validate_file_extension(&resume, &["txt", "md", "text"])
                .map_err(|e| ResumeScorerError::UnsupportedFormat(format!("Resume file: {}", e)))?;

            cli::validate_file_extension(&job, &["txt", "md", "text"]).map_err(|e| {
                ResumeScorerError::UnsupportedFormat(format!("Job description file: {}", e))
            })?;

            // Resolve output options, CLI flags over config defaults
            let output_format = match &output {
                Some(requested) => {
                    cli::parse_output_format(requested).map_err(ResumeScorerError::InvalidInput)?
                }
                None => config.output.format.clone(),
            };
            let detailed = detailed || config.output.detailed;
            let suggestion_limit = suggestions.unwrap_or(config.output.max_suggestions);

            // Status chatter stays off stdout for machine-readable formats
            let chatty = output_format == OutputFormat::Console;

            if chatty {
                println!("🚀 Resume scoring analysis");
                println!("📄 Resume: {}", resume.display());
                println!("💼 Job Description: {}", job.display());
            }

            let resume_text = tokio::fs::read_to_string(&resume).await?;
            let job_text = tokio::fs::read_to_string(&job).await?;

            if resume_text.trim().is_empty() {
                return Err(ResumeScorerError::InvalidInput(format!(
                    "Resume file is empty: {}",
                    resume.display()
                )));
            }
            if job_text.trim().is_empty() {
                return Err(ResumeScorerError::InvalidInput(format!(
                    "Job description file is empty: {}",
                    job.display()
                )));
            }

            let backend = if no_llm {
                if chatty {
                    println!("⚠️  LLM review disabled, scoring with local rules only");
                }
                None
            } else {
                let client = LlmClient::from_env(&config.llm)?;
                if client.is_none() {
                    warn!(
                        "{} is not set; falling back to rule-based scoring",
                        config.llm.api_key_env
                    );
                    if chatty {
                        println!(
                            "⚠️  {} not set, scoring without LLM review",
                            config.llm.api_key_env
                        );
                    }
                }
                client
            };

            let engine = HybridScoreEngine::with_backend(&config, backend)?;

            let started = Instant::now();

            // Spinner draws to stderr, so piped stdout stays clean
            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Scoring resume against job description...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = engine.analyze_resume(&resume_text, &job_text).await;
            spinner.finish_and_clear();
            let result = outcome?;

            let skill_analysis = engine.compare_skills(&resume_text, &job_text);
            let job_keywords = engine.job_keywords(&job_text);

            let recommendations = if config.output.include_recommendations {
                RecommendationComposer::compose(
                    &skill_analysis,
                    result.rule_based_score,
                    &result.llm_analysis.improvement_areas,
                )
            } else {
                Recommendations::default()
            };

            let skill_suggestions = engine.skill_suggestions(&skill_analysis, suggestion_limit);

            let processing_time_ms = started.elapsed().as_millis() as u64;

            let report = ScoreReport::assemble(
                result,
                skill_analysis,
                job_keywords,
                recommendations,
                skill_suggestions,
                processing_time_ms,
            );

            let generator =
                ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;

            println!("{}", rendered);

            if let Some(save_path) = save {
                let target = if save_path.is_dir() {
                    save_path.join(suggest_filename(
                        &output_format,
                        &resume.to_string_lossy(),
                        true,
                    ))
                } else {
                    save_path
                };

                // ANSI color codes do not belong in files
                let file_content = match output_format {
                    OutputFormat::Console => {
                        ReportGenerator::with_options(false, detailed, true, true)
                            .generate_report(&report, &output_format)?
                    }
                    _ => rendered,
                };

                save_report_to_file(&file_content, &target)?;

                if chatty {
                    println!("💾 Report saved to: {}", target.display());
                } else {
                    info!("Report saved to {}", target.display());
                }
            }

            if chatty {
                println!(
                    "\n✅ Scoring complete! Match score: {:.2}% ({})",
                    report.match_score, report.analysis_method
                );
            }
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Config file: {}", Config::config_path().display());

                    println!("\nScoring Weights:");
                    println!("  Keywords: {:.0}%", config.scoring.keyword_weight * 100.0);
                    println!(
                        "  Text Similarity: {:.0}%",
                        config.scoring.text_weight * 100.0
                    );
                    println!("  Skills: {:.0}%", config.scoring.skill_weight * 100.0);

                    println!("\nLLM Service:");
                    println!("  Endpoint: {}", config.llm.api_url);
                    println!("  Model: {}", config.llm.model);
                    println!("  API Key Variable: {}", config.llm.api_key_env);
                    let key_set = std::env::var(&config.llm.api_key_env)
                        .map(|value| !value.trim().is_empty())
                        .unwrap_or(false);
                    println!(
                        "  API Key: {}",
                        if key_set { "✅ set" } else { "❌ not set" }
                    );
                    println!("  Timeout: {}s", config.llm.timeout_secs);

                    println!("\nOutput Defaults:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  Colors: {}", config.output.color_output);
                    println!("  Max Suggestions: {}", config.output.max_suggestions);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save()?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", Config::config_path().display());
                }
            }
        }
    }

    Ok(())
}
