//! skill-gap: resume skill extraction and job skill gap analysis

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use skill_gap::cli::{self, Cli, Commands, ConfigAction, JobSource};
use skill_gap::config::{Config, OutputFormat};
use skill_gap::input::InputManager;
use skill_gap::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator};
use skill_gap::processing::lexicon::SkillCatalog;
use skill_gap::processing::pipeline::{AnalysisEngine, JobRequirements};
use skill_gap::{Result, SkillGapError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            info!("Creating default configuration at {}", path.display());
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn load_catalog(config: &Config) -> Result<SkillCatalog> {
    match &config.lexicon_path {
        Some(path) => SkillCatalog::from_file(path),
        None => Ok(SkillCatalog::builtin().clone()),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            format,
            save,
            detailed,
        } => {
            info!("Starting skill gap analysis");

            cli::validate_file_extension(&resume, DOCUMENT_EXTENSIONS)
                .map_err(|e| SkillGapError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job_path) = &job.job {
                cli::validate_file_extension(job_path, DOCUMENT_EXTENSIONS)
                    .map_err(|e| SkillGapError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(SkillGapError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            // Machine-readable formats keep stdout clean
            let chatty = output_format == OutputFormat::Console;
            if chatty {
                println!("🚀 Skill gap analysis");
                println!("📄 Resume: {}", resume.display());
                println!("💼 Job: {}", job.describe());
            }

            let catalog = load_catalog(&config)?;
            let mut input_manager = InputManager::new(&config.input)?;

            let progress = spinner("Extracting text from documents...");
            let resume_text = input_manager.extract_text(&resume).await;
            let job_text = match &job.job {
                Some(path) => input_manager.extract_text(path).await.map(Some),
                None => Ok(None),
            };
            progress.finish_and_clear();
            let resume_text = resume_text?;
            let job_text = job_text?.flatten();

            if chatty && detailed {
                if let Some(text) = &resume_text {
                    println!("\n📄 Resume Content Preview:");
                    println!("{}", truncate_text(text, 300));
                }
            }

            let requirements = job_requirements(&job, job_text.as_deref());
            let engine = AnalysisEngine::new(&catalog, &config);
            let outcome = engine.analyze(resume_text.as_deref(), requirements)?;

            let report = AnalysisReport::new(
                outcome,
                &resume.display().to_string(),
                &job.describe(),
                catalog.lexicon.skill_count(),
            );

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(save_path) = save {
                let target = if save_path.is_dir() {
                    save_path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                } else {
                    save_path
                };
                let plain = ReportGenerator::with_options(false, detailed, true, true, true);
                save_report_to_file(&plain.generate_report(&report, &output_format)?, &target)?;
                info!("Report saved to {}", target.display());
            }

            if report.is_halted() {
                info!("Analysis stopped before scoring");
            }
        }

        Commands::Lexicon { category } => {
            let catalog = load_catalog(&config)?;
            match category {
                Some(name) => {
                    let skills = catalog.lexicon.skills_in(&name).ok_or_else(|| {
                        SkillGapError::InvalidInput(format!(
                            "Unknown category: {}. Available: {}",
                            name,
                            catalog.lexicon.category_names().join(", ")
                        ))
                    })?;
                    println!("📚 {} ({} skills)", name, skills.len());
                    for skill in skills {
                        println!("  • {}", skill);
                    }
                }
                None => {
                    println!(
                        "📚 Skill lexicon: {} skills in {} categories\n",
                        catalog.lexicon.skill_count(),
                        catalog.lexicon.category_names().len()
                    );
                    for (name, skills) in catalog.lexicon.categories() {
                        println!("{} ({})", name, skills.len());
                        println!("  {}\n", skills.join(", "));
                    }
                    println!("🗺️  Curated roadmaps: {}", catalog.roadmap.keys().cloned().collect::<Vec<_>>().join(", "));
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        SkillGapError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn job_requirements<'t>(job: &'t JobSource, job_file_text: Option<&'t str>) -> JobRequirements<'t> {
    match (&job.skills, &job.job_text) {
        (Some(skills), _) => JobRequirements::Skills(skills.clone()),
        (None, Some(text)) => JobRequirements::Text(Some(text.as_str())),
        (None, None) => JobRequirements::Text(job_file_text),
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
