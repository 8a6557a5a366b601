//! CLI interface for the skill gap analyzer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-gap")]
#[command(about = "Resume skill extraction and job skill gap analysis")]
#[command(long_about = "Extract technical skills from a resume, compare them with the skills a job requires, and build a learning plan for what is missing")]
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
    /// Compare a resume against a job's required skills
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to file (a directory gets a generated file name)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include strengths and uncategorized terms
        #[arg(short, long)]
        detailed: bool,
    },

    /// Print the active skill lexicon
    Lexicon {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Exactly one source of required skills
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (PDF, TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Comma-separated list of required skills
    #[arg(long, value_delimiter = ',')]
    pub skills: Option<Vec<String>>,
}

impl JobSource {
    /// How the source is named in reports
    pub fn describe(&self) -> String {
        match (&self.job, &self.job_text, &self.skills) {
            (Some(path), _, _) => path.display().to_string(),
            (None, Some(_), _) => "inline text".to_string(),
            _ => "skill list".to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }

    #[test]
    fn test_skills_flag_splits_on_commas() {
        let cli = Cli::try_parse_from([
            "skill-gap",
            "analyze",
            "--resume",
            "cv.txt",
            "--skills",
            "python,sql,machine learning",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { job, .. } => {
                assert_eq!(
                    job.skills,
                    Some(vec![
                        "python".to_string(),
                        "sql".to_string(),
                        "machine learning".to_string()
                    ])
                );
                assert_eq!(job.describe(), "skill list");
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_sources_are_exclusive() {
        assert!(Cli::try_parse_from([
            "skill-gap", "analyze", "--resume", "cv.txt", "--job", "job.txt", "--skills", "sql",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["skill-gap", "analyze", "--resume", "cv.txt"]).is_err());
    }
}
