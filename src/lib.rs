//! Skill gap analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, SkillGapError};
pub use config::Config;
pub use processing::lexicon::SkillCatalog;
pub use processing::pipeline::{AnalysisEngine, JobRequirements, PipelineOutcome};
