//! Analysis engine: normalize, extract, score, compare, plan.
//!
//! Soft failures (no readable resume text, no recognizable job skills) are
//! returned as a halted outcome rather than an error so the caller decides
//! how to report them. Errors are reserved for genuine failures.

use crate::config::Config;
use crate::error::Result;
use crate::processing::extractor::{ExtractedSkillSet, SkillExtractor};
use crate::processing::frequency::{bounded_frequency, Strength, StrengthThresholds};
use crate::processing::gap::{gap, match_score, related_skills, GapResult};
use crate::processing::learning_plan::{plan, LearningPlan};
use crate::processing::lexicon::SkillCatalog;
use crate::processing::normalizer::{is_blank, normalize_opt};
use crate::processing::uncategorized::UncategorizedDetector;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Instant;

/// Where the required skills come from
#[derive(Debug, Clone)]
pub enum JobRequirements<'t> {
    /// Job description text; `None` when the source produced nothing
    Text(Option<&'t str>),
    /// An explicit list of required skills
    Skills(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    NoReadableText,
    NoRecognizableJobSkills,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::NoReadableText => write!(
                f,
                "No readable text found in the resume. Provide a text-based document."
            ),
            HaltReason::NoRecognizableJobSkills => write!(
                f,
                "No recognizable skills found in the job description; a match score would be meaningless."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineWarning {
    NoResumeSkills,
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::NoResumeSkills => {
                write!(f, "No matching technical skills found in the resume.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStrength {
    pub skill: String,
    pub count: usize,
    pub strength: Strength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub resume_skills: ExtractedSkillSet,
    pub resume_strengths: Vec<SkillStrength>,
    pub resume_uncategorized: Vec<String>,
    pub job_skills: Vec<String>,
    pub job_uncategorized: Vec<String>,
    pub gap: GapResult,
    pub match_score: f64,
    pub related_skills: BTreeMap<String, Vec<String>>,
    pub learning_plan: LearningPlan,
    pub warnings: Vec<PipelineWarning>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineOutcome {
    Completed(Box<SkillAnalysis>),
    Halted(HaltReason),
}

impl PipelineOutcome {
    pub fn analysis(&self) -> Option<&SkillAnalysis> {
        match self {
            PipelineOutcome::Completed(analysis) => Some(analysis.as_ref()),
            PipelineOutcome::Halted(_) => None,
        }
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self {
            PipelineOutcome::Completed(_) => None,
            PipelineOutcome::Halted(reason) => Some(*reason),
        }
    }
}

type StageResult<T> = std::result::Result<T, HaltReason>;

struct ResumeStage {
    skills: ExtractedSkillSet,
    strengths: Vec<SkillStrength>,
    uncategorized: Vec<String>,
    warnings: Vec<PipelineWarning>,
}

struct JobStage {
    skills: Vec<String>,
    uncategorized: Vec<String>,
}

/// Runs one resume/job pair through every stage. Holds only shared read-only
/// state, so one engine can serve any number of analyses.
pub struct AnalysisEngine<'a> {
    catalog: &'a SkillCatalog,
    config: &'a Config,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(catalog: &'a SkillCatalog, config: &'a Config) -> Self {
        Self { catalog, config }
    }

    pub fn analyze(&self, resume: Option<&str>, job: JobRequirements<'_>) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        info!("Starting skill gap analysis");

        let resume = match self.resume_stage(resume)? {
            Ok(stage) => stage,
            Err(reason) => return Ok(self.halt(reason)),
        };
        let job = match self.job_stage(job) {
            Ok(stage) => stage,
            Err(reason) => return Ok(self.halt(reason)),
        };

        let resume_lower = resume.skills.lowercase_skills();
        let gap = gap(&resume_lower, &job.skills);
        let score = match_score(gap.matched.len(), job.skills.len());
        info!(
            "Matched {} of {} required skills ({:.2}%)",
            gap.matched.len(),
            job.skills.len(),
            score
        );

        let related = related_skills(
            &gap.missing,
            &resume_lower,
            self.config.scoring.related_skill_threshold,
        );
        let learning_plan = plan(&gap.missing, &self.catalog.roadmap);

        Ok(PipelineOutcome::Completed(Box::new(SkillAnalysis {
            resume_skills: resume.skills,
            resume_strengths: resume.strengths,
            resume_uncategorized: resume.uncategorized,
            job_skills: job.skills,
            job_uncategorized: job.uncategorized,
            gap,
            match_score: score,
            related_skills: related,
            learning_plan,
            warnings: resume.warnings,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })))
    }

    /// Categorized skills for any text; empty when nothing is recognized
    pub fn extract_skills(&self, raw: Option<&str>) -> ExtractedSkillSet {
        let normalized = normalize_opt(raw);
        self.extractor().extract(&normalized, raw)
    }

    fn extractor(&self) -> SkillExtractor<'a> {
        SkillExtractor::new(&self.catalog.lexicon, &self.config.extraction)
    }

    fn detector(&self) -> UncategorizedDetector<'a> {
        UncategorizedDetector::new(
            &self.catalog.lexicon,
            &self.catalog.stopwords,
            self.config.extraction.min_uncategorized_len,
        )
    }

    fn resume_stage(&self, raw: Option<&str>) -> Result<StageResult<ResumeStage>> {
        let normalized = normalize_opt(raw);
        if is_blank(&normalized) {
            return Ok(Err(HaltReason::NoReadableText));
        }
        debug!("Normalized resume text: {} characters", normalized.len());

        let skills = self.extractor().extract(&normalized, raw);
        let lower = skills.lowercase_skills();

        let mut warnings = Vec::new();
        if skills.is_empty() {
            warn!("No lexicon skills found in resume");
            warnings.push(PipelineWarning::NoResumeSkills);
        }

        let thresholds = StrengthThresholds::from(&self.config.scoring);
        let counts = bounded_frequency(&normalized, &lower, self.config.extraction.min_substring_len)?;
        let strengths = counts
            .into_iter()
            .map(|(skill, count)| SkillStrength {
                strength: thresholds.classify(count),
                skill,
                count,
            })
            .collect();

        let known: HashSet<String> = lower.into_iter().collect();
        let uncategorized = self.detector().detect(&normalized, &known);
        debug!("{} uncategorized resume terms", uncategorized.len());

        Ok(Ok(ResumeStage {
            skills,
            strengths,
            uncategorized,
            warnings,
        }))
    }

    fn job_stage(&self, job: JobRequirements<'_>) -> StageResult<JobStage> {
        let stage = match job {
            JobRequirements::Skills(list) => {
                let mut skills: Vec<String> = list
                    .iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect();
                skills.sort();
                skills.dedup();
                JobStage {
                    skills,
                    uncategorized: Vec::new(),
                }
            }
            JobRequirements::Text(raw) => {
                let normalized = normalize_opt(raw);
                let extracted = self.extractor().extract(&normalized, raw);
                let skills = extracted.lowercase_skills();
                let known: HashSet<String> = skills.iter().cloned().collect();
                let uncategorized = self.detector().detect(&normalized, &known);
                JobStage {
                    skills,
                    uncategorized,
                }
            }
        };

        if stage.skills.is_empty() {
            warn!("No recognizable skills in job description");
            return Err(HaltReason::NoRecognizableJobSkills);
        }
        debug!("Job requires {} skills", stage.skills.len());
        Ok(stage)
    }

    fn halt(&self, reason: HaltReason) -> PipelineOutcome {
        warn!("Analysis halted: {}", reason);
        PipelineOutcome::Halted(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::learning_plan::PlanSource;

    fn run(resume: Option<&str>, job: JobRequirements<'_>) -> PipelineOutcome {
        let config = Config::default();
        let engine = AnalysisEngine::new(SkillCatalog::builtin(), &config);
        engine.analyze(resume, job).unwrap()
    }

    fn skills(list: &[&str]) -> JobRequirements<'static> {
        JobRequirements::Skills(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_full_run_with_skill_list() {
        let outcome = run(
            Some("i know python and sql, also excel"),
            skills(&["python", "sql", "machine learning"]),
        );
        let analysis = outcome.analysis().unwrap();

        assert_eq!(analysis.resume_skills.skills(), vec!["EXCEL", "PYTHON", "SQL"]);
        assert_eq!(analysis.gap.matched, vec!["python", "sql"]);
        assert_eq!(analysis.gap.missing, vec!["machine learning"]);
        assert_eq!(analysis.match_score, 66.67);
        assert_eq!(
            analysis.learning_plan.get("machine learning").unwrap().source,
            PlanSource::Curated
        );
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_empty_resume_halts() {
        assert_eq!(
            run(Some(""), skills(&["python"])).halt_reason(),
            Some(HaltReason::NoReadableText)
        );
        assert_eq!(
            run(None, skills(&["python"])).halt_reason(),
            Some(HaltReason::NoReadableText)
        );
        assert_eq!(
            run(Some(" \n\t "), skills(&["python"])).halt_reason(),
            Some(HaltReason::NoReadableText)
        );
    }

    #[test]
    fn test_job_without_skills_halts() {
        let outcome = run(
            Some("Python developer"),
            JobRequirements::Text(Some("We want a cheerful person who loves gardening")),
        );
        assert_eq!(outcome.halt_reason(), Some(HaltReason::NoRecognizableJobSkills));

        let outcome = run(Some("Python developer"), skills(&["  "]));
        assert_eq!(outcome.halt_reason(), Some(HaltReason::NoRecognizableJobSkills));
    }

    #[test]
    fn test_resume_without_skills_warns_and_continues() {
        let outcome = run(
            Some("Enthusiastic gardener and baker"),
            JobRequirements::Text(Some("Requirements: Python, Tableau")),
        );
        let analysis = outcome.analysis().unwrap();
        assert_eq!(analysis.warnings, vec![PipelineWarning::NoResumeSkills]);
        assert_eq!(analysis.match_score, 0.0);
        assert_eq!(analysis.gap.missing, vec!["python", "tableau"]);
    }

    #[test]
    fn test_strengths_from_frequency() {
        let resume = "SQL reports. SQL tuning. SQL modeling. SQL audits. SQL training. Python once.";
        let outcome = run(Some(resume), skills(&["sql", "python"]));
        let analysis = outcome.analysis().unwrap();

        let sql = analysis.resume_strengths.iter().find(|s| s.skill == "sql").unwrap();
        assert_eq!(sql.count, 5);
        assert_eq!(sql.strength, Strength::High);
        let python = analysis.resume_strengths.iter().find(|s| s.skill == "python").unwrap();
        assert_eq!(python.strength, Strength::Low);
    }

    #[test]
    fn test_short_skill_strength_counts_words_not_letters() {
        let resume = "Skills: R, Python. Worked on reporting and research for recruiters.";
        let outcome = run(Some(resume), skills(&["r", "python"]));
        let analysis = outcome.analysis().unwrap();

        let r = analysis.resume_strengths.iter().find(|s| s.skill == "r").unwrap();
        assert_eq!(r.count, 1);
        assert_eq!(r.strength, Strength::Low);
        assert_eq!(analysis.match_score, 100.0);
    }

    #[test]
    fn test_job_text_extraction_and_plans() {
        let outcome = run(
            Some("Skills: Python, Excel"),
            JobRequirements::Text(Some("Must have Python, Tableau and React Native. Airflow a plus.")),
        );
        let analysis = outcome.analysis().unwrap();

        assert_eq!(analysis.gap.matched, vec!["python"]);
        assert!(analysis.gap.missing.contains(&"tableau".to_string()));
        assert!(analysis.gap.missing.contains(&"react native".to_string()));
        assert!(analysis.job_uncategorized.contains(&"AIRFLOW".to_string()));

        let generic = analysis.learning_plan.get("react native").unwrap();
        assert_eq!(generic.source, PlanSource::Generic);
        assert_eq!(generic.resources.len(), 3);
    }
}
