//! Report structures shared by every output format

use crate::processing::pipeline::{HaltReason, PipelineOutcome, SkillAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs: where the inputs came from, and either the
/// finished analysis or the reason it stopped early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    /// File path, "inline text" or "skill list"
    pub job_source: String,
    pub lexicon_skills: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportBody {
    Completed {
        summary: MatchSummary,
        analysis: Box<SkillAnalysis>,
        notices: Vec<String>,
    },
    Halted {
        reason: HaltReason,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub score: f64,
    pub rating: MatchRating,
    pub matched_count: usize,
    pub required_count: usize,
    pub verdict: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRating {
    Strong,
    Good,
    Partial,
    Weak,
}

impl MatchRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchRating::Strong
        } else if score >= 60.0 {
            MatchRating::Good
        } else if score >= 40.0 {
            MatchRating::Partial
        } else {
            MatchRating::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchRating::Strong => "STRONG MATCH",
            MatchRating::Good => "GOOD MATCH",
            MatchRating::Partial => "PARTIAL MATCH",
            MatchRating::Weak => "WEAK MATCH",
        }
    }
}

impl MatchSummary {
    fn from_analysis(analysis: &SkillAnalysis) -> Self {
        let rating = MatchRating::from_score(analysis.match_score);
        let matched_count = analysis.gap.matched.len();
        let required_count = analysis.gap.required_count();
        let missing = required_count - matched_count;

        let verdict = match rating {
            MatchRating::Strong if missing == 0 => {
                "Your resume covers every skill the job asks for.".to_string()
            }
            MatchRating::Strong => format!(
                "Strong fit. Close the last {} gap(s) to cover the full list.",
                missing
            ),
            MatchRating::Good => format!(
                "Good fit. {} required skill(s) are missing from your resume.",
                missing
            ),
            MatchRating::Partial => format!(
                "Partial fit. Focus the learning plan on the {} missing skill(s).",
                missing
            ),
            MatchRating::Weak => format!(
                "Weak fit. {} of {} required skills are missing.",
                missing, required_count
            ),
        };

        Self {
            score: analysis.match_score,
            rating,
            matched_count,
            required_count,
            verdict,
        }
    }
}

impl AnalysisReport {
    pub fn new(outcome: PipelineOutcome, resume_file: &str, job_source: &str, lexicon_skills: usize) -> Self {
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.to_string(),
            job_source: job_source.to_string(),
            lexicon_skills,
        };

        let body = match outcome {
            PipelineOutcome::Completed(analysis) => ReportBody::Completed {
                summary: MatchSummary::from_analysis(&analysis),
                notices: analysis.warnings.iter().map(|w| w.to_string()).collect(),
                analysis,
            },
            PipelineOutcome::Halted(reason) => ReportBody::Halted {
                reason,
                message: reason.to_string(),
            },
        };

        Self { metadata, body }
    }

    pub fn analysis(&self) -> Option<&SkillAnalysis> {
        match &self.body {
            ReportBody::Completed { analysis, .. } => Some(analysis.as_ref()),
            ReportBody::Halted { .. } => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.body, ReportBody::Halted { .. })
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.analysis().map_or(0, |a| a.processing_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bands() {
        assert_eq!(MatchRating::from_score(100.0), MatchRating::Strong);
        assert_eq!(MatchRating::from_score(66.67), MatchRating::Good);
        assert_eq!(MatchRating::from_score(40.0), MatchRating::Partial);
        assert_eq!(MatchRating::from_score(0.0), MatchRating::Weak);
    }

    #[test]
    fn test_halted_report() {
        let report = AnalysisReport::new(
            PipelineOutcome::Halted(HaltReason::NoReadableText),
            "cv.pdf",
            "skill list",
            80,
        );
        assert!(report.is_halted());
        assert!(report.analysis().is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["body"]["status"], "halted");
        assert_eq!(json["body"]["reason"], "NoReadableText");
    }
}
