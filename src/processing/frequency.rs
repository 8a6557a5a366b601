//! Occurrence counting and strength buckets for detected skills

use crate::config::ScoringConfig;
use crate::error::{Result, SkillGapError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lower-case skill -> non-overlapping occurrence count
pub type SkillFrequency = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strength {
    Low,
    Medium,
    High,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Low => write!(f, "Low"),
            Strength::Medium => write!(f, "Medium"),
            Strength::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthThresholds {
    pub medium: usize,
    pub high: usize,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self { medium: 2, high: 4 }
    }
}

impl From<&ScoringConfig> for StrengthThresholds {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            medium: config.medium_threshold,
            high: config.high_threshold,
        }
    }
}

impl StrengthThresholds {
    pub fn classify(&self, count: usize) -> Strength {
        if count >= self.high {
            Strength::High
        } else if count >= self.medium {
            Strength::Medium
        } else {
            Strength::Low
        }
    }
}

/// Strength with the default thresholds: 0-1 Low, 2-3 Medium, 4+ High
pub fn strength(count: usize) -> Strength {
    StrengthThresholds::default().classify(count)
}

/// Count non-overlapping occurrences of every skill in `text`.
///
/// Counting is per skill, so `sql` is still counted inside `mysql`. All
/// skills are matched in a single pass over the text.
pub fn frequency<S: AsRef<str>>(text: &str, skills: &[S]) -> Result<SkillFrequency> {
    let mut counts: SkillFrequency = skills
        .iter()
        .map(|s| (s.as_ref().trim().to_lowercase(), 0))
        .collect();

    let patterns: Vec<&str> = counts
        .keys()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if patterns.is_empty() || text.is_empty() {
        return Ok(counts);
    }

    let matcher = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(&patterns)
        .map_err(|e| SkillGapError::AnalysisFailed(format!("Failed to build skill counter: {}", e)))?;

    let mut tallies = vec![0usize; patterns.len()];
    let mut last_end = vec![0usize; patterns.len()];
    for mat in matcher.find_overlapping_iter(text) {
        let id = mat.pattern().as_usize();
        if mat.start() >= last_end[id] {
            tallies[id] += 1;
            last_end[id] = mat.end();
        }
    }

    let tallied: Vec<(String, usize)> = patterns
        .iter()
        .zip(tallies)
        .map(|(pattern, count)| (pattern.to_string(), count))
        .collect();
    counts.extend(tallied);

    Ok(counts)
}

/// Like [`frequency`], but skills shorter than `min_substring_len` are only
/// counted as whole words, so `r` is not tallied inside every word with an r.
pub fn bounded_frequency<S: AsRef<str>>(
    text: &str,
    skills: &[S],
    min_substring_len: usize,
) -> Result<SkillFrequency> {
    let (short, long): (Vec<&str>, Vec<&str>) = skills
        .iter()
        .map(|s| s.as_ref())
        .partition(|s| s.trim().chars().count() < min_substring_len);

    let mut counts = frequency(text, &long)?;
    if short.is_empty() {
        return Ok(counts);
    }

    let lowered = text.to_lowercase();
    for skill in short {
        let key = skill.trim().to_lowercase();
        let count = lowered
            .split_whitespace()
            .map(|token| token.trim_end_matches('.'))
            .filter(|token| !key.is_empty() && *token == key)
            .count();
        counts.insert(key, count);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_buckets() {
        assert_eq!(strength(0), Strength::Low);
        assert_eq!(strength(1), Strength::Low);
        assert_eq!(strength(2), Strength::Medium);
        assert_eq!(strength(3), Strength::Medium);
        assert_eq!(strength(4), Strength::High);
        assert_eq!(strength(40), Strength::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = StrengthThresholds { medium: 1, high: 10 };
        assert_eq!(thresholds.classify(1), Strength::Medium);
        assert_eq!(thresholds.classify(9), Strength::Medium);
        assert_eq!(thresholds.classify(10), Strength::High);
    }

    #[test]
    fn test_repeated_skill_is_high() {
        let text = "sql reports, sql tuning, sql server, advanced sql and sql";
        let counts = frequency(text, &["SQL"]).unwrap();
        assert_eq!(counts["sql"], 5);
        assert_eq!(strength(counts["sql"]), Strength::High);
    }

    #[test]
    fn test_non_overlapping_and_nested_counts() {
        let counts = frequency("aaaa mysql sql", &["aa", "sql", "mysql", "rust"]).unwrap();
        assert_eq!(counts["aa"], 2);
        assert_eq!(counts["sql"], 2);
        assert_eq!(counts["mysql"], 1);
        assert_eq!(counts["rust"], 0);
    }

    #[test]
    fn test_short_skills_count_whole_words_only() {
        let text = "rust r and react for recruiters. c# and c. go r.";
        let counts = bounded_frequency(text, &["r", "c#", "go", "rust"], 3).unwrap();
        assert_eq!(counts["r"], 2);
        assert_eq!(counts["c#"], 1);
        assert_eq!(counts["go"], 1);
        assert_eq!(counts["rust"], 1);

        assert_eq!(frequency(text, &["r"]).unwrap()["r"], 8);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(frequency("python", &[] as &[&str]).unwrap().is_empty());
        assert_eq!(frequency("", &["python"]).unwrap()["python"], 0);
    }
}
