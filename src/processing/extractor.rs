//! Lexicon-driven skill extraction
//!
//! Matching is a plain substring scan over normalized text, so short phrases
//! can fire inside longer words. Known false positives that are accepted:
//! `java` inside `javascript`, `sql` inside `mysql`/`postgresql`, `react`
//! inside `react native`, `excel` inside `excellent`, `express` inside
//! `expression`. Phrases shorter than the configured minimum (`r`, `c`, `go`,
//! `c#` by default) are only picked up from a skills-style section, and their
//! frequency counts whole words rather than substrings.

use crate::config::ExtractionConfig;
use crate::processing::lexicon::SkillLexicon;
use crate::processing::normalizer::normalize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Skills found in one document, grouped by category, upper-cased for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkillSet {
    by_category: BTreeMap<String, Vec<String>>,
}

impl ExtractedSkillSet {
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_category
            .iter()
            .map(|(category, skills)| (category.as_str(), skills.as_slice()))
    }

    /// Distinct display names across categories, sorted
    pub fn skills(&self) -> Vec<String> {
        self.by_category
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct lower-case names across categories, sorted
    pub fn lowercase_skills(&self) -> Vec<String> {
        self.by_category
            .values()
            .flatten()
            .map(|s| s.to_lowercase())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.skills().len()
    }

    pub fn contains(&self, skill: &str) -> bool {
        let wanted = skill.trim().to_uppercase();
        self.by_category.values().flatten().any(|s| *s == wanted)
    }
}

pub struct SkillExtractor<'a> {
    lexicon: &'a SkillLexicon,
    section_headers: Vec<String>,
    section_window: usize,
    min_substring_len: usize,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(lexicon: &'a SkillLexicon, config: &ExtractionConfig) -> Self {
        Self {
            lexicon,
            section_headers: config
                .section_headers
                .iter()
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
            section_window: config.section_window,
            min_substring_len: config.min_substring_len,
        }
    }

    pub fn with_defaults(lexicon: &'a SkillLexicon) -> Self {
        Self::new(lexicon, &ExtractionConfig::default())
    }

    /// Extract categorized skills from normalized text.
    ///
    /// `raw` is the text before normalization; when present the section scan
    /// runs over it so list separators (commas, bullets, line breaks) are
    /// still there to split on.
    pub fn extract(&self, normalized: &str, raw: Option<&str>) -> ExtractedSkillSet {
        let mut found: HashSet<&str> = self.substring_matches(normalized);

        let section_source = match raw {
            Some(raw) => raw.to_lowercase(),
            None => normalized.to_string(),
        };
        let section_hits = self.section_matches(&section_source);
        debug!(
            "Skill scan: {} substring matches, {} section matches",
            found.len(),
            section_hits.len()
        );
        found.extend(section_hits);

        let mut by_category = BTreeMap::new();
        for (category, skills) in self.lexicon.categories() {
            let matched: Vec<String> = skills
                .iter()
                .filter(|skill| found.contains(skill.as_str()))
                .map(|skill| skill.to_uppercase())
                .collect();
            if !matched.is_empty() {
                by_category.insert(category.to_string(), matched);
            }
        }

        ExtractedSkillSet { by_category }
    }

    fn substring_matches(&self, normalized: &str) -> HashSet<&'a str> {
        self.lexicon
            .all_skills()
            .filter(|skill| skill.len() >= self.min_substring_len)
            .filter(|skill| normalized.contains(skill))
            .collect()
    }

    /// Look a fixed window past each header keyword and keep list items that
    /// are exactly a known phrase.
    fn section_matches(&self, source: &str) -> HashSet<&'a str> {
        let mut hits = HashSet::new();

        for header in &self.section_headers {
            let Some(pos) = source.find(header.as_str()) else {
                continue;
            };
            let window: String = source[pos + header.len()..]
                .chars()
                .take(self.section_window)
                .collect();

            for token in window.split(is_list_separator) {
                let candidate = normalize(token);
                let candidate = candidate.trim();
                if candidate.is_empty() {
                    continue;
                }
                if let Some(skill) = self.lexicon.all_skills().find(|s| *s == candidate) {
                    hits.insert(skill);
                }
            }
        }

        hits
    }
}

fn is_list_separator(c: char) -> bool {
    matches!(
        c,
        ',' | '\n' | '\r' | '-' | '|' | ';' | '•' | '●' | '▪' | '·' | '*' | '◦'
    )
}
