//! Surfaces technical-looking terms the lexicon does not know about.
//! Best effort only: results are candidates for a human to review.

use crate::processing::lexicon::{SkillLexicon, StopwordSet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

static CANDIDATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9+.#]+").expect("Invalid candidate token regex"));

pub struct UncategorizedDetector<'a> {
    lexicon: &'a SkillLexicon,
    stopwords: &'a StopwordSet,
    /// Single words of multi-word phrases ("power", "bi" from "power bi")
    phrase_words: HashSet<&'a str>,
    min_len: usize,
}

impl<'a> UncategorizedDetector<'a> {
    pub fn new(lexicon: &'a SkillLexicon, stopwords: &'a StopwordSet, min_len: usize) -> Self {
        let phrase_words = lexicon
            .all_skills()
            .filter(|skill| skill.contains(' '))
            .flat_map(|skill| skill.split(' '))
            .collect();

        Self {
            lexicon,
            stopwords,
            phrase_words,
            min_len: min_len.max(2),
        }
    }

    /// Candidate skills in `normalized` that are not lexicon phrases or words
    /// of one, not stopwords and not already categorized. Sorted,
    /// deduplicated, upper-cased.
    pub fn detect(&self, normalized: &str, known_categorized_lower: &HashSet<String>) -> Vec<String> {
        let lowered = normalized.to_lowercase();
        let mut accepted = BTreeSet::new();

        for m in CANDIDATE_TOKEN.find_iter(&lowered) {
            // "python." at the end of a sentence is still "python"
            let token = m.as_str().trim_end_matches('.');
            if token.len() < self.min_len {
                continue;
            }
            if self.lexicon.contains(token)
                || self.phrase_words.contains(token)
                || self.stopwords.contains(token)
                || known_categorized_lower.contains(token)
            {
                continue;
            }
            accepted.insert(token.to_uppercase());
        }

        accepted.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::lexicon::SkillCatalog;
    use crate::processing::normalizer::normalize;

    fn detect(text: &str, known: &[&str]) -> Vec<String> {
        let catalog = SkillCatalog::builtin();
        let detector = UncategorizedDetector::new(&catalog.lexicon, &catalog.stopwords, 2);
        let known: HashSet<String> = known.iter().map(|s| s.to_string()).collect();
        detector.detect(&normalize(text), &known)
    }

    #[test]
    fn test_surfaces_unknown_terms() {
        let found = detect("Experience with Snowflake, dbt and Python.", &[]);
        assert_eq!(found, vec!["DBT", "SNOWFLAKE"]);
    }

    #[test]
    fn test_filters_known_and_stopwords() {
        let found = detect("I know the Airflow scheduler and airflow", &["scheduler"]);
        assert_eq!(found, vec!["AIRFLOW"]);
    }

    #[test]
    fn test_keeps_symbol_tokens_and_strips_trailing_period() {
        let found = detect("Shipped with Next.js and F#. Then Vite.", &[]);
        assert_eq!(found, vec!["F#", "NEXT.JS", "SHIPPED", "VITE"]);
    }

    #[test]
    fn test_words_of_known_phrases_are_not_candidates() {
        let found = detect("Power BI, machine learning and Looker Studio", &[]);
        assert_eq!(found, vec!["STUDIO"]);
    }

    #[test]
    fn test_ignores_single_letters_and_numbers() {
        assert!(detect("a 2024 b 42", &[]).is_empty());
        assert!(detect("", &[]).is_empty());
    }
}
