//! Set-based gap analysis between resume skills and required job skills

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strsim::jaro_winkler;

/// Matched and missing skills, lower-case and sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl GapResult {
    pub fn required_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

fn canonical_set<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Compare resume skills against job skills, ignoring case and surrounding
/// whitespace. Output order depends only on the two sets, never on the input
/// order.
pub fn gap<A: AsRef<str>, B: AsRef<str>>(resume_skills: &[A], job_skills: &[B]) -> GapResult {
    let resume = canonical_set(resume_skills);
    let job = canonical_set(job_skills);

    GapResult {
        matched: resume.intersection(&job).cloned().collect(),
        missing: job.difference(&resume).cloned().collect(),
    }
}

/// Percentage of required skills matched, rounded to 2 decimals with exact
/// ties going to the even digit (3.125 becomes 3.12, 9.375 becomes 9.38).
/// Zero required skills scores 0.
pub fn match_score(matched_count: usize, total_required: usize) -> f64 {
    if total_required == 0 {
        return 0.0;
    }
    let ratio = matched_count as f64 / total_required as f64 * 100.0;
    (ratio * 100.0).round_ties_even() / 100.0
}

/// For each missing skill, the resume skills that look like a near miss
/// (e.g. `postgres` vs `postgresql`).
pub fn related_skills<S: AsRef<str>>(
    missing: &[String],
    resume_skills: &[S],
    threshold: f64,
) -> BTreeMap<String, Vec<String>> {
    let resume = canonical_set(resume_skills);
    let mut related = BTreeMap::new();

    for skill in missing {
        let close: Vec<String> = resume
            .iter()
            .filter(|candidate| *candidate != skill)
            .filter(|candidate| jaro_winkler(skill, candidate) >= threshold)
            .cloned()
            .collect();
        if !close.is_empty() {
            related.insert(skill.clone(), close);
        }
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gap_basic() {
        let result = gap(&["PYTHON", "SQL", "EXCEL"], &["python", "sql", "machine learning"]);
        assert_eq!(result.matched, vec!["python", "sql"]);
        assert_eq!(result.missing, vec!["machine learning"]);
        assert_eq!(match_score(result.matched.len(), 3), 66.67);
    }

    #[test]
    fn test_gap_normalizes_whitespace_and_duplicates() {
        let result = gap(&[" Tableau ", "tableau"], &["TABLEAU", "  ", "Statistics"]);
        assert_eq!(result.matched, vec!["tableau"]);
        assert_eq!(result.missing, vec!["statistics"]);
        assert_eq!(result.required_count(), 2);
    }

    #[test]
    fn test_match_score_edges() {
        assert_eq!(match_score(0, 0), 0.0);
        assert_eq!(match_score(5, 0), 0.0);
        assert_eq!(match_score(0, 4), 0.0);
        assert_eq!(match_score(4, 4), 100.0);
        assert_eq!(match_score(1, 3), 33.33);
        assert_eq!(match_score(1, 8), 12.5);
    }

    #[test]
    fn test_match_score_ties_round_to_even() {
        assert_eq!(match_score(1, 32), 3.12);
        assert_eq!(match_score(5, 32), 15.62);
        assert_eq!(match_score(3, 32), 9.38);
        assert_eq!(match_score(2, 3), 66.67);
    }

    #[test]
    fn test_related_skills() {
        let related = related_skills(
            &["postgresql".to_string(), "kubernetes".to_string()],
            &["Postgres", "excel"],
            0.85,
        );
        assert_eq!(related.get("postgresql"), Some(&vec!["postgres".to_string()]));
        assert!(!related.contains_key("kubernetes"));
    }

    proptest! {
        #[test]
        fn gap_matches_set_algebra(
            a in prop::collection::vec("[a-zA-Z ]{0,8}", 0..12),
            b in prop::collection::vec("[a-zA-Z ]{0,8}", 0..12),
        ) {
            let result = gap(&a, &b);
            let sa = canonical_set(&a);
            let sb = canonical_set(&b);

            let matched: BTreeSet<String> = result.matched.iter().cloned().collect();
            let missing: BTreeSet<String> = result.missing.iter().cloned().collect();
            prop_assert_eq!(matched, sa.intersection(&sb).cloned().collect::<BTreeSet<_>>());
            prop_assert_eq!(missing, sb.difference(&sa).cloned().collect::<BTreeSet<_>>());

            let mut sorted = result.matched.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &result.matched);
        }

        #[test]
        fn gap_is_order_independent(
            mut a in prop::collection::vec("[a-z]{1,6}", 0..10),
            mut b in prop::collection::vec("[a-z]{1,6}", 0..10),
        ) {
            let first = gap(&a, &b);
            a.reverse();
            b.reverse();
            prop_assert_eq!(first, gap(&a, &b));
        }

        #[test]
        fn match_score_in_range(t in 1usize..500, m_frac in 0.0f64..=1.0) {
            let m = ((t as f64) * m_frac).floor() as usize;
            let score = match_score(m, t);
            prop_assert!((0.0..=100.0).contains(&score));
            let expected = ((m as f64 / t as f64 * 100.0) * 100.0).round_ties_even() / 100.0;
            prop_assert_eq!(score, expected);
        }
    }
}
