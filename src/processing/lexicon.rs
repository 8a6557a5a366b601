//! Skill lexicon, stopword set and curated learning roadmaps
//!
//! The built-in tables are built once per process and handed to the pipeline
//! by reference. A TOML lexicon file can replace them wholesale.

use crate::error::{Result, SkillGapError};
use crate::processing::normalizer::normalize;
use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Fixed taxonomy of category -> canonical skill phrases
#[derive(Debug, Clone)]
pub struct SkillLexicon {
    categories: Vec<(String, Vec<String>)>,
    reverse_index: HashMap<String, String>,
}

/// Lower-case words never reported as uncategorized skills
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

/// Curated learning steps keyed by lower-case skill
pub type Roadmap = BTreeMap<String, Vec<String>>;

/// Everything the pipeline needs to know about skills, bundled for injection
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    pub lexicon: SkillLexicon,
    pub stopwords: StopwordSet,
    pub roadmap: Roadmap,
}

/// On-disk layout of a custom lexicon file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconFile {
    pub categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub roadmap: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

static BUILTIN: Lazy<SkillCatalog> = Lazy::new(|| SkillCatalog {
    lexicon: SkillLexicon::builtin_categories(),
    stopwords: StopwordSet::builtin(),
    roadmap: builtin_roadmap(),
});

impl SkillLexicon {
    /// Build a lexicon; phrases are stored in normalized form so they compare
    /// equal to normalized document text (`scikit-learn` becomes `scikitlearn`).
    ///
    /// A phrase listed under several categories stays in each of them, while
    /// the reverse index keeps the category seen last.
    pub fn new<I, C, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<S>)>,
        C: Into<String>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut reverse_index = HashMap::new();

        for (category, skills) in categories {
            let category = category.into();
            let mut phrases: Vec<String> = Vec::with_capacity(skills.len());
            for skill in skills {
                let phrase = normalize(skill.as_ref()).trim().to_string();
                if phrase.is_empty() || phrases.contains(&phrase) {
                    continue;
                }
                reverse_index.insert(phrase.clone(), category.clone());
                phrases.push(phrase);
            }
            ordered.push((category, phrases));
        }

        Self {
            categories: ordered,
            reverse_index,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, skills)| (category.as_str(), skills.as_slice()))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn skills_in(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(category))
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.reverse_index
            .get(normalize(skill).trim())
            .map(|c| c.as_str())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.reverse_index.contains_key(skill)
    }

    /// Every distinct phrase across all categories
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.reverse_index.keys().map(|s| s.as_str())
    }

    pub fn skill_count(&self) -> usize {
        self.reverse_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse_index.is_empty()
    }

    fn builtin_categories() -> Self {
        Self::new(vec![
            (
                "Programming Languages",
                vec![
                    "python", "java", "javascript", "typescript", "c++", "c#", "c", "r", "go",
                    "rust", "ruby", "php", "swift", "kotlin", "scala", "matlab", "bash",
                ],
            ),
            (
                "Data Science & Machine Learning",
                vec![
                    "machine learning", "deep learning", "data science",
                    "artificial intelligence", "statistics", "natural language processing",
                    "computer vision", "pandas", "numpy", "scikit-learn", "tensorflow",
                    "pytorch", "keras",
                ],
            ),
            (
                "Data Analysis & BI",
                vec![
                    "excel", "power bi", "tableau", "data analysis", "data visualization",
                    "looker", "spark", "hadoop",
                ],
            ),
            (
                "Databases",
                vec!["sql", "mysql", "postgresql", "mongodb", "sqlite", "redis", "oracle"],
            ),
            (
                "Web Development",
                vec![
                    "html", "css", "react", "react native", "angular", "vue", "node.js",
                    "django", "flask", "express", "rest api", "graphql",
                ],
            ),
            (
                "Cloud & DevOps",
                vec![
                    "aws", "azure", "gcp", "docker", "kubernetes", "git", "linux", "jenkins",
                    "terraform", "ansible",
                ],
            ),
        ])
    }
}

impl StopwordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn builtin() -> Self {
        Self::new([
            // common English
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in",
            "is", "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "this",
            "but", "they", "have", "had", "what", "which", "she", "do", "how", "their", "if",
            "up", "out", "many", "then", "them", "these", "so", "some", "her", "would", "make",
            "like", "into", "him", "more", "no", "could", "my", "than", "been", "who", "now",
            "did", "get", "may", "over", "new", "only", "me", "our", "just", "very", "after",
            "also", "any", "same", "such", "both", "each", "other", "all", "about", "we", "you",
            "your", "or", "not", "can", "using", "used", "use", "well", "including", "across",
            "within", "through", "while", "per", "via", "etc", "i", "am", "know", "must",
            "should", "want", "need", "needs",
            // resume and job posting vocabulary
            "experience", "experienced", "years", "year", "skills", "skill", "technical",
            "technologies", "tools", "expertise", "proficient", "proficiency", "knowledge",
            "strong", "ability", "work", "worked", "working", "team", "teams", "project",
            "projects", "responsible", "developed", "built", "designed", "implemented",
            "managed", "led", "created", "improved", "role", "company", "summary", "education",
            "university", "bachelor", "master", "degree", "certifications", "certification",
            "requirements", "required", "preferred", "plus", "looking", "candidate", "join",
            "responsibilities", "qualifications", "job", "position", "senior", "junior",
            "engineer", "developer", "analyst", "intern", "internship", "present", "email",
            "phone", "linkedin", "github", "contact", "profile", "objective", "data",
            "development", "software", "systems", "system", "applications", "application",
            "solutions", "business", "support", "good", "excellent", "communication",
        ])
    }
}

impl SkillCatalog {
    /// The process-wide built-in catalog
    pub fn builtin() -> &'static SkillCatalog {
        &BUILTIN
    }

    /// Load a catalog from a TOML lexicon file.
    ///
    /// Sections missing from the file fall back to the built-in roadmap and
    /// stopwords.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: LexiconFile = toml::from_str(&content).map_err(|e| {
            SkillGapError::Lexicon(format!("Failed to parse lexicon '{}': {}", path.display(), e))
        })?;
        let catalog = Self::from_lexicon_file(file)?;
        info!(
            "Loaded lexicon from {} ({} skills in {} categories)",
            path.display(),
            catalog.lexicon.skill_count(),
            catalog.lexicon.category_names().len()
        );
        Ok(catalog)
    }

    pub fn from_lexicon_file(file: LexiconFile) -> Result<Self> {
        let lexicon = SkillLexicon::new(file.categories);
        if lexicon.is_empty() {
            return Err(SkillGapError::Lexicon(
                "lexicon defines no skills".to_string(),
            ));
        }

        let stopwords = if file.stopwords.is_empty() {
            BUILTIN.stopwords.clone()
        } else {
            StopwordSet::new(file.stopwords)
        };

        let roadmap = if file.roadmap.is_empty() {
            BUILTIN.roadmap.clone()
        } else {
            file.roadmap
                .into_iter()
                .map(|(skill, steps)| (skill.trim().to_lowercase(), steps))
                .collect()
        };

        debug!("Custom lexicon uses {} stopwords", stopwords.len());

        Ok(Self {
            lexicon,
            stopwords,
            roadmap,
        })
    }
}

fn builtin_roadmap() -> Roadmap {
    let entries: [(&str, &[&str]); 8] = [
        (
            "deep learning",
            &[
                "Neural Networks basics",
                "Activation functions",
                "CNN and RNN",
                "PyTorch or TensorFlow projects",
            ],
        ),
        (
            "statistics",
            &[
                "Descriptive statistics",
                "Probability theory",
                "Hypothesis testing",
                "Regression analysis",
            ],
        ),
        (
            "tableau",
            &[
                "Basic charts and filters",
                "Dashboards and storytelling",
                "Connecting Tableau with datasets",
                "Mini visualization projects",
            ],
        ),
        (
            "sql",
            &[
                "Joins and subqueries",
                "Window functions",
                "Query optimization",
                "SQL case study projects",
            ],
        ),
        (
            "machine learning",
            &[
                "Supervised vs unsupervised learning",
                "Regression and classification models",
                "Model evaluation and cross-validation",
                "End-to-end scikit-learn project",
            ],
        ),
        (
            "power bi",
            &[
                "Power Query data preparation",
                "Data modeling and relationships",
                "DAX measures",
                "Interactive report project",
            ],
        ),
        (
            "python",
            &[
                "Syntax, data types and control flow",
                "Functions, modules and packages",
                "pandas and NumPy for data work",
                "Scripting and automation projects",
            ],
        ),
        (
            "excel",
            &[
                "Formulas and lookups",
                "Pivot tables",
                "Charts and conditional formatting",
                "Dashboard workbook project",
            ],
        ),
    ];

    entries
        .iter()
        .map(|(skill, steps)| {
            (
                skill.to_string(),
                steps.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_lexicon_has_no_cross_category_duplicates() {
        let lexicon = &SkillCatalog::builtin().lexicon;
        let total: usize = lexicon.categories().map(|(_, skills)| skills.len()).sum();
        assert_eq!(total, lexicon.skill_count());
    }

    #[test]
    fn test_reverse_index() {
        let lexicon = &SkillCatalog::builtin().lexicon;
        assert_eq!(lexicon.category_of("SQL"), Some("Databases"));
        assert_eq!(lexicon.category_of("machine learning"), Some("Data Science & Machine Learning"));
        assert_eq!(lexicon.category_of("cobol"), None);
    }

    #[test]
    fn test_duplicate_phrase_last_write_wins() {
        let lexicon = SkillLexicon::new(vec![
            ("First", vec!["Python", "sql"]),
            ("Second", vec!["python "]),
        ]);
        assert_eq!(lexicon.category_of("python"), Some("Second"));
        assert_eq!(lexicon.skills_in("first").unwrap(), &["python", "sql"]);
        assert_eq!(lexicon.skill_count(), 2);
    }

    #[test]
    fn test_builtin_roadmap_entries() {
        let roadmap = &SkillCatalog::builtin().roadmap;
        assert_eq!(roadmap["tableau"].len(), 4);
        assert_eq!(roadmap["sql"][0], "Joins and subqueries");
    }

    #[test]
    fn test_load_custom_lexicon_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
stopwords = ["foo"]

[categories]
Languages = ["Elixir", "erlang"]

[roadmap]
Elixir = ["Pattern matching", "OTP basics"]
"#
        )
        .unwrap();

        let catalog = SkillCatalog::from_file(file.path()).unwrap();
        assert!(catalog.lexicon.contains("elixir"));
        assert!(!catalog.lexicon.contains("python"));
        assert!(catalog.stopwords.contains("foo"));
        assert_eq!(catalog.roadmap["elixir"].len(), 2);
    }

    #[test]
    fn test_empty_lexicon_file_rejected() {
        let file = LexiconFile {
            categories: BTreeMap::new(),
            roadmap: BTreeMap::new(),
            stopwords: Vec::new(),
        };
        assert!(matches!(
            SkillCatalog::from_lexicon_file(file),
            Err(SkillGapError::Lexicon(_))
        ));
    }
}
