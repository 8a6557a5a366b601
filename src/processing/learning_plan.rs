//! Learning plans for missing skills
//!
//! Curated roadmaps are used verbatim. Anything else gets a generic five step
//! plan plus search links; links are only built, never fetched.

use crate::processing::lexicon::Roadmap;
use log::debug;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanSource {
    Curated,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPlan {
    pub skill: String,
    pub source: PlanSource,
    pub steps: Vec<String>,
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub entries: Vec<SkillPlan>,
}

impl LearningPlan {
    pub fn get(&self, skill: &str) -> Option<&SkillPlan> {
        let key = skill.trim().to_lowercase();
        self.entries.iter().find(|entry| entry.skill == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Build a plan entry for every missing skill, in the order given
pub fn plan<S: AsRef<str>>(missing_skills: &[S], roadmap: &Roadmap) -> LearningPlan {
    let entries = missing_skills
        .iter()
        .map(|skill| skill.as_ref().trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .map(|skill| match roadmap.get(&skill) {
            Some(steps) => {
                debug!("Curated roadmap for '{}'", skill);
                SkillPlan {
                    skill,
                    source: PlanSource::Curated,
                    steps: steps.clone(),
                    resources: Vec::new(),
                }
            }
            None => generic_plan(skill),
        })
        .collect();

    LearningPlan { entries }
}

fn generic_plan(skill: String) -> SkillPlan {
    let steps = vec![
        format!("Learn the fundamentals of {} from an introductory tutorial", skill),
        format!("Take a structured course covering core {} concepts", skill),
        format!("Practice {} with small hands-on exercises", skill),
        format!("Build a portfolio project that uses {}", skill),
        format!("Add {} to your resume with a concrete example of how you applied it", skill),
    ];
    let resources = resource_links(&skill);

    SkillPlan {
        skill,
        source: PlanSource::Generic,
        steps,
        resources,
    }
}

/// Video, course and general search links for a skill
pub fn resource_links(skill: &str) -> Vec<ResourceLink> {
    let query: String = form_urlencoded::byte_serialize(skill.as_bytes()).collect();

    vec![
        ResourceLink {
            label: "Video tutorials".to_string(),
            url: format!("https://www.youtube.com/results?search_query={}+tutorial", query),
        },
        ResourceLink {
            label: "Courses".to_string(),
            url: format!("https://www.coursera.org/search?query={}", query),
        },
        ResourceLink {
            label: "Web search".to_string(),
            url: format!("https://www.google.com/search?q=learn+{}", query),
        },
    ]
}
