//! Skill extraction and gap analysis

pub mod normalizer;
pub mod lexicon;
pub mod extractor;
pub mod uncategorized;
pub mod frequency;
pub mod gap;
pub mod learning_plan;
pub mod pipeline;
