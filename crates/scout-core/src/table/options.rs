//! Filter choices derived from the loaded data

use std::collections::BTreeSet;

use crate::{Candidate, SkillLevel};

/// Distinct skill levels present in `candidates`, sorted by name
pub fn level_options(candidates: &[Candidate]) -> Vec<SkillLevel> {
    let mut levels: Vec<SkillLevel> = candidates
        .iter()
        .flat_map(|candidate| candidate.skills.iter().map(|skill| skill.level))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    levels.sort_by_key(|level| level.to_string());
    levels
}

/// Distinct skill languages present in `candidates`, sorted
pub fn skill_options(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .flat_map(|candidate| candidate.skills.iter().map(|skill| skill.language.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
