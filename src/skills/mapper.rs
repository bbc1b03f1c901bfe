//! Mapping extracted skills onto job requirements

use crate::library::skills::canonicalize;
use crate::skills::extractor::{ExtractedSkill, SkillMatcher};
use crate::skills::sections::SectionType;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_CONFIDENCE: u32 = 50;
const STRONG_REQUIRED_THRESHOLD: u32 = 70;
const STRONG_PREFERRED_THRESHOLD: u32 = 60;
const REQUIRED_WEIGHT: f64 = 1.0;
const PREFERRED_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Required,
    Preferred,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Required => write!(f, "required"),
            Importance::Preferred => write!(f, "preferred"),
        }
    }
}

/// One skill the job asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub skill_name: String,
    pub importance: Importance,
    pub weight: f64,
}

impl RequirementEntry {
    pub fn required(skill_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            importance: Importance::Required,
            weight: REQUIRED_WEIGHT,
        }
    }

    pub fn preferred(skill_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            importance: Importance::Preferred,
            weight: PREFERRED_WEIGHT,
        }
    }

    /// Canonical spelling when the skill is in the library, else lowercased input.
    pub fn normalized_name(&self) -> String {
        normalize_skill(&self.skill_name)
    }
}

/// Job requirements as supplied by the persistence collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub job_description: String,
}

impl JobRequirements {
    /// Required entries first, then preferred, deduplicated by normalized name.
    ///
    /// With no explicit skills at all, required skills are derived from the
    /// job description using the skill library.
    pub fn requirement_entries(&self) -> Vec<RequirementEntry> {
        let derived: Vec<String>;
        let required: &[String] = if self.required_skills.is_empty() && self.preferred_skills.is_empty() {
            derived = SkillMatcher::global()
                .canonical_mentions(&self.job_description)
                .into_iter()
                .map(str::to_string)
                .collect();
            if !derived.is_empty() {
                debug!("Derived {} required skills from the job description", derived.len());
            }
            &derived
        } else {
            &self.required_skills
        };

        let mut entries: Vec<RequirementEntry> = Vec::new();
        let candidates = required
            .iter()
            .map(|s| RequirementEntry::required(s.trim()))
            .chain(self.preferred_skills.iter().map(|s| RequirementEntry::preferred(s.trim())));

        for entry in candidates {
            if entry.skill_name.is_empty() {
                continue;
            }
            let name = entry.normalized_name();
            if entries.iter().any(|e| e.normalized_name() == name) {
                continue;
            }
            entries.push(entry);
        }
        entries
    }
}

/// Evidence attached to a matched requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRequirement {
    pub requirement: RequirementEntry,
    pub matched_skill: String,
    pub confidence: u32,
    pub evidence: String,
    pub source_section: SectionType,
    pub mention_count: usize,
}

/// A resume skill the job did not ask for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraSkill {
    pub skill_name: String,
    pub category: String,
    pub source_section: SectionType,
    pub mention_count: usize,
    pub section_weight: f64,
}

/// Classified skill fit for one screening session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMapping {
    pub strong: Vec<MatchedRequirement>,
    pub weak: Vec<MatchedRequirement>,
    pub missing: Vec<RequirementEntry>,
    pub extra: Vec<ExtraSkill>,
    pub skill_match_score: u32,
    pub total_required: usize,
    pub total_preferred: usize,
}

impl SkillMapping {
    pub fn strong_required(&self) -> impl Iterator<Item = &MatchedRequirement> {
        self.strong
            .iter()
            .filter(|m| m.requirement.importance == Importance::Required)
    }

    pub fn weak_required(&self) -> impl Iterator<Item = &MatchedRequirement> {
        self.weak
            .iter()
            .filter(|m| m.requirement.importance == Importance::Required)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Weight of an answer to a question of this priority in session aggregates.
    pub fn answer_weight(&self) -> f64 {
        match self {
            Priority::High => 1.5,
            Priority::Medium => 1.0,
            Priority::Low => 0.7,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A skill flagged for targeted questioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSkill {
    pub skill_name: String,
    pub priority: Priority,
    pub reason: String,
    pub importance: Importance,
}

fn normalize_skill(name: &str) -> String {
    canonicalize(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.trim().to_lowercase())
}

/// `needle` occurs in `haystack` on word boundaries ("rest" in "rest api", not "java" in "javascript").
fn contains_as_words(haystack: &str, needle: &str) -> bool {
    if needle.len() < 2 || needle.len() >= haystack.len() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        crate::analysis::text::is_whole_word(haystack, start, start + needle.len())
    })
}

fn find_matching_skill<'a>(
    requirement: &RequirementEntry,
    extracted: &'a [ExtractedSkill],
) -> Option<&'a ExtractedSkill> {
    let raw = requirement.skill_name.trim().to_lowercase();
    let normalized = requirement.normalized_name();

    extracted
        .iter()
        .find(|s| s.skill_name == raw || s.original_match_text.to_lowercase() == raw)
        .or_else(|| extracted.iter().find(|s| s.skill_name == normalized))
        .or_else(|| {
            extracted.iter().find(|s| {
                contains_as_words(&s.skill_name, &normalized) || contains_as_words(&normalized, &s.skill_name)
            })
        })
}

/// Confidence that a skill is really held: mentions, context richness and action keywords.
pub fn skill_confidence(skill: &ExtractedSkill) -> u32 {
    let mut confidence = BASE_CONFIDENCE;
    confidence += (skill.mention_count as u32 * 10).min(25);

    let context_len = skill.context.chars().count();
    if context_len > 50 {
        confidence += 10;
    }
    if context_len > 100 {
        confidence += 10;
    }

    let context = skill.context.to_lowercase();
    let keyword_groups: [&[&str]; 3] = [
        &["built", "developed"],
        &["led", "managed"],
        &["years", "experience"],
    ];
    for group in keyword_groups {
        if group.iter().any(|k| context.contains(k)) {
            confidence += 5;
        }
    }

    confidence.min(100)
}

/// Classify each requirement as strong, weak or missing, and collect extra skills.
pub fn map_to_requirements(
    extracted: &[ExtractedSkill],
    requirements: &[RequirementEntry],
) -> SkillMapping {
    let mut strong = Vec::new();
    let mut weak = Vec::new();
    let mut missing = Vec::new();
    let mut used: Vec<&str> = Vec::new();

    for requirement in requirements {
        match find_matching_skill(requirement, extracted) {
            Some(skill) => {
                used.push(&skill.skill_name);
                let confidence = skill_confidence(skill);
                let threshold = match requirement.importance {
                    Importance::Required => STRONG_REQUIRED_THRESHOLD,
                    Importance::Preferred => STRONG_PREFERRED_THRESHOLD,
                };
                let matched = MatchedRequirement {
                    requirement: requirement.clone(),
                    matched_skill: skill.skill_name.clone(),
                    confidence,
                    evidence: skill.evidence_snippet.clone(),
                    source_section: skill.source_section,
                    mention_count: skill.mention_count,
                };
                if confidence >= threshold {
                    debug!("Requirement '{}' strong ({})", requirement.skill_name, confidence);
                    strong.push(matched);
                } else {
                    debug!("Requirement '{}' weak ({})", requirement.skill_name, confidence);
                    weak.push(matched);
                }
            }
            None => {
                debug!("Requirement '{}' missing", requirement.skill_name);
                missing.push(requirement.clone());
            }
        }
    }

    let extra = extracted
        .iter()
        .filter(|s| !used.contains(&s.skill_name.as_str()))
        .map(|s| ExtraSkill {
            skill_name: s.skill_name.clone(),
            category: s.category.clone(),
            source_section: s.source_section,
            mention_count: s.mention_count,
            section_weight: s.section_weight,
        })
        .collect();

    let total_required = requirements
        .iter()
        .filter(|r| r.importance == Importance::Required)
        .count();
    let total_preferred = requirements.len() - total_required;

    let mut mapping = SkillMapping {
        strong,
        weak,
        missing,
        extra,
        skill_match_score: 0,
        total_required,
        total_preferred,
    };
    mapping.skill_match_score = skill_match_score(&mapping);
    mapping
}

/// round(100 x (strong + 0.5 x weak) / total) over required skills; 50 with no required skills.
pub fn skill_match_score(mapping: &SkillMapping) -> u32 {
    if mapping.total_required == 0 {
        return 50;
    }
    let strong = mapping.strong_required().count() as f64;
    let weak = mapping.weak_required().count() as f64;
    (100.0 * (strong + 0.5 * weak) / mapping.total_required as f64).round() as u32
}

/// Weak required skills, then missing skills, then up to three strong required skills.
pub fn identify_focus_skills(mapping: &SkillMapping) -> Vec<FocusSkill> {
    let weak = mapping.weak_required().map(|m| FocusSkill {
        skill_name: m.requirement.skill_name.clone(),
        priority: Priority::High,
        reason: format!("Weak evidence for {}, needs verification", m.requirement.skill_name),
        importance: m.requirement.importance,
    });

    let missing = mapping.missing.iter().map(|r| FocusSkill {
        skill_name: r.skill_name.clone(),
        priority: Priority::High,
        reason: format!("{} not found in resume, needs discussion", r.skill_name),
        importance: r.importance,
    });

    let strong = mapping.strong_required().take(3).map(|m| FocusSkill {
        skill_name: m.requirement.skill_name.clone(),
        priority: Priority::Medium,
        reason: format!("Strong evidence for {}, validate depth", m.requirement.skill_name),
        importance: m.requirement.importance,
    });

    weak.chain(missing).chain(strong).collect()
}
