//! Skill extraction from resume text with per-skill evidence

use crate::analysis::text::{is_whole_word, sentence_around, truncate_chars};
use crate::library::skills::{aliases_of, all_canonical};
use crate::skills::experience::{infer_experience, SeniorityLevel};
use crate::skills::sections::{SectionType, SectionedResume};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const CONTEXT_MAX_CHARS: usize = 200;
const SNIPPET_MAX_CHARS: usize = 100;

/// A skill found in a resume, with the evidence that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    /// Canonical skill name.
    pub skill_name: String,
    /// The spelling that actually matched (canonical or alias), as written.
    pub original_match_text: String,
    pub category: String,
    /// Whole-word occurrences of the canonical name and all aliases across the resume.
    pub mention_count: usize,
    /// Sentence containing the first match.
    pub context: String,
    pub evidence_snippet: String,
    pub source_section: SectionType,
    pub inferred_years: Option<u32>,
    pub inferred_seniority: SeniorityLevel,
    pub section_weight: f64,
}

/// Multi-pattern matcher over every canonical skill and alias.
pub struct SkillMatcher {
    automaton: AhoCorasick,
    /// Pattern id -> (canonical, category)
    targets: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone)]
struct SkillHit {
    canonical: &'static str,
    category: &'static str,
    start: usize,
    end: usize,
}

static DEFAULT_MATCHER: Lazy<SkillMatcher> = Lazy::new(SkillMatcher::build);

impl SkillMatcher {
    fn build() -> Self {
        let mut patterns = Vec::new();
        let mut targets = Vec::new();

        for (canonical, category) in all_canonical() {
            patterns.push(canonical);
            targets.push((canonical, category));
            for alias in aliases_of(canonical) {
                patterns.push(*alias);
                targets.push((canonical, category));
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("skill library patterns must build an automaton");

        Self { automaton, targets }
    }

    /// Shared matcher over the built-in skill library.
    pub fn global() -> &'static SkillMatcher {
        &DEFAULT_MATCHER
    }

    fn hits(&self, text: &str) -> Vec<SkillHit> {
        self.automaton
            .find_iter(text)
            .filter(|m| is_whole_word(text, m.start(), m.end()))
            .map(|m| {
                let (canonical, category) = self.targets[m.pattern().as_usize()];
                SkillHit {
                    canonical,
                    category,
                    start: m.start(),
                    end: m.end(),
                }
            })
            .collect()
    }

    /// Canonical skills mentioned anywhere in the text, in order of first appearance.
    pub fn canonical_mentions(&self, text: &str) -> Vec<&'static str> {
        let mut found = Vec::new();
        for hit in self.hits(text) {
            if !found.contains(&hit.canonical) {
                found.push(hit.canonical);
            }
        }
        found
    }
}

/// Extract skills from resume text.
///
/// Sections are searched in evidence-priority order (experience first); the
/// first section containing a canonical name or alias supplies the evidence,
/// and later sections never add a second entry for the same skill.
pub fn extract_skills(resume_text: &str) -> Vec<ExtractedSkill> {
    let resume = SectionedResume::parse(resume_text);
    let matcher = SkillMatcher::global();

    let mut mention_counts: HashMap<&'static str, usize> = HashMap::new();
    for section in &resume.sections {
        for hit in matcher.hits(&section.content) {
            *mention_counts.entry(hit.canonical).or_insert(0) += 1;
        }
    }

    let mut extracted: Vec<ExtractedSkill> = Vec::new();
    for section in resume.by_priority() {
        for hit in matcher.hits(&section.content) {
            if extracted.iter().any(|s| s.skill_name == hit.canonical) {
                continue;
            }

            let context = sentence_around(&section.content, hit.start, CONTEXT_MAX_CHARS);
            let experience = infer_experience(&context);
            let skill = ExtractedSkill {
                skill_name: hit.canonical.to_string(),
                original_match_text: section.content[hit.start..hit.end].to_string(),
                category: hit.category.to_string(),
                mention_count: mention_counts.get(hit.canonical).copied().unwrap_or(1),
                evidence_snippet: truncate_chars(&context, SNIPPET_MAX_CHARS),
                context,
                source_section: section.section_type,
                inferred_years: experience.years,
                inferred_seniority: experience.level,
                section_weight: section.section_type.weight(),
            };
            debug!(
                "Extracted skill '{}' from {} ({} mentions)",
                skill.skill_name, skill.source_section, skill.mention_count
            );
            extracted.push(skill);
        }
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_react_with_evidence() {
        let skills =
            extract_skills("I built a React dashboard that reduced load time by 40% for 10,000 users");
        let react = skills.iter().find(|s| s.skill_name == "react").unwrap();
        assert!(react.context.contains("React dashboard"));
        assert_eq!(react.original_match_text, "React");
        assert_eq!(react.mention_count, 1);
        assert_eq!(react.source_section, SectionType::Other);
        assert_eq!(react.section_weight, 0.5);
    }

    #[test]
    fn test_alias_resolves_to_canonical_once() {
        let skills = extract_skills("Experience\nRan k8s clusters. Wrote Kubernetes operators.");
        let matches: Vec<_> = skills.iter().filter(|s| s.skill_name == "kubernetes").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].mention_count, 2);
        assert_eq!(matches[0].original_match_text, "k8s");
        assert_eq!(matches[0].category, "cloud");
    }

    #[test]
    fn test_experience_section_wins() {
        let text = "Skills\nPython, Docker\n\nExperience\nSenior engineer, 6 years shipping Python services.";
        let skills = extract_skills(text);
        let python = skills.iter().find(|s| s.skill_name == "python").unwrap();
        assert_eq!(python.source_section, SectionType::Experience);
        assert_eq!(python.section_weight, 1.5);
        assert_eq!(python.inferred_years, Some(6));
        assert_eq!(python.inferred_seniority, SeniorityLevel::Senior);
        assert_eq!(python.mention_count, 2);
    }

    #[test]
    fn test_no_partial_word_matches() {
        let skills = extract_skills("Reactive programming enthusiast who loves gopher mascots");
        assert!(skills.iter().all(|s| s.skill_name != "react"));
        assert!(skills.iter().all(|s| s.skill_name != "go"));
    }

    #[test]
    fn test_symbol_skills() {
        let skills = extract_skills("Wrote C++ and C# tooling plus CI/CD pipelines");
        let names: Vec<&str> = skills.iter().map(|s| s.skill_name.as_str()).collect();
        assert!(names.contains(&"c++"));
        assert!(names.contains(&"c#"));
        assert!(names.contains(&"ci/cd"));
    }

    #[test]
    fn test_empty_resume() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_canonical_mentions() {
        let mentions = SkillMatcher::global().canonical_mentions("Need Postgres, React and postgresql");
        assert_eq!(mentions, vec!["postgresql", "react"]);
    }
}
