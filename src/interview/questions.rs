//! Interview question generation biased toward weak and missing skills

use crate::library::language::{DEFINITIONAL_STEMS, EXPERIENCE_STEMS};
use crate::library::templates::{
    CLOSING_TEMPLATES, COLLABORATION_TEMPLATES, DEPTH_TEMPLATES, EXPERIENCE_TEMPLATES,
    FAILURE_TEMPLATES, GENERIC_QUESTIONS, OPENING_TEMPLATES,
};
use crate::skills::mapper::{FocusSkill, Priority, SkillMapping};
use log::debug;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const MAX_ATTEMPTS: usize = 5;
pub const GENERAL_SKILL: &str = "general";

static DEFINITIONAL: Lazy<Vec<Regex>> = Lazy::new(|| {
    DEFINITIONAL_STEMS
        .iter()
        .map(|p| Regex::new(p).expect("invalid definitional stem"))
        .collect()
});

static EXPERIENCE_CUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    EXPERIENCE_STEMS
        .iter()
        .map(|p| Regex::new(p).expect("invalid experience stem"))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Experience,
    Depth,
    Failure,
    Collaboration,
    Opening,
    Closing,
    #[serde(rename = "followup")]
    FollowUp,
}

impl QuestionType {
    fn templates(&self) -> &'static [&'static str] {
        match self {
            QuestionType::Experience => EXPERIENCE_TEMPLATES,
            QuestionType::Depth => DEPTH_TEMPLATES,
            QuestionType::Failure => FAILURE_TEMPLATES,
            QuestionType::Collaboration => COLLABORATION_TEMPLATES,
            QuestionType::Opening => OPENING_TEMPLATES,
            QuestionType::Closing => CLOSING_TEMPLATES,
            QuestionType::FollowUp => &[],
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "experience" => Some(QuestionType::Experience),
            "depth" => Some(QuestionType::Depth),
            "failure" => Some(QuestionType::Failure),
            "collaboration" => Some(QuestionType::Collaboration),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::Experience => "experience",
            QuestionType::Depth => "depth",
            QuestionType::Failure => "failure",
            QuestionType::Collaboration => "collaboration",
            QuestionType::Opening => "opening",
            QuestionType::Closing => "closing",
            QuestionType::FollowUp => "followup",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub skill_name: String,
    pub question_type: QuestionType,
    pub priority: Priority,
    pub text: String,
    pub reason: String,
    pub parent_question_id: Option<String>,
}

impl Question {
    pub fn is_bookend(&self) -> bool {
        matches!(self.question_type, QuestionType::Opening | QuestionType::Closing)
    }
}

/// Target number of questions per type for a requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionDistribution {
    pub experience: usize,
    pub depth: usize,
    pub failure: usize,
    pub collaboration: usize,
}

impl QuestionDistribution {
    /// 40/30/20 by ceiling, collaboration takes what is left (never negative).
    pub fn for_count(count: usize) -> Self {
        let ceil_share = |pct: usize| (count * pct).div_ceil(100);
        let experience = ceil_share(40);
        let depth = ceil_share(30);
        let failure = ceil_share(20);
        let collaboration = count.saturating_sub(experience + depth + failure);
        Self {
            experience,
            depth,
            failure,
            collaboration,
        }
    }

    fn target(&self, question_type: QuestionType) -> usize {
        match question_type {
            QuestionType::Experience => self.experience,
            QuestionType::Depth => self.depth,
            QuestionType::Failure => self.failure,
            QuestionType::Collaboration => self.collaboration,
            _ => 0,
        }
    }
}

/// How a question is phrased, as seen by the anti-cheat classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStyle {
    /// Answerable from a textbook or a search engine.
    Definitional,
    /// Asks for a lived situation.
    Experiential,
    Neutral,
}

pub fn classify_question(text: &str) -> QuestionStyle {
    if DEFINITIONAL.iter().any(|re| re.is_match(text)) {
        QuestionStyle::Definitional
    } else if EXPERIENCE_CUES.iter().any(|re| re.is_match(text)) {
        QuestionStyle::Experiential
    } else {
        QuestionStyle::Neutral
    }
}

/// Advisory check that a question asks about lived experience rather than a definition.
pub fn is_anti_cheat_question(text: &str) -> bool {
    classify_question(text) != QuestionStyle::Definitional
}

/// Accumulates main questions while enforcing text uniqueness and template rotation.
struct QuestionBuilder<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    target_count: usize,
    questions: Vec<Question>,
    seen_texts: HashSet<String>,
    used_templates: HashSet<&'static str>,
    used_skills: HashSet<String>,
}

impl<'r, R: Rng + ?Sized> QuestionBuilder<'r, R> {
    fn new(rng: &'r mut R, target_count: usize) -> Self {
        Self {
            rng,
            target_count,
            questions: Vec::with_capacity(target_count),
            seen_texts: HashSet::new(),
            used_templates: HashSet::new(),
            used_skills: HashSet::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.questions.len() >= self.target_count
    }

    fn count_of(&self, question_type: QuestionType) -> usize {
        self.questions
            .iter()
            .filter(|q| q.question_type == question_type)
            .count()
    }

    fn skill_used(&self, skill: &str) -> bool {
        self.used_skills.contains(&skill.to_lowercase())
    }

    /// Pick an unused template (any template once all are used), retrying on duplicate text.
    fn templated_text(&mut self, question_type: QuestionType, skill: &str) -> Option<(String, &'static str)> {
        let templates = question_type.templates();
        let unused: Vec<&'static str> = templates
            .iter()
            .copied()
            .filter(|t| !self.used_templates.contains(t))
            .collect();
        let pool: &[&'static str] = if unused.is_empty() { templates } else { &unused };

        for _ in 0..MAX_ATTEMPTS {
            let template = *pool.choose(&mut *self.rng)?;
            let text = template.replace("{skill}", skill);
            if !self.seen_texts.contains(&text) {
                return Some((text, template));
            }
        }
        None
    }

    fn push(&mut self, skill: &str, question_type: QuestionType, priority: Priority, text: String, reason: String) {
        debug!(
            "Generated {} question for '{}' (priority {}, anti-cheat {}): {}",
            question_type,
            skill,
            priority,
            is_anti_cheat_question(&text),
            text
        );
        self.seen_texts.insert(text.clone());
        self.used_skills.insert(skill.to_lowercase());
        self.questions.push(Question {
            id: String::new(),
            skill_name: skill.to_string(),
            question_type,
            priority,
            text,
            reason,
            parent_question_id: None,
        });
    }

    fn add_templated(&mut self, skill: &str, question_type: QuestionType, priority: Priority, reason: String) {
        match self.templated_text(question_type, skill) {
            Some((text, template)) => {
                self.used_templates.insert(template);
                self.push(skill, question_type, priority, text, reason);
            }
            None => debug!("Skipped duplicate {} question for '{}'", question_type, skill),
        }
    }

    /// Main question type furthest under its distribution target.
    fn most_needed_type(&self, distribution: &QuestionDistribution) -> QuestionType {
        let mut best = QuestionType::Experience;
        let mut best_deficit = i64::MIN;
        for question_type in [
            QuestionType::Experience,
            QuestionType::Depth,
            QuestionType::Failure,
            QuestionType::Collaboration,
        ] {
            let deficit = distribution.target(question_type) as i64 - self.count_of(question_type) as i64;
            if deficit > best_deficit {
                best = question_type;
                best_deficit = deficit;
            }
        }
        best
    }

    fn finish(mut self) -> Vec<Question> {
        self.questions.sort_by_key(|q| q.priority);
        for (i, question) in self.questions.iter_mut().enumerate() {
            question.id = format!("q{}", i + 1);
        }
        self.questions
    }
}

/// Generate up to `count` main interview questions.
///
/// Focus skills come first (experience questions for high-priority skills,
/// depth questions otherwise), then strong required skills fill whichever
/// type is furthest under target, then failure questions for matched skills
/// still unasked, and finally the shuffled generic pool. The result is
/// stably sorted by priority and numbered `q1..qN`.
pub fn generate_questions<R: Rng + ?Sized>(
    mapping: &SkillMapping,
    focus_skills: &[FocusSkill],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let distribution = QuestionDistribution::for_count(count);
    let mut builder = QuestionBuilder::new(rng, count);

    let mut ordered_focus: Vec<&FocusSkill> = focus_skills.iter().collect();
    ordered_focus.sort_by_key(|f| f.priority);
    for focus in ordered_focus {
        if builder.is_full() {
            break;
        }
        let (question_type, priority) = match focus.priority {
            Priority::High => (QuestionType::Experience, Priority::High),
            _ => (QuestionType::Depth, Priority::Medium),
        };
        builder.add_templated(&focus.skill_name, question_type, priority, focus.reason.clone());
    }

    for matched in mapping.strong_required() {
        if builder.is_full() {
            break;
        }
        let skill = &matched.requirement.skill_name;
        if builder.skill_used(skill) {
            continue;
        }
        let question_type = builder.most_needed_type(&distribution);
        builder.add_templated(
            skill,
            question_type,
            Priority::Medium,
            format!("Balance {} coverage with a strong skill", question_type),
        );
    }

    let remaining: Vec<String> = mapping
        .strong
        .iter()
        .chain(mapping.weak.iter())
        .map(|m| m.requirement.skill_name.clone())
        .collect();
    for skill in remaining {
        if builder.is_full() {
            break;
        }
        if builder.skill_used(&skill) {
            continue;
        }
        builder.add_templated(
            &skill,
            QuestionType::Failure,
            Priority::Low,
            format!("Probe setbacks with {}", skill),
        );
    }

    if !builder.is_full() {
        let mut pool: Vec<&(&str, &str)> = GENERIC_QUESTIONS.iter().collect();
        pool.shuffle(&mut *builder.rng);
        for (type_name, text) in pool {
            if builder.is_full() {
                break;
            }
            if builder.seen_texts.contains(*text) {
                continue;
            }
            let question_type = QuestionType::from_name(type_name).unwrap_or(QuestionType::Experience);
            builder.push(
                GENERAL_SKILL,
                question_type,
                Priority::Low,
                text.to_string(),
                "General behavioural question".to_string(),
            );
        }
    }

    builder.finish()
}

fn bookend<R: Rng + ?Sized>(question_type: QuestionType, id: &str, rng: &mut R) -> Question {
    let text = question_type
        .templates()
        .choose(rng)
        .map(|t| t.to_string())
        .unwrap_or_default();
    Question {
        id: id.to_string(),
        skill_name: GENERAL_SKILL.to_string(),
        question_type,
        priority: Priority::Low,
        text,
        reason: format!("{} question", question_type),
        parent_question_id: None,
    }
}

pub fn opening_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
    bookend(QuestionType::Opening, "opening", rng)
}

pub fn closing_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
    bookend(QuestionType::Closing, "closing", rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::extractor::extract_skills;
    use crate::skills::mapper::{identify_focus_skills, map_to_requirements, JobRequirements};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mapping_for(resume: &str, required: &[&str]) -> SkillMapping {
        let job = JobRequirements {
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        map_to_requirements(&extract_skills(resume), &job.requirement_entries())
    }

    fn generate(mapping: &SkillMapping, count: usize, seed: u64) -> Vec<Question> {
        let focus = identify_focus_skills(mapping);
        let mut rng = StdRng::seed_from_u64(seed);
        generate_questions(mapping, &focus, count, &mut rng)
    }

    #[test]
    fn test_distribution() {
        let d = QuestionDistribution::for_count(10);
        assert_eq!((d.experience, d.depth, d.failure, d.collaboration), (4, 3, 2, 1));

        let d = QuestionDistribution::for_count(8);
        // ceil(3.2), ceil(2.4), ceil(1.6)
        assert_eq!((d.experience, d.depth, d.failure, d.collaboration), (4, 3, 2, 0));

        let d = QuestionDistribution::for_count(0);
        assert_eq!(d.collaboration, 0);
    }

    #[test]
    fn test_anti_cheat_classifier() {
        assert!(!is_anti_cheat_question("What is a closure in Rust?"));
        assert!(!is_anti_cheat_question("How does garbage collection work in Java?"));
        assert!(is_anti_cheat_question("Tell me about a time you fixed a memory leak."));
        assert!(is_anti_cheat_question("Any questions for us?"));
        assert_eq!(classify_question("Any questions for us?"), QuestionStyle::Neutral);
        assert_eq!(
            classify_question("Walk me through your last deploy."),
            QuestionStyle::Experiential
        );
    }

    #[test]
    fn test_templates_are_experiential() {
        for template in EXPERIENCE_TEMPLATES
            .iter()
            .chain(DEPTH_TEMPLATES)
            .chain(FAILURE_TEMPLATES)
            .chain(COLLABORATION_TEMPLATES)
        {
            assert!(is_anti_cheat_question(template), "{}", template);
        }
    }

    #[test]
    fn test_follow_up_templates_are_experiential() {
        use crate::library::templates::{
            CONSISTENCY_FOLLOW_UPS, CONTEXTUAL_FOLLOW_UPS, DEPTH_FOLLOW_UPS, SKILL_FALLBACK_FOLLOW_UPS,
            SPECIFICITY_FOLLOW_UPS,
        };
        for template in CONTEXTUAL_FOLLOW_UPS
            .iter()
            .chain(SPECIFICITY_FOLLOW_UPS)
            .chain(DEPTH_FOLLOW_UPS)
            .chain(CONSISTENCY_FOLLOW_UPS)
            .chain(SKILL_FALLBACK_FOLLOW_UPS)
        {
            let text = template.replace("{skill}", "Kafka").replace("{topic}", "the billing service");
            assert!(is_anti_cheat_question(&text), "{}", text);
        }
    }

    #[test]
    fn test_generated_questions_are_unique_and_sized() {
        let mapping = mapping_for(
            "Experience\nI built Python services for 6 years and led a React rewrite.",
            &["python", "react", "kubernetes", "rust"],
        );
        let questions = generate(&mapping, 8, 7);

        assert_eq!(questions.len(), 8);
        let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        let texts: HashSet<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(texts.len(), 8);
        assert!(questions.iter().all(|q| !q.text.contains("{skill}")));
    }

    #[test]
    fn test_focus_skills_come_first_and_sorted() {
        let mapping = mapping_for("Skills\nPython", &["python", "kubernetes"]);
        let questions = generate(&mapping, 6, 1);

        assert_eq!(questions[0].priority, Priority::High);
        assert_eq!(questions[0].question_type, QuestionType::Experience);
        let priorities: Vec<Priority> = questions.iter().map(|q| q.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert!(questions.iter().any(|q| q.skill_name == "kubernetes"));
    }

    #[test]
    fn test_generic_pool_fills_empty_mapping() {
        let mapping = mapping_for("", &[]);
        let questions = generate(&mapping, 5, 3);
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.skill_name == GENERAL_SKILL));
        assert!(questions.iter().all(|q| q.priority == Priority::Low));
    }

    #[test]
    fn test_generic_pool_exhausts_gracefully() {
        let mapping = mapping_for("", &[]);
        let questions = generate(&mapping, 50, 3);
        assert_eq!(questions.len(), GENERIC_QUESTIONS.len());
    }

    #[test]
    fn test_same_seed_same_questions() {
        let mapping = mapping_for("Skills\nGo, Docker", &["go", "docker", "terraform"]);
        assert_eq!(generate(&mapping, 6, 42), generate(&mapping, 6, 42));
    }

    #[test]
    fn test_bookends() {
        let mut rng = StdRng::seed_from_u64(9);
        let opening = opening_question(&mut rng);
        let closing = closing_question(&mut rng);
        assert_eq!(opening.id, "opening");
        assert!(opening.is_bookend());
        assert!(OPENING_TEMPLATES.contains(&opening.text.as_str()));
        assert_eq!(closing.question_type, QuestionType::Closing);
    }
}
