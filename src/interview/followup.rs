//! Adaptive follow-up questions with a per-session template memory

use crate::analysis::signals::{calculate_specificity, count_first_person, detect_generic_patterns};
use crate::analysis::text::{char_len, matched_phrases, words};
use crate::interview::questions::{Question, QuestionType};
use crate::library::language::{STOP_WORDS, SUSPICIOUSLY_PERFECT_PHRASES, TOPIC_KEYWORDS};
use crate::library::templates::{
    CONSISTENCY_FOLLOW_UPS, CONTEXTUAL_FOLLOW_UPS, DEPTH_FOLLOW_UPS, SKILL_FALLBACK_FOLLOW_UPS,
    SPECIFICITY_FOLLOW_UPS,
};
use crate::skills::mapper::Priority;
use log::debug;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

const MAX_TOPIC_PHRASES: usize = 3;
const MAX_TOPIC_KEYWORDS: usize = 2;
const DETAIL_MIN_CHARS: usize = 6;
const DETAIL_WINDOW: usize = 3;

static ORGANISATION_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:worked at|at|for|with)\s+((?:[A-Z][\w.&-]*)(?:\s+[A-Z][\w.&-]*){0,2})")
        .expect("invalid organisation pattern")
});

static PROJECT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i:project|system|platform|service|tool|app)\s+(?i:called|named)\s+["']?([A-Z][\w-]*(?:\s+[A-Z][\w-]*)?)"#)
        .expect("invalid project name pattern")
});

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"\n]{3,40})""#).expect("invalid quoted pattern"));

static ACHIEVEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:reduced|improved|increased|cut|saved|grew|decreased|boosted)\s+[a-z ]{0,30}?by\s+\d+(?:\.\d+)?\s*%?)")
        .expect("invalid achievement pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpType {
    Specificity,
    Depth,
    Consistency,
}

impl FollowUpType {
    fn templates(&self) -> &'static [&'static str] {
        match self {
            FollowUpType::Specificity => SPECIFICITY_FOLLOW_UPS,
            FollowUpType::Depth => DEPTH_FOLLOW_UPS,
            FollowUpType::Consistency => CONSISTENCY_FOLLOW_UPS,
        }
    }
}

impl fmt::Display for FollowUpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowUpType::Specificity => write!(f, "specificity"),
            FollowUpType::Depth => write!(f, "depth"),
            FollowUpType::Consistency => write!(f, "consistency"),
        }
    }
}

/// Why an answer deserves a follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpTrigger {
    pub follow_up_type: FollowUpType,
    pub confidence: u32,
    pub reason: String,
}

impl FollowUpTrigger {
    fn new(follow_up_type: FollowUpType, confidence: u32, reason: &str) -> Self {
        Self {
            follow_up_type,
            confidence,
            reason: reason.to_string(),
        }
    }
}

/// Decide whether an answer needs probing. Returns `None` when it stands on its own.
///
/// The first matching trigger wins, except that rehearsed-sounding phrasing
/// overrides whatever was found before it.
pub fn analyze_need_for_follow_up(answer: &str) -> Option<FollowUpTrigger> {
    let length = char_len(answer.trim());
    let generic = detect_generic_patterns(answer);
    let first_person = count_first_person(answer);

    let mut trigger = if generic.generic_score > 30 {
        Some(FollowUpTrigger::new(
            FollowUpType::Specificity,
            85,
            "Answer relies on generic phrasing",
        ))
    } else if length >= 75 && calculate_specificity(answer) < 30 {
        Some(FollowUpTrigger::new(
            FollowUpType::Specificity,
            80,
            "Answer lacks specific details",
        ))
    } else if first_person < 2 && length > 100 {
        Some(FollowUpTrigger::new(
            FollowUpType::Depth,
            70,
            "Answer lacks personal ownership",
        ))
    } else if length < 75 {
        Some(FollowUpTrigger::new(FollowUpType::Depth, 75, "Answer is too brief"))
    } else {
        None
    };

    let lowered = answer.to_lowercase();
    if !matched_phrases(&lowered, SUSPICIOUSLY_PERFECT_PHRASES).is_empty() {
        trigger = Some(FollowUpTrigger::new(
            FollowUpType::Consistency,
            90,
            "Answer sounds rehearsed or too perfect",
        ));
    }

    match &trigger {
        Some(t) => debug!("Follow-up trigger: {} ({}), {}", t.follow_up_type, t.confidence, t.reason),
        None => debug!("No follow-up needed ({} chars)", length),
    }
    trigger
}

/// Follow-ups allowed per question priority.
pub fn max_follow_ups(question: &Question) -> u32 {
    match question.priority {
        Priority::High => 2,
        Priority::Medium => 1,
        Priority::Low => 1,
    }
}

/// Topical phrases worth anchoring a follow-up on, most specific first.
pub fn extract_topics(answer: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    let push = |candidate: &str, list: &mut Vec<String>| {
        let candidate = candidate.trim().trim_end_matches(['.', ',']);
        if candidate.is_empty() || candidate == "I" {
            return;
        }
        if !list.iter().any(|p| p.eq_ignore_ascii_case(candidate)) {
            list.push(candidate.to_string());
        }
    };

    let spans = ORGANISATION_SPAN
        .captures_iter(answer)
        .chain(PROJECT_NAME.captures_iter(answer))
        .chain(QUOTED.captures_iter(answer))
        .chain(ACHIEVEMENT.captures_iter(answer))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));
    for span in spans {
        if phrases.len() >= MAX_TOPIC_PHRASES {
            break;
        }
        push(span, &mut phrases);
    }

    let lowered = answer.to_lowercase();
    let keywords: Vec<&str> = words(&lowered)
        .into_iter()
        .filter(|w| TOPIC_KEYWORDS.contains(w))
        .collect();
    let mut added = 0;
    for keyword in keywords {
        if added >= MAX_TOPIC_KEYWORDS {
            break;
        }
        let before = phrases.len();
        push(keyword, &mut phrases);
        if phrases.len() > before {
            added += 1;
        }
    }

    phrases
}

/// Quoted window of up to three words starting at the first long, meaningful word.
fn detail_phrase(answer: &str) -> Option<String> {
    let tokens = words(answer);
    let start = tokens.iter().position(|w| {
        w.chars().count() >= DETAIL_MIN_CHARS
            && w.chars().all(char::is_alphabetic)
            && !STOP_WORDS.contains(&w.to_lowercase().as_str())
    })?;
    let window = tokens[start..].iter().take(DETAIL_WINDOW).copied().collect::<Vec<_>>();
    Some(format!("\"{}\"", window.join(" ")))
}

/// Per-session follow-up state. One instance per candidate conversation.
#[derive(Debug, Clone, Default)]
pub struct FollowUpSession {
    used_templates: HashSet<&'static str>,
    counts: HashMap<String, u32>,
}

impl FollowUpSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_up_count(&self, question_id: &str) -> u32 {
        self.counts.get(question_id).copied().unwrap_or(0)
    }

    /// Whether another follow-up may be issued for this question.
    pub fn can_follow_up(&self, question: &Question) -> bool {
        self.follow_up_count(&question.id) < max_follow_ups(question)
    }

    fn pick_unused<R: Rng + ?Sized>(&self, templates: &'static [&'static str], rng: &mut R) -> Option<&'static str> {
        let unused: Vec<&'static str> = templates
            .iter()
            .copied()
            .filter(|t| !self.used_templates.contains(t))
            .collect();
        unused.choose(rng).copied()
    }

    /// Build a follow-up for `question` and count it against that question.
    ///
    /// The cap is not enforced here; callers check [`FollowUpSession::can_follow_up`] first.
    pub fn generate_follow_up<R: Rng + ?Sized>(
        &mut self,
        question: &Question,
        answer: &str,
        trigger: &FollowUpTrigger,
        rng: &mut R,
    ) -> Question {
        let topics = extract_topics(answer);

        let contextual = topics
            .first()
            .and_then(|topic| self.pick_unused(CONTEXTUAL_FOLLOW_UPS, rng).map(|t| (t, topic)));

        let (template, text) = match contextual {
            Some((template, topic)) => (template, template.replace("{topic}", topic)),
            None => {
                let template = self
                    .pick_unused(trigger.follow_up_type.templates(), rng)
                    .or_else(|| self.pick_unused(SKILL_FALLBACK_FOLLOW_UPS, rng))
                    .or_else(|| SKILL_FALLBACK_FOLLOW_UPS.choose(rng).copied())
                    .unwrap_or("Can you tell me more about that?");
                (template, template.to_string())
            }
        };

        let skill_phrase = format!("your {} work", question.skill_name);
        let mut text = text.replace("{skill}", &question.skill_name);
        if text.contains("{detail}") {
            let detail = detail_phrase(answer).unwrap_or(skill_phrase);
            text = text.replace("{detail}", &detail);
        }

        self.used_templates.insert(template);
        let count = self.counts.entry(question.id.clone()).or_insert(0);
        *count += 1;

        debug!("Issued follow-up {} for {} ({})", count, question.id, trigger.follow_up_type);

        Question {
            id: format!("{}-followup-{}", question.id, count),
            skill_name: question.skill_name.clone(),
            question_type: QuestionType::FollowUp,
            priority: question.priority,
            text,
            reason: trigger.reason.clone(),
            parent_question_id: Some(question.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(priority: Priority) -> Question {
        Question {
            id: "q1".to_string(),
            skill_name: "kafka".to_string(),
            question_type: QuestionType::Experience,
            priority,
            text: "Tell me about Kafka.".to_string(),
            reason: String::new(),
            parent_question_id: None,
        }
    }

    #[test]
    fn test_brief_answer_triggers_depth() {
        let answer = "That sounds like a thing that happens to teams ok.";
        assert_eq!(answer.len(), 50);
        let trigger = analyze_need_for_follow_up(answer).unwrap();
        assert_eq!(trigger.follow_up_type, FollowUpType::Depth);
        assert_eq!(trigger.reason, "Answer is too brief");
        assert_eq!(trigger.confidence, 75);
    }

    #[test]
    fn test_vague_answer_at_brief_boundary() {
        let answer = "That sounds like a thing that happens to teams sometimes, we sorted it out.";
        assert_eq!(answer.len(), 75);
        assert_eq!(calculate_specificity(answer), 0);
        let trigger = analyze_need_for_follow_up(answer).unwrap();
        assert_eq!(trigger.follow_up_type, FollowUpType::Specificity);
        assert_eq!(trigger.reason, "Answer lacks specific details");
        assert_eq!(trigger.confidence, 80);

        let longer = "That sounds like a thing that happens to teams sometimes, and we sorted it out fine.";
        assert_eq!(analyze_need_for_follow_up(longer).unwrap().confidence, 80);

        let shorter = &answer[..74];
        let trigger = analyze_need_for_follow_up(shorter).unwrap();
        assert_eq!(trigger.follow_up_type, FollowUpType::Depth);
        assert_eq!(trigger.reason, "Answer is too brief");
    }

    #[test]
    fn test_generic_answer_triggers_specificity() {
        let answer = "It depends on the situation, and typically the standard approach is best practice";
        let trigger = analyze_need_for_follow_up(answer).unwrap();
        assert_eq!(trigger.follow_up_type, FollowUpType::Specificity);
        assert_eq!(trigger.confidence, 85);
    }

    #[test]
    fn test_perfect_phrase_overrides() {
        let answer = "It depends, typically best practice applies and everything went perfectly.";
        let trigger = analyze_need_for_follow_up(answer).unwrap();
        assert_eq!(trigger.follow_up_type, FollowUpType::Consistency);
        assert_eq!(trigger.confidence, 90);
    }

    #[test]
    fn test_max_follow_ups() {
        assert_eq!(max_follow_ups(&question(Priority::High)), 2);
        assert_eq!(max_follow_ups(&question(Priority::Medium)), 1);
        assert_eq!(max_follow_ups(&question(Priority::Low)), 1);
    }

    #[test]
    fn test_extract_topics() {
        let answer = "I worked at Acme Corp on a platform called Orion and reduced latency by 30%. \
                      Most of it was caching work.";
        let topics = extract_topics(answer);
        assert_eq!(topics[0], "Acme Corp");
        assert!(topics.contains(&"Orion".to_string()));
        assert!(topics.iter().any(|t| t.starts_with("reduced latency by 30")));
        assert!(topics.contains(&"caching".to_string()));
    }

    #[test]
    fn test_contextual_follow_up_uses_topic() {
        let mut session = FollowUpSession::new();
        let mut rng = StdRng::seed_from_u64(1);
        let trigger = FollowUpTrigger::new(FollowUpType::Depth, 75, "Answer is too brief");
        let follow_up =
            session.generate_follow_up(&question(Priority::High), "I did it at Globex.", &trigger, &mut rng);

        assert!(follow_up.text.contains("Globex"));
        assert_eq!(follow_up.id, "q1-followup-1");
        assert_eq!(follow_up.parent_question_id.as_deref(), Some("q1"));
        assert_eq!(follow_up.question_type, QuestionType::FollowUp);
        assert_eq!(session.follow_up_count("q1"), 1);
        assert!(session.can_follow_up(&question(Priority::High)));
    }

    #[test]
    fn test_cap_reached() {
        let mut session = FollowUpSession::new();
        let mut rng = StdRng::seed_from_u64(2);
        let trigger = FollowUpTrigger::new(FollowUpType::Depth, 75, "Answer is too brief");
        let q = question(Priority::Medium);
        session.generate_follow_up(&q, "ok", &trigger, &mut rng);
        assert!(!session.can_follow_up(&q));
    }

    #[test]
    fn test_templates_rotate_then_fall_back_to_skill() {
        let mut session = FollowUpSession::new();
        let mut rng = StdRng::seed_from_u64(3);
        let trigger = FollowUpTrigger::new(FollowUpType::Consistency, 90, "too perfect");
        let q = question(Priority::High);

        let texts: Vec<String> = (0..CONSISTENCY_FOLLOW_UPS.len() + 1)
            .map(|_| session.generate_follow_up(&q, "no", &trigger, &mut rng).text)
            .collect();

        let unique: HashSet<&String> = texts[..CONSISTENCY_FOLLOW_UPS.len()].iter().collect();
        assert_eq!(unique.len(), CONSISTENCY_FOLLOW_UPS.len());
        assert!(texts.last().unwrap().contains("kafka"));
    }

    #[test]
    fn test_detail_placeholder_never_leaks() {
        let mut session = FollowUpSession::new();
        let mut rng = StdRng::seed_from_u64(4);
        let trigger = FollowUpTrigger::new(FollowUpType::Specificity, 80, "vague");
        let q = question(Priority::High);
        for _ in 0..6 {
            let follow_up = session.generate_follow_up(&q, "it was fine", &trigger, &mut rng);
            assert!(!follow_up.text.contains('{'));
        }
    }

    #[test]
    fn test_detail_phrase() {
        assert_eq!(
            detail_phrase("we had a nasty database migration issue").as_deref(),
            Some("\"database migration issue\"")
        );
        assert_eq!(detail_phrase("it was ok"), None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let trigger = FollowUpTrigger::new(FollowUpType::Depth, 75, "brief");
        let q = question(Priority::Medium);
        let mut first = FollowUpSession::new();
        let second = FollowUpSession::new();
        first.generate_follow_up(&q, "ok", &trigger, &mut StdRng::seed_from_u64(5));
        assert_eq!(first.follow_up_count("q1"), 1);
        assert_eq!(second.follow_up_count("q1"), 0);
    }
}
