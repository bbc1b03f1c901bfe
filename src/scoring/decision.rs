//! Weighted decision engine: depth, communication and the final verdict

use crate::analysis::text::{char_len, split_sentences};
use crate::error::{Result, ScreenerError};
use crate::library::language::{
    DEPTH_DECISION_PATTERN, DEPTH_ERROR_PATTERN, DEPTH_GROWTH_PATTERN, DEPTH_REASONING_PATTERN,
    TRANSITION_WORDS,
};
use crate::library::templates::{VERDICT_HOLD, VERDICT_PASS, VERDICT_REJECT};
use crate::scoring::authenticity::AnswerRecord;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static DEPTH_BONUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d",
        DEPTH_ERROR_PATTERN,
        DEPTH_REASONING_PATTERN,
        DEPTH_DECISION_PATTERN,
        DEPTH_GROWTH_PATTERN,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid depth pattern"))
    .collect()
});

static TRANSITIONS: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = TRANSITION_WORDS.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("invalid transition pattern")
});

const NEUTRAL_COMMUNICATION: u32 = 50;

/// Weights of the five metrics in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionWeights {
    pub skill_match: f64,
    pub depth: f64,
    pub authenticity: f64,
    pub communication: f64,
    pub consistency: f64,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.30,
            depth: 0.20,
            authenticity: 0.25,
            communication: 0.10,
            consistency: 0.15,
        }
    }
}

impl DecisionWeights {
    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.skill_match,
            self.depth,
            self.authenticity,
            self.communication,
            self.consistency,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScreenerError::Configuration(
                "Decision weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = all.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScreenerError::Configuration(format!(
                "Decision weights must sum to 1.0 (got {:.4})",
                sum
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Hold,
    Reject,
}

impl Verdict {
    /// Candidate-facing sentence for this verdict.
    pub fn friendly_message(&self) -> &'static str {
        match self {
            Verdict::Pass => VERDICT_PASS,
            Verdict::Hold => VERDICT_HOLD,
            Verdict::Reject => VERDICT_REJECT,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Hold => write!(f, "HOLD"),
            Verdict::Reject => write!(f, "REJECT"),
        }
    }
}

/// The five 0..=100 metrics the decision is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionInputs {
    pub skill_match: u32,
    pub depth: u32,
    pub authenticity: u32,
    pub communication: u32,
    pub consistency: u32,
}

impl DecisionInputs {
    fn values(&self) -> [f64; 5] {
        [
            self.skill_match as f64,
            self.depth as f64,
            self.authenticity as f64,
            self.communication as f64,
            self.consistency as f64,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub overall_score: u32,
    pub decision: Verdict,
    pub reasons: Vec<String>,
    pub concerns: Vec<String>,
    pub confidence: u32,
    pub inputs: DecisionInputs,
}

/// Text label for a 0..=100 score.
pub fn score_label(score: u32) -> &'static str {
    match score {
        s if s >= 80 => "Excellent",
        s if s >= 65 => "Good",
        s if s >= 50 => "Fair",
        s if s >= 35 => "Below Average",
        _ => "Poor",
    }
}

/// Depth of one answer: length tiers plus evidence bonuses, capped at 100.
pub fn answer_depth(answer: &str) -> u32 {
    let length = char_len(answer);
    let mut score = 0;
    if length > 100 {
        score += 15;
    }
    if length > 200 {
        score += 15;
    }
    if length > 350 {
        score += 10;
    }
    score += DEPTH_BONUS_PATTERNS.iter().filter(|re| re.is_match(answer)).count() as u32 * 10;
    score.min(100)
}

/// Communication quality of one answer, capped at 100.
pub fn answer_communication(answer: &str) -> u32 {
    let length = char_len(answer);
    let mut score = NEUTRAL_COMMUNICATION;

    if answer.chars().filter(|c| matches!(c, '.' | '!' | '?')).count() > 2 {
        score += 15;
    }
    if (100..=500).contains(&length) {
        score += 15;
    }
    if TRANSITIONS.is_match(answer) {
        score += 10;
    }
    let sentences = split_sentences(answer);
    if sentences.len() >= 2 {
        let mean = sentences.iter().map(|s| char_len(s)).sum::<usize>() as f64 / sentences.len() as f64;
        if (40.0..=120.0).contains(&mean) {
            score += 10;
        }
    }
    score.min(100)
}

fn mean_of(records: &[AnswerRecord], score: fn(&str) -> u32) -> Option<u32> {
    if records.is_empty() {
        return None;
    }
    let total: u32 = records.iter().map(|r| score(&r.answer_text)).sum();
    Some((total as f64 / records.len() as f64).round() as u32)
}

/// Mean depth across answers; 0 without answers.
pub fn calculate_depth_score(records: &[AnswerRecord]) -> u32 {
    mean_of(records, answer_depth).unwrap_or(0)
}

/// Mean communication across answers; neutral without answers.
pub fn calculate_communication_score(records: &[AnswerRecord]) -> u32 {
    mean_of(records, answer_communication).unwrap_or(NEUTRAL_COMMUNICATION)
}

pub fn overall_score(inputs: &DecisionInputs, weights: &DecisionWeights) -> u32 {
    let score = inputs.skill_match as f64 * weights.skill_match
        + inputs.depth as f64 * weights.depth
        + inputs.authenticity as f64 * weights.authenticity
        + inputs.communication as f64 * weights.communication
        + inputs.consistency as f64 * weights.consistency;
    score.round().clamp(0.0, 100.0) as u32
}

fn confidence(inputs: &DecisionInputs, decision: Verdict) -> u32 {
    let values = inputs.values();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    let confidence = match decision {
        Verdict::Pass if mean >= 80.0 => 95.0,
        Verdict::Reject if mean <= 35.0 => 95.0,
        _ => 90.0 - variance.sqrt(),
    };
    confidence.round().clamp(60.0, 98.0) as u32
}

/// Classify a session into PASS, HOLD or REJECT.
///
/// Early rejections are checked in order (authenticity, then skill gap) and
/// only the branch taken records its concern. Per-metric reasons and
/// concerns are appended afterwards whatever the branch.
pub fn make_decision(inputs: DecisionInputs, weights: &DecisionWeights) -> DecisionResult {
    let overall = overall_score(&inputs, weights);
    let mut reasons = Vec::new();
    let mut concerns = Vec::new();

    let decision = if inputs.authenticity < 40 {
        debug!("Decision branch: authenticity below 40");
        concerns.push("Authenticity concern: answers appear generic or rehearsed".to_string());
        Verdict::Reject
    } else if inputs.skill_match < 35 {
        debug!("Decision branch: skill match below 35");
        concerns.push("Critical skill gap in required skills".to_string());
        Verdict::Reject
    } else if overall >= 70 && inputs.skill_match >= 70 && inputs.authenticity >= 65 {
        debug!("Decision branch: pass thresholds met");
        Verdict::Pass
    } else if overall >= 50 && inputs.skill_match >= 50 {
        debug!("Decision branch: hold thresholds met");
        Verdict::Hold
    } else {
        debug!("Decision branch: below hold thresholds");
        Verdict::Reject
    };

    if inputs.skill_match >= 70 {
        reasons.push(format!("Strong skill match ({}%)", inputs.skill_match));
    } else if inputs.skill_match < 50 {
        concerns.push(format!("Limited skill match ({}%)", inputs.skill_match));
    }
    if inputs.authenticity >= 70 {
        reasons.push("Answers show genuine first-hand experience".to_string());
    } else if inputs.authenticity < 50 {
        concerns.push("Answers lack personal, specific detail".to_string());
    }
    if inputs.depth >= 60 {
        reasons.push("Good technical depth in answers".to_string());
    } else if inputs.depth < 40 {
        concerns.push("Answers lack technical depth".to_string());
    }
    if inputs.consistency >= 70 {
        reasons.push("Consistent level of detail across answers".to_string());
    } else if inputs.consistency < 50 {
        concerns.push("Inconsistent level of detail across answers".to_string());
    }

    DecisionResult {
        overall_score: overall,
        decision,
        reasons,
        concerns,
        confidence: confidence(&inputs, decision),
        inputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inputs(skill_match: u32, authenticity: u32, depth: u32, communication: u32, consistency: u32) -> DecisionInputs {
        DecisionInputs {
            skill_match,
            depth,
            authenticity,
            communication,
            consistency,
        }
    }

    #[test]
    fn test_balanced_candidate_passes() {
        let result = make_decision(inputs(80, 70, 60, 60, 70), &DecisionWeights::default());
        assert_eq!(result.overall_score, 70);
        assert_eq!(result.decision, Verdict::Pass);
        assert!(result.concerns.is_empty());
        // 90 - population stddev of [80, 60, 70, 60, 70]
        assert_eq!(result.confidence, 83);
    }

    #[test]
    fn test_authenticity_checked_before_skill_gap() {
        let result = make_decision(inputs(20, 30, 50, 50, 50), &DecisionWeights::default());
        assert_eq!(result.decision, Verdict::Reject);
        assert!(result.concerns[0].starts_with("Authenticity concern"));
        assert!(!result.concerns.iter().any(|c| c.starts_with("Critical skill gap")));
        assert!(result.concerns.iter().any(|c| c.starts_with("Limited skill match")));
    }

    #[test]
    fn test_skill_gap_reject() {
        let result = make_decision(inputs(30, 90, 90, 90, 90), &DecisionWeights::default());
        assert_eq!(result.decision, Verdict::Reject);
        assert_eq!(result.concerns[0], "Critical skill gap in required skills");
    }

    #[test]
    fn test_hold_band() {
        let result = make_decision(inputs(60, 60, 50, 50, 60), &DecisionWeights::default());
        assert_eq!(result.decision, Verdict::Hold);
    }

    #[test]
    fn test_confidence_override_and_clamp() {
        let strong = make_decision(inputs(90, 90, 85, 80, 90), &DecisionWeights::default());
        assert_eq!(strong.decision, Verdict::Pass);
        assert_eq!(strong.confidence, 95);

        let weak = make_decision(inputs(10, 30, 20, 50, 50), &DecisionWeights::default());
        assert_eq!(weak.decision, Verdict::Reject);
        assert_eq!(weak.confidence, 95);

        let spread = make_decision(inputs(100, 0, 100, 0, 100), &DecisionWeights::default());
        assert_eq!(spread.confidence, 60);
    }

    #[test]
    fn test_overall_monotonic_in_skill_match() {
        let weights = DecisionWeights::default();
        let mut previous = 0;
        for skill in 0..=100 {
            let score = overall_score(&inputs(skill, 55, 45, 65, 75), &weights);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_depth_and_communication() {
        assert_eq!(answer_depth(""), 0);
        let answer = "I chose Redis because the cache bug cost us 3 hours a day. \
                      I decided to shard it and learned a lot about eviction.";
        // >100 chars (15) + digit, error, reasoning, decision, growth (50)
        assert_eq!(answer_depth(answer), 65);

        assert_eq!(answer_communication(""), 50);
        let structured = "First I profiled the service to find the slow path. \
                          Then I rewrote the query planner hints for the two worst queries. \
                          Finally we load tested the change before shipping it.";
        assert_eq!(answer_communication(structured), 100);
    }

    #[test]
    fn test_empty_session_metrics() {
        assert_eq!(calculate_depth_score(&[]), 0);
        assert_eq!(calculate_communication_score(&[]), 50);
    }

    #[test]
    fn test_weight_validation() {
        assert!(DecisionWeights::default().validate().is_ok());
        let skewed = DecisionWeights {
            skill_match: 0.5,
            ..Default::default()
        };
        assert!(skewed.validate().is_err());
        let negative = DecisionWeights {
            skill_match: 0.6,
            depth: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(80), "Excellent");
        assert_eq!(score_label(65), "Good");
        assert_eq!(score_label(50), "Fair");
        assert_eq!(score_label(35), "Below Average");
        assert_eq!(score_label(34), "Poor");
    }
}
