//! Per-answer authenticity scoring and the session-level authenticity report

use crate::analysis::signals::{
    analyze_consistency, calculate_authenticity, AuthenticityBreakdown, AuthenticityFlags,
};
use crate::analysis::text::{char_len, matched_phrases, truncate_chars, words};
use crate::interview::questions::{Question, QuestionType};
use crate::library::language::{
    FAILURE_VOCABULARY, GENERIC_PHRASES, POLISHED_PHRASES, TECHNICAL_NOUNS, TEXTBOOK_PHRASES,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

const FAILURE_PENALTY: f64 = 0.8;
const VAGUE_MIN_CHARS: usize = 150;
const RED_FLAG_PENALTY: f64 = 3.0;
const SESSION_FLOOR: f64 = 20.0;
const NEUTRAL_SCORE: u32 = 50;
const PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagKind {
    Generic,
    Textbook,
    OverlyPolished,
    Vague,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub kind: RedFlagKind,
    pub severity: Severity,
    /// The phrase that raised the flag; empty for the synthetic vague flag.
    pub phrase: String,
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RedFlagKind::Vague => write!(f, "vague answer without concrete evidence"),
            RedFlagKind::Generic => write!(f, "generic phrasing: \"{}\"", self.phrase),
            RedFlagKind::Textbook => write!(f, "textbook phrasing: \"{}\"", self.phrase),
            RedFlagKind::OverlyPolished => write!(f, "overly polished: \"{}\"", self.phrase),
        }
    }
}

/// Authenticity of a single answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticityResult {
    pub overall_score: u32,
    pub breakdown: AuthenticityBreakdown,
    pub red_flags: Vec<RedFlag>,
    pub flags: AuthenticityFlags,
}

/// One answered question. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: Question,
    pub answer_text: String,
    pub authenticity: AuthenticityResult,
    pub time_spent_seconds: Option<u32>,
}

impl AnswerRecord {
    /// Score `answer_text` against `question` and record the result.
    pub fn new(question: Question, answer_text: impl Into<String>, time_spent_seconds: Option<u32>) -> Self {
        let answer_text = answer_text.into();
        let authenticity = score_answer_authenticity(&answer_text, &question);
        Self {
            question,
            answer_text,
            authenticity,
            time_spent_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 75 => RiskLevel::Low,
            s if s >= 55 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Responses consistently show personal, specific experience.",
            RiskLevel::Medium => "Responses are mixed; some lack personal detail or specificity.",
            RiskLevel::High => "Responses are largely generic or rehearsed.",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Answers read as first-hand experience. Weigh skills and depth as usual.",
            RiskLevel::Medium => "Probe the flagged answers in the next round before deciding.",
            RiskLevel::High => "Verify the claimed experience directly before advancing this candidate.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAuthenticityReport {
    pub overall_score: u32,
    pub consistency_score: u32,
    pub total_red_flags: usize,
    pub risk_level: RiskLevel,
    pub risk_description: String,
    pub confidence: u32,
    pub answer_count: usize,
}

/// A short view of one answer for the recruiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub question_id: String,
    pub question_text: String,
    pub answer_preview: String,
    pub score: u32,
    pub red_flags: Vec<String>,
}

impl From<&AnswerRecord> for AnswerSummary {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_id: record.question.id.clone(),
            question_text: record.question.text.clone(),
            answer_preview: truncate_chars(record.answer_text.trim(), PREVIEW_CHARS),
            score: record.authenticity.overall_score,
            red_flags: record.authenticity.red_flags.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticityReport {
    pub session: SessionAuthenticityReport,
    pub concerning_answers: Vec<AnswerSummary>,
    pub strong_answers: Vec<AnswerSummary>,
    pub recommendation: String,
}

fn has_technical_noun(lowered: &str) -> bool {
    words(lowered).into_iter().any(|w| {
        TECHNICAL_NOUNS
            .iter()
            .any(|noun| w == *noun || w.strip_suffix('s') == Some(*noun))
    })
}

/// One flag per matched phrase, plus a vague flag for long answers with no concrete evidence.
pub fn identify_red_flags(answer: &str) -> Vec<RedFlag> {
    let lowered = answer.to_lowercase();
    let classes = [
        (RedFlagKind::Generic, Severity::Medium, GENERIC_PHRASES),
        (RedFlagKind::Textbook, Severity::High, TEXTBOOK_PHRASES),
        (RedFlagKind::OverlyPolished, Severity::Medium, POLISHED_PHRASES),
    ];

    let mut flags: Vec<RedFlag> = classes
        .iter()
        .flat_map(|(kind, severity, phrases)| {
            matched_phrases(&lowered, phrases).into_iter().map(move |phrase| RedFlag {
                kind: *kind,
                severity: *severity,
                phrase: phrase.to_string(),
            })
        })
        .collect();

    if char_len(answer) > VAGUE_MIN_CHARS
        && !answer.chars().any(|c| c.is_ascii_digit())
        && !has_technical_noun(&lowered)
    {
        flags.push(RedFlag {
            kind: RedFlagKind::Vague,
            severity: Severity::High,
            phrase: String::new(),
        });
    }

    flags
}

/// Authenticity of one answer, adjusted for the question it answers.
pub fn score_answer_authenticity(answer: &str, question: &Question) -> AuthenticityResult {
    let signals = calculate_authenticity(answer);
    let mut overall_score = signals.overall_score;

    if question.question_type == QuestionType::Failure {
        let lowered = answer.to_lowercase();
        if matched_phrases(&lowered, FAILURE_VOCABULARY).is_empty() {
            overall_score = (overall_score as f64 * FAILURE_PENALTY).round() as u32;
        }
    }

    let red_flags = identify_red_flags(answer);
    debug!(
        "Answer to {} scored {} with {} red flags",
        question.id,
        overall_score,
        red_flags.len()
    );

    AuthenticityResult {
        overall_score,
        breakdown: signals.breakdown,
        red_flags,
        flags: signals.flags,
    }
}

/// Priority-weighted mean of per-answer scores. `None` without answers.
pub fn weighted_mean_score(records: &[AnswerRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let (weighted, total_weight) = records.iter().fold((0.0, 0.0), |(sum, weight), r| {
        let w = r.question.priority.answer_weight();
        (sum + r.authenticity.overall_score as f64 * w, weight + w)
    });
    Some(weighted / total_weight)
}

/// Aggregate authenticity across every answer in the session.
pub fn calculate_overall_authenticity(records: &[AnswerRecord]) -> SessionAuthenticityReport {
    let answers: Vec<&str> = records.iter().map(|r| r.answer_text.as_str()).collect();
    let consistency_score = analyze_consistency(&answers);
    let total_red_flags: usize = records.iter().map(|r| r.authenticity.red_flags.len()).sum();

    let overall_score = match weighted_mean_score(records) {
        Some(mean) => {
            let adjusted = mean * (consistency_score as f64 / 100.0)
                - RED_FLAG_PENALTY * total_red_flags as f64;
            adjusted.max(SESSION_FLOOR).round() as u32
        }
        None => NEUTRAL_SCORE,
    };

    let risk_level = if records.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::from_score(overall_score)
    };
    SessionAuthenticityReport {
        overall_score,
        consistency_score,
        total_red_flags,
        risk_level,
        risk_description: risk_level.description().to_string(),
        confidence: (records.len() as u32 * 15).min(95),
        answer_count: records.len(),
    }
}

/// Session report plus the answers a recruiter should look at first.
pub fn generate_authenticity_report(records: &[AnswerRecord]) -> AuthenticityReport {
    let session = calculate_overall_authenticity(records);

    let concerning_answers = records
        .iter()
        .filter(|r| r.authenticity.overall_score < 50 || r.authenticity.red_flags.len() > 1)
        .map(AnswerSummary::from)
        .collect();
    let strong_answers = records
        .iter()
        .filter(|r| r.authenticity.overall_score >= 70 && r.authenticity.red_flags.is_empty())
        .map(AnswerSummary::from)
        .collect();

    AuthenticityReport {
        recommendation: session.risk_level.recommendation().to_string(),
        session,
        concerning_answers,
        strong_answers,
    }
}
