//! Recruiter and candidate report views over a finished screening

use crate::scoring::authenticity::{AnswerRecord, AuthenticityReport};
use crate::scoring::decision::{score_label, DecisionResult, Verdict};
use crate::skills::experience::{ExperienceProfile, SeniorityLevel};
use crate::skills::mapper::{Importance, SkillMapping};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const HINT_THRESHOLD: f64 = 0.8;
const MAX_EXTRA_SKILLS: usize = 10;
const ANSWER_PREVIEW_CHARS: usize = 160;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub resume_source: Option<String>,
    pub job_source: Option<String>,
}

impl ReportMetadata {
    pub fn new(resume_source: Option<String>, job_source: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source,
            job_source,
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceAlignment {
    Meets,
    Below,
    Above,
    Unknown,
}

impl fmt::Display for ExperienceAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceAlignment::Meets => write!(f, "meets"),
            ExperienceAlignment::Below => write!(f, "below"),
            ExperienceAlignment::Above => write!(f, "above"),
            ExperienceAlignment::Unknown => write!(f, "unknown"),
        }
    }
}

/// Requested versus inferred seniority. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCheck {
    pub requested: Option<SeniorityLevel>,
    pub inferred_level: SeniorityLevel,
    pub inferred_years: Option<u32>,
    pub alignment: ExperienceAlignment,
}

impl ExperienceCheck {
    pub fn evaluate(profile: &ExperienceProfile, requested: Option<&str>) -> Self {
        let requested = requested.and_then(SeniorityLevel::parse);
        let evidence = profile.years.is_some() || profile.level != SeniorityLevel::Entry;
        let alignment = match requested {
            Some(level) if evidence => match profile.level.cmp(&level) {
                std::cmp::Ordering::Less => ExperienceAlignment::Below,
                std::cmp::Ordering::Equal => ExperienceAlignment::Meets,
                std::cmp::Ordering::Greater => ExperienceAlignment::Above,
            },
            _ => ExperienceAlignment::Unknown,
        };
        Self {
            requested,
            inferred_level: profile.level,
            inferred_years: profile.years,
            alignment,
        }
    }
}

/// Closest resume skill to a missing requirement, for a human to double-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHint {
    pub missing_skill: String,
    pub closest_skill: String,
    pub similarity: f64,
}

/// Missing requirements that have a near-miss among the extracted skills.
pub fn closest_skill_hints(mapping: &SkillMapping) -> Vec<SkillHint> {
    let candidates: Vec<&str> = mapping
        .strong
        .iter()
        .chain(mapping.weak.iter())
        .map(|m| m.matched_skill.as_str())
        .chain(mapping.extra.iter().map(|e| e.skill_name.as_str()))
        .collect();

    mapping
        .missing
        .iter()
        .filter_map(|requirement| {
            let missing = requirement.normalized_name();
            candidates
                .iter()
                .map(|c| (*c, strsim::jaro_winkler(&missing, c)))
                .filter(|(_, similarity)| *similarity >= HINT_THRESHOLD)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(closest, similarity)| SkillHint {
                    missing_skill: requirement.skill_name.clone(),
                    closest_skill: closest.to_string(),
                    similarity,
                })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricLine {
    pub name: String,
    pub score: u32,
    pub label: String,
}

impl MetricLine {
    fn new(name: &str, score: u32) -> Self {
        Self {
            name: name.to_string(),
            score,
            label: score_label(score).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLine {
    pub skill: String,
    pub importance: Importance,
    pub confidence: Option<u32>,
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub skill_match_score: u32,
    pub strong: Vec<SkillLine>,
    pub weak: Vec<SkillLine>,
    pub missing: Vec<SkillLine>,
    /// Highest section weight first.
    pub extra: Vec<String>,
}

impl From<&SkillMapping> for SkillSummary {
    fn from(mapping: &SkillMapping) -> Self {
        let matched = |m: &crate::skills::mapper::MatchedRequirement| SkillLine {
            skill: m.requirement.skill_name.clone(),
            importance: m.requirement.importance,
            confidence: Some(m.confidence),
            evidence: Some(m.evidence.clone()),
        };

        let mut extra: Vec<_> = mapping.extra.iter().collect();
        extra.sort_by(|a, b| {
            b.section_weight
                .total_cmp(&a.section_weight)
                .then(b.mention_count.cmp(&a.mention_count))
        });

        Self {
            skill_match_score: mapping.skill_match_score,
            strong: mapping.strong.iter().map(matched).collect(),
            weak: mapping.weak.iter().map(matched).collect(),
            missing: mapping
                .missing
                .iter()
                .map(|r| SkillLine {
                    skill: r.skill_name.clone(),
                    importance: r.importance,
                    confidence: None,
                    evidence: None,
                })
                .collect(),
            extra: extra
                .into_iter()
                .take(MAX_EXTRA_SKILLS)
                .map(|e| e.skill_name.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerLine {
    pub question_id: String,
    pub question: String,
    pub answer_preview: String,
    pub authenticity: u32,
    pub red_flags: usize,
    pub time_spent_seconds: Option<u32>,
}

impl From<&AnswerRecord> for AnswerLine {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_id: record.question.id.clone(),
            question: record.question.text.clone(),
            answer_preview: crate::analysis::text::truncate_chars(record.answer_text.trim(), ANSWER_PREVIEW_CHARS),
            authenticity: record.authenticity.overall_score,
            red_flags: record.authenticity.red_flags.len(),
            time_spent_seconds: record.time_spent_seconds,
        }
    }
}

/// Everything a recruiter sees about one screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterReport {
    pub metadata: ReportMetadata,
    pub decision: DecisionResult,
    pub overall_label: String,
    pub metrics: Vec<MetricLine>,
    pub skills: SkillSummary,
    pub skill_hints: Vec<SkillHint>,
    pub experience: ExperienceCheck,
    pub authenticity: AuthenticityReport,
    pub answers: Vec<AnswerLine>,
    /// Narrative from the optional enhancement layer, shown beside the computed verdict.
    pub narrative: Option<String>,
    /// Extra probing questions from the enhancement layer, for a later round.
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

/// What the candidate is told. No scores beyond a label, no red flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFeedback {
    pub generated_at: DateTime<Utc>,
    pub verdict: Verdict,
    pub message: String,
    pub overall_label: String,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
}

/// Inputs shared by both report views.
pub struct ReportContext<'a> {
    pub decision: &'a DecisionResult,
    pub mapping: &'a SkillMapping,
    pub authenticity: &'a AuthenticityReport,
    pub records: &'a [AnswerRecord],
    pub experience: ExperienceCheck,
    pub metadata: ReportMetadata,
}

pub fn generate_recruiter_report(context: ReportContext<'_>) -> RecruiterReport {
    let inputs = &context.decision.inputs;
    let metrics = vec![
        MetricLine::new("Skill match", inputs.skill_match),
        MetricLine::new("Technical depth", inputs.depth),
        MetricLine::new("Authenticity", inputs.authenticity),
        MetricLine::new("Communication", inputs.communication),
        MetricLine::new("Consistency", inputs.consistency),
    ];

    RecruiterReport {
        overall_label: score_label(context.decision.overall_score).to_string(),
        metrics,
        skills: SkillSummary::from(context.mapping),
        skill_hints: closest_skill_hints(context.mapping),
        experience: context.experience,
        authenticity: context.authenticity.clone(),
        answers: context.records.iter().map(AnswerLine::from).collect(),
        decision: context.decision.clone(),
        metadata: context.metadata,
        narrative: None,
        suggested_questions: Vec::new(),
    }
}

pub fn generate_candidate_feedback(decision: &DecisionResult, mapping: &SkillMapping) -> CandidateFeedback {
    let inputs = &decision.inputs;
    let mut strengths = Vec::new();
    let mut growth_areas = Vec::new();

    let strong: Vec<&str> = mapping
        .strong
        .iter()
        .map(|m| m.requirement.skill_name.as_str())
        .collect();
    if !strong.is_empty() {
        strengths.push(format!("Clear experience with {}", strong.join(", ")));
    }
    if inputs.authenticity >= 70 {
        strengths.push("Answers were grounded in your own experience".to_string());
    }
    if inputs.depth >= 60 {
        strengths.push("Good technical depth when explaining your work".to_string());
    }
    if inputs.communication >= 70 {
        strengths.push("Clear, well-structured communication".to_string());
    }

    for requirement in mapping
        .missing
        .iter()
        .filter(|r| r.importance == Importance::Required)
    {
        growth_areas.push(format!("Build hands-on experience with {}", requirement.skill_name));
    }
    if inputs.authenticity < 65 {
        growth_areas.push("Use concrete examples from your own projects, with numbers where you can".to_string());
    }
    if inputs.depth < 60 {
        growth_areas.push("Explain the reasoning behind your technical decisions in more detail".to_string());
    }

    CandidateFeedback {
        generated_at: Utc::now(),
        verdict: decision.decision,
        message: decision.decision.friendly_message().to_string(),
        overall_label: score_label(decision.overall_score).to_string(),
        strengths,
        growth_areas,
    }
}
