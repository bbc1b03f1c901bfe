//! Optional enhancement layer backed by an external text generator
//!
//! Everything here is an enrichment: failures are logged and dropped, and no
//! output ever replaces a computed score, mapping or verdict.

pub mod generator;
pub mod prompts;

pub use generator::{CommandGenerator, TextGenerator};
pub use prompts::PromptTemplates;

use crate::error::{Result, ScreenerError};
use crate::interview::questions::{is_anti_cheat_question, Question, QuestionType, GENERAL_SKILL};
use crate::output::report::RecruiterReport;
use crate::skills::mapper::{Priority, SkillMapping};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Structured view of a resume produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeEnrichment {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestedQuestion {
    #[serde(default)]
    skill: Option<String>,
    question: String,
}

/// Pull the outermost JSON value delimited by `open`/`close` out of a reply
/// that may carry prose or code fences around it.
fn parse_json_reply<T: DeserializeOwned>(reply: &str, open: char, close: char) -> Result<T> {
    let start = reply.find(open);
    let end = reply.rfind(close);
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(serde_json::from_str(&reply[start..=end])?),
        _ => Err(ScreenerError::Enhancement("Reply contains no JSON".to_string())),
    }
}

pub struct Enhancer<G: TextGenerator> {
    generator: G,
    templates: PromptTemplates,
}

impl<G: TextGenerator> Enhancer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            templates: PromptTemplates::default(),
        }
    }

    async fn ask(&self, purpose: &str, prompt: &str) -> Option<String> {
        debug!("Requesting {} ({} chars of prompt)", purpose, prompt.len());
        match self.generator.generate(prompt).await {
            Ok(reply) if !reply.trim().is_empty() => Some(reply),
            Ok(_) => {
                warn!("Enhancement returned an empty {}", purpose);
                None
            }
            Err(e) => {
                warn!("Enhancement failed for {}: {}", purpose, e);
                None
            }
        }
    }

    pub async fn enrich_resume(&self, resume_text: &str) -> Option<ResumeEnrichment> {
        let prompt = self.templates.render_resume_enrichment(resume_text);
        let reply = self.ask("resume enrichment", &prompt).await?;
        match parse_json_reply::<ResumeEnrichment>(&reply, '{', '}') {
            Ok(enrichment) => {
                info!("Resume enrichment lists {} skills", enrichment.skills.len());
                Some(enrichment)
            }
            Err(e) => {
                warn!("Discarding resume enrichment: {}", e);
                None
            }
        }
    }

    pub async fn narrative(&self, report: &RecruiterReport) -> Option<String> {
        let prompt = self.templates.render_narrative(report);
        self.ask("narrative", &prompt)
            .await
            .map(|reply| reply.trim().to_string())
    }

    /// Up to `count` extra probing questions, skipping definitional ones and
    /// any text already in `existing`.
    pub async fn extra_questions(
        &self,
        mapping: &SkillMapping,
        existing: &[Question],
        count: usize,
    ) -> Vec<Question> {
        if count == 0 {
            return Vec::new();
        }
        let prompt = self.templates.render_extra_questions(mapping, count);
        let Some(reply) = self.ask("extra questions", &prompt).await else {
            return Vec::new();
        };
        let suggestions: Vec<SuggestedQuestion> = match parse_json_reply(&reply, '[', ']') {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("Discarding extra questions: {}", e);
                return Vec::new();
            }
        };

        let mut seen: HashSet<String> = existing.iter().map(|q| q.text.to_lowercase()).collect();
        let mut questions = Vec::new();
        for suggestion in suggestions {
            let text = suggestion.question.trim().to_string();
            if text.is_empty() || !is_anti_cheat_question(&text) || !seen.insert(text.to_lowercase()) {
                debug!("Skipping suggested question: {}", text);
                continue;
            }
            let skill_name = suggestion
                .skill
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| GENERAL_SKILL.to_string());
            questions.push(Question {
                id: format!("extra{}", questions.len() + 1),
                skill_name,
                question_type: QuestionType::Depth,
                priority: Priority::Medium,
                text,
                reason: "Suggested by the enhancement layer".to_string(),
                parent_question_id: None,
            });
            if questions.len() == count {
                break;
            }
        }
        questions
    }
}
