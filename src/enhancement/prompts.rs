//! Prompt templates for the enhancement layer

use crate::output::report::RecruiterReport;
use crate::skills::mapper::SkillMapping;

/// Longest slice of resume text sent to the generator.
const MAX_RESUME_CHARS: usize = 6000;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub resume_enrichment: String,
    pub narrative: String,
    pub extra_questions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            resume_enrichment: RESUME_ENRICHMENT_TEMPLATE.to_string(),
            narrative: NARRATIVE_TEMPLATE.to_string(),
            extra_questions: EXTRA_QUESTIONS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_resume_enrichment(&self, resume_text: &str) -> String {
        let resume = crate::analysis::text::truncate_chars(resume_text.trim(), MAX_RESUME_CHARS);
        self.resume_enrichment.replace("{resume}", &resume)
    }

    pub fn render_narrative(&self, report: &RecruiterReport) -> String {
        let metrics = report
            .metrics
            .iter()
            .map(|m| format!("- {}: {} ({})", m.name, m.score, m.label))
            .collect::<Vec<_>>()
            .join("\n");
        let concerns = if report.decision.concerns.is_empty() {
            "none".to_string()
        } else {
            report.decision.concerns.join("; ")
        };

        let strong: Vec<&str> = report.skills.strong.iter().map(|s| s.skill.as_str()).collect();
        let missing: Vec<&str> = report.skills.missing.iter().map(|s| s.skill.as_str()).collect();

        self.narrative
            .replace("{verdict}", &report.decision.decision.to_string())
            .replace("{overall}", &report.decision.overall_score.to_string())
            .replace("{metrics}", &metrics)
            .replace("{strong}", &join_names(&strong))
            .replace("{missing}", &join_names(&missing))
            .replace("{concerns}", &concerns)
    }

    pub fn render_extra_questions(&self, mapping: &SkillMapping, count: usize) -> String {
        let weak: Vec<&str> = mapping.weak.iter().map(|m| m.requirement.skill_name.as_str()).collect();
        let missing: Vec<&str> = mapping.missing.iter().map(|r| r.skill_name.as_str()).collect();
        self.extra_questions
            .replace("{count}", &count.to_string())
            .replace("{weak}", &join_names(&weak))
            .replace("{missing}", &join_names(&missing))
    }
}

fn join_names(names: &[&str]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

const RESUME_ENRICHMENT_TEMPLATE: &str = r#"TASK: Read the resume below and describe the candidate as JSON.

<RESUME>
{resume}
</RESUME>

Reply with a single JSON object and nothing else:
{"summary": "<two sentences>", "skills": ["<skill>", ...], "years_of_experience": <number or null>, "highlights": ["<achievement>", ...]}"#;

const NARRATIVE_TEMPLATE: &str = r#"TASK: Write a short paragraph for a recruiter summarising this screening.

Verdict: {verdict} (overall {overall}/100)
Metrics:
{metrics}
Strong skills: {strong}
Missing skills: {missing}
Concerns: {concerns}

Do not change or question the verdict. Plain prose, at most five sentences."#;

const EXTRA_QUESTIONS_TEMPLATE: &str = r#"TASK: Suggest {count} interview questions that ask the candidate about their own past work.

Skills with thin evidence: {weak}
Skills not found on the resume: {missing}

Every question must ask about a specific experience, never for a definition.
Reply with a JSON array and nothing else:
[{"skill": "<skill>", "question": "<question>"}, ...]"#;
