//! Output formatters for recruiter reports and candidate feedback

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::*;
use crate::scoring::authenticity::RiskLevel;
use crate::scoring::decision::Verdict;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering the two report views
pub trait OutputFormatter {
    fn format_report(&self, report: &RecruiterReport) -> Result<String>;
    fn format_feedback(&self, feedback: &CandidateFeedback) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Standalone HTML page for the recruiter report
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Coordinates the formatters for each output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Candidate Screening Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 960px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
        .container { background: white; border-radius: 8px; padding: 30px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .section { margin: 25px 0; }
        .verdict { display: inline-block; padding: 6px 16px; border-radius: 16px; font-weight: bold; color: white; }
        .verdict-pass { background: #28a745; }
        .verdict-hold { background: #ffc107; color: #333; }
        .verdict-reject { background: #dc3545; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e9ecef; }
        .concern { color: #c0392b; }
        .reason { color: #1e7e34; }
        .metadata { font-size: 0.9em; color: #666; border-top: 1px solid #e9ecef; padding-top: 15px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Candidate Screening Report</h1>
        <p>Generated {{ generated_at }}</p>

        <div class="section">
            <h2>Decision</h2>
            <p><span class="verdict {{ verdict_class }}">{{ verdict }}</span>
               Overall {{ overall_score }} ({{ overall_label }}), confidence {{ confidence }}%</p>
            <ul>
            {% for reason in reasons %}<li class="reason">{{ reason }}</li>{% endfor %}
            {% for concern in concerns %}<li class="concern">{{ concern }}</li>{% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Metrics</h2>
            <table>
                <tr><th>Metric</th><th>Score</th><th>Rating</th></tr>
                {% for metric in metrics %}
                <tr><td>{{ metric.name }}</td><td>{{ metric.score }}</td><td>{{ metric.label }}</td></tr>
                {% endfor %}
            </table>
        </div>

        <div class="section">
            <h2>Skills</h2>
            <p><strong>Strong:</strong> {{ strong_skills }}</p>
            <p><strong>Needs verification:</strong> {{ weak_skills }}</p>
            <p><strong>Missing:</strong> {{ missing_skills }}</p>
            <p><strong>Additional:</strong> {{ extra_skills }}</p>
            {% for hint in hints %}<p><em>{{ hint }}</em></p>{% endfor %}
            <p><strong>Experience:</strong> {{ experience }}</p>
        </div>

        <div class="section">
            <h2>Authenticity</h2>
            <p>Score {{ authenticity_score }}, {{ risk_level }} risk. {{ risk_description }}</p>
            <p>{{ recommendation }}</p>
            {% for answer in concerning_answers %}<p class="concern">{{ answer }}</p>{% endfor %}
        </div>

        {% if has_narrative %}
        <div class="section">
            <h2>Narrative Summary</h2>
            <blockquote>{{ narrative }}</blockquote>
        </div>
        {% endif %}

        {% if !suggested_questions.is_empty() %}
        <div class="section">
            <h2>Suggested Follow-up Questions</h2>
            <ul>
            {% for question in suggested_questions %}<li>{{ question }}</li>{% endfor %}
            </ul>
        </div>
        {% endif %}

        <div class="metadata">
            <p>Generated by Candidate Screener v{{ version }}</p>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    verdict: String,
    verdict_class: String,
    overall_score: u32,
    overall_label: String,
    confidence: u32,
    reasons: Vec<String>,
    concerns: Vec<String>,
    metrics: Vec<MetricLine>,
    strong_skills: String,
    weak_skills: String,
    missing_skills: String,
    extra_skills: String,
    hints: Vec<String>,
    experience: String,
    authenticity_score: u32,
    risk_level: String,
    risk_description: String,
    recommendation: String,
    concerning_answers: Vec<String>,
    narrative: String,
    has_narrative: bool,
    suggested_questions: Vec<String>,
    version: String,
    resume_source: String,
    job_source: String,
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn skill_names(lines: &[SkillLine]) -> Vec<String> {
    lines.iter().map(|l| l.skill.clone()).collect()
}

fn hint_text(hint: &SkillHint) -> String {
    format!(
        "{} not found; closest resume skill is {} ({:.0}% similar)",
        hint.missing_skill,
        hint.closest_skill,
        hint.similarity * 100.0
    )
}

fn experience_text(check: &ExperienceCheck) -> String {
    let years = check
        .inferred_years
        .map(|y| format!(", {} years", y))
        .unwrap_or_default();
    match check.requested {
        Some(requested) => format!(
            "inferred {}{} against requested {} ({})",
            check.inferred_level, years, requested, check.alignment
        ),
        None => format!("inferred {}{}", check.inferred_level, years),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict(&self, verdict: Verdict) -> String {
        let color = match verdict {
            Verdict::Pass => Color::Green,
            Verdict::Hold => Color::Yellow,
            Verdict::Reject => Color::Red,
        };
        if self.use_colors {
            format!("[{}]", verdict.to_string().color(color).bold())
        } else {
            format!("[{}]", verdict)
        }
    }

    fn score_color(score: u32) -> Color {
        match score {
            80..=100 => Color::Green,
            65..=79 => Color::BrightGreen,
            50..=64 => Color::Yellow,
            35..=49 => Color::BrightRed,
            _ => Color::Red,
        }
    }

    fn risk_color(risk: RiskLevel) -> Color {
        match risk {
            RiskLevel::Low => Color::Green,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::High => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RecruiterReport) -> Result<String> {
        let mut output = String::new();
        let decision = &report.decision;

        output.push_str(&self.format_header("CANDIDATE SCREENING REPORT", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Decision", 2));
        output.push_str(&format!(
            "{} Overall {} ({}) | confidence {}%\n",
            self.format_verdict(decision.decision),
            decision.overall_score,
            report.overall_label,
            decision.confidence
        ));
        for reason in &decision.reasons {
            output.push_str(&format!("  + {}\n", self.colorize(reason, Color::Green)));
        }
        for concern in &decision.concerns {
            output.push_str(&format!("  - {}\n", self.colorize(concern, Color::Red)));
        }

        output.push_str(&self.format_header("Metrics", 3));
        for metric in &report.metrics {
            output.push_str(&format!(
                "  {:<16} {:>3}  {}\n",
                metric.name,
                metric.score,
                self.colorize(&metric.label, Self::score_color(metric.score))
            ));
        }

        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&format!("  Skill match: {}%\n", report.skills.skill_match_score));
        output.push_str(&format!("  Strong:  {}\n", join_or_none(&skill_names(&report.skills.strong))));
        output.push_str(&format!("  Weak:    {}\n", join_or_none(&skill_names(&report.skills.weak))));
        output.push_str(&format!(
            "  Missing: {}\n",
            self.colorize(&join_or_none(&skill_names(&report.skills.missing)), Color::Red)
        ));
        output.push_str(&format!("  Extra:   {}\n", join_or_none(&report.skills.extra)));
        for hint in &report.skill_hints {
            output.push_str(&format!("  ? {}\n", hint_text(hint)));
        }
        output.push_str(&format!("  Experience: {}\n", experience_text(&report.experience)));

        let session = &report.authenticity.session;
        output.push_str(&self.format_header("Authenticity", 3));
        output.push_str(&format!(
            "  Score {} | consistency {} | red flags {} | risk {}\n",
            session.overall_score,
            session.consistency_score,
            session.total_red_flags,
            self.colorize(&session.risk_level.to_string(), Self::risk_color(session.risk_level))
        ));
        output.push_str(&format!("  {}\n", session.risk_description));
        output.push_str(&format!("  {}\n", report.authenticity.recommendation));

        if self.detailed {
            if !report.authenticity.concerning_answers.is_empty() {
                output.push_str(&self.format_header("Answers to Review", 3));
                for answer in &report.authenticity.concerning_answers {
                    output.push_str(&format!(
                        "  [{}] {} (score {})\n      {}\n",
                        answer.question_id, answer.question_text, answer.score, answer.answer_preview
                    ));
                    for flag in &answer.red_flags {
                        output.push_str(&format!("      ! {}\n", self.colorize(flag, Color::Red)));
                    }
                }
            }

            output.push_str(&self.format_header("All Answers", 3));
            for answer in &report.answers {
                let time = answer
                    .time_spent_seconds
                    .map(|s| format!(", {}s", s))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  [{}] authenticity {}, {} flags{}\n      Q: {}\n      A: {}\n",
                    answer.question_id,
                    answer.authenticity,
                    answer.red_flags,
                    time,
                    answer.question,
                    answer.answer_preview
                ));
            }
        }

        if let Some(narrative) = &report.narrative {
            output.push_str(&self.format_header("Narrative Summary", 3));
            output.push_str(&format!("  {}\n", narrative));
        }

        if !report.suggested_questions.is_empty() {
            output.push_str(&self.format_header("Suggested Follow-up Questions", 3));
            for question in &report.suggested_questions {
                output.push_str(&format!("  - {}\n", question));
            }
        }

        Ok(output)
    }

    fn format_feedback(&self, feedback: &CandidateFeedback) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("Your Screening Result", 1));
        output.push_str(&format!("{}\n", self.colorize(&feedback.message, Color::Cyan)));
        output.push_str(&format!("Overall: {}\n", feedback.overall_label));

        if !feedback.strengths.is_empty() {
            output.push_str(&self.format_header("What went well", 2));
            for strength in &feedback.strengths {
                output.push_str(&format!("  + {}\n", strength));
            }
        }
        if !feedback.growth_areas.is_empty() {
            output.push_str(&self.format_header("Where to grow", 2));
            for area in &feedback.growth_areas {
                output.push_str(&format!("  > {}\n", area));
            }
        }
        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RecruiterReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_feedback(&self, feedback: &CandidateFeedback) -> Result<String> {
        self.to_json(feedback)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &RecruiterReport) -> HtmlTemplate {
        let decision = &report.decision;
        let session = &report.authenticity.session;
        let verdict_class = match decision.decision {
            Verdict::Pass => "verdict-pass",
            Verdict::Hold => "verdict-hold",
            Verdict::Reject => "verdict-reject",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            verdict: decision.decision.to_string(),
            verdict_class: verdict_class.to_string(),
            overall_score: decision.overall_score,
            overall_label: report.overall_label.clone(),
            confidence: decision.confidence,
            reasons: decision.reasons.clone(),
            concerns: decision.concerns.clone(),
            metrics: report.metrics.clone(),
            strong_skills: join_or_none(&skill_names(&report.skills.strong)),
            weak_skills: join_or_none(&skill_names(&report.skills.weak)),
            missing_skills: join_or_none(&skill_names(&report.skills.missing)),
            extra_skills: join_or_none(&report.skills.extra),
            hints: report.skill_hints.iter().map(hint_text).collect(),
            experience: experience_text(&report.experience),
            authenticity_score: session.overall_score,
            risk_level: session.risk_level.to_string(),
            risk_description: session.risk_description.clone(),
            recommendation: report.authenticity.recommendation.clone(),
            concerning_answers: report
                .authenticity
                .concerning_answers
                .iter()
                .map(|a| format!("{} (score {}): {}", a.question_id, a.score, a.answer_preview))
                .collect(),
            narrative: report.narrative.clone().unwrap_or_default(),
            has_narrative: report.narrative.is_some(),
            suggested_questions: report.suggested_questions.clone(),
            version: report.metadata.version.clone(),
            resume_source: report.metadata.resume_source.clone().unwrap_or_else(|| "-".to_string()),
            job_source: report.metadata.job_source.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &RecruiterReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))
    }

    fn format_feedback(&self, _feedback: &CandidateFeedback) -> Result<String> {
        Err(ScreenerError::OutputFormatting(
            "Candidate feedback is available as console, JSON or Markdown".to_string(),
        ))
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_table(lines: &[SkillLine]) -> String {
        let mut table = String::from("| Skill | Importance | Confidence | Evidence |\n|---|---|---|---|\n");
        for line in lines {
            table.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                line.skill,
                line.importance,
                line.confidence.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                line.evidence.as_deref().unwrap_or("-").replace('|', "\\|")
            ));
        }
        table
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RecruiterReport) -> Result<String> {
        let decision = &report.decision;
        let session = &report.authenticity.session;
        let mut md = String::new();

        md.push_str("# Candidate Screening Report\n\n");
        md.push_str(&format!(
            "**Decision:** {} | **Overall:** {} ({}) | **Confidence:** {}%\n\n",
            decision.decision, decision.overall_score, report.overall_label, decision.confidence
        ));

        if !decision.reasons.is_empty() {
            md.push_str("### Reasons\n\n");
            for reason in &decision.reasons {
                md.push_str(&format!("- {}\n", reason));
            }
            md.push('\n');
        }
        if !decision.concerns.is_empty() {
            md.push_str("### Concerns\n\n");
            for concern in &decision.concerns {
                md.push_str(&format!("- {}\n", concern));
            }
            md.push('\n');
        }

        md.push_str("## Metrics\n\n| Metric | Score | Rating |\n|---|---|---|\n");
        for metric in &report.metrics {
            md.push_str(&format!("| {} | {} | {} |\n", metric.name, metric.score, metric.label));
        }

        md.push_str(&format!("\n## Skills ({}% match)\n\n", report.skills.skill_match_score));
        if !report.skills.strong.is_empty() {
            md.push_str("### Strong\n\n");
            md.push_str(&Self::skill_table(&report.skills.strong));
            md.push('\n');
        }
        if !report.skills.weak.is_empty() {
            md.push_str("### Needs verification\n\n");
            md.push_str(&Self::skill_table(&report.skills.weak));
            md.push('\n');
        }
        md.push_str(&format!(
            "**Missing:** {}\n\n**Additional:** {}\n\n",
            join_or_none(&skill_names(&report.skills.missing)),
            join_or_none(&report.skills.extra)
        ));
        for hint in &report.skill_hints {
            md.push_str(&format!("> {}\n\n", hint_text(hint)));
        }
        md.push_str(&format!("**Experience:** {}\n\n", experience_text(&report.experience)));

        md.push_str("## Authenticity\n\n");
        md.push_str(&format!(
            "Score **{}**, consistency {}, {} red flags, **{}** risk.\n\n{}\n\n{}\n\n",
            session.overall_score,
            session.consistency_score,
            session.total_red_flags,
            session.risk_level,
            session.risk_description,
            report.authenticity.recommendation
        ));
        for answer in &report.authenticity.concerning_answers {
            md.push_str(&format!(
                "- `{}` (score {}): {}\n",
                answer.question_id, answer.score, answer.answer_preview
            ));
        }

        if let Some(narrative) = &report.narrative {
            md.push_str(&format!("\n## Narrative Summary\n\n{}\n", narrative));
        }

        if !report.suggested_questions.is_empty() {
            md.push_str("\n## Suggested Follow-up Questions\n\n");
            for question in &report.suggested_questions {
                md.push_str(&format!("- {}\n", question));
            }
        }

        if self.include_metadata {
            md.push_str(&format!(
                "\n---\n*Generated by Candidate Screener v{} on {}*\n",
                report.metadata.version,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }

        Ok(md)
    }

    fn format_feedback(&self, feedback: &CandidateFeedback) -> Result<String> {
        let mut md = String::from("# Your Screening Result\n\n");
        md.push_str(&format!("{}\n\n**Overall:** {}\n\n", feedback.message, feedback.overall_label));
        if !feedback.strengths.is_empty() {
            md.push_str("## What went well\n\n");
            for strength in &feedback.strengths {
                md.push_str(&format!("- {}\n", strength));
            }
            md.push('\n');
        }
        if !feedback.growth_areas.is_empty() {
            md.push_str("## Where to grow\n\n");
            for area in &feedback.growth_areas {
                md.push_str(&format!("- {}\n", area));
            }
        }
        Ok(md)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_report(&self, report: &RecruiterReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_feedback(&self, feedback: &CandidateFeedback, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_feedback(feedback)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_screening{}.{}", base_name, timestamp_suffix, extension)
}
