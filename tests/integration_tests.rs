//! Integration tests for the candidate screener

use candidate_screener::config::{Config, OutputFormat};
use candidate_screener::enhancement::{Enhancer, TextGenerator};
use candidate_screener::input::loader::{load_job_requirements, load_resume, load_transcript};
use candidate_screener::output::{ExperienceAlignment, ReportGenerator};
use candidate_screener::scoring::decision::Verdict;
use candidate_screener::{ScreenerError, ScreeningEngine};
use pretty_assertions::assert_eq;
use std::path::Path;

fn seeded_config(seed: u64, question_count: usize) -> Config {
    let mut config = Config::default();
    config.interview.seed = Some(seed);
    config.interview.question_count = question_count;
    config
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = load_resume(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = load_resume(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(text.lines().any(|line| line == "Skills"));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let err = load_resume(Path::new("tests/fixtures/unsupported.xyz")).await.unwrap_err();
    assert!(matches!(err, ScreenerError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let err = load_resume(Path::new("tests/fixtures/nonexistent.txt")).await.unwrap_err();
    assert!(matches!(err, ScreenerError::InvalidInput(_)));
}

#[tokio::test]
async fn test_job_aliases_match_resume() {
    let resume = load_resume(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let job = load_job_requirements(Path::new("tests/fixtures/job.json")).await.unwrap();

    let session = ScreeningEngine::new(seeded_config(1, 4)).start(&resume, &job);
    let mapping = &session.plan().mapping;

    assert!(mapping.missing.is_empty());
    assert_eq!(mapping.total_required, 2);
    assert_eq!(mapping.total_preferred, 1);
}

#[tokio::test]
async fn test_requirements_derived_from_description() {
    let job = load_job_requirements(Path::new("tests/fixtures/job_description.txt")).await.unwrap();
    let names: Vec<String> = job.requirement_entries().into_iter().map(|r| r.skill_name).collect();

    for skill in ["go", "kafka", "postgresql", "kubernetes"] {
        assert!(names.iter().any(|n| n == skill), "missing {}", skill);
    }
}

#[tokio::test]
async fn test_full_screening_from_transcript() {
    let resume = load_resume(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let job = load_job_requirements(Path::new("tests/fixtures/job.toml")).await.unwrap();
    let transcript = load_transcript(Path::new("tests/fixtures/transcript.json")).await.unwrap();

    let mut session = ScreeningEngine::new(seeded_config(5, 5)).start(&resume, &job);
    assert!(session.plan().mapping.missing.iter().any(|r| r.skill_name == "kafka"));
    assert!(session.plan().mapping.strong.iter().any(|m| m.requirement.skill_name == "react"));

    session.replay_transcript(&transcript).unwrap();
    let outcome = session.finish();

    let ids: Vec<&str> = outcome.records.iter().map(|r| r.question.id.as_str()).collect();
    assert_eq!(ids, vec!["opening", "q1", "q2"]);

    let detailed = &outcome.records[1].authenticity;
    let rehearsed = &outcome.records[2].authenticity;
    assert!(detailed.overall_score > rehearsed.overall_score);
    assert!(!rehearsed.red_flags.is_empty());

    assert!(outcome.decision.confidence >= 60 && outcome.decision.confidence <= 98);
    assert_eq!(outcome.report.experience.alignment, ExperienceAlignment::Meets);

    let json = ReportGenerator::new()
        .generate_report(&outcome.report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let verdict = value["decision"]["decision"].as_str().unwrap();
    assert!(["PASS", "HOLD", "REJECT"].contains(&verdict));

    let feedback = ReportGenerator::new()
        .generate_feedback(&outcome.feedback, OutputFormat::Json)
        .unwrap();
    assert!(!feedback.contains("red_flags"));
    assert!(!feedback.contains("authenticity"));
}

#[tokio::test]
async fn test_same_seed_same_plan() {
    let resume = load_resume(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();
    let job = load_job_requirements(Path::new("tests/fixtures/job.toml")).await.unwrap();

    let first = ScreeningEngine::new(seeded_config(99, 6)).start(&resume, &job);
    let second = ScreeningEngine::new(seeded_config(99, 6)).start(&resume, &job);
    assert_eq!(first.plan(), second.plan());

    let texts: std::collections::HashSet<&str> =
        first.plan().all_questions().map(|q| q.text.as_str()).collect();
    assert_eq!(texts.len(), first.plan().question_count());
}

/// Answers by prompt kind, like a well-behaved external generator.
struct ScriptedGenerator;

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> candidate_screener::Result<String> {
        let reply = if prompt.contains("describe the candidate as JSON") {
            r#"{"summary": "Front-end leaning full-stack engineer", "skills": ["React", "Node.js"], "years_of_experience": 7}"#
        } else if prompt.contains("Write a short paragraph") {
            "John is a capable React engineer with no Kafka exposure."
        } else {
            r#"[{"skill": "kafka", "question": "Tell me about a time you worked with an event stream or message queue."}]"#
        };
        Ok(reply.to_string())
    }
}

#[tokio::test]
async fn test_enhancement_never_changes_the_verdict() {
    let resume = load_resume(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let job = load_job_requirements(Path::new("tests/fixtures/job.toml")).await.unwrap();
    let transcript = load_transcript(Path::new("tests/fixtures/transcript.json")).await.unwrap();

    let mut session = ScreeningEngine::new(seeded_config(5, 5)).start(&resume, &job);
    session.replay_transcript(&transcript).unwrap();
    let mut outcome = session.finish();

    let decision_before = outcome.decision.clone();
    let mapping_before = outcome.plan.mapping.clone();

    outcome
        .apply_enhancement(&Enhancer::new(ScriptedGenerator), &resume, 3)
        .await;

    assert_eq!(outcome.decision, decision_before);
    assert_eq!(outcome.report.decision, decision_before);
    assert_eq!(outcome.plan.mapping, mapping_before);
    assert_eq!(outcome.enrichment.as_ref().and_then(|e| e.years_of_experience), Some(7));
    assert_eq!(
        outcome.report.narrative.as_deref(),
        Some("John is a capable React engineer with no Kafka exposure.")
    );
    assert_eq!(outcome.extra_questions.len(), 1);
    assert_eq!(outcome.report.suggested_questions.len(), 1);
    assert!(matches!(
        outcome.decision.decision,
        Verdict::Pass | Verdict::Hold | Verdict::Reject
    ));
}
