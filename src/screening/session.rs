//! One candidate conversation: answers in, follow-ups and the final outcome out

use crate::enhancement::{Enhancer, ResumeEnrichment, TextGenerator};
use crate::error::{Result, ScreenerError};
use crate::input::loader::TranscriptEntry;
use crate::interview::followup::{analyze_need_for_follow_up, FollowUpSession, FollowUpTrigger};
use crate::interview::questions::Question;
use crate::output::report::{
    generate_candidate_feedback, generate_recruiter_report, CandidateFeedback, ExperienceCheck,
    RecruiterReport, ReportContext, ReportMetadata,
};
use crate::scoring::authenticity::{generate_authenticity_report, AnswerRecord, AuthenticityReport};
use crate::scoring::decision::{
    calculate_communication_score, calculate_depth_score, make_decision, DecisionInputs,
    DecisionResult, DecisionWeights,
};
use crate::screening::engine::InterviewPlan;
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedAnswer {
    pub record: AnswerRecord,
    pub trigger: Option<FollowUpTrigger>,
    /// Present only when the trigger fired and the root question still has budget.
    pub follow_up: Option<Question>,
}

/// Session state for a single candidate. Answers must be submitted one at a time.
pub struct ScreeningSession {
    plan: InterviewPlan,
    weights: DecisionWeights,
    records: Vec<AnswerRecord>,
    follow_ups: FollowUpSession,
    issued_follow_ups: Vec<Question>,
    rng: StdRng,
    metadata: ReportMetadata,
}

impl ScreeningSession {
    pub fn new(plan: InterviewPlan, weights: DecisionWeights, rng: StdRng) -> Self {
        Self {
            plan,
            weights,
            records: Vec::new(),
            follow_ups: FollowUpSession::new(),
            issued_follow_ups: Vec::new(),
            rng,
            metadata: ReportMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn plan(&self) -> &InterviewPlan {
        &self.plan
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// A planned question, a follow-up issued in this session, or any question already answered.
    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.plan
            .find_question(id)
            .or_else(|| self.issued_follow_ups.iter().find(|q| q.id == id))
            .or_else(|| self.records.iter().map(|r| &r.question).find(|q| q.id == id))
    }

    /// Follow-ups count against the question they descend from.
    fn root_of(&self, question: &Question) -> Question {
        question
            .parent_question_id
            .as_deref()
            .and_then(|id| self.find_question(id))
            .unwrap_or(question)
            .clone()
    }

    /// Score the answer, record it, then decide on a follow-up.
    pub fn submit_answer(
        &mut self,
        question: &Question,
        answer: &str,
        time_spent_seconds: Option<u32>,
    ) -> SubmittedAnswer {
        let record = AnswerRecord::new(question.clone(), answer, time_spent_seconds);
        self.records.push(record.clone());

        if question.is_bookend() {
            return SubmittedAnswer {
                record,
                trigger: None,
                follow_up: None,
            };
        }

        let trigger = analyze_need_for_follow_up(answer);
        let root = self.root_of(question);
        let follow_up = match &trigger {
            Some(trigger) if self.follow_ups.can_follow_up(&root) => {
                let follow_up = self
                    .follow_ups
                    .generate_follow_up(&root, answer, trigger, &mut self.rng);
                self.issued_follow_ups.push(follow_up.clone());
                Some(follow_up)
            }
            Some(trigger) => {
                debug!(
                    "Follow-up budget for {} exhausted ({})",
                    root.id, trigger.follow_up_type
                );
                None
            }
            None => None,
        };

        SubmittedAnswer {
            record,
            trigger,
            follow_up,
        }
    }

    /// Feed a recorded transcript through the session.
    ///
    /// Entries with an id answer that question (follow-up ids are only known
    /// once the session has issued them). Entries without an id answer the
    /// next unanswered planned question.
    pub fn replay_transcript(&mut self, entries: &[TranscriptEntry]) -> Result<()> {
        for entry in entries {
            let question = match &entry.question_id {
                Some(id) => self.find_question(id).cloned().ok_or_else(|| {
                    ScreenerError::InvalidInput(format!("Transcript answers unknown question '{}'", id))
                })?,
                None => self.next_unanswered().cloned().ok_or_else(|| {
                    ScreenerError::InvalidInput("Transcript has more answers than planned questions".to_string())
                })?,
            };
            self.submit_answer(&question, &entry.answer, entry.time_spent_seconds);
        }
        Ok(())
    }

    /// First planned question without an answer, in asking order.
    pub fn next_unanswered(&self) -> Option<&Question> {
        let answered: HashSet<&str> = self.records.iter().map(|r| r.question.id.as_str()).collect();
        self.plan.all_questions().find(|q| !answered.contains(q.id.as_str()))
    }

    /// Aggregate every answer into the decision and both report views.
    pub fn finish(self) -> ScreeningOutcome {
        let authenticity = generate_authenticity_report(&self.records);
        let inputs = DecisionInputs {
            skill_match: self.plan.mapping.skill_match_score,
            depth: calculate_depth_score(&self.records),
            authenticity: authenticity.session.overall_score,
            communication: calculate_communication_score(&self.records),
            consistency: authenticity.session.consistency_score,
        };
        let decision = make_decision(inputs, &self.weights);
        info!(
            "Screening finished: {} ({}/100) from {} answers",
            decision.decision,
            decision.overall_score,
            self.records.len()
        );

        let experience = ExperienceCheck::evaluate(
            &self.plan.experience,
            self.plan.job.experience_level.as_deref(),
        );
        let report = generate_recruiter_report(ReportContext {
            decision: &decision,
            mapping: &self.plan.mapping,
            authenticity: &authenticity,
            records: &self.records,
            experience,
            metadata: self.metadata,
        });
        let feedback = generate_candidate_feedback(&decision, &self.plan.mapping);

        ScreeningOutcome {
            plan: self.plan,
            records: self.records,
            authenticity,
            decision,
            report,
            feedback,
            enrichment: None,
            extra_questions: Vec::new(),
        }
    }
}

/// Terminal artifacts of a screening, serialisable for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub plan: InterviewPlan,
    pub records: Vec<AnswerRecord>,
    pub authenticity: AuthenticityReport,
    pub decision: DecisionResult,
    pub report: RecruiterReport,
    pub feedback: CandidateFeedback,
    pub enrichment: Option<ResumeEnrichment>,
    pub extra_questions: Vec<Question>,
}

impl ScreeningOutcome {
    /// Attach generator output beside the computed results. Scores, mapping
    /// and verdict are left as they are.
    pub async fn apply_enhancement<G: TextGenerator>(
        &mut self,
        enhancer: &Enhancer<G>,
        resume_text: &str,
        extra_question_count: usize,
    ) {
        self.enrichment = enhancer.enrich_resume(resume_text).await;
        self.report.narrative = enhancer.narrative(&self.report).await;

        let planned: Vec<Question> = self.plan.all_questions().cloned().collect();
        self.extra_questions = enhancer
            .extra_questions(&self.plan.mapping, &planned, extra_question_count)
            .await;
        self.report.suggested_questions = self.extra_questions.iter().map(|q| q.text.clone()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::interview::questions::QuestionType;
    use crate::screening::engine::ScreeningEngine;
    use crate::skills::mapper::{JobRequirements, Priority};
    use pretty_assertions::assert_eq;

    const RESUME: &str = "Experience\nI built Python services on PostgreSQL for 5 years.\nSkills\nPython, PostgreSQL";

    const DETAILED: &str = "At my last company I was responsible for our payments API. The problem was \
        that checkout latency had reached 900 ms. I profiled the service, found an N+1 query in our \
        PostgreSQL layer, and rewrote it with a single join. As a result latency dropped by 60% for \
        about 20,000 users. Honestly I first blamed the cache, which was wrong.";

    fn session() -> ScreeningSession {
        let mut config = Config::default();
        config.interview.seed = Some(3);
        config.interview.question_count = 4;
        let job = JobRequirements {
            required_skills: vec!["python".to_string(), "postgresql".to_string()],
            ..Default::default()
        };
        ScreeningEngine::new(config).start(RESUME, &job)
    }

    fn question(id: &str, priority: Priority) -> Question {
        Question {
            id: id.to_string(),
            skill_name: "python".to_string(),
            question_type: QuestionType::Experience,
            priority,
            text: format!("Tell me about your Python work ({})", id),
            reason: "test".to_string(),
            parent_question_id: None,
        }
    }

    #[test]
    fn test_brief_answer_gets_one_follow_up_at_medium_priority() {
        let mut session = session();
        let root = question("x1", Priority::Medium);

        let first = session.submit_answer(&root, "I did it.", Some(10));
        let follow_up = first.follow_up.expect("brief answer should be probed");
        assert_eq!(follow_up.id, "x1-followup-1");
        assert_eq!(follow_up.parent_question_id.as_deref(), Some("x1"));

        let second = session.submit_answer(&follow_up, "Still short.", None);
        assert!(second.trigger.is_some());
        assert!(second.follow_up.is_none());
        assert_eq!(session.records().len(), 2);
    }

    #[test]
    fn test_high_priority_allows_two_follow_ups() {
        let mut session = session();
        let root = question("x2", Priority::High);

        let first = session.submit_answer(&root, "Yes.", None).follow_up.unwrap();
        let second = session.submit_answer(&first, "Yes again.", None).follow_up.unwrap();
        assert_eq!(second.id, "x2-followup-2");
        assert!(session.submit_answer(&second, "No.", None).follow_up.is_none());
    }

    #[test]
    fn test_no_follow_up_for_bookends() {
        let mut session = session();
        let opening = session.plan().opening.clone().unwrap();
        let submitted = session.submit_answer(&opening, "Hi.", None);
        assert!(submitted.trigger.is_none());
        assert!(submitted.follow_up.is_none());
    }

    #[test]
    fn test_replay_in_plan_order() {
        let mut session = session();
        let entries = vec![
            TranscriptEntry {
                question_id: None,
                answer: "Hello, I am a backend engineer.".to_string(),
                time_spent_seconds: None,
            },
            TranscriptEntry {
                question_id: Some("q2".to_string()),
                answer: DETAILED.to_string(),
                time_spent_seconds: Some(120),
            },
            TranscriptEntry {
                question_id: None,
                answer: DETAILED.to_string(),
                time_spent_seconds: None,
            },
        ];
        session.replay_transcript(&entries).unwrap();

        let ids: Vec<&str> = session.records().iter().map(|r| r.question.id.as_str()).collect();
        assert_eq!(ids, vec!["opening", "q2", "q1"]);
    }

    #[test]
    fn test_replay_unknown_question() {
        let mut session = session();
        let entries = vec![TranscriptEntry {
            question_id: Some("q99".to_string()),
            answer: "text".to_string(),
            time_spent_seconds: None,
        }];
        assert!(matches!(
            session.replay_transcript(&entries),
            Err(ScreenerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_finish_uses_mapping_and_answers() {
        let mut session = session();
        let planned: Vec<Question> = session.plan().questions.clone();
        for question in &planned {
            session.submit_answer(question, DETAILED, Some(90));
        }
        let skill_match = session.plan().mapping.skill_match_score;
        let outcome = session.finish();

        assert_eq!(outcome.decision.inputs.skill_match, skill_match);
        assert_eq!(outcome.records.len(), planned.len());
        assert_eq!(outcome.report.answers.len(), planned.len());
        assert_eq!(outcome.authenticity.session.answer_count, planned.len());
        assert_eq!(outcome.feedback.verdict, outcome.decision.decision);
        assert!(outcome.enrichment.is_none());
    }

    #[test]
    fn test_finish_without_answers_is_neutral() {
        let outcome = session().finish();
        assert_eq!(outcome.decision.inputs.depth, 0);
        assert_eq!(outcome.decision.inputs.communication, 50);
        assert_eq!(outcome.authenticity.session.overall_score, 50);
    }
}
