//! Interview question planning and adaptive follow-ups

pub mod followup;
pub mod questions;

pub use followup::{
    analyze_need_for_follow_up, extract_topics, max_follow_ups, FollowUpSession, FollowUpTrigger,
    FollowUpType,
};
pub use questions::{
    classify_question, closing_question, generate_questions, is_anti_cheat_question,
    opening_question, Question, QuestionDistribution, QuestionStyle, QuestionType,
};
