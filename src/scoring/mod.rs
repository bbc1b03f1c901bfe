//! Authenticity scoring and the hiring decision

pub mod authenticity;
pub mod decision;

pub use authenticity::{
    calculate_overall_authenticity, generate_authenticity_report, identify_red_flags,
    score_answer_authenticity, weighted_mean_score, AnswerRecord, AnswerSummary,
    AuthenticityReport, AuthenticityResult, RedFlag, RedFlagKind, RiskLevel,
    SessionAuthenticityReport, Severity,
};
pub use decision::{
    answer_communication, answer_depth, calculate_communication_score, calculate_depth_score,
    make_decision, overall_score, score_label, DecisionInputs, DecisionResult, DecisionWeights,
    Verdict,
};
