//! Screening orchestration
//! Plans the interview, drives one candidate session and assembles the outcome

pub mod engine;
pub mod session;

pub use engine::{InterviewPlan, ScreeningEngine};
pub use session::{ScreeningOutcome, ScreeningSession, SubmittedAnswer};
