//! Candidate screener library
//!
//! Resume skill mapping, adaptive interview questions, answer authenticity
//! scoring and the final hiring recommendation.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod enhancement;
pub mod error;
pub mod input;
pub mod interview;
pub mod library;
pub mod output;
pub mod scoring;
pub mod screening;
pub mod skills;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use screening::{InterviewPlan, ScreeningEngine, ScreeningOutcome, ScreeningSession};
