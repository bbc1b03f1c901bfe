//! Input loading
//! Handles file detection, text extraction, job requirements and transcripts

pub mod loader;
pub mod text_extractor;

pub use loader::{load_job_requirements, load_resume, load_transcript, FileType, TranscriptEntry};
