//! Report views and their output formats

pub mod formatter;
pub mod report;

pub use formatter::{
    save_report_to_file, suggest_filename, ConsoleFormatter, HtmlFormatter, JsonFormatter,
    MarkdownFormatter, OutputFormatter, ReportGenerator,
};
pub use report::{
    closest_skill_hints, generate_candidate_feedback, generate_recruiter_report, CandidateFeedback,
    ExperienceAlignment, ExperienceCheck, RecruiterReport, ReportContext, ReportMetadata, SkillHint,
};
