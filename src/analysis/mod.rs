//! Text signal extraction over single answers and resume text

pub mod signals;
pub mod text;

pub use signals::{
    analyze_consistency, calculate_authenticity, calculate_imperfection, calculate_specificity,
    count_first_person, detect_generic_patterns, detect_metrics, detect_star, AuthenticityBreakdown,
    AuthenticityFlags, AuthenticitySignals, GenericAnalysis, Metric, MetricKind, MetricsAnalysis,
    StarAnalysis, StarComponents,
};
