//! Scalar and boolean signals computed from a single answer.
//!
//! Every function here is pure: the same input always yields the same output,
//! and empty input yields zero/false signals instead of an error.

use crate::analysis::text::{char_len, matched_phrases};
use crate::library::language::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid pattern in language table"))
        .collect()
}

static FIRST_PERSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(FIRST_PERSON_PATTERN).expect("invalid first-person pattern"));

static STAR_GROUPS: Lazy<[Vec<Regex>; 4]> = Lazy::new(|| {
    [
        compile_all(STAR_SITUATION),
        compile_all(STAR_TASK),
        compile_all(STAR_ACTION),
        compile_all(STAR_RESULT),
    ]
});

static METRIC_PATTERNS: Lazy<Vec<(MetricKind, Regex)>> = Lazy::new(|| {
    [
        (MetricKind::Percentage, METRIC_PERCENTAGE),
        (MetricKind::TimeDuration, METRIC_TIME),
        (MetricKind::Count, METRIC_COUNT),
        (MetricKind::Money, METRIC_MONEY),
    ]
    .into_iter()
    .map(|(kind, p)| (kind, Regex::new(p).expect("invalid metric pattern")))
    .collect()
});

static TECHNICAL_TERMS: Lazy<Vec<Regex>> = Lazy::new(|| compile_all(TECHNICAL_TERM_PATTERNS));

const STAR_COMPONENT_POINTS: u32 = 25;
const METRIC_POINTS: u32 = 20;
const TECHNICAL_TERM_BONUS: f64 = 5.0;
const TOOL_BONUS: f64 = 4.0;
const GENERIC_POINTS: u32 = 15;
const IMPERFECTION_POINTS: u32 = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarComponents {
    pub situation: bool,
    pub task: bool,
    pub action: bool,
    pub result: bool,
}

impl StarComponents {
    pub fn count(&self) -> u32 {
        [self.situation, self.task, self.action, self.result]
            .iter()
            .filter(|c| **c)
            .count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarAnalysis {
    pub score: u32,
    pub components: StarComponents,
    pub component_count: u32,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Percentage,
    TimeDuration,
    Count,
    Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub kind: MetricKind,
    pub matched_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsAnalysis {
    pub metrics: Vec<Metric>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericAnalysis {
    pub is_generic: bool,
    pub matched_patterns: Vec<String>,
    pub match_count: usize,
    pub generic_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticityBreakdown {
    pub personal_context: u32,
    pub specific_details: u32,
    pub imperfect_narrative: u32,
    pub natural_language: u32,
    pub depth_consistency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticityFlags {
    pub is_generic: bool,
    pub generic_patterns: Vec<String>,
    pub first_person_count: usize,
    pub text_length: usize,
}

/// Single-answer authenticity signals, before any question-specific adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticitySignals {
    pub overall_score: u32,
    pub breakdown: AuthenticityBreakdown,
    pub flags: AuthenticityFlags,
}

/// Weights applied by [`calculate_authenticity`].
pub mod weights {
    pub const PERSONAL_CONTEXT: f64 = 0.25;
    pub const SPECIFIC_DETAILS: f64 = 0.25;
    pub const IMPERFECT_NARRATIVE: f64 = 0.20;
    pub const NATURAL_LANGUAGE: f64 = 0.20;
    pub const DEPTH_CONSISTENCY: f64 = 0.10;
    /// A single answer carries no cross-answer data.
    pub const NEUTRAL_DEPTH_CONSISTENCY: u32 = 50;
}

/// Whole-word, case-insensitive count of first-person pronouns.
pub fn count_first_person(text: &str) -> usize {
    FIRST_PERSON.find_iter(text).count()
}

/// Detect Situation/Task/Action/Result cues; each group found is worth 25 points.
pub fn detect_star(text: &str) -> StarAnalysis {
    let hit = |group: &[Regex]| group.iter().any(|re| re.is_match(text));
    let groups = &*STAR_GROUPS;

    let components = StarComponents {
        situation: hit(&groups[0]),
        task: hit(&groups[1]),
        action: hit(&groups[2]),
        result: hit(&groups[3]),
    };
    let component_count = components.count();

    StarAnalysis {
        score: component_count * STAR_COMPONENT_POINTS,
        components,
        component_count,
        is_complete: component_count >= 3,
    }
}

/// Scan for percentages, durations, entity counts and money amounts.
pub fn detect_metrics(text: &str) -> MetricsAnalysis {
    let metrics: Vec<Metric> = METRIC_PATTERNS
        .iter()
        .flat_map(|(kind, re)| {
            re.find_iter(text).map(move |m| Metric {
                kind: *kind,
                matched_text: m.as_str().trim().to_string(),
            })
        })
        .collect();

    let score = (metrics.len() as u32 * METRIC_POINTS).min(100);
    MetricsAnalysis { metrics, score }
}

/// STAR x 0.4 + metrics x 0.3 + per-hit technical and tool bonuses + length bonus, clamped to 0..=100.
pub fn calculate_specificity(text: &str) -> u32 {
    if text.trim().is_empty() {
        return 0;
    }

    let mut score = detect_star(text).score as f64 * 0.4 + detect_metrics(text).score as f64 * 0.3;

    let technical_hits: usize = TECHNICAL_TERMS.iter().map(|re| re.find_iter(text).count()).sum();
    score += technical_hits as f64 * TECHNICAL_TERM_BONUS;

    let lowered = text.to_lowercase();
    let tools = matched_phrases(&lowered, DEVELOPER_TOOLS);
    score += tools.len() as f64 * TOOL_BONUS;

    let length = char_len(text);
    if length > 200 {
        score += 5.0;
    }
    if length > 400 {
        score += 5.0;
    }

    score.round().clamp(0.0, 100.0) as u32
}

/// Match generic and overly polished phrasing; two or more hits make an answer generic.
pub fn detect_generic_patterns(text: &str) -> GenericAnalysis {
    let lowered = text.to_lowercase();
    let matched_patterns: Vec<String> = matched_phrases(&lowered, GENERIC_PHRASES)
        .into_iter()
        .chain(matched_phrases(&lowered, POLISHED_PHRASES))
        .map(str::to_string)
        .collect();
    let match_count = matched_patterns.len();

    GenericAnalysis {
        is_generic: match_count >= 2,
        generic_score: (match_count as u32 * GENERIC_POINTS).min(100),
        matched_patterns,
        match_count,
    }
}

/// +12 per listed admission-of-imperfection phrase present (once per phrase), capped at 100.
pub fn calculate_imperfection(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    let hits = matched_phrases(&lowered, IMPERFECTION_PHRASES).len() as u32;
    (hits * IMPERFECTION_POINTS).min(100)
}

/// Combine the single-answer signals into a 0..=100 authenticity estimate.
pub fn calculate_authenticity(text: &str) -> AuthenticitySignals {
    let text_length = char_len(text);
    if text.trim().is_empty() {
        return AuthenticitySignals {
            overall_score: 0,
            breakdown: AuthenticityBreakdown {
                personal_context: 0,
                specific_details: 0,
                imperfect_narrative: 0,
                natural_language: 0,
                depth_consistency: 0,
            },
            flags: AuthenticityFlags {
                is_generic: false,
                generic_patterns: Vec::new(),
                first_person_count: 0,
                text_length,
            },
        };
    }

    let first_person_count = count_first_person(text);
    let personal_context = (first_person_count as u32 * 10).min(100);
    let specific_details = calculate_specificity(text);
    let generic = detect_generic_patterns(text);
    let natural_language = 100 - generic.generic_score;
    let imperfect_narrative = calculate_imperfection(text);
    let depth_consistency = weights::NEUTRAL_DEPTH_CONSISTENCY;

    let overall = personal_context as f64 * weights::PERSONAL_CONTEXT
        + specific_details as f64 * weights::SPECIFIC_DETAILS
        + imperfect_narrative as f64 * weights::IMPERFECT_NARRATIVE
        + natural_language as f64 * weights::NATURAL_LANGUAGE
        + depth_consistency as f64 * weights::DEPTH_CONSISTENCY;

    AuthenticitySignals {
        overall_score: overall.round().clamp(0.0, 100.0) as u32,
        breakdown: AuthenticityBreakdown {
            personal_context,
            specific_details,
            imperfect_narrative,
            natural_language,
            depth_consistency,
        },
        flags: AuthenticityFlags {
            is_generic: generic.is_generic,
            generic_patterns: generic.matched_patterns,
            first_person_count,
            text_length,
        },
    }
}

/// Consistency of specificity across answers: 100 - min(stddev x 2, 50). Fewer than two answers is neutral (50).
pub fn analyze_consistency<S: AsRef<str>>(answers: &[S]) -> u32 {
    if answers.len() < 2 {
        return 50;
    }

    let scores: Vec<f64> = answers
        .iter()
        .map(|a| calculate_specificity(a.as_ref()) as f64)
        .collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;

    (100.0 - (variance.sqrt() * 2.0).min(50.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const RICH_ANSWER: &str = "At my previous job our checkout service was timing out under load. \
        I was responsible for the fix, so I profiled the Postgres queries with Datadog and found a \
        missing index on orders.sql. I decided to add it and batch the writes. As a result p95 \
        latency dropped from 900 ms to 120 ms and we handled 10,000 users during the sale. \
        In hindsight I should have load tested earlier.";

    #[test]
    fn test_count_first_person() {
        assert_eq!(count_first_person("I think my team and I did it ourselves"), 4);
        assert_eq!(count_first_person("Improve image imports"), 0);
        assert_eq!(count_first_person(""), 0);
    }

    #[test]
    fn test_detect_star_empty() {
        let star = detect_star("");
        assert_eq!(star.score, 0);
        assert_eq!(star.component_count, 0);
        assert!(!star.is_complete);
    }

    #[test]
    fn test_detect_star_full_story() {
        let star = detect_star(RICH_ANSWER);
        assert!(star.components.situation);
        assert!(star.components.task);
        assert!(star.components.action);
        assert!(star.components.result);
        assert_eq!(star.score, 100);
        assert!(star.is_complete);
    }

    #[test]
    fn test_detect_metrics() {
        let metrics = detect_metrics("Cut costs by $4,000 and reduced load time by 40% for 10,000 users in 3 weeks");
        let kinds: Vec<MetricKind> = metrics.metrics.iter().map(|m| m.kind).collect();
        assert!(kinds.contains(&MetricKind::Percentage));
        assert!(kinds.contains(&MetricKind::Money));
        assert!(kinds.contains(&MetricKind::Count));
        assert!(kinds.contains(&MetricKind::TimeDuration));
        assert_eq!(metrics.score, (metrics.metrics.len() as u32 * 20).min(100));
        assert_eq!(detect_metrics("").score, 0);
    }

    #[test]
    fn test_specificity_bounds() {
        assert_eq!(calculate_specificity(""), 0);
        let dense = RICH_ANSWER.repeat(5);
        let score = calculate_specificity(&dense);
        assert!(score <= 100);
        assert!(calculate_specificity(RICH_ANSWER) > calculate_specificity("I did some work on it."));
    }

    const SHORT_ANSWER: &str = "I built it and got 40% faster with docker.";

    #[test]
    fn test_specificity_exact_arithmetic() {
        assert_eq!(detect_star(SHORT_ANSWER).score, 50);
        assert_eq!(detect_metrics(SHORT_ANSWER).score, 20);
        // 50 * 0.4 + 20 * 0.3 + one technical term (5) + one tool (4)
        assert_eq!(calculate_specificity(SHORT_ANSWER), 35);
    }

    #[test]
    fn test_specificity_length_bonuses() {
        let base = "word ".repeat(40);
        let over_200 = format!("{} x", base);
        let over_400 = format!("{}{} x", base, base);
        assert_eq!(calculate_specificity(&base), 0);
        assert_eq!(calculate_specificity(&over_200), 5);
        assert_eq!(calculate_specificity(&over_400), 10);
    }

    #[test]
    fn test_authenticity_exact_weighted_sum() {
        let result = calculate_authenticity(SHORT_ANSWER);
        assert_eq!(
            result.breakdown,
            AuthenticityBreakdown {
                personal_context: 10,
                specific_details: 35,
                imperfect_narrative: 0,
                natural_language: 100,
                depth_consistency: 50,
            }
        );
        // 2.5 + 8.75 + 0 + 20 + 5 = 36.25
        assert_eq!(result.overall_score, 36);
    }

    #[test]
    fn test_consistency_exact_spread() {
        // specificities [0, 35]: stddev 17.5, penalty 35
        assert_eq!(analyze_consistency(&["", SHORT_ANSWER]), 65);
    }

    #[test]
    fn test_generic_scenario() {
        let analysis = detect_generic_patterns(
            "It depends on the situation, and typically the standard approach is best practice",
        );
        assert!(analysis.match_count >= 3);
        assert!(analysis.is_generic);
        assert_eq!(analysis.generic_score, 45);
    }

    #[test]
    fn test_imperfection_counts_each_phrase_once() {
        let text = "I learned a lot. I learned even more later. Looking back, I should have asked.";
        assert_eq!(calculate_imperfection(text), 36);
        assert_eq!(calculate_imperfection(""), 0);
    }

    #[test]
    fn test_authenticity_bounds_and_breakdown() {
        let result = calculate_authenticity(RICH_ANSWER);
        assert!(result.overall_score <= 100);
        assert_eq!(result.breakdown.depth_consistency, 50);
        assert!(result.flags.first_person_count >= 5);

        let empty = calculate_authenticity("");
        assert_eq!(empty.overall_score, 0);
        assert!(!empty.flags.is_generic);
    }

    #[test]
    fn test_signals_are_idempotent() {
        assert_eq!(calculate_authenticity(RICH_ANSWER), calculate_authenticity(RICH_ANSWER));
        assert_eq!(detect_metrics(RICH_ANSWER), detect_metrics(RICH_ANSWER));
        assert_eq!(calculate_specificity(RICH_ANSWER), calculate_specificity(RICH_ANSWER));
    }

    #[test]
    fn test_consistency_neutral_for_short_lists() {
        let none: [&str; 0] = [];
        assert_eq!(analyze_consistency(&none), 50);
        assert_eq!(analyze_consistency(&[RICH_ANSWER]), 50);
    }

    #[test]
    fn test_consistency_identical_answers() {
        assert_eq!(analyze_consistency(&[RICH_ANSWER, RICH_ANSWER, RICH_ANSWER]), 100);
        let mixed = analyze_consistency(&[RICH_ANSWER, "ok"]);
        assert!(mixed < 100);
        assert!(mixed >= 50);
    }
}
