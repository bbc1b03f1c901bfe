//! Experience-level inference from explicit years and seniority keywords

use crate::library::language::{SENIORITY_JUNIOR, SENIORITY_MID, SENIORITY_SENIOR, YEARS_PATTERN};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(YEARS_PATTERN).expect("invalid years pattern"));

static SENIORITY_CLASSES: Lazy<Vec<(SeniorityLevel, Regex)>> = Lazy::new(|| {
    vec![
        (SeniorityLevel::Senior, Regex::new(SENIORITY_SENIOR).expect("invalid senior pattern")),
        (SeniorityLevel::Mid, Regex::new(SENIORITY_MID).expect("invalid mid pattern")),
        (SeniorityLevel::Junior, Regex::new(SENIORITY_JUNIOR).expect("invalid junior pattern")),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    Entry,
    Junior,
    Mid,
    Senior,
}

impl SeniorityLevel {
    /// Level implied by years of experience alone.
    pub fn from_years(years: u32) -> Self {
        match years {
            y if y >= 8 => SeniorityLevel::Senior,
            y if y >= 4 => SeniorityLevel::Mid,
            y if y >= 1 => SeniorityLevel::Junior,
            _ => SeniorityLevel::Entry,
        }
    }

    /// Parse a free-form level such as "Senior", "mid-level" or "entry".
    pub fn parse(level: &str) -> Option<Self> {
        let lowered = level.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if lowered.starts_with("entry") || lowered.contains("intern") || lowered.contains("graduate") {
            return Some(SeniorityLevel::Entry);
        }
        SENIORITY_CLASSES
            .iter()
            .find(|(_, re)| re.is_match(&lowered))
            .map(|(level, _)| *level)
            .or(match lowered.as_str() {
                "mid" | "middle" => Some(SeniorityLevel::Mid),
                _ => None,
            })
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeniorityLevel::Entry => "entry",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceProfile {
    /// Largest explicit "N years" mention, if any.
    pub years: Option<u32>,
    pub level: SeniorityLevel,
}

/// Largest explicit "N years" figure in the text.
pub fn max_years(text: &str) -> Option<u32> {
    YEARS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
        .max()
}

/// First seniority keyword class found, in senior, mid, junior order.
pub fn seniority_keyword(text: &str) -> Option<SeniorityLevel> {
    SENIORITY_CLASSES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(level, _)| *level)
}

/// Infer experience from text: keywords win; otherwise years decide the level.
pub fn infer_experience(text: &str) -> ExperienceProfile {
    let years = max_years(text);
    let level = seniority_keyword(text)
        .unwrap_or_else(|| SeniorityLevel::from_years(years.unwrap_or(0)));
    ExperienceProfile { years, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_years() {
        assert_eq!(max_years("3 years of Go and 7+ yrs of Python"), Some(7));
        assert_eq!(max_years("no numbers here"), None);
    }

    #[test]
    fn test_keyword_wins_over_years() {
        let profile = infer_experience("Junior developer with 9 years of hobby coding");
        assert_eq!(profile.level, SeniorityLevel::Junior);
        assert_eq!(profile.years, Some(9));
    }

    #[test]
    fn test_level_from_years() {
        assert_eq!(infer_experience("Engineer, 8 years").level, SeniorityLevel::Senior);
        assert_eq!(infer_experience("Engineer, 5 years").level, SeniorityLevel::Mid);
        assert_eq!(infer_experience("Engineer, 2 years").level, SeniorityLevel::Junior);
        assert_eq!(infer_experience("").level, SeniorityLevel::Entry);
    }

    #[test]
    fn test_senior_checked_before_junior() {
        let profile = infer_experience("Mentored junior engineers as a senior backend developer");
        assert_eq!(profile.level, SeniorityLevel::Senior);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(SeniorityLevel::parse("Senior"), Some(SeniorityLevel::Senior));
        assert_eq!(SeniorityLevel::parse("mid-level"), Some(SeniorityLevel::Mid));
        assert_eq!(SeniorityLevel::parse("mid"), Some(SeniorityLevel::Mid));
        assert_eq!(SeniorityLevel::parse("entry-level"), Some(SeniorityLevel::Entry));
        assert_eq!(SeniorityLevel::parse(""), None);
    }
}
