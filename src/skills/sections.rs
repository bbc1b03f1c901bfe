//! Resume sectioning by header-line detection

use crate::library::language::SECTION_HEADERS;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Experience,
    Projects,
    Skills,
    Summary,
    Education,
    Certifications,
    Other,
}

impl SectionType {
    /// Search order used when a skill appears in several sections.
    pub const PRIORITY: [SectionType; 7] = [
        SectionType::Experience,
        SectionType::Projects,
        SectionType::Skills,
        SectionType::Summary,
        SectionType::Certifications,
        SectionType::Education,
        SectionType::Other,
    ];

    /// How much evidence from this section is worth.
    pub fn weight(&self) -> f64 {
        match self {
            SectionType::Experience => 1.5,
            SectionType::Projects => 1.3,
            SectionType::Skills => 1.0,
            SectionType::Summary => 0.9,
            SectionType::Certifications => 0.8,
            SectionType::Education => 0.7,
            SectionType::Other => 0.5,
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "experience" => SectionType::Experience,
            "projects" => SectionType::Projects,
            "skills" => SectionType::Skills,
            "summary" => SectionType::Summary,
            "education" => SectionType::Education,
            "certifications" => SectionType::Certifications,
            _ => SectionType::Other,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Experience => "Experience",
            SectionType::Projects => "Projects",
            SectionType::Skills => "Skills",
            SectionType::Summary => "Summary",
            SectionType::Education => "Education",
            SectionType::Certifications => "Certifications",
            SectionType::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// A header line may stand alone ("Experience", "## Skills:") or carry inline
/// content after a colon ("Skills: Rust, Go").
static HEADER_PATTERNS: Lazy<Vec<(SectionType, Regex)>> = Lazy::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|(name, alternatives)| {
            let pattern = format!(
                r"(?i)^\s*[#*\s]*(?:{})[*\s]*(?::\s*(?P<rest>.*))?$",
                alternatives
            );
            (
                SectionType::from_name(name),
                Regex::new(&pattern).expect("invalid section header pattern"),
            )
        })
        .collect()
});

/// One section's concatenated text. Repeated headers append to the same section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub section_type: SectionType,
    pub content: String,
}

/// Resume text split into labelled sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionedResume {
    pub sections: Vec<ResumeSection>,
}

impl SectionedResume {
    /// Split resume text into sections. Text before the first header goes to `Other`.
    pub fn parse(text: &str) -> Self {
        let mut resume = SectionedResume::default();
        let mut current = SectionType::Other;

        for line in text.lines() {
            match detect_header(line) {
                Some((section_type, rest)) => {
                    debug!("Detected resume section header: {}", section_type);
                    current = section_type;
                    if let Some(rest) = rest.filter(|r| !r.trim().is_empty()) {
                        resume.push_line(current, rest.trim());
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        resume.push_line(current, line.trim());
                    }
                }
            }
        }

        resume
    }

    fn push_line(&mut self, section_type: SectionType, line: &str) {
        match self.sections.iter_mut().find(|s| s.section_type == section_type) {
            Some(section) => {
                section.content.push('\n');
                section.content.push_str(line);
            }
            None => self.sections.push(ResumeSection {
                section_type,
                content: line.to_string(),
            }),
        }
    }

    pub fn get(&self, section_type: SectionType) -> Option<&ResumeSection> {
        self.sections.iter().find(|s| s.section_type == section_type)
    }

    /// Sections in evidence-priority order.
    pub fn by_priority(&self) -> impl Iterator<Item = &ResumeSection> {
        SectionType::PRIORITY
            .into_iter()
            .filter_map(move |t| self.get(t))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn detect_header(line: &str) -> Option<(SectionType, Option<&str>)> {
    let trimmed = line.trim();
    // Long lines are prose, not headers.
    if trimmed.is_empty() || trimmed.chars().count() > 60 && !trimmed.contains(':') {
        return None;
    }

    HEADER_PATTERNS.iter().find_map(|(section_type, re)| {
        re.captures(line)
            .map(|caps| (*section_type, caps.name("rest").map(|m| m.as_str())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\njane@example.com\n\nSummary:\nBackend engineer.\n\n\
        Work Experience\nSenior Engineer at Acme, built Go services.\n\n\
        Skills: Go, Rust, PostgreSQL\n\n## Projects\nOpen-source CLI in Rust.\n\n\
        Education\nBSc Computer Science";

    #[test]
    fn test_section_detection() {
        let resume = SectionedResume::parse(RESUME);
        assert!(resume.get(SectionType::Summary).is_some());
        assert!(resume.get(SectionType::Experience).is_some());
        assert!(resume.get(SectionType::Projects).is_some());
        assert!(resume.get(SectionType::Education).is_some());
        assert_eq!(
            resume.get(SectionType::Skills).unwrap().content,
            "Go, Rust, PostgreSQL"
        );
        assert!(resume.get(SectionType::Other).unwrap().content.contains("Jane Doe"));
    }

    #[test]
    fn test_prose_mentioning_experience_is_not_a_header() {
        let resume = SectionedResume::parse("I have experience with Kafka and Spark.");
        assert_eq!(resume.sections.len(), 1);
        assert_eq!(resume.sections[0].section_type, SectionType::Other);
    }

    #[test]
    fn test_priority_order() {
        let resume = SectionedResume::parse(RESUME);
        let order: Vec<SectionType> = resume.by_priority().map(|s| s.section_type).collect();
        assert_eq!(order[0], SectionType::Experience);
        assert_eq!(*order.last().unwrap(), SectionType::Other);
    }

    #[test]
    fn test_empty_resume() {
        assert!(SectionedResume::parse("").is_empty());
    }
}
