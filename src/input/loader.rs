//! Loading resumes, job requirements and recorded transcripts from disk

use crate::error::{Result, ScreenerError};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::skills::mapper::JobRequirements;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Toml,
    Json,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "toml" => FileType::Toml,
            "json" => FileType::Json,
            _ => FileType::Unknown,
        }
    }

    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ScreenerError::InvalidInput(format!("File has no extension: {}", path.display())))?;
        Ok(Self::from_extension(extension))
    }
}

/// One recorded answer. Without a question id, answers are matched to the plan in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    #[serde(default)]
    pub question_id: Option<String>,
    pub answer: String,
    #[serde(default)]
    pub time_spent_seconds: Option<u32>,
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ScreenerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Resume text from a `.txt`, `.md` or `.pdf` file.
pub async fn load_resume(path: &Path) -> Result<String> {
    ensure_exists(path)?;

    let text = match FileType::detect(path)? {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path).await?
        }
        FileType::Text => {
            info!("Reading plain text resume: {}", path.display());
            PlainTextExtractor.extract(path).await?
        }
        FileType::Markdown => {
            info!("Processing markdown resume: {}", path.display());
            MarkdownExtractor.extract(path).await?
        }
        _ => {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported resume format: {}",
                path.display()
            )))
        }
    };

    if text.trim().is_empty() {
        warn!("Resume {} contains no text", path.display());
    }
    Ok(text)
}

/// Job requirements from `.toml`/`.json`, or a plain job description from `.txt`/`.md`.
pub async fn load_job_requirements(path: &Path) -> Result<JobRequirements> {
    ensure_exists(path)?;

    let job = match FileType::detect(path)? {
        FileType::Toml => {
            let content = tokio::fs::read_to_string(path).await?;
            toml::from_str(&content).map_err(|e| {
                ScreenerError::InvalidInput(format!("Invalid job requirements in {}: {}", path.display(), e))
            })?
        }
        FileType::Json => {
            let content = tokio::fs::read_to_string(path).await?;
            serde_json::from_str(&content)?
        }
        FileType::Text => JobRequirements {
            job_description: PlainTextExtractor.extract(path).await?,
            ..Default::default()
        },
        FileType::Markdown => JobRequirements {
            job_description: MarkdownExtractor.extract(path).await?,
            ..Default::default()
        },
        _ => {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported job requirements format: {}",
                path.display()
            )))
        }
    };

    info!(
        "Loaded job requirements: {} required, {} preferred",
        job.required_skills.len(),
        job.preferred_skills.len()
    );
    Ok(job)
}

/// Recorded answers from a JSON array.
pub async fn load_transcript(path: &Path) -> Result<Vec<TranscriptEntry>> {
    ensure_exists(path)?;
    if FileType::detect(path)? != FileType::Json {
        return Err(ScreenerError::UnsupportedFormat(format!(
            "Transcripts must be JSON: {}",
            path.display()
        )));
    }
    let content = tokio::fs::read_to_string(path).await?;
    let entries: Vec<TranscriptEntry> = serde_json::from_str(&content)?;
    info!("Loaded {} transcript answers", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert!(FileType::detect(Path::new("resume")).is_err());
    }

    #[tokio::test]
    async fn test_job_requirements_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(
            &path,
            "required_skills = [\"rust\", \"postgres\"]\nexperience_level = \"senior\"\n",
        )
        .unwrap();

        let job = load_job_requirements(&path).await.unwrap();
        assert_eq!(job.required_skills, vec!["rust", "postgres"]);
        assert!(job.preferred_skills.is_empty());
        assert_eq!(job.experience_level.as_deref(), Some("senior"));
    }

    #[tokio::test]
    async fn test_job_description_from_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Looking for a Go developer with Kafka").unwrap();

        let job = load_job_requirements(&path).await.unwrap();
        let names: Vec<String> = job.requirement_entries().into_iter().map(|r| r.skill_name).collect();
        assert_eq!(names, vec!["go", "kafka"]);
    }

    #[tokio::test]
    async fn test_transcript_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(
            &path,
            r#"[{"question_id": "q1", "answer": "I did it", "time_spent_seconds": 40}, {"answer": "Another"}]"#,
        )
        .unwrap();

        let entries = load_transcript(&path).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question_id.as_deref(), Some("q1"));
        assert_eq!(entries[1].question_id, None);
        assert_eq!(entries[1].time_spent_seconds, None);
    }

    #[tokio::test]
    async fn test_unsupported_resume_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, "binary").unwrap();
        assert!(matches!(
            load_resume(&path).await.unwrap_err(),
            ScreenerError::UnsupportedFormat(_)
        ));
    }
}
