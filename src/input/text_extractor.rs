//! Text extraction from resume files

use crate::error::{Result, ScreenerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ScreenerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Strip markdown markup, keeping one line per heading, paragraph and list item
/// so that section headers survive as standalone lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        let line = current.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
        current.clear();
    };

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => flush(&mut current),
            Event::End(Tag::Heading(..))
            | Event::End(Tag::Paragraph)
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::TableRow)
            | Event::End(Tag::TableHead) => flush(&mut current),
            Event::Start(Tag::Item) => flush(&mut current),
            Event::End(Tag::TableCell) => current.push_str(" | "),
            _ => {}
        }
    }
    flush(&mut current);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_to_text() {
        let md = "# Jane Doe\n\n## Experience\n\n**Senior Engineer** at Acme.\nBuilt `Rust` services.\n\n\
                  ## Skills\n\n- Go\n- [Kubernetes](https://kubernetes.io)\n";
        assert_eq!(
            markdown_to_text(md),
            "Jane Doe\nExperience\nSenior Engineer at Acme. Built Rust services.\nSkills\nGo\nKubernetes"
        );
    }

    #[test]
    fn test_empty_markdown() {
        assert_eq!(markdown_to_text(""), "");
    }

    #[tokio::test]
    async fn test_plain_text_extractor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Skills: Rust").unwrap();
        assert_eq!(PlainTextExtractor.extract(&path).await.unwrap(), "Skills: Rust");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = PlainTextExtractor
            .extract(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScreenerError::Io(_)));
    }
}
