//! Text generation backends for the enhancement layer

use crate::config::EnhancementConfig;
use crate::error::{Result, ScreenerError};
use log::debug;
use std::io;
use std::future::Future;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Runs an external program per prompt: the prompt goes to its stdin, the
/// reply is read from its stdout.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &EnhancementConfig) -> Result<Self> {
        let (program, args) = config.command.split_first().ok_or_else(|| {
            ScreenerError::Configuration("enhancement.command is empty".to_string())
        })?;
        Ok(Self::new(
            program.clone(),
            args.to_vec(),
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl TextGenerator for CommandGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start_time = Instant::now();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ScreenerError::Enhancement(format!("Failed to start '{}': {}", self.program, e)))?;

        // stdin is written while stdout is drained
        let stdin = child.stdin.take();
        let write_prompt = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, io::Error>(())
        };
        let interaction = async move {
            let (written, output) = tokio::join!(write_prompt, child.wait_with_output());
            match (written, output) {
                (_, Err(e)) => Err(e),
                (Err(e), _) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
                (_, Ok(output)) => Ok(output),
            }
        };

        let output = tokio::time::timeout(self.timeout, interaction)
            .await
            .map_err(|_| {
                ScreenerError::Enhancement(format!(
                    "'{}' did not answer within {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })??;

        if !output.status.success() {
            return Err(ScreenerError::Enhancement(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let reply = String::from_utf8(output.stdout)
            .map_err(|e| ScreenerError::Enhancement(format!("Reply is not UTF-8: {}", e)))?;

        debug!(
            "Generator '{}' replied with {} bytes in {} ms",
            self.program,
            reply.len(),
            start_time.elapsed().as_millis()
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_splits_command() {
        let config = EnhancementConfig {
            enabled: true,
            api_key_env: "SCREENER_API_KEY".to_string(),
            command: vec!["llm".to_string(), "--model".to_string(), "small".to_string()],
            timeout_secs: 5,
        };
        let generator = CommandGenerator::from_config(&config).unwrap();
        assert_eq!(generator.program, "llm");
        assert_eq!(generator.args, vec!["--model", "small"]);
        assert_eq!(generator.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_config_rejects_empty_command() {
        let config = EnhancementConfig {
            enabled: true,
            api_key_env: "SCREENER_API_KEY".to_string(),
            command: Vec::new(),
            timeout_secs: 5,
        };
        assert!(CommandGenerator::from_config(&config).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_echoes_prompt() {
        let generator = CommandGenerator::new("cat", Vec::new(), Duration::from_secs(5));
        assert_eq!(generator.generate("hello").await.unwrap(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_prompt_echoed_without_stalling() {
        let prompt = "resume line\n".repeat(100_000);
        let generator = CommandGenerator::new("cat", Vec::new(), Duration::from_secs(10));
        let reply = generator.generate(&prompt).await.unwrap();
        assert_eq!(reply.len(), prompt.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reply_kept_when_prompt_is_not_read() {
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".to_string(), "echo early".to_string()],
            Duration::from_secs(10),
        );
        let prompt = "x".repeat(1 << 20);
        assert_eq!(generator.generate(&prompt).await.unwrap(), "early\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_timeout() {
        let generator = CommandGenerator::new("sleep", vec!["5".to_string()], Duration::from_millis(100));
        let err = generator.generate("ignored").await.unwrap_err();
        assert!(matches!(err, ScreenerError::Enhancement(_)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let generator = CommandGenerator::new("definitely-not-a-real-program-xyz", Vec::new(), Duration::from_secs(1));
        assert!(matches!(
            generator.generate("prompt").await.unwrap_err(),
            ScreenerError::Enhancement(_)
        ));
    }
}
