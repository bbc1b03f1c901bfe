//! Candidate screener: adaptive screening interviews from the command line

use anyhow::Context;
use candidate_screener::cli::{self, Cli, Commands, ConfigAction, ReportArgs, ScreeningArgs};
use candidate_screener::config::{Config, OutputFormat};
use candidate_screener::enhancement::{CommandGenerator, Enhancer};
use candidate_screener::input::loader::{load_job_requirements, load_resume, load_transcript};
use candidate_screener::interview::questions::Question;
use candidate_screener::output::{save_report_to_file, suggest_filename, ReportGenerator, ReportMetadata};
use candidate_screener::screening::{InterviewPlan, ScreeningEngine, ScreeningOutcome, ScreeningSession};
use candidate_screener::skills::mapper::JobRequirements;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

const EXTRA_QUESTION_COUNT: usize = 3;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> candidate_screener::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Plan { screening, json } => {
            let (resume_text, job) = load_inputs(&screening, &mut config).await?;
            let session = ScreeningEngine::new(config).start(&resume_text, &job);
            if json {
                println!("{}", serde_json::to_string_pretty(session.plan())?);
            } else {
                print_plan(session.plan());
            }
        }

        Commands::Interview { screening, report } => {
            let (resume_text, job) = load_inputs(&screening, &mut config).await?;
            let mut session = start_session(&screening, &config, &resume_text, &job);
            run_interactive(&mut session).await?;

            let mut outcome = session.finish();
            enhance(&mut outcome, &config, &resume_text).await;
            emit(&outcome, &report, &config, &screening.resume)?;
        }

        Commands::Evaluate {
            screening,
            transcript,
            report,
        } => {
            let (resume_text, job) = load_inputs(&screening, &mut config).await?;
            let entries = load_transcript(&transcript)
                .await
                .with_context(|| format!("Failed to load transcript {}", transcript.display()))?;

            let mut session = start_session(&screening, &config, &resume_text, &job);
            session.replay_transcript(&entries)?;

            let mut outcome = session.finish();
            enhance(&mut outcome, &config, &resume_text).await;
            emit(&outcome, &report, &config, &screening.resume)?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration file: {}\n", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

async fn load_inputs(args: &ScreeningArgs, config: &mut Config) -> anyhow::Result<(String, JobRequirements)> {
    cli::validate_file_extension(&args.resume, &["pdf", "txt", "md"])
        .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
    cli::validate_file_extension(&args.job, &["toml", "json", "txt", "md"])
        .map_err(|e| anyhow::anyhow!("Job file: {}", e))?;

    if let Some(count) = args.questions {
        config.interview.question_count = count;
    }
    if let Some(seed) = args.seed {
        config.interview.seed = Some(seed);
    }

    let pb = spinner("Reading resume and job requirements...")?;
    let resume_text = load_resume(&args.resume)
        .await
        .with_context(|| format!("Failed to load resume {}", args.resume.display()))?;
    let job = load_job_requirements(&args.job)
        .await
        .with_context(|| format!("Failed to load job requirements {}", args.job.display()))?;
    pb.finish_and_clear();

    info!(
        "Resume: {} characters, job: {} requirements",
        resume_text.len(),
        job.requirement_entries().len()
    );
    Ok((resume_text, job))
}

fn start_session(args: &ScreeningArgs, config: &Config, resume_text: &str, job: &JobRequirements) -> ScreeningSession {
    let metadata = ReportMetadata::new(
        Some(args.resume.display().to_string()),
        Some(args.job.display().to_string()),
    );
    ScreeningEngine::new(config.clone())
        .start(resume_text, job)
        .with_metadata(metadata)
}

fn print_plan(plan: &InterviewPlan) {
    println!("{}", "Interview Plan".bold().blue());
    println!("Skill match: {}%", plan.mapping.skill_match_score);

    let names = |items: Vec<&str>| if items.is_empty() { "none".to_string() } else { items.join(", ") };
    println!(
        "Strong: {}",
        names(plan.mapping.strong.iter().map(|m| m.requirement.skill_name.as_str()).collect()).green()
    );
    println!(
        "Weak: {}",
        names(plan.mapping.weak.iter().map(|m| m.requirement.skill_name.as_str()).collect()).yellow()
    );
    println!(
        "Missing: {}",
        names(plan.mapping.missing.iter().map(|r| r.skill_name.as_str()).collect()).red()
    );

    if !plan.focus_skills.is_empty() {
        println!("\n{}", "Focus skills".bold());
        for focus in &plan.focus_skills {
            println!("  - {} [{}] {}", focus.skill_name, focus.priority, focus.reason.dimmed());
        }
    }

    println!("\n{}", "Questions".bold());
    for question in plan.all_questions() {
        print_question(question);
    }
}

fn print_question(question: &Question) {
    println!(
        "  {} {} [{}, {}]",
        format!("{}.", question.id).cyan(),
        question.text,
        question.question_type,
        question.priority
    );
}

/// Ask every planned question on stdin, following up where the session asks to.
/// An empty line ends an answer; end of input ends the interview early.
async fn run_interactive(session: &mut ScreeningSession) -> anyhow::Result<()> {
    let questions: Vec<Question> = session.plan().all_questions().cloned().collect();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", "Answer each question, then press Enter on an empty line.".dimmed());
    'interview: for question in questions {
        let mut current = question;
        loop {
            println!("\n{}", current.text.bold());
            let started = Instant::now();

            let mut answer = String::new();
            loop {
                match lines.next_line().await? {
                    Some(line) if line.trim().is_empty() => break,
                    Some(line) => {
                        answer.push_str(&line);
                        answer.push('\n');
                    }
                    None => {
                        if !answer.trim().is_empty() {
                            session.submit_answer(&current, answer.trim(), Some(started.elapsed().as_secs() as u32));
                        }
                        warn!("Input closed, finishing the interview early");
                        break 'interview;
                    }
                }
            }

            let elapsed = started.elapsed().as_secs() as u32;
            let submitted = session.submit_answer(&current, answer.trim(), Some(elapsed));
            match submitted.follow_up {
                Some(follow_up) => current = follow_up,
                None => break,
            }
        }
    }
    Ok(())
}

async fn enhance(outcome: &mut ScreeningOutcome, config: &Config, resume_text: &str) {
    if !config.enhancement.enabled {
        return;
    }
    if config.enhancement_api_key().is_none() {
        warn!(
            "Enhancement is enabled but {} is not set, skipping",
            config.enhancement.api_key_env
        );
        return;
    }

    let generator = match CommandGenerator::from_config(&config.enhancement) {
        Ok(generator) => generator,
        Err(e) => {
            warn!("Enhancement unavailable: {}", e);
            return;
        }
    };

    let pb = spinner("Requesting enhancement...").ok();
    outcome
        .apply_enhancement(&Enhancer::new(generator), resume_text, EXTRA_QUESTION_COUNT)
        .await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

fn emit(outcome: &ScreeningOutcome, args: &ReportArgs, config: &Config, resume: &Path) -> anyhow::Result<()> {
    let format = match &args.output {
        Some(output) => cli::parse_output_format(output).map_err(|e| anyhow::anyhow!(e))?,
        None => config.output.format,
    };
    let use_colors = config.output.color_output && args.save.is_none() && format == OutputFormat::Console;
    let generator = ReportGenerator::with_options(use_colors, args.detailed || config.output.detailed, true);

    let content = if args.feedback {
        generator.generate_feedback(&outcome.feedback, format)?
    } else {
        generator.generate_report(&outcome.report, format)?
    };

    match &args.save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &resume.to_string_lossy(), true))
            } else {
                path.clone()
            };
            save_report_to_file(&content, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    if let Some(path) = &args.outcome {
        save_report_to_file(&serde_json::to_string_pretty(outcome)?, path)?;
        info!("Screening outcome written to {}", path.display());
    }

    Ok(())
}
