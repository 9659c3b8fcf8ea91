use clap::Parser;
use proctor_agent::ModelConfig;
use proctor_core::ProctorError;
use proctor_exam::ExamEngine;
use proctor_export::{ExportConfig, Exporter, HttpExporter};
use proctor_session::{ExportOutcome, Identity, Phase, Session};
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "proctor", about = "Proctor — AI-assisted exam integrity workflow")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "proctor.toml")]
    config: PathBuf,
}

#[derive(Deserialize)]
struct ProctorConfig {
    model: ModelConfig,
    #[serde(default)]
    export: ExportConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let config_str = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            cli.config.display(),
            e
        )
    })?;
    let config: ProctorConfig = toml::from_str(&config_str)?;

    if config.model.api_key.trim().is_empty() {
        anyhow::bail!("No model API key configured. Set [model] api_key in the config file.");
    }

    let exporter = HttpExporter::from_config(&config.export)
        .map(|e| Arc::new(e) as Arc<dyn Exporter>);
    if exporter.is_none() {
        info!("No export transport configured; verdicts will stay in-session");
    }

    let engine = ExamEngine::new(&config.model, exporter);
    let mut session = Session::new();

    println!("Proctor — AI-assisted exam session");
    run_session(&engine, &mut session).await;

    Ok(())
}

/// Drive one session through its phases over stdin/stdout. All rules live in
/// the engine; this loop only renders prompts and relays input.
async fn run_session(engine: &ExamEngine, session: &mut Session) {
    loop {
        match session.phase {
            Phase::Identification => {
                println!("\n-- Identification --");
                let identity = Identity {
                    name: read_line("Name: "),
                    surname: read_line("Surname: "),
                    student_id: read_line("Student id: "),
                };
                if let Err(e) = engine.begin(session, identity) {
                    println!("{e}");
                    continue;
                }
                println!(
                    "\n-- Tutoring --\n\
                     Ask the tutor anything about the exercise. Commands:\n\
                     :submit <path>  submit your solution file and end tutoring\n\
                     :reset          discard this attempt\n\
                     :quit           leave without submitting"
                );
            }

            Phase::Tutoring => {
                let line = read_line("you> ");
                if line == ":quit" {
                    return;
                }
                if line == ":reset" {
                    engine.reset(session);
                    continue;
                }
                if let Some(path) = line.strip_prefix(":submit ") {
                    match tokio::fs::read_to_string(path.trim()).await {
                        Ok(code) => {
                            if let Err(e) = engine.submit_artifact(session, &code) {
                                println!("{e}");
                            }
                        }
                        Err(e) => println!("Could not read '{}': {e}", path.trim()),
                    }
                    continue;
                }
                match engine.tutor_reply(session, &line).await {
                    Ok(reply) => println!("tutor> {reply}"),
                    Err(ProctorError::ModelUnavailable(e)) => {
                        println!("The tutor is unavailable right now ({e}). Try again.");
                    }
                    Err(e) => println!("{e}"),
                }
            }

            Phase::Audit => {
                println!("\n-- Knowledge audit --");
                let questions = match engine.audit_questions(session).await {
                    Ok(q) => q,
                    Err(e) => {
                        println!("Could not generate the questionnaire ({e}). Press enter to retry.");
                        let _ = read_line("");
                        continue;
                    }
                };

                println!("Answer every question about your submission:");
                let mut answers = Vec::with_capacity(questions.len());
                for (i, q) in questions.iter().enumerate() {
                    println!("\n{}. {}", i + 1, q);
                    answers.push(read_line("answer> "));
                }

                match engine.submit_answers(session, answers).await {
                    Ok(_) => {}
                    Err(ProctorError::Validation(e)) => println!("{e}"),
                    Err(ProctorError::ModelUnavailable(e)) => {
                        println!("The judge is unavailable right now ({e}). Your answers were not consumed; try again.");
                    }
                    Err(e) => println!("{e}"),
                }
            }

            Phase::Verdict => {
                println!("\n-- Verdict --");
                if let Some(verdict) = &session.verdict {
                    println!("{verdict}");
                }
                match session.export_outcome {
                    ExportOutcome::Succeeded => println!("\n[evidence bundle exported]"),
                    ExportOutcome::Degraded => println!(
                        "\n[export not delivered — evidence kept in-session only]"
                    ),
                    ExportOutcome::NotAttempted => {}
                }

                let line = read_line("\n:reset for a new attempt, :quit to leave > ");
                if line == ":reset" {
                    engine.reset(session);
                } else if line == ":quit" {
                    return;
                }
            }
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}
