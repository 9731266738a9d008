use clap::{Parser, Subcommand};
use medimind_core::{
    constants::COMMON_SYMPTOMS, project, AnalysisMode, DiagnosticWorkflow, StagedFile,
    WorkflowConfig, WorkflowState,
};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "medimind")]
#[command(about = "MediMind diagnostics intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage files and symptoms, submit them for analysis and print the result
    Analyze {
        /// Report to upload (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
        /// Symptom tag (repeatable)
        #[arg(long = "symptom", value_name = "TEXT")]
        symptoms: Vec<String>,
        /// Free-text medical history
        #[arg(long)]
        history: Option<String>,
        /// Answer with the built-in reference result instead of calling the service
        #[arg(long)]
        simulated: bool,
        /// Analysis endpoint (overrides MEDIMIND_ANALYZE_URL)
        #[arg(long)]
        endpoint: Option<Url>,
        /// Request timeout in seconds (overrides MEDIMIND_REQUEST_TIMEOUT_SECS)
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the common symptoms offered as quick picks
    Symptoms,
    /// Check that the analysis service is up
    Health {
        /// Health endpoint (defaults to /health on the configured analysis host)
        #[arg(long)]
        url: Option<Url>,
    },
}

/// Apply command-line overrides on top of the environment configuration.
fn workflow_config(
    base: WorkflowConfig,
    simulated: bool,
    endpoint: Option<Url>,
    timeout_secs: Option<u64>,
) -> Result<WorkflowConfig, medimind_core::WorkflowError> {
    let mode = if simulated {
        AnalysisMode::Simulated
    } else {
        base.mode()
    };
    WorkflowConfig::new(
        mode,
        endpoint.unwrap_or_else(|| base.analyze_url().clone()),
        timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| base.request_timeout()),
        base.simulated_delay(),
    )
}

/// One-line summary of a staged file, built from its metadata so report bytes never reach the
/// terminal.
fn staged_line(file: &StagedFile) -> String {
    let meta = file.metadata();
    let media_type = meta
        .media_type
        .as_ref()
        .map_or("unknown type", |m| m.as_str());
    let digest = meta.hash.as_str();
    format!(
        "Staged {} ({}, {}, {} {})",
        meta.original_filename,
        file.display_size(),
        media_type,
        meta.hash_algorithm,
        &digest[..digest.len().min(12)]
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medimind=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            files,
            symptoms,
            history,
            simulated,
            endpoint,
            timeout_secs,
            json,
        }) => {
            let cfg = workflow_config(WorkflowConfig::from_env()?, simulated, endpoint, timeout_secs)?;
            let mut workflow = DiagnosticWorkflow::from_config(&cfg)?;

            for path in &files {
                let file = StagedFile::from_path(path)?;
                if !file.has_accepted_extension() {
                    eprintln!(
                        "Warning: {} is not a supported report type; uploading anyway",
                        file.name()
                    );
                }
                println!("{}", staged_line(&file));
                workflow.add_file(file);
            }
            for symptom in &symptoms {
                if !workflow.add_symptom(symptom) {
                    eprintln!("Skipping blank or duplicate symptom: {symptom:?}");
                }
            }
            if let Some(history) = history {
                workflow.set_history(history);
            }

            println!("Analyzing via {} transport...", workflow.transport_name());
            match workflow.submit().await? {
                WorkflowState::ResultReady { result } => {
                    let view = project(result);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        println!();
                        print!("{view}");
                    }
                }
                WorkflowState::Failed { message } => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
                other => {
                    eprintln!("Unexpected workflow state: {}", other.name());
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Symptoms) => {
            for symptom in COMMON_SYMPTOMS {
                println!("{symptom}");
            }
        }
        Some(Commands::Health { url }) => {
            let url = match url {
                Some(url) => url,
                None => WorkflowConfig::from_env()?
                    .analyze_url()
                    .join(api_shared::HEALTH_PATH)?,
            };
            let res: api_shared::HealthRes = reqwest::get(url.clone())
                .await?
                .error_for_status()?
                .json()
                .await?;
            println!("{url}: {} ({})", res.message, if res.ok { "ok" } else { "not ok" });
        }
        None => {
            println!("Use --help for usage");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_accepts_repeated_flags() {
        let cli = Cli::try_parse_from([
            "medimind",
            "analyze",
            "--file",
            "a.pdf",
            "--file",
            "b.png",
            "--symptom",
            "Headache",
            "--symptom",
            "Fever",
            "--simulated",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Analyze {
                files,
                symptoms,
                simulated,
                ..
            }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(symptoms, vec!["Headache", "Fever"]);
                assert!(simulated);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_replace_environment_values() {
        let endpoint = Url::parse("http://10.0.0.5:9000/api/diagnose").unwrap();
        let cfg = workflow_config(
            WorkflowConfig::default(),
            true,
            Some(endpoint.clone()),
            Some(5),
        )
        .unwrap();

        assert_eq!(cfg.mode(), AnalysisMode::Simulated);
        assert_eq!(cfg.analyze_url(), &endpoint);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_staged_line_summarises_metadata() {
        let png = StagedFile::from_bytes(
            "xray.png",
            vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0],
        )
        .unwrap();
        let line = staged_line(&png);

        assert!(line.starts_with("Staged xray.png (0.0 KB, image/png, sha256 "));
        assert!(line.ends_with(&format!("sha256 {})", &png.hash()[..12])));

        let unknown = StagedFile::from_bytes("notes.dat", vec![1, 2, 3]).unwrap();
        assert!(staged_line(&unknown).contains("unknown type"));
    }

    #[test]
    fn test_zero_timeout_override_is_rejected() {
        assert!(workflow_config(WorkflowConfig::default(), false, None, Some(0)).is_err());
    }
}
