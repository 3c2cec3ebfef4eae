//! Quire CLI - analyze manuscripts from the command line or run the HTTP API.
//!
//! ```bash
//! quire analyze draft.docx
//! quire analyze notes --mime-type text/markdown --format json --show-text
//! quire serve -H 0.0.0.0 -p 8000 -c quire.toml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use quire::api::{AnalyzeResponse, ErrorResponse, ExtractResponse};
use quire::{AnalysisConfig, AnalysisError, ManuscriptAnalysis, ManuscriptAnalyzer, UploadedFile};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "quire", version, about = "Manuscript text extraction and length classification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a manuscript, count words and classify its length
    Analyze {
        /// Path to the manuscript (txt, md, docx, pdf)
        path: PathBuf,
        /// Declared media type; detected from the extension when omitted
        #[arg(short, long)]
        mime_type: Option<String>,
        /// Configuration file (TOML, YAML or JSON); discovers quire.toml when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Include the extracted text in the output
        #[arg(long)]
        show_text: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
        /// Configuration file (TOML, YAML or JSON); discovers quire.toml when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => match AnalysisConfig::discover().context("Failed to discover configuration")? {
            Some(config) => {
                tracing::debug!("Using discovered quire.toml");
                Ok(config)
            }
            None => Ok(AnalysisConfig::default()),
        },
    }
}

fn print_analysis(analysis: &ManuscriptAnalysis, text: Option<&str>) {
    println!("File:        {} ({}, {} bytes)", analysis.file_name, analysis.file_type, analysis.file_size);
    println!("Method:      {}", analysis.extraction_method);
    println!("Words:       {}", analysis.word_count);
    println!("Characters:  {}", analysis.character_count);
    println!("Category:    {}", analysis.category);
    println!("Reading:     {}", analysis.reading_time_label);
    if let Some(text) = text {
        println!();
        println!("{text}");
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

fn print_failure(error: &AnalysisError, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&ErrorResponse::from(error.clone()))?,
        OutputFormat::Text => eprintln!("error: {}", error),
    }
    Ok(())
}

fn analyze(
    path: &Path,
    mime_type: Option<&str>,
    config: Option<&Path>,
    format: OutputFormat,
    show_text: bool,
) -> anyhow::Result<ExitCode> {
    let config = load_config(config)?;
    let analyzer = ManuscriptAnalyzer::new(config);
    let file = UploadedFile::from_path(path, mime_type).with_context(|| format!("Failed to read {}", path.display()))?;

    let output = match analyzer.analyze_with_text(Some(&file)) {
        Ok(output) => output,
        Err(error) => {
            print_failure(&error, format)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Json if show_text => print_json(&ExtractResponse {
            success: true,
            analysis: output.analysis,
            extracted_text: output.extracted_text,
        })?,
        OutputFormat::Json => print_json(&AnalyzeResponse {
            success: true,
            analysis: output.analysis,
        })?,
        OutputFormat::Text => {
            print_analysis(&output.analysis, show_text.then_some(output.extracted_text.as_str()));
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            mime_type,
            config,
            format,
            show_text,
        } => analyze(&path, mime_type.as_deref(), config.as_deref(), format, show_text),
        Commands::Serve { host, port, config } => {
            let config = load_config(config.as_deref())?;
            quire::api::serve_with_config(&host, port, config)
                .await
                .context("API server failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["quire", "analyze", "draft.txt"]).unwrap();
        match cli.command {
            Commands::Analyze {
                path,
                mime_type,
                format,
                show_text,
                ..
            } => {
                assert_eq!(path, PathBuf::from("draft.txt"));
                assert!(mime_type.is_none());
                assert_eq!(format, OutputFormat::Text);
                assert!(!show_text);
            }
            Commands::Serve { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["quire", "serve", "-H", "0.0.0.0", "-p", "9000", "-c", "quire.toml"]).unwrap();
        match cli.command {
            Commands::Serve { host, port, config } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 9000);
                assert_eq!(config, Some(PathBuf::from("quire.toml")));
            }
            Commands::Analyze { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{"min_text_chars": 12}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.min_text_chars, 12);
    }

    #[test]
    fn test_failure_json_is_flat() {
        let error = AnalysisError::new(quire::ErrorKind::EmptyInput, "The uploaded file is empty");
        let json = serde_json::to_value(ErrorResponse::from(error)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["errorKind"], "EmptyInput");
        assert_eq!(json["detail"], "The uploaded file is empty");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_load_missing_config_fails() {
        assert!(load_config(Some(Path::new("/nonexistent/quire.toml"))).is_err());
    }
}
