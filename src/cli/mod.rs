//! CLI
//!
//! Command definitions and implementations. The original tool's three
//! screens map onto subcommands: `process` (document submission), `ask`
//! (free-form question), and `shell`, an interactive session that keeps the
//! history of every submission made during its lifetime.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::content::{emit, ResultBatch, SessionHistory, EXPORT_FILE_NAME};
use crate::extractor::{DocumentExtractor, DocumentFormat};
use crate::generation::{has_api_key, GeminiClient};
use crate::pipeline::{self, SubmissionOutcome};
use crate::prompt::ALL_FIELDS;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "interactify")]
#[command(version, about = "Turn document pages into explanations, examples, and mini tests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a document: generate per-page content for a subject field
    Process {
        /// Document to process (PDF, DOCX, PPTX, TXT)
        #[arg(short, long)]
        file: PathBuf,

        /// Subject field, e.g. "Law" (see `fields` for the full list)
        #[arg(long)]
        field: String,

        /// Page ranges, e.g. "4-7" or "1-2,5-5" (default: all pages)
        #[arg(short, long, default_value = "")]
        pages: String,

        /// Declared MIME type (default: guessed from the file extension)
        #[arg(long)]
        mime: Option<String>,

        /// Write the generated content as DOCX to this path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Ask a free-form question about your slides
    Ask {
        /// The question text
        question: String,
    },

    /// Interactive session with submission history
    Shell,

    /// List the supported subject fields
    Fields,

    /// Show version and API key status
    Status,
}

// ============================================================================
// CLI Runner
// ============================================================================

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            file,
            field,
            pages,
            mime,
            out,
        } => cmd_process(&file, &field, &pages, mime.as_deref(), out.as_deref()).await,
        Commands::Ask { question } => cmd_ask(&question).await,
        Commands::Shell => cmd_shell().await,
        Commands::Fields => cmd_fields(),
        Commands::Status => cmd_status(),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_process(
    file: &Path,
    field: &str,
    pages: &str,
    mime: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let provider = require_provider()?;
    let outcome = run_submission(&provider, file, field, pages, mime).await?;

    print_outcome(&outcome)?;

    if let Some(out) = out {
        if outcome.batch.is_empty() {
            println!("[!] Nothing to export.");
        } else {
            write_export(&outcome.batch, out)?;
        }
    }

    Ok(())
}

async fn cmd_ask(question: &str) -> Result<()> {
    let provider = require_provider()?;
    let answer = pipeline::ask(&provider, question).await;
    println!("{answer}");
    Ok(())
}

fn cmd_fields() -> Result<()> {
    for (i, field) in ALL_FIELDS.iter().enumerate() {
        println!("{:>2}. {}", i + 1, field.name());
    }
    Ok(())
}

fn cmd_status() -> Result<()> {
    println!("interactify v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if has_api_key() {
        println!("[OK] API key: set");
    } else {
        println!("[!] API key: not set");
        println!("    export GEMINI_API_KEY=your-key");
    }
    Ok(())
}

// ============================================================================
// Interactive Shell
// ============================================================================

const SHELL_HELP: &str = "\
Commands:
  process <field#> <file> [range]   generate content (field# from 'fields')
  ask <question>                    free-form question
  history                           show this session's submissions
  export <entry#> [path]            write a history entry as DOCX
  fields                            list subject fields
  help                              this text
  quit                              end the session (history is discarded)";

/// One shell invocation is one session: history lives exactly as long as the
/// loop below and is dropped on quit.
async fn cmd_shell() -> Result<()> {
    let provider = require_provider()?;
    let mut history = SessionHistory::new();

    println!("interactify shell - 'help' for commands, 'quit' to leave");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let result = match command {
            "process" => shell_process(&provider, rest, &mut history).await,
            "ask" => {
                if rest.is_empty() {
                    Err(anyhow::anyhow!("usage: ask <question>"))
                } else {
                    cmd_ask_with(&provider, rest).await
                }
            }
            "history" => {
                shell_history(&history);
                Ok(())
            }
            "export" => shell_export(rest, &history),
            "fields" => cmd_fields(),
            "help" => {
                println!("{SHELL_HELP}");
                Ok(())
            }
            "quit" | "exit" => break,
            other => Err(anyhow::anyhow!("unknown command '{other}' - try 'help'")),
        };

        if let Err(e) = result {
            // every error stays inside the session; the shell keeps running
            println!("[!] {e:#}");
        }
    }

    Ok(())
}

async fn cmd_ask_with(provider: &GeminiClient, question: &str) -> Result<()> {
    let answer = pipeline::ask(provider, question).await;
    println!("{answer}");
    Ok(())
}

/// `process <field#> <file> [range]`
async fn shell_process(
    provider: &GeminiClient,
    args: &str,
    history: &mut SessionHistory,
) -> Result<()> {
    let mut parts = args.split_whitespace();
    let field_number: usize = parts
        .next()
        .and_then(|s| s.parse().ok())
        .context("usage: process <field#> <file> [range]")?;
    let file = parts
        .next()
        .map(PathBuf::from)
        .context("usage: process <field#> <file> [range]")?;
    let range = parts.next().unwrap_or("");

    let field = ALL_FIELDS
        .get(field_number.wrapping_sub(1))
        .with_context(|| format!("field number must be 1-{}", ALL_FIELDS.len()))?
        .name();

    let outcome = run_submission(provider, &file, field, range, None).await?;
    print_outcome(&outcome)?;
    history.append(outcome.batch);
    println!("[OK] Added to history (entry {}).", history.len());

    Ok(())
}

fn shell_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("No history available.");
        return;
    }

    for (i, batch) in history.all().iter().enumerate() {
        println!(
            "History Entry {} - {} / {} ({} records, {})",
            i + 1,
            batch.source,
            batch.field,
            batch.records.len(),
            batch.created_at.format("%Y-%m-%d %H:%M"),
        );
        for record in &batch.records {
            println!("  Page {}", record.page);
            println!("    Explanation: {}", truncate_text(&record.explanation, 80));
            println!("    Example:     {}", truncate_text(&record.example, 80));
            println!("    Test:        {}", truncate_text(&record.test, 80));
            println!("    Solution:    {}", truncate_text(&record.solution, 80));
        }
    }
}

/// `export <entry#> [path]`
fn shell_export(args: &str, history: &SessionHistory) -> Result<()> {
    let mut parts = args.split_whitespace();
    let number: usize = parts
        .next()
        .and_then(|s| s.parse().ok())
        .context("usage: export <entry#> [path]")?;
    let path = parts
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

    let batch = history
        .entry(number)
        .with_context(|| format!("no history entry {number}"))?;

    write_export(batch, &path)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn require_provider() -> Result<GeminiClient> {
    if !has_api_key() {
        bail!(
            "API key not set.\n\n\
             Setup:\n  \
             export GEMINI_API_KEY=your-api-key\n\n\
             Get your API key at: https://aistudio.google.com/app/apikey"
        );
    }
    GeminiClient::from_env().context("failed to create Gemini client")
}

/// Extract, then run the page loop. Extraction failures abort the submission
/// here; per-page failures surface as warnings in the outcome.
async fn run_submission(
    provider: &GeminiClient,
    file: &Path,
    field: &str,
    range: &str,
    mime: Option<&str>,
) -> Result<SubmissionOutcome> {
    let mime = match mime {
        Some(m) => m.to_string(),
        None => DocumentFormat::guess_mime(file)
            .with_context(|| format!("cannot guess a MIME type for {}", file.display()))?
            .to_string(),
    };
    let format = DocumentFormat::from_mime(&mime)?;

    println!(
        "[*] Extracting text from {} ({})...",
        file.display(),
        format.label()
    );
    let pages = DocumentExtractor::extract(file, format)
        .context("an error occurred while processing the file")?;
    println!("[*] {} page(s) extracted.", pages.len());

    let source = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    let outcome = pipeline::run_submission(provider, &pages, field, range, &source).await?;
    Ok(outcome)
}

fn print_outcome(outcome: &SubmissionOutcome) -> Result<()> {
    for warning in &outcome.warnings {
        println!("[!] {warning}");
    }

    for record in &outcome.batch.records {
        println!();
        println!("#### Page {}", record.page);
        println!("**Explanation:**\n{}", record.explanation);
        println!("**Example:**\n{}", record.example);
        println!("**Test:**\n{}", record.test);
        println!("**Solution:**\n{}", record.solution);
    }

    // the copyable JSON block, 2-space indented
    println!();
    println!("{}", serde_json::to_string_pretty(&outcome.batch.records)?);
    println!(
        "[OK] {} page(s) processed, {} record(s) generated.",
        outcome.processed,
        outcome.batch.records.len()
    );
    Ok(())
}

fn write_export(batch: &ResultBatch, path: &Path) -> Result<()> {
    let bytes = emit(batch).context("failed to build DOCX export")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("[OK] Exported {} record(s) to {}", batch.records.len(), path.display());
    Ok(())
}

/// UTF-8 safe truncation for history display.
fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace('\n', " ").replace('\r', "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_chars {
        cleaned.to_string()
    } else {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("hello\nworld", 20), "hello world");
    }

    #[test]
    fn test_cli_parses_process_command() {
        let cli = Cli::try_parse_from([
            "interactify",
            "process",
            "--file",
            "lecture.pdf",
            "--field",
            "Law",
            "--pages",
            "2-3",
        ])
        .unwrap();

        match cli.command {
            Commands::Process { field, pages, .. } => {
                assert_eq!(field, "Law");
                assert_eq!(pages, "2-3");
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_cli_parses_ask_command() {
        let cli = Cli::try_parse_from(["interactify", "ask", "what is this slide about?"]).unwrap();
        assert!(matches!(cli.command, Commands::Ask { .. }));
    }
}
