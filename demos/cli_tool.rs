//! CLI Tool Example
//!
//! This example extracts rental records from a landlord workbook and prints them,
//! and optionally asks a question about them through the Groq chat API.
//!
//! ```text
//! cargo run --example cli_tool -- rent.xlsx --format markdown
//! GROQ_API_KEY=... cargo run --example cli_tool --features groq -- rent.xlsx --ask "Who hasn't paid?"
//! ```

use std::io;
use std::process;
use rentsheet::{render_entries, ExtractorBuilder, OutputFormat, RentsheetError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <workbook> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --format <context|markdown|json>  Output format (default: context)");
        eprintln!("  --report                          Print per-sheet diagnostics to stderr");
        eprintln!("  --ask <question>                  Ask a question (requires the `groq` feature)");
        eprintln!("\nExamples:");
        eprintln!("  {} rent.xlsx", args[0]);
        eprintln!("  {} rent.xlsx --format json", args[0]);
        eprintln!("  {} rent.xlsx --ask \"Who hasn't paid?\"", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];

    // Parse options
    let mut format = OutputFormat::Context;
    let mut show_report = false;
    let mut question: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --format requires a value");
                    process::exit(1);
                }
                format = match args[i + 1].as_str() {
                    "context" => OutputFormat::Context,
                    "markdown" => OutputFormat::Markdown,
                    "json" => OutputFormat::Json,
                    other => {
                        eprintln!("Error: Unknown format: {}", other);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--report" => {
                show_report = true;
                i += 1;
            }
            "--ask" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --ask requires a question");
                    process::exit(1);
                }
                question = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    let result = match question {
        Some(ref q) => ask(input_path, q),
        None => extract(input_path, format, show_report),
    };

    if let Err(e) = result {
        handle_error(e);
        process::exit(1);
    }
}

fn extract(input_path: &str, format: OutputFormat, show_report: bool) -> Result<(), RentsheetError> {
    let extractor = ExtractorBuilder::new().build()?;
    let report = extractor.extract_path_report(input_path)?;

    if show_report {
        for sheet in &report.sheets {
            match sheet.skip {
                Some(ref reason) => eprintln!("{}: skipped ({})", sheet.name, reason),
                None => eprintln!(
                    "{}: {:?}, {} records, {} malformed groups",
                    sheet.name, sheet.kind, sheet.records, sheet.skipped_groups
                ),
            }
        }
    }

    let stdout = io::stdout();
    render_entries(&report.entries, format, stdout.lock())
}

#[cfg(feature = "groq")]
fn ask(input_path: &str, question: &str) -> Result<(), RentsheetError> {
    use rentsheet::{Assistant, Extractor, GroqClient};

    let assistant = Assistant::new(Extractor::default(), GroqClient::from_env()?);

    for reply in assistant.handle_upload(input_path) {
        eprintln!("{}", reply);
    }
    for reply in assistant.handle_question(question) {
        println!("{}", reply);
    }
    Ok(())
}

#[cfg(not(feature = "groq"))]
fn ask(_input_path: &str, _question: &str) -> Result<(), RentsheetError> {
    Err(RentsheetError::Config(
        "--ask requires building with `--features groq`".to_string(),
    ))
}

fn handle_error(error: RentsheetError) {
    match error {
        RentsheetError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        RentsheetError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid workbook or may be corrupted.");
        }
        RentsheetError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        RentsheetError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        RentsheetError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
        RentsheetError::Model(msg) | RentsheetError::RequestTooLarge(msg) => {
            eprintln!("Model Error: {}", msg);
        }
    }
}
