//! rentsheet - Rental payment extractor for landlord spreadsheets
//!
//! This crate reads landlord rental workbooks (XLSX, XLS, XLSB, ODS) and turns
//! every sheet it recognizes into a flat list of normalized rental records
//! (`RentalEntry`), one per unit and month. Two sheet layouts are supported:
//!
//! - **Summary** sheets, named after a month (`JAN SUMMARY`), with a header
//!   row of `House`/`Rent`/`Paid`/`Balance` columns.
//! - **Detailed** sheets, one per property, with repeating five-column month
//!   groups (`Payable`, `Paid`, `Rent`, `Water`, `Balance`).
//!
//! Sheets that match neither layout are skipped without aborting the workbook.
//! The `Assistant` type wraps the extractor for a chat bot: it keeps the latest
//! upload in memory and answers questions about it through a `ChatModel`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rentsheet::extract_rental_entries;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entries = extract_rental_entries("rent.xlsx")?;
//!
//!     for entry in &entries {
//!         println!("{} {} owes {}", entry.unit, entry.month, entry.balance);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory workbooks, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use rentsheet::Extractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workbook_bytes: Vec<u8> = vec![]; // Your workbook bytes
//! let entries = Extractor::default().extract(Cursor::new(workbook_bytes))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use rentsheet::{ColumnRole, ExtractorBuilder, Month};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_months([Month::January, Month::February, Month::March])
//!         .with_header_candidates(ColumnRole::Unit, ["house", "unit", "room"])
//!         .with_max_input_file_size(10 * 1024 * 1024)
//!         .build()?;
//!
//!     // Per-sheet diagnostics alongside the records
//!     let report = extractor.extract_path_report("rent.xlsx")?;
//!     for sheet in report.skipped_sheets() {
//!         eprintln!("skipped {}: {:?}", sheet.name, sheet.skip);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Render Records
//!
//! ```rust,no_run
//! use rentsheet::{extract_rental_entries, render_to_string, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entries = extract_rental_entries("rent.xlsx")?;
//!
//!     // Markdown table instead of the one-line-per-record context format
//!     let markdown = render_to_string(&entries, OutputFormat::Markdown)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod assistant;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{ColumnRole, OutputFormat, SheetKind, SheetType};
pub use assistant::{
    build_context, build_request, chunk_message, Assistant, AssistantConfig, ChatMessage,
    ChatModel, ChatRequest, DatasetSlot, Role, UploadOutcome, UploadSummary,
    DEFAULT_CONTEXT_LIMIT, DEFAULT_TEMPERATURE, MAX_MESSAGE_LEN,
};
#[cfg(feature = "groq")]
pub use assistant::{GroqClient, GroqConfig};
pub use builder::{extract_rental_entries, Extractor, ExtractorBuilder};
pub use chrono::Month;
pub use error::{RentsheetError, SkipReason};
pub use output::{render_entries, render_to_string};
pub use parser::HeaderCandidates;
pub use types::{ExtractionReport, RentalEntry, SheetReport};
