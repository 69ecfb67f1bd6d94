//! Structured error types for the folio rendering engine.
//!
//! Pagination and layout never fail. The real error sources are surface
//! creation, the external markup converter, image loading, and input parsing.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type returned by all public folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// No output surface could be created for the first page.
    #[error("could not create a drawing context for the first page")]
    ContextCreationFailed,

    /// The external markup converter binary does not exist.
    #[error("markup converter not found at {}. Install it with: apt-get install wkhtmltopdf", .path.display())]
    ConverterNotFound { path: PathBuf },

    /// The converter ran but exited unsuccessfully.
    #[error("markup conversion failed (exit status {}): {stderr}", exit_label(.status))]
    ConversionFailed { status: Option<i32>, stderr: String },

    /// The converter exited cleanly but produced no bytes.
    #[error("markup conversion produced no output")]
    EmptyConversionOutput,

    /// An image could not be read or decoded.
    #[error("image error: {0}")]
    Image(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON input failed to parse as a valid folio document.
    #[error("failed to parse document: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the invoice schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse { source: e, hint }
    }
}
