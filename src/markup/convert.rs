//! HTML to PDF conversion through an external process.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::FolioError;

/// Default location of the wkhtmltopdf binary.
pub const DEFAULT_WKHTMLTOPDF: &str = "/usr/bin/wkhtmltopdf";

/// Points to millimetres.
const MM_PER_PT: f64 = 0.3528;

/// Turns a complete HTML document into PDF bytes.
pub trait Converter {
    fn convert(&self, html: &str, page_width: f64, page_height: f64) -> Result<Vec<u8>, FolioError>;
}

/// Runs `wkhtmltopdf` with the markup on stdin and the PDF on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WkHtmlToPdf {
    pub path: PathBuf,
}

impl Default for WkHtmlToPdf {
    fn default() -> Self {
        Self::from_env()
    }
}

impl WkHtmlToPdf {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$WKHTMLTOPDF_PATH`, or [`DEFAULT_WKHTMLTOPDF`].
    pub fn from_env() -> Self {
        match std::env::var_os("WKHTMLTOPDF_PATH") {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_WKHTMLTOPDF),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn args(page_width: f64, page_height: f64) -> Vec<String> {
        let mm = |points: f64| format!("{}", (points * MM_PER_PT).round() as i64);
        let mut args = vec![
            "--page-width".to_string(),
            mm(page_width),
            "--page-height".to_string(),
            mm(page_height),
        ];
        for side in ["--margin-top", "--margin-bottom", "--margin-left", "--margin-right"] {
            args.push(side.to_string());
            args.push("0".to_string());
        }
        args.extend(
            [
                "--disable-smart-shrinking",
                "--dpi",
                "96",
                "--encoding",
                "utf-8",
                "--quiet",
                "-",
                "-",
            ]
            .map(String::from),
        );
        args
    }
}

impl Converter for WkHtmlToPdf {
    fn convert(&self, html: &str, page_width: f64, page_height: f64) -> Result<Vec<u8>, FolioError> {
        let mut child = Command::new(&self.path)
            .args(Self::args(page_width, page_height))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => FolioError::ConverterNotFound {
                    path: self.path.clone(),
                },
                _ => FolioError::Io(e),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "converter stdin unavailable"))?;

        // Feed stdin from a second thread so a full stdout pipe can't stall the write.
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(html.as_bytes()));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked")));
            (output, written)
        });
        let output = output?;

        if !output.status.success() {
            return Err(FolioError::ConversionFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(FolioError::EmptyConversionOutput);
        }
        written?;

        log::debug!(
            "{} converted {} bytes of markup into {} bytes",
            self.path.display(),
            html.len(),
            output.stdout.len()
        );
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_goes_out_in_millimetres() {
        let args = WkHtmlToPdf::args(595.0, 842.0);
        assert_eq!(&args[..4], ["--page-width", "210", "--page-height", "297"]);
        assert!(args.windows(2).any(|w| w == ["--margin-left", "0"]));
        assert!(args.windows(2).any(|w| w == ["--encoding", "utf-8"]));
        assert!(args.contains(&"--disable-smart-shrinking".to_string()));
        assert_eq!(&args[args.len() - 2..], ["-", "-"]);
    }

    #[test]
    fn missing_binary_is_reported_as_not_found() {
        let converter = WkHtmlToPdf::new("/nonexistent/folio/wkhtmltopdf");
        match converter.convert("<html></html>", 595.0, 842.0) {
            Err(FolioError::ConverterNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/folio/wkhtmltopdf"))
            }
            other => panic!("expected ConverterNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_process_reports_its_exit_status() {
        if !Path::new("/bin/false").exists() {
            return;
        }
        match WkHtmlToPdf::new("/bin/false").convert("<html></html>", 595.0, 842.0) {
            Err(FolioError::ConversionFailed { status, .. }) => assert_eq!(status, Some(1)),
            other => panic!("expected ConversionFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn silent_success_is_empty_output() {
        if !Path::new("/bin/true").exists() {
            return;
        }
        let result = WkHtmlToPdf::new("/bin/true").convert("<html></html>", 595.0, 842.0);
        assert!(matches!(result, Err(FolioError::EmptyConversionOutput)));
    }
}
