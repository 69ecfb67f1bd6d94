//! # Folio CLI
//!
//! Usage:
//!   folio invoice.json -o invoice.pdf
//!   cat invoice.json | folio --layout stacked -o invoice.pdf
//!   folio invoice.json --layout minimal
//!   folio invoice.json --backend markup --converter /opt/bin/wkhtmltopdf
//!   folio --example > invoice.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use folio::{
    CanvasBackend, Document, FolioError, Invoice, InvoiceLayout, MarkupBackend, PageSize, Theme, WkHtmlToPdf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Built-in PDF writer.
    Canvas,
    /// HTML piped through wkhtmltopdf.
    Markup,
}

/// Render invoices described as JSON to PDF.
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
struct Cli {
    /// Invoice JSON; read from stdin when omitted.
    input: Option<PathBuf>,

    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = InvoiceLayout::Classic)]
    layout: InvoiceLayout,

    #[arg(long, value_enum, default_value_t = BackendKind::Canvas)]
    backend: BackendKind,

    /// Also write the intermediate HTML here.
    #[arg(long)]
    html: Option<PathBuf>,

    /// wkhtmltopdf binary (defaults to $WKHTMLTOPDF_PATH, then /usr/bin/wkhtmltopdf).
    #[arg(long)]
    converter: Option<PathBuf>,

    /// Theme overrides as JSON; unspecified fields keep their defaults.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Page size.
    #[arg(long, default_value = "a4", value_parser = parse_page_size)]
    page: PageSize,

    /// Print a sample invoice and exit.
    #[arg(long)]
    example: bool,
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    match s.to_ascii_lowercase().as_str() {
        "a4" => Ok(PageSize::A4),
        "letter" => Ok(PageSize::Letter),
        "legal" => Ok(PageSize::Legal),
        other => Err(format!("unknown page size '{other}' (a4, letter, legal)")),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_invoice_json());
        return;
    }

    match run(&cli) {
        Ok(written) => eprintln!("✓ Written {} bytes to {}", written, cli.output.display()),
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<usize, FolioError> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let theme: Theme = match &cli.theme {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Theme::default(),
    };

    let invoice = Invoice::from_json(&input)?;
    let document: Document = invoice.document(cli.layout, &theme, cli.page);
    log::info!(
        "invoice {} laid out as {:?}: {} lines on {} pages",
        invoice.header.invoice_number,
        cli.layout,
        invoice.lines.len(),
        document.pages.len()
    );

    if let Some(path) = &cli.html {
        fs::write(path, document.render_markup())?;
    }

    let bytes = match cli.backend {
        BackendKind::Canvas => document.render_with(&CanvasBackend)?,
        BackendKind::Markup => {
            let converter = match &cli.converter {
                Some(path) => WkHtmlToPdf::new(path),
                None => WkHtmlToPdf::from_env(),
            };
            document.render_with(&MarkupBackend::new(converter))?
        }
    };
    fs::write(&cli.output, &bytes)?;
    Ok(bytes.len())
}

fn example_invoice_json() -> &'static str {
    r##"{
  "header": {
    "invoiceNumber": "INV-2026-001",
    "documentTitle": "Invoice",
    "issueDate": "2026-03-01",
    "dueDate": "2026-03-31",
    "currency": "EUR",
    "paymentTerms": "Payable within 30 days",
    "paymentReference": "+++090/9337/55493+++",
    "notes": "Thank you for your business.",
    "qrPayload": "BCD\n002\n1\nSCT\nGEBABEBB\nAcme Corp\nBE71096123456769\nEUR4767.50"
  },
  "supplier": {
    "name": "Acme Corp",
    "street": "123 Business St",
    "city": "9000 Ghent",
    "country": "Belgium",
    "vatNumber": "BE0123.456.789",
    "iban": "BE71 0961 2345 6769",
    "bic": "GEBABEBB"
  },
  "client": {
    "name": "Widget Industries",
    "attention": "Accounts Payable",
    "street": "456 Industrial Ave",
    "city": "1000 Brussels",
    "vatNumber": "BE0987.654.321",
    "clientNumber": "C-0042",
    "poNumber": "PO-7781"
  },
  "lines": [
    { "description": "Website redesign", "quantity": 1, "unitPrice": 3500, "vatRate": 21 },
    { "description": "Hosting", "detail": "12 months", "quantity": 12, "unit": "mo", "unitPrice": 25, "vatRate": 21 },
    { "description": "Support hours", "quantity": 3, "unit": "hrs", "unitPrice": 95, "vatRate": 21, "discountPercent": 10 }
  ],
  "footer": {
    "lines": ["Acme Corp · 123 Business St · 9000 Ghent", "BE0123.456.789 · hello@acme.example"]
  }
}
"##
}
