//! # Invoices
//!
//! A reference document type built on [`crate::compose`]. The model is read
//! from JSON (camelCase keys); totals are derived from the lines unless the
//! input supplies them. See [`layout`] for the page arrangements.

pub mod format;
pub mod layout;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

pub use layout::Theme;

/// The party issuing the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub vat_number: Option<String>,
    pub registration_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// Path, data URI, or base64 PNG/JPEG.
    pub logo_path: Option<String>,
}

/// The party receiving the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub name: String,
    pub attention: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub vat_number: Option<String>,
    pub client_number: Option<String>,
    pub po_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    pub invoice_number: String,
    /// Label printed as the document title ("Invoice", "Proforma", ...).
    pub document_title: String,
    pub issue_date: String,
    pub due_date: Option<String>,
    pub service_date: Option<String>,
    pub currency: String,
    pub payment_terms: Option<String>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    /// Rendered as a QR code in the payment section.
    pub qr_payload: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            invoice_number: String::new(),
            document_title: "Invoice".to_string(),
            issue_date: String::new(),
            due_date: None,
            service_date: None,
            currency: "EUR".to_string(),
            payment_terms: None,
            payment_reference: None,
            notes: None,
            qr_payload: None,
        }
    }
}

impl Header {
    /// True when the payment section is printed.
    pub fn has_payment_section(&self) -> bool {
        self.qr_payload.is_some() || self.payment_reference.is_some()
    }
}

/// One billable line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    pub description: String,
    pub detail: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_price: f64,
    /// Percent, e.g. `21.0`.
    pub vat_rate: f64,
    /// Percent, applied before VAT.
    pub discount_percent: f64,
}

impl Line {
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price * (1.0 - self.discount_percent / 100.0)
    }

    pub fn vat(&self) -> f64 {
        self.subtotal() * self.vat_rate / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.vat()
    }

    /// Cells in line-item column order.
    pub fn cells(&self) -> Vec<String> {
        let quantity = match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{} {unit}", format::quantity(self.quantity)),
            _ => format::quantity(self.quantity),
        };
        let discount = if self.discount_percent > 0.0 {
            format::percent(self.discount_percent)
        } else {
            String::new()
        };
        let description = match &self.detail {
            Some(detail) if !detail.is_empty() => format!("{}, {detail}", self.description),
            _ => self.description.clone(),
        };
        vec![
            description,
            quantity,
            format::amount(self.unit_price),
            discount,
            format::percent(self.vat_rate),
            format::amount(self.subtotal()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal_excl: f64,
    pub total_vat: f64,
    pub total_incl: f64,
    #[serde(default)]
    pub global_discount: Option<f64>,
    #[serde(default)]
    pub amount_paid: Option<f64>,
}

impl Totals {
    pub fn from_lines(lines: &[Line]) -> Self {
        Self {
            subtotal_excl: lines.iter().map(Line::subtotal).sum(),
            total_vat: lines.iter().map(Line::vat).sum(),
            total_incl: lines.iter().map(Line::total).sum(),
            global_discount: None,
            amount_paid: None,
        }
    }

    pub fn amount_due(&self) -> f64 {
        self.total_incl - self.amount_paid.unwrap_or(0.0)
    }

    fn paid(&self) -> Option<f64> {
        self.amount_paid.filter(|paid| *paid > 0.0)
    }

    /// Label and amount for each totals row.
    pub fn rows(&self, currency: &str) -> Vec<(String, String)> {
        let mut rows = vec![("Subtotal excl. VAT".to_string(), format::amount(self.subtotal_excl))];
        if let Some(discount) = self.global_discount.filter(|d| *d > 0.0) {
            rows.push(("Discount".to_string(), format!("-{}", format::amount(discount))));
        }
        rows.push(("VAT".to_string(), format::amount(self.total_vat)));
        match self.paid() {
            Some(paid) => {
                rows.push(("Total incl. VAT".to_string(), format::amount(self.total_incl)));
                rows.push(("Amount paid".to_string(), format!("-{}", format::amount(paid))));
                rows.push((format!("Amount due ({currency})"), format::amount(self.amount_due())));
            }
            None => rows.push((format!("Total incl. VAT ({currency})"), format::amount(self.total_incl))),
        }
        rows
    }

    /// Rows reserved when estimating the totals block: 5 when something was
    /// paid, else 4.
    pub fn estimated_rows(&self) -> usize {
        if self.paid().is_some() {
            5
        } else {
            4
        }
    }
}

/// Text lines pinned to the bottom of every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceFooter {
    pub lines: Vec<String>,
    pub height: f64,
}

impl Default for InvoiceFooter {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            height: 72.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub header: Header,
    pub supplier: Supplier,
    pub client: Client,
    #[serde(default)]
    pub lines: Vec<Line>,
    /// Overrides the totals derived from `lines`.
    #[serde(default)]
    pub totals: Option<Totals>,
    #[serde(default)]
    pub footer: Option<InvoiceFooter>,
}

impl Invoice {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn totals(&self) -> Totals {
        self.totals.unwrap_or_else(|| Totals::from_lines(&self.lines))
    }
}

/// Built-in page arrangements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceLayout {
    /// Logo and addresses, metadata block, line items, totals.
    #[default]
    Classic,
    /// Classic with an accent strip down the left edge of every page.
    Sidebar,
    /// Classic sections with a borderless table and plain-text totals.
    Minimal,
    /// Title banner, stacked parties, running header on later pages.
    Stacked,
    /// Totals and payment on page one, line items from page two.
    SummaryFirst,
}

impl FromStr for InvoiceLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "sidebar" | "classic-with-sidebar" => Ok(Self::Sidebar),
            "minimal" => Ok(Self::Minimal),
            "stacked" => Ok(Self::Stacked),
            "summary-first" | "summary" => Ok(Self::SummaryFirst),
            other => Err(format!("unknown invoice layout '{other}'")),
        }
    }
}
