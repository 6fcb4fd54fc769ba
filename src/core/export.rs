//! Payment filtering and CSV export.
//!
//! The admin surface narrows the payment collection by city and school
//! (school options are city-scoped, so choosing a city resets the school
//! filter) and downloads the filtered rows as a delimited text table with a
//! fixed 12-column header.

use crate::{
    entities::payment,
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// The fixed export header, in column order.
pub const CSV_COLUMNS: [&str; 12] = [
    "Name",
    "City",
    "School",
    "Class",
    "Division",
    "Mobile",
    "Language",
    "Referred By",
    "Amount",
    "Payment ID",
    "Date",
    "Status",
];

/// School filter tokens longer than this are truncated in the filename.
const FILENAME_SCHOOL_LIMIT: usize = 20;

/// The active export filters. An empty selection means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    city: Option<String>,
    school: Option<String>,
}

impl PaymentFilter {
    /// The active city filter, if any.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// The active school filter, if any.
    #[must_use]
    pub fn school(&self) -> Option<&str> {
        self.school.as_deref()
    }

    /// Sets the city filter. School options are scoped to the city, so any
    /// existing school filter is reset. An empty string clears the filter.
    pub fn set_city(&mut self, city: Option<String>) {
        self.city = city.filter(|c| !c.is_empty());
        self.school = None;
    }

    /// Sets the school filter. An empty string clears it.
    pub fn set_school(&mut self, school: Option<String>) {
        self.school = school.filter(|s| !s.is_empty());
    }

    /// Clears both filters.
    pub fn clear(&mut self) {
        self.city = None;
        self.school = None;
    }

    /// True when the payment passes both active filters (exact match).
    #[must_use]
    pub fn matches(&self, payment: &payment::Model) -> bool {
        self.city.as_ref().is_none_or(|c| &payment.city == c)
            && self.school.as_ref().is_none_or(|s| &payment.school == s)
    }
}

/// The payments passing the active filters, in input order.
#[must_use]
pub fn filter_payments<'a>(
    payments: &'a [payment::Model],
    filter: &PaymentFilter,
) -> Vec<&'a payment::Model> {
    payments.iter().filter(|p| filter.matches(p)).collect()
}

/// The distinct city values present in the payment collection, sorted.
/// These are the selectable city-filter options.
#[must_use]
pub fn cities_of(payments: &[payment::Model]) -> Vec<String> {
    let mut cities: Vec<String> = payments
        .iter()
        .map(|p| p.city.clone())
        .filter(|c| !c.is_empty())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

/// The distinct school values present in the payment collection, scoped to
/// the active city filter and sorted. These are the selectable
/// school-filter options.
#[must_use]
pub fn schools_of(payments: &[payment::Model], filter: &PaymentFilter) -> Vec<String> {
    let mut schools: Vec<String> = payments
        .iter()
        .filter(|p| filter.city().is_none_or(|c| p.city == c))
        .map(|p| p.school.clone())
        .filter(|s| !s.is_empty())
        .collect();
    schools.sort();
    schools.dedup();
    schools
}

/// A rendered export: the download filename and the CSV text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    /// Deterministic filename derived from the date and active filters
    pub filename: String,
    /// Header row plus one row per filtered payment
    pub content: String,
}

/// Renders the filtered payments as CSV.
///
/// Every field is enclosed in double quotes. Embedded quote characters are
/// NOT escaped; a value containing `"` will corrupt a downstream parse.
/// This matches the historical export format and is documented as a known
/// limitation.
///
/// # Errors
/// Returns `Error::Validation` when no payment passes the active filters.
pub fn export_csv(
    payments: &[payment::Model],
    filter: &PaymentFilter,
    date: NaiveDate,
) -> Result<CsvExport> {
    let rows = filter_payments(payments, filter);
    if rows.is_empty() {
        return Err(Error::Validation {
            message: "no payments match the active filters".to_string(),
        });
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_COLUMNS.join(","));
    for payment in rows {
        lines.push(format_row(payment));
    }

    Ok(CsvExport {
        filename: export_filename(filter, date),
        content: lines.join("\n"),
    })
}

fn format_row(payment: &payment::Model) -> String {
    let fields: [String; 12] = [
        payment.name.clone(),
        payment.city.clone(),
        payment.school.clone(),
        payment.class_name.clone(),
        payment.division.clone(),
        payment.mobile.clone(),
        payment.language.clone(),
        payment.referred_by.clone(),
        payment.amount.to_string(),
        payment.payment_id.clone(),
        payment.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        payment.status.clone(),
    ];

    fields
        .iter()
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Derives the download filename from the date and active filters, e.g.
/// `vec_payments_2026-02-14_Daman_Damanwada_Government.csv`.
fn export_filename(filter: &PaymentFilter, date: NaiveDate) -> String {
    let mut filename = format!("vec_payments_{}", date.format("%Y-%m-%d"));
    if let Some(city) = filter.city() {
        filename.push('_');
        filename.push_str(&filename_token(city, usize::MAX));
    }
    if let Some(school) = filter.school() {
        filename.push('_');
        filename.push_str(&filename_token(school, FILENAME_SCHOOL_LIMIT));
    }
    filename.push_str(".csv");
    filename
}

/// Collapses whitespace runs to underscores and truncates to `limit` chars.
fn filename_token(value: &str, limit: usize) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(limit)
        .collect()
}
