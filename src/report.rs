use std::io;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// One scraped product. Fields are declared in alphabetical order so the
/// JSON keys come out sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub description: String,
    pub size: String,
    pub title: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeResult {
    pub results: Vec<ProductRecord>,
    pub total: f64,
}

impl ScrapeResult {
    /// Totals the unit prices in listing order.
    pub fn new(results: Vec<ProductRecord>) -> Self {
        let total = results.iter().map(|r| r.unit_price).sum();
        Self { results, total }
    }

    /// Pretty JSON with a four-space indent.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Page size as a fixed-width kilobyte figure, e.g. `" 38.5Kb"`.
pub fn size_label(page: &str) -> String {
    format!("{:5.1}Kb", page.chars().count() as f64 / 1024.0)
}

// ── Tests ──
