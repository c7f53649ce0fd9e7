//! Order data sources.
//!
//! A source hands over raw string rows; cleaning happens later in
//! `report::normalize`. The production source downloads the spreadsheet's CSV
//! export over HTTP.

use async_trait::async_trait;
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::models::RawRow;

/// Spreadsheet header names.
pub mod columns {
    pub const SALE_DATE: &str = "DATA DE VENDA";
    pub const EXPERIENCE_DATE: &str = "DATA DA EXPERIÊNCIA";
    pub const TOTAL: &str = "total";
    pub const ITEM_ID: &str = "item_id";
    pub const ORDER_ID: &str = "partner_order_id";
    pub const ORDER_CODE: &str = "partner_order_code";
    pub const ORDER_STATUS: &str = "status";
    pub const ORDER_STATUS_ALT: &str = "order_status";
    pub const CLIENT_NAME: &str = "client_name";
    pub const EXPERIENCE: &str = "experience";
    pub const CHANNEL: &str = "CANAL";
    pub const CAMPAIGN: &str = "Campanha";
    pub const ORIGIN: &str = "origin";
    pub const REGION: &str = "Regiões";
    pub const PURCHASE_STATE: &str = "Estado de Compra";
}

#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRow>, SourceError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

// ============================================================================
// HTTP CSV export
// ============================================================================

pub struct HttpCsvSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl OrderSource for HttpCsvSource {
    async fn fetch(&self) -> Result<Vec<RawRow>, SourceError> {
        info!("Fetching order sheet from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let text = response.text().await?;
        debug!("Order sheet downloaded ({} bytes)", text.len());
        parse_csv(&text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ============================================================================
// In-memory CSV
// ============================================================================

/// CSV text held in memory. Used for tests and offline runs.
pub struct StaticCsvSource {
    text: String,
}

impl StaticCsvSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl OrderSource for StaticCsvSource {
    async fn fetch(&self) -> Result<Vec<RawRow>, SourceError> {
        parse_csv(&self.text)
    }

    fn describe(&self) -> String {
        "in-memory CSV".to_string()
    }
}

// ============================================================================
// CSV decoding
// ============================================================================

/// Decodes CSV text into raw rows.
///
/// Headers are matched case-insensitively after trimming. Missing columns and
/// empty cells become `None`. Records the CSV reader cannot decode are skipped.
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>, SourceError> {
    let text = text.trim_start_matches('\u{FEFF}');
    if text.trim().is_empty() {
        warn!("Order sheet is empty");
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(layout.row(&record)),
            Err(e) => {
                warn!("Skipping malformed CSV record: {}", e);
                skipped += 1;
            }
        }
    }

    info!("Parsed {} order rows ({} skipped)", rows.len(), skipped);
    Ok(rows)
}

/// Positions of the known columns within one sheet's header row.
struct ColumnLayout {
    sale_date: Option<usize>,
    experience_date: Option<usize>,
    total: Option<usize>,
    item_id: Option<usize>,
    order_id: Option<usize>,
    order_code: Option<usize>,
    order_status: Option<usize>,
    client_name: Option<usize>,
    experience: Option<usize>,
    channel: Option<usize>,
    campaign: Option<usize>,
    origin: Option<usize>,
    region: Option<usize>,
    purchase_state: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().to_lowercase() == name.to_lowercase())
        };

        let layout = Self {
            sale_date: find(columns::SALE_DATE),
            experience_date: find(columns::EXPERIENCE_DATE),
            total: find(columns::TOTAL),
            item_id: find(columns::ITEM_ID),
            order_id: find(columns::ORDER_ID),
            order_code: find(columns::ORDER_CODE),
            order_status: find(columns::ORDER_STATUS).or_else(|| find(columns::ORDER_STATUS_ALT)),
            client_name: find(columns::CLIENT_NAME),
            experience: find(columns::EXPERIENCE),
            channel: find(columns::CHANNEL),
            campaign: find(columns::CAMPAIGN),
            origin: find(columns::ORIGIN),
            region: find(columns::REGION),
            purchase_state: find(columns::PURCHASE_STATE),
        };

        if layout.sale_date.is_none() || layout.total.is_none() {
            warn!(
                "Order sheet headers lack {:?} or {:?}: {:?}",
                columns::SALE_DATE,
                columns::TOTAL,
                headers.iter().collect::<Vec<_>>()
            );
        }

        layout
    }

    fn row(&self, record: &StringRecord) -> RawRow {
        let get = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        RawRow {
            sale_date: get(self.sale_date),
            experience_date: get(self.experience_date),
            total: get(self.total),
            item_id: get(self.item_id),
            order_id: get(self.order_id),
            order_code: get(self.order_code),
            order_status: get(self.order_status),
            client_name: get(self.client_name),
            experience: get(self.experience),
            channel: get(self.channel),
            campaign: get(self.campaign),
            origin: get(self.origin),
            region: get(self.region),
            purchase_state: get(self.purchase_state),
        }
    }
}
