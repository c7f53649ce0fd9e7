//! Detail rows: the projection shown on the details tab and written by the
//! CSV export. Both use the spreadsheet's column names.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::OrderRecord;
use crate::source::columns;

/// Detail view columns, in export order, under their spreadsheet names.
pub const DETAIL_COLUMNS: [&str; 11] = [
    columns::ORDER_ID,
    columns::ORDER_CODE,
    columns::SALE_DATE,
    columns::EXPERIENCE_DATE,
    columns::CLIENT_NAME,
    columns::EXPERIENCE,
    columns::REGION,
    columns::CHANNEL,
    columns::CAMPAIGN,
    columns::ITEM_ID,
    columns::TOTAL,
];

const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// One order row restricted to `DETAIL_COLUMNS`. Field renames must stay in
/// step with that list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    #[serde(rename = "partner_order_id")]
    pub order_id: Option<String>,
    #[serde(rename = "partner_order_code")]
    pub order_code: Option<String>,
    #[serde(rename = "DATA DE VENDA")]
    pub sale_date: Option<NaiveDate>,
    #[serde(rename = "DATA DA EXPERIÊNCIA")]
    pub experience_date: Option<NaiveDate>,
    pub client_name: Option<String>,
    pub experience: Option<String>,
    #[serde(rename = "Regiões")]
    pub region: Option<String>,
    #[serde(rename = "CANAL")]
    pub channel: Option<String>,
    #[serde(rename = "Campanha")]
    pub campaign: Option<String>,
    pub item_id: Option<f64>,
    pub total: Option<f64>,
}

impl From<&OrderRecord> for DetailRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            order_id: record.order_id.clone(),
            order_code: record.order_code.clone(),
            sale_date: record.sale_date,
            experience_date: record.experience_date,
            client_name: record.client_name.clone(),
            experience: record.experience.clone(),
            region: record.region.clone(),
            channel: record.channel.clone(),
            campaign: record.campaign.clone(),
            item_id: record.item_id,
            total: record.total,
        }
    }
}

impl DetailRow {
    /// Cell text in `DETAIL_COLUMNS` order. Dates are written day first and
    /// absent values as empty cells.
    fn csv_fields(&self) -> [String; 11] {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let date = |value: Option<NaiveDate>| {
            value
                .map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        let number = |value: Option<f64>| value.map(|n| n.to_string()).unwrap_or_default();

        [
            text(&self.order_id),
            text(&self.order_code),
            date(self.sale_date),
            date(self.experience_date),
            text(&self.client_name),
            text(&self.experience),
            text(&self.region),
            text(&self.channel),
            text(&self.campaign),
            number(self.item_id),
            number(self.total),
        ]
    }
}

pub fn detail_rows(records: &[OrderRecord]) -> Vec<DetailRow> {
    records.iter().map(DetailRow::from).collect()
}

pub fn to_csv(rows: &[DetailRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(DETAIL_COLUMNS)?;

    for row in rows {
        writer.write_record(row.csv_fields())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let records = vec![
            OrderRecord {
                order_id: Some("1001".into()),
                sale_date: NaiveDate::from_ymd_opt(2025, 4, 3),
                client_name: Some("Vinícola, Serra".into()),
                item_id: Some(2.0),
                total: Some(1234.56),
                ..Default::default()
            },
            OrderRecord::default(),
        ];

        let csv = to_csv(&detail_rows(&records)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "partner_order_id,partner_order_code,DATA DE VENDA,DATA DA EXPERIÊNCIA,client_name,experience,Regiões,CANAL,Campanha,item_id,total"
        );
        assert_eq!(lines[1], "1001,,03/04/2025,,\"Vinícola, Serra\",,,,,2,1234.56");
        assert_eq!(lines[2], ",,,,,,,,,,");
    }

    #[test]
    fn empty_subset_is_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn json_fields_match_export_columns() {
        let row = DetailRow::from(&OrderRecord::default());
        let value = serde_json::to_value(&row).unwrap();
        let keys: BTreeSet<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys, DETAIL_COLUMNS.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn projection_drops_non_detail_fields() {
        let record = OrderRecord {
            order_status: "aprovado".into(),
            origin: Some("google".into()),
            purchase_state: Some("RS".into()),
            channel: Some("site".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(DetailRow::from(&record)).unwrap();

        assert_eq!(value["CANAL"], "site");
        assert!(value.get("origin").is_none());
        assert!(value.get("order_status").is_none());
    }
}
