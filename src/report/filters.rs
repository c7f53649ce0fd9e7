//! User-selected multi-select filters and the options that feed them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::OrderRecord;

/// A categorical column that can be filtered on or broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Client,
    Channel,
    Campaign,
    Origin,
    Region,
    PurchaseState,
}

impl Dimension {
    pub fn value<'a>(&self, record: &'a OrderRecord) -> Option<&'a str> {
        match self {
            Dimension::Client => record.client_name.as_deref(),
            Dimension::Channel => record.channel.as_deref(),
            Dimension::Campaign => record.campaign.as_deref(),
            Dimension::Origin => record.origin.as_deref(),
            Dimension::Region => record.region.as_deref(),
            Dimension::PurchaseState => record.purchase_state.as_deref(),
        }
    }
}

/// Multi-select filters. An empty selection leaves that column unrestricted;
/// a non-empty one only lets through records whose value is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilters {
    pub clients: Vec<String>,
    pub regions: Vec<String>,
    pub channels: Vec<String>,
    pub campaigns: Vec<String>,
    pub origins: Vec<String>,
    pub purchase_states: Vec<String>,
}

impl OrderFilters {
    fn selections(&self) -> [(Dimension, &[String]); 6] {
        [
            (Dimension::Client, self.clients.as_slice()),
            (Dimension::Region, self.regions.as_slice()),
            (Dimension::Channel, self.channels.as_slice()),
            (Dimension::Campaign, self.campaigns.as_slice()),
            (Dimension::Origin, self.origins.as_slice()),
            (Dimension::PurchaseState, self.purchase_states.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.selections().iter().all(|(_, selected)| selected.is_empty())
    }

    pub fn matches(&self, record: &OrderRecord) -> bool {
        self.selections().iter().all(|(dimension, selected)| {
            selected.is_empty()
                || dimension
                    .value(record)
                    .is_some_and(|value| selected.iter().any(|s| s == value))
        })
    }

    pub fn apply(&self, records: &[OrderRecord]) -> Vec<OrderRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Distinct values per filterable column, sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub clients: Vec<String>,
    pub regions: Vec<String>,
    pub channels: Vec<String>,
    pub campaigns: Vec<String>,
    pub origins: Vec<String>,
    pub purchase_states: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        Self {
            clients: distinct_values(records, Dimension::Client),
            regions: distinct_values(records, Dimension::Region),
            channels: distinct_values(records, Dimension::Channel),
            campaigns: distinct_values(records, Dimension::Campaign),
            origins: distinct_values(records, Dimension::Origin),
            purchase_states: distinct_values(records, Dimension::PurchaseState),
        }
    }
}

pub fn distinct_values(records: &[OrderRecord], dimension: Dimension) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| dimension.value(r))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
