//! Status filter: keeps approved orders only.

use crate::models::OrderRecord;

/// Lowercased status value of an approved order.
pub const APPROVED_STATUS: &str = "aprovado";

pub fn is_approved(record: &OrderRecord) -> bool {
    record.order_status == APPROVED_STATUS
}

pub fn approved_only(records: &[OrderRecord]) -> Vec<OrderRecord> {
    records.iter().filter(|r| is_approved(r)).cloned().collect()
}
