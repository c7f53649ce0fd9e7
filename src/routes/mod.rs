//! HTTP route modules for the sales dashboard.
//!
//! - `report`: report computation and CSV export
//! - `filters`: multi-select filter options
//! - `service`: health check and cache refresh

pub mod filters;
pub mod report;
pub mod service;
