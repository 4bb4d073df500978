//! Browser-side model of the dashboard.
//!
//! Panel switching, CSV table rendering and chart construction, kept as
//! plain state so it can be driven from any UI shell and tested headless.

pub mod charts;
pub mod csv_table;
pub mod panels;
