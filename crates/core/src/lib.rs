//! Domain logic for the severity dashboard.
//!
//! Everything here is free of HTTP concerns so the API crate, tests and
//! any future tooling share one implementation of validation, storage,
//! upload naming, retention and the dashboard's frontend model.

pub mod error;
pub mod frontend;
pub mod retention;
pub mod severity;
pub mod store;
pub mod types;
pub mod upload;
