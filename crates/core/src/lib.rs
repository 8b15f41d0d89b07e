//! Integration layer for the siteform report engine.
//!
//! This crate ties the pieces together behind one facade: a
//! [`ReportService`] that saves validated templates, opens default-seeded
//! capture sessions, and turns submitted sessions into stored, immutable
//! reports. Everything stateful lives behind the store traits from
//! `siteform-traits`; everything algorithmic lives in the leaf crates.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::ReportService;
