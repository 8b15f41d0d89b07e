//! Collaborator seams for the report engine.
//!
//! Persistence transport and customer/job data live outside the core; this
//! crate defines the traits the core talks through, plus the in-memory
//! implementations used in tests and a JSON-file template store for
//! single-machine deployments.

pub mod filesystem;
pub mod store;

pub use filesystem::JsonFileTemplateStore;
pub use store::{
    CustomerProvider, InMemoryCustomerProvider, InMemoryJobProvider, InMemoryReportStore,
    InMemoryTemplateStore, JobProvider, ReportStore, StoreError, TemplateStore,
};
