//! Store and provider traits, with in-memory implementations.
//!
//! The core never talks to a database or an API client directly; it talks
//! to these traits. Implementations must round-trip `Template.sections` as
//! an ordered array with the embedded logo data string intact, which the
//! serde derives on the schema types already guarantee for JSON-based
//! stores.

use siteform_schema::{CustomerSnapshot, JobSnapshot, ReportContent, Template};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Error type for store and provider operations.
///
/// Store failures are passed through to the user verbatim: the message a
/// collaborator produced is the message shown, with no retry.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("customer not found: {0}")]
    CustomerNotFound(String),

    #[error("store operation failed for '{id}': {message}")]
    Failed { id: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Stores and retrieves authored templates by id.
pub trait TemplateStore: Send + Sync + Debug {
    fn get(&self, id: &str) -> Result<Template, StoreError>;

    /// Inserts or replaces a template, returning the stored copy.
    fn upsert(&self, template: Template) -> Result<Template, StoreError>;

    fn list(&self) -> Result<Vec<Template>, StoreError>;

    /// A human-readable name for this store (for logging).
    fn name(&self) -> &'static str;
}

/// Persists materialized reports. Reports are immutable: there is no
/// update or delete, only creation.
pub trait ReportStore: Send + Sync + Debug {
    /// Stores a report and returns its stored id.
    fn create(&self, report: ReportContent) -> Result<String, StoreError>;

    fn name(&self) -> &'static str;
}

/// Supplies the customer snapshot frozen into a report.
pub trait CustomerProvider: Send + Sync + Debug {
    fn customer(&self, id: &str) -> Result<CustomerSnapshot, StoreError>;
}

/// Supplies the optional job snapshot frozen into a report.
pub trait JobProvider: Send + Sync + Debug {
    fn job(&self, id: &str) -> Result<Option<JobSnapshot>, StoreError>;
}

/// An in-memory template store. Works anywhere, used throughout the tests.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: RwLock<HashMap<String, Template>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get(&self, id: &str) -> Result<Template, StoreError> {
        let templates = self.templates.read().map_err(|_| StoreError::Failed {
            id: id.to_string(),
            message: "template store lock poisoned".to_string(),
        })?;
        templates
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::TemplateNotFound(id.to_string()))
    }

    fn upsert(&self, template: Template) -> Result<Template, StoreError> {
        let mut templates = self.templates.write().map_err(|_| StoreError::Failed {
            id: template.id.clone(),
            message: "template store lock poisoned".to_string(),
        })?;
        templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn list(&self) -> Result<Vec<Template>, StoreError> {
        let templates = self.templates.read().map_err(|_| StoreError::Failed {
            id: "*".to_string(),
            message: "template store lock poisoned".to_string(),
        })?;
        let mut all: Vec<Template> = templates.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn name(&self) -> &'static str {
        "InMemoryTemplateStore"
    }
}

/// An in-memory report store with sequential ids.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<String, ReportContent>>,
    next_id: AtomicU64,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test access to a stored report.
    pub fn get(&self, id: &str) -> Option<ReportContent> {
        self.reports.read().ok()?.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for InMemoryReportStore {
    fn create(&self, report: ReportContent) -> Result<String, StoreError> {
        let id = format!("report-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut reports = self.reports.write().map_err(|_| StoreError::Failed {
            id: id.clone(),
            message: "report store lock poisoned".to_string(),
        })?;
        log::debug!("storing report {id} for template '{}'", report.template_id);
        reports.insert(id.clone(), report);
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "InMemoryReportStore"
    }
}

/// A pre-populated customer provider for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryCustomerProvider {
    customers: RwLock<HashMap<String, CustomerSnapshot>>,
}

impl InMemoryCustomerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, customer: CustomerSnapshot) {
        if let Ok(mut customers) = self.customers.write() {
            customers.insert(customer.id.clone(), customer);
        }
    }
}

impl CustomerProvider for InMemoryCustomerProvider {
    fn customer(&self, id: &str) -> Result<CustomerSnapshot, StoreError> {
        self.customers
            .read()
            .ok()
            .and_then(|c| c.get(id).cloned())
            .ok_or_else(|| StoreError::CustomerNotFound(id.to_string()))
    }
}

/// A pre-populated job provider for tests and demos. Unknown job ids are
/// not an error; a report without a job is a valid report.
#[derive(Debug, Default)]
pub struct InMemoryJobProvider {
    jobs: RwLock<HashMap<String, JobSnapshot>>,
}

impl InMemoryJobProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, job: JobSnapshot) {
        if let Ok(mut jobs) = self.jobs.write() {
            jobs.insert(job.id.clone(), job);
        }
    }
}

impl JobProvider for InMemoryJobProvider {
    fn job(&self, id: &str) -> Result<Option<JobSnapshot>, StoreError> {
        Ok(self.jobs.read().ok().and_then(|j| j.get(id).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, name: &str) -> Template {
        Template::new(id, name)
    }

    #[test]
    fn test_template_store_get_and_upsert() {
        let store = InMemoryTemplateStore::new();
        store.upsert(template("t-1", "Site visit")).unwrap();

        let fetched = store.get("t-1").unwrap();
        assert_eq!(fetched.name, "Site visit");
    }

    #[test]
    fn test_template_store_not_found() {
        let store = InMemoryTemplateStore::new();
        assert!(matches!(
            store.get("missing"),
            Err(StoreError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_template_store_upsert_replaces() {
        let store = InMemoryTemplateStore::new();
        store.upsert(template("t-1", "Old name")).unwrap();
        store.upsert(template("t-1", "New name")).unwrap();

        assert_eq!(store.get("t-1").unwrap().name, "New name");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_template_store_list_sorted_by_name() {
        let store = InMemoryTemplateStore::new();
        store.upsert(template("t-2", "Boiler service")).unwrap();
        store.upsert(template("t-1", "Annual inspection")).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Annual inspection", "Boiler service"]);
    }

    #[test]
    fn test_report_store_ids_are_unique() {
        use chrono::Utc;
        use siteform_schema::CustomerSnapshot;

        let store = InMemoryReportStore::new();
        let report = ReportContent {
            template_id: "t-1".to_string(),
            template_name: "Site visit".to_string(),
            logo: None,
            sections: vec![],
            customer: CustomerSnapshot {
                id: "c-1".to_string(),
                name: "Ada".to_string(),
                company: String::new(),
                email: String::new(),
            },
            job: None,
            created_at: Utc::now(),
        };

        let first = store.create(report.clone()).unwrap();
        let second = store.create(report).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_some());
    }

    #[test]
    fn test_unknown_job_is_none_not_error() {
        let provider = InMemoryJobProvider::new();
        assert_eq!(provider.job("missing").unwrap(), None);
    }

    #[test]
    fn test_unknown_customer_is_an_error() {
        let provider = InMemoryCustomerProvider::new();
        assert!(matches!(
            provider.customer("missing"),
            Err(StoreError::CustomerNotFound(_))
        ));
    }
}
