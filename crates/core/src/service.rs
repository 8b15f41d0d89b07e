//! The report service: the one place templates, sessions, and stores meet.

use crate::error::ServiceError;
use siteform_capture::CaptureSession;
use siteform_content::Materializer;
use siteform_schema::{
    CustomerSnapshot, JobSnapshot, Template, validate_template,
};
use siteform_traits::{ReportStore, TemplateStore};
use std::sync::Arc;

/// Wires template and report stores to the capture→materialization
/// pipeline. Stores are opaque collaborators behind trait objects; the
/// service owns no persistence of its own.
#[derive(Debug, Clone)]
pub struct ReportService {
    templates: Arc<dyn TemplateStore>,
    reports: Arc<dyn ReportStore>,
    materializer: Materializer,
}

impl ReportService {
    pub fn new(templates: Arc<dyn TemplateStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self {
            templates,
            reports,
            materializer: Materializer::default(),
        }
    }

    /// Overrides the default photo-normalization bounds.
    pub fn with_materializer(mut self, materializer: Materializer) -> Self {
        self.materializer = materializer;
        self
    }

    /// Validates and persists an authored template.
    pub fn save_template(&self, template: Template) -> Result<Template, ServiceError> {
        validate_template(&template)?;
        log::info!(
            "saving template '{}' ({} sections) via {}",
            template.id,
            template.sections.len(),
            self.templates.name()
        );
        Ok(self.templates.upsert(template)?)
    }

    pub fn template(&self, id: &str) -> Result<Template, ServiceError> {
        Ok(self.templates.get(id)?)
    }

    pub fn list_templates(&self) -> Result<Vec<Template>, ServiceError> {
        Ok(self.templates.list()?)
    }

    /// Fetches a template and opens a default-seeded capture session on it.
    pub fn open_session(&self, template_id: &str) -> Result<(Template, CaptureSession), ServiceError> {
        let template = self.templates.get(template_id)?;
        let session = CaptureSession::start(&template);
        Ok((template, session))
    }

    /// Validates the session, materializes the report, and stores it.
    ///
    /// Validation stops at the first missing required field and names that
    /// section. Once materialization starts it runs to completion; the
    /// session should be discarded by the caller afterwards.
    pub async fn submit(
        &self,
        template: &Template,
        session: &CaptureSession,
        customer: CustomerSnapshot,
        job: Option<JobSnapshot>,
    ) -> Result<String, ServiceError> {
        session.validate(template)?;
        let report = self
            .materializer
            .materialize(template, session, customer, job)
            .await;
        let id = self.reports.create(report)?;
        log::info!(
            "report {id} materialized from template '{}' via {}",
            template.id,
            self.reports.name()
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteform_schema::{
        Section, SectionBody, SectionDisplay, SectionLayout, SectionWidth, Value,
    };
    use siteform_traits::{
        InMemoryReportStore, InMemoryTemplateStore, StoreError,
    };

    fn customer() -> CustomerSnapshot {
        CustomerSnapshot {
            id: "c-1".to_string(),
            name: "Ada".to_string(),
            company: String::new(),
            email: String::new(),
        }
    }

    fn text_section(title: &str, required: bool) -> Section {
        Section {
            title: title.to_string(),
            required,
            width: SectionWidth::Full,
            display: SectionDisplay::Block,
            layout: SectionLayout::Full,
            body: SectionBody::Text {
                placeholder: String::new(),
            },
        }
    }

    fn service() -> (ReportService, Arc<InMemoryReportStore>) {
        let templates = Arc::new(InMemoryTemplateStore::new());
        let reports = Arc::new(InMemoryReportStore::new());
        (
            ReportService::new(templates, reports.clone()),
            reports,
        )
    }

    #[test]
    fn test_save_template_rejects_structural_problems() {
        let (service, _) = service();
        let mut template = Template::new("t-1", "Site visit");
        template.sections = vec![text_section("", false)];

        assert!(matches!(
            service.save_template(template),
            Err(ServiceError::Schema(_))
        ));
    }

    #[test]
    fn test_open_session_on_missing_template() {
        let (service, _) = service();
        let err = service.open_session("missing").unwrap_err();
        assert_eq!(err.to_string(), "template not found: missing");
    }

    #[tokio::test]
    async fn test_submit_blocks_on_missing_required_field() {
        let (service, reports) = service();
        let mut template = Template::new("t-1", "Site visit");
        template.sections = vec![text_section("Engineer", true)];
        service.save_template(template).unwrap();

        let (template, session) = service.open_session("t-1").unwrap();
        let err = service
            .submit(&template, &session, customer(), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "'Engineer' is required");
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_submit_stores_materialized_report() {
        let (service, reports) = service();
        let mut template = Template::new("t-1", "Site visit");
        template.sections = vec![text_section("Engineer", true)];
        service.save_template(template).unwrap();

        let (template, mut session) = service.open_session("t-1").unwrap();
        session
            .set_value(0, Value::Text("Ada".to_string()))
            .unwrap();

        let id = service
            .submit(&template, &session, customer(), None)
            .await
            .unwrap();
        let stored = reports.get(&id).unwrap();
        assert_eq!(stored.template_id, "t-1");
        assert_eq!(stored.sections[0].value, Value::Text("Ada".to_string()));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_verbatim() {
        #[derive(Debug)]
        struct FailingReportStore;

        impl siteform_traits::ReportStore for FailingReportStore {
            fn create(&self, _report: siteform_schema::ReportContent) -> Result<String, StoreError> {
                Err(StoreError::Failed {
                    id: "r-1".to_string(),
                    message: "disk full".to_string(),
                })
            }

            fn name(&self) -> &'static str {
                "FailingReportStore"
            }
        }

        let templates = Arc::new(InMemoryTemplateStore::new());
        let service = ReportService::new(templates, Arc::new(FailingReportStore));

        let mut template = Template::new("t-1", "Site visit");
        template.sections = vec![text_section("Engineer", false)];
        let template = service.save_template(template).unwrap();
        let session = CaptureSession::start(&template);

        let err = service
            .submit(&template, &session, customer(), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "store operation failed for 'r-1': disk full"
        );
    }
}
