//! Business submission pipeline: validate, shape, POST, report

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{FormError, SiteContext, SubmitForm, SubmitFormValues, SubmitOutcome};

use crate::error::{AppError, AppResult};
use crate::external::SubmissionApi;

pub const ACKNOWLEDGEMENT_TITLE: &str = "Thanks!";
pub const ACKNOWLEDGEMENT_MESSAGE: &str =
    "Your submission has been received, we'll get back to you as soon as possible.";

/// Thank-you view shown once a submission is accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    pub title: String,
    pub message: String,
    /// Where to send revisions or questions
    pub contact_email: String,
}

/// Accepted submission, echoing the values as entered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub acknowledgement: Acknowledgement,
    pub values: SubmitFormValues,
}

#[derive(Clone)]
pub struct SubmissionService {
    api: Arc<dyn SubmissionApi>,
    site: SiteContext,
    contact_email: String,
}

impl SubmissionService {
    pub fn new(api: Arc<dyn SubmissionApi>, site: SiteContext, contact_email: impl Into<String>) -> Self {
        Self {
            api,
            site,
            contact_email: contact_email.into(),
        }
    }

    /// Drive one submit attempt of a caller-held form
    ///
    /// Invalid values never reach the transport. On transport failure the form
    /// is back in editing with its values intact and the outcome carries the
    /// toast to show.
    pub async fn submit_form(&self, form: &mut SubmitForm) -> Result<SubmitOutcome, FormError> {
        let payload = form.begin_submit()?;

        tracing::debug!(name = %payload.name, site = %payload.site_id, "posting business submission");
        let result = self.api.submit(&payload).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "business submission failed");
        }

        form.finish_submit(result)
    }

    /// Submit values received from a client, scoped to this site
    pub async fn submit(&self, mut values: SubmitFormValues) -> AppResult<SubmissionReceipt> {
        values.site_id = self.site.id.clone();
        values.site_name = self.site.region_name.clone();

        let mut form = SubmitForm::with_values(values);
        match self.submit_form(&mut form).await? {
            SubmitOutcome::Submitted(values) => {
                tracing::info!(name = %values.name, "business submission received");
                Ok(SubmissionReceipt {
                    acknowledgement: self.acknowledgement(),
                    values,
                })
            }
            SubmitOutcome::Failed(toast) => Err(AppError::SubmissionFailed(toast)),
        }
    }

    pub fn acknowledgement(&self) -> Acknowledgement {
        Acknowledgement {
            title: ACKNOWLEDGEMENT_TITLE.to_string(),
            message: ACKNOWLEDGEMENT_MESSAGE.to_string(),
            contact_email: self.contact_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::MockSubmissionApi;
    use shared::{FormState, SelectOption, TransportError};

    fn site() -> SiteContext {
        SiteContext::new("site1", "Ottawa")
    }

    fn valid_values() -> SubmitFormValues {
        let mut values = SubmitFormValues::new(&site());
        values.name = "Bob's Bakery".to_string();
        values.description = "Bread".to_string();
        values.website_url = "HTTP://Example.COM/Shop".to_string();
        values.location = Some(SelectOption::new("loc1", "Glebe"));
        values.category = Some(SelectOption::new("cat1", "Bakery"));
        values.tags = vec![SelectOption::new("a", "Vegan"), SelectOption::new("b", "Local")];
        values
    }

    #[tokio::test]
    async fn test_posts_transformed_payload_once() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit()
            .withf(|payload| {
                payload.tags == "Vegan, Local"
                    && payload.website_url == "http://example.com/shop"
                    && payload.image_url.is_empty()
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        let receipt = service.submit(valid_values()).await.unwrap();

        assert_eq!(receipt.values.website_url, "HTTP://Example.COM/Shop");
        assert_eq!(receipt.acknowledgement.title, "Thanks!");
        assert_eq!(receipt.acknowledgement.contact_email, "hi@example.com");
    }

    #[tokio::test]
    async fn test_invalid_values_never_posted() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit().never();

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        for strip in ["name", "description", "location", "category"] {
            let mut values = valid_values();
            match strip {
                "name" => values.name.clear(),
                "description" => values.description.clear(),
                "location" => values.location = None,
                _ => values.category = None,
            }

            let err = service.submit(values).await.unwrap_err();
            assert!(matches!(&err, AppError::Validation(f) if f.contains(strip)), "{}", strip);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_form_editable() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit()
            .times(1)
            .returning(|_| Err(TransportError::Status(503)));

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        let mut form = SubmitForm::with_values(valid_values());
        let outcome = service.submit_form(&mut form).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.state(), FormState::Editing);
        assert!(!form.is_submitting());
        assert_eq!(form.values(), &valid_values());
        assert!(form.notice().is_some());
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_submission_error() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit()
            .returning(|_| Err(TransportError::Network("connection refused".into())));

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        let err = service.submit(valid_values()).await.unwrap_err();
        match err {
            AppError::SubmissionFailed(toast) => assert_eq!(toast.auto_hide_ms, 3000),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_site_fields_come_from_context() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit()
            .withf(|payload| payload.site_id == "site1" && payload.site_name == "Ottawa")
            .returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        let mut values = valid_values();
        values.site_id = "other-site".to_string();
        values.site_name = "Elsewhere".to_string();
        service.submit(values).await.unwrap();
    }

    #[tokio::test]
    async fn test_submitted_form_rejects_second_submit() {
        let mut api = MockSubmissionApi::new();
        api.expect_submit().times(1).returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(api), site(), "hi@example.com");
        let mut form = SubmitForm::with_values(valid_values());
        service.submit_form(&mut form).await.unwrap();

        let err = service.submit_form(&mut form).await.unwrap_err();
        assert_eq!(err, FormError::NotEditable(FormState::Submitted));
    }
}
