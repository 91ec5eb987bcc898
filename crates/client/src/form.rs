//! Record creation form state.
//!
//! Binds a title input to a [`SubmissionFlow`] and keeps the feedback a
//! rendering layer needs: an inline message under the title field and a
//! banner for failures that are not about the field.

use std::sync::Arc;

use dataflow_core::record::{validate_title, CreatedRecord};

use crate::api::{ClientError, RecordTransport};
use crate::flow::{SubmissionFlow, SubmitError};

/// Banner shown for failures the user cannot fix by editing the title.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not create the record. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// What a call to [`RecordForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(CreatedRecord),
    /// The title failed validation; see [`RecordForm::field_error`].
    Invalid,
    /// A submission was already running; nothing changed.
    Busy,
    /// The request failed; see [`RecordForm::banner`].
    Failed,
}

pub struct RecordForm<T> {
    flow: Arc<SubmissionFlow<T>>,
    title: String,
    field_error: Option<String>,
    banner: Option<String>,
    on_success: Option<Box<dyn FnMut(&CreatedRecord) + Send>>,
}

impl<T: RecordTransport> RecordForm<T> {
    pub fn new(flow: Arc<SubmissionFlow<T>>) -> Self {
        Self {
            flow,
            title: String::new(),
            field_error: None,
            banner: None,
            on_success: None,
        }
    }

    /// Hook run after a successful submission, typically navigation away.
    pub fn on_success(mut self, hook: impl FnMut(&CreatedRecord) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title input. Clears stale feedback.
    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
        self.field_error = None;
        self.banner = None;
    }

    pub fn field_error(&self) -> Option<&str> {
        self.field_error.as_deref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn phase(&self) -> FormPhase {
        if self.flow.is_in_flight() {
            FormPhase::Submitting
        } else {
            FormPhase::Idle
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        validate_title(&self.title).is_ok() && !self.flow.is_in_flight()
    }

    /// Submit the current title.
    ///
    /// On success the input is cleared and the success hook runs. On failure
    /// the input is kept so the user can correct it and resubmit.
    pub async fn submit(&mut self) -> FormOutcome {
        self.field_error = None;
        self.banner = None;

        match self.flow.submit(&self.title).await {
            Ok(record) => {
                self.title.clear();
                if let Some(hook) = self.on_success.as_mut() {
                    hook(&record);
                }
                FormOutcome::Created(record)
            }
            Err(SubmitError::InFlight) => FormOutcome::Busy,
            Err(err) => {
                if let Some(violation) = err.title_violation() {
                    self.field_error = Some(violation.to_string());
                    FormOutcome::Invalid
                } else {
                    self.banner = Some(banner_for(&err));
                    FormOutcome::Failed
                }
            }
        }
    }
}

/// Business-rule messages are written for users; everything else gets the
/// generic banner.
fn banner_for(err: &SubmitError) -> String {
    match err {
        SubmitError::Api(ClientError::BusinessRule(message)) => message.clone(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}
