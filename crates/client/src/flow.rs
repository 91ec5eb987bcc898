//! Client submission flow.
//!
//! [`SubmissionFlow::submit`] validates locally with the same rule the server
//! applies, allows one request in flight per flow, reports the outcome through
//! exactly one callback, and publishes its state on a `watch` channel:
//!
//! ```text
//! Idle --submit--> InFlight --response--> Settled(..) --callbacks--> Idle
//! ```
//!
//! Failed submissions are never retried automatically.

use std::sync::atomic::{AtomicBool, Ordering};

use dataflow_core::record::{CreateRecord, CreatedRecord, TitleViolation};
use dataflow_core::validation::{field_violations, summarize, FieldViolation};
use tokio::sync::watch;
use validator::Validate;

use crate::api::{ClientError, RecordTransport};

pub type SuccessCallback = Box<dyn Fn(&CreatedRecord) + Send + Sync>;
pub type ErrorCallback = Box<dyn Fn(&ClientError) + Send + Sync>;

/// Observable state of a [`SubmissionFlow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    /// The request finished; callbacks are running.
    Settled(Settlement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Created(CreatedRecord),
    /// Display text of the [`ClientError`].
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Rejected locally; nothing was sent.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    /// Another submission on this flow has not settled yet.
    #[error("A submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Api(#[from] ClientError),
}

impl SubmitError {
    /// The title constraint that failed, whether caught locally or by the server.
    pub fn title_violation(&self) -> Option<TitleViolation> {
        let violations = match self {
            SubmitError::Validation(v) | SubmitError::Api(ClientError::Validation(v)) => v,
            _ => return None,
        };
        violations
            .iter()
            .find_map(|v| TitleViolation::from_code(&v.code))
    }
}

pub struct SubmissionFlow<T> {
    transport: T,
    in_flight: AtomicBool,
    state: watch::Sender<SubmissionState>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl<T: RecordTransport> SubmissionFlow<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            transport,
            in_flight: AtomicBool::new(false),
            state,
            on_success: None,
            on_error: None,
        }
    }

    /// Called once with the created record when a submission succeeds.
    pub fn on_success(mut self, callback: impl Fn(&CreatedRecord) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called once with the error when a sent submission fails.
    pub fn on_error(mut self, callback: impl Fn(&ClientError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `title` locally and, if it passes, send it to the server.
    ///
    /// Local validation failures and re-entrant calls return immediately
    /// without contacting the server or invoking callbacks.
    pub async fn submit(&self, title: &str) -> Result<CreatedRecord, SubmitError> {
        let input = CreateRecord::new(title);
        input
            .validate()
            .map_err(|errors| SubmitError::Validation(field_violations(&errors)))?;

        let _guard = InFlightGuard::acquire(self).ok_or(SubmitError::InFlight)?;
        self.state.send_replace(SubmissionState::InFlight);
        tracing::debug!(title = %input.title, "Submitting record");

        let result = self.transport.create_record(&input).await;

        match &result {
            Ok(record) => {
                tracing::debug!(id_record = record.id_record, "Record submission succeeded");
                self.state
                    .send_replace(SubmissionState::Settled(Settlement::Created(record.clone())));
                if let Some(callback) = &self.on_success {
                    callback(record);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Record submission failed");
                self.state
                    .send_replace(SubmissionState::Settled(Settlement::Failed(err.to_string())));
                if let Some(callback) = &self.on_error {
                    callback(err);
                }
            }
        }

        result.map_err(SubmitError::Api)
    }
}

/// Holds the in-flight flag for one submission. Dropping it (normally, or
/// because the submitting future was dropped) returns the flow to `Idle`.
struct InFlightGuard<'a, T> {
    flow: &'a SubmissionFlow<T>,
}

impl<'a, T> InFlightGuard<'a, T> {
    fn acquire(flow: &'a SubmissionFlow<T>) -> Option<Self> {
        flow.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flow })
    }
}

impl<T> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        // Clear the flag first so a subscriber reacting to `Idle` can submit.
        self.flow.in_flight.store(false, Ordering::Release);
        self.flow.state.send_replace(SubmissionState::Idle);
    }
}
