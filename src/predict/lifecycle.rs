/// Submission lifecycle for the prediction form.
///
/// The view state is a plain struct with pure transitions. Nothing here
/// performs I/O, so every step of the idle → in-flight → resolved flow can
/// be checked in isolation.

use crate::features::FeatureSet;
use crate::form::FormState;
use crate::model::{Payload, PredictError, PredictionResult};

/// Where the current (or most recent) submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Complete view state of one prediction form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    form: FormState,
    result: Option<PredictionResult>,
    error: Option<String>,
    loading: bool,
    phase: Phase,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The submit control is disabled for as long as a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }

    /// Edits are accepted in every phase, including while loading.
    pub fn apply_edit(&mut self, name: &str, raw: &str) {
        self.form.apply_edit(name, raw);
    }

    /// Enters the in-flight phase and returns the payload to send.
    ///
    /// Returns `None` without touching any state when a request is already
    /// in flight. Otherwise clears the previous error and result before the
    /// new request starts, so a stale verdict never sits next to a spinner.
    pub fn begin_submit(&mut self, features: &FeatureSet) -> Option<Payload> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        self.result = None;
        self.phase = Phase::InFlight;
        Some(self.form.payload(features))
    }

    /// Stores a successful response and leaves the in-flight phase.
    pub fn resolve_success(&mut self, result: PredictionResult) {
        self.result = Some(result);
        self.error = None;
        self.phase = Phase::Succeeded;
        self.loading = false;
    }

    /// Records a failure as a user-facing message and leaves the in-flight phase.
    pub fn resolve_failure(&mut self, err: &PredictError) {
        self.result = None;
        self.error = Some(err.user_message());
        self.phase = Phase::Failed;
        self.loading = false;
    }

    pub fn resolve(&mut self, outcome: Result<PredictionResult, PredictError>) {
        match outcome {
            Ok(result) => self.resolve_success(result),
            Err(err) => self.resolve_failure(&err),
        }
    }
}
