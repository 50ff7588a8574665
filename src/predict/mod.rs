/// Request orchestration for the prediction form.
///
/// `Predictor` owns the view state, the active feature set and a shared
/// transport. A submission can run inline (`submit`) or on a worker thread
/// (`start_submit` + `poll`/`wait`); both paths go through the same
/// single-flight guard and always clear the loading flag when they resolve.
///
/// Submodules:
/// - `lifecycle` — view state and its pure transitions.
/// - `transport` — HTTP exchange and reply interpretation.

pub mod lifecycle;
pub mod transport;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::features::FeatureSet;
use crate::logging::{self, Component};
use crate::model::{PredictError, PredictionResult};

pub use lifecycle::{Phase, ViewState};
pub use transport::{HttpTransport, RawReply, Transport, interpret_reply, request_prediction};

type Outcome = Result<PredictionResult, PredictError>;

/// Input events the form reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Edit { name: String, raw: String },
    Submit,
}

/// The prediction form component.
pub struct Predictor {
    features: FeatureSet,
    transport: Arc<dyn Transport>,
    state: ViewState,
    pending: Option<Receiver<Outcome>>,
}

impl Predictor {
    pub fn new(features: FeatureSet, transport: Arc<dyn Transport>) -> Self {
        Self {
            features,
            transport,
            state: ViewState::new(),
            pending: None,
        }
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Handles one input event. Every event is consumed here; a submit
    /// never falls through to any default behaviour.
    ///
    /// Submits run on a worker thread; call `poll` or `wait` to collect
    /// the outcome.
    pub fn handle_event(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::Edit { name, raw } => self.edit(&name, &raw),
            FormEvent::Submit => {
                if !self.start_submit() {
                    logging::debug(
                        Component::Form,
                        None,
                        "Submit ignored while a request is in flight",
                    );
                }
            }
        }
        true
    }

    pub fn edit(&mut self, name: &str, raw: &str) {
        self.state.apply_edit(name, raw);
    }

    /// Runs one submission to completion on the calling thread.
    ///
    /// Returns `false` without sending anything when a request is already
    /// in flight.
    pub fn submit(&mut self) -> bool {
        let Some(payload) = self.state.begin_submit(&self.features) else {
            return false;
        };
        logging::debug(
            Component::Predict,
            None,
            &format!("Submitting {} features", payload.len()),
        );

        let outcome = request_prediction(self.transport.as_ref(), &payload);
        self.finish(outcome);
        true
    }

    /// Starts a submission on a worker thread.
    ///
    /// Returns `false` without sending anything when a request is already
    /// in flight.
    pub fn start_submit(&mut self) -> bool {
        let Some(payload) = self.state.begin_submit(&self.features) else {
            return false;
        };
        logging::debug(
            Component::Predict,
            None,
            &format!("Submitting {} features in background", payload.len()),
        );

        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);
        thread::spawn(move || {
            let outcome = request_prediction(transport.as_ref(), &payload);
            let _ = tx.send(outcome);
        });
        self.pending = Some(rx);
        true
    }

    /// Applies the background outcome if it has arrived. Never blocks.
    ///
    /// Returns `true` when a submission was resolved by this call.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        self.pending = None;
        self.finish(outcome);
        true
    }

    /// Blocks until the background submission resolves.
    ///
    /// Returns `false` when nothing was pending.
    pub fn wait(&mut self) -> bool {
        let Some(rx) = self.pending.take() else {
            return false;
        };
        let outcome = rx.recv().unwrap_or_else(|_| Err(worker_lost()));
        self.finish(outcome);
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        match &outcome {
            Ok(result) => logging::info(
                Component::Predict,
                None,
                &format!(
                    "Prediction received: will_rain={} probability={}",
                    result.will_rain, result.probability_of_rain
                ),
            ),
            Err(err) => logging::error(
                Component::Predict,
                None,
                &format!("Prediction failed: {}", err),
            ),
        }
        self.state.resolve(outcome);
    }
}

fn worker_lost() -> PredictError {
    PredictError::Network("request worker exited without a reply".to_string())
}
