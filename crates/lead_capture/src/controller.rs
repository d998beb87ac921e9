use std::{
    any::Any,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::FutureExt;
use shared::{
    domain::{ApplicationForm, FieldValue, FormField},
    error::failure_message,
};
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::{ConfigError, Settings},
    events::ControllerEvent,
    state::{ControllerSnapshot, SubmissionStatus},
    transport::{
        ApplicationTransport, HttpApplicationTransport, SubmissionError, SubmissionReceipt,
    },
};

const INTERRUPTED_MESSAGE: &str = "Submission was interrupted before the server responded";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing was sent.
    Ignored,
    Succeeded { submitted_id: String },
    Failed { error_message: String },
    /// Cancelled by `reset()` while in flight.
    Discarded,
}

/// Owns one applicant's form and the state of its submission.
///
/// State sits behind a plain mutex that is never held across an await, so
/// field edits and resets stay synchronous while a request is in flight.
pub struct LeadFormController {
    transport: Arc<dyn ApplicationTransport>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

#[derive(Default)]
struct ControllerState {
    form: ApplicationForm,
    status: SubmissionStatus,
    generation: u64,
    cancel: Option<oneshot::Sender<()>>,
}

impl LeadFormController {
    pub fn new(transport: Arc<dyn ApplicationTransport>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            transport,
            inner: Mutex::new(ControllerState::default()),
            events,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Arc<Self>, ConfigError> {
        let transport = HttpApplicationTransport::new(settings)?;
        info!(endpoint = transport.endpoint(), "lead: controller ready");
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let state = self.lock_state();
        ControllerSnapshot {
            form: state.form.clone(),
            status: state.status.clone(),
        }
    }

    pub fn form(&self) -> ApplicationForm {
        self.lock_state().form.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock_state().status.clone()
    }

    /// Sets a field by its wire name. Unknown names and values that don't fit
    /// the field are ignored. Returns whether the form changed.
    pub fn update_field(&self, name: &str, value: impl Into<FieldValue>) -> bool {
        match FormField::from_name(name) {
            Some(field) => self.set_field(field, value.into()),
            None => {
                debug!(field = name, "lead: ignoring update for unknown field");
                false
            }
        }
    }

    pub fn set_field(&self, field: FormField, value: FieldValue) -> bool {
        let applied = self.lock_state().form.apply(field, value);
        if applied {
            let _ = self.events.send(ControllerEvent::FieldUpdated { field });
        } else {
            debug!(%field, "lead: ignoring value that does not fit field");
        }
        applied
    }

    /// Submits the current form once. A call made while another submission
    /// is in flight returns [`SubmitOutcome::Ignored`] without touching the
    /// network. Failures end up in [`SubmissionStatus::Failed`], never as a
    /// panic or error to the caller.
    pub async fn submit(&self) -> SubmitOutcome {
        let attempt = Uuid::new_v4();
        let (payload, generation, cancelled) = {
            let mut state = self.lock_state();
            if state.status.is_submitting() {
                debug!(%attempt, "lead: submission already in flight, ignoring");
                return SubmitOutcome::Ignored;
            }
            let (cancel_tx, cancel_rx) = oneshot::channel();
            state.generation += 1;
            state.cancel = Some(cancel_tx);
            state.status = SubmissionStatus::Submitting;
            (state.form.clone(), state.generation, cancel_rx)
        };

        info!(%attempt, "lead: submitting application");
        let _ = self.events.send(ControllerEvent::SubmissionStarted { attempt });

        let mut guard = SettleGuard {
            controller: self,
            attempt,
            generation,
            armed: true,
        };

        let request = AssertUnwindSafe(self.transport.submit_application(&payload)).catch_unwind();
        let result = tokio::select! {
            result = request => Some(result),
            _ = cancelled => None,
        };
        guard.armed = false;

        let Some(result) = result else {
            info!(%attempt, "lead: submission cancelled by reset");
            let _ = self.events.send(ControllerEvent::SubmissionDiscarded { attempt });
            return SubmitOutcome::Discarded;
        };

        let result = result.unwrap_or_else(|panic| {
            Err(SubmissionError::Transport(panic_detail(&*panic)))
        });
        self.settle(attempt, generation, result)
    }

    /// Back to an empty form and `Idle`. Cancels an in-flight submission.
    pub fn reset(&self) {
        {
            let mut state = self.lock_state();
            // Dropping the sender wakes the in-flight submit, which drops its request.
            state.cancel = None;
            state.form = ApplicationForm::default();
            state.status = SubmissionStatus::Idle;
        }
        debug!("lead: form reset");
        let _ = self.events.send(ControllerEvent::Reset);
    }

    fn settle(
        &self,
        attempt: Uuid,
        generation: u64,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> SubmitOutcome {
        let (outcome, event) = {
            let mut state = self.lock_state();
            if state.generation != generation || !state.status.is_submitting() {
                debug!(%attempt, "lead: dropping stale submission result");
                return SubmitOutcome::Discarded;
            }
            state.cancel = None;

            match result {
                Ok(receipt) => {
                    info!(%attempt, submitted_id = %receipt.submitted_id, "lead: application accepted");
                    state.form = ApplicationForm::default();
                    state.status = SubmissionStatus::Succeeded {
                        submitted_id: receipt.submitted_id.clone(),
                    };
                    (
                        SubmitOutcome::Succeeded {
                            submitted_id: receipt.submitted_id.clone(),
                        },
                        ControllerEvent::SubmissionSucceeded {
                            attempt,
                            submitted_id: receipt.submitted_id,
                        },
                    )
                }
                Err(err) => {
                    warn!(%attempt, "lead: application submission failed: {err}");
                    let error_message = err.user_message();
                    state.status = SubmissionStatus::Failed {
                        error_message: error_message.clone(),
                    };
                    (
                        SubmitOutcome::Failed {
                            error_message: error_message.clone(),
                        },
                        ControllerEvent::SubmissionFailed {
                            attempt,
                            error_message,
                        },
                    )
                }
            }
        };

        let _ = self.events.send(event);
        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `Submitting` if the submit future is dropped before it settles.
struct SettleGuard<'a> {
    controller: &'a LeadFormController,
    attempt: Uuid,
    generation: u64,
    armed: bool,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut state = self.controller.lock_state();
            if state.generation != self.generation || !state.status.is_submitting() {
                return;
            }
            state.cancel = None;
            state.status = SubmissionStatus::Failed {
                error_message: INTERRUPTED_MESSAGE.to_string(),
            };
        }
        warn!(attempt = %self.attempt, "lead: submission dropped before settling");
        let _ = self.controller.events.send(ControllerEvent::SubmissionFailed {
            attempt: self.attempt,
            error_message: INTERRUPTED_MESSAGE.to_string(),
        });
    }
}

fn panic_detail(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    failure_message(&detail)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
