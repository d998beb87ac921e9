//! Lead capture for the admissions application form: field state, a
//! single-flight submission state machine, and the HTTP seam it submits through.

pub mod config;
mod controller;
pub mod events;
pub mod state;
pub mod transport;

pub use config::{load_settings, ConfigError, Settings};
pub use controller::{LeadFormController, SubmitOutcome};
pub use events::ControllerEvent;
pub use state::{ControllerSnapshot, StatusKind, SubmissionStatus};
pub use transport::{
    ApplicationTransport, HttpApplicationTransport, SubmissionError, SubmissionReceipt,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
