//! Change notifications a presentation layer can re-render from.

use shared::domain::FormField;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    FieldUpdated {
        field: FormField,
    },
    SubmissionStarted {
        attempt: Uuid,
    },
    SubmissionSucceeded {
        attempt: Uuid,
        submitted_id: String,
    },
    SubmissionFailed {
        attempt: Uuid,
        error_message: String,
    },
    /// The attempt was cancelled by a reset; its result, if any, was dropped.
    SubmissionDiscarded {
        attempt: Uuid,
    },
    Reset,
}
