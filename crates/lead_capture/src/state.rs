use shared::domain::ApplicationForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Outcome state of the current submission attempt. The confirmation id and
/// the error message live in different variants, so they can never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        submitted_id: String,
    },
    Failed {
        error_message: String,
    },
}

impl SubmissionStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Idle => StatusKind::Idle,
            Self::Submitting => StatusKind::Submitting,
            Self::Succeeded { .. } => StatusKind::Succeeded,
            Self::Failed { .. } => StatusKind::Failed,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn submitted_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { submitted_id } => Some(submitted_id),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { error_message } => Some(error_message),
            _ => None,
        }
    }
}

/// What the presentation layer renders: current field values plus status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub form: ApplicationForm,
    pub status: SubmissionStatus,
}

impl ControllerSnapshot {
    pub fn status_kind(&self) -> StatusKind {
        self.status.kind()
    }

    pub fn is_submitting(&self) -> bool {
        self.status.is_submitting()
    }

    pub fn submitted_id(&self) -> Option<&str> {
        self.status.submitted_id()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }
}
