//! Checks the presentation layer runs before handing a form to the controller.

use std::fmt;

use crate::domain::{ApplicationForm, FieldValue, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    InvalidEmail,
    ConsentRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Missing => write!(f, "{} is required", self.field),
            IssueKind::InvalidEmail => write!(f, "{} is not a valid email address", self.field),
            IssueKind::ConsentRequired => {
                f.write_str("consent is required to be contacted about the application")
            }
        }
    }
}

impl ApplicationForm {
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        for field in FormField::ALL.into_iter().filter(|field| field.is_required()) {
            let kind = match self.value(field) {
                FieldValue::Text(text) if text.trim().is_empty() => IssueKind::Missing,
                FieldValue::Flag(false) => IssueKind::ConsentRequired,
                _ => continue,
            };
            issues.push(FieldIssue { field, kind });
        }

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            issues.push(FieldIssue {
                field: FormField::Email,
                kind: IssueKind::InvalidEmail,
            });
        }

        issues
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Same shape browsers accept for `type="email"`: something@host, no spaces.
fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !raw.chars().any(char::is_whitespace)
}
