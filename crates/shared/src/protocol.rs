use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const APPLICATIONS_PATH: &str = "/api/applications";

/// Confirmation shown when the backend accepts an application without echoing an id.
pub const CONFIRMED_FALLBACK_ID: &str = "CONFIRMED";

/// Joins the configured base URL with the applications path. An empty base
/// yields the bare path, i.e. same-origin.
pub fn applications_url(base_url: &str) -> String {
    format!("{}{APPLICATIONS_PATH}", base_url.trim().trim_end_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicationId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Number(id) => write!(f, "{id}"),
        }
    }
}

impl ApplicationId {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Self::Text(id.clone())),
            Value::Number(id) => Some(Self::Number(id.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateApplicationResponse {
    pub id: Option<ApplicationId>,
}

impl CreateApplicationResponse {
    /// Reads a 2xx body. Any JSON document is accepted; only a string or
    /// numeric top-level `id` is kept. Errors only when the body isn't JSON.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self {
            id: value.get("id").and_then(ApplicationId::from_json),
        })
    }

    /// The confirmation id to display, falling back to [`CONFIRMED_FALLBACK_ID`]
    /// when the body carried none (or an empty string).
    pub fn confirmation_id(&self) -> String {
        match &self.id {
            Some(id) => {
                let id = id.to_string();
                if id.trim().is_empty() {
                    CONFIRMED_FALLBACK_ID.to_string()
                } else {
                    id
                }
            }
            None => CONFIRMED_FALLBACK_ID.to_string(),
        }
    }
}
