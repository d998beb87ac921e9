use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ApplicationForm,
    error::{failure_message, rejection_message},
    protocol::{applications_url, CreateApplicationResponse},
};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submitted_id: String,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("server rejected application with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable confirmation from server: {0}")]
    MalformedResponse(String),
}

impl SubmissionError {
    /// Text shown next to the submit control.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => rejection_message(body),
            Self::Transport(detail) | Self::MalformedResponse(detail) => failure_message(detail),
        }
    }
}

/// Delivers one application to the backend. Implementations make exactly one
/// attempt per call.
#[async_trait]
pub trait ApplicationTransport: Send + Sync {
    async fn submit_application(
        &self,
        form: &ApplicationForm,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

pub struct HttpApplicationTransport {
    http: Client,
    endpoint: String,
}

impl HttpApplicationTransport {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let base = settings.backend_base()?;
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &base))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: applications_url(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ApplicationTransport for HttpApplicationTransport {
    async fn submit_application(
        &self,
        form: &ApplicationForm,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        debug!(status = status.as_u16(), endpoint = %self.endpoint, "lead: backend responded");

        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created = CreateApplicationResponse::from_body(&body)
            .map_err(|err| SubmissionError::MalformedResponse(err.to_string()))?;
        Ok(SubmissionReceipt {
            submitted_id: created.confirmation_id(),
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
