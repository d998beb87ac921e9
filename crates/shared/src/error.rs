/// Shown when the backend rejects a submission without any body text.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Submission failed";

/// Shown when a submission fails and no better description is available.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Message for a non-2xx response: the body verbatim, or the generic
/// rejection text when the body is blank.
pub fn rejection_message(body: &str) -> String {
    if body.trim().is_empty() {
        SUBMISSION_FAILED_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}

/// Message for a request that never produced a response.
pub fn failure_message(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        detail.to_string()
    }
}
