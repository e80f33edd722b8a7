use std::time::Duration;

/// Outcome of a boundary call that submits an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { message: String },
    Failure { message: String },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

pub const SUBMIT_LABEL: &str = "Submit Application";
pub const SUBMITTING_LABEL: &str = "Submitting...";

pub const SUCCESS_MESSAGE: &str = "Congratulations! Application submitted successfully!";
pub const FAILURE_FALLBACK: &str = "Failed to submit application. Please try again.";
pub const REDIRECT_MESSAGE: &str = "Redirecting to home page...";

/// Delay between the success toast and the redirect notice.
pub const REDIRECT_NOTICE_DELAY: Duration = Duration::from_millis(3000);
/// Delay between the redirect notice and navigation.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);
