use portal_core::{ApplicationRecord, SubmissionResult};
use portal_logging::portal_warn;
use serde_json::Value;

use crate::{ApiEnvelope, ApiError, ReqwestApiClient};

pub const REJECTED_FALLBACK: &str = "Failed to submit application";

/// Boundary the submission coordinator depends on. Transport failures are folded into `Failure`.
#[async_trait::async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, record: &ApplicationRecord) -> SubmissionResult;
}

#[async_trait::async_trait]
impl SubmissionPort for ReqwestApiClient {
    async fn submit(&self, record: &ApplicationRecord) -> SubmissionResult {
        submission_result(self.submit_application(record).await)
    }
}

/// Maps an applications-endpoint response onto the wizard's tagged outcome.
pub fn submission_result(response: Result<ApiEnvelope<Value>, ApiError>) -> SubmissionResult {
    match response {
        Ok(envelope) if envelope.success => SubmissionResult::Success {
            message: envelope.message.unwrap_or_default(),
        },
        Ok(envelope) => SubmissionResult::Failure {
            message: envelope.reason().unwrap_or(REJECTED_FALLBACK).to_string(),
        },
        Err(err) => {
            portal_warn!("application submission failed: {}", err.kind);
            SubmissionResult::Failure {
                message: err.message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    fn envelope(success: bool, message: Option<&str>, error: Option<&str>) -> ApiEnvelope<Value> {
        ApiEnvelope {
            success,
            data: None,
            message: message.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn rejected_envelope_prefers_message_then_error() {
        assert_eq!(
            submission_result(Ok(envelope(false, Some("Duplicate"), Some("E11000")))),
            SubmissionResult::Failure {
                message: "Duplicate".to_string()
            }
        );
        assert_eq!(
            submission_result(Ok(envelope(false, None, Some("E11000")))),
            SubmissionResult::Failure {
                message: "E11000".to_string()
            }
        );
        assert_eq!(
            submission_result(Ok(envelope(false, None, None))),
            SubmissionResult::Failure {
                message: REJECTED_FALLBACK.to_string()
            }
        );
    }

    #[test]
    fn transport_error_message_is_carried() {
        let result = submission_result(Err(ApiError::new(
            FailureKind::HttpStatus(500),
            "Server exploded",
        )));
        assert_eq!(
            result,
            SubmissionResult::Failure {
                message: "Server exploded".to_string()
            }
        );
    }
}
