//! Job portal engine: HTTP boundary calls and background submission.
mod client;
mod engine;
mod persist;
mod port;
mod types;

pub use client::{ApiSettings, ReqwestApiClient, DEFAULT_API_BASE_URL};
pub use engine::{ChannelEventSink, EngineEvent, EngineHandle, EventSink};
pub use persist::{PersistError, StateFile};
pub use port::{submission_result, SubmissionPort, REJECTED_FALLBACK};
pub use types::{
    ApiEnvelope, ApiError, ApplicationFilters, AuthData, FailureKind, Job, JobFilters,
    SignInRequest, SignUpRequest, UserProfile,
};
