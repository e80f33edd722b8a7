//! Job portal core: the application wizard as a pure state machine, plus form checks.
mod auth;
mod contact;
mod effect;
mod form;
mod msg;
mod pages;
mod state;
mod step;
mod submission;
mod update;
mod validate;
mod view_model;

pub use auth::{
    AuthFormError, SignInForm, SignUpForm, LOGOUT_MESSAGE, MIN_PASSWORD_LEN, SIGN_IN_FAILED,
    SIGN_UP_FAILED,
};
pub use contact::{
    ContactForm, CONTACT_FAILED_MESSAGE, CONTACT_REJECTED_MESSAGE, CONTACT_REQUIRED_MESSAGE,
    CONTACT_SENT_MESSAGE,
};
pub use effect::{Effect, NotifyKind, Page};
pub use form::{
    business_key, ApplicationRecord, FieldKind, FieldDef, FormFields, FormLayout, SectionDef,
    FIELD_MAPPING, POSITION_FIELD,
};
pub use msg::Msg;
pub use pages::{
    after_login, apply_destination, jobs_for_page, ApplyDestination, AUTH_REDIRECT_DELAY,
    HOME_PAGE_JOB_LIMIT, LOGIN_REDIRECT_DELAY, LOGIN_REQUIRED_MESSAGE,
};
pub use state::AppState;
pub use step::{NavigationView, StepController, StepOutcome};
pub use submission::{
    SubmissionResult, FAILURE_FALLBACK, REDIRECT_DELAY, REDIRECT_MESSAGE, REDIRECT_NOTICE_DELAY,
    SUBMITTING_LABEL, SUBMIT_LABEL, SUCCESS_MESSAGE,
};
pub use update::update;
pub use validate::{
    is_valid_email, is_valid_phone, validate_section, FieldSource, ValidationError,
    ValidationReason,
};
pub use view_model::{FieldView, SectionView, WizardViewModel};
