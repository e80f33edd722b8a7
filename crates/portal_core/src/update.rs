use portal_logging::{portal_debug, portal_info};

use crate::form::{ApplicationRecord, POSITION_FIELD};
use crate::step::StepOutcome;
use crate::submission::{
    FAILURE_FALLBACK, REDIRECT_DELAY, REDIRECT_MESSAGE, REDIRECT_NOTICE_DELAY, SUCCESS_MESSAGE,
};
use crate::validate::validate_section;
use crate::{AppState, Effect, Msg, NotifyKind, Page, SubmissionResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { name, value } => {
            state.set_field(name, value);
            Vec::new()
        }
        Msg::SelectedJobRestored { title } => {
            state.set_field(POSITION_FIELD.to_string(), title);
            Vec::new()
        }
        Msg::NextClicked => {
            let (steps, layout, fields) = state.steps_mut();
            let outcome = steps.next(layout, fields);
            match outcome {
                StepOutcome::Advanced(step) => {
                    portal_debug!("advanced to step {step}");
                    state.mark_dirty();
                    Vec::new()
                }
                StepOutcome::Blocked(err) => {
                    portal_debug!("step blocked on field {}", err.field);
                    vec![notify(err.message(), NotifyKind::Error)]
                }
                StepOutcome::Retreated(_) | StepOutcome::AtBoundary => Vec::new(),
            }
        }
        Msg::PrevClicked => {
            let (steps, _, _) = state.steps_mut();
            if let StepOutcome::Retreated(step) = steps.prev() {
                portal_debug!("went back to step {step}");
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmissionFinished(result) => match result {
            SubmissionResult::Success { .. } => {
                portal_info!("application submitted; resetting wizard");
                state.finish_success();
                vec![
                    notify(SUCCESS_MESSAGE, NotifyKind::Success),
                    Effect::Celebrate,
                    Effect::Schedule {
                        delay: REDIRECT_NOTICE_DELAY,
                        msg: Box::new(Msg::RedirectNoticeDue),
                    },
                ]
            }
            SubmissionResult::Failure { message } => {
                portal_info!("application submission failed");
                state.finish_failure();
                let message = if message.trim().is_empty() {
                    FAILURE_FALLBACK.to_string()
                } else {
                    message
                };
                vec![notify(message, NotifyKind::Error)]
            }
        },
        Msg::RedirectNoticeDue => {
            if state.is_redirect_pending() {
                vec![
                    notify(REDIRECT_MESSAGE, NotifyKind::Info),
                    Effect::Schedule {
                        delay: REDIRECT_DELAY,
                        msg: Box::new(Msg::RedirectDue),
                    },
                ]
            } else {
                Vec::new()
            }
        }
        Msg::RedirectDue => {
            if state.is_redirect_pending() {
                vec![Effect::Navigate { page: Page::Home }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.is_in_flight() || state.is_redirect_pending() {
        portal_debug!("submit ignored: submission already in progress");
        return Vec::new();
    }
    if state.current_step() != state.total_steps() {
        return Vec::new();
    }

    if let Some(section) = state.layout().section(state.current_step()) {
        if let Err(err) = validate_section(section, state.fields()) {
            return vec![notify(err.message(), NotifyKind::Error)];
        }
    }

    let record = ApplicationRecord::assemble(state.fields());
    portal_info!("submitting application with {} fields", record.len());
    state.begin_submission();
    vec![Effect::SubmitApplication { record }]
}

fn notify(message: impl Into<String>, kind: NotifyKind) -> Effect {
    Effect::Notify {
        message: message.into(),
        kind,
    }
}
