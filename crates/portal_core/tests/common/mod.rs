#![allow(dead_code)]

use std::sync::Once;

use portal_core::{update, AppState, Effect, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(portal_logging::initialize_for_tests);
}

/// Valid values for every field of the job application wizard, grouped by section.
pub const VALID_SECTIONS: [&[(&str, &str)]; 5] = [
    &[
        ("fullName", "Asha Verma"),
        ("email", "asha@example.in"),
        ("phone", "98765 43210"),
        ("currentAddress", "12 MG Road, Pune"),
    ],
    &[
        ("positionAppliedFor", "CNC Operator"),
        ("jobType", "Full-time"),
        ("expectedSalary", "25000"),
    ],
    &[
        ("degreeType", "Diploma"),
        ("schoolUniversity", "Govt Polytechnic"),
        ("graduationYear", "2019"),
    ],
    &[
        ("mostRecentEmployer", "Tata Motors"),
        ("keyResponsibilities", "Machine setup and QA"),
    ],
    &[
        ("keySkills", "CNC, GD&T"),
        ("languagesSpoken", "Hindi, Marathi"),
        ("finalDate", "2026-11-01"),
    ],
];

pub fn fill(mut state: AppState, pairs: &[(&str, &str)]) -> AppState {
    for (name, value) in pairs {
        let (next, effects) = update(
            state,
            Msg::FieldChanged {
                name: (*name).to_string(),
                value: (*value).to_string(),
            },
        );
        assert!(effects.is_empty());
        state = next;
    }
    state
}

pub fn fill_all(state: AppState) -> AppState {
    VALID_SECTIONS
        .iter()
        .fold(state, |state, pairs| fill(state, pairs))
}

/// Fills every section and clicks Next until the terminal step.
pub fn at_terminal_step() -> AppState {
    let mut state = fill_all(AppState::new());
    for _ in 1..state.total_steps() {
        let (next, effects) = update(state, Msg::NextClicked);
        assert!(effects.is_empty(), "unexpected effects: {effects:?}");
        state = next;
    }
    state
}

pub fn notifications(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}
