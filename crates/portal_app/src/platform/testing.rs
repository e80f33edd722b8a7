//! Test doubles shared by the platform unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use portal_core::{update, AppState, Msg, NotifyKind};

use super::notifier::{NotificationSurface, Notifier};
use super::prompt::{PromptError, Prompter};

#[derive(Debug, Default)]
pub struct Recorded {
    pub toasts: Vec<(String, NotifyKind)>,
    pub alerts: Vec<String>,
}

impl Recorded {
    pub fn messages(&self) -> Vec<String> {
        self.toasts.iter().map(|(message, _)| message.clone()).collect()
    }
}

struct RecordingSurface {
    toast_ok: bool,
    alert_ok: bool,
    seen: Arc<Mutex<Recorded>>,
}

impl NotificationSurface for RecordingSurface {
    fn toast(&mut self, message: &str, kind: NotifyKind) -> io::Result<()> {
        if !self.toast_ok {
            return Err(io::Error::other("no toast"));
        }
        self.seen
            .lock()
            .unwrap()
            .toasts
            .push((message.to_string(), kind));
        Ok(())
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        if !self.alert_ok {
            return Err(io::Error::other("no alert"));
        }
        self.seen.lock().unwrap().alerts.push(message.to_string());
        Ok(())
    }
}

pub fn recording_notifier(toast_ok: bool, alert_ok: bool) -> (Notifier, Arc<Mutex<Recorded>>) {
    let seen = Arc::new(Mutex::new(Recorded::default()));
    let surface = RecordingSurface {
        toast_ok,
        alert_ok,
        seen: seen.clone(),
    };
    (Notifier::new(Box::new(surface)), seen)
}

/// Answers for every wizard field, keyed by field label.
pub const VALID_ANSWERS: &[(&str, &str)] = &[
    ("Full Name", "Asha Verma"),
    ("Email Address", "asha@example.in"),
    ("Phone Number", "98765 43210"),
    ("Current Address", "12 MG Road, Pune"),
    ("Position Applied For", "Welder"),
    ("Job Type", "Full-time"),
    ("Expected Salary", "25000"),
    ("Degree Type", "Diploma"),
    ("School / University", "Govt Polytechnic"),
    ("Graduation Year", "2019"),
    ("Most Recent Employer", "Tata Motors"),
    ("Key Responsibilities", "Machine setup and QA"),
    ("Key Skills", "CNC, GD&T"),
    ("Languages Spoken", "Hindi, Marathi"),
    ("Available From", "2026-11-01"),
];

/// Answers text prompts from a table and choices from a queue of labels.
///
/// A text prompt with no entry keeps its initial value. Running out of choices
/// closes the input.
pub struct ScriptedPrompter {
    answers: Vec<(String, String)>,
    choices: VecDeque<String>,
    initials: Vec<(String, String)>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[(&str, &str)], choices: &[&str]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect(),
            choices: choices.iter().map(|choice| choice.to_string()).collect(),
            initials: Vec::new(),
        }
    }

    /// Initial value shown the last time a prompt starting with `label` was asked.
    pub fn initial_for(&self, label: &str) -> Option<String> {
        self.initials
            .iter()
            .rev()
            .find(|(prompt, _)| prompt.starts_with(label))
            .map(|(_, initial)| initial.clone())
    }

    fn answer(&self, prompt: &str) -> Option<String> {
        self.answers
            .iter()
            .find(|(label, _)| prompt.starts_with(label.as_str()))
            .map(|(_, value)| value.clone())
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, prompt: &str, initial: &str) -> Result<String, PromptError> {
        self.initials.push((prompt.to_string(), initial.to_string()));
        Ok(self.answer(prompt).unwrap_or_else(|| initial.to_string()))
    }

    fn secret(&mut self, prompt: &str) -> Result<String, PromptError> {
        Ok(self.answer(prompt).unwrap_or_default())
    }

    fn choose(&mut self, _prompt: &str, items: &[&str]) -> Result<usize, PromptError> {
        let wanted = self.choices.pop_front().ok_or(PromptError::Closed)?;
        items
            .iter()
            .position(|item| *item == wanted)
            .ok_or(PromptError::Closed)
    }
}

/// A wizard with every field valid, moved to the terminal step.
pub fn at_terminal_step() -> AppState {
    let mut state = AppState::new();
    let layout = portal_core::FormLayout::job_application();
    for section in layout.sections() {
        for field in &section.fields {
            let value = VALID_ANSWERS
                .iter()
                .find(|(label, _)| *label == field.label)
                .map(|(_, value)| value.to_string())
                .unwrap_or_default();
            state = update(
                state,
                Msg::FieldChanged {
                    name: field.name.to_string(),
                    value,
                },
            )
            .0;
        }
    }
    while state.current_step() < state.total_steps() {
        state = update(state, Msg::NextClicked).0;
    }
    state
}

/// Cloneable in-memory screen.
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
