use dialoguer::{Input, Password, Select};
use portal_core::WizardViewModel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
    #[error("input cancelled")]
    Closed,
}

/// Line-oriented user input.
pub trait Prompter {
    fn text(&mut self, prompt: &str, initial: &str) -> Result<String, PromptError>;
    fn secret(&mut self, prompt: &str) -> Result<String, PromptError>;
    /// Index of the chosen item. Cancelling the choice closes the input.
    fn choose(&mut self, prompt: &str, items: &[&str]) -> Result<usize, PromptError>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str, initial: &str) -> Result<String, PromptError> {
        let value = Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn secret(&mut self, prompt: &str) -> Result<String, PromptError> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }

    fn choose(&mut self, prompt: &str, items: &[&str]) -> Result<usize, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?
            .ok_or(PromptError::Closed)
    }
}

/// Wizard navigation controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChoice {
    Previous,
    Next,
    Submit,
    Quit,
}

impl NavChoice {
    /// Controls visible for the current view. Submit is hidden while disabled.
    pub fn available(view: &WizardViewModel) -> Vec<NavChoice> {
        let mut choices = Vec::with_capacity(4);
        if view.navigation.show_prev {
            choices.push(NavChoice::Previous);
        }
        if view.navigation.show_next {
            choices.push(NavChoice::Next);
        }
        if view.navigation.show_submit && view.submit_enabled {
            choices.push(NavChoice::Submit);
        }
        choices.push(NavChoice::Quit);
        choices
    }

    pub fn label(self, view: &WizardViewModel) -> &'static str {
        match self {
            NavChoice::Previous => "Previous",
            NavChoice::Next => "Next",
            NavChoice::Submit => view.submit_label,
            NavChoice::Quit => "Quit",
        }
    }
}
