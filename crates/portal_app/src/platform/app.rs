use std::io::Write;
use std::sync::{mpsc, Arc};

use portal_core::{update, AppState, Msg, Page};
use portal_engine::SubmissionPort;
use portal_logging::{portal_debug, portal_info};

use super::effects::EffectRunner;
use super::notifier::Notifier;
use super::prompt::{NavChoice, PromptError, Prompter};
use super::ui::render;

/// Runs the application wizard until it navigates away or the user quits.
///
/// `selected_job` pre-fills the position when the wizard was opened from a job listing.
pub fn run_wizard(
    port: Arc<dyn SubmissionPort>,
    selected_job: Option<String>,
    prompter: &mut dyn Prompter,
    notifier: &mut Notifier,
    out: &mut dyn Write,
) -> Result<Page, PromptError> {
    let (msg_tx, msg_rx) = mpsc::channel();
    let mut wizard = Wizard {
        state: AppState::new(),
        runner: EffectRunner::new(port, msg_tx),
        notifier,
        out,
    };

    if let Some(title) = selected_job.filter(|title| !title.trim().is_empty()) {
        portal_info!("Restoring selected job");
        if let Some(page) = wizard.dispatch(Msg::SelectedJobRestored { title }) {
            return Ok(page);
        }
    }

    loop {
        wizard.render();

        if wizard.state.is_in_flight() || wizard.state.is_redirect_pending() {
            // The runner keeps a sender alive, so this only fails if it is gone.
            let Ok(msg) = msg_rx.recv() else {
                return Ok(Page::Home);
            };
            if let Some(page) = wizard.dispatch(msg) {
                return Ok(page);
            }
            continue;
        }

        while let Ok(msg) = msg_rx.try_recv() {
            if let Some(page) = wizard.dispatch(msg) {
                return Ok(page);
            }
        }

        let view = wizard.state.view();
        for field in &view.fields {
            let value = prompter.text(&render::field_prompt(field), &field.value)?;
            wizard.dispatch(Msg::FieldChanged {
                name: field.name.to_string(),
                value,
            });
        }

        let view = wizard.state.view();
        let choices = NavChoice::available(&view);
        let labels: Vec<&str> = choices.iter().map(|choice| choice.label(&view)).collect();
        let index = prompter.choose("Continue", &labels)?;
        let msg = match choices.get(index) {
            Some(NavChoice::Previous) => Msg::PrevClicked,
            Some(NavChoice::Next) => Msg::NextClicked,
            Some(NavChoice::Submit) => Msg::SubmitClicked,
            Some(NavChoice::Quit) | None => {
                portal_info!("Wizard closed at step {}", wizard.state.current_step());
                return Ok(Page::Home);
            }
        };
        if let Some(page) = wizard.dispatch(msg) {
            return Ok(page);
        }
    }
}

struct Wizard<'a> {
    state: AppState,
    runner: EffectRunner,
    notifier: &'a mut Notifier,
    out: &'a mut dyn Write,
}

impl Wizard<'_> {
    fn dispatch(&mut self, msg: Msg) -> Option<Page> {
        portal_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects, &mut *self.notifier, &mut *self.out)
    }

    fn render(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        let text = render::render_wizard(&self.state.view());
        if let Err(err) = write!(self.out, "{text}").and_then(|_| self.out.flush()) {
            portal_debug!("render skipped: {}", err);
        }
    }
}

/// Message kind without its payload; field values stay out of the log.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FieldChanged { .. } => "FieldChanged",
        Msg::NextClicked => "NextClicked",
        Msg::PrevClicked => "PrevClicked",
        Msg::SubmitClicked => "SubmitClicked",
        Msg::SubmissionFinished(_) => "SubmissionFinished",
        Msg::SelectedJobRestored { .. } => "SelectedJobRestored",
        Msg::RedirectNoticeDue => "RedirectNoticeDue",
        Msg::RedirectDue => "RedirectDue",
    }
}
