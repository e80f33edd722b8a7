use crate::form::{FormFields, FormLayout};
use crate::step::StepController;
use crate::submission::{SUBMITTING_LABEL, SUBMIT_LABEL};
use crate::validate::FieldSource;
use crate::view_model::{FieldView, SectionView, WizardViewModel};

/// State of one application wizard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    layout: FormLayout,
    steps: StepController,
    fields: FormFields,
    in_flight: bool,
    submit_enabled: bool,
    redirect_pending: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_layout(FormLayout::job_application())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: FormLayout) -> Self {
        let steps = StepController::new(layout.len());
        Self {
            layout,
            steps,
            fields: FormFields::new(),
            in_flight: false,
            submit_enabled: true,
            redirect_pending: false,
            dirty: true,
        }
    }

    pub fn current_step(&self) -> usize {
        self.steps.current()
    }

    pub fn total_steps(&self) -> usize {
        self.steps.total()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_redirect_pending(&self) -> bool {
        self.redirect_pending
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> String {
        self.fields.get(name)
    }

    pub fn view(&self) -> WizardViewModel {
        let current = self.steps.current();
        let sections = self
            .layout
            .sections()
            .iter()
            .zip(self.steps.section_flags())
            .enumerate()
            .map(|(idx, (section, active))| SectionView {
                step: idx + 1,
                title: section.title,
                active,
            })
            .collect();

        let active_fields = self
            .layout
            .section(current)
            .map(|section| {
                section
                    .fields
                    .iter()
                    .map(|field| FieldView {
                        name: field.name,
                        label: field.label,
                        kind: field.kind,
                        required: field.required,
                        value: self.fields.get(field.name),
                    })
                    .collect()
            })
            .unwrap_or_default();

        WizardViewModel {
            current_step: current,
            total_steps: self.steps.total(),
            sections,
            progress_items: self.steps.progress_items(),
            progress_segments: self.steps.progress_segments(),
            navigation: self.steps.navigation(),
            submit_enabled: self.submit_enabled,
            submit_label: if self.in_flight {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            in_flight: self.in_flight,
            redirecting: self.redirect_pending,
            fields: active_fields,
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub(crate) fn steps_mut(&mut self) -> (&mut StepController, &FormLayout, &FormFields) {
        (&mut self.steps, &self.layout, &self.fields)
    }

    pub(crate) fn set_field(&mut self, name: String, value: String) {
        self.fields.set(name, value);
        self.mark_dirty();
    }

    pub(crate) fn begin_submission(&mut self) {
        self.in_flight = true;
        self.submit_enabled = false;
        self.mark_dirty();
    }

    pub(crate) fn finish_success(&mut self) {
        self.in_flight = false;
        self.submit_enabled = true;
        self.redirect_pending = true;
        self.fields.clear();
        self.steps.reset();
        self.mark_dirty();
    }

    pub(crate) fn finish_failure(&mut self) {
        self.in_flight = false;
        self.submit_enabled = true;
        self.mark_dirty();
    }
}
