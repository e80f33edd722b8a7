use crate::form::FieldKind;
use crate::step::NavigationView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub step: usize,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardViewModel {
    pub current_step: usize,
    pub total_steps: usize,
    pub sections: Vec<SectionView>,
    /// Progress indicator items; `true` once reached.
    pub progress_items: Vec<bool>,
    /// Lines between indicator items; `true` once completed.
    pub progress_segments: Vec<bool>,
    pub navigation: NavigationView,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub in_flight: bool,
    pub redirecting: bool,
    /// Fields of the active section with their current values.
    pub fields: Vec<FieldView>,
    pub dirty: bool,
}

impl WizardViewModel {
    pub fn active_section(&self) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.active)
    }
}
