use portal_logging::portal_debug;

use crate::form::FormLayout;
use crate::validate::{validate_section, FieldSource, ValidationError};

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(usize),
    Retreated(usize),
    Blocked(ValidationError),
    /// Already on the first (prev) or terminal (next) step.
    AtBoundary,
}

/// Which navigation controls are visible for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationView {
    pub show_prev: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

/// Owns the current step of a wizard and the section currently shown.
///
/// The step only moves by one per transition; forward moves are gated by
/// validation of the section being left, backward moves never are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepController {
    current: usize,
    total: usize,
    shown: Option<usize>,
}

impl StepController {
    pub fn new(total: usize) -> Self {
        let mut controller = Self {
            current: 1,
            total,
            shown: None,
        };
        controller.show(1);
        controller
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.total
    }

    /// Activates the section bound to `step`. Steps without a section are ignored.
    pub fn show(&mut self, step: usize) {
        if step == 0 || step > self.total {
            portal_debug!("show({step}) ignored: no section for step");
            return;
        }
        self.shown = Some(step);
    }

    pub fn next(&mut self, layout: &FormLayout, source: &dyn FieldSource) -> StepOutcome {
        if let Some(section) = layout.section(self.current) {
            if let Err(err) = validate_section(section, source) {
                return StepOutcome::Blocked(err);
            }
        }
        if self.current >= self.total {
            return StepOutcome::AtBoundary;
        }
        self.current += 1;
        self.show(self.current);
        StepOutcome::Advanced(self.current)
    }

    pub fn prev(&mut self) -> StepOutcome {
        if self.current <= 1 {
            return StepOutcome::AtBoundary;
        }
        self.current -= 1;
        self.show(self.current);
        StepOutcome::Retreated(self.current)
    }

    pub fn reset(&mut self) {
        self.current = 1;
        self.show(1);
    }

    /// Per-section active flags; at most one is set.
    pub fn section_flags(&self) -> Vec<bool> {
        (1..=self.total).map(|step| self.shown == Some(step)).collect()
    }

    /// Progress items `1..=step` are reached.
    pub fn progress_items(&self) -> Vec<bool> {
        let step = self.shown.unwrap_or(self.current);
        (1..=self.total).map(|item| item <= step).collect()
    }

    /// Connecting segment `i` (between items `i` and `i + 1`) is completed when `i < step`.
    pub fn progress_segments(&self) -> Vec<bool> {
        let step = self.shown.unwrap_or(self.current);
        (1..self.total).map(|segment| segment < step).collect()
    }

    pub fn navigation(&self) -> NavigationView {
        NavigationView {
            show_prev: self.current > 1,
            show_next: self.current < self.total,
            show_submit: self.current == self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_section() {
        let controller = StepController::new(5);
        assert_eq!(controller.current(), 1);
        assert_eq!(
            controller.section_flags(),
            vec![true, false, false, false, false]
        );
        assert_eq!(controller.progress_segments(), vec![false; 4]);
    }

    #[test]
    fn show_out_of_range_is_noop() {
        let mut controller = StepController::new(3);
        controller.show(2);
        let before = controller.clone();

        controller.show(0);
        controller.show(4);

        assert_eq!(controller, before);
    }

    #[test]
    fn prev_never_goes_below_one() {
        let mut controller = StepController::new(3);
        assert_eq!(controller.prev(), StepOutcome::AtBoundary);
        assert_eq!(controller.current(), 1);
    }
}
