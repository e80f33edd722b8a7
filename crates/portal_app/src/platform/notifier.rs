use std::io::{self, BufRead, Write};

use dialoguer::console::{style, Term};
use portal_core::NotifyKind;
use portal_logging::{portal_error, portal_warn};

/// Where notifications are drawn.
pub trait NotificationSurface {
    /// Transient message. An error means toasts are unavailable.
    fn toast(&mut self, message: &str, kind: NotifyKind) -> io::Result<()>;
    /// Blocking message the user has to acknowledge.
    fn alert(&mut self, message: &str) -> io::Result<()>;
}

/// Shows user-facing notifications. Never fails: a surface error is logged and
/// the message falls back to an alert.
pub struct Notifier {
    surface: Box<dyn NotificationSurface>,
}

impl Notifier {
    pub fn new(surface: Box<dyn NotificationSurface>) -> Self {
        Self { surface }
    }

    pub fn terminal() -> Self {
        Self::new(Box::new(TerminalSurface {
            term: Term::stderr(),
        }))
    }

    pub fn notify(&mut self, message: &str, kind: NotifyKind) {
        let Err(err) = self.surface.toast(message, kind) else {
            return;
        };
        portal_warn!("toast unavailable ({}); showing alert", err);
        if let Err(err) = self.surface.alert(message) {
            portal_error!("failed to show notification: {}", err);
        }
    }
}

/// Toasts on stderr; alerts on stdout, waiting for Enter on stdin.
pub struct TerminalSurface {
    term: Term,
}

impl NotificationSurface for TerminalSurface {
    fn toast(&mut self, message: &str, kind: NotifyKind) -> io::Result<()> {
        if !self.term.is_term() {
            return Err(io::Error::other("stderr is not a terminal"));
        }
        let badge = match kind {
            NotifyKind::Info => style(" INFO ").on_blue().white().bold(),
            NotifyKind::Success => style("  OK  ").on_green().black().bold(),
            NotifyKind::Error => style(" ERR  ").on_red().white().bold(),
        };
        self.term.write_line(&format!("{badge} {message}"))
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "\n[!] {message}")?;
        write!(out, "Press Enter to continue...")?;
        out.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::recording_notifier;

    #[test]
    fn toast_is_preferred() {
        let (mut notifier, seen) = recording_notifier(true, true);
        notifier.notify("Saved", NotifyKind::Success);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.toasts, vec![("Saved".to_string(), NotifyKind::Success)]);
        assert!(seen.alerts.is_empty());
    }

    #[test]
    fn falls_back_to_alert_with_same_message() {
        let (mut notifier, seen) = recording_notifier(false, true);
        notifier.notify("Please fill in: Full Name", NotifyKind::Error);
        let seen = seen.lock().unwrap();
        assert!(seen.toasts.is_empty());
        assert_eq!(seen.alerts, vec!["Please fill in: Full Name".to_string()]);
    }

    #[test]
    fn total_failure_does_not_panic() {
        let (mut notifier, seen) = recording_notifier(false, false);
        notifier.notify("lost", NotifyKind::Info);
        let seen = seen.lock().unwrap();
        assert!(seen.toasts.is_empty());
        assert!(seen.alerts.is_empty());
    }
}
