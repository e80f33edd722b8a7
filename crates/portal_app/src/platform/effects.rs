use std::io::Write;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use portal_core::{Effect, Msg, Page};
use portal_engine::{EngineEvent, EngineHandle, EventSink, SubmissionPort};
use portal_logging::{portal_debug, portal_info, portal_warn};

use super::notifier::Notifier;
use super::ui::render;

/// Feeds engine completions back into the update loop.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::SubmissionCompleted(result) => {
                if self.tx.send(Msg::SubmissionFinished(result)).is_err() {
                    portal_warn!("submission finished after the wizard closed");
                }
            }
        }
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(port: Arc<dyn SubmissionPort>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let sink = Arc::new(MsgSink { tx: msg_tx.clone() });
        Self {
            engine: EngineHandle::new(port, sink),
            msg_tx,
        }
    }

    /// Executes effects in order. Returns the page to open when one of them navigates away.
    pub fn run(
        &self,
        effects: Vec<Effect>,
        notifier: &mut Notifier,
        out: &mut dyn Write,
    ) -> Option<Page> {
        let mut destination = None;
        for effect in effects {
            match effect {
                Effect::Notify { message, kind } => notifier.notify(&message, kind),
                Effect::SubmitApplication { record } => {
                    portal_info!(
                        "SubmitApplication fields={}",
                        record.keys().collect::<Vec<_>>().join(",")
                    );
                    self.engine.submit(record);
                }
                Effect::Celebrate => {
                    if let Err(err) = write!(out, "{}", render::celebration()) {
                        portal_debug!("celebration not shown: {}", err);
                    }
                }
                Effect::Schedule { delay, msg } => schedule(delay, self.msg_tx.clone(), *msg),
                Effect::Navigate { page } => {
                    portal_info!("Navigate page={}", page.as_str());
                    destination = Some(page);
                }
            }
        }
        destination
    }
}

/// Delivers `value` on `tx` after `delay` without blocking the caller.
pub fn schedule<T: Send + 'static>(delay: Duration, tx: mpsc::Sender<T>, value: T) {
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = tx.send(value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::recording_notifier;
    use portal_core::{ApplicationRecord, FormFields, NotifyKind, SubmissionResult};
    use std::time::Instant;

    struct EchoPort;

    #[async_trait::async_trait]
    impl SubmissionPort for EchoPort {
        async fn submit(&self, record: &ApplicationRecord) -> SubmissionResult {
            SubmissionResult::Success {
                message: format!("{} fields", record.len()),
            }
        }
    }

    #[test]
    fn scheduled_message_arrives_after_delay() {
        let (tx, rx) = mpsc::channel();
        let started = Instant::now();
        schedule(Duration::from_millis(50), tx, Msg::RedirectDue);
        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(msg, Msg::RedirectDue);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn submission_completion_comes_back_as_msg() {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(Arc::new(EchoPort), tx);
        let (mut notifier, seen) = recording_notifier(true, true);
        let mut out = Vec::new();

        let record = ApplicationRecord::assemble(&FormFields::from([("fullName", "Asha")]));
        let destination = runner.run(
            vec![
                Effect::Notify {
                    message: "Submitting".to_string(),
                    kind: NotifyKind::Info,
                },
                Effect::SubmitApplication { record },
                Effect::Celebrate,
            ],
            &mut notifier,
            &mut out,
        );

        assert_eq!(destination, None);
        assert_eq!(seen.lock().unwrap().messages(), vec!["Submitting"]);
        assert!(String::from_utf8(out).unwrap().contains("Application sent!"));
        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            msg,
            Msg::SubmissionFinished(SubmissionResult::Success {
                message: "1 fields".to_string()
            })
        );
    }

    #[test]
    fn navigate_is_returned_to_the_caller() {
        let (tx, _rx) = mpsc::channel();
        let runner = EffectRunner::new(Arc::new(EchoPort), tx);
        let (mut notifier, _seen) = recording_notifier(true, true);
        let destination = runner.run(
            vec![Effect::Navigate { page: Page::Home }],
            &mut notifier,
            &mut Vec::new(),
        );
        assert_eq!(destination, Some(Page::Home));
    }
}
