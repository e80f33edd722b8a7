use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use portal_core::{ApplicationRecord, FormFields, SubmissionResult};
use portal_engine::{ChannelEventSink, EngineEvent, EngineHandle, SubmissionPort};

struct CountingPort {
    calls: AtomicUsize,
    outcome: SubmissionResult,
}

#[async_trait::async_trait]
impl SubmissionPort for CountingPort {
    async fn submit(&self, record: &ApplicationRecord) -> SubmissionResult {
        assert_eq!(record.get("fullName"), Some("Asha Verma"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.outcome.clone()
    }
}

fn record() -> ApplicationRecord {
    ApplicationRecord::assemble(&FormFields::from([("fullName", "Asha Verma")]))
}

fn start(outcome: SubmissionResult) -> (EngineHandle, Arc<CountingPort>, mpsc::Receiver<EngineEvent>) {
    let port = Arc::new(CountingPort {
        calls: AtomicUsize::new(0),
        outcome,
    });
    let (tx, rx) = mpsc::channel();
    let handle = EngineHandle::new(port.clone(), Arc::new(ChannelEventSink::new(tx)));
    (handle, port, rx)
}

#[test]
fn submission_reports_exactly_one_completion() {
    let success = SubmissionResult::Success {
        message: "Application received".to_string(),
    };
    let (engine, port, rx) = start(success.clone());

    engine.submit(record());

    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");
    assert_eq!(event, EngineEvent::SubmissionCompleted(success));
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(port.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failure_outcome_is_forwarded() {
    let failure = SubmissionResult::Failure {
        message: "Server exploded".to_string(),
    };
    let (engine, _port, rx) = start(failure.clone());

    engine.submit(record());

    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");
    assert_eq!(event, EngineEvent::SubmissionCompleted(failure));
}
