use std::sync::{mpsc, Arc};
use std::thread;

use portal_core::{ApplicationRecord, SubmissionResult};
use portal_logging::{portal_error, portal_info};

use crate::SubmissionPort;

enum EngineCommand {
    Submit { record: ApplicationRecord },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted(SubmissionResult),
}

/// Receives engine events on the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs boundary calls on a background tokio runtime so the UI thread never blocks.
///
/// Every submitted record produces exactly one `SubmissionCompleted` event. Requests are
/// neither queued beyond the command channel nor cancellable once sent.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(port: Arc<dyn SubmissionPort>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    portal_error!("failed to start engine runtime: {}", err);
                    while let Ok(EngineCommand::Submit { .. }) = cmd_rx.recv() {
                        sink.emit(EngineEvent::SubmissionCompleted(
                            SubmissionResult::Failure {
                                message: format!("Engine unavailable: {err}"),
                            },
                        ));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let port = port.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(port.as_ref(), command, sink.as_ref()).await;
                });
            }
        });

        Self { cmd_tx }
    }

    pub fn submit(&self, record: ApplicationRecord) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { record });
    }
}

async fn handle_command(port: &dyn SubmissionPort, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Submit { record } => {
            portal_info!("sending application ({} fields)", record.len());
            let result = port.submit(&record).await;
            sink.emit(EngineEvent::SubmissionCompleted(result));
        }
    }
}
