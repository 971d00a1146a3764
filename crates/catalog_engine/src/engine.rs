use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_warn};

use crate::fetch::{DetailLookup, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{ApiEndpoints, EngineEvent, RequestId};

enum EngineCommand {
    FetchCollection { request: RequestId },
    FetchDetail { request: RequestId, id: String },
}

/// Runs fetches on a background tokio runtime and reports completions over a
/// channel. Each command is independent; nothing is coalesced or cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(endpoints: ApiEndpoints, settings: FetchSettings, lookup: DetailLookup) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(endpoints, settings, lookup)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start fetch runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_collection(&self, request: RequestId) {
        self.send(EngineCommand::FetchCollection { request });
    }

    pub fn fetch_detail(&self, request: RequestId, id: impl Into<String>) {
        self.send(EngineCommand::FetchDetail {
            request,
            id: id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completion.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Fetch engine is not running; command dropped");
        }
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchCollection { request } => EngineEvent::CollectionFetched {
            request,
            result: fetcher.fetch_collection().await,
        },
        EngineCommand::FetchDetail { request, id } => {
            let result = fetcher.fetch_detail(&id).await;
            EngineEvent::DetailFetched {
                request,
                id,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
