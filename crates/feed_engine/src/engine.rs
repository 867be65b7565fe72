use std::sync::{mpsc, Arc};
use std::thread;

use feed_core::FeedViewModel;
use feed_logging::{feed_debug, feed_info};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::controller::FeedController;
use crate::fetch::{FetchSettings, PageFetcher, ReqwestFetcher};
use crate::{ApiKey, EngineError};

enum EngineCommand {
    Advance,
    Shutdown,
}

/// Runs a [`FeedController`] on a background runtime for a synchronous UI
/// thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    snapshots: watch::Receiver<FeedViewModel>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, api_key: ApiKey, page_size: u32) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        Self::with_fetcher(fetcher, api_key, page_size)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher>,
        api_key: ApiKey,
        page_size: u32,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let controller = Arc::new(FeedController::new(fetcher, api_key, page_size));
        let snapshots = controller.subscribe();
        let shutdown = CancellationToken::new();
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let token = shutdown.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Advance => {
                        let controller = controller.clone();
                        let token = token.clone();
                        runtime.spawn(async move {
                            let outcome = controller.advance_with_cancel(&token).await;
                            feed_debug!("advance finished: {:?}", outcome);
                        });
                    }
                    EngineCommand::Shutdown => break,
                }
            }
            token.cancel();
            feed_info!("feed engine stopped");
        });

        Ok(Self {
            cmd_tx,
            snapshots,
            shutdown,
        })
    }

    /// Ask for the next page. Ignored by the controller while one is loading.
    pub fn advance(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Advance);
    }

    /// Returns the latest snapshot if it changed since the last call.
    pub fn try_recv(&mut self) -> Option<FeedViewModel> {
        match self.snapshots.has_changed() {
            Ok(true) => Some(self.snapshots.borrow_and_update().clone()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> FeedViewModel {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedViewModel> {
        self.snapshots.clone()
    }

    /// Cancels any fetch in flight and stops the background thread.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
