use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crawlerx_core::ExportFormat;
use crawlerx_logging::{log_debug, log_error, log_info};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::{CrawlApi, ReqwestCrawlApi};
use crate::live::{run_live_feed, ChannelFeedSink, FeedSink};
use crate::{ApiError, ApiSettings, EngineEvent, FeedEvent, Ticket};

enum EngineCommand {
    CreateJob { ticket: Ticket, url: String },
    ListJobs { ticket: Ticket },
    GetJob { ticket: Ticket, job_id: String },
    OpenFeed { ticket: Ticket },
    CloseFeed { ticket: Ticket },
}

/// Front door to the I/O worker. Commands are queued to a dedicated thread
/// running a tokio runtime; results come back as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    settings: ApiSettings,
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn CrawlApi> = Arc::new(ReqwestCrawlApi::new(settings.clone())?);
        Ok(Self::with_api(settings, api))
    }

    /// Uses `api` for HTTP; the live feed still follows `settings`.
    pub fn with_api(settings: ApiSettings, api: Arc<dyn CrawlApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let feed_url = settings.live_feed_url();

        thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log_error!("Engine could not start its runtime: {}", err);
                    return;
                }
            };
            let mut feed: Option<FeedTask> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::OpenFeed { ticket } => {
                        // One feed at a time; the old one is fully shut first.
                        if let Some(previous) = feed.take() {
                            previous.shutdown(&runtime);
                        }
                        feed = open_feed(&runtime, ticket, &feed_url, &event_tx);
                    }
                    EngineCommand::CloseFeed { ticket } => {
                        if feed.as_ref().is_some_and(|task| task.ticket == ticket) {
                            if let Some(task) = feed.take() {
                                task.shutdown(&runtime);
                            }
                        }
                    }
                    request => {
                        let api = Arc::clone(&api);
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_request(api.as_ref(), request, event_tx).await;
                        });
                    }
                }
            }

            if let Some(task) = feed.take() {
                task.shutdown(&runtime);
            }
            log_debug!("Engine command channel closed; worker exiting");
        });

        Self {
            settings,
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn create_job(&self, ticket: Ticket, url: impl Into<String>) {
        self.send(EngineCommand::CreateJob {
            ticket,
            url: url.into(),
        });
    }

    pub fn list_jobs(&self, ticket: Ticket) {
        self.send(EngineCommand::ListJobs { ticket });
    }

    pub fn get_job(&self, ticket: Ticket, job_id: impl Into<String>) {
        self.send(EngineCommand::GetJob {
            ticket,
            job_id: job_id.into(),
        });
    }

    pub fn open_feed(&self, ticket: Ticket) {
        self.send(EngineCommand::OpenFeed { ticket });
    }

    /// Closes the feed only if it still belongs to `ticket`.
    pub fn close_feed(&self, ticket: Ticket) {
        self.send(EngineCommand::CloseFeed { ticket });
    }

    pub fn export_url(&self, job_id: &str, format: ExportFormat) -> Result<Url, ApiError> {
        self.settings.export_url(job_id, format)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.receiver().try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// worker has stopped and nothing further will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        self.receiver().recv_timeout(timeout)
    }

    fn receiver(&self) -> std::sync::MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            log_error!("Engine worker is gone; command dropped");
        }
    }
}

struct FeedTask {
    ticket: Ticket,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl FeedTask {
    fn shutdown(self, runtime: &Runtime) {
        self.token.cancel();
        if let Err(err) = runtime.block_on(self.handle) {
            log_error!("Live feed task for ticket {} ended abnormally: {}", self.ticket, err);
        }
    }
}

fn open_feed(
    runtime: &Runtime,
    ticket: Ticket,
    feed_url: &Result<Url, ApiError>,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Option<FeedTask> {
    let sink = ChannelFeedSink::new(ticket, event_tx.clone());
    let url = match feed_url {
        Ok(url) => url.clone(),
        Err(err) => {
            log_error!("Live feed unavailable: {}", err);
            sink.emit(FeedEvent::Error(err.to_string()));
            return None;
        }
    };
    log_info!("Opening live feed for ticket {}", ticket);
    let token = CancellationToken::new();
    let shutdown = token.clone();
    let handle = runtime.spawn(async move {
        run_live_feed(url, &sink, shutdown).await;
    });
    Some(FeedTask {
        ticket,
        token,
        handle,
    })
}

async fn handle_request(api: &dyn CrawlApi, command: EngineCommand, event_tx: mpsc::Sender<EngineEvent>) {
    let event = match command {
        EngineCommand::CreateJob { ticket, url } => EngineEvent::JobCreated {
            ticket,
            result: api.create_job(&url).await,
        },
        EngineCommand::ListJobs { ticket } => EngineEvent::JobsListed {
            ticket,
            result: api.list_jobs().await,
        },
        EngineCommand::GetJob { ticket, job_id } => {
            let result = api.get_job(&job_id).await;
            EngineEvent::JobLoaded {
                ticket,
                job_id,
                result,
            }
        }
        EngineCommand::OpenFeed { .. } | EngineCommand::CloseFeed { .. } => return,
    };
    let _ = event_tx.send(event);
}
