use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crawlerx_core::{
    is_change_notice, Effect, JobSubmitted, LiveEvent, MountId, Msg, NotificationBus,
    RequestFailure, SubscriptionId,
};
use crawlerx_engine::{ApiError, EngineEvent, EngineHandle, FailureKind, FeedEvent};
use crawlerx_logging::{log_debug, log_error, log_info, log_warn};
use eframe::egui;

/// Carries out the effects `update` asks for: engine requests, bus
/// traffic and browser opens.
pub struct EffectRunner {
    engine: EngineHandle,
    bus: NotificationBus<JobSubmitted>,
    subscriptions: HashMap<MountId, SubscriptionId>,
    msg_tx: mpsc::Sender<Msg>,
    ctx: egui::Context,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>, ctx: egui::Context) -> Self {
        let runner = Self {
            engine,
            bus: NotificationBus::new(),
            subscriptions: HashMap::new(),
            msg_tx,
            ctx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CreateJob { mount, url } => {
                    log_info!("CreateJob mount={} url={}", mount, url);
                    self.engine.create_job(mount, url);
                }
                Effect::PublishJobSubmitted { job } => {
                    let delivered = self.bus.publish(&JobSubmitted { job });
                    log_debug!("JobSubmitted delivered to {} subscriber(s)", delivered);
                }
                Effect::FetchJobs { mount } => {
                    log_debug!("FetchJobs mount={}", mount);
                    self.engine.list_jobs(mount);
                }
                Effect::OpenLiveFeed { mount } => {
                    log_info!("OpenLiveFeed mount={}", mount);
                    self.engine.open_feed(mount);
                }
                Effect::CloseLiveFeed { mount } => {
                    log_info!("CloseLiveFeed mount={}", mount);
                    self.engine.close_feed(mount);
                }
                Effect::SubscribeJobSubmitted { mount } => self.subscribe(mount),
                Effect::UnsubscribeJobSubmitted { mount } => {
                    if let Some(id) = self.subscriptions.remove(&mount) {
                        self.bus.unsubscribe(id);
                    }
                }
                Effect::FetchJob { mount, job_id } => {
                    log_debug!("FetchJob mount={} id={}", mount, job_id);
                    self.engine.get_job(mount, job_id);
                }
                Effect::OpenExport { job_id, format } => {
                    match self.engine.export_url(&job_id, format) {
                        Ok(url) => self.open_in_browser(url.as_str()),
                        Err(err) => log_error!("Cannot build export link for {}: {}", job_id, err),
                    }
                }
                Effect::OpenUrl { url } => self.open_in_browser(&url),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn bus(&self) -> &NotificationBus<JobSubmitted> {
        &self.bus
    }

    fn subscribe(&mut self, mount: MountId) {
        let msg_tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        let id = self.bus.subscribe(move |event: &JobSubmitted| {
            let _ = msg_tx.send(Msg::JobSubmittedNotice {
                mount,
                job: event.job.clone(),
            });
            ctx.request_repaint();
        });
        if let Some(previous) = self.subscriptions.insert(mount, id) {
            self.bus.unsubscribe(previous);
        }
    }

    fn open_in_browser(&self, url: &str) {
        log_info!("Opening {} in browser", url);
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            forward_events(
                || engine.recv_timeout(EVENT_POLL),
                &msg_tx,
                || ctx.request_repaint(),
            );
        });
    }
}

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Relays engine events to the UI until either side goes away.
fn forward_events(
    mut next: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    msg_tx: &mpsc::Sender<Msg>,
    repaint: impl Fn(),
) {
    loop {
        let event = match next() {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                log_warn!("Engine event channel closed; no further updates");
                return;
            }
        };
        if msg_tx.send(map_event(event)).is_err() {
            return;
        }
        repaint();
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobCreated { ticket, result } => {
            if let Err(err) = &result {
                log_warn!("Create job failed: {}", err);
            }
            Msg::JobCreated {
                mount: ticket,
                result: result.map_err(map_failure),
            }
        }
        EngineEvent::JobsListed { ticket, result } => {
            if let Err(err) = &result {
                log_error!("Fetching jobs failed: {}", err);
            }
            Msg::JobsFetched {
                mount: ticket,
                result: result.map_err(map_failure),
            }
        }
        EngineEvent::JobLoaded {
            ticket,
            job_id,
            result,
        } => {
            if let Err(err) = &result {
                log_warn!("Loading job {} failed: {}", job_id, err);
            }
            Msg::JobFetched {
                mount: ticket,
                job_id,
                result: result.map_err(map_failure),
            }
        }
        EngineEvent::Feed { ticket, event } => Msg::LiveFeed {
            mount: ticket,
            event: map_feed_event(event),
        },
    }
}

fn map_feed_event(event: FeedEvent) -> LiveEvent {
    match event {
        FeedEvent::Opened => LiveEvent::Opened,
        FeedEvent::Message(text) => {
            if !is_change_notice(&text) {
                log_debug!("Ignoring live message without id and status: {}", text);
            }
            LiveEvent::Message(text)
        }
        FeedEvent::Error(message) => LiveEvent::Error(message),
        FeedEvent::Closed => LiveEvent::Closed,
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => RequestFailure::Status(code),
        _ => RequestFailure::Transport(err.message),
    }
}
