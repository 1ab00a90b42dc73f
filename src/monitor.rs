use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::metrics::collector::SiteStats;
use crate::metrics::snapshot::SiteSnapshot;
use crate::output::RenderSink;
use crate::poller::Poller;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

type SharedSink = Arc<Mutex<Box<dyn RenderSink>>>;

#[derive(Default)]
struct Tasks {
    pollers: Vec<JoinHandle<()>>,
    render: Option<JoinHandle<()>>,
}

/// Owns one [`SiteStats`] per URL, the pollers feeding them and the
/// periodic render task.
pub struct Monitor {
    config: MonitorConfig,
    sites: Vec<Arc<SiteStats>>,
    client: Client,
    sink: SharedSink,
    cancel: CancellationToken,
    tasks: Mutex<Tasks>,
    state_watcher: watch::Sender<MonitorState>,
}

impl Monitor {
    pub fn new(config: MonitorConfig, sink: Box<dyn RenderSink>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        let sites = config
            .urls
            .iter()
            .map(|url| Arc::new(SiteStats::new(url.as_str(), config.interval())))
            .collect();

        let (state_tx, _) = watch::channel(MonitorState::Idle);

        Ok(Self {
            config,
            sites,
            client,
            sink: Arc::new(Mutex::new(sink)),
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Tasks::default()),
            state_watcher: state_tx,
        })
    }

    /// Spawns one poller per URL plus the render ticker.
    pub async fn start(&self) -> Result<()> {
        let mut tasks = self.tasks.lock().await;
        if self.state() != MonitorState::Idle {
            return Err(Error::AlreadyStarted);
        }

        log::info!(
            "Monitoring {} URL(s) every {:?} (timeout {:?})",
            self.sites.len(),
            self.config.interval(),
            self.config.timeout()
        );

        for site in &self.sites {
            let poller = Poller::new(site.clone(), self.client.clone());
            tasks
                .pollers
                .push(tokio::spawn(poller.run(self.cancel.child_token())));
        }

        tasks.render = Some(tokio::spawn(render_loop(
            self.sites.clone(),
            self.sink.clone(),
            self.config.refresh(),
            self.cancel.child_token(),
        )));

        self.set_state(MonitorState::Running);
        Ok(())
    }

    /// Stops polling, waits for in-flight requests to be recorded and then
    /// renders the final frame without clearing the screen.
    pub async fn stop(&self) -> Result<()> {
        let mut tasks = self.tasks.lock().await;
        if self.state() == MonitorState::Stopped {
            return Ok(());
        }

        log::info!("Stopping monitor, waiting for in-flight requests");
        self.cancel.cancel();

        if let Some(render) = tasks.render.take() {
            if let Err(e) = render.await {
                log::error!("Render task ended abnormally: {}", e);
            }
        }

        for result in join_all(tasks.pollers.drain(..)).await {
            if let Err(e) = result {
                log::error!("Poller task ended abnormally: {}", e);
            }
        }

        self.set_state(MonitorState::Stopped);

        let rows = self.snapshot().await;
        self.sink.lock().await.render(&rows, false).await
    }

    /// Current statistics, in the order the URLs were given.
    pub async fn snapshot(&self) -> Vec<SiteSnapshot> {
        collect_snapshots(&self.sites).await
    }

    pub fn sites(&self) -> &[Arc<SiteStats>] {
        &self.sites
    }

    pub fn state(&self) -> MonitorState {
        *self.state_watcher.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<MonitorState> {
        self.state_watcher.subscribe()
    }

    fn set_state(&self, state: MonitorState) {
        self.state_watcher.send_replace(state);
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn collect_snapshots(sites: &[Arc<SiteStats>]) -> Vec<SiteSnapshot> {
    join_all(sites.iter().map(|site| site.snapshot())).await
}

async fn render_loop(
    sites: Vec<Arc<SiteStats>>,
    sink: SharedSink,
    refresh: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + refresh, refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let rows = collect_snapshots(&sites).await;
                if let Err(e) = sink.lock().await.render(&rows, true).await {
                    log::warn!("Failed to render statistics: {}", e);
                }
            }
        }
    }
}
