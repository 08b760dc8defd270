use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::info;

use crate::config::AppConfig;
use crate::scoreboard::{self, PageWriter, ScoreBoard};

pub struct SchedulerContext {
    pub config: AppConfig,
    pub board: Mutex<ScoreBoard>,
    pub page: PageWriter,
}

impl SchedulerContext {
    pub fn new(config: AppConfig) -> Self {
        let board = Mutex::new(ScoreBoard::new(config.recent_games_limit));
        let page = PageWriter::new(&config.output_dir, config.scheduler.interval_secs);
        Self {
            config,
            board,
            page,
        }
    }
}

/// Polls once immediately, then on every interval tick.
///
/// With the scheduler disabled only the initial poll runs, and the
/// returned handle completes once it has been rendered.
pub fn spawn_scheduler(ctx: Arc<SchedulerContext>) -> JoinHandle<()> {
    if !ctx.config.scheduler.enabled {
        info!("Scheduler is disabled in configuration, polling once");
        return tokio::spawn(async move { poll(ctx).await });
    }

    let interval_secs = ctx.config.scheduler.interval_secs;
    info!(interval_secs, source = %ctx.config.source, "Starting scores poller");

    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            // Fire and forget: a slow poll never delays the next tick.
            tokio::spawn(poll(ctx.clone()));
        }
    })
}

async fn poll(ctx: Arc<SchedulerContext>) {
    scoreboard::load_scores(&ctx.config.source, &ctx.board, &ctx.page).await;
}
