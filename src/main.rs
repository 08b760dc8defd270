mod api;
mod config;
mod html;
mod logging;
mod scheduler;
mod scoreboard;
mod util;

use std::sync::Arc;

use tracing::info;

use crate::scheduler::SchedulerContext;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cfg = config::load_config()?;

    logging::init(&cfg.log)?;
    info!("Logging Initialised. Initialising roulette scoreboard");

    let scheduler_enabled = cfg.scheduler.enabled;
    let ctx = Arc::new(SchedulerContext::new(cfg));
    info!(
        source = %ctx.config.source,
        page = %ctx.page.index_path().display(),
        "Setup complete. Rendering scoreboard"
    );

    let poller = scheduler::spawn_scheduler(ctx);

    if !scheduler_enabled {
        poller.await?;
        return Ok(());
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down scoreboard poller");
    poller.abort();

    Ok(())
}
