use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use crossbeam_channel::Receiver;
use log::{info, warn};

use mandelbrot_explorer::{ChannelPresenter, ExplorerConfig, RenderCoordinator, RenderEvent, ViewCommand};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Drives a short headless exploration: the reset view, a zoom towards the
/// seahorse valley, a pan and an iteration bump.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = ExplorerConfig::default();
    let pivot = (f64::from(config.width) * 0.3, f64::from(config.height) * 0.4);
    let iteration_step = i64::from(config.iteration_step);

    let (presenter, events) = ChannelPresenter::new();
    let mut coordinator =
        RenderCoordinator::new(config, Arc::new(presenter)).context("failed to start the render coordinator")?;

    settle(&mut coordinator, &events)?;

    for _ in 0..4 {
        coordinator.apply(ViewCommand::ZoomInAt { pivot })?;
    }
    coordinator.apply(ViewCommand::Pan { dx: 40.0, dy: -25.0 })?;
    coordinator.apply(ViewCommand::SetMaxIterations { delta: iteration_step })?;
    settle(&mut coordinator, &events)?;

    let progressive = coordinator.snapshot();
    let reference = coordinator.render_blocking().context("reference render failed")?;
    if progressive.pixels != reference.pixels {
        warn!("progressive frame differs from the reference render");
    }

    coordinator.shutdown();
    info!("done");

    Ok(())
}

fn settle(coordinator: &mut RenderCoordinator, events: &Receiver<RenderEvent>) -> anyhow::Result<()> {
    if !coordinator.wait_until_idle(SETTLE_TIMEOUT)? {
        bail!("generation {} did not settle within {:?}", coordinator.generation(), SETTLE_TIMEOUT);
    }

    let mut tiles = 0;
    for event in events.try_iter() {
        match event {
            RenderEvent::TileCompleted { .. } => tiles += 1,
            RenderEvent::FrameCompleted { generation, duration, .. } => {
                info!("generation {} completed in {:?}", generation, duration);
            }
            RenderEvent::Cancelled { generation } => info!("generation {} cancelled", generation),
            RenderEvent::Fault { generation, message } => {
                bail!("generation {} faulted: {}", generation, message);
            }
        }
    }

    info!("{} ({} tiles landed)", coordinator.status_line(), tiles);
    Ok(())
}
