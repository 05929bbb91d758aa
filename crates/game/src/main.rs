//! Headless host for OpenSky: flies a scripted route over the streamed
//! world and logs the instruments.

use anyhow::{Context, Result};
use game::autopilot::Autopilot;
use game::hud::CONTROLS_HINT;
use game::{GameConfig, Simulation};
use renderer::HeadlessScene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("OpenSky (headless)");
    println!("  {}", CONTROLS_HINT);

    let config = GameConfig::load();
    config.validate().context("invalid config.ron")?;

    let mut sim = Simulation::new(&config, HeadlessScene::new());

    // One idle frame so the world is resident before takeoff.
    let report = sim.tick(config.frame_delta)?;
    log::info!("world ready: {} chunks, {} meshes", report.resident, sim.scene().live_count());

    sim.start();
    let mut autopilot = Autopilot::default();
    let frames = (config.demo_seconds / config.frame_delta).ceil() as u64;
    let mut loaded = 0;
    let mut evicted = 0;

    for frame in 0..frames {
        let time = frame as f64 * config.frame_delta;
        autopilot.apply(time, sim.input_mut());
        let report = sim.tick(config.frame_delta)?;
        loaded += report.loaded;
        evicted += report.evicted;

        if config.hud_interval_frames > 0 && frame % config.hud_interval_frames as u64 == 0 {
            log::info!("[{:6.2}s] {}", time, sim.hud());
        }
    }

    log::info!(
        "flight over after {} frames: {} chunks streamed in, {} out, {} generated total",
        sim.frame_count(),
        loaded,
        evicted,
        sim.world().generated_total()
    );

    sim.reset();
    let report = sim.tick(config.frame_delta)?;
    log::info!(
        "after reset: flushed {}, loaded {}, {} resident, {}",
        report.flushed,
        report.loaded,
        report.resident,
        sim.hud()
    );

    let released = sim.shutdown()?;
    let scene = sim.scene();
    log::info!(
        "shutdown: released {} chunks, {} meshes uploaded / {} released",
        released,
        scene.uploaded(),
        scene.released()
    );

    Ok(())
}
