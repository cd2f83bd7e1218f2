use crate::core::EngineError;
use crate::spatial::StepStats;

use super::perf_timer::{elapsed_or_zero, PerfTimer};
use super::{commands, render_extract, SimulationCore};

pub(super) fn tick(sim: &mut SimulationCore, timestamp_ms: f64) -> Result<(), EngineError> {
    if !timestamp_ms.is_finite() {
        return Err(EngineError::NonFiniteInput("frame timestamp"));
    }
    let perf = sim.perf_enabled;
    let tick_timer = PerfTimer::start_if(perf);

    let dt_ms = match sim.last_timestamp.replace(timestamp_ms) {
        Some(prev) => (timestamp_ms - prev).max(0.0),
        None => 0.0,
    };

    // 1. camera
    let t = PerfTimer::start_if(perf);
    if sim.camera.tick(dt_ms) {
        render_extract::resize_plane(sim);
    }
    let camera_ms = elapsed_or_zero(t);

    // 2. input
    let t = PerfTimer::start_if(perf);
    let input_result = commands::flush_drag(sim).and(commands::flush_strokes(sim));
    let input_ms = elapsed_or_zero(t);

    // 3. at most one generation
    let t = PerfTimer::start_if(perf);
    sim.stepped_last_tick = false;
    if sim.running {
        if sim.clock.should_step(timestamp_ms, sim.rate) {
            step_generation(sim);
            sim.stepped_last_tick = true;
        }
    } else {
        sim.clock.observe(timestamp_ms);
    }
    let step_ms = elapsed_or_zero(t);

    // 4. render
    let t = PerfTimer::start_if(perf);
    render_extract::extract_frame(sim);
    let render_ms = elapsed_or_zero(t);

    if perf {
        let stats = &mut sim.perf_stats;
        stats.camera_ms = camera_ms;
        stats.input_ms = input_ms;
        stats.step_ms = step_ms;
        stats.render_ms = render_ms;
        stats.tally_entries = sim.grid.last_tally_len() as u32;
        stats.live_cells = sim.grid.len() as u32;
        stats.visible_cells = sim.visible;
        stats.tick_ms = elapsed_or_zero(tick_timer);
    }

    input_result
}

pub(super) fn step_generation(sim: &mut SimulationCore) -> StepStats {
    let stats = sim.grid.step();
    sim.last_step = stats;
    log::trace!(
        "generation {}: {} births, {} survivors, {} alive",
        sim.grid.generation(),
        stats.births,
        stats.survivors,
        sim.grid.len()
    );
    stats
}
