use crate::core::EngineError;
use crate::systems::StepRate;

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn set_running(sim: &mut SimulationCore, running: bool) {
    if sim.running == running {
        return;
    }
    sim.running = running;
    // Time spent paused must not count toward the next step.
    if let Some(ts) = sim.last_timestamp {
        sim.clock.observe(ts);
    }
    log::debug!("running = {running}");
}

pub(super) fn set_rate(sim: &mut SimulationCore, hz: f64) -> Result<(), EngineError> {
    sim.rate = StepRate::new(hz)?;
    sim.config.rate_hz = hz;
    Ok(())
}

pub(super) fn set_auto_pause(sim: &mut SimulationCore, enabled: bool) {
    sim.auto_pause = enabled;
    sim.config.auto_pause = enabled;
}

pub(super) fn set_stroke_interpolation(sim: &mut SimulationCore, enabled: bool) {
    sim.stroke_interpolation = enabled;
    sim.config.stroke_interpolation = enabled;
}

pub(super) fn enable_perf_metrics(sim: &mut SimulationCore, enabled: bool) {
    sim.perf_enabled = enabled;
    sim.config.perf_metrics = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &SimulationCore) -> PerfStats {
    sim.perf_stats.clone()
}

pub(super) fn config_json(sim: &SimulationCore) -> String {
    sim.config.to_json()
}
