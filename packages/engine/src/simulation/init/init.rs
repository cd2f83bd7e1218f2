use crate::core::EngineError;
use crate::domain::{EngineConfig, PatternLibrary};
use crate::spatial::{LifeGrid, StepStats};
use crate::systems::{PatternStamp, Preview, SimulationClock, StepRate, ViewportCamera};

use super::perf_stats::PerfStats;
use super::{InputState, RenderBuffers, SimulationCore};

pub(super) fn create_simulation_core(
    config: EngineConfig,
    library: PatternLibrary,
) -> Result<SimulationCore, EngineError> {
    config.validate()?;

    let camera = ViewportCamera::new(&config);
    let (plane_width, plane_height) = camera.buffer_size();

    let core = SimulationCore {
        grid: LifeGrid::new(),
        clock: SimulationClock::new(config.max_backlog_steps),
        stamp: PatternStamp::new(library),
        preview: Preview::default(),
        rate: StepRate::new(config.rate_hz)?,

        running: false,
        auto_pause: config.auto_pause,
        stroke_interpolation: config.stroke_interpolation,
        input: InputState::default(),
        last_timestamp: None,

        last_step: StepStats::default(),
        stepped_last_tick: false,
        visible: 0,
        visible_left: 0,
        visible_right: 0,

        render: RenderBuffers {
            age_plane: vec![0u8; plane_width as usize * plane_height as usize],
            plane_written: Vec::new(),
            plane_width,
            plane_height,
            cell_transfer: Vec::new(),
            preview_transfer: Vec::new(),
        },

        perf_enabled: config.perf_metrics,
        perf_stats: PerfStats::default(),

        camera,
        config,
    };

    log::info!(
        "simulation ready: {}x{} buffer, {} Hz, {} patterns",
        plane_width,
        plane_height,
        core.rate.hz(),
        core.stamp.library().len()
    );
    Ok(core)
}
