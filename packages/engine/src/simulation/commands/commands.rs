use crate::core::EngineError;
use crate::domain::{Intent, PatternLibrary};

use super::{SimulationCore, StrokeSample};

fn ensure_finite(sx: f64, sy: f64, what: &'static str) -> Result<(), EngineError> {
    if sx.is_finite() && sy.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteInput(what))
    }
}

pub(super) fn pointer_move(sim: &mut SimulationCore, sx: f64, sy: f64) -> Result<(), EngineError> {
    ensure_finite(sx, sy, "pointer position")?;

    if let Some((ax, ay)) = sim.input.drag {
        sim.input.pending_drag.0 += sx - ax;
        sim.input.pending_drag.1 += sy - ay;
        sim.input.drag = Some((sx, sy));
    }

    if let Some(intent) = sim.input.stroke {
        sim.input.pending_samples.push(StrokeSample { sx, sy, intent, first: false });
    }

    sim.input.pointer = Some((sx, sy));
    Ok(())
}

pub(super) fn pointer_leave(sim: &mut SimulationCore) {
    sim.input.pointer = None;
}

pub(super) fn begin_stroke(sim: &mut SimulationCore, sx: f64, sy: f64) -> Result<Intent, EngineError> {
    ensure_finite(sx, sy, "stroke start")?;
    let (cx, cy) = sim.camera.screen_to_cell(sx, sy)?;

    let intent = if sim.grid.is_alive(cx, cy) { Intent::Erase } else { Intent::Draw };

    // Painting pauses the simulation; `end_stroke` decides whether to resume.
    if sim.input.stroke.is_none() {
        sim.input.resume_after_stroke = sim.running;
    }
    super::settings::set_running(sim, false);

    sim.input.stroke = Some(intent);
    sim.input.pointer = Some((sx, sy));
    sim.input.pending_samples.push(StrokeSample { sx, sy, intent, first: true });
    Ok(intent)
}

pub(super) fn end_stroke(sim: &mut SimulationCore) {
    if sim.input.stroke.take().is_none() {
        return;
    }
    let resume = sim.input.resume_after_stroke && !sim.auto_pause;
    sim.input.resume_after_stroke = false;
    if resume {
        super::settings::set_running(sim, true);
    }
}

pub(super) fn begin_drag(sim: &mut SimulationCore, sx: f64, sy: f64) -> Result<(), EngineError> {
    ensure_finite(sx, sy, "drag start")?;
    sim.input.drag = Some((sx, sy));
    sim.input.pointer = Some((sx, sy));
    Ok(())
}

pub(super) fn end_drag(sim: &mut SimulationCore) {
    sim.input.drag = None;
}

/// Apply queued stroke samples in arrival order (tick phase 2).
pub(super) fn flush_strokes(sim: &mut SimulationCore) -> Result<(), EngineError> {
    let samples = std::mem::take(&mut sim.input.pending_samples);
    let mut result = Ok(());

    for sample in &samples {
        let cell = match sim.camera.screen_to_cell(sample.sx, sample.sy) {
            Ok(cell) => cell,
            Err(e) => {
                // Skip the sample, keep painting the rest.
                log::warn!("stroke sample dropped: {e}");
                result = Err(e);
                continue;
            }
        };

        match sim.input.last_stroke_cell {
            Some(last) if !sample.first && sim.stroke_interpolation => {
                sim.stamp.stamp_line(last, cell, sample.intent, &mut sim.grid);
            }
            _ => sim.stamp.stamp(cell.0, cell.1, sample.intent, &mut sim.grid),
        }
        sim.input.last_stroke_cell = Some(cell);
    }

    // Reuse the allocation
    let mut samples = samples;
    samples.clear();
    sim.input.pending_samples = samples;

    if sim.input.stroke.is_none() {
        sim.input.last_stroke_cell = None;
    }
    result
}

/// Apply the accumulated drag delta (tick phase 2).
pub(super) fn flush_drag(sim: &mut SimulationCore) -> Result<(), EngineError> {
    let (dx, dy) = std::mem::take(&mut sim.input.pending_drag);
    if dx == 0.0 && dy == 0.0 {
        return Ok(());
    }
    let (bx, by) = sim.camera.screen_to_buffer(dx, dy);
    sim.camera.drag_pan(bx, by)
}

pub(super) fn load_pattern_bundle(sim: &mut SimulationCore, json: &str) -> Result<(), EngineError> {
    let library = PatternLibrary::from_bundle_json(json)?;
    log::info!("pattern bundle loaded: {} patterns", library.len());
    sim.stamp.set_library(library);
    Ok(())
}

pub(super) fn import_cells(sim: &mut SimulationCore, flat: &[i32]) -> Result<(), EngineError> {
    if flat.len() % 2 != 0 {
        return Err(EngineError::MalformedCells(flat.len()));
    }
    sim.grid.import(flat.chunks_exact(2).map(|pair| (pair[0], pair[1])));
    sim.last_step = Default::default();
    Ok(())
}

pub(super) fn export_cells(sim: &SimulationCore) -> Vec<i32> {
    sim.grid.export().into_iter().flat_map(|(x, y)| [x, y]).collect()
}

pub(super) fn clear(sim: &mut SimulationCore) {
    sim.grid.clear();
    sim.last_step = Default::default();
    sim.stepped_last_tick = false;
    log::debug!("grid cleared");
}
