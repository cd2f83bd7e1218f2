use crate::domain::{Intent, Purpose};

use super::frame_stats::FrameStats;
use super::SimulationCore;

/// Reallocate the age plane to the camera's current buffer size.
pub(super) fn resize_plane(sim: &mut SimulationCore) {
    let (w, h) = sim.camera.buffer_size();
    let render = &mut sim.render;
    render.plane_width = w;
    render.plane_height = h;
    render.age_plane.clear();
    render.age_plane.resize(w as usize * h as usize, 0);
    render.plane_written.clear();
    log::debug!("pixel buffer resized to {w}x{h}");
}

/// Fill the age plane, count visible cells and rebuild the preview.
pub(super) fn extract_frame(sim: &mut SimulationCore) {
    let (w, h) = (sim.render.plane_width as i64, sim.render.plane_height as i64);
    let (ox, oy) = sim.camera.buffer_origin();
    let half = w / 2;

    let render = &mut sim.render;
    for &idx in &render.plane_written {
        render.age_plane[idx as usize] = 0;
    }
    render.plane_written.clear();

    let (mut left, mut right) = (0u32, 0u32);
    for (x, y, age) in sim.grid.cells() {
        let (Some(bx), Some(by)) = (i64::from(x).checked_sub(ox), i64::from(y).checked_sub(oy)) else {
            continue;
        };
        if bx < 0 || by < 0 || bx >= w || by >= h {
            continue;
        }
        let idx = (by * w + bx) as usize;
        render.age_plane[idx] = age.saturating_add(1).min(u8::MAX as u32) as u8;
        render.plane_written.push(idx as u32);
        if bx < half {
            left += 1;
        } else {
            right += 1;
        }
    }
    sim.visible_left = left;
    sim.visible_right = right;
    sim.visible = left + right;

    rebuild_preview(sim);
}

fn rebuild_preview(sim: &mut SimulationCore) {
    sim.preview.clear();
    sim.render.preview_transfer.clear();

    // No highlight while panning or when the pointer is outside the view
    if sim.input.drag.is_some() {
        return;
    }
    let Some((sx, sy)) = sim.input.pointer else {
        return;
    };
    let Ok((cx, cy)) = sim.camera.screen_to_cell(sx, sy) else {
        return;
    };

    let intent = sim.input.stroke.unwrap_or(Intent::Draw);
    sim.stamp
        .stamp_for(Purpose::PreviewOnly, cx, cy, intent, &mut sim.grid, &mut sim.preview);

    sim.render
        .preview_transfer
        .extend(sim.preview.cells().iter().flat_map(|&(x, y)| [x, y]));
}

pub(super) fn extract_cells(sim: &mut SimulationCore) -> usize {
    let buf = &mut sim.render.cell_transfer;
    buf.clear();
    buf.reserve(sim.grid.len() * 3);
    for (x, y, age) in sim.grid.cells() {
        buf.push(x);
        buf.push(y);
        buf.push(age.min(i32::MAX as u32) as i32);
    }
    sim.grid.len()
}

pub(super) fn hover(sim: &SimulationCore) -> Option<(i32, i32, Option<u32>)> {
    let (sx, sy) = sim.input.pointer?;
    let (cx, cy) = sim.camera.screen_to_cell(sx, sy).ok()?;
    Some((cx, cy, sim.grid.age(cx, cy)))
}

pub(super) fn frame_stats(sim: &SimulationCore) -> FrameStats {
    FrameStats {
        births: sim.last_step.births,
        survivors: sim.last_step.survivors,
        alive: sim.grid.len() as u32,
        generation: sim.grid.generation(),
        stepped: sim.stepped_last_tick,
        zoom: sim.camera.zoom(),
        normalized_zoom: sim.camera.normalized_zoom(),
        visible: sim.visible,
        visible_left: sim.visible_left,
        visible_right: sim.visible_right,
        running: sim.running,
    }
}
