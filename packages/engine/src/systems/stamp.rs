//! PatternStamp - places the active pattern at a cursor position
//!
//! The stamp never owns cells. It hands absolute coordinates to a
//! `CellSink`: the grid when committing, a `Preview` when only the
//! overlay needs them.

use crate::core::codec;
use crate::core::EngineError;
use crate::domain::{Intent, Offset, Pattern, PatternLibrary, Purpose};
use crate::spatial::LifeGrid;

const DEFAULT_PATTERN: &str = "single";
/// Longest interpolated stroke segment; longer ones are sampled evenly.
pub const MAX_LINE_STEPS: i64 = 65_536;

/// Receiver of stamped coordinates
pub trait CellSink {
    fn apply(&mut self, x: i32, y: i32, intent: Intent);
}

impl CellSink for LifeGrid {
    #[inline]
    fn apply(&mut self, x: i32, y: i32, intent: Intent) {
        LifeGrid::apply(self, x, y, intent);
    }
}

/// Records coordinates without touching the grid (highlight overlay)
#[derive(Clone, Debug, Default)]
pub struct Preview {
    cells: Vec<(i32, i32)>,
}

impl Preview {
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSink for Preview {
    fn apply(&mut self, x: i32, y: i32, _intent: Intent) {
        self.cells.push((x, y));
    }
}

pub struct PatternStamp {
    library: PatternLibrary,
    selected: Pattern,
    active: Pattern,
    quarter_turns: u8,
}

impl PatternStamp {
    pub fn new(library: PatternLibrary) -> Self {
        let selected = library
            .get(DEFAULT_PATTERN)
            .cloned()
            .unwrap_or_else(|| Pattern::new(DEFAULT_PATTERN, vec![(0, 0)]));
        Self {
            library,
            active: selected.clone(),
            selected,
            quarter_turns: 0,
        }
    }

    /// Switch the active pattern; orientation resets.
    pub fn select(&mut self, name: &str) -> Result<(), EngineError> {
        let pattern = self
            .library
            .get(name)
            .ok_or_else(|| EngineError::UnknownPattern(name.to_string()))?;
        self.selected = pattern.clone();
        self.active = pattern.clone();
        self.quarter_turns = 0;
        Ok(())
    }

    /// Swap libraries, keeping the selection when the new library still has it.
    pub fn set_library(&mut self, library: PatternLibrary) {
        let name = self.selected.name().to_string();
        self.library = library;
        if self.select(&name).is_err() {
            *self = Self::new(std::mem::take(&mut self.library));
        }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn selected_name(&self) -> &str {
        self.selected.name()
    }

    /// Quarter turn clockwise on screen (y grows downward)
    pub fn rotate(&mut self) {
        self.active = self.active.rotated();
        self.quarter_turns = (self.quarter_turns + 1) % 4;
    }

    /// 0..=3 quarter turns from the selected orientation
    pub fn orientation(&self) -> u8 {
        self.quarter_turns
    }

    pub fn offsets(&self) -> &[Offset] {
        self.active.offsets()
    }

    /// Hand every absolute coordinate of the active pattern to `sink`.
    /// Offsets that would leave the codec range are skipped.
    pub fn stamp<S: CellSink + ?Sized>(&self, origin_x: i32, origin_y: i32, intent: Intent, sink: &mut S) {
        for &(dx, dy) in self.active.offsets() {
            if let Some((x, y)) = codec::offset(origin_x, origin_y, dx, dy) {
                sink.apply(x, y, intent);
            }
        }
    }

    pub fn stamp_for(
        &self,
        purpose: Purpose,
        origin_x: i32,
        origin_y: i32,
        intent: Intent,
        grid: &mut LifeGrid,
        preview: &mut Preview,
    ) {
        match purpose {
            Purpose::Commit => self.stamp(origin_x, origin_y, intent, grid),
            Purpose::PreviewOnly => self.stamp(origin_x, origin_y, intent, preview),
        }
    }

    /// Stamp at every cell stepped through between `from` (exclusive) and
    /// `to` (inclusive). A zero-length stroke stamps once at `to`. Segments
    /// longer than `MAX_LINE_STEPS` are stamped at that many evenly spaced
    /// points, still ending on `to`.
    pub fn stamp_line<S: CellSink + ?Sized>(
        &self,
        from: (i32, i32),
        to: (i32, i32),
        intent: Intent,
        sink: &mut S,
    ) {
        let dx = to.0 as i64 - from.0 as i64;
        let dy = to.1 as i64 - from.1 as i64;
        let steps = dx.abs().max(dy.abs()).min(MAX_LINE_STEPS);
        if steps == 0 {
            self.stamp(to.0, to.1, intent, sink);
            return;
        }
        let (dx, dy, n) = (dx as i128, dy as i128, steps as i128);
        for i in 1..=n {
            // floor division; points stay between `from` and `to`
            let x = from.0 as i128 + (dx * i).div_euclid(n);
            let y = from.1 as i128 + (dy * i).div_euclid(n);
            self.stamp(x as i32, y as i32, intent, sink);
        }
    }
}

impl Default for PatternStamp {
    fn default() -> Self {
        Self::new(PatternLibrary::builtin())
    }
}
