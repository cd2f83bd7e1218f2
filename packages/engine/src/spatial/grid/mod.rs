//! LifeGrid - sparse live-cell storage on an unbounded plane
//!
//! Only live cells are stored, keyed by `CellKey`. Dead space costs
//! nothing, so the plane has no size beyond the codec's i32 range.
//!
//! Mutation goes through `apply`, `step`, `import` and `clear` only.

use std::collections::HashMap;

use crate::core::codec::{self, CellKey};
use crate::domain::Intent;

mod step;

pub use step::StepStats;

/// Moore neighbourhood, row-major, centre excluded
pub(crate) const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Per-cell metadata; the coordinate lives in the key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Generations survived in a row (0 on birth)
    pub age: u32,
}

#[derive(Clone, Debug, Default)]
pub struct LifeGrid {
    cells: HashMap<CellKey, Cell>,
    generation: u64,
    // Size of the last influence tally (perf readout)
    last_tally_len: usize,
}

impl LifeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cells.contains_key(&CellKey::encode(x, y))
    }

    pub fn age(&self, x: i32, y: i32) -> Option<u32> {
        self.cells.get(&CellKey::encode(x, y)).map(|c| c.age)
    }

    /// Live cells among the 8 neighbours. Interactive use only; `step` tallies in bulk.
    pub fn count_live_neighbors(&self, x: i32, y: i32) -> u8 {
        NEIGHBOURS
            .iter()
            .filter_map(|&(dx, dy)| codec::offset(x, y, dx, dy))
            .filter(|&(nx, ny)| self.is_alive(nx, ny))
            .count() as u8
    }

    /// Draw inserts at age 0 if absent; Erase removes if present.
    /// Returns true when the live set changed.
    pub fn apply(&mut self, x: i32, y: i32, intent: Intent) -> bool {
        let key = CellKey::encode(x, y);
        match intent {
            Intent::Erase => self.cells.remove(&key).is_some(),
            Intent::Draw => {
                if self.cells.contains_key(&key) {
                    false
                } else {
                    self.cells.insert(key, Cell::default());
                    true
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_tally_len(&self) -> usize {
        self.last_tally_len
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.generation = 0;
        self.last_tally_len = 0;
    }

    /// (x, y, age) for every live cell, unordered
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u32)> + '_ {
        self.cells.iter().map(|(key, cell)| {
            let (x, y) = key.decode();
            (x, y, cell.age)
        })
    }

    /// Replace the live set. Every cell starts at age 0; duplicates collapse.
    pub fn import<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        self.clear();
        for (x, y) in coords {
            self.cells.insert(CellKey::encode(x, y), Cell::default());
        }
        log::debug!("imported {} cells", self.cells.len());
    }

    /// Live coordinates sorted row-major (y, then x)
    pub fn export(&self) -> Vec<(i32, i32)> {
        let mut out: Vec<(i32, i32)> = self.cells.keys().map(|k| k.decode()).collect();
        out.sort_unstable_by_key(|&(x, y)| (y, x));
        out
    }
}
