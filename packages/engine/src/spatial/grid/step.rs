use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::*;

/// Below this many live cells the tally is built on one thread.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_CELLS: usize = 4096;

type Tally = HashMap<CellKey, u8>;

/// Outcome of one generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Coordinates with exactly 3 live neighbours (includes reborn live cells)
    pub births: u32,
    /// Live cells with exactly 2 live neighbours
    pub survivors: u32,
}

#[inline]
fn tally_neighbours(tally: &mut Tally, key: CellKey) {
    let (x, y) = key.decode();
    for &(dx, dy) in NEIGHBOURS.iter() {
        if let Some((nx, ny)) = codec::offset(x, y, dx, dy) {
            *tally.entry(CellKey::encode(nx, ny)).or_insert(0) += 1;
        }
    }
}

#[cfg(feature = "parallel")]
fn merge(a: Tally, b: Tally) -> Tally {
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (key, n) in from {
        *into.entry(key).or_insert(0) += n;
    }
    into
}

impl LifeGrid {
    /// Advance one generation.
    ///
    /// Every live cell adds 1 to each neighbour's tally. Then:
    /// - tally 3: alive next generation at age 0, even if it was already alive
    /// - tally 2: stays alive with age + 1 if it was alive
    /// - anything else: absent
    ///
    /// The next generation is built in a fresh map and swapped in at the end.
    pub fn step(&mut self) -> StepStats {
        let tally = self.build_tally();
        self.last_tally_len = tally.len();

        let mut next = HashMap::with_capacity(self.cells.len());
        let mut stats = StepStats::default();

        for (key, count) in tally {
            match count {
                3 => {
                    next.insert(key, Cell { age: 0 });
                    stats.births += 1;
                }
                2 => {
                    if let Some(cell) = self.cells.get(&key) {
                        next.insert(key, Cell { age: cell.age.saturating_add(1) });
                        stats.survivors += 1;
                    }
                }
                _ => {}
            }
        }

        self.cells = next;
        self.generation += 1;
        stats
    }

    fn build_tally(&self) -> Tally {
        #[cfg(feature = "parallel")]
        {
            if self.cells.len() >= PARALLEL_MIN_CELLS {
                return self
                    .cells
                    .par_iter()
                    .fold(Tally::new, |mut acc, (key, _)| {
                        tally_neighbours(&mut acc, *key);
                        acc
                    })
                    .reduce(Tally::new, merge);
            }
        }

        let mut tally = Tally::with_capacity(self.cells.len() * 8);
        for key in self.cells.keys() {
            tally_neighbours(&mut tally, *key);
        }
        tally
    }
}
