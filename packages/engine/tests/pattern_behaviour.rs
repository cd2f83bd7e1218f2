use std::collections::BTreeSet;

use life_engine::{Intent, LifeGrid, PatternLibrary, PatternStamp};

fn stamped(name: &str, quarter_turns: usize) -> LifeGrid {
    let mut stamp = PatternStamp::default();
    stamp.select(name).unwrap();
    for _ in 0..quarter_turns {
        stamp.rotate();
    }
    let mut grid = LifeGrid::new();
    stamp.stamp(100, -50, Intent::Draw, &mut grid);
    grid
}

/// Live set shifted so its bounding box starts at (0, 0), plus that shift
fn normalized(grid: &LifeGrid) -> (BTreeSet<(i32, i32)>, (i32, i32)) {
    let cells = grid.export();
    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let shape = cells.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect();
    (shape, (min_x, min_y))
}

fn run(grid: &mut LifeGrid, generations: usize) {
    for _ in 0..generations {
        grid.step();
    }
}

#[test]
fn builtin_library_is_complete() {
    let library = PatternLibrary::builtin();
    for (name, cells) in [
        ("single", 1),
        ("block", 4),
        ("blinker", 3),
        ("glider", 5),
        ("lightweight_spaceship", 9),
        ("r_pentomino", 5),
        ("acorn", 7),
        ("diehard", 7),
        ("pulsar", 48),
        ("pentadecathlon", 12),
        ("gosper_glider_gun", 36),
    ] {
        assert_eq!(library.get(name).map(|p| p.len()), Some(cells), "{name}");
    }
}

#[test]
fn oscillators_return_after_their_period() {
    for (name, period) in [("blinker", 2), ("pulsar", 3), ("pentadecathlon", 15)] {
        let mut grid = stamped(name, 0);
        let start = grid.export();
        run(&mut grid, period);
        assert_eq!(grid.export(), start, "{name}");
    }
}

#[test]
fn lightweight_spaceship_moves_two_cells_every_four_generations() {
    let mut grid = stamped("lightweight_spaceship", 0);
    let (shape, (x0, y0)) = normalized(&grid);
    run(&mut grid, 4);
    let (after, (x1, y1)) = normalized(&grid);
    assert_eq!(after, shape);
    assert_eq!(((x1 - x0).abs(), y1 - y0), (2, 0));
}

#[test]
fn rotated_glider_is_still_a_glider() {
    for turns in 0..4 {
        let mut grid = stamped("glider", turns);
        let (shape, (x0, y0)) = normalized(&grid);
        run(&mut grid, 4);
        let (after, (x1, y1)) = normalized(&grid);
        assert_eq!(after, shape, "turns = {turns}");
        assert_eq!(((x1 - x0).abs(), (y1 - y0).abs()), (1, 1), "turns = {turns}");
    }
}

#[test]
fn diehard_vanishes_after_130_generations() {
    let mut grid = stamped("diehard", 0);
    run(&mut grid, 120);
    assert!(!grid.is_empty());
    run(&mut grid, 10);
    assert!(grid.is_empty());
    assert_eq!(grid.generation(), 130);
}

#[test]
fn glider_gun_emits_gliders() {
    let mut grid = stamped("gosper_glider_gun", 0);
    run(&mut grid, 120);
    // The gun itself repeats every 30 generations; the extra cells are gliders.
    assert!(grid.len() > 36);
}
