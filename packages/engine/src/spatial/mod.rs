pub mod grid;

pub use grid::{Cell, LifeGrid, StepStats};
