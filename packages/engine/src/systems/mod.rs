//! Per-frame systems driven by the simulation core.

pub mod camera;
pub mod clock;
pub mod stamp;

pub use camera::{Point, ViewportCamera};
pub use clock::{SimulationClock, StepRate};
pub use stamp::{CellSink, PatternStamp, Preview};
