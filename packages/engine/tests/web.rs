//! Browser tests: `wasm-pack test --headless --chrome packages/engine`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use life_engine::Simulation;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn init_and_tick() {
    life_engine::init();
    let mut sim = Simulation::new().unwrap();
    sim.import_cells(vec![0, 0, 1, 0, 2, 0]).unwrap();
    sim.step();
    sim.tick(0.0).unwrap();
    assert_eq!(sim.frame_stats().survivors(), 1);
}

#[wasm_bindgen_test]
fn errors_cross_the_boundary_as_strings() {
    let mut sim = Simulation::new().unwrap();
    let err = sim.set_rate(0.0).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("invalid step rate: 0 Hz"));

    let err = sim.select_pattern("nope".to_string()).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("unknown pattern: nope"));
}
