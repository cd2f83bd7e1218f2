use wasm_bindgen::prelude::*;

/// What a mutation does to the live set.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Draw = 0,
    Erase = 1,
}

/// Whether a stamp commits to the grid or only reports coordinates for the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Purpose {
    Commit,
    PreviewOnly,
}
