//! Pattern tables
//!
//! Built-in shapes are stored as plaintext rows ('O' = live, '.' = dead)
//! with the origin at the top-left cell. Hosts can extend or override the
//! library with a JSON bundle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

pub type Offset = (i32, i32);

const SINGLE: &[&str] = &["O"];

const BLOCK: &[&str] = &["OO", "OO"];

const BLINKER: &[&str] = &["OOO"];

const GLIDER: &[&str] = &[".O.", "..O", "OOO"];

const LIGHTWEIGHT_SPACESHIP: &[&str] = &[".O..O", "O....", "O...O", "OOOO."];

const R_PENTOMINO: &[&str] = &[".OO", "OO.", ".O."];

const ACORN: &[&str] = &[".O.....", "...O...", "OO..OOO"];

const DIEHARD: &[&str] = &["......O.", "OO......", ".O...OOO"];

const PULSAR: &[&str] = &[
    "..OOO...OOO..",
    ".............",
    "O....O.O....O",
    "O....O.O....O",
    "O....O.O....O",
    "..OOO...OOO..",
    ".............",
    "..OOO...OOO..",
    "O....O.O....O",
    "O....O.O....O",
    "O....O.O....O",
    ".............",
    "..OOO...OOO..",
];

const PENTADECATHLON: &[&str] = &["..O....O..", "OO.OOOO.OO", "..O....O.."];

const GOSPER_GLIDER_GUN: &[&str] = &[
    "........................O...........",
    "......................O.O...........",
    "............OO......OO............OO",
    "...........O...O....OO............OO",
    "OO........O.....O...OO..............",
    "OO........O...O.OO....O.O...........",
    "..........O.....O.......O...........",
    "...........O...O....................",
    "............OO......................",
];

const BUILTINS: &[(&str, &[&str])] = &[
    ("single", SINGLE),
    ("block", BLOCK),
    ("blinker", BLINKER),
    ("glider", GLIDER),
    ("lightweight_spaceship", LIGHTWEIGHT_SPACESHIP),
    ("r_pentomino", R_PENTOMINO),
    ("acorn", ACORN),
    ("diehard", DIEHARD),
    ("pulsar", PULSAR),
    ("pentadecathlon", PENTADECATHLON),
    ("gosper_glider_gun", GOSPER_GLIDER_GUN),
];

/// A named list of offsets relative to an implicit origin
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    offsets: Vec<Offset>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, offsets: Vec<Offset>) -> Self {
        Self { name: name.into(), offsets }
    }

    /// Build from plaintext rows; any char other than 'O' is dead.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Self {
        let mut offsets = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == 'O' {
                    offsets.push((x as i32, y as i32));
                }
            }
        }
        Self::new(name, offsets)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Quarter turn about the origin: (dx, dy) -> (-dy, dx)
    pub fn rotated(&self) -> Pattern {
        Pattern {
            name: self.name.clone(),
            offsets: self.offsets.iter().map(|&(dx, dy)| (-dy, dx)).collect(),
        }
    }

    /// (width, height) of the bounding box
    pub fn extent(&self) -> (u64, u64) {
        let Some(&(fx, fy)) = self.offsets.first() else {
            return (0, 0);
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (fx, fx, fy, fy);
        for &(x, y) in &self.offsets {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo)) as u64 + 1;
        (span(min_x, max_x), span(min_y, max_y))
    }
}

// === Bundle format ===

#[derive(Deserialize)]
struct PatternBundle {
    patterns: Vec<PatternEntry>,
}

#[derive(Deserialize)]
struct PatternEntry {
    name: String,
    #[serde(default)]
    cells: Option<Vec<[i32; 2]>>,
    #[serde(default)]
    rows: Option<Vec<String>>,
}

#[derive(Serialize)]
struct PatternManifest<'a> {
    format_version: u32,
    patterns: Vec<PatternManifestEntry<'a>>,
}

#[derive(Serialize)]
struct PatternManifestEntry<'a> {
    name: &'a str,
    cells: usize,
    width: u64,
    height: u64,
}

/// Ordered, name-addressable set of patterns
#[derive(Clone, Debug)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
    by_name: HashMap<String, usize>,
}

impl PatternLibrary {
    pub fn builtin() -> Self {
        let mut lib = PatternLibrary {
            patterns: Vec::with_capacity(BUILTINS.len()),
            by_name: HashMap::new(),
        };
        for (name, rows) in BUILTINS {
            lib.insert(Pattern::from_rows(*name, rows));
        }
        lib
    }

    /// Built-ins plus every pattern in the bundle; same-name entries replace.
    pub fn from_bundle_json(json: &str) -> Result<Self, EngineError> {
        let bundle: PatternBundle =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidBundle(e.to_string()))?;
        let mut lib = Self::builtin();
        for entry in bundle.patterns {
            lib.insert(Self::pattern_from_entry(entry)?);
        }
        Ok(lib)
    }

    fn pattern_from_entry(entry: PatternEntry) -> Result<Pattern, EngineError> {
        if entry.name.trim().is_empty() {
            return Err(EngineError::InvalidBundle("pattern with empty name".to_string()));
        }
        let pattern = match (entry.cells, entry.rows) {
            (Some(cells), None) => {
                Pattern::new(entry.name, cells.into_iter().map(|[x, y]| (x, y)).collect())
            }
            (None, Some(rows)) => {
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                Pattern::from_rows(entry.name, &rows)
            }
            _ => {
                return Err(EngineError::InvalidBundle(format!(
                    "pattern '{}' needs exactly one of `cells` or `rows`",
                    entry.name
                )))
            }
        };
        // i32::MIN has no quarter-turn image
        if pattern.offsets().iter().any(|&(dx, dy)| dx == i32::MIN || dy == i32::MIN) {
            return Err(EngineError::InvalidBundle(format!(
                "pattern '{}' has an offset outside the rotatable range",
                pattern.name
            )));
        }
        if pattern.is_empty() {
            return Err(EngineError::InvalidBundle(format!(
                "pattern '{}' has no live cells",
                pattern.name
            )));
        }
        Ok(pattern)
    }

    pub fn insert(&mut self, pattern: Pattern) {
        match self.by_name.get(pattern.name()) {
            Some(&idx) => self.patterns[idx] = pattern,
            None => {
                self.by_name.insert(pattern.name.clone(), self.patterns.len());
                self.patterns.push(pattern);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.by_name.get(name).map(|&idx| &self.patterns[idx])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn manifest_json(&self) -> String {
        let out = PatternManifest {
            format_version: 1,
            patterns: self
                .patterns
                .iter()
                .map(|p| {
                    let (width, height) = p.extent();
                    PatternManifestEntry { name: p.name(), cells: p.len(), width, height }
                })
                .collect(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn as_set(p: &Pattern) -> HashSet<Offset> {
        p.offsets().iter().copied().collect()
    }

    #[test]
    fn builtin_cell_counts() {
        let lib = PatternLibrary::builtin();
        let expect = [
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
        ];
        for (name, cells) in expect {
            assert_eq!(lib.get(name).map(Pattern::len), Some(cells), "{name}");
        }
        assert_eq!(lib.len(), expect.len());
    }

    #[test]
    fn four_rotations_return_the_original() {
        for p in PatternLibrary::builtin().patterns {
            let back = p.rotated().rotated().rotated().rotated();
            assert_eq!(back.offsets(), p.offsets(), "{}", p.name());
        }
    }

    #[test]
    fn single_rotation_maps_dx_dy_to_minus_dy_dx() {
        let p = Pattern::new("l", vec![(0, 0), (1, 0), (1, 2)]);
        assert_eq!(p.rotated().offsets(), &[(0, 0), (0, 1), (-2, 1)]);
        assert_ne!(as_set(&p.rotated()), as_set(&p));
    }

    #[test]
    fn extent_of_gun() {
        let lib = PatternLibrary::builtin();
        assert_eq!(lib.get("gosper_glider_gun").unwrap().extent(), (36, 9));
        assert_eq!(Pattern::new("none", vec![]).extent(), (0, 0));
    }

    #[test]
    fn wide_bundle_pattern_reports_its_full_extent() {
        let json = r#"{"patterns":[{"name":"wide","cells":[[-2000000000,0],[2000000000,0]]}]}"#;
        let lib = PatternLibrary::from_bundle_json(json).unwrap();
        assert_eq!(lib.get("wide").unwrap().extent(), (4_000_000_001, 1));

        let manifest: serde_json::Value = serde_json::from_str(&lib.manifest_json()).unwrap();
        let wide = manifest["patterns"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "wide")
            .unwrap();
        assert_eq!(wide["width"], 4_000_000_001u64);
        assert_eq!(wide["height"], 1);

        let widest = Pattern::new("edge", vec![(i32::MIN + 1, 0), (i32::MAX, 0)]);
        assert_eq!(widest.extent(), (u32::MAX as u64, 1));
    }

    #[test]
    fn bundle_rejects_unrotatable_offsets() {
        let json = r#"{"patterns":[{"name":"edge","cells":[[0,-2147483648]]}]}"#;
        assert!(matches!(
            PatternLibrary::from_bundle_json(json),
            Err(EngineError::InvalidBundle(_))
        ));
    }

    #[test]
    fn bundle_adds_and_overrides() {
        let json = r#"{ "patterns": [
            { "name": "domino", "cells": [[0, 0], [1, 0]] },
            { "name": "glider", "rows": ["OO", "OO"] }
        ] }"#;
        let lib = PatternLibrary::from_bundle_json(json).unwrap();
        assert_eq!(lib.get("domino").unwrap().offsets(), &[(0, 0), (1, 0)]);
        assert_eq!(lib.get("glider").unwrap().len(), 4);
        assert_eq!(lib.len(), PatternLibrary::builtin().len() + 1);
    }

    #[test]
    fn bundle_rejects_ambiguous_and_empty_entries() {
        let both = r#"{ "patterns": [ { "name": "x", "cells": [[0,0]], "rows": ["O"] } ] }"#;
        assert!(matches!(
            PatternLibrary::from_bundle_json(both),
            Err(EngineError::InvalidBundle(_))
        ));
        let empty = r#"{ "patterns": [ { "name": "x", "rows": ["..."] } ] }"#;
        assert!(PatternLibrary::from_bundle_json(empty).is_err());
        assert!(PatternLibrary::from_bundle_json("[]").is_err());
    }

    #[test]
    fn manifest_lists_every_pattern() {
        let lib = PatternLibrary::builtin();
        let manifest: serde_json::Value = serde_json::from_str(&lib.manifest_json()).unwrap();
        let entries = manifest["patterns"].as_array().unwrap();
        assert_eq!(entries.len(), lib.len());
        assert_eq!(entries[0]["name"], "single");
        assert_eq!(manifest["format_version"], 1);
    }
}
