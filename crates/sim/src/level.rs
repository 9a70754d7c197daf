//! Level documents handed over by the world loader.
//!
//! A level is a JSON file of map rows plus entity spawn points:
//!
//! ```text
//! {
//!   "name": "cell-block-a",
//!   "rows": ["#####", "#...#", "#####"],
//!   "spawns": [{ "x": 2.5, "y": 1.5, "radius": 0.3 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use corridor_grid::{GridError, TileGrid};

/// Errors from loading or converting a level document.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("invalid spawn: {0}")]
    Spawn(#[from] corridor_physics::BodyError),
}

/// An entity spawn point supplied by the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// On-disk level document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    pub rows: Vec<String>,
    #[serde(default)]
    pub spawns: Vec<Spawn>,
}

impl LevelFile {
    /// Read and parse a level document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Parse a level document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert the map rows into an occupancy grid.
    pub fn to_grid(&self) -> Result<TileGrid, LevelError> {
        Ok(TileGrid::from_rows(&self.rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = r######"{
        "name": "ring",
        "rows": ["#####", "#...#", "#...#", "#...#", "#####"],
        "spawns": [{ "x": 2.5, "y": 2.5, "radius": 0.3 }]
    }"######;

    #[test]
    fn parses_rows_and_spawns() {
        let level = LevelFile::from_json(RING).unwrap();
        assert_eq!(level.name, "ring");
        assert_eq!(level.spawns.len(), 1);
        let grid = level.to_grid().unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
    }

    #[test]
    fn spawns_default_to_empty() {
        let level = LevelFile::from_json(r######"{ "name": "bare", "rows": ["###", "#.#", "###"] }"######)
            .unwrap();
        assert!(level.spawns.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = LevelFile::from_json("{ not json");
        assert!(matches!(err, Err(LevelError::Parse(_))));
    }

    #[test]
    fn bad_map_rows_surface_as_grid_error() {
        let level =
            LevelFile::from_json(r######"{ "name": "ragged", "rows": ["###", "#"] }"######).unwrap();
        assert!(matches!(level.to_grid(), Err(LevelError::Grid(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LevelFile::from_path("/nonexistent/level.json");
        assert!(matches!(err, Err(LevelError::Io(_))));
    }
}
