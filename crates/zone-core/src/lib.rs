//! zone-core: tile grid, maze generation and wall autotiling for a zone
//!
//! A zone is a fixed-size grid of wall states plus a light map. This crate
//! owns the grid storage, the procedural maze generator that fills it and the
//! neighbour classifier that picks a wall sprite direction for each cell.
//! Light propagation and rendering are left to callers through the
//! [`LightPropagator`] trait and [`RenderCell`].

pub mod autotile;
pub mod config;
pub mod error;
pub mod grid;
pub mod light;
pub mod maze;
pub mod wall;
pub mod zone;

mod rng;

pub use autotile::{DirectionKey, Neighbors, TileSource};
pub use config::MazeConfig;
pub use error::{ConfigError, WallCodeError, ZoneError};
pub use grid::{Coord, Grid};
pub use light::{LightParams, LightPropagator};
pub use maze::{MazeGenerator, MazeStats};
pub use rng::{RandomSource, ZoneRng};
pub use wall::{WALL_PROPERTIES, WallProperty, WallState};
pub use zone::{RenderCell, Zone};
