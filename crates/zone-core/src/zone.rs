//! Zone: wall and light grids for one playable level

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::autotile::{self, DirectionKey, TileSource};
use crate::config::MazeConfig;
use crate::error::ZoneError;
use crate::grid::{Coord, Grid};
use crate::light::{self, LightParams, LightPropagator};
use crate::maze::{MazeGenerator, MazeStats};
use crate::rng::RandomSource;
use crate::wall::WallState;

/// What a renderer needs to draw one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderCell {
    pub wall: WallState,
    pub direction: DirectionKey,
    pub light: f32,
}

/// A fixed-size level
///
/// Reads outside the grid return [`WallState::None`] or `0.0` light, writes
/// outside the grid are ignored. The wall grid is only ever replaced as a
/// whole by generation, so a `&Zone` never sees a half-built maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZoneData")]
pub struct Zone {
    width: usize,
    height: usize,
    walls: Grid<WallState>,
    light: Grid<f32>,
}

/// Unchecked serialized form of a [`Zone`]
#[derive(Deserialize)]
struct ZoneData {
    width: usize,
    height: usize,
    walls: Grid<WallState>,
    light: Grid<f32>,
}

impl TryFrom<ZoneData> for Zone {
    type Error = ZoneError;

    fn try_from(data: ZoneData) -> Result<Self, Self::Error> {
        for (got_width, got_height) in [
            (data.walls.width(), data.walls.height()),
            (data.light.width(), data.light.height()),
        ] {
            if got_width != data.width || got_height != data.height {
                return Err(ZoneError::SizeMismatch {
                    width: data.width,
                    height: data.height,
                    got_width,
                    got_height,
                });
            }
        }
        let mut lit = data.light;
        lit.map_in_place(light::sanitize);
        Ok(Self {
            width: data.width,
            height: data.height,
            walls: data.walls,
            light: lit,
        })
    }
}

impl Zone {
    /// Create a zone of open floor with no light. Zero dimensions become 1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            walls: Grid::new(width, height, WallState::Floor),
            light: Grid::new(width, height, 0.0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.walls.in_bounds(x, y)
    }

    /// The published wall grid
    pub fn walls(&self) -> &Grid<WallState> {
        &self.walls
    }

    /// The light grid
    pub fn light_grid(&self) -> &Grid<f32> {
        &self.light
    }

    pub fn get(&self, x: i32, y: i32) -> WallState {
        self.walls.get(x, y).unwrap_or(WallState::None)
    }

    pub fn set(&mut self, x: i32, y: i32, value: WallState) {
        self.walls.set(x, y, value);
    }

    pub fn light(&self, x: i32, y: i32) -> f32 {
        self.light.get(x, y).unwrap_or(0.0)
    }

    /// Store a light intensity; negative or non-finite values store `0`
    pub fn set_light(&mut self, x: i32, y: i32, value: f32) {
        self.light.set(x, y, light::sanitize(value));
    }

    /// Whether `(x, y)` lies on the outer boundary
    pub fn is_edge(&self, x: i32, y: i32) -> bool {
        x == 0 || x == self.width as i32 - 1 || y == 0 || y == self.height as i32 - 1
    }

    /// Number of `Wall` cells around `(x, y)`, clamped at the edges
    pub fn wall_neighbor_count(&self, x: i32, y: i32) -> usize {
        self.walls
            .neighbors(x, y)
            .into_iter()
            .filter(|c| self.get(c.x, c.y) == WallState::Wall)
            .count()
    }

    /// In-bounds 8-neighbourhood of `(x, y)`, excluding itself
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<Coord> {
        self.walls.neighbors(x, y)
    }

    /// Swap in a caller-built wall grid, returning the previous one
    pub fn replace_walls(&mut self, walls: Grid<WallState>) -> Result<Grid<WallState>, ZoneError> {
        if walls.width() != self.width || walls.height() != self.height {
            return Err(ZoneError::SizeMismatch {
                width: self.width,
                height: self.height,
                got_width: walls.width(),
                got_height: walls.height(),
            });
        }
        Ok(std::mem::replace(&mut self.walls, walls))
    }

    /// Generate a maze and publish it as the wall grid
    ///
    /// The maze is built in a private grid; the zone's walls are replaced in
    /// one step once generation is done.
    pub fn create_maze<R: RandomSource + ?Sized>(
        &mut self,
        config: &MazeConfig,
        rng: &mut R,
    ) -> MazeStats {
        let generator = MazeGenerator::new(config.clone());
        let (walls, stats) = generator.generate(self.width, self.height, rng);
        self.walls = walls;
        stats
    }

    /// Zero every light value
    pub fn clear_light(&mut self) {
        self.light.fill(0.0);
    }

    /// Recompute light from `(x, y)` with an external propagator
    ///
    /// The light grid is cleared first, so cells the new light does not reach
    /// read as not visible.
    pub fn update_light<P: LightPropagator + ?Sized>(
        &mut self,
        propagator: &mut P,
        x: i32,
        y: i32,
        params: LightParams,
    ) {
        self.clear_light();
        propagator.propagate(&self.walls, &mut self.light, Coord::new(x, y), params);
        if self.light.width() != self.width || self.light.height() != self.height {
            warn!(
                got_width = self.light.width(),
                got_height = self.light.height(),
                "light propagator resized the light grid, discarding its output"
            );
            self.light = Grid::new(self.width, self.height, 0.0);
        }
        self.light.map_in_place(light::sanitize);
        debug!(
            x,
            y,
            range = params.range,
            lit = self.light.count(|v| v > 0.0),
            "light_updated"
        );
    }

    /// Sprite direction of the wall at `(x, y)`
    pub fn wall_direction(&self, x: i32, y: i32) -> DirectionKey {
        autotile::resolve(self, x, y, false)
    }

    /// Sprite direction of the wall at `(x, y)`, treating unlit neighbours as
    /// walls when `vision_gated` is set
    pub fn wall_direction_vision(&self, x: i32, y: i32, vision_gated: bool) -> DirectionKey {
        autotile::resolve(self, x, y, vision_gated)
    }

    pub fn render_cell(&self, x: i32, y: i32, vision_gated: bool) -> RenderCell {
        RenderCell {
            wall: self.get(x, y),
            direction: self.wall_direction_vision(x, y, vision_gated),
            light: self.light(x, y),
        }
    }

    /// Cells a renderer should draw: all of them, or only lit ones when
    /// `vision_gated` is set
    pub fn render_cells(&self, vision_gated: bool) -> impl Iterator<Item = (Coord, RenderCell)> + '_ {
        self.light
            .iter()
            .filter(move |&(_, light)| !vision_gated || light > 0.0)
            .map(move |(c, _)| (c, self.render_cell(c.x, c.y, vision_gated)))
    }
}

impl TileSource for Zone {
    fn wall(&self, x: i32, y: i32) -> WallState {
        self.get(x, y)
    }

    fn light(&self, x: i32, y: i32) -> f32 {
        Zone::light(self, x, y)
    }
}
