//! Maze generation
//!
//! Grows a maze over an odd/even lattice: cells with odd `(x, y)` are rooms,
//! a room's lattice neighbours sit two cells away along an axis, and the cell
//! between two joined rooms (the connector) is carved to floor.
//!
//! Generation runs in passes over a private working grid:
//! 1. growth from a single origin room, with occasional loops,
//! 2. removal of free-standing wall stubs and isolated pillars on the even
//!    sub-lattice,
//! 3. doors on single-tile corridor junctions, some of them opened.
//!
//! Every pass is public so an authored grid can be post-processed too.

use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, warn};

use crate::config::MazeConfig;
use crate::grid::{Coord, Grid};
use crate::rng::RandomSource;
use crate::wall::WallState;

/// Lattice directions in scan order: +x, +y, -x, -y
const LATTICE_DIRS: [(i32, i32); 4] = [(2, 0), (0, 2), (-2, 0), (0, -2)];

/// 8-neighbourhood offsets
const RING: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 4-connected offsets
const CARDINAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Summary of one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeStats {
    /// Growth loop steps taken
    pub iterations: usize,
    /// True when growth stopped at the iteration cap with rooms still on
    /// the front
    pub capped: bool,
    pub freewalls_removed: usize,
    pub pillars_removed: usize,
    pub doors_placed: usize,
    pub doors_opened: usize,
    /// Floor cells (open doors excluded) in the finished grid
    pub floor_cells: usize,
}

/// Stochastic maze generator
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    config: MazeConfig,
}

fn is(grid: &Grid<WallState>, x: i32, y: i32, state: WallState) -> bool {
    grid.get(x, y) == Some(state)
}

/// Walls among the 8 cells around `(x, y)`; off-grid cells do not count
fn ring_walls(grid: &Grid<WallState>, x: i32, y: i32) -> usize {
    RING.iter()
        .filter(|&&(dx, dy)| is(grid, x + dx, y + dy, WallState::Wall))
        .count()
}

/// Walls among the 4 cells two steps away along an axis
fn far_walls(grid: &Grid<WallState>, x: i32, y: i32) -> usize {
    LATTICE_DIRS
        .iter()
        .filter(|&&(dx, dy)| is(grid, x + dx, y + dy, WallState::Wall))
        .count()
}

/// Largest odd number not above `n`, at least 1
fn odd_floor(n: i32) -> i32 {
    if n <= 1 {
        1
    } else if n % 2 == 0 {
        n - 1
    } else {
        n
    }
}

impl MazeGenerator {
    /// Probabilities in `config` are clamped into `[0, 1]`
    pub fn new(config: MazeConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    fn area(&self, grid: &Grid<WallState>) -> (i32, i32) {
        let (w, h) = self.config.target_size(grid.width(), grid.height());
        (w as i32, h as i32)
    }

    /// First room of the growth front for a `width x height` area
    ///
    /// Without an explicit origin this is the odd cell nearest the middle
    /// from above-left ((49, 49) on a 100x100 area). An explicit origin is
    /// clamped into the area and moved onto the odd lattice.
    pub fn origin(&self, width: usize, height: usize) -> Coord {
        let (w, h) = (width as i32, height as i32);
        match self.config.origin {
            Some(c) => Coord::new(
                odd_floor(c.x.clamp(1, (w - 2).max(1))),
                odd_floor(c.y.clamp(1, (h - 2).max(1))),
            ),
            None => Coord::new(odd_floor((w - 1) / 2), odd_floor((h - 1) / 2)),
        }
    }

    /// Generate a `width x height` grid
    ///
    /// Cells outside the configured target area stay walls. Never fails: a
    /// growth front that does not die out is stopped at
    /// [`MazeConfig::max_iterations`].
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> (Grid<WallState>, MazeStats) {
        let start = tracing::enabled!(Level::DEBUG).then(Instant::now);
        let mut grid = Grid::new(width, height, WallState::Wall);

        let (iterations, capped) = self.carve(&mut grid, rng);
        let stats = MazeStats {
            iterations,
            capped,
            ..self.finish(&mut grid, rng)
        };

        if capped {
            warn!(
                max_iterations = self.config.max_iterations,
                "maze growth stopped at the iteration cap"
            );
        }

        debug!(
            width,
            height,
            iterations = stats.iterations,
            capped = stats.capped,
            floors = stats.floor_cells,
            doors = stats.doors_placed,
            open_doors = stats.doors_opened,
            elapsed_ms = start.map_or(0.0, |t| t.elapsed().as_secs_f64() * 1000.0),
            "maze_generated"
        );
        (grid, stats)
    }

    /// Run every pass after growth: stub and pillar cleanup, then doors
    pub fn finish<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> MazeStats {
        let freewalls_removed = self.remove_freewalls(grid, rng);
        let pillars_removed = self.remove_pillars(grid, rng);
        let doors_placed = self.place_doors(grid, rng);
        let doors_opened = self.open_doors(grid, rng);
        MazeStats {
            freewalls_removed,
            pillars_removed,
            doors_placed,
            doors_opened,
            floor_cells: grid.count(|s| s == WallState::Floor),
            ..MazeStats::default()
        }
    }

    /// Lattice neighbours of a room that stay inside the carving margins
    fn lattice_neighbors(room: Coord, w: i32, h: i32) -> Vec<Coord> {
        LATTICE_DIRS
            .iter()
            .map(|&(dx, dy)| room.offset(dx, dy))
            .filter(|c| c.x >= 1 && c.y >= 1 && c.x < w - 1 && c.y < h - 1)
            .collect()
    }

    /// Grow the maze from the origin room
    ///
    /// Returns the number of loop steps and whether the iteration cap cut
    /// growth short.
    pub fn carve<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> (usize, bool) {
        let (w, h) = self.area(grid);
        if w < 3 || h < 3 {
            return (0, false);
        }

        let mut front = vec![self.origin(w as usize, h as usize)];
        let mut iterations = 0;

        while iterations < self.config.max_iterations && !front.is_empty() {
            let idx = rng.index(front.len());
            let room = front[idx];
            grid.set(room.x, room.y, WallState::Floor);

            let mut candidates = Self::lattice_neighbors(room, w, h);
            let mut unconnected = 0;
            let mut tries = 0;
            while tries < candidates.len() * 2 {
                tries += 1;
                let pick = rng.index(candidates.len());
                let next = candidates[pick];
                let connector = room.midpoint(next);

                if is(grid, connector.x, connector.y, WallState::Floor) {
                    candidates.remove(pick);
                    continue;
                }
                unconnected += 1;

                // Usually refuse to break into a room that is already carved
                if rng.next_f64() > self.config.connect_prob
                    && is(grid, next.x, next.y, WallState::Floor)
                {
                    candidates.remove(pick);
                    continue;
                }

                grid.set(next.x, next.y, WallState::Floor);
                front.push(next);
                grid.set(connector.x, connector.y, WallState::Floor);
                break;
            }

            if unconnected == 0 || rng.next_f64() > self.config.seed_prob {
                front.remove(idx);
            }
            iterations += 1;
        }

        (iterations, !front.is_empty())
    }

    /// Even-lattice cells of the target area, row by row
    fn stub_cells(&self, grid: &Grid<WallState>) -> Vec<Coord> {
        let (w, h) = self.area(grid);
        (2..h)
            .step_by(2)
            .flat_map(|y| (2..w).step_by(2).map(move |x| Coord::new(x, y)))
            .collect()
    }

    /// Turn free-standing wall stubs into floor
    ///
    /// A stub is a wall with one wall among its 8 neighbours and three walls
    /// two steps away along the axes. Each stub survives with
    /// `freewall_prob`. Returns the number removed.
    pub fn remove_freewalls<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> usize {
        let mut removed = 0;
        for c in self.stub_cells(grid) {
            if is(grid, c.x, c.y, WallState::Wall)
                && rng.next_f64() > self.config.freewall_prob
                && ring_walls(grid, c.x, c.y) == 1
                && far_walls(grid, c.x, c.y) == 3
            {
                grid.set(c.x, c.y, WallState::Floor);
                removed += 1;
            }
        }
        removed
    }

    /// Turn walls with no wall neighbours into floor
    ///
    /// Each pillar survives with `pillar_prob`. Returns the number removed.
    pub fn remove_pillars<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> usize {
        let mut removed = 0;
        for c in self.stub_cells(grid) {
            if is(grid, c.x, c.y, WallState::Wall)
                && rng.next_f64() > self.config.pillar_prob
                && ring_walls(grid, c.x, c.y) == 0
            {
                grid.set(c.x, c.y, WallState::Floor);
                removed += 1;
            }
        }
        removed
    }

    /// Whether `(x, y)` is a one-tile gap in a horizontal or vertical corridor
    fn is_junction(grid: &Grid<WallState>, x: i32, y: i32) -> bool {
        use WallState::{Floor, Wall};

        let horizontal = is(grid, x + 1, y, Floor)
            && is(grid, x - 1, y, Floor)
            && is(grid, x, y + 1, Wall)
            && is(grid, x, y - 1, Wall)
            && (is(grid, x + 2, y, Floor) || is(grid, x - 2, y, Floor))
            && (is(grid, x, y + 2, Wall) || is(grid, x, y - 2, Wall));

        let vertical = is(grid, x + 1, y, Wall)
            && is(grid, x - 1, y, Wall)
            && is(grid, x, y + 1, Floor)
            && is(grid, x, y - 1, Floor)
            && (is(grid, x + 2, y, Wall) || is(grid, x - 2, y, Wall))
            && (is(grid, x, y + 2, Floor) || is(grid, x, y - 2, Floor));

        horizontal || vertical
    }

    /// Place closed doors on corridor junctions
    ///
    /// Interior floor cells are rolled against `door_prob`; a passing cell
    /// with two to four wall neighbours that is a junction becomes
    /// [`WallState::DoorClosed`]. Returns the number placed.
    pub fn place_doors<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> usize {
        let (w, h) = self.area(grid);
        let mut placed = 0;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if !is(grid, x, y, WallState::Floor) || !rng.chance(self.config.door_prob) {
                    continue;
                }
                let walls = ring_walls(grid, x, y);
                if (2..=4).contains(&walls) && Self::is_junction(grid, x, y) {
                    grid.set(x, y, WallState::DoorClosed);
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Open each closed door with `door_open_prob`. Returns the number opened.
    pub fn open_doors<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid<WallState>,
        rng: &mut R,
    ) -> usize {
        let (w, h) = self.area(grid);
        let mut opened = 0;
        for y in 0..h {
            for x in 0..w {
                if is(grid, x, y, WallState::DoorClosed) && rng.chance(self.config.door_open_prob) {
                    grid.set(x, y, WallState::DoorOpen);
                    opened += 1;
                }
            }
        }
        opened
    }
}

/// Whether every passable cell of `grid` can reach every other one through
/// orthogonal steps
///
/// Cells that block movement do not connect, except doors. A grid with no
/// passable cell counts as connected.
pub fn is_connected(grid: &Grid<WallState>) -> bool {
    let passable = |s: WallState| !s.blocks_movement() || s.is_door();
    let Some((start, _)) = grid.iter().find(|&(_, s)| passable(s)) else {
        return true;
    };

    let mut seen = Grid::new(grid.width(), grid.height(), false);
    let mut queue = VecDeque::from([start]);
    seen.set(start.x, start.y, true);
    let mut reached = 1;

    while let Some(c) = queue.pop_front() {
        for (dx, dy) in CARDINAL {
            let n = c.offset(dx, dy);
            if grid.get(n.x, n.y).is_some_and(passable) && seen.get(n.x, n.y) == Some(false) {
                seen.set(n.x, n.y, true);
                reached += 1;
                queue.push_back(n);
            }
        }
    }

    reached == grid.count(passable)
}
