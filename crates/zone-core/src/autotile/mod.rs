//! Wall autotiling
//!
//! Each wall tile picks its sprite from the openness of its 8 neighbours. A
//! neighbour is open unless it is a wall or off the grid; in vision-gated
//! mode an unlit neighbour is also treated as a wall, so undiscovered
//! geometry renders solid.
//!
//! The runtime path is a 256-entry table indexed by the [`Neighbors`] mask,
//! see [`table`]. [`reference`] keeps the same classification written out as
//! nested conditionals.

pub mod reference;
pub mod table;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::wall::WallState;

pub use reference::resolve_reference;
pub use table::{DIRECTION_TABLE, resolve_mask};

bitflags! {
    /// Open neighbours of a tile, one bit per compass direction
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Neighbors: u8 {
        const N = 0b0000_0001;
        const NE = 0b0000_0010;
        const E = 0b0000_0100;
        const SE = 0b0000_1000;
        const S = 0b0001_0000;
        const SW = 0b0010_0000;
        const W = 0b0100_0000;
        const NW = 0b1000_0000;
    }
}

/// Offsets of each neighbour bit
const NEIGHBOR_OFFSETS: [(Neighbors, i32, i32); 8] = [
    (Neighbors::N, 0, -1),
    (Neighbors::NE, 1, -1),
    (Neighbors::E, 1, 0),
    (Neighbors::SE, 1, 1),
    (Neighbors::S, 0, 1),
    (Neighbors::SW, -1, 1),
    (Neighbors::W, -1, 0),
    (Neighbors::NW, -1, -1),
];

/// Sprite direction of a wall tile
///
/// Names describe where the open space is: `UpDown` has floor above and
/// below, `UpLeftC` has floor up and left plus the down-right corner, the
/// `Corner*` keys have only diagonal openings, and `CornerNot*` have every
/// diagonal open except the named one. The string form is the sprite code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum DirectionKey {
    #[strum(serialize = "pillar")]
    Pillar,
    #[strum(serialize = "l")]
    Left,
    #[strum(serialize = "r")]
    Right,
    #[strum(serialize = "u")]
    Up,
    #[strum(serialize = "d")]
    Down,
    #[strum(serialize = "ul")]
    UpLeft,
    #[strum(serialize = "ur")]
    UpRight,
    #[strum(serialize = "dl")]
    DownLeft,
    #[strum(serialize = "dr")]
    DownRight,
    #[strum(serialize = "ud")]
    UpDown,
    #[strum(serialize = "lr")]
    LeftRight,
    #[strum(serialize = "lrd")]
    LeftRightDown,
    #[strum(serialize = "lru")]
    LeftRightUp,
    #[strum(serialize = "udl")]
    UpDownLeft,
    #[strum(serialize = "udr")]
    UpDownRight,
    #[strum(serialize = "n")]
    None,
    #[strum(serialize = "cdr")]
    CornerDownRight,
    #[strum(serialize = "cdl")]
    CornerDownLeft,
    #[strum(serialize = "cur")]
    CornerUpRight,
    #[strum(serialize = "cul")]
    CornerUpLeft,
    #[strum(serialize = "drc")]
    DownRightC,
    #[strum(serialize = "dlc")]
    DownLeftC,
    #[strum(serialize = "urc")]
    UpRightC,
    #[strum(serialize = "ulc")]
    UpLeftC,
    #[strum(serialize = "dclr")]
    DownClr,
    #[strum(serialize = "dcl")]
    DownCl,
    #[strum(serialize = "dcr")]
    DownCr,
    #[strum(serialize = "uclr")]
    UpClr,
    #[strum(serialize = "ucl")]
    UpCl,
    #[strum(serialize = "ucr")]
    UpCr,
    #[strum(serialize = "rcud")]
    RightCud,
    #[strum(serialize = "rcd")]
    RightCd,
    #[strum(serialize = "rcu")]
    RightCu,
    #[strum(serialize = "lcud")]
    LeftCud,
    #[strum(serialize = "lcd")]
    LeftCd,
    #[strum(serialize = "lcu")]
    LeftCu,
    #[strum(serialize = "cndr")]
    CornerNotDownRight,
    #[strum(serialize = "cndl")]
    CornerNotDownLeft,
    #[strum(serialize = "cnur")]
    CornerNotUpRight,
    #[strum(serialize = "cnul")]
    CornerNotUpLeft,
    #[strum(serialize = "cd")]
    CornerDown,
    #[strum(serialize = "cl")]
    CornerLeft,
    #[strum(serialize = "cr")]
    CornerRight,
    #[strum(serialize = "cu")]
    CornerUp,
    #[strum(serialize = "call")]
    CornerAll,
    #[strum(serialize = "cfor")]
    CornerForward,
    #[strum(serialize = "cback")]
    CornerBack,
}

impl DirectionKey {
    /// Short sprite code, e.g. `"ud"`
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// Read access the resolver needs from a zone
pub trait TileSource {
    fn wall(&self, x: i32, y: i32) -> WallState;
    fn light(&self, x: i32, y: i32) -> f32;
}

/// Openness mask of the 8 neighbours of `(x, y)`
pub fn neighbor_mask<S: TileSource + ?Sized>(
    source: &S,
    x: i32,
    y: i32,
    vision_gated: bool,
) -> Neighbors {
    let mut mask = Neighbors::empty();
    for (bit, dx, dy) in NEIGHBOR_OFFSETS {
        // Past the i32 range is off-grid, hence closed
        let (Some(nx), Some(ny)) = (x.checked_add(dx), y.checked_add(dy)) else {
            continue;
        };
        let state = if vision_gated && source.light(nx, ny) <= 0.0 {
            WallState::Wall
        } else {
            source.wall(nx, ny)
        };
        if state.is_open() {
            mask |= bit;
        }
    }
    mask
}

/// Direction key of the tile at `(x, y)`
pub fn resolve<S: TileSource + ?Sized>(
    source: &S,
    x: i32,
    y: i32,
    vision_gated: bool,
) -> DirectionKey {
    resolve_mask(neighbor_mask(source, x, y, vision_gated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    struct Patch {
        walls: [[WallState; 3]; 3],
        light: [[f32; 3]; 3],
    }

    impl TileSource for Patch {
        fn wall(&self, x: i32, y: i32) -> WallState {
            if (0..3).contains(&x) && (0..3).contains(&y) {
                self.walls[y as usize][x as usize]
            } else {
                WallState::None
            }
        }

        fn light(&self, x: i32, y: i32) -> f32 {
            if (0..3).contains(&x) && (0..3).contains(&y) {
                self.light[y as usize][x as usize]
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_codes_parse_back() {
        for key in DirectionKey::iter() {
            assert_eq!(DirectionKey::from_str(key.code()), Ok(key));
            assert_eq!(key.to_string(), key.code());
        }
        assert_eq!(DirectionKey::iter().count(), 47);
    }

    #[test]
    fn test_mask_reads_compass_points() {
        use WallState::{Floor as F, Wall as W};
        let patch = Patch {
            walls: [[F, W, W], [W, W, F], [W, W, W]],
            light: [[1.0; 3]; 3],
        };
        assert_eq!(neighbor_mask(&patch, 1, 1, false), Neighbors::NW | Neighbors::E);
    }

    #[test]
    fn test_off_grid_neighbours_are_closed() {
        use WallState::Floor as F;
        let patch = Patch {
            walls: [[F; 3]; 3],
            light: [[1.0; 3]; 3],
        };
        assert_eq!(
            neighbor_mask(&patch, 0, 0, false),
            Neighbors::E | Neighbors::SE | Neighbors::S
        );
    }

    #[test]
    fn test_mask_at_i32_limits() {
        let patch = Patch {
            walls: [[WallState::Floor; 3]; 3],
            light: [[1.0; 3]; 3],
        };
        assert_eq!(neighbor_mask(&patch, i32::MAX, i32::MAX, false), Neighbors::empty());
        assert_eq!(resolve(&patch, i32::MIN, 0, true), DirectionKey::None);
    }

    #[test]
    fn test_vision_gating_closes_dark_neighbours() {
        use WallState::{Floor as F, Wall as W};
        let patch = Patch {
            walls: [[W, F, W], [W, W, W], [W, F, W]],
            light: [[0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
        };
        assert_eq!(resolve(&patch, 1, 1, false), DirectionKey::UpDown);
        assert_eq!(resolve(&patch, 1, 1, true), DirectionKey::Up);
    }
}
