//! Wall states and their vision/collision properties

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::WallCodeError;

/// What occupies a tile
///
/// The discriminants are the legacy integer codes of stored zones; the gaps
/// between them carry no meaning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(i8)]
pub enum WallState {
    /// Off-grid or unknown cell
    None = -1,
    #[default]
    Floor = 0,
    Window = 1,
    DoorOpen = 2,
    Wall = 100,
    Curtain = 101,
    DoorClosed = 102,
}

/// Vision and movement behaviour of a [`WallState`]
///
/// `vision` is true when the tile can be seen through, `collision` is true
/// when it blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallProperty {
    pub vision: bool,
    pub collision: bool,
}

impl WallProperty {
    const fn new(vision: bool, collision: bool) -> Self {
        Self { vision, collision }
    }
}

/// Property table for every wall state
pub const WALL_PROPERTIES: [(WallState, WallProperty); 7] = [
    (WallState::None, WallProperty::new(true, true)),
    (WallState::Floor, WallProperty::new(true, false)),
    (WallState::Window, WallProperty::new(true, true)),
    (WallState::DoorOpen, WallProperty::new(true, false)),
    (WallState::Wall, WallProperty::new(false, true)),
    (WallState::Curtain, WallProperty::new(true, false)),
    (WallState::DoorClosed, WallProperty::new(false, true)),
];

impl WallState {
    /// Legacy integer code
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Vision/collision entry from [`WALL_PROPERTIES`]
    pub const fn property(self) -> WallProperty {
        let mut i = 0;
        while i < WALL_PROPERTIES.len() {
            if WALL_PROPERTIES[i].0 as i8 == self as i8 {
                return WALL_PROPERTIES[i].1;
            }
            i += 1;
        }
        // Every variant has a row in the table.
        WallProperty::new(true, true)
    }

    pub const fn blocks_vision(self) -> bool {
        !self.property().vision
    }

    pub const fn blocks_movement(self) -> bool {
        self.property().collision
    }

    /// Whether a neighbouring tile of this state counts as open space when
    /// choosing a wall sprite
    pub const fn is_open(self) -> bool {
        !matches!(self, WallState::Wall | WallState::None)
    }

    pub const fn is_door(self) -> bool {
        matches!(self, WallState::DoorOpen | WallState::DoorClosed)
    }

    /// ASCII representation used by text frontends
    pub const fn symbol(self) -> char {
        match self {
            WallState::None => ' ',
            WallState::Floor => '.',
            WallState::Window => '=',
            WallState::DoorOpen => '/',
            WallState::Wall => '#',
            WallState::Curtain => '"',
            WallState::DoorClosed => '+',
        }
    }
}

impl TryFrom<i8> for WallState {
    type Error = WallCodeError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(WallState::None),
            0 => Ok(WallState::Floor),
            1 => Ok(WallState::Window),
            2 => Ok(WallState::DoorOpen),
            100 => Ok(WallState::Wall),
            101 => Ok(WallState::Curtain),
            102 => Ok(WallState::DoorClosed),
            other => Err(WallCodeError(other)),
        }
    }
}

impl From<WallState> for i8 {
    fn from(state: WallState) -> Self {
        state.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_property_table() {
        let expect = |state: WallState, vision: bool, collision: bool| {
            let prop = state.property();
            assert_eq!(prop.vision, vision, "{state} vision");
            assert_eq!(prop.collision, collision, "{state} collision");
        };
        expect(WallState::Wall, false, true);
        expect(WallState::DoorClosed, false, true);
        expect(WallState::Floor, true, false);
        expect(WallState::DoorOpen, true, false);
        expect(WallState::Window, true, true);
        expect(WallState::Curtain, true, false);
        expect(WallState::None, true, true);
    }

    #[test]
    fn test_table_covers_every_state_once() {
        for state in WallState::iter() {
            let rows = WALL_PROPERTIES.iter().filter(|(s, _)| *s == state).count();
            assert_eq!(rows, 1, "{state} should have exactly one row");
        }
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(WallState::None.code(), -1);
        assert_eq!(WallState::Wall.code(), 100);
        assert_eq!(WallState::DoorClosed.code(), 102);
        for state in WallState::iter() {
            assert_eq!(WallState::try_from(state.code()), Ok(state));
        }
        assert_eq!(WallState::try_from(3), Err(WallCodeError(3)));
    }

    #[test]
    fn test_openness() {
        assert!(!WallState::Wall.is_open());
        assert!(!WallState::None.is_open());
        assert!(WallState::Floor.is_open());
        assert!(WallState::DoorClosed.is_open());
        assert!(WallState::Window.is_open());
    }

    #[test]
    fn test_default_is_floor() {
        assert_eq!(WallState::default(), WallState::Floor);
    }
}
