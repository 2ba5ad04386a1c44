//! Nested-conditional wall classifier
//!
//! Same classification as [`DIRECTION_TABLE`](super::DIRECTION_TABLE) written
//! as a decision tree. Not used on the hot path; the table is checked against
//! it for every mask.

use super::{DirectionKey, Neighbors};

/// Classify a neighbour mask by walking the decision tree
pub fn resolve_reference(mask: Neighbors) -> DirectionKey {
    let u = mask.contains(Neighbors::N);
    let d = mask.contains(Neighbors::S);
    let l = mask.contains(Neighbors::W);
    let r = mask.contains(Neighbors::E);
    let ul = mask.contains(Neighbors::NW);
    let ur = mask.contains(Neighbors::NE);
    let dl = mask.contains(Neighbors::SW);
    let dr = mask.contains(Neighbors::SE);

    if u && d {
        return match (l, r) {
            (true, true) => DirectionKey::Pillar,
            (true, false) => DirectionKey::UpDownLeft,
            (false, true) => DirectionKey::UpDownRight,
            (false, false) => DirectionKey::UpDown,
        };
    }

    if u {
        if l && r {
            DirectionKey::LeftRightUp
        } else if l {
            if dr {
                DirectionKey::UpLeftC
            } else {
                DirectionKey::UpLeft
            }
        } else if r {
            if dl {
                DirectionKey::UpRightC
            } else {
                DirectionKey::UpRight
            }
        } else if dl && dr {
            DirectionKey::UpClr
        } else if dl {
            DirectionKey::UpCl
        } else if dr {
            DirectionKey::UpCr
        } else {
            DirectionKey::Up
        }
    } else if d {
        if l && r {
            DirectionKey::LeftRightDown
        } else if l {
            if ur {
                DirectionKey::DownLeftC
            } else {
                DirectionKey::DownLeft
            }
        } else if r {
            if ul {
                DirectionKey::DownRightC
            } else {
                DirectionKey::DownRight
            }
        } else if ul && ur {
            DirectionKey::DownClr
        } else if ul {
            DirectionKey::DownCl
        } else if ur {
            DirectionKey::DownCr
        } else {
            DirectionKey::Down
        }
    } else if l && r {
        DirectionKey::LeftRight
    } else if l {
        if ur && dr {
            DirectionKey::LeftCud
        } else if ur {
            DirectionKey::LeftCu
        } else if dr {
            DirectionKey::LeftCd
        } else {
            DirectionKey::Left
        }
    } else if r {
        if ul && dl {
            DirectionKey::RightCud
        } else if ul {
            DirectionKey::RightCu
        } else if dl {
            DirectionKey::RightCd
        } else {
            DirectionKey::Right
        }
    } else {
        corner_only(ul, ur, dl, dr)
    }
}

fn corner_only(ul: bool, ur: bool, dl: bool, dr: bool) -> DirectionKey {
    match (ur, ul, dr, dl) {
        (true, true, true, true) => DirectionKey::CornerAll,
        (true, true, true, false) => DirectionKey::CornerNotDownLeft,
        (true, true, false, true) => DirectionKey::CornerNotDownRight,
        (true, true, false, false) => DirectionKey::CornerUp,
        (true, false, true, true) => DirectionKey::CornerNotUpLeft,
        (true, false, true, false) => DirectionKey::CornerRight,
        (true, false, false, true) => DirectionKey::CornerForward,
        (true, false, false, false) => DirectionKey::CornerUpRight,
        (false, true, true, true) => DirectionKey::CornerNotUpRight,
        (false, true, true, false) => DirectionKey::CornerBack,
        (false, true, false, true) => DirectionKey::CornerLeft,
        (false, true, false, false) => DirectionKey::CornerUpLeft,
        (false, false, true, true) => DirectionKey::CornerDown,
        (false, false, true, false) => DirectionKey::CornerDownRight,
        (false, false, false, true) => DirectionKey::CornerDownLeft,
        (false, false, false, false) => DirectionKey::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autotile::resolve_mask;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_matches_tree_for_every_mask() {
        for bits in 0..=u8::MAX {
            let mask = Neighbors::from_bits_retain(bits);
            assert_eq!(
                resolve_mask(mask),
                resolve_reference(mask),
                "mask {bits:08b} disagrees"
            );
        }
    }

    #[test]
    fn test_every_key_is_reachable() {
        let reached: HashSet<DirectionKey> = (0..=u8::MAX)
            .map(|bits| resolve_reference(Neighbors::from_bits_retain(bits)))
            .collect();
        for key in DirectionKey::iter() {
            assert!(reached.contains(&key), "{key:?} is never produced");
        }
    }

    #[test]
    fn test_single_opening_with_trailing_corner() {
        assert_eq!(
            resolve_reference(Neighbors::N | Neighbors::SE),
            DirectionKey::UpCr
        );
        assert_eq!(
            resolve_reference(Neighbors::N | Neighbors::W | Neighbors::SE),
            DirectionKey::UpLeftC
        );
        // Leading-side corners do not change an edge
        assert_eq!(
            resolve_reference(Neighbors::N | Neighbors::NE | Neighbors::NW),
            DirectionKey::Up
        );
    }
}
