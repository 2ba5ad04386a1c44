//! Mask-indexed direction table
//!
//! The table is built at compile time from one rule per orthogonal pattern.
//! Each rule lists the diagonals that refine it and the key for every
//! combination of those diagonals; diagonals not listed never matter.

use super::{DirectionKey as K, Neighbors};

const N: u8 = Neighbors::N.bits();
const NE: u8 = Neighbors::NE.bits();
const E: u8 = Neighbors::E.bits();
const SE: u8 = Neighbors::SE.bits();
const S: u8 = Neighbors::S.bits();
const SW: u8 = Neighbors::SW.bits();
const W: u8 = Neighbors::W.bits();
const NW: u8 = Neighbors::NW.bits();

#[derive(Clone, Copy)]
struct Rule {
    /// Diagonals consulted, lowest bit of the key index first
    diagonals: &'static [u8],
    /// `2^diagonals.len()` keys
    keys: &'static [K],
}

const fn rule(diagonals: &'static [u8], keys: &'static [K]) -> Rule {
    Rule { diagonals, keys }
}

/// Rules indexed by `N << 3 | S << 2 | W << 1 | E`
const RULES: [Rule; 16] = [
    // 0b0000: diagonal openings only
    rule(
        &[NW, NE, SW, SE],
        &[
            K::None,
            K::CornerUpLeft,
            K::CornerUpRight,
            K::CornerUp,
            K::CornerDownLeft,
            K::CornerLeft,
            K::CornerForward,
            K::CornerNotDownRight,
            K::CornerDownRight,
            K::CornerBack,
            K::CornerRight,
            K::CornerNotDownLeft,
            K::CornerDown,
            K::CornerNotUpRight,
            K::CornerNotUpLeft,
            K::CornerAll,
        ],
    ),
    // 0b0001: E
    rule(&[NW, SW], &[K::Right, K::RightCu, K::RightCd, K::RightCud]),
    // 0b0010: W
    rule(&[NE, SE], &[K::Left, K::LeftCu, K::LeftCd, K::LeftCud]),
    // 0b0011: W E
    rule(&[], &[K::LeftRight]),
    // 0b0100: S
    rule(&[NW, NE], &[K::Down, K::DownCl, K::DownCr, K::DownClr]),
    // 0b0101: S E
    rule(&[NW], &[K::DownRight, K::DownRightC]),
    // 0b0110: S W
    rule(&[NE], &[K::DownLeft, K::DownLeftC]),
    // 0b0111: S W E
    rule(&[], &[K::LeftRightDown]),
    // 0b1000: N
    rule(&[SW, SE], &[K::Up, K::UpCl, K::UpCr, K::UpClr]),
    // 0b1001: N E
    rule(&[SW], &[K::UpRight, K::UpRightC]),
    // 0b1010: N W
    rule(&[SE], &[K::UpLeft, K::UpLeftC]),
    // 0b1011: N W E
    rule(&[], &[K::LeftRightUp]),
    // 0b1100: N S
    rule(&[], &[K::UpDown]),
    // 0b1101: N S E
    rule(&[], &[K::UpDownRight]),
    // 0b1110: N S W
    rule(&[], &[K::UpDownLeft]),
    // 0b1111
    rule(&[], &[K::Pillar]),
];

const fn orthogonal_index(mask: u8) -> usize {
    let mut idx = 0;
    if mask & N != 0 {
        idx |= 0b1000;
    }
    if mask & S != 0 {
        idx |= 0b0100;
    }
    if mask & W != 0 {
        idx |= 0b0010;
    }
    if mask & E != 0 {
        idx |= 0b0001;
    }
    idx
}

const fn build_table() -> [K; 256] {
    let mut table = [K::None; 256];
    let mut mask = 0;
    while mask < 256 {
        let bits = mask as u8;
        let rule = RULES[orthogonal_index(bits)];
        let mut key_idx = 0;
        let mut i = 0;
        while i < rule.diagonals.len() {
            if bits & rule.diagonals[i] != 0 {
                key_idx |= 1 << i;
            }
            i += 1;
        }
        table[mask] = rule.keys[key_idx];
        mask += 1;
    }
    table
}

/// Direction key for every neighbour mask
pub static DIRECTION_TABLE: [K; 256] = build_table();

/// Direction key of a neighbour mask
pub fn resolve_mask(mask: Neighbors) -> K {
    DIRECTION_TABLE[mask.bits() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_sizes() {
        for (idx, rule) in RULES.iter().enumerate() {
            assert_eq!(
                rule.keys.len(),
                1 << rule.diagonals.len(),
                "rule {idx:04b} has the wrong number of keys"
            );
        }
    }

    #[test]
    fn test_unlisted_diagonals_are_ignored() {
        let up_down = Neighbors::N | Neighbors::S;
        assert_eq!(resolve_mask(up_down), K::UpDown);
        assert_eq!(resolve_mask(up_down | Neighbors::NE | Neighbors::SW), K::UpDown);
    }

    #[test]
    fn test_enclosed_and_open() {
        assert_eq!(resolve_mask(Neighbors::empty()), K::None);
        assert_eq!(resolve_mask(Neighbors::all()), K::Pillar);
        assert_eq!(
            resolve_mask(Neighbors::NE | Neighbors::NW | Neighbors::SE | Neighbors::SW),
            K::CornerAll
        );
    }
}
