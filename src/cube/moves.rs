use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use proptest::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One of the six cube faces, in the order used throughout: U, R, F, D, L, B.
///
/// The order matters: opposite faces are three apart, and move tables index
/// their columns by `face * 3 + turns - 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U = 0,
    R = 1,
    F = 2,
    D = 3,
    L = 4,
    B = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face on the other end of the same axis.
    pub fn opposite(self) -> Face {
        Self::ALL[(self as usize + 3) % 6]
    }

    pub fn from_symbol(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ['U', 'R', 'F', 'D', 'L', 'B'][self.index()])
    }
}

/// One face turn in the half-turn metric: a face and 1..=3 clockwise quarter
/// turns. `turns == 2` is a half turn, `turns == 3` prints as `'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turns: u8,
}

/// All 18 face turns, grouped by face: U U2 U' R R2 R' ... B B2 B'.
pub static ALL_MOVES: [Move; 18] = [
    Move::new(Face::U, 1),
    Move::new(Face::U, 2),
    Move::new(Face::U, 3),
    Move::new(Face::R, 1),
    Move::new(Face::R, 2),
    Move::new(Face::R, 3),
    Move::new(Face::F, 1),
    Move::new(Face::F, 2),
    Move::new(Face::F, 3),
    Move::new(Face::D, 1),
    Move::new(Face::D, 2),
    Move::new(Face::D, 3),
    Move::new(Face::L, 1),
    Move::new(Face::L, 2),
    Move::new(Face::L, 3),
    Move::new(Face::B, 1),
    Move::new(Face::B, 2),
    Move::new(Face::B, 3),
];

/// The ten moves that preserve G1: any turn of U or D, half turns elsewhere.
pub static PHASE2_MOVES: [Move; 10] = [
    Move::new(Face::U, 1),
    Move::new(Face::U, 2),
    Move::new(Face::U, 3),
    Move::new(Face::R, 2),
    Move::new(Face::F, 2),
    Move::new(Face::D, 1),
    Move::new(Face::D, 2),
    Move::new(Face::D, 3),
    Move::new(Face::L, 2),
    Move::new(Face::B, 2),
];

impl Move {
    pub const fn new(face: Face, turns: u8) -> Move {
        Move { face, turns }
    }

    /// Column of this move in an 18-wide move table.
    #[inline]
    pub fn index(self) -> usize {
        self.face.index() * 3 + self.turns as usize - 1
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        Move::new(self.face, 4 - self.turns)
    }

    /// Whether this move keeps a G1 state inside G1.
    pub fn preserves_g1(self) -> bool {
        matches!(self.face, Face::U | Face::D) || self.turns == 2
    }

    /// Whether this move may follow a turn of `prev` in a canonical sequence:
    /// never the same face twice, and for opposite faces only the U-before-D,
    /// R-before-L, F-before-B order survives.
    pub fn is_allowed_after(self, prev: Option<Face>) -> bool {
        let Some(prev) = prev else { return true };
        prev != self.face && prev.index() != self.face.index() + 3
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turns {
            1 => write!(f, "{}", self.face),
            2 => write!(f, "{}2", self.face),
            _ => write!(f, "{}'", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(Face::from_symbol)
            .ok_or("unknown face")?;
        let turns = match chars.next() {
            None => 1,
            Some('2') => 2,
            Some('\'') => 3,
            Some(_) => return Err("bad turn suffix"),
        };
        if chars.next().is_some() {
            return Err("trailing characters after move");
        }
        Ok(Move::new(face, turns))
    }
}

/// Parses a whitespace-separated move sequence like `"R U R' U'"`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, &'static str> {
    s.split_whitespace().map(Move::from_str).collect()
}

/// A uniformly random move sequence; useful for scrambles.
pub fn random_moves(rng: &mut impl Rng, count: usize) -> Vec<Move> {
    (0..count)
        .map(|_| *ALL_MOVES.choose(rng).unwrap())
        .collect()
}

#[cfg(test)]
impl Arbitrary for Move {
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        prop::sample::select(ALL_MOVES.to_vec())
    }

    type Strategy = prop::sample::Select<Move>;
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_notation_roundtrip() {
        for &mv in &ALL_MOVES {
            assert_eq!(mv, mv.to_string().parse().unwrap());
        }
        assert_eq!(
            parse_moves("D2 R' D' F2 B D R2 D2 R'").unwrap().len(),
            9
        );
        assert!(parse_moves("R X").is_err());
        assert!(parse_moves("R2'").is_err());
    }

    #[test]
    fn test_move_indexing() {
        for (i, &mv) in ALL_MOVES.iter().enumerate() {
            assert_eq!(mv.index(), i);
        }
    }

    #[test]
    fn test_successor_filter() {
        use Face::*;

        // same face never repeats
        for &mv in &ALL_MOVES {
            assert!(!mv.is_allowed_after(Some(mv.face)));
        }
        // opposite faces in canonical order only
        assert!(Move::new(D, 1).is_allowed_after(Some(U)));
        assert!(!Move::new(U, 1).is_allowed_after(Some(D)));
        assert!(Move::new(L, 2).is_allowed_after(Some(R)));
        assert!(!Move::new(R, 2).is_allowed_after(Some(L)));
        assert!(Move::new(B, 3).is_allowed_after(Some(F)));
        assert!(!Move::new(F, 3).is_allowed_after(Some(B)));
        // different axes always fine
        assert!(Move::new(R, 1).is_allowed_after(Some(U)));
    }

    #[test]
    fn test_phase2_moves_preserve_g1() {
        let phase2 = PHASE2_MOVES.iter().copied().collect_vec();
        for &mv in &ALL_MOVES {
            assert_eq!(mv.preserves_g1(), phase2.contains(&mv), "{mv}");
        }
    }
}
