use super::moves::Move;
use crate::SolveError;

/// Corner cubicle (and cubie) index.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner(pub u8);

/// Edge cubicle (and cubie) index.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub u8);

pub const URF: Corner = Corner(0);
pub const UFL: Corner = Corner(1);
pub const ULB: Corner = Corner(2);
pub const UBR: Corner = Corner(3);
pub const DFR: Corner = Corner(4);
pub const DLF: Corner = Corner(5);
pub const DBL: Corner = Corner(6);
pub const DRB: Corner = Corner(7);

pub const UR: Edge = Edge(0);
pub const UF: Edge = Edge(1);
pub const UL: Edge = Edge(2);
pub const UB: Edge = Edge(3);
pub const DR: Edge = Edge(4);
pub const DF: Edge = Edge(5);
pub const DL: Edge = Edge(6);
pub const DB: Edge = Edge(7);
pub const FR: Edge = Edge(8);
pub const FL: Edge = Edge(9);
pub const BL: Edge = Edge(10);
pub const BR: Edge = Edge(11);

impl Corner {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Edge {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// FR, FL, BL and BR live in the equatorial slice of the solved cube.
    #[inline]
    pub fn is_slice(self) -> bool {
        self.0 >= 8
    }
}

/// Cube state at the cubie level: a permutation and an orientation per piece
/// kind. `cp[i]` is the corner sitting in cubicle `i`, `co[i]` its twist
/// (mod 3); `ep`/`eo` likewise for edges with flips mod 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// The six generators, one clockwise quarter turn each, indexed by
/// [`super::Face`].
pub static GENERATORS: [CubieCube; 6] = [
    // U
    CubieCube {
        cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    CubieCube {
        cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // F
    CubieCube {
        cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubieCube {
        cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    CubieCube {
        cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // B
    CubieCube {
        cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0; 8],
        ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0; 12],
    };

    /// Cubie composition `self * rhs`: first `self`, then `rhs`.
    /// Orientations add along the permutation.
    #[must_use]
    pub fn multiply(&self, rhs: &CubieCube) -> CubieCube {
        let mut out = Self::SOLVED;
        for i in 0..8 {
            let from = rhs.cp[i].index();
            out.cp[i] = self.cp[from];
            out.co[i] = (self.co[from] + rhs.co[i]) % 3;
        }
        for i in 0..12 {
            let from = rhs.ep[i].index();
            out.ep[i] = self.ep[from];
            out.eo[i] = (self.eo[from] + rhs.eo[i]) % 2;
        }
        out
    }

    #[must_use]
    pub fn inverse(&self) -> CubieCube {
        let mut out = Self::SOLVED;
        for i in 0..8 {
            out.cp[self.cp[i].index()] = Corner(i as u8);
        }
        for i in 0..8 {
            out.co[i] = (3 - self.co[out.cp[i].index()]) % 3;
        }
        for i in 0..12 {
            out.ep[self.ep[i].index()] = Edge(i as u8);
        }
        for i in 0..12 {
            out.eo[i] = self.eo[out.ep[i].index()];
        }
        out
    }

    #[must_use]
    pub fn apply_move(&self, mv: Move) -> CubieCube {
        let generator = &GENERATORS[mv.face.index()];
        let mut out = *self;
        for _ in 0..mv.turns {
            out = out.multiply(generator);
        }
        out
    }

    #[must_use]
    pub fn apply_moves(&self, moves: &[Move]) -> CubieCube {
        moves.iter().fold(*self, |cube, &mv| cube.apply_move(mv))
    }

    pub fn corner_parity(&self) -> u8 {
        permutation_parity(self.cp.iter().map(|c| c.0))
    }

    pub fn edge_parity(&self) -> u8 {
        permutation_parity(self.ep.iter().map(|e| e.0))
    }

    /// Checks the three solvability invariants: corner twists sum to 0 mod 3,
    /// edge flips sum to 0 mod 2, and the two permutations have equal sign.
    pub fn is_solvable(&self) -> Result<(), SolveError> {
        if self.co.iter().sum::<u8>() % 3 != 0 {
            return Err(SolveError::Unsolvable);
        }
        if self.eo.iter().sum::<u8>() % 2 != 0 {
            return Err(SolveError::Unsolvable);
        }
        if self.corner_parity() != self.edge_parity() {
            return Err(SolveError::Unsolvable);
        }
        Ok(())
    }

    /// Whether this state lies in G1: no twist, no flip, and every slice edge
    /// in a slice position.
    pub fn is_in_g1(&self) -> bool {
        self.co.iter().all(|&o| o == 0)
            && self.eo.iter().all(|&o| o == 0)
            && self.ep[8..].iter().all(|e| e.is_slice())
    }
}

fn permutation_parity(perm: impl Iterator<Item = u8> + Clone) -> u8 {
    let mut inversions = 0;
    for (i, a) in perm.clone().enumerate() {
        inversions += perm.clone().skip(i + 1).filter(|&b| b < a).count();
    }
    (inversions % 2) as u8
}
