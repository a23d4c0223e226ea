//! 54-facelet view of the cube and input validation.

use std::fmt;
use std::str::FromStr;

use super::cubie::{Corner, CubieCube, Edge};
use super::moves::Face;
use crate::SolveError;

/// Facelet positions of each corner cubicle, clockwise starting from the U or
/// D sticker. Row order matches the corner indexing (URF first).
const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF: U9 R1 F3
    [6, 18, 38],  // UFL: U7 F1 L3
    [0, 36, 47],  // ULB: U1 L1 B3
    [2, 45, 11],  // UBR: U3 B1 R3
    [29, 26, 15], // DFR: D3 F9 R7
    [27, 44, 24], // DLF: D1 L9 F7
    [33, 53, 42], // DBL: D7 B9 L7
    [35, 17, 51], // DRB: D9 R9 B7
];

/// Facelet positions of each edge cubicle, U/D (or F/B for slice edges)
/// sticker first. Row order matches the edge indexing (UR first).
const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],  // UR: U6 R2
    [7, 19],  // UF: U8 F2
    [3, 37],  // UL: U4 L2
    [1, 46],  // UB: U2 B2
    [32, 16], // DR: D6 R8
    [28, 25], // DF: D2 F8
    [30, 43], // DL: D4 L8
    [34, 52], // DB: D8 B8
    [23, 12], // FR: F6 R4
    [21, 41], // FL: F4 L6
    [50, 39], // BL: B6 L4
    [48, 14], // BR: B4 R6
];

/// Sticker colours of each corner cubie, in the facelet order above.
const CORNER_COLOR: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

/// Sticker colours of each edge cubie.
const EDGE_COLOR: [[Face; 2]; 12] = [
    [Face::U, Face::R],
    [Face::U, Face::F],
    [Face::U, Face::L],
    [Face::U, Face::B],
    [Face::D, Face::R],
    [Face::D, Face::F],
    [Face::D, Face::L],
    [Face::D, Face::B],
    [Face::F, Face::R],
    [Face::F, Face::L],
    [Face::B, Face::L],
    [Face::B, Face::R],
];

/// Center facelet of each face, in U R F D L B order.
const CENTER: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Cube state as its 54 stickers, U face first, each face row-major.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceCube {
    pub facelets: [Face; 54],
}

impl FromStr for FaceCube {
    type Err = SolveError;

    /// Validates length, symbols, per-colour counts and center distinctness.
    /// Centers define the colour-to-face mapping, so a consistently relabelled
    /// cube string is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 54 {
            return Err(SolveError::InvalidLength);
        }

        let mut raw = [Face::U; 54];
        let mut counts = [0u8; 6];
        for (i, &c) in symbols.iter().enumerate() {
            let face = Face::from_symbol(c).ok_or(SolveError::InvalidSymbol)?;
            raw[i] = face;
            counts[face.index()] += 1;
        }
        if counts != [9; 6] {
            return Err(SolveError::InvalidCounts);
        }

        // map each colour to the face whose center carries it
        let mut colour_to_face = [None; 6];
        for (face_index, &center) in CENTER.iter().enumerate() {
            let colour = raw[center];
            if colour_to_face[colour.index()].is_some() {
                return Err(SolveError::InvalidCounts);
            }
            colour_to_face[colour.index()] = Some(Face::ALL[face_index]);
        }

        let mut facelets = [Face::U; 54];
        for (i, &colour) in raw.iter().enumerate() {
            facelets[i] = colour_to_face[colour.index()].unwrap();
        }
        Ok(FaceCube { facelets })
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for facelet in self.facelets {
            write!(f, "{facelet}")?;
        }
        Ok(())
    }
}

impl From<&CubieCube> for FaceCube {
    fn from(cube: &CubieCube) -> Self {
        let mut facelets = [Face::U; 54];
        for (face_index, &center) in CENTER.iter().enumerate() {
            facelets[center] = Face::ALL[face_index];
        }
        for i in 0..8 {
            let cubie = cube.cp[i].index();
            let ori = cube.co[i] as usize;
            for n in 0..3 {
                facelets[CORNER_FACELET[i][(n + ori) % 3]] = CORNER_COLOR[cubie][n];
            }
        }
        for i in 0..12 {
            let cubie = cube.ep[i].index();
            let ori = cube.eo[i] as usize;
            for n in 0..2 {
                facelets[EDGE_FACELET[i][(n + ori) % 2]] = EDGE_COLOR[cubie][n];
            }
        }
        FaceCube { facelets }
    }
}

impl FaceCube {
    /// Recognises the cubie in every cubicle and checks that the result is a
    /// solvable cube. Fails with [`SolveError::InvalidCube`] when a sticker
    /// triple matches no cubie or a cubie appears twice, and with
    /// [`SolveError::Unsolvable`] on a parity violation.
    pub fn to_cubie(&self) -> Result<CubieCube, SolveError> {
        let f = &self.facelets;
        let mut cube = CubieCube::SOLVED;

        let mut seen_corners = [false; 8];
        for i in 0..8 {
            let ori = (0..3)
                .find(|&o| matches!(f[CORNER_FACELET[i][o]], Face::U | Face::D))
                .ok_or(SolveError::InvalidCube)?;
            let triple = [
                f[CORNER_FACELET[i][ori]],
                f[CORNER_FACELET[i][(ori + 1) % 3]],
                f[CORNER_FACELET[i][(ori + 2) % 3]],
            ];
            let cubie = (0..8)
                .find(|&j| CORNER_COLOR[j] == triple)
                .ok_or(SolveError::InvalidCube)?;
            if seen_corners[cubie] {
                return Err(SolveError::InvalidCube);
            }
            seen_corners[cubie] = true;
            cube.cp[i] = Corner(cubie as u8);
            cube.co[i] = ori as u8;
        }

        let mut seen_edges = [false; 12];
        for i in 0..12 {
            let pair = [f[EDGE_FACELET[i][0]], f[EDGE_FACELET[i][1]]];
            let (cubie, ori) = (0..12)
                .find_map(|j| {
                    if EDGE_COLOR[j] == pair {
                        Some((j, 0))
                    } else if EDGE_COLOR[j] == [pair[1], pair[0]] {
                        Some((j, 1))
                    } else {
                        None
                    }
                })
                .ok_or(SolveError::InvalidCube)?;
            if seen_edges[cubie] {
                return Err(SolveError::InvalidCube);
            }
            seen_edges[cubie] = true;
            cube.ep[i] = Edge(cubie as u8);
            cube.eo[i] = ori;
        }

        cube.is_solvable()?;
        Ok(cube)
    }
}

/// Facelet string of a cubie-level state.
pub fn to_facelets(cube: &CubieCube) -> String {
    FaceCube::from(cube).to_string()
}
