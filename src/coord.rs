//! Bijections between aspects of a [`CubieCube`] and small integer intervals.
//!
//! Each coordinate comes as an `encode_*`/`decode_*` pair. Decoding
//! reconstructs only the aspect the coordinate describes and leaves the rest
//! of the cube solved. Orientations use positional base-3/base-2 codes,
//! edge/corner locations use the rank of a k-subset of n combined with a
//! factorial-base rank of the ordering (rotation form of the Lehmer code).

use crate::cube::{
    BL, BR, CubieCube, DB, DF, DL, DR, Edge, FL, FR, UB, UF, UL, UR,
};

/// Corner orientations: 3^7, the eighth twist is fixed by parity.
pub const N_TWIST: usize = 2187;
/// Edge orientations: 2^11, the twelfth flip is fixed by parity.
pub const N_FLIP: usize = 2048;
/// Locations of the four slice edges, ignoring their order: C(12,4).
pub const N_SLICE_SORTED: usize = 495;
/// Locations and order of the four slice edges: C(12,4) * 4!.
pub const N_SLICE: usize = 11880;
/// Order of the four slice edges inside the slice (G1 only): 4!.
pub const N_SLICE_PERM: usize = 24;
/// Locations and order of the four U-layer edges: 12*11*10*9.
pub const N_UD_EDGES: usize = 11880;
/// Full corner permutation: 8!.
pub const N_CORNER_PERM: usize = 40320;
/// Permutation of the eight non-slice edges over the non-slice cubicles
/// (G1 only): 8!.
pub const N_EDGE8_PERM: usize = 40320;

fn binomial(n: usize, k: usize) -> u32 {
    if n < k {
        return 0;
    }
    let k = k.min(n - k);
    let mut out = 1u32;
    for i in 0..k {
        out = out * (n - i) as u32 / (i + 1) as u32;
    }
    out
}

pub fn encode_twist(cube: &CubieCube) -> u16 {
    cube.co[..7].iter().fold(0, |acc, &o| 3 * acc + o as u16)
}

pub fn decode_twist(twist: u16) -> CubieCube {
    debug_assert!((twist as usize) < N_TWIST);
    let mut cube = CubieCube::SOLVED;
    let mut twist = twist;
    let mut parity = 0;
    for i in (0..7).rev() {
        cube.co[i] = (twist % 3) as u8;
        parity += cube.co[i];
        twist /= 3;
    }
    cube.co[7] = (3 - parity % 3) % 3;
    cube
}

pub fn encode_flip(cube: &CubieCube) -> u16 {
    cube.eo[..11].iter().fold(0, |acc, &o| 2 * acc + o as u16)
}

pub fn decode_flip(flip: u16) -> CubieCube {
    debug_assert!((flip as usize) < N_FLIP);
    let mut cube = CubieCube::SOLVED;
    let mut flip = flip;
    let mut parity = 0;
    for i in (0..11).rev() {
        cube.eo[i] = (flip % 2) as u8;
        parity += cube.eo[i];
        flip /= 2;
    }
    cube.eo[11] = parity % 2;
    cube
}

/// Location-and-order coordinate of the slice edges FR, FL, BL, BR.
/// Zero on the solved cube; below [`N_SLICE_PERM`] exactly on G1 states.
pub fn encode_slice(cube: &CubieCube) -> u16 {
    let mut a = 0u32;
    let mut x = 0usize;
    let mut edge4 = [UR; 4];
    for j in (0..12).rev() {
        if cube.ep[j].is_slice() {
            a += binomial(11 - j, x + 1);
            edge4[3 - x] = cube.ep[j];
            x += 1;
        }
    }
    let mut b = 0u32;
    for j in (1..4).rev() {
        let mut k = 0u32;
        while edge4[j].index() != j + 8 {
            edge4[..=j].rotate_left(1);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    (24 * a + b) as u16
}

pub fn decode_slice(idx: u16) -> CubieCube {
    debug_assert!((idx as usize) < N_SLICE);
    let mut slice_edge = [FR, FL, BL, BR];
    let other_edge = [UR, UF, UL, UB, DR, DF, DL, DB];
    let mut b = (idx % 24) as usize;
    let mut a = (idx / 24) as i32;

    let mut cube = CubieCube::SOLVED;
    // DB is the placeholder; the fill order below puts the real DB back
    cube.ep = [DB; 12];

    for j in 1..4 {
        let mut k = b % (j + 1);
        b /= j + 1;
        while k > 0 {
            slice_edge[..=j].rotate_right(1);
            k -= 1;
        }
    }

    let mut x: i32 = 3;
    for j in 0..12 {
        let c = binomial(11 - j, (x + 1) as usize) as i32;
        if a - c >= 0 {
            cube.ep[j] = slice_edge[(3 - x) as usize];
            a -= c;
            x -= 1;
        }
    }

    let mut next_other = 0;
    for j in 0..12 {
        if !cube.ep[j].is_slice() {
            cube.ep[j] = other_edge[next_other];
            next_other += 1;
        }
    }
    cube
}

/// Subset rank alone: which four cubicles hold slice edges.
pub fn encode_slice_sorted(cube: &CubieCube) -> u16 {
    encode_slice(cube) / 24
}

pub fn decode_slice_sorted(idx: u16) -> CubieCube {
    debug_assert!((idx as usize) < N_SLICE_SORTED);
    decode_slice(idx * 24)
}

fn encode_edges4(cube: &CubieCube, first: usize) -> u16 {
    let mut a = 0u32;
    let mut x = 0usize;
    let mut edge4 = [UR; 4];
    for j in 0..12 {
        let e = cube.ep[j].index();
        if (first..first + 4).contains(&e) {
            a += binomial(j, x + 1);
            edge4[x] = cube.ep[j];
            x += 1;
        }
    }
    let mut b = 0u32;
    for j in (1..4).rev() {
        let mut k = 0u32;
        while edge4[j].index() != j + first {
            edge4[..=j].rotate_left(1);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    (24 * a + b) as u16
}

fn decode_edges4(idx: u16, mut edge4: [Edge; 4], other_edge: [Edge; 8]) -> CubieCube {
    debug_assert!((idx as usize) < N_UD_EDGES);
    let mut b = (idx % 24) as usize;
    let mut a = (idx / 24) as i32;

    let mut cube = CubieCube::SOLVED;
    let placeholder = BR;
    let mut placed = [false; 12];

    for j in 1..4 {
        let mut k = b % (j + 1);
        b /= j + 1;
        while k > 0 {
            edge4[..=j].rotate_right(1);
            k -= 1;
        }
    }

    cube.ep = [placeholder; 12];
    let mut x: i32 = 3;
    for j in (0..12).rev() {
        let c = binomial(j, (x + 1) as usize) as i32;
        if a - c >= 0 {
            cube.ep[j] = edge4[x as usize];
            placed[j] = true;
            a -= c;
            x -= 1;
        }
    }

    let mut next_other = 0;
    for j in 0..12 {
        if !placed[j] {
            cube.ep[j] = other_edge[next_other];
            next_other += 1;
        }
    }
    cube
}

/// Location-and-order coordinate of the U-layer edges UR, UF, UL, UB.
pub fn encode_u_edges(cube: &CubieCube) -> u16 {
    encode_edges4(cube, 0)
}

pub fn decode_u_edges(idx: u16) -> CubieCube {
    decode_edges4(idx, [UR, UF, UL, UB], [DR, DF, DL, DB, FR, FL, BL, BR])
}

/// Location-and-order coordinate of the D-layer edges DR, DF, DL, DB.
pub fn encode_d_edges(cube: &CubieCube) -> u16 {
    encode_edges4(cube, 4)
}

pub fn decode_d_edges(idx: u16) -> CubieCube {
    decode_edges4(idx, [DR, DF, DL, DB], [UR, UF, UL, UB, FR, FL, BL, BR])
}

/// Factorial-base rank of the full corner permutation.
pub fn encode_corner_perm(cube: &CubieCube) -> u16 {
    let mut perm = cube.cp;
    let mut b = 0u32;
    for j in (1..8).rev() {
        let mut k = 0u32;
        while perm[j].index() != j {
            perm[..=j].rotate_left(1);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    b as u16
}

pub fn decode_corner_perm(idx: u16) -> CubieCube {
    debug_assert!((idx as usize) < N_CORNER_PERM);
    let mut cube = CubieCube::SOLVED;
    let mut b = idx as usize;
    for j in 1..8 {
        let mut k = b % (j + 1);
        b /= j + 1;
        while k > 0 {
            cube.cp[..=j].rotate_right(1);
            k -= 1;
        }
    }
    cube
}

/// Factorial-base rank of the eight non-slice edges over cubicles UR..DB.
/// Meaningful only in G1, where those cubicles hold exactly those edges.
pub fn encode_edge8_perm(cube: &CubieCube) -> u16 {
    let mut perm: [Edge; 8] = cube.ep[..8].try_into().unwrap();
    debug_assert!(perm.iter().all(|e| !e.is_slice()));
    let mut b = 0u32;
    for j in (1..8).rev() {
        let mut k = 0u32;
        while perm[j].index() != j {
            perm[..=j].rotate_left(1);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    b as u16
}

pub fn decode_edge8_perm(idx: u16) -> CubieCube {
    debug_assert!((idx as usize) < N_EDGE8_PERM);
    let mut cube = CubieCube::SOLVED;
    let mut b = idx as usize;
    for j in 1..8 {
        let mut k = b % (j + 1);
        b /= j + 1;
        while k > 0 {
            cube.ep[..=j].rotate_right(1);
            k -= 1;
        }
    }
    cube
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::Rng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::cube::{CubieCube, Move, PHASE2_MOVES};

    #[test]
    fn test_solved_coordinates_are_zero() {
        let solved = CubieCube::SOLVED;
        assert_eq!(encode_twist(&solved), 0);
        assert_eq!(encode_flip(&solved), 0);
        assert_eq!(encode_slice(&solved), 0);
        assert_eq!(encode_slice_sorted(&solved), 0);
        assert_eq!(encode_u_edges(&solved), 0);
        assert_eq!(encode_corner_perm(&solved), 0);
        assert_eq!(encode_edge8_perm(&solved), 0);
    }

    #[test]
    fn test_twist_roundtrip() {
        for x in 0..N_TWIST as u16 {
            assert_eq!(encode_twist(&decode_twist(x)), x);
        }
    }

    #[test]
    fn test_flip_roundtrip() {
        for x in 0..N_FLIP as u16 {
            assert_eq!(encode_flip(&decode_flip(x)), x);
        }
    }

    #[test]
    fn test_slice_roundtrip() {
        for x in 0..N_SLICE as u16 {
            assert_eq!(encode_slice(&decode_slice(x)), x);
        }
    }

    #[test]
    fn test_slice_sorted_roundtrip() {
        for x in 0..N_SLICE_SORTED as u16 {
            assert_eq!(encode_slice_sorted(&decode_slice_sorted(x)), x);
        }
    }

    #[test]
    fn test_u_edges_roundtrip() {
        for x in 0..N_UD_EDGES as u16 {
            assert_eq!(encode_u_edges(&decode_u_edges(x)), x);
        }
    }

    #[test]
    fn test_d_edges_roundtrip() {
        for x in 0..N_UD_EDGES as u16 {
            assert_eq!(encode_d_edges(&decode_d_edges(x)), x);
        }
    }

    #[test]
    fn test_corner_perm_roundtrip() {
        for x in 0..N_CORNER_PERM as u16 {
            assert_eq!(encode_corner_perm(&decode_corner_perm(x)), x);
        }
    }

    #[test]
    fn test_edge8_perm_roundtrip() {
        for x in 0..N_EDGE8_PERM as u16 {
            let cube = decode_edge8_perm(x);
            assert!(cube.ep[8..].iter().all(|e| e.is_slice()));
            assert_eq!(encode_edge8_perm(&cube), x);
        }
    }

    #[test]
    fn test_decoded_permutations_are_valid() {
        let mut rng = Pcg64Mcg::new(0x_2fa3_c0bd_5c8d_9681);
        for _ in 0..500 {
            let x = (rng.random::<u32>() as usize % N_SLICE) as u16;
            let cube = decode_slice(x);
            let mut seen = [false; 12];
            for e in cube.ep {
                assert!(!seen[e.index()]);
                seen[e.index()] = true;
            }
        }
    }

    #[test]
    fn test_g1_states_have_small_slice_coordinate() {
        let mut rng = Pcg64Mcg::new(0x_36ec_6b11_fb97_0317);
        let mut cube = CubieCube::SOLVED;
        for _ in 0..200 {
            let mv = PHASE2_MOVES[rng.random::<u32>() as usize % 10];
            cube = cube.apply_move(mv);
            assert!((encode_slice(&cube) as usize) < N_SLICE_PERM);
            assert!((encode_edge8_perm(&cube) as usize) < N_EDGE8_PERM);
        }
    }

    proptest! {
        /// Decoding what was encoded reproduces exactly the aspect the
        /// coordinate captures, on arbitrary reachable states.
        #[test]
        fn proptest_encode_decode_consistency(moves: Vec<Move>) {
            let cube = CubieCube::SOLVED.apply_moves(&moves);

            prop_assert_eq!(decode_twist(encode_twist(&cube)).co, cube.co);
            prop_assert_eq!(decode_flip(encode_flip(&cube)).eo, cube.eo);
            prop_assert_eq!(
                decode_corner_perm(encode_corner_perm(&cube)).cp,
                cube.cp
            );

            let slice = decode_slice(encode_slice(&cube));
            for j in 0..12 {
                prop_assert_eq!(slice.ep[j].is_slice(), cube.ep[j].is_slice());
                if cube.ep[j].is_slice() {
                    prop_assert_eq!(slice.ep[j], cube.ep[j]);
                }
            }

            let u_edges = decode_u_edges(encode_u_edges(&cube));
            let d_edges = decode_d_edges(encode_d_edges(&cube));
            for j in 0..12 {
                if cube.ep[j].index() < 4 {
                    prop_assert_eq!(u_edges.ep[j], cube.ep[j]);
                }
                if (4..8).contains(&cube.ep[j].index()) {
                    prop_assert_eq!(d_edges.ep[j], cube.ep[j]);
                }
            }
        }

        /// Orientation coordinates only ever decode to parity-consistent
        /// orientations.
        #[test]
        fn proptest_decoded_orientations_are_consistent(x in 0u16..2187, y in 0u16..2048) {
            let co = decode_twist(x).co;
            prop_assert_eq!(co.iter().sum::<u8>() % 3, 0);
            let eo = decode_flip(y).eo;
            prop_assert_eq!(eo.iter().sum::<u8>() % 2, 0);
        }
    }
}
