//! End-to-end scenarios through the public API.

use std::time::Duration;

use rand::Rng;
use rand_pcg::Pcg64Mcg;

use twophase::coord;
use twophase::cube::{CubieCube, FaceCube, Move, parse_moves, random_moves, to_facelets};
use twophase::{SolveError, SolveParams, solve_with, tables};

const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
/// A published 18-move solution; replaying it backwards reproduces the
/// scramble it solves.
const PUBLISHED_SOLUTION: &str = "D2 R' D' F2 B D R2 D2 R' F2 D' F2 U R2 U L2 U L2";

fn inverse_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

fn published_scramble() -> CubieCube {
    let solution = parse_moves(PUBLISHED_SOLUTION).unwrap();
    CubieCube::SOLVED.apply_moves(&inverse_sequence(&solution))
}

fn quick_params() -> SolveParams {
    SolveParams {
        timeout: Duration::from_secs(2),
        ..SolveParams::default()
    }
}

fn solve(facelets: &str) -> Result<String, SolveError> {
    solve_with(tables::shared(), facelets, quick_params())
}

/// Solves and verifies by replay, returning the solution length.
fn assert_solves(facelets: &str) -> usize {
    let solution = solve(facelets).unwrap();
    let start = facelets.parse::<FaceCube>().unwrap().to_cubie().unwrap();
    let moves = parse_moves(&solution).unwrap();
    assert_eq!(
        start.apply_moves(&moves),
        CubieCube::SOLVED,
        "{solution:?} does not solve {facelets}"
    );
    moves.len()
}

#[test]
fn solved_cube_needs_no_moves() {
    assert_eq!(solve(SOLVED_FACELETS).unwrap(), "");
}

#[test]
fn single_turn_is_undone_in_one_move() {
    let turned = to_facelets(&CubieCube::SOLVED.apply_moves(&parse_moves("R").unwrap()));
    let solution = solve(&turned).unwrap();
    assert_eq!(solution, "R'");
}

#[test]
fn superflip_is_solved() {
    // every edge flipped in place, the canonical hardest-known position
    let superflip = CubieCube {
        eo: [1; 12],
        ..CubieCube::SOLVED
    };
    assert!(assert_solves(&to_facelets(&superflip)) <= 24);
}

#[test]
fn published_scramble_is_solved() {
    // the cube that PUBLISHED_SOLUTION solves in 18 moves; any
    // replayed-correct sequence is accepted, not that exact string
    let scramble = published_scramble();
    let solution = parse_moves(PUBLISHED_SOLUTION).unwrap();
    assert_eq!(scramble.apply_moves(&solution), CubieCube::SOLVED);
    assert!(assert_solves(&to_facelets(&scramble)) <= 24);
}

#[test]
fn separator_marks_the_phase_boundary() {
    let params = SolveParams {
        separator: true,
        ..quick_params()
    };
    let facelets = to_facelets(&published_scramble());
    let solution = solve_with(tables::shared(), &facelets, params).unwrap();
    let dots = solution.split_whitespace().filter(|t| *t == ".").count();
    assert_eq!(dots, 1, "{solution}");

    let without_dot = solution
        .split_whitespace()
        .filter(|t| *t != ".")
        .collect::<Vec<_>>()
        .join(" ");
    let start = published_scramble();
    let moves = parse_moves(&without_dot).unwrap();
    assert_eq!(start.apply_moves(&moves), CubieCube::SOLVED);
}

#[test]
fn invalid_symbol_is_reported() {
    assert_eq!(solve(&"A".repeat(54)), Err(SolveError::InvalidSymbol));
}

#[test]
fn invalid_length_is_reported() {
    assert_eq!(
        solve(&SOLVED_FACELETS[..53]),
        Err(SolveError::InvalidLength)
    );
}

#[test]
fn flipped_edge_is_unsolvable() {
    let mut flipped = CubieCube::SOLVED;
    flipped.eo[0] = 1;
    assert_eq!(solve(&to_facelets(&flipped)), Err(SolveError::Unsolvable));
}

#[test]
fn sticker_transposition_is_rejected() {
    let mut stickers: Vec<u8> = SOLVED_FACELETS.bytes().collect();
    stickers.swap(8, 9);
    let result = solve(&String::from_utf8(stickers).unwrap());
    assert!(
        matches!(
            result,
            Err(SolveError::InvalidCube) | Err(SolveError::Unsolvable)
        ),
        "{result:?}"
    );
}

#[test]
fn random_scrambles_replay_to_solved() {
    let mut rng = Pcg64Mcg::new(0x_2fa3_c0bd_36ec_6b11_5c8d_9681_fb97_0317);
    for _ in 0..15 {
        let length = rng.random_range(1..=30);
        let scramble = CubieCube::SOLVED.apply_moves(&random_moves(&mut rng, length));
        let moves = assert_solves(&to_facelets(&scramble));
        assert!(moves <= 24, "length {length} solved in {moves}");
    }
}

/// The heuristics never exceed the length of the solution the search
/// actually produced.
#[test]
fn pruning_bounds_are_admissible() {
    let tables = tables::shared();
    let mut rng = Pcg64Mcg::new(0x_6b11_2fa3_c0bd_36ec_fb97_0317_5c8d_9681);
    for _ in 0..10 {
        let scramble = CubieCube::SOLVED.apply_moves(&random_moves(&mut rng, 30));
        let twist = coord::encode_twist(&scramble) as usize;
        let flip = coord::encode_flip(&scramble) as usize;
        let slice = coord::encode_slice_sorted(&scramble) as usize;
        let h = tables
            .prune
            .twist_slice
            .get(twist * coord::N_SLICE_SORTED + slice)
            .max(
                tables
                    .prune
                    .flip_slice
                    .get(flip * coord::N_SLICE_SORTED + slice),
            ) as usize;

        let solved_in = assert_solves(&to_facelets(&scramble));
        assert!(h <= solved_in, "h = {h}, solution used {solved_in}");
    }
}
