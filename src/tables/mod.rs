//! Precomputed move tables and pruning tables.
//!
//! A [`Tables`] value is built once (or loaded from the on-disk cache) and is
//! read-only afterwards; any number of searches may share one instance. The
//! process-wide [`shared`] instance backs the convenience API.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::coord::{
    self, N_CORNER_PERM, N_EDGE8_PERM, N_FLIP, N_SLICE_PERM, N_SLICE_SORTED, N_TWIST,
};
use crate::cube::{ALL_MOVES, CubieCube, Move, PHASE2_MOVES};

mod cache;
mod prune;

pub use prune::PruningTable;

/// Successor coordinates under face turns, one flat row per coordinate value.
/// Phase-1 domains carry all 18 moves, phase-2 domains only the ten
/// G1-preserving ones.
pub struct MoveTables {
    pub twist: Vec<u16>,
    pub flip: Vec<u16>,
    pub slice_sorted: Vec<u16>,
    pub corner_perm: Vec<u16>,
    pub edge8_perm: Vec<u16>,
    pub slice_perm: Vec<u16>,
}

impl MoveTables {
    fn generate() -> MoveTables {
        info!("generating move tables");
        MoveTables {
            twist: move_table(N_TWIST, &ALL_MOVES, coord::decode_twist, coord::encode_twist),
            flip: move_table(N_FLIP, &ALL_MOVES, coord::decode_flip, coord::encode_flip),
            slice_sorted: move_table(
                N_SLICE_SORTED,
                &ALL_MOVES,
                coord::decode_slice_sorted,
                coord::encode_slice_sorted,
            ),
            corner_perm: move_table(
                N_CORNER_PERM,
                &PHASE2_MOVES,
                coord::decode_corner_perm,
                coord::encode_corner_perm,
            ),
            edge8_perm: move_table(
                N_EDGE8_PERM,
                &PHASE2_MOVES,
                coord::decode_edge8_perm,
                coord::encode_edge8_perm,
            ),
            slice_perm: move_table(
                N_SLICE_PERM,
                &PHASE2_MOVES,
                coord::decode_slice,
                coord::encode_slice,
            ),
        }
    }

    #[inline]
    pub fn twist_move(&self, twist: usize, m: usize) -> usize {
        self.twist[twist * ALL_MOVES.len() + m] as usize
    }

    #[inline]
    pub fn flip_move(&self, flip: usize, m: usize) -> usize {
        self.flip[flip * ALL_MOVES.len() + m] as usize
    }

    #[inline]
    pub fn slice_sorted_move(&self, slice: usize, m: usize) -> usize {
        self.slice_sorted[slice * ALL_MOVES.len() + m] as usize
    }

    #[inline]
    pub fn corner_perm_move(&self, corners: usize, m: usize) -> usize {
        self.corner_perm[corners * PHASE2_MOVES.len() + m] as usize
    }

    #[inline]
    pub fn edge8_perm_move(&self, edges: usize, m: usize) -> usize {
        self.edge8_perm[edges * PHASE2_MOVES.len() + m] as usize
    }

    #[inline]
    pub fn slice_perm_move(&self, slice: usize, m: usize) -> usize {
        self.slice_perm[slice * PHASE2_MOVES.len() + m] as usize
    }
}

fn move_table(
    size: usize,
    moves: &[Move],
    decode: impl Fn(u16) -> CubieCube + Sync,
    encode: impl Fn(&CubieCube) -> u16 + Sync,
) -> Vec<u16> {
    let mut table = vec![0u16; size * moves.len()];
    table
        .par_chunks_mut(moves.len())
        .enumerate()
        .for_each(|(x, row)| {
            let cube = decode(x as u16);
            for (m, &mv) in moves.iter().enumerate() {
                row[m] = encode(&cube.apply_move(mv));
            }
        });
    table
}

/// The four admissible heuristics, one per coordinate pair.
pub struct PruningTables {
    /// `(twist, slice-sorted)`, indexed `twist * 495 + slice`.
    pub twist_slice: PruningTable,
    /// `(flip, slice-sorted)`, indexed `flip * 495 + slice`.
    pub flip_slice: PruningTable,
    /// `(corner-perm, slice-perm)`, indexed `corners * 24 + slice`.
    pub corner_slice: PruningTable,
    /// `(edge8-perm, slice-perm)`, indexed `edges * 24 + slice`.
    pub edge8_slice: PruningTable,
}

impl PruningTables {
    fn generate(moves: &MoveTables) -> PruningTables {
        info!("generating pruning tables");
        let twist_slice =
            PruningTable::generate(N_TWIST * N_SLICE_SORTED, ALL_MOVES.len(), |idx, m| {
                let (twist, slice) = (idx / N_SLICE_SORTED, idx % N_SLICE_SORTED);
                moves.twist_move(twist, m) * N_SLICE_SORTED + moves.slice_sorted_move(slice, m)
            });
        let flip_slice =
            PruningTable::generate(N_FLIP * N_SLICE_SORTED, ALL_MOVES.len(), |idx, m| {
                let (flip, slice) = (idx / N_SLICE_SORTED, idx % N_SLICE_SORTED);
                moves.flip_move(flip, m) * N_SLICE_SORTED + moves.slice_sorted_move(slice, m)
            });
        let corner_slice =
            PruningTable::generate(N_CORNER_PERM * N_SLICE_PERM, PHASE2_MOVES.len(), |idx, m| {
                let (corners, slice) = (idx / N_SLICE_PERM, idx % N_SLICE_PERM);
                moves.corner_perm_move(corners, m) * N_SLICE_PERM + moves.slice_perm_move(slice, m)
            });
        let edge8_slice =
            PruningTable::generate(N_EDGE8_PERM * N_SLICE_PERM, PHASE2_MOVES.len(), |idx, m| {
                let (edges, slice) = (idx / N_SLICE_PERM, idx % N_SLICE_PERM);
                moves.edge8_perm_move(edges, m) * N_SLICE_PERM + moves.slice_perm_move(slice, m)
            });
        PruningTables {
            twist_slice,
            flip_slice,
            corner_slice,
            edge8_slice,
        }
    }
}

/// Everything the search reads: move tables plus pruning tables.
pub struct Tables {
    pub moves: MoveTables,
    pub prune: PruningTables,
}

impl Tables {
    /// Builds every table in memory. Takes a few seconds; prefer
    /// [`Tables::load_or_generate`] in long-lived processes.
    pub fn generate() -> Tables {
        let moves = MoveTables::generate();
        let prune = PruningTables::generate(&moves);
        Tables { moves, prune }
    }

    /// Loads the cached blob at `path`, falling back to regeneration when the
    /// file is missing, stale or corrupt. Failure to write the refreshed
    /// cache is logged and otherwise ignored.
    pub fn load_or_generate(path: &Path) -> Tables {
        if let Some(tables) = cache::load(path) {
            info!("loaded tables from {}", path.display());
            return tables;
        }
        let tables = Tables::generate();
        match cache::store(path, &tables) {
            Ok(()) => info!("cached tables at {}", path.display()),
            Err(err) => warn!("could not cache tables at {}: {err}", path.display()),
        }
        tables
    }
}

/// Default location of the table cache.
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join("twophase-tables.bin")
}

#[static_init::dynamic(lazy)]
static TABLES: Tables = Tables::load_or_generate(&default_cache_path());

/// The process-wide tables, built or loaded on first use.
pub fn shared() -> &'static Tables {
    &*TABLES
}
