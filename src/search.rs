//! Two-phase IDA* search.
//!
//! Phase 1 drives (twist, flip, slice) to zero, i.e. into G1, by iterative
//! deepening over all 18 moves. Every phase-1 prefix that enters G1 hands the
//! residual cubie state to phase 2, which finishes the solve with the ten
//! G1-preserving moves. After a first complete solution the phase-1 bound
//! keeps growing so shorter totals can still be found, until the deadline
//! passes or no shorter total is possible.

use std::time::{Duration, Instant};

use itertools::Itertools;
use log::debug;

use crate::SolveError;
use crate::coord::{self, N_SLICE_PERM, N_SLICE_SORTED};
use crate::cube::{ALL_MOVES, CubieCube, Face, FaceCube, Move, PHASE2_MOVES};
use crate::tables::Tables;

/// How many node expansions may pass between two deadline reads.
const NODES_PER_CLOCK_CHECK: u32 = 4096;

/// Longest phase-2 tail considered for any single phase-1 prefix.
const MAX_PHASE2_DEPTH: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolveParams {
    /// Deepest phase-1 bound to try.
    pub max_depth: u8,
    /// Wall-clock budget for the whole solve.
    pub timeout: Duration,
    /// Insert a `.` token between the two phases of the solution string.
    pub separator: bool,
    /// Keep improving on the first solution until the deadline. When false,
    /// the first complete solution is returned immediately.
    pub optimize: bool,
}

impl Default for SolveParams {
    fn default() -> Self {
        SolveParams {
            max_depth: 21,
            timeout: Duration::from_secs(10),
            separator: false,
            optimize: true,
        }
    }
}

/// A complete solution with the phase boundary retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub phase1_len: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Standard whitespace-separated notation; `separator` marks the phase
    /// boundary with a `.` token.
    pub fn format(&self, separator: bool) -> String {
        if separator && !self.is_empty() {
            let (phase1, phase2) = self.moves.split_at(self.phase1_len);
            phase1
                .iter()
                .map(ToString::to_string)
                .chain(std::iter::once(".".to_owned()))
                .chain(phase2.iter().map(ToString::to_string))
                .join(" ")
        } else {
            self.moves.iter().join(" ")
        }
    }
}

/// One solver configuration bound to a set of tables. Solving borrows the
/// tables read-only, so solvers are cheap and many may share one table set.
pub struct Solver<'a> {
    tables: &'a Tables,
    params: SolveParams,
}

impl<'a> Solver<'a> {
    pub fn new(tables: &'a Tables, params: SolveParams) -> Self {
        Solver { tables, params }
    }

    /// Validates `facelets` and returns a solving sequence in standard
    /// notation, or the empty string for an already-solved cube.
    pub fn solve(&self, facelets: &str) -> Result<String, SolveError> {
        let face_cube: FaceCube = facelets.parse()?;
        let cube = face_cube.to_cubie()?;
        Ok(self.solve_cube(&cube)?.format(self.params.separator))
    }

    /// Solves an already-validated cubie state.
    pub fn solve_cube(&self, cube: &CubieCube) -> Result<Solution, SolveError> {
        if *cube == CubieCube::SOLVED {
            return Ok(Solution::default());
        }

        let mut search = Search {
            tables: self.tables,
            scramble: *cube,
            deadline: Instant::now() + self.params.timeout,
            nodes_until_clock_check: NODES_PER_CLOCK_CHECK,
            out_of_time: false,
            stop_at_first: !self.params.optimize,
            path1: Vec::with_capacity(self.params.max_depth as usize),
            path2: Vec::with_capacity(MAX_PHASE2_DEPTH),
            best: None,
        };

        let twist = coord::encode_twist(cube) as usize;
        let flip = coord::encode_flip(cube) as usize;
        let slice = coord::encode_slice_sorted(cube) as usize;

        let mut bound = search.phase1_bound(twist, flip, slice);
        while bound <= self.params.max_depth as usize {
            if search
                .best
                .as_ref()
                .is_some_and(|best| bound >= best.len())
            {
                break; // a deeper phase 1 can no longer shorten the total
            }
            search.phase1(twist, flip, slice, bound, None);
            if search.finished() {
                break;
            }
            bound += 1;
        }

        search.best.ok_or(SolveError::NoSolution)
    }
}

struct Search<'a> {
    tables: &'a Tables,
    scramble: CubieCube,
    deadline: Instant,
    nodes_until_clock_check: u32,
    out_of_time: bool,
    stop_at_first: bool,
    path1: Vec<Move>,
    path2: Vec<Move>,
    best: Option<Solution>,
}

impl Search<'_> {
    fn phase1_bound(&self, twist: usize, flip: usize, slice: usize) -> usize {
        self.tables
            .prune
            .twist_slice
            .get(twist * N_SLICE_SORTED + slice)
            .max(self.tables.prune.flip_slice.get(flip * N_SLICE_SORTED + slice))
            as usize
    }

    fn phase2_bound(&self, corners: usize, edges: usize, slice: usize) -> usize {
        self.tables
            .prune
            .corner_slice
            .get(corners * N_SLICE_PERM + slice)
            .max(self.tables.prune.edge8_slice.get(edges * N_SLICE_PERM + slice))
            as usize
    }

    /// True once the search must unwind: deadline passed, or a solution is in
    /// hand and improving was not requested.
    fn finished(&self) -> bool {
        self.out_of_time || (self.stop_at_first && self.best.is_some())
    }

    /// Amortised deadline poll, called once per expanded node.
    fn check_deadline(&mut self) -> bool {
        self.nodes_until_clock_check -= 1;
        if self.nodes_until_clock_check == 0 {
            self.nodes_until_clock_check = NODES_PER_CLOCK_CHECK;
            if Instant::now() >= self.deadline {
                self.out_of_time = true;
            }
        }
        self.out_of_time
    }

    fn phase1(&mut self, twist: usize, flip: usize, slice: usize, togo: usize, last: Option<Face>) {
        if self.check_deadline() {
            return;
        }
        if togo == 0 {
            // Entering G1 on a G1-preserving move means a shorter prefix
            // already reached G1; that prefix is found at a lower bound.
            if twist == 0
                && flip == 0
                && slice == 0
                && self.path1.last().is_none_or(|mv| !mv.preserves_g1())
            {
                self.phase2_for_current_prefix();
            }
            return;
        }
        for &mv in &ALL_MOVES {
            if !mv.is_allowed_after(last) {
                continue;
            }
            let m = mv.index();
            let next_twist = self.tables.moves.twist_move(twist, m);
            let next_flip = self.tables.moves.flip_move(flip, m);
            let next_slice = self.tables.moves.slice_sorted_move(slice, m);
            if self.phase1_bound(next_twist, next_flip, next_slice) >= togo {
                continue; // cannot reach G1 in the remaining togo - 1 moves
            }
            self.path1.push(mv);
            self.phase1(next_twist, next_flip, next_slice, togo - 1, Some(mv.face));
            self.path1.pop();
            if self.finished() {
                return;
            }
        }
    }

    /// Runs phase 2 for the G1 state reached by the current phase-1 prefix.
    fn phase2_for_current_prefix(&mut self) {
        let depth1 = self.path1.len();
        let budget = match &self.best {
            // only totals strictly below the incumbent are interesting
            Some(best) => match best.len().checked_sub(depth1 + 1) {
                Some(room) => room.min(MAX_PHASE2_DEPTH),
                None => return,
            },
            None => MAX_PHASE2_DEPTH,
        };

        let cube = self.scramble.apply_moves(&self.path1);
        let corners = coord::encode_corner_perm(&cube) as usize;
        let edges = coord::encode_edge8_perm(&cube) as usize;
        let slice = coord::encode_slice(&cube) as usize;

        let bound = self.phase2_bound(corners, edges, slice);
        if bound > budget {
            return;
        }
        if bound == 0 {
            // the phase-1 prefix happened to solve the cube outright
            self.record_solution();
            return;
        }

        let last = self.path1.last().map(|mv| mv.face);
        for bound in bound..=budget {
            if self.phase2(corners, edges, slice, bound, last) {
                self.record_solution();
                return;
            }
            if self.finished() {
                return;
            }
        }
    }

    fn phase2(
        &mut self,
        corners: usize,
        edges: usize,
        slice: usize,
        togo: usize,
        last: Option<Face>,
    ) -> bool {
        if self.check_deadline() {
            return false;
        }
        if togo == 0 {
            return corners == 0 && edges == 0 && slice == 0;
        }
        for (m, &mv) in PHASE2_MOVES.iter().enumerate() {
            if !mv.is_allowed_after(last) {
                continue;
            }
            let next_corners = self.tables.moves.corner_perm_move(corners, m);
            let next_edges = self.tables.moves.edge8_perm_move(edges, m);
            let next_slice = self.tables.moves.slice_perm_move(slice, m);
            if self.phase2_bound(next_corners, next_edges, next_slice) >= togo {
                continue;
            }
            self.path2.push(mv);
            if self.phase2(next_corners, next_edges, next_slice, togo - 1, Some(mv.face)) {
                return true;
            }
            self.path2.pop();
            if self.finished() {
                return false;
            }
        }
        false
    }

    fn record_solution(&mut self) {
        let total = self.path1.len() + self.path2.len();
        if self.best.as_ref().is_none_or(|best| total < best.len()) {
            debug!(
                "solution: {} + {} = {total} moves",
                self.path1.len(),
                self.path2.len()
            );
            let mut moves = self.path1.clone();
            moves.extend_from_slice(&self.path2);
            self.best = Some(Solution {
                moves,
                phase1_len: self.path1.len(),
            });
        }
        self.path2.clear();
    }
}
