//! Packed 4-bit pruning tables and their breadth-first generation.

/// An admissible lower bound on moves-to-goal for every value of a combined
/// coordinate, two entries per byte. Distances of 15 and above are stored as
/// 15, which stays admissible.
pub struct PruningTable {
    data: Vec<u8>,
    len: usize,
}

impl PruningTable {
    /// Lower bound for the combined coordinate `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> u8 {
        let byte = self.data[idx >> 1];
        if idx & 1 == 0 { byte & 0x0f } else { byte >> 4 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn from_raw(data: Vec<u8>, len: usize) -> PruningTable {
        debug_assert_eq!(data.len(), len.div_ceil(2));
        PruningTable { data, len }
    }

    /// Breadth-first scan outward from the goal (combined coordinate 0).
    /// `successor(idx, m)` is the combined coordinate after move `m`; the move
    /// set must be closed under inverses so that forward expansion equals
    /// expansion by pre-images.
    ///
    /// # Panics
    ///
    /// Panics if any entry is unreachable, which would make the table lie.
    pub(crate) fn generate(
        size: usize,
        n_moves: usize,
        successor: impl Fn(usize, usize) -> usize,
    ) -> PruningTable {
        let mut depths = vec![u8::MAX; size];
        depths[0] = 0;
        let mut reached = 1usize;
        let mut depth = 0u8;
        let mut frontier = vec![0u32];

        while !frontier.is_empty() {
            let mut next = Vec::with_capacity(frontier.len());
            for &idx in &frontier {
                for m in 0..n_moves {
                    let nxt = successor(idx as usize, m);
                    if depths[nxt] == u8::MAX {
                        depths[nxt] = depth + 1;
                        next.push(nxt as u32);
                        reached += 1;
                    }
                }
            }
            depth += 1;
            frontier = next;
        }

        assert_eq!(reached, size, "pruning table has unreachable entries");

        let mut data = vec![0u8; size.div_ceil(2)];
        for (i, &d) in depths.iter().enumerate() {
            let nibble = d.min(15);
            if i & 1 == 0 {
                data[i >> 1] |= nibble;
            } else {
                data[i >> 1] |= nibble << 4;
            }
        }
        PruningTable { data, len: size }
    }
}
