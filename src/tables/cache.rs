//! On-disk table cache: a single version-gated, checksummed binary blob.
//!
//! Layout: `b"TPTB"`, version (u32 LE), payload length (u64 LE), FNV-1a
//! checksum of the payload (u64 LE), then the payload itself — every move
//! table as a little-endian u16 stream followed by the four packed pruning
//! tables. Anything that fails validation is treated as absent.

use std::io;
use std::path::Path;

use log::warn;

use super::{MoveTables, PruningTable, PruningTables, Tables};
use crate::coord::{N_CORNER_PERM, N_EDGE8_PERM, N_FLIP, N_SLICE_PERM, N_SLICE_SORTED, N_TWIST};
use crate::cube::{ALL_MOVES, PHASE2_MOVES};

const MAGIC: [u8; 4] = *b"TPTB";
/// Bump whenever any table layout or encoding changes.
const VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 8 + 8;

pub(super) fn load(path: &Path) -> Option<Tables> {
    let bytes = std::fs::read(path).ok()?;
    let tables = parse(&bytes);
    if tables.is_none() {
        warn!("discarding table cache {}: stale or corrupt", path.display());
    }
    tables
}

pub(super) fn store(path: &Path, tables: &Tables) -> io::Result<()> {
    let payload = payload_bytes(tables);
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&fnv1a(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    std::fs::write(path, bytes)
}

fn parse(bytes: &[u8]) -> Option<Tables> {
    if bytes.len() < HEADER_LEN || bytes[..4] != MAGIC {
        return None;
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let payload_len = u64::from_le_bytes(bytes[8..16].try_into().unwrap()) as usize;
    let checksum = u64::from_le_bytes(bytes[16..24].try_into().unwrap());
    let payload = &bytes[HEADER_LEN..];
    if version != VERSION || payload.len() != payload_len || fnv1a(payload) != checksum {
        return None;
    }

    let mut reader = Reader { payload, at: 0 };
    let moves = MoveTables {
        twist: reader.u16s(N_TWIST * ALL_MOVES.len())?,
        flip: reader.u16s(N_FLIP * ALL_MOVES.len())?,
        slice_sorted: reader.u16s(N_SLICE_SORTED * ALL_MOVES.len())?,
        corner_perm: reader.u16s(N_CORNER_PERM * PHASE2_MOVES.len())?,
        edge8_perm: reader.u16s(N_EDGE8_PERM * PHASE2_MOVES.len())?,
        slice_perm: reader.u16s(N_SLICE_PERM * PHASE2_MOVES.len())?,
    };
    let prune = PruningTables {
        twist_slice: reader.prune(N_TWIST * N_SLICE_SORTED)?,
        flip_slice: reader.prune(N_FLIP * N_SLICE_SORTED)?,
        corner_slice: reader.prune(N_CORNER_PERM * N_SLICE_PERM)?,
        edge8_slice: reader.prune(N_EDGE8_PERM * N_SLICE_PERM)?,
    };
    if reader.at != payload.len() {
        return None;
    }
    Some(Tables { moves, prune })
}

fn payload_bytes(tables: &Tables) -> Vec<u8> {
    let mut out = Vec::new();
    for table in [
        &tables.moves.twist,
        &tables.moves.flip,
        &tables.moves.slice_sorted,
        &tables.moves.corner_perm,
        &tables.moves.edge8_perm,
        &tables.moves.slice_perm,
    ] {
        for &value in table {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    for table in [
        &tables.prune.twist_slice,
        &tables.prune.flip_slice,
        &tables.prune.corner_slice,
        &tables.prune.edge8_slice,
    ] {
        out.extend_from_slice(table.raw());
    }
    out
}

struct Reader<'a> {
    payload: &'a [u8],
    at: usize,
}

impl Reader<'_> {
    fn take(&mut self, len: usize) -> Option<&[u8]> {
        let bytes = self.payload.get(self.at..self.at + len)?;
        self.at += len;
        Some(bytes)
    }

    fn u16s(&mut self, count: usize) -> Option<Vec<u16>> {
        let bytes = self.take(count * 2)?;
        Some(
            bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }

    fn prune(&mut self, entries: usize) -> Option<PruningTable> {
        let bytes = self.take(entries.div_ceil(2))?;
        Some(PruningTable::from_raw(bytes.to_vec(), entries))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
