//! Chunk and compiler invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use strata_engine::Token;

use crate::compiler::Snapshot;
use crate::packet::Packet;

pub(crate) fn ensure_chunk_order(chunk_from: usize, chunk_empty: bool, token: &Token) {
    if token.from < chunk_from {
        panic!(
            "Chunk: token {}..{} starts before chunk at {chunk_from}",
            token.from, token.to
        );
    }
    if !chunk_empty && !token.opens.is_empty() {
        panic!(
            "Chunk: token at {} opens {:?} but is not first in its chunk",
            token.from, token.opens
        );
    }
}

pub(crate) fn ensure_rewind_target(packet: &Packet, index: usize) -> Snapshot {
    let Some(chunk) = packet.chunks().get(index) else {
        panic!("Compiler::rewind: chunk {index} out of bounds");
    };
    if !chunk.is_pure() {
        panic!("Compiler::rewind: chunk {index} is not pure");
    }
    match chunk.snapshot() {
        Some(snapshot) => snapshot,
        None => panic!("Compiler::rewind: chunk {index} was never compiled"),
    }
}
