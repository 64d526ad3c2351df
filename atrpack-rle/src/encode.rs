//! Run packing.
//!
//! Each run becomes as many full-size command groups as fit, followed by
//! one shorter group for whatever is left.

use crate::command::{CMD_LITERAL, CMD_REPEAT, CMD_ZEROS, LITERAL_CHUNK, VALUE_CHUNK, ZERO_CHUNK};
use crate::segment::Run;

/// Serialize runs into command groups.
pub fn pack(runs: &[Run]) -> Vec<u8> {
    let mut out = Vec::with_capacity(runs.iter().map(packed_len).sum());
    for run in runs {
        export(run, &mut out);
    }
    out
}

/// Append the command groups for one run.
pub fn export(run: &Run, out: &mut Vec<u8>) {
    match run {
        Run::Repeated { value: 0, repeats } => {
            for _ in 0..repeats / ZERO_CHUNK {
                out.push(CMD_ZEROS);
            }
            let rest = repeats % ZERO_CHUNK;
            if rest > 0 {
                out.push(CMD_ZEROS | rest as u8);
            }
        }
        Run::Repeated { value, repeats } => {
            for _ in 0..repeats / VALUE_CHUNK {
                out.extend_from_slice(&[CMD_REPEAT, *value]);
            }
            let rest = repeats % VALUE_CHUNK;
            if rest > 0 {
                out.extend_from_slice(&[CMD_REPEAT | rest as u8, *value]);
            }
        }
        Run::Unique(values) => {
            let mut chunks = values.chunks_exact(LITERAL_CHUNK);
            for chunk in &mut chunks {
                out.push(CMD_LITERAL);
                out.extend_from_slice(chunk);
            }
            let rest = chunks.remainder();
            if !rest.is_empty() {
                out.push(CMD_LITERAL | rest.len() as u8);
                out.extend_from_slice(rest);
            }
        }
    }
}

/// Size of the command groups a run packs into.
pub fn packed_len(run: &Run) -> usize {
    match run {
        Run::Repeated { value: 0, repeats } => repeats.div_ceil(ZERO_CHUNK),
        Run::Repeated { repeats, .. } => 2 * repeats.div_ceil(VALUE_CHUNK),
        Run::Unique(values) => values.len() + values.len().div_ceil(LITERAL_CHUNK),
    }
}
