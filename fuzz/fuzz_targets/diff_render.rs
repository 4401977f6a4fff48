//! Fuzz target for answer diff alignment
//!
//! # Invariants
//!
//! - Rendering NEVER panics, whatever the diff and split lengths
//! - The split is fully and exactly consumed iff no mismatch is reported
//! - Rendering is deterministic

#![no_main]

use arbitrary::Arbitrary;
use kana_app::{render_diff, EditOp};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Same(String),
    Delete(String),
    Insert(String),
    Change(String, String),
}

impl From<Op> for EditOp {
    fn from(op: Op) -> Self {
        match op {
            Op::Same(t) => EditOp::Same(t),
            Op::Delete(t) => EditOp::Delete(t),
            Op::Insert(t) => EditOp::Insert(t),
            Op::Change(from, to) => EditOp::Change(from, to),
        }
    }
}

fuzz_target!(|input: (Vec<Op>, Vec<String>)| {
    let (ops, split) = input;
    let diff: Vec<EditOp> = ops.into_iter().map(EditOp::from).collect();

    let render = render_diff(&diff, &split);
    let consuming = diff.iter().filter(|op| !matches!(op, EditOp::Delete(_))).count();

    assert_eq!(render.mismatch.is_none(), consuming == split.len());
    if render.mismatch.is_none() {
        assert_eq!(render.kana.text(), split.concat());
    }
    assert_eq!(render, render_diff(&diff, &split));
});
