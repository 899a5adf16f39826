use std::sync::Arc;

use crate::record::{Record, TreeBuffer};
use crate::tree::{CompiledTree, Subtree, TreeNode};

const DOC: u32 = 1;
const TAG: u32 = 4;
const NAME: u32 = 5;

fn leaf(ty: u32, from: usize, to: usize) -> TreeNode {
    TreeNode {
        ty: ty as u16,
        from,
        to,
        children: Vec::new(),
        reused: None,
    }
}

/// `<a><b>` with the second tag stored as a reused subtree.
fn sample() -> CompiledTree {
    let tag_b = Subtree {
        buffer: TreeBuffer::from_records([Record::new(NAME, 1, 2, 1), Record::new(TAG, 0, 3, 2)]),
        length: 3,
    };
    CompiledTree {
        buffer: TreeBuffer::from_records([
            Record::new(NAME, 1, 2, 1),
            Record::new(TAG, 0, 3, 2),
            Record::reuse(0, 3, 6),
            Record::new(DOC, 0, 6, 4),
        ]),
        reused: vec![Arc::new(tag_b)],
        length: 6,
    }
}

#[test]
fn decode_expands_reuse_records() {
    let root = sample().root().expect("single root");

    let expected = TreeNode {
        children: vec![
            TreeNode {
                children: vec![leaf(NAME, 1, 2)],
                ..leaf(TAG, 0, 3)
            },
            TreeNode {
                children: vec![leaf(NAME, 4, 5)],
                reused: Some(0),
                ..leaf(TAG, 3, 6)
            },
        ],
        ..leaf(DOC, 0, 6)
    };
    assert_eq!(root, expected);
}

#[test]
fn root_requires_single_top_node() {
    let tree = CompiledTree {
        buffer: TreeBuffer::from_records([Record::new(NAME, 0, 1, 1), Record::new(NAME, 1, 2, 1)]),
        reused: Vec::new(),
        length: 2,
    };

    assert_eq!(tree.children(), vec![leaf(NAME, 0, 1), leaf(NAME, 1, 2)]);
    assert_eq!(tree.root(), None);
}

#[test]
fn expanded_len_counts_reused_records() {
    let tree = sample();

    assert_eq!(tree.buffer.len(), 4);
    assert_eq!(tree.expanded_len(), 5);
}

#[test]
fn cursor_reads_back_to_front() {
    let tree = sample();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.len(), 4);

    assert_eq!(cursor.next().map(|r| r.ty), Some(DOC));
    assert!(cursor.peek().is_some_and(|r| r.is_reuse()));

    cursor.skip_subtree();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.peek().map(|r| r.ty), Some(TAG));

    cursor.skip_subtree();
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.next(), None);
}

#[test]
#[should_panic(expected = "claims 3 records")]
fn malformed_size_panics() {
    let tree = CompiledTree {
        buffer: TreeBuffer::from_records([Record::new(NAME, 0, 1, 1), Record::new(DOC, 0, 1, 3)]),
        reused: Vec::new(),
        length: 1,
    };
    tree.children();
}
