use strata_core::NodeId;

use super::matched::{Matched, Wrapping};
use super::token::Token;

const NONE: u16 = NodeId::None.id();
const A: u16 = 10;
const B: u16 = 11;
const C: u16 = 12;

fn token(id: u16, from: usize, to: usize, opens: &[u16], closes: &[u16]) -> Token {
    Token {
        id,
        from,
        to,
        opens: opens.to_vec(),
        closes: closes.to_vec(),
    }
}

#[test]
fn leaf_is_one_token() {
    let m = Matched::leaf(A, 3, 2);
    assert_eq!(m.tokens(), [token(A, 3, 5, &[], &[])]);
}

#[test]
fn children_touching_edges() {
    let m = Matched::new(A, 0, 3, vec![Matched::leaf(B, 0, 1), Matched::leaf(C, 1, 2)]);

    assert_eq!(
        m.tokens(),
        [token(B, 0, 1, &[A], &[]), token(C, 1, 3, &[], &[A])]
    );
}

#[test]
fn padding_at_both_edges() {
    let m = Matched::new(A, 0, 5, vec![Matched::leaf(B, 1, 2)]);

    assert_eq!(
        m.tokens(),
        [
            token(NONE, 0, 0, &[A], &[]),
            token(B, 1, 3, &[], &[]),
            token(NONE, 5, 5, &[], &[A]),
        ]
    );
}

#[test]
fn none_parent_is_transparent() {
    let m = Matched::new(NONE, 0, 3, vec![Matched::leaf(B, 1, 1)]);
    assert_eq!(m.tokens(), [token(B, 1, 2, &[], &[])]);
}

#[test]
fn nested_opens_outermost_first() {
    let m = Matched::new(A, 0, 2, vec![Matched::new(B, 0, 2, vec![Matched::leaf(C, 0, 2)])]);

    assert_eq!(m.tokens(), [token(C, 0, 2, &[A, B], &[B, A])]);
}

#[test]
fn begin_wrapping_leaves_node_open() {
    let m = Matched {
        wrapping: Wrapping::Begin,
        ..Matched::new(A, 0, 3, vec![Matched::leaf(B, 0, 2), Matched::leaf(C, 2, 1)])
    };

    assert_eq!(
        m.tokens(),
        [token(B, 0, 2, &[A], &[]), token(C, 2, 3, &[], &[])]
    );
}

#[test]
fn wrapped_leaf_keeps_boundary_only() {
    let mut open = Matched::leaf(A, 0, 1);
    open.wrapping = Wrapping::Begin;

    assert_eq!(open.tokens(), [token(NONE, 0, 1, &[A], &[])]);
}

#[test]
fn close_incomplete_appends_marker() {
    let mut m = Matched::new(A, 0, 3, vec![Matched::leaf(NONE, 0, 1), Matched::leaf(B, 1, 2)]);
    m.wrapping = Wrapping::Begin;
    assert!(m.is_incomplete());

    m.close_incomplete();

    assert!(!m.is_incomplete());
    assert_eq!(
        m.tokens(),
        [
            token(NONE, 0, 1, &[A], &[]),
            token(B, 1, 3, &[], &[]),
            token(NodeId::Incomplete.id(), 3, 3, &[], &[A]),
        ]
    );
}

#[test]
fn close_incomplete_shares_one_marker() {
    let inner = Matched {
        wrapping: Wrapping::Begin,
        ..Matched::new(B, 2, 3, vec![Matched::leaf(C, 2, 1), Matched::leaf(C, 4, 1)])
    };
    let mut m = Matched {
        wrapping: Wrapping::Begin,
        ..Matched::new(A, 0, 5, vec![Matched::leaf(NONE, 0, 1), inner])
    };

    m.close_incomplete();

    assert!(!m.is_incomplete());
    assert_eq!(
        m.tokens(),
        [
            token(NONE, 0, 1, &[A], &[]),
            token(C, 2, 3, &[B], &[]),
            token(C, 4, 5, &[], &[]),
            token(NodeId::Incomplete.id(), 5, 5, &[], &[B, A]),
        ]
    );
}

#[test]
fn close_incomplete_ignores_complete_match() {
    let mut m = Matched::new(A, 0, 2, vec![Matched::leaf(B, 0, 2)]);
    let before = m.clone();

    m.close_incomplete();

    assert_eq!(m, before);
}

#[test]
fn insert_child_nests_by_span() {
    let mut children = Vec::new();
    Matched::insert_child(&mut children, Matched::leaf(A, 0, 4));
    Matched::insert_child(&mut children, Matched::leaf(C, 5, 1));
    Matched::insert_child(&mut children, Matched::leaf(B, 1, 2));

    assert_eq!(
        children,
        [
            Matched::new(A, 0, 4, vec![Matched::leaf(B, 1, 2)]),
            Matched::leaf(C, 5, 1),
        ]
    );
}

#[test]
fn offset_shifts_subtree() {
    let mut m = Matched::new(A, 0, 3, vec![Matched::leaf(B, 1, 1)]);
    m.offset(10);

    assert_eq!(m.from, 10);
    assert_eq!(m.end(), 13);
    assert_eq!(m.children[0].from, 11);
}
