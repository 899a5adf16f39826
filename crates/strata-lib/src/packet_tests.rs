use strata_core::NodeId;
use strata_engine::Token;

use crate::packet::Packet;

const TAG: u16 = 4;
const NAME: u16 = 5;

fn token(id: u16, from: usize, to: usize, opens: &[u16], closes: &[u16]) -> Token {
    Token {
        id,
        from,
        to,
        opens: opens.to_vec(),
        closes: closes.to_vec(),
    }
}

fn word(from: usize, to: usize) -> Vec<Token> {
    vec![token(NAME, from, to, &[], &[])]
}

/// `<x>` at `at`.
fn tag(at: usize) -> Vec<Token> {
    let none = NodeId::None.id();
    vec![
        token(none, at, at + 1, &[TAG], &[]),
        token(NAME, at + 1, at + 2, &[], &[]),
        token(none, at + 2, at + 3, &[], &[TAG]),
    ]
}

fn build(chunk_size: usize, matches: &[Vec<Token>]) -> Packet {
    let mut packet = Packet::new(chunk_size);
    for tokens in matches {
        for t in tokens {
            packet.add(t);
        }
        packet.end_match();
    }
    packet
}

fn layout(packet: &Packet) -> Vec<String> {
    packet
        .chunks()
        .iter()
        .map(|c| {
            if c.is_pure() {
                format!("pure@{}", c.from())
            } else {
                format!("{}..{} x{} {:?}", c.from(), c.to(), c.len(), c.scopes())
            }
        })
        .collect()
}

#[test]
fn scopes_are_separated_by_pure_chunks() {
    let packet = build(32, &[tag(0), tag(3)]);

    assert_eq!(
        layout(&packet),
        ["pure@0", "0..3 x3 []", "pure@3", "3..6 x3 []", "pure@6"]
    );
    assert!(packet.is_sealed());
    assert!(packet.stack().is_empty());
}

#[test]
fn plain_tokens_share_a_chunk() {
    let packet = build(32, &[word(0, 1), word(1, 2), word(2, 3)]);

    assert_eq!(layout(&packet), ["pure@0", "0..3 x3 []"]);
    assert!(!packet.is_sealed());
}

#[test]
fn full_chunk_is_followed_by_pure_chunk() {
    let packet = build(2, &[word(0, 1), word(1, 2), word(2, 3)]);

    assert_eq!(layout(&packet), ["pure@0", "0..2 x2 []", "pure@2", "2..3 x1 []"]);
    assert!(packet.is_restart(2));
    assert_eq!(packet.find_pure_before(2), Some(2));
    assert_eq!(packet.find_pure_before(1), Some(0));
}

#[test]
fn full_chunk_inside_scope_has_no_pure_chunk() {
    let none = NodeId::None.id();
    let tokens = vec![
        token(none, 0, 1, &[TAG], &[]),
        token(NAME, 1, 2, &[], &[]),
        token(NAME, 2, 3, &[], &[]),
    ];
    let packet = build(2, &[tokens]);

    assert_eq!(layout(&packet), ["pure@0", "0..2 x2 []", "2..3 x1 [4]"]);
    assert_eq!(packet.stack(), [TAG]);
}

#[test]
fn pure_chunk_before_opening_token_is_not_a_restart() {
    let packet = build(32, &[word(0, 1), tag(1)]);

    assert_eq!(
        layout(&packet),
        ["pure@0", "0..1 x1 []", "pure@1", "1..4 x3 []", "pure@4"]
    );
    assert!(!packet.is_restart(2));
    assert!(packet.is_restart(4));
    assert_eq!(packet.find_pure_before(3), Some(0));
    assert_eq!(packet.find_pure_after(2), Some(4));
}

#[test]
fn pure_chunk_inside_a_match_is_not_a_boundary() {
    let mut both = tag(0);
    both.extend(tag(3));
    let packet = build(32, &[both]);

    assert_eq!(
        layout(&packet),
        ["pure@0", "0..3 x3 []", "pure@3", "3..6 x3 []", "pure@6"]
    );
    assert!(!packet.chunks()[2].is_boundary());
    assert!(packet.chunks()[4].is_boundary());
    assert_eq!(packet.find_pure_before(5), Some(0));
    assert_eq!(packet.find_pure_after(1), Some(4));
}

#[test]
fn split_hands_over_scope_stack() {
    let none = NodeId::None.id();
    let tokens = vec![
        token(none, 0, 1, &[TAG], &[]),
        token(NAME, 1, 2, &[], &[]),
        token(NAME, 2, 3, &[], &[]),
    ];
    let mut left = build(2, &[tokens]);

    let right = left.split(2);

    assert_eq!(layout(&left), ["pure@0", "0..2 x2 []"]);
    assert_eq!(left.stack(), [TAG]);
    assert_eq!(layout(&right), ["2..3 x1 [4]"]);
    assert_eq!(right.stack(), [TAG]);
}

#[test]
fn offset_slides_tail() {
    let mut packet = build(32, &[tag(0), tag(3)]);

    packet.offset(2, 4);

    assert_eq!(
        layout(&packet),
        ["pure@0", "0..3 x3 []", "pure@7", "7..10 x3 []", "pure@10"]
    );
}

#[test]
fn append_drops_duplicate_pure_chunk() {
    let mut packet = build(32, &[tag(0)]);
    let next = build(32, &[tag(3)]);
    assert_eq!(next.chunks().len(), 3);

    packet.append(next);

    assert_eq!(
        layout(&packet),
        ["pure@0", "0..3 x3 []", "pure@3", "3..6 x3 []", "pure@6"]
    );
    assert_eq!(packet.end(), 6);
}

#[test]
fn split_then_append_restores_sequence() {
    let mut packet = build(32, &[tag(0), tag(3)]);
    let before = layout(&packet);

    let right = packet.split(1);
    assert_eq!(packet.from(), 0);
    assert_eq!(right.from(), 0);
    packet.append(right);

    assert_eq!(layout(&packet), before);
}
