//! Piece bag tests - batching, fairness, preview

use std::collections::HashMap;

use blockfall::core::{CoreError, PieceBag};
use blockfall::types::PieceKind;

fn counts(kinds: &[PieceKind]) -> HashMap<PieceKind, usize> {
    let mut map = HashMap::new();
    for &kind in kinds {
        *map.entry(kind).or_insert(0) += 1;
    }
    map
}

#[test]
fn test_default_bag_is_balanced() {
    let mut bag = PieceBag::seeded(21, 2024).unwrap();
    let drawn: Vec<_> = (0..21).map(|_| bag.get_next()).collect();
    let counts = counts(&drawn);
    assert_eq!(counts.len(), 7);
    assert!(counts.values().all(|&n| n == 3));
}

#[test]
fn test_each_batch_is_balanced() {
    let mut bag = PieceBag::seeded(7, 11).unwrap();
    for _ in 0..5 {
        let drawn: Vec<_> = (0..7).map(|_| bag.get_next()).collect();
        assert!(counts(&drawn).values().all(|&n| n == 1));
    }
}

#[test]
fn test_subset_of_kinds() {
    let kinds = [PieceKind::I, PieceKind::O];
    let mut bag = PieceBag::with_kinds(&kinds, 6, Some(5)).unwrap();
    let drawn: Vec<_> = (0..6).map(|_| bag.get_next()).collect();
    let counts = counts(&drawn);
    assert_eq!(counts[&PieceKind::I], 3);
    assert_eq!(counts[&PieceKind::O], 3);
}

#[test]
fn test_invalid_batch_sizes() {
    for batch in [0, 1, 8, 20] {
        let err = PieceBag::seeded(batch, 1).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidBagSize {
                batch_size: batch,
                distinct: 7
            }
        );
        assert!(err.is_configuration());
    }
}

#[test]
fn test_peek_matches_draws_across_batches() {
    let mut bag = PieceBag::seeded(7, 77).unwrap();
    bag.get_next();
    let preview = bag.peek(12).to_vec();
    let drawn: Vec<_> = (0..12).map(|_| bag.get_next()).collect();
    assert_eq!(preview, drawn);
}

#[test]
fn test_peek_zero_is_empty() {
    let mut bag = PieceBag::seeded(7, 1).unwrap();
    assert!(bag.peek(0).is_empty());
    assert_eq!(bag.pending(), 7);
}

#[test]
fn test_different_seeds_differ() {
    let mut a = PieceBag::seeded(70, 1).unwrap();
    let mut b = PieceBag::seeded(70, 2).unwrap();
    let sa: Vec<_> = (0..70).map(|_| a.get_next()).collect();
    let sb: Vec<_> = (0..70).map(|_| b.get_next()).collect();
    assert_ne!(sa, sb);
}
