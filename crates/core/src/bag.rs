//! Bag module - fair shuffled piece generation
//!
//! Generalizes the classic "7-bag": each refill appends one batch holding every
//! available kind `batch_size / distinct` times, shuffled. Drawing a full batch
//! worth of pieces from a freshly filled bag therefore yields each kind exactly
//! that many times, which bounds droughts and floods of any single kind.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;
use crate::types::PieceKind;

/// Shuffled queue of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceBag<R = StdRng> {
    available: Vec<PieceKind>,
    batch_size: usize,
    queue: VecDeque<PieceKind>,
    rng: R,
}

impl PieceBag<StdRng> {
    /// Bag over all seven kinds, seeded from OS entropy
    pub fn new(batch_size: usize) -> Result<Self, CoreError> {
        Self::with_rng(&PieceKind::ALL, batch_size, StdRng::from_entropy())
    }

    /// Bag over all seven kinds with a deterministic sequence
    pub fn seeded(batch_size: usize, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(&PieceKind::ALL, batch_size, StdRng::seed_from_u64(seed))
    }

    /// Bag over `kinds`, deterministic when `seed` is given
    pub fn with_kinds(
        kinds: &[PieceKind],
        batch_size: usize,
        seed: Option<u64>,
    ) -> Result<Self, CoreError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(kinds, batch_size, rng)
    }
}

impl<R: Rng> PieceBag<R> {
    /// Bag over `kinds` (duplicates collapsed) using `rng` for shuffling.
    ///
    /// Fails unless `batch_size` is a positive multiple of the number of
    /// distinct kinds. The first batch is filled immediately.
    pub fn with_rng(kinds: &[PieceKind], batch_size: usize, rng: R) -> Result<Self, CoreError> {
        let mut available = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if !available.contains(&kind) {
                available.push(kind);
            }
        }

        let distinct = available.len();
        if distinct == 0 || batch_size == 0 || batch_size % distinct != 0 {
            return Err(CoreError::InvalidBagSize {
                batch_size,
                distinct,
            });
        }

        let mut bag = Self {
            available,
            batch_size,
            queue: VecDeque::with_capacity(batch_size * 2),
            rng,
        };
        bag.refill();
        Ok(bag)
    }

    /// Append one shuffled batch to the queue
    fn refill(&mut self) {
        let copies = self.batch_size / self.available.len();
        let mut batch = Vec::with_capacity(self.batch_size);
        for &kind in &self.available {
            batch.extend(std::iter::repeat(kind).take(copies));
        }
        batch.shuffle(&mut self.rng);
        self.queue.extend(batch);
    }

    /// Remove and return the next kind, refilling first if the queue is empty.
    pub fn get_next(&mut self) -> PieceKind {
        if self.queue.is_empty() {
            self.refill();
        }
        // refill() always appends batch_size > 0 kinds
        self.queue.pop_front().unwrap_or(self.available[0])
    }

    /// Upcoming `count` kinds, without removing them.
    ///
    /// Appends whole batches until at least `count` are pending.
    pub fn peek(&mut self, count: usize) -> &[PieceKind] {
        while self.queue.len() < count {
            self.refill();
        }
        &self.queue.make_contiguous()[..count]
    }

    /// Number of kinds currently queued
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Distinct kinds this bag draws from
    pub fn available(&self) -> &[PieceKind] {
        &self.available
    }
}
