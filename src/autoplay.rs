//! Greedy one-piece placement search for the headless runner.
//!
//! Every reachable (rotation, column) pair is tried on a copy of the board by
//! replaying the same commands a player would send, then scored after the
//! lock and line clear. Rotation happens first, at the spawn column, then
//! horizontal moves, then a hard drop.

use crate::core::Board;
use crate::types::{GameAction, RotationDirection, ROTATION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Clockwise quarter turns from the spawn orientation
    pub rotations: usize,
    /// Target column of the piece origin
    pub col: i32,
    pub score: f32,
}

impl Placement {
    /// Commands that realize this placement from the spawn position
    pub fn actions(&self, spawn_col: i32) -> Vec<GameAction> {
        let mut actions = vec![GameAction::RotateCw; self.rotations];
        let shift = self.col - spawn_col;
        let step = if shift < 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        actions.extend(std::iter::repeat(step).take(shift.unsigned_abs() as usize));
        actions.push(GameAction::HardDrop);
        actions
    }
}

/// Best placement for the active piece; None without one.
pub fn best_placement(board: &Board<'_>) -> Option<Placement> {
    let active = board.active()?;
    let mut best: Option<Placement> = None;

    for rotations in 0..ROTATION_COUNT {
        let mut rotated = board.clone();
        if !(0..rotations).all(|_| rotated.try_rotate(RotationDirection::Cw)) {
            continue;
        }

        let spawn_col = active.col();
        for col in -3..board.cols() as i32 {
            let mut trial = rotated.clone();
            if !shift_to(&mut trial, col) {
                continue;
            }
            while trial.try_fall() {}
            trial.lock_piece();
            let lines = trial.clear_lines();

            let score = evaluate(&trial, lines);
            let candidate = Placement {
                rotations,
                col,
                score,
            };
            // Ties prefer fewer rotations, then the column closest to spawn
            let better = match best {
                None => true,
                Some(current) => {
                    score > current.score
                        || (score == current.score
                            && (rotations, (col - spawn_col).abs())
                                < (current.rotations, (current.col - spawn_col).abs()))
                }
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    best
}

fn shift_to(board: &mut Board<'_>, col: i32) -> bool {
    loop {
        let Some(current) = board.active().map(|piece| piece.col()) else {
            return false;
        };
        if current == col {
            return true;
        }
        let step = if col < current { -1 } else { 1 };
        if !board.try_move(0, step) {
            return false;
        }
    }
}

/// More lines, lower stack, fewer holes.
pub fn evaluate(board: &Board<'_>, lines: u32) -> f32 {
    let heights = column_heights(board);
    let height = heights.iter().copied().max().unwrap_or(0) as f32;
    let holes = total_holes(board, &heights) as f32;
    let bumpiness: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

    10.0 * lines as f32 - 2.0 * height - 3.0 * holes - 0.5 * bumpiness as f32
}

/// Stack height of each column, counted from the bottom row
pub fn column_heights(board: &Board<'_>) -> Vec<usize> {
    (0..board.cols() as i32)
        .map(|col| {
            (0..board.rows() as i32)
                .find(|&row| board.is_occupied(row, col))
                .map_or(0, |top| board.rows() - top as usize)
        })
        .collect()
}

/// Empty cells with a filled cell somewhere above them
pub fn total_holes(board: &Board<'_>, heights: &[usize]) -> usize {
    heights
        .iter()
        .enumerate()
        .map(|(col, &height)| {
            let top = board.rows() - height;
            (top..board.rows())
                .filter(|&row| !board.is_occupied(row as i32, col as i32))
                .count()
        })
        .sum()
}
