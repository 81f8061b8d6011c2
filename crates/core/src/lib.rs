//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the board/piece simulation engine: a fixed-size grid,
//! one active falling piece, collision checks, locking and line clearing.
//! It has no dependencies on rendering, input devices or timing; a driver
//! (see `blockfall-engine`) calls into it once per tick and once per command.
//!
//! # Module Structure
//!
//! - [`catalog`]: shape matrices, rotation generation, piece registry
//! - [`bag`]: batch-based shuffled randomizer
//! - [`piece`]: the active piece (pose, rotation, occupied cells)
//! - [`board`]: grid state machine (validate, move, rotate, lock, clear)
//! - [`error`]: [`CoreError`]
//!
//! # Rules
//!
//! - **Bag randomizer**: every batch holds each kind the same number of times
//! - **Rotation**: four clockwise quarter turns of a base matrix; rejected
//!   rotations are reverted, there are no wall kicks
//! - **Spawn overhang**: cells above row 0 are legal and are never written
//! - **Game over**: the freshly spawned piece is already in an invalid position
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Piece, PieceCatalog};
//! use blockfall_core::types::PieceKind;
//!
//! let catalog = PieceCatalog::standard();
//! let mut board = Board::new();
//! board.spawn_piece(Piece::from_catalog(catalog, PieceKind::O).unwrap()).unwrap();
//!
//! while board.try_fall() {}
//! board.lock_piece();
//! assert_eq!(board.clear_lines(), 0);
//! assert!(board.is_occupied(19, 4));
//! ```

pub mod bag;
pub mod board;
pub mod catalog;
pub mod error;
pub mod piece;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::PieceBag;
pub use board::{Board, MAX_BOARD_CELLS};
pub use catalog::{generate_rotations, standard_shape, PieceCatalog, Rotations, ShapeMatrix};
pub use error::CoreError;
pub use piece::{Piece, PieceCells};
