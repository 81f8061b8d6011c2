//! Session module - the game loop driver
//!
//! A [`Session`] ties the board, the bag and the catalog together and owns
//! the two timing accumulators:
//!
//! - **fall timer**: every `fall_delay_ms` the active piece tries to fall one row
//! - **lock timer**: starts once a fall fails and, after `lock_delay_ms`
//!   grounded, locks the piece and clears full lines
//!
//! Call [`Session::tick`] every frame with the elapsed time and
//! [`Session::apply`] once per discrete command. Spawning happens on the first
//! tick after a piece was locked.

use tracing::{debug, info, warn};

use blockfall_core::{Board, Piece, PieceBag, PieceCatalog};

use crate::config::SessionConfig;
use crate::error::EngineError;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{GameAction, PieceKind, RotationDirection};

/// What a single [`Session::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Timers advanced, nothing else happened
    Idle,
    /// A new piece entered the board
    Spawned(PieceKind),
    /// Gravity moved the active piece one row down
    Fell,
    /// The active piece locked; `lines` rows were cleared
    Locked { lines: u32 },
    /// The spawned piece collided immediately
    GameOver,
}

pub struct Session<'c> {
    catalog: &'c PieceCatalog,
    board: Board<'c>,
    bag: PieceBag,
    config: SessionConfig,
    fall_timer_ms: u32,
    lock_timer_ms: u32,
    /// Set by a failed fall, cleared when the piece can fall again
    grounded: bool,
    lines_cleared: u32,
    pieces_locked: u32,
    game_over: bool,
}

impl<'c> Session<'c> {
    /// New session drawing every kind registered in `catalog`
    pub fn new(config: SessionConfig, catalog: &'c PieceCatalog) -> Result<Self, EngineError> {
        let board = Board::with_size(config.rows, config.cols)?;
        let kinds: Vec<PieceKind> = catalog.kinds().collect();
        let bag = PieceBag::with_kinds(&kinds, config.bag_size, config.seed)?;

        info!(
            rows = config.rows,
            cols = config.cols,
            bag_size = config.bag_size,
            seed = ?config.seed,
            "session created"
        );

        Ok(Self {
            catalog,
            board,
            bag,
            config,
            fall_timer_ms: 0,
            lock_timer_ms: 0,
            grounded: false,
            lines_cleared: 0,
            pieces_locked: 0,
            game_over: false,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board<'c> {
        &self.board
    }

    /// Direct board access, for setting up fixtures
    pub fn board_mut(&mut self) -> &mut Board<'c> {
        &mut self.board
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    /// Upcoming kinds (`preview_count` of them)
    pub fn preview(&mut self) -> &[PieceKind] {
        self.bag.peek(self.config.preview_count)
    }

    /// Spawn the first piece if none is active
    pub fn start(&mut self) -> Result<TickEvent, EngineError> {
        if self.game_over || self.board.has_active() {
            return Ok(TickEvent::Idle);
        }
        self.spawn_next()
    }

    fn spawn_next(&mut self) -> Result<TickEvent, EngineError> {
        let kind = self.bag.get_next();
        let piece = Piece::from_catalog(self.catalog, kind)?;
        self.board.spawn_piece(piece)?;

        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.grounded = false;

        if self.board.is_game_over() {
            self.game_over = true;
            warn!(
                kind = %kind,
                pieces_locked = self.pieces_locked,
                lines_cleared = self.lines_cleared,
                "game over"
            );
            return Ok(TickEvent::GameOver);
        }
        Ok(TickEvent::Spawned(kind))
    }

    /// Whether the active piece could move one row down right now
    fn can_fall(&self) -> bool {
        self.board.active().is_some_and(|piece| {
            piece
                .row()
                .checked_add(1)
                .is_some_and(|row| self.board.is_valid(piece, Some(row), Some(piece.col())))
        })
    }

    /// Advance the session by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<TickEvent, EngineError> {
        if self.game_over {
            return Ok(TickEvent::Idle);
        }
        if !self.board.has_active() {
            return self.spawn_next();
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.config.fall_delay_ms {
            self.fall_timer_ms = 0;
            if self.board.try_fall() {
                self.lock_timer_ms = 0;
                self.grounded = false;
                return Ok(TickEvent::Fell);
            }
            self.grounded = true;
        }

        // Slid off a ledge since the last failed fall
        if self.grounded && self.can_fall() {
            self.grounded = false;
            self.lock_timer_ms = 0;
        }

        if self.grounded {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
            if self.lock_timer_ms >= self.config.lock_delay_ms {
                let lines = self.lock_and_clear();
                return Ok(TickEvent::Locked { lines });
            }
        }

        Ok(TickEvent::Idle)
    }

    /// Apply one command. Returns whether it changed the board.
    ///
    /// A successful move or rotation restarts the lock delay. Pause and
    /// Restart belong to the mode stack and are ignored here.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }

        let changed = match action {
            GameAction::MoveLeft => self.board.try_move(0, -1),
            GameAction::MoveRight => self.board.try_move(0, 1),
            GameAction::SoftDrop => self.board.try_move(1, 0),
            GameAction::RotateCw => self.board.try_rotate(RotationDirection::Cw),
            GameAction::RotateCcw => self.board.try_rotate(RotationDirection::Ccw),
            GameAction::HardDrop => return self.hard_drop(),
            GameAction::Pause | GameAction::Restart => return false,
        };

        if changed {
            self.lock_timer_ms = 0;
        }
        changed
    }

    /// Drop to the landing row and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.board.has_active() {
            return false;
        }
        let mut rows = 0;
        while self.board.try_fall() {
            rows += 1;
        }
        debug!(rows, "hard drop");
        self.lock_and_clear();
        true
    }

    fn lock_and_clear(&mut self) -> u32 {
        if self.board.lock_piece().is_some() {
            self.pieces_locked += 1;
        }
        let lines = self.board.clear_lines();
        self.lines_cleared += lines;

        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.grounded = false;
        lines
    }

    pub fn snapshot(&mut self) -> SessionSnapshot {
        let next = self.preview().to_vec();
        SessionSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            grid: self.board.to_rows(),
            active: self.board.active().map(ActiveSnapshot::from),
            ghost_row: self.board.ghost().map(|ghost| ghost.row()),
            next,
            lines_cleared: self.lines_cleared,
            pieces_locked: self.pieces_locked,
            game_over: self.game_over,
        }
    }
}

impl Session<'static> {
    /// Session over the seven standard tetrominoes
    pub fn standard(config: SessionConfig) -> Result<Self, EngineError> {
        Self::new(config, PieceCatalog::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<'static> {
        Session::standard(SessionConfig::default().with_seed(7)).unwrap()
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut session = session();
        assert!(matches!(session.tick(16).unwrap(), TickEvent::Spawned(_)));
        assert!(session.board().has_active());
    }

    #[test]
    fn test_gravity_after_fall_delay() {
        let mut session = session();
        session.start().unwrap();
        let row = session.board().active().unwrap().row();

        assert_eq!(session.tick(299).unwrap(), TickEvent::Idle);
        assert_eq!(session.tick(1).unwrap(), TickEvent::Fell);
        assert_eq!(session.board().active().unwrap().row(), row + 1);
    }

    #[test]
    fn test_locks_after_grounded_delay() {
        let mut session = session();
        session.start().unwrap();
        while session.apply(GameAction::SoftDrop) {}

        // Failed fall marks the piece grounded and starts the lock timer
        assert_eq!(session.tick(300).unwrap(), TickEvent::Locked { lines: 0 });
        assert_eq!(session.pieces_locked(), 1);
        assert!(!session.board().has_active());
    }

    #[test]
    fn test_lock_timer_waits_for_delay() {
        let config = SessionConfig {
            fall_delay_ms: 10,
            lock_delay_ms: 100,
            ..SessionConfig::default().with_seed(7)
        };
        let mut session = Session::standard(config).unwrap();
        session.start().unwrap();
        while session.apply(GameAction::SoftDrop) {}

        assert_eq!(session.tick(10).unwrap(), TickEvent::Idle);
        assert_eq!(session.lock_timer_ms(), 10);
        assert_eq!(session.tick(50).unwrap(), TickEvent::Idle);
        assert_eq!(session.tick(40).unwrap(), TickEvent::Locked { lines: 0 });
    }

    #[test]
    fn test_sliding_off_ledge_resumes_gravity() {
        let config = SessionConfig {
            fall_delay_ms: 10,
            lock_delay_ms: 100,
            ..SessionConfig::default().with_seed(7)
        };
        let mut session = Session::standard(config).unwrap();
        let o = Piece::from_catalog(PieceCatalog::standard(), PieceKind::O).unwrap();
        session.board_mut().spawn_piece(o).unwrap();
        // Single settled block under the O's left column
        session.board_mut().set(10, 4, true);

        for _ in 0..8 {
            assert_eq!(session.tick(10).unwrap(), TickEvent::Fell);
        }
        assert_eq!(session.tick(10).unwrap(), TickEvent::Idle);
        assert_eq!(session.lock_timer_ms(), 10);

        assert!(session.apply(GameAction::MoveRight));
        assert_eq!(session.tick(5).unwrap(), TickEvent::Idle);
        assert_eq!(session.lock_timer_ms(), 0);

        assert_eq!(session.tick(5).unwrap(), TickEvent::Fell);
        assert_eq!(session.board().active().unwrap().row(), 9);
        assert_eq!(session.pieces_locked(), 0);
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut session = session();
        for row in 0..2 {
            for col in 0..10 {
                session.board_mut().set(row, col, true);
            }
        }
        assert_eq!(session.tick(16).unwrap(), TickEvent::GameOver);
        assert!(session.is_game_over());
        assert!(!session.apply(GameAction::MoveLeft));
        assert_eq!(session.tick(1000).unwrap(), TickEvent::Idle);
    }
}
