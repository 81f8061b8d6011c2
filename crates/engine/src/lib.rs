//! Engine crate - session timing and the mode stack
//!
//! Builds on `blockfall-core` to run an actual game:
//!
//! - [`Session`]: board + bag + fall/lock timers, driven by `tick` and `apply`
//! - [`ModeStack`]: play / pause / game over composition
//! - [`SessionConfig`]: JSON-loadable tuning
//! - [`SessionSnapshot`]: serializable per-frame view
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Session, SessionConfig, TickEvent};
//! use blockfall_engine::types::GameAction;
//!
//! let mut session = Session::standard(SessionConfig::default().with_seed(3)).unwrap();
//! assert!(matches!(session.tick(16).unwrap(), TickEvent::Spawned(_)));
//! assert!(session.apply(GameAction::HardDrop));
//! assert_eq!(session.pieces_locked(), 1);
//! ```

pub mod config;
pub mod error;
pub mod modes;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use config::SessionConfig;
pub use error::EngineError;
pub use modes::{GameOverMode, Mode, ModeId, ModeStack, OverlayKind, PauseMode, PlayMode, Transition};
pub use session::{Session, TickEvent};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
