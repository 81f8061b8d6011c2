//! Mode stack
//!
//! The game runs as a stack of modes. Only the top mode receives commands and
//! ticks; what gets drawn depends on the top mode's [`OverlayKind`]:
//!
//! - `None` / `Fullscreen`: only the top mode is visible
//! - `Semitransparent`: the whole stack is visible, bottom first
//!
//! Changing to a mode that is not an overlay replaces the current top, while
//! overlays are pushed above it (pause over play).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::EngineError;
use crate::session::{Session, TickEvent};
use crate::types::GameAction;

/// How a mode composes with the modes beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Regular mode, replaces whatever it is changed onto
    #[default]
    None,
    /// Pushed on top; lower modes stay visible
    Semitransparent,
    /// Pushed on top; hides lower modes
    Fullscreen,
}

impl OverlayKind {
    pub fn is_overlay(self) -> bool {
        self != OverlayKind::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    Play,
    Pause,
    GameOver,
}

impl ModeId {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::Play => "play",
            ModeId::Pause => "pause",
            ModeId::GameOver => "game_over",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the stack should do after a mode handled something
pub enum Transition {
    None,
    /// Change onto a new mode (replace, or push when it is an overlay)
    Change(Box<dyn Mode>),
    /// Remove the top mode
    Pop,
    /// Empty the stack, then change onto the new mode
    Reset(Box<dyn Mode>),
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => f.write_str("None"),
            Transition::Change(mode) => write!(f, "Change({})", mode.id()),
            Transition::Pop => f.write_str("Pop"),
            Transition::Reset(mode) => write!(f, "Reset({})", mode.id()),
        }
    }
}

pub trait Mode {
    fn id(&self) -> ModeId;

    fn overlay(&self) -> OverlayKind {
        OverlayKind::None
    }

    fn on_enter(&mut self) {}

    fn on_exit(&mut self) {}

    fn handle_action(&mut self, action: GameAction) -> Result<Transition, EngineError>;

    fn update(&mut self, elapsed_ms: u32) -> Result<Transition, EngineError>;

    /// Access to the running session, for renderers
    fn as_play(&self) -> Option<&PlayMode> {
        None
    }
}

#[derive(Default)]
pub struct ModeStack {
    stack: Vec<Box<dyn Mode>>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `mode` the current mode.
    ///
    /// The current top is exited and removed first unless `mode` is an
    /// overlay. Fails if a mode with the same id is already on top.
    pub fn change(&mut self, mut mode: Box<dyn Mode>) -> Result<(), EngineError> {
        if self.current_id() == Some(mode.id()) {
            return Err(EngineError::ModeAlreadyActive(mode.id()));
        }
        if !mode.overlay().is_overlay() {
            self.pop();
        }

        info!(mode = %mode.id(), depth = self.stack.len() + 1, "mode entered");
        mode.on_enter();
        self.stack.push(mode);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Box<dyn Mode>> {
        let mut mode = self.stack.pop()?;
        mode.on_exit();
        debug!(mode = %mode.id(), depth = self.stack.len(), "mode exited");
        Some(mode)
    }

    /// Exit every mode, top first
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    pub fn current(&self) -> Option<&dyn Mode> {
        self.stack.last().map(|mode| mode.as_ref())
    }

    pub fn current_id(&self) -> Option<ModeId> {
        self.current().map(|mode| mode.id())
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The running session, found in the topmost play mode
    pub fn play(&self) -> Option<&PlayMode> {
        self.stack.iter().rev().find_map(|mode| mode.as_play())
    }

    /// Forward a command to the top mode
    pub fn handle_action(&mut self, action: GameAction) -> Result<(), EngineError> {
        let Some(mode) = self.stack.last_mut() else {
            return Ok(());
        };
        let transition = mode.handle_action(action)?;
        self.apply(transition)
    }

    /// Advance the top mode
    pub fn update(&mut self, elapsed_ms: u32) -> Result<(), EngineError> {
        let Some(mode) = self.stack.last_mut() else {
            return Ok(());
        };
        let transition = mode.update(elapsed_ms)?;
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> Result<(), EngineError> {
        match transition {
            Transition::None => Ok(()),
            Transition::Change(mode) => self.change(mode),
            Transition::Pop => {
                self.pop();
                Ok(())
            }
            Transition::Reset(mode) => {
                self.clear();
                self.change(mode)
            }
        }
    }

    /// Modes to draw, bottom first
    pub fn visible(&self) -> &[Box<dyn Mode>] {
        match self.stack.last() {
            Some(top) if top.overlay() == OverlayKind::Semitransparent => &self.stack,
            Some(_) => &self.stack[self.stack.len() - 1..],
            None => &[],
        }
    }
}

/// Active gameplay over a [`Session`]
pub struct PlayMode {
    session: Session<'static>,
}

impl PlayMode {
    pub fn new(config: SessionConfig) -> Result<Self, EngineError> {
        Ok(Self {
            session: Session::standard(config)?,
        })
    }

    pub fn from_session(session: Session<'static>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<'static> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<'static> {
        &mut self.session
    }

    fn game_over(&self) -> Transition {
        Transition::Change(Box::new(GameOverMode::new(
            self.session.config().clone(),
            self.session.lines_cleared(),
            self.session.pieces_locked(),
        )))
    }
}

impl Mode for PlayMode {
    fn id(&self) -> ModeId {
        ModeId::Play
    }

    fn handle_action(&mut self, action: GameAction) -> Result<Transition, EngineError> {
        match action {
            GameAction::Pause => Ok(Transition::Change(Box::new(PauseMode))),
            GameAction::Restart => Ok(Transition::None),
            action => {
                self.session.apply(action);
                Ok(Transition::None)
            }
        }
    }

    fn update(&mut self, elapsed_ms: u32) -> Result<Transition, EngineError> {
        match self.session.tick(elapsed_ms)? {
            TickEvent::GameOver => Ok(self.game_over()),
            _ => Ok(Transition::None),
        }
    }

    fn as_play(&self) -> Option<&PlayMode> {
        Some(self)
    }
}

/// Frozen gameplay; the play mode below stays visible
#[derive(Debug, Default)]
pub struct PauseMode;

impl Mode for PauseMode {
    fn id(&self) -> ModeId {
        ModeId::Pause
    }

    fn overlay(&self) -> OverlayKind {
        OverlayKind::Semitransparent
    }

    fn handle_action(&mut self, action: GameAction) -> Result<Transition, EngineError> {
        match action {
            GameAction::Pause => Ok(Transition::Pop),
            _ => Ok(Transition::None),
        }
    }

    fn update(&mut self, _elapsed_ms: u32) -> Result<Transition, EngineError> {
        Ok(Transition::None)
    }
}

/// Final score screen; Restart starts a fresh game with the same config
#[derive(Debug)]
pub struct GameOverMode {
    config: SessionConfig,
    lines_cleared: u32,
    pieces_locked: u32,
}

impl GameOverMode {
    pub fn new(config: SessionConfig, lines_cleared: u32, pieces_locked: u32) -> Self {
        Self {
            config,
            lines_cleared,
            pieces_locked,
        }
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }
}

impl Mode for GameOverMode {
    fn id(&self) -> ModeId {
        ModeId::GameOver
    }

    fn overlay(&self) -> OverlayKind {
        OverlayKind::Fullscreen
    }

    fn handle_action(&mut self, action: GameAction) -> Result<Transition, EngineError> {
        match action {
            GameAction::Restart => Ok(Transition::Reset(Box::new(PlayMode::new(
                self.config.clone(),
            )?))),
            _ => Ok(Transition::None),
        }
    }

    fn update(&mut self, _elapsed_ms: u32) -> Result<Transition, EngineError> {
        Ok(Transition::None)
    }
}
