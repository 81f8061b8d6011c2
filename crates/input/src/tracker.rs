//! Per-frame action state.
//!
//! Feed every key event of a frame to [`ActionTracker::update`]; afterwards
//! an action is *pressed* if it went down this frame, *held* while its key is
//! down, and *released* if it went up this frame. Terminals that never report
//! key releases leave actions held, so callers driving gameplay should read
//! `pressed` (repeat events do not re-press).

use std::collections::HashSet;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::bindings::{game_action_from_name, KeyBindings};
use crate::types::GameAction;

type ActionId = (String, String);

#[derive(Debug, Default)]
pub struct ActionTracker {
    pressed: HashSet<ActionId>,
    held: HashSet<ActionId>,
    released: HashSet<ActionId>,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame's events
    pub fn update<I>(&mut self, bindings: &KeyBindings, events: I)
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        self.pressed.clear();
        self.released.clear();
        for event in events {
            self.handle_event(bindings, event);
        }
    }

    /// Process one event without starting a new frame
    pub fn handle_event(&mut self, bindings: &KeyBindings, event: KeyEvent) {
        for (context, action) in bindings.actions_for(event.code) {
            let id = (context.to_string(), action.to_string());
            match event.kind {
                KeyEventKind::Press => {
                    if !self.held.contains(&id) {
                        self.pressed.insert(id.clone());
                    }
                    self.held.insert(id);
                }
                KeyEventKind::Repeat => {
                    self.held.insert(id);
                }
                KeyEventKind::Release => {
                    self.held.remove(&id);
                    self.released.insert(id);
                }
            }
        }
    }

    pub fn is_pressed(&self, context: &str, action: &str) -> bool {
        contains(&self.pressed, context, action)
    }

    pub fn is_held(&self, context: &str, action: &str) -> bool {
        contains(&self.held, context, action)
    }

    pub fn is_released(&self, context: &str, action: &str) -> bool {
        contains(&self.released, context, action)
    }

    /// Game actions pressed this frame in `context`
    pub fn pressed_actions(&self, context: &str) -> Vec<GameAction> {
        let mut actions: Vec<GameAction> = self
            .pressed
            .iter()
            .filter(|(ctx, _)| ctx == context)
            .filter_map(|(_, action)| game_action_from_name(action))
            .collect();
        actions.sort_by_key(|action| *action as u8);
        actions
    }

    /// Forget everything, e.g. after losing focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.held.clear();
        self.released.clear();
    }
}

fn contains(set: &HashSet<ActionId>, context: &str, action: &str) -> bool {
    set.iter().any(|(ctx, act)| ctx == context && act == action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    #[test]
    fn test_press_hold_release_cycle() {
        let bindings = KeyBindings::standard();
        let mut tracker = ActionTracker::new();

        tracker.update(&bindings, [KeyEvent::from(KeyCode::Left)]);
        assert!(tracker.is_pressed("play", "move_left"));
        assert!(tracker.is_held("play", "move_left"));

        tracker.update(&bindings, [repeat(KeyCode::Left)]);
        assert!(!tracker.is_pressed("play", "move_left"));
        assert!(tracker.is_held("play", "move_left"));

        tracker.update(&bindings, [release(KeyCode::Left)]);
        assert!(tracker.is_released("play", "move_left"));
        assert!(!tracker.is_held("play", "move_left"));

        tracker.update(&bindings, []);
        assert!(!tracker.is_released("play", "move_left"));
    }

    #[test]
    fn test_second_key_for_held_action_does_not_repress() {
        let bindings = KeyBindings::standard();
        let mut tracker = ActionTracker::new();
        tracker.update(&bindings, [KeyEvent::from(KeyCode::Left)]);
        tracker.update(&bindings, [KeyEvent::from(KeyCode::Char('a'))]);
        assert!(!tracker.is_pressed("play", "move_left"));
    }

    #[test]
    fn test_pressed_actions_in_context() {
        let bindings = KeyBindings::standard();
        let mut tracker = ActionTracker::new();
        tracker.update(
            &bindings,
            [
                KeyEvent::from(KeyCode::Char(' ')),
                KeyEvent::from(KeyCode::Right),
                KeyEvent::from(KeyCode::Char('x')),
            ],
        );
        assert_eq!(
            tracker.pressed_actions("play"),
            vec![GameAction::MoveRight, GameAction::HardDrop]
        );
        assert!(tracker.pressed_actions("menu").is_empty());
    }
}
