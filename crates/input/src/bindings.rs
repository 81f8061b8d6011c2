//! Key bindings: context -> action -> keys
//!
//! Binding files look like:
//!
//! ```json
//! { "controls": { "play": { "move_left": ["left", "a"], "lock_piece": ["space"] } } }
//! ```
//!
//! Any other top-level keys are left alone when saving.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crossterm::event::KeyCode;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::BindingError;
use crate::keys::{key_from_name, key_name, normalize};
use crate::types::GameAction;

pub const MAX_KEYS_PER_ACTION: usize = 2;

/// Context of the in-game bindings
pub const PLAY_CONTEXT: &str = "play";

const CONTROLS: &str = "controls";

/// Binding-file action name for a game action
pub fn action_name(action: GameAction) -> &'static str {
    match action {
        GameAction::MoveLeft => "move_left",
        GameAction::MoveRight => "move_right",
        GameAction::SoftDrop => "move_down",
        GameAction::RotateCw => "rotate_piece_right",
        GameAction::RotateCcw => "rotate_piece_left",
        GameAction::HardDrop => "lock_piece",
        GameAction::Pause => "pause",
        GameAction::Restart => "restart",
    }
}

/// Game action for a binding-file action name
pub fn game_action_from_name(name: &str) -> Option<GameAction> {
    match name {
        "move_left" => Some(GameAction::MoveLeft),
        "move_right" => Some(GameAction::MoveRight),
        "move_down" => Some(GameAction::SoftDrop),
        "rotate_piece_right" => Some(GameAction::RotateCw),
        "rotate_piece_left" => Some(GameAction::RotateCcw),
        "lock_piece" => Some(GameAction::HardDrop),
        "pause" => Some(GameAction::Pause),
        "restart" => Some(GameAction::Restart),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    controls: BTreeMap<String, BTreeMap<String, Vec<KeyCode>>>,
}

impl KeyBindings {
    /// No contexts at all
    pub fn empty() -> Self {
        Self {
            controls: BTreeMap::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BindingError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, BindingError> {
        let controls = value
            .get(CONTROLS)
            .and_then(Value::as_object)
            .ok_or_else(|| BindingError::Malformed("expected a 'controls' object".to_string()))?;

        let mut bindings = Self::empty();
        for (context, actions) in controls {
            let actions = actions.as_object().ok_or_else(|| {
                BindingError::Malformed(format!("context '{context}' must be an object"))
            })?;

            // Keep empty contexts so they can be looked up
            bindings.controls.entry(context.clone()).or_default();

            for (action, keys) in actions {
                let names = keys.as_array().ok_or_else(|| {
                    BindingError::Malformed(format!(
                        "keys of '{action}' in '{context}' must be a list"
                    ))
                })?;

                if names.len() > MAX_KEYS_PER_ACTION {
                    return Err(BindingError::TooManyKeys {
                        context: context.clone(),
                        action: action.clone(),
                        count: names.len(),
                    });
                }

                let mut codes = Vec::with_capacity(names.len());
                for name in names {
                    let name = name.as_str().ok_or_else(|| {
                        BindingError::Malformed(format!(
                            "keys of '{action}' in '{context}' must be strings"
                        ))
                    })?;
                    let code = key_from_name(name)
                        .ok_or_else(|| BindingError::UnknownKey(name.to_string()))?;
                    codes.push(code);
                }
                bindings.bind(context, action, &codes)?;
            }
        }
        Ok(bindings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let bindings = Self::from_json_str(&text)?;
        debug!(path = %path.display(), contexts = bindings.controls.len(), "key bindings loaded");
        Ok(bindings)
    }

    /// Write the bindings into `path`.
    ///
    /// An existing file keeps its other top-level keys and any bindings this
    /// set does not mention; only the actions held here are overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BindingError> {
        let path = path.as_ref();
        let mut root = if path.exists() {
            let text = fs::read_to_string(path)?;
            match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => map,
                _ => return Err(BindingError::Malformed("top level must be an object".into())),
            }
        } else {
            Map::new()
        };

        let controls = root
            .entry(CONTROLS)
            .or_insert_with(|| Value::Object(Map::new()));
        if !controls.is_object() {
            *controls = Value::Object(Map::new());
        }
        let Value::Object(controls) = controls else {
            return Err(BindingError::Malformed("expected a 'controls' object".into()));
        };

        for (context, actions) in &self.controls {
            let entry = controls
                .entry(context.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(entry) = entry else {
                continue;
            };
            write_actions(entry, actions);
        }

        fs::write(path, serde_json::to_string_pretty(&Value::Object(root))?)?;
        debug!(path = %path.display(), "key bindings saved");
        Ok(())
    }

    /// Replace the keys of `action` in `context`, creating both as needed.
    pub fn bind(&mut self, context: &str, action: &str, keys: &[KeyCode]) -> Result<(), BindingError> {
        let mut codes: Vec<KeyCode> = Vec::with_capacity(keys.len());
        for &key in keys {
            let key = normalize(key);
            if !codes.contains(&key) {
                codes.push(key);
            }
        }
        if codes.len() > MAX_KEYS_PER_ACTION {
            return Err(BindingError::TooManyKeys {
                context: context.to_string(),
                action: action.to_string(),
                count: codes.len(),
            });
        }

        self.controls
            .entry(context.to_string())
            .or_default()
            .insert(action.to_string(), codes);
        Ok(())
    }

    pub fn keys_for(&self, context: &str, action: &str) -> Result<&[KeyCode], BindingError> {
        let actions = self
            .controls
            .get(context)
            .ok_or_else(|| BindingError::UnknownContext(context.to_string()))?;
        actions
            .get(action)
            .map(Vec::as_slice)
            .ok_or_else(|| BindingError::UnknownAction {
                context: context.to_string(),
                action: action.to_string(),
            })
    }

    /// Every (context, action) bound to `key`
    pub fn actions_for(&self, key: KeyCode) -> Vec<(&str, &str)> {
        let key = normalize(key);
        self.controls
            .iter()
            .flat_map(|(context, actions)| {
                actions
                    .iter()
                    .filter(move |(_, keys)| keys.contains(&key))
                    .map(move |(action, _)| (context.as_str(), action.as_str()))
            })
            .collect()
    }

    /// The game action `key` triggers in `context`, if any
    pub fn game_action_for(&self, context: &str, key: KeyCode) -> Option<GameAction> {
        let key = normalize(key);
        self.controls
            .get(context)?
            .iter()
            .filter(|(_, keys)| keys.contains(&key))
            .find_map(|(action, _)| game_action_from_name(action))
    }

    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    pub fn actions(&self, context: &str) -> Result<impl Iterator<Item = &str>, BindingError> {
        self.controls
            .get(context)
            .map(|actions| actions.keys().map(String::as_str))
            .ok_or_else(|| BindingError::UnknownContext(context.to_string()))
    }

    /// `controls` section as JSON
    pub fn to_value(&self) -> Value {
        let mut controls = Map::new();
        for (context, actions) in &self.controls {
            let mut entry = Map::new();
            write_actions(&mut entry, actions);
            controls.insert(context.clone(), Value::Object(entry));
        }
        let mut root = Map::new();
        root.insert(CONTROLS.to_string(), Value::Object(controls));
        Value::Object(root)
    }

    /// Built-in play bindings: arrows and WASD, space to drop, p to pause,
    /// r to restart.
    pub fn standard() -> Self {
        const DEFAULTS: [(GameAction, &[KeyCode]); 8] = [
            (GameAction::MoveLeft, &[KeyCode::Left, KeyCode::Char('a')]),
            (GameAction::MoveRight, &[KeyCode::Right, KeyCode::Char('d')]),
            (GameAction::SoftDrop, &[KeyCode::Down, KeyCode::Char('s')]),
            (GameAction::RotateCw, &[KeyCode::Up, KeyCode::Char('w')]),
            (GameAction::RotateCcw, &[KeyCode::Char('z'), KeyCode::Char('y')]),
            (GameAction::HardDrop, &[KeyCode::Char(' ')]),
            (GameAction::Pause, &[KeyCode::Char('p'), KeyCode::Esc]),
            (GameAction::Restart, &[KeyCode::Char('r')]),
        ];

        let mut actions = BTreeMap::new();
        for (action, keys) in DEFAULTS {
            actions.insert(action_name(action).to_string(), keys.to_vec());
        }
        let mut controls = BTreeMap::new();
        controls.insert(PLAY_CONTEXT.to_string(), actions);
        Self { controls }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::standard()
    }
}

/// Store each action's keys under `entry` as an array of key names
fn write_actions(entry: &mut Map<String, Value>, actions: &BTreeMap<String, Vec<KeyCode>>) {
    for (action, keys) in actions {
        let names = keys
            .iter()
            .filter_map(|&code| key_name(code))
            .map(Value::String)
            .collect();
        entry.insert(action.clone(), Value::Array(names));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_play_bindings() {
        let bindings = KeyBindings::standard();
        assert_eq!(
            bindings.game_action_for(PLAY_CONTEXT, KeyCode::Left),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            bindings.game_action_for(PLAY_CONTEXT, KeyCode::Char('W')),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            bindings.game_action_for(PLAY_CONTEXT, KeyCode::Char(' ')),
            Some(GameAction::HardDrop)
        );
        assert_eq!(bindings.game_action_for(PLAY_CONTEXT, KeyCode::Char('x')), None);
        assert_eq!(bindings.game_action_for("menu", KeyCode::Left), None);
    }

    #[test]
    fn test_action_names_map_back() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::HardDrop,
            GameAction::Pause,
            GameAction::Restart,
        ] {
            assert_eq!(game_action_from_name(action_name(action)), Some(action));
        }
    }

    #[test]
    fn test_bind_rejects_third_key() {
        let mut bindings = KeyBindings::empty();
        let err = bindings
            .bind("play", "pause", &[KeyCode::Char('p'), KeyCode::Esc, KeyCode::Enter])
            .unwrap_err();
        assert_eq!(err.code(), "too_many_keys");
    }

    #[test]
    fn test_bind_collapses_duplicates() {
        let mut bindings = KeyBindings::empty();
        bindings
            .bind("play", "pause", &[KeyCode::Char('p'), KeyCode::Char('P'), KeyCode::Esc])
            .unwrap();
        assert_eq!(
            bindings.keys_for("play", "pause").unwrap(),
            &[KeyCode::Char('p'), KeyCode::Esc]
        );
    }

    #[test]
    fn test_lookup_errors() {
        let bindings = KeyBindings::standard();
        assert!(matches!(
            bindings.keys_for("menu", "pause"),
            Err(BindingError::UnknownContext(_))
        ));
        assert!(matches!(
            bindings.keys_for("play", "hold"),
            Err(BindingError::UnknownAction { .. })
        ));
    }

    #[test]
    fn test_save_to_new_file_matches_to_value() {
        let path = std::env::temp_dir().join(format!(
            "blockfall-{}-save-matches-value.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut bindings = KeyBindings::standard();
        bindings.bind("menu", "select", &[KeyCode::Enter]).unwrap();
        bindings.save(&path).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, bindings.to_value());
        assert_eq!(saved["controls"]["play"]["lock_piece"], serde_json::json!(["space"]));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_to_value_parses_back() {
        let bindings = KeyBindings::standard();
        assert_eq!(KeyBindings::from_value(&bindings.to_value()).unwrap(), bindings);
    }
}
