//! Terminal input crate.
//!
//! Maps `crossterm` key events onto named actions through a JSON-loadable
//! [`KeyBindings`] table, and tracks pressed / held / released state per
//! frame with [`ActionTracker`]. Nothing here knows about rendering.

pub mod bindings;
pub mod error;
pub mod keys;
pub mod tracker;

pub use blockfall_types as types;

pub use bindings::{
    action_name, game_action_from_name, KeyBindings, MAX_KEYS_PER_ACTION, PLAY_CONTEXT,
};
pub use error::BindingError;
pub use keys::{key_from_name, key_name, should_quit};
pub use tracker::ActionTracker;
