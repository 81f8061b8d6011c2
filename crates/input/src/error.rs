use std::fmt;
use std::io;

#[derive(Debug)]
pub enum BindingError {
    Io(io::Error),
    Json(serde_json::Error),
    /// The file does not have the `controls` -> context -> action -> keys shape
    Malformed(String),
    UnknownKey(String),
    TooManyKeys {
        context: String,
        action: String,
        count: usize,
    },
    UnknownContext(String),
    UnknownAction {
        context: String,
        action: String,
    },
}

impl BindingError {
    pub fn code(&self) -> &'static str {
        match self {
            BindingError::Io(_) => "io",
            BindingError::Json(_) => "json",
            BindingError::Malformed(_) => "malformed",
            BindingError::UnknownKey(_) => "unknown_key",
            BindingError::TooManyKeys { .. } => "too_many_keys",
            BindingError::UnknownContext(_) => "unknown_context",
            BindingError::UnknownAction { .. } => "unknown_action",
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Io(err) => write!(f, "key binding file: {err}"),
            BindingError::Json(err) => write!(f, "key binding json: {err}"),
            BindingError::Malformed(what) => write!(f, "malformed key bindings: {what}"),
            BindingError::UnknownKey(name) => write!(f, "unknown key name '{name}'"),
            BindingError::TooManyKeys {
                context,
                action,
                count,
            } => write!(
                f,
                "action '{action}' in context '{context}' has {count} keys (max {})",
                crate::bindings::MAX_KEYS_PER_ACTION
            ),
            BindingError::UnknownContext(context) => write!(f, "unknown context '{context}'"),
            BindingError::UnknownAction { context, action } => {
                write!(f, "unknown action '{action}' in context '{context}'")
            }
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindingError::Io(err) => Some(err),
            BindingError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BindingError {
    fn from(err: io::Error) -> Self {
        BindingError::Io(err)
    }
}

impl From<serde_json::Error> for BindingError {
    fn from(err: serde_json::Error) -> Self {
        BindingError::Json(err)
    }
}
