use std::fmt;

use blockfall_core::CoreError;

use crate::modes::ModeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Core(CoreError),
    /// `ModeStack::change` with the id of the mode already on top
    ModeAlreadyActive(ModeId),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Core(err) => err.code(),
            EngineError::ModeAlreadyActive(_) => "mode_already_active",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Core(err) => err.fmt(f),
            EngineError::ModeAlreadyActive(id) => {
                write!(f, "mode '{}' is already active", id.as_str())
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Core(err) => Some(err),
            EngineError::ModeAlreadyActive(_) => None,
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        EngineError::Core(err)
    }
}
