//! Session configuration.
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```
//! use blockfall_engine::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{ "cols": 8, "seed": 7 }"#).unwrap();
//! assert_eq!(config.cols, 8);
//! assert_eq!(config.rows, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_BAG_SIZE, DEFAULT_COLS, DEFAULT_PREVIEW_COUNT, DEFAULT_ROWS, FALL_DELAY_MS,
    LOCK_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pieces per bag refill; a positive multiple of the kind count
    pub bag_size: usize,
    /// Gravity interval
    pub fall_delay_ms: u32,
    /// Grounded time before locking
    pub lock_delay_ms: u32,
    /// Upcoming pieces included in snapshots
    pub preview_count: usize,
    /// Bag seed; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            bag_size: DEFAULT_BAG_SIZE,
            fall_delay_ms: FALL_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            preview_count: DEFAULT_PREVIEW_COUNT,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SessionConfig::from_json(r#"{ "colums": 8 }"#).is_err());
    }

    #[test]
    fn json_roundtrip_keeps_seed() {
        let config = SessionConfig::default().with_seed(99);
        let back = SessionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back.seed, Some(99));
    }
}
