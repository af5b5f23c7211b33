use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError};

pub(crate) const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default romaji table.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Sorted romaji → kana mapping.
pub struct RomajiTable {
    map: BTreeMap<String, String>,
    max_key_len: usize,
}

impl RomajiTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let map = parse_romaji_toml(toml_str).expect("romaji TOML must be valid");
            Self::from_map(map)
        })
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        let max_key_len = map.keys().map(|k| k.len()).max().unwrap_or(0);
        Self { map, max_key_len }
    }

    /// Longest key in bytes (keys are ASCII, so also in chars).
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn get(&self, romaji: &str) -> Option<&str> {
        self.map.get(romaji).map(|s| s.as_str())
    }
}
