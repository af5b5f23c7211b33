//! Romaji-to-hiragana conversion.
//!
//! Mappings come from a TOML table (embedded default, optionally replaced once
//! at startup). Conversion is greedy longest-match over the table, with
//! sokuon (っ) and hatsuon (ん) derived from the surrounding letters.

mod config;
mod convert;
mod table;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use convert::romaji_to_hiragana;
pub use table::{default_toml, RomajiTable};
