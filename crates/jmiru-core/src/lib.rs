//! Furigana alignment pipeline.
//!
//! Classifies lines of mixed-script Japanese text, reconciles input blocks
//! into synchronized slots, and aligns each kanji line against its reading.

pub mod align;
pub mod classify;
pub mod output;
pub mod romaji;
pub mod script;
pub mod settings;
pub mod slots;
pub mod unicode;
