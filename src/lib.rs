//! Furigana annotation engine.
//!
//! Thin facade over [`jmiru_core`]: splits free-form input into blocks,
//! runs the pipeline, and owns tracing setup.

pub mod trace_init;

pub use jmiru_core::{align, classify, output, romaji, script, settings, slots, unicode};

use tracing::debug_span;

use jmiru_core::output::{assemble, OutputGroup};
use jmiru_core::script::ScriptClassifier;
use jmiru_core::slots::slots_from_blocks;

/// Divider between blocks when several are pasted into one input.
pub const DEFAULT_DIVIDER: &str = "\n\n\n\n";

/// Split `text` into blocks on `divider`.
///
/// Surrounding line breaks are trimmed from each block, and blocks with no
/// visible text are dropped. An empty divider yields the whole text.
pub fn split_blocks<'a>(text: &'a str, divider: &str) -> Vec<&'a str> {
    let pieces: Vec<&str> = if divider.is_empty() {
        vec![text]
    } else {
        text.split(divider).collect()
    };
    pieces
        .into_iter()
        .map(|b| b.trim_matches(|c| c == '\n' || c == '\r'))
        .filter(|b| !b.trim().is_empty())
        .collect()
}

/// Run the full pipeline over already-split blocks.
pub fn annotate_blocks<S: AsRef<str>>(sc: &dyn ScriptClassifier, blocks: &[S]) -> Vec<OutputGroup> {
    let _span = debug_span!("annotate_blocks", blocks = blocks.len()).entered();
    let slots = slots_from_blocks(sc, blocks);
    assemble(sc, &slots)
}

/// Split `text` on `divider` and annotate the resulting blocks.
pub fn annotate_text(sc: &dyn ScriptClassifier, text: &str, divider: &str) -> Vec<OutputGroup> {
    annotate_blocks(sc, &split_blocks(text, divider))
}
