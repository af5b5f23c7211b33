use tracing::{debug, debug_span};

use crate::classify::LineType;

use super::Slot;

/// True if `predicate` holds on a strict majority of the non-blank slots.
fn holds_on_majority(slots: &[Slot], predicate: impl Fn(&Slot) -> bool) -> bool {
    let mut total = 0;
    let mut matching = 0;
    for slot in slots.iter().filter(|s| !s.is_blank()) {
        total += 1;
        if predicate(slot) {
            matching += 1;
        }
    }
    matching * 2 > total
}

/// Does `second` supply a line type that `first` is mostly missing?
///
/// This is the case for e.g. a kanji transcription pasted next to a romanized
/// one: each block describes the same rows in a different script.
pub fn is_complementary(first: &[Slot], second: &[Slot]) -> bool {
    LineType::CLASSIFIED.into_iter().any(|t| {
        holds_on_majority(first, |s| !s.is_defined(t)) && holds_on_majority(second, |s| s.is_defined(t))
    })
}

/// Zip two complementary slot sequences row by row.
///
/// Blank slots act as paragraph boundaries: two blanks are consumed together,
/// while a blank on only one side is consumed alone so that a stray paragraph
/// break in one block does not shift the other.
fn zip_slots(first: Vec<Slot>, second: Vec<Slot>) -> Vec<Slot> {
    let mut combined = Vec::with_capacity(first.len().max(second.len()));
    let mut a = first.into_iter().peekable();
    let mut b = second.into_iter().peekable();

    loop {
        match (a.peek().map(Slot::is_blank), b.peek().map(Slot::is_blank)) {
            (None, None) => break,
            (Some(_), None) => combined.extend(a.by_ref()),
            (None, Some(_)) => combined.extend(b.by_ref()),
            (Some(true), Some(true)) => {
                combined.extend(a.next());
                b.next();
            }
            (Some(false), Some(true)) => combined.extend(b.next()),
            (Some(true), Some(false)) => combined.extend(a.next()),
            (Some(false), Some(false)) => {
                if let (Some(x), Some(y)) = (a.next(), b.next()) {
                    combined.push(Slot::combine(&x, &y));
                }
            }
        }
    }
    combined
}

/// Reconcile two slot sequences: zip them when complementary, else concatenate.
pub fn merge(first: Vec<Slot>, second: Vec<Slot>) -> Vec<Slot> {
    let _span = debug_span!("merge", first = first.len(), second = second.len()).entered();
    if is_complementary(&first, &second) {
        let zipped = zip_slots(first, second);
        debug!(mode = "zip", slots = zipped.len());
        zipped
    } else {
        let mut concatenated = first;
        concatenated.extend(second);
        debug!(mode = "concat", slots = concatenated.len());
        concatenated
    }
}

/// Fold [`merge`] over all blocks, left to right.
pub fn merge_blocks(blocks: Vec<Vec<Slot>>) -> Vec<Slot> {
    blocks.into_iter().fold(Vec::new(), merge)
}
