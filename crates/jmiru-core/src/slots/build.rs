use tracing::{debug, debug_span};

use crate::classify::{is_blank_line, ClassifiedLine, LineType};

use super::Slot;

/// Group the classified lines of one block into slots.
///
/// - An unclassified line is appended to the current slot, which is then
///   closed. A blank line first closes a slot holding classified content, so
///   it always lands in a blank slot of its own.
/// - A classified line opens a new slot if the current one already holds that
///   type, or if it is a chord line and the slot already has classified
///   content (chords precede the text they annotate).
pub fn build_slots(lines: &[ClassifiedLine]) -> Vec<Slot> {
    let _span = debug_span!("build_slots", lines = lines.len()).entered();
    let mut slots = Vec::new();
    let mut current = Slot::default();

    for ClassifiedLine { line, line_type } in lines {
        if *line_type == LineType::Unclassified {
            if is_blank_line(line) && current.has_classified() {
                slots.push(std::mem::take(&mut current));
            }
            current.assign(LineType::Unclassified, line.clone());
            slots.push(std::mem::take(&mut current));
            continue;
        }

        let collides = current.is_defined(*line_type)
            || (*line_type == LineType::Chord && current.has_classified());
        if collides {
            slots.push(std::mem::take(&mut current));
        }
        current.assign(*line_type, line.clone());
    }

    if !current.is_empty() {
        slots.push(current);
    }

    debug!(slots = slots.len());
    slots
}
