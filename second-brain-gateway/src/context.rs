//! Flattening notes into the text block the answerer grounds on.

use second_brain_core::Note;

/// Separator placed between note blocks.
pub const RECORD_DELIMITER: &str = "\n---\n";

/// Render every note as a `Title`/`Content`/`Tags` block, in input order.
///
/// Nothing is filtered or truncated; an empty slice gives an empty string.
pub fn assemble(notes: &[Note]) -> String {
    notes
        .iter()
        .map(note_block)
        .collect::<Vec<_>>()
        .join(RECORD_DELIMITER)
}

fn note_block(note: &Note) -> String {
    format!(
        "Title: {}\nContent: {}\nTags: {}",
        note.title,
        note.content,
        note.tag_list().join(", ")
    )
}
