//! Footnote and endnote bodies.

use super::context::{NoteKind, ParseContext};
use super::paragraph::collect_paragraph;
use super::record::{body_tag, subtree_end, Record};

/// Consume the note control at `index` and store its paragraphs.
///
/// Returns the number of records consumed (the whole control subtree).
pub fn collect_note(records: &[Record<'_>], index: usize, kind: NoteKind, ctx: &mut ParseContext) -> usize {
    let end = subtree_end(records, index);
    let mut note = ctx.next_note(kind);

    let mut i = index + 1;
    while i < end {
        if records[i].is(body_tag::PARA_HEADER) {
            let collected = collect_paragraph(records, i, ctx);
            note.paragraphs.extend(collected.paragraph);
            i = collected.next;
        } else {
            i += 1;
        }
    }

    log::debug!("{} with {} paragraphs", note.id, note.paragraphs.len());
    ctx.add_note(kind, note);
    end - index
}
