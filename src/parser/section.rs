//! Section stream decoding.

use crate::model::{Block, Section};

use super::context::{NoteKind, ParseContext};
use super::note::collect_note;
use super::paragraph::collect_paragraph;
use super::picture::locate_picture;
use super::record::{body_tag, ctrl_id, tokenize, Record};
use super::table::{approximate_table, reconstruct_table};

/// Decode one decompressed `BodyText/SectionN` stream.
pub fn parse_section(data: &[u8], ctx: &mut ParseContext) -> Section {
    let records = tokenize(data);
    log::debug!("section stream: {} records", records.len());
    parse_records(&records, ctx)
}

/// Walk a tokenized record list with a single cursor.
pub fn parse_records(records: &[Record<'_>], ctx: &mut ParseContext) -> Section {
    let mut section = Section::new();
    let mut i = 0;

    while let Some(record) = records.get(i) {
        match record.tag {
            body_tag::PARA_HEADER => {
                let collected = collect_paragraph(records, i, ctx);
                if let Some(paragraph) = collected.paragraph {
                    section.add_paragraph(paragraph);
                }
                i = collected.next;

                // An anchor followed directly by cells, with no control record.
                let list_follows = records.get(i).is_some_and(|r| r.is(body_tag::LIST_HEADER));
                if collected.has_anchor && list_follows && ctx.recover_approximate_tables {
                    let (table, consumed) = approximate_table(records, i, collected.level, ctx);
                    if let Some(table) = table.filter(|t| !t.is_empty()) {
                        log::debug!("inline anchor at record {} rebuilt as table", i);
                        section.add_table(table);
                    }
                    i += consumed;
                }
            }
            body_tag::CTRL_HEADER => {
                i += handle_control(records, i, ctx, &mut section).max(1);
            }
            _ => i += 1,
        }
    }

    section
}

/// Dispatch a control record; returns the number of records consumed.
fn handle_control(records: &[Record<'_>], index: usize, ctx: &mut ParseContext, section: &mut Section) -> usize {
    match records[index].ctrl_id() {
        Some(ctrl_id::TABLE) => {
            let (table, consumed) = reconstruct_table(records, index, ctx);
            if let Some(table) = table.filter(|t| !t.is_empty()) {
                section.add_table(table);
            }
            consumed
        }
        Some(ctrl_id::PICTURE | ctrl_id::SHAPE_OBJECT) => {
            let (bin_id, consumed) = locate_picture(records, index);
            if let Some(key) = bin_id.and_then(|id| ctx.resolve_image(id)) {
                section.add_block(Block::image(key));
            }
            consumed
        }
        Some(ctrl_id::FOOTNOTE) => collect_note(records, index, NoteKind::Footnote, ctx),
        Some(ctrl_id::ENDNOTE) => collect_note(records, index, NoteKind::Endnote, ctx),
        Some(other) => {
            log::trace!("skipping control {}", ctrl_id::name(other));
            1
        }
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::parser::style::StyleTables;
    use crate::parser::testutil::{ctrl_block, para_header, picture_component, table_record, utf16, StreamBuilder};

    fn context() -> ParseContext {
        ParseContext::new(StyleTables::new())
    }

    #[test]
    fn test_single_paragraph() {
        let data = StreamBuilder::new()
            .record(66, 0, &para_header(4, 0, 0))
            .record(67, 1, &utf16("Hi!!"))
            .build();
        let section = parse_section(&data, &mut context());

        assert_eq!(section.elements.len(), 1);
        let paragraph = section.paragraphs().next().expect("paragraph");
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].text, "Hi!!");
        assert!(!paragraph.runs[0].style.has_emphasis());
        assert_eq!(paragraph.heading, HeadingLevel::None);
    }

    #[test]
    fn test_block_order() {
        let data = StreamBuilder::new()
            .paragraph(0, "before")
            .record(71, 1, &ctrl_id::TABLE.to_le_bytes())
            .record(77, 2, &table_record(1, 1))
            .record(72, 2, &[0u8; 8])
            .paragraph(2, "cell")
            .record(71, 1, &ctrl_id::PICTURE.to_le_bytes())
            .record(85, 2, &picture_component(1))
            .paragraph(0, "after")
            .build();
        let mut ctx = context().with_images(["BIN0001"]);
        let section = parse_section(&data, &mut ctx);

        assert_eq!(section.elements.len(), 4);
        assert!(section.elements[0].is_paragraph());
        assert!(section.elements[1].is_table());
        assert!(section.elements[2].is_image());
        assert!(section.elements[3].is_paragraph());
        assert_eq!(section.plain_text(), "before\ncell\nafter");
        assert_eq!(ctx.unreferenced_images().count(), 0);
    }

    #[test]
    fn test_unresolved_picture_dropped() {
        let data = StreamBuilder::new()
            .record(71, 0, &ctrl_id::PICTURE.to_le_bytes())
            .record(85, 1, &picture_component(5))
            .build();
        let section = parse_section(&data, &mut context());
        assert!(section.is_empty());
    }

    #[test]
    fn test_text_box_in_shape_surfaces() {
        let data = StreamBuilder::new()
            .record(71, 1, &ctrl_id::SHAPE_OBJECT.to_le_bytes())
            .record(72, 2, &[0u8; 8])
            .paragraph(2, "inside the box")
            .build();
        let section = parse_section(&data, &mut context());
        assert_eq!(section.plain_text(), "inside the box");
    }

    #[test]
    fn test_footnote_kept_out_of_body() {
        let data = StreamBuilder::new()
            .paragraph(0, "Body")
            .record(71, 1, &ctrl_id::FOOTNOTE.to_le_bytes())
            .record(72, 2, &[0u8; 8])
            .paragraph(2, "Note text")
            .paragraph(0, "More body")
            .build();
        let mut ctx = context();
        let section = parse_section(&data, &mut ctx);

        assert_eq!(section.plain_text(), "Body\nMore body");
        let (footnotes, _) = ctx.take_notes();
        assert_eq!(footnotes["fn1"].plain_text(), "Note text");
    }

    #[test]
    fn test_unknown_control_skips_one() {
        let data = StreamBuilder::new()
            .record(71, 1, &ctrl_id::SECTION_DEF.to_le_bytes())
            .record(71, 1, &[0u8; 2])
            .paragraph(0, "text")
            .build();
        let section = parse_section(&data, &mut context());
        assert_eq!(section.plain_text(), "text");
    }

    #[test]
    fn test_inline_anchor_fallback() {
        let mut text = utf16("Grid:");
        text.extend(ctrl_block(11, ctrl_id::TABLE));
        let data = StreamBuilder::new()
            .record(66, 0, &para_header(13, 0, 0))
            .record(67, 1, &text)
            .record(72, 1, &[0u8; 8])
            .paragraph(1, "x")
            .record(72, 1, &[0u8; 8])
            .paragraph(1, "y")
            .paragraph(0, "tail")
            .build();

        let section = parse_section(&data, &mut context());
        assert_eq!(section.elements.len(), 3);
        let table = section.tables().next().expect("table");
        assert!(table.is_approximate());
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 2);

        let strict = parse_section(&data, &mut context().with_table_recovery(false));
        assert_eq!(strict.tables().count(), 0);
    }

    #[test]
    fn test_anchor_beyond_char_count_is_not_a_table() {
        let mut text = utf16("AB");
        text.extend(ctrl_block(11, ctrl_id::TABLE));
        let data = StreamBuilder::new()
            .record(66, 0, &para_header(2, 0, 0))
            .record(67, 1, &text)
            .record(72, 1, &[0u8; 8])
            .paragraph(1, "cell")
            .build();

        let section = parse_section(&data, &mut context());
        assert_eq!(section.tables().count(), 0);
        assert_eq!(section.plain_text(), "AB\ncell");
    }

    #[test]
    fn test_empty_and_garbage_streams() {
        assert!(parse_section(&[], &mut context()).is_empty());
        assert!(parse_section(&[0xFF, 0xFF, 0xFF], &mut context()).is_empty());
    }
}
