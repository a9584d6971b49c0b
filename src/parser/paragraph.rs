//! Paragraph assembly from PARA_HEADER, PARA_TEXT and PARA_CHAR_SHAPE.

use crate::model::{CharStyle, HeadingLevel, Paragraph, TextRun};

use super::binary::{read_u16, read_u32};
use super::context::ParseContext;
use super::record::{body_tag, Record};
use super::text::{is_graphic_marker_text, sanitize, scan_text};

/// Bit 31 of the char count flags the last paragraph in a list.
const CHAR_COUNT_MASK: u32 = 0x7FFF_FFFF;

/// Bytes per (position, char shape) pair.
const STYLE_RUN_SIZE: usize = 8;

/// Decoded PARA_HEADER fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParaHeader {
    /// Declared character count (positions)
    pub char_count: u32,
    /// Index into the paragraph shape table
    pub para_shape: u16,
    /// Number of char shape pairs in PARA_CHAR_SHAPE
    pub char_shape_count: u16,
}

impl ParaHeader {
    /// Decode a header payload; missing fields default to zero.
    pub fn parse(payload: &[u8]) -> Self {
        Self {
            char_count: read_u32(payload, 0).map_or(0, |n| n & CHAR_COUNT_MASK),
            para_shape: read_u16(payload, 8).unwrap_or(0),
            char_shape_count: read_u16(payload, 12).unwrap_or(0),
        }
    }
}

/// A style change at a character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    pub position: u32,
    pub char_shape: u32,
}

/// Decode PARA_CHAR_SHAPE pairs, sorted by position.
///
/// A declared count of 0 takes as many pairs as the payload holds; a larger
/// declared count is clamped to the payload.
pub fn decode_style_runs(payload: &[u8], declared: u16) -> Vec<StyleRun> {
    let available = payload.len() / STYLE_RUN_SIZE;
    let count = match declared as usize {
        0 => available,
        n => n.min(available),
    };
    let mut runs: Vec<StyleRun> = payload
        .chunks_exact(STYLE_RUN_SIZE)
        .take(count)
        .filter_map(|pair| {
            Some(StyleRun {
                position: read_u32(pair, 0)?,
                char_shape: read_u32(pair, 4)?,
            })
        })
        .collect();
    runs.sort_by_key(|run| run.position);
    runs
}

/// Build a paragraph from its header and optional text and style payloads.
///
/// Returns the paragraph together with whether its text carries an object
/// anchor. Runs are sanitized individually and empty runs are dropped.
pub fn assemble_paragraph(
    header: &ParaHeader,
    text: Option<&[u8]>,
    style_runs: Option<&[u8]>,
    ctx: &ParseContext,
) -> (Paragraph, bool) {
    let scanned = scan_text(text.unwrap_or_default(), header.char_count as usize);
    let runs = style_runs
        .map(|payload| decode_style_runs(payload, header.char_shape_count))
        .unwrap_or_default();

    let mut paragraph = Paragraph::new();
    let mut push = |text: &str, style: CharStyle| {
        let clean = sanitize(text);
        if !clean.is_empty() {
            paragraph.add_run(TextRun::styled(clean, style));
        }
    };

    match runs.first() {
        None => push(&scanned.text, CharStyle::default()),
        Some(first) => {
            push(scanned.slice(0, first.position as usize), CharStyle::default());
            for (idx, run) in runs.iter().enumerate() {
                let start = run.position as usize;
                let text = match runs.get(idx + 1) {
                    Some(next) => scanned.slice(start, next.position as usize),
                    None => scanned.slice_from(start),
                };
                push(text, ctx.styles.char_style(run.char_shape as usize));
            }
        }
    }

    let para_style = ctx.styles.para_style(header.para_shape as usize);
    paragraph.alignment = para_style.alignment;
    paragraph.heading = resolve_heading(&paragraph, para_style.outline_level, ctx.base_font_size);

    (paragraph, scanned.has_object_anchor())
}

/// Heading level from the outline level, else from the first run's size.
pub fn resolve_heading(paragraph: &Paragraph, outline_level: u8, base_font_size: f32) -> HeadingLevel {
    if (1..=6).contains(&outline_level) {
        return HeadingLevel::from_depth(outline_level);
    }

    let Some(first) = paragraph.runs.first() else {
        return HeadingLevel::None;
    };
    let Some(size) = first.style.font_size else {
        return HeadingLevel::None;
    };
    if base_font_size <= 0.0 {
        return HeadingLevel::None;
    }

    let ratio = size / base_font_size;
    if ratio >= 2.0 {
        HeadingLevel::H1
    } else if ratio >= 1.6 {
        HeadingLevel::H2
    } else if ratio >= 1.4 {
        HeadingLevel::H3
    } else if ratio >= 1.2 && first.style.bold {
        HeadingLevel::H4
    } else {
        HeadingLevel::None
    }
}

/// Result of gathering one paragraph from the record list.
#[derive(Debug, Clone)]
pub struct CollectedParagraph {
    /// The paragraph, unless it was empty or a drawing placeholder
    pub paragraph: Option<Paragraph>,
    /// Index of the first record after the paragraph
    pub next: usize,
    /// Whether the text carries an object anchor
    pub has_anchor: bool,
    /// Level of the PARA_HEADER
    pub level: u16,
}

/// Gather and assemble the paragraph whose PARA_HEADER is at `index`.
///
/// Gathering stops at the next PARA_HEADER, CTRL_HEADER or LIST_HEADER, or
/// at a record no deeper than the header that is not PARA_TEXT.
pub fn collect_paragraph(records: &[Record<'_>], index: usize, ctx: &ParseContext) -> CollectedParagraph {
    let Some(head) = records.get(index) else {
        return CollectedParagraph {
            paragraph: None,
            next: records.len(),
            has_anchor: false,
            level: 0,
        };
    };
    let header = ParaHeader::parse(head.payload);

    let mut text = None;
    let mut style_runs = None;
    let mut next = index + 1;
    while let Some(record) = records.get(next) {
        match record.tag {
            body_tag::PARA_HEADER | body_tag::CTRL_HEADER | body_tag::LIST_HEADER => break,
            body_tag::PARA_TEXT => {
                text.get_or_insert(record.payload);
            }
            _ if record.level <= head.level => break,
            body_tag::PARA_CHAR_SHAPE => {
                style_runs.get_or_insert(record.payload);
            }
            _ => {}
        }
        next += 1;
    }

    let (paragraph, has_anchor) = assemble_paragraph(&header, text, style_runs, ctx);
    let plain = paragraph.plain_text();
    let keep = !plain.trim().is_empty() && !is_graphic_marker_text(&plain);
    if !keep && !plain.is_empty() {
        log::debug!("dropping placeholder paragraph at record {}", index);
    }

    CollectedParagraph {
        paragraph: keep.then_some(paragraph),
        next,
        has_anchor,
        level: head.level,
    }
}
