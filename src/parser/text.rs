//! PARA_TEXT decoding.
//!
//! Text is UTF-16LE with control codes below 32 interleaved. Each control
//! code occupies either one code unit or an eight unit block and may or may
//! not take a character position. Char-shape runs address text by position,
//! so the scanner records where every position starts in the output string.

use super::binary::utf16_units;

/// Size in code units of an inline or extended control block.
const CONTROL_BLOCK_UNITS: usize = 8;

/// Table, footnote and drawing object anchor.
pub const ANCHOR_OBJECT: u16 = 11;

/// Codepoints produced by reading short binary remnants as text.
const GARBAGE_CHARS: [char; 3] = ['\u{6F74}', '\u{666F}', '\u{6174}'];

/// Codepoints that make up drawing primitive placeholders.
const GRAPHIC_MARKERS: [char; 8] = [
    '\u{6E70}', '\u{6824}', '\u{6E6F}', '\u{6E37}', '\u{6E30}', '\u{F0E8}', '\u{6364}', '\u{7365}',
];

/// Longest text treated as a drawing placeholder.
const GRAPHIC_MARKER_MAX_CHARS: usize = 3;

/// Kind of a control code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlClass {
    /// Single unit control that takes a position (line break, hyphen, ...)
    Char,
    /// Eight unit inline object that takes a position (tab, field end)
    Inline,
    /// Eight unit anchor that takes no position (tables, notes, shapes)
    Extended,
    /// Unrecognized code below 32, treated as a single unit char
    Unknown,
}

impl ControlClass {
    /// Classify a code unit; `None` for ordinary text.
    pub fn of(unit: u16) -> Option<Self> {
        match unit {
            0 | 10 | 13 | 24 | 30 | 31 => Some(ControlClass::Char),
            4 | 9 => Some(ControlClass::Inline),
            2 | 3 | 11 | 15..=18 | 21..=23 => Some(ControlClass::Extended),
            1..=31 => Some(ControlClass::Unknown),
            _ => None,
        }
    }

    /// Code units consumed from the payload.
    pub fn width(&self) -> usize {
        match self {
            ControlClass::Inline | ControlClass::Extended => CONTROL_BLOCK_UNITS,
            ControlClass::Char | ControlClass::Unknown => 1,
        }
    }

    /// Character positions consumed.
    pub fn position_cost(&self) -> usize {
        match self {
            ControlClass::Extended => 0,
            _ => 1,
        }
    }
}

/// Text emitted for a control code.
fn control_text(code: u16) -> Option<char> {
    match code {
        9 => Some('\t'),
        10 => Some('\n'),
        24 => Some('-'),
        30 => Some('\u{00A0}'),
        31 => Some(' '),
        _ => None,
    }
}

/// A control code seen while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMark {
    /// Character position the control sits at
    pub position: usize,
    /// Control code (< 32)
    pub code: u16,
    /// Raw bytes of the control unit or block
    pub raw: Vec<u8>,
}

impl ControlMark {
    /// Whether this is an object anchor (code 11).
    pub fn is_object_anchor(&self) -> bool {
        self.code == ANCHOR_OBJECT
    }
}

/// Output of [`scan_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedText {
    /// Decoded text with controls expanded
    pub text: String,
    /// Byte offset in `text` where each position starts, plus an end sentinel
    offsets: Vec<usize>,
    /// Controls in payload order
    pub controls: Vec<ControlMark>,
}

impl ScannedText {
    /// Number of character positions consumed.
    pub fn position_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Byte offset in `text` of a character position, clamped to the end.
    pub fn byte_offset(&self, position: usize) -> usize {
        self.offsets.get(position).copied().unwrap_or(self.text.len())
    }

    /// Text between two character positions.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end).max(from);
        &self.text[from..to]
    }

    /// Text from a character position to the end.
    pub fn slice_from(&self, start: usize) -> &str {
        &self.text[self.byte_offset(start)..]
    }

    /// Whether any control is an object anchor.
    pub fn has_object_anchor(&self) -> bool {
        self.controls.iter().any(ControlMark::is_object_anchor)
    }
}

/// Decode a PARA_TEXT payload.
///
/// `budget` is the paragraph's declared character count; scanning stops once
/// that many positions are consumed. A budget of 0 scans the whole payload.
pub fn scan_text(payload: &[u8], budget: usize) -> ScannedText {
    let units: Vec<u16> = utf16_units(payload).collect();
    let mut out = ScannedText::default();
    let mut position = 0usize;
    let mut i = 0usize;

    while i < units.len() {
        let unit = units[i];
        let class = ControlClass::of(unit);

        if budget > 0 && position >= budget {
            break;
        }

        if let Some(class) = class {
            let end = (i + class.width()).min(units.len());
            out.controls.push(ControlMark {
                position,
                code: unit,
                raw: payload[i * 2..end * 2].to_vec(),
            });
            for _ in 0..class.position_cost() {
                out.offsets.push(out.text.len());
            }
            if let Some(c) = control_text(unit) {
                out.text.push(c);
            }
            position += class.position_cost();
            i = end;
            continue;
        }

        // Surrogate pairs take two positions for one char.
        if (0xD800..0xDC00).contains(&unit) {
            if let Some(&low) = units.get(i + 1).filter(|&&u| (0xDC00..0xE000).contains(&u)) {
                let c = char::decode_utf16([unit, low])
                    .next()
                    .and_then(|r| r.ok())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.offsets.push(out.text.len());
                out.text.push(c);
                out.offsets.push(out.text.len());
                position += 2;
                i += 2;
                continue;
            }
        }

        out.offsets.push(out.text.len());
        out.text
            .push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
        position += 1;
        i += 1;
    }

    out.offsets.push(out.text.len());
    out
}

/// Remove codepoints known to be binary garbage.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !GARBAGE_CHARS.contains(c)).collect()
}

/// Whether text is a drawing placeholder rather than prose.
///
/// The whole text must be markers; surrounding whitespace counts against it.
pub fn is_graphic_marker_text(text: &str) -> bool {
    !text.is_empty()
        && text.chars().count() <= GRAPHIC_MARKER_MAX_CHARS
        && text.chars().all(|c| GRAPHIC_MARKERS.contains(&c))
}
