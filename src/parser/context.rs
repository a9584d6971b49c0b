//! Per-document decode state.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::Note;

use super::style::StyleTables;

/// Kind of a note control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Footnote,
    Endnote,
}

impl NoteKind {
    fn prefix(&self) -> &'static str {
        match self {
            NoteKind::Footnote => "fn",
            NoteKind::Endnote => "en",
        }
    }
}

/// State shared by every reconstructor while one document is decoded.
///
/// Created fresh for each document; nothing here outlives the parse.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Style tables from DocInfo
    pub styles: StyleTables,
    /// Body text size that heading ratios are measured against
    pub base_font_size: f32,
    /// Rebuild tables without a declared grid
    pub recover_approximate_tables: bool,
    /// Keys of extracted images
    available_images: BTreeSet<String>,
    /// Keys of images anchored somewhere in the body
    referenced_images: BTreeSet<String>,
    footnote_count: u32,
    endnote_count: u32,
    footnotes: BTreeMap<String, Note>,
    endnotes: BTreeMap<String, Note>,
}

impl ParseContext {
    /// Create a context around loaded style tables.
    pub fn new(styles: StyleTables) -> Self {
        let base_font_size = styles.base_font_size();
        Self {
            styles,
            base_font_size,
            recover_approximate_tables: true,
            ..Default::default()
        }
    }

    /// Register the keys of extracted images.
    pub fn with_images<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_images.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Set whether approximate tables are recovered.
    pub fn with_table_recovery(mut self, recover: bool) -> Self {
        self.recover_approximate_tables = recover;
        self
    }

    /// Resolve a BinData reference and mark it as anchored.
    pub fn resolve_image(&mut self, bin_id: u16) -> Option<String> {
        let key = asset_key(bin_id);
        if self.available_images.contains(&key) {
            self.referenced_images.insert(key.clone());
            Some(key)
        } else {
            log::debug!("picture references missing asset {}", key);
            None
        }
    }

    /// Extracted images never anchored in the body, in ascending key order.
    pub fn unreferenced_images(&self) -> impl Iterator<Item = &str> {
        self.available_images
            .difference(&self.referenced_images)
            .map(String::as_str)
    }

    /// Allocate the next note id of a kind.
    pub fn next_note(&mut self, kind: NoteKind) -> Note {
        let counter = match kind {
            NoteKind::Footnote => &mut self.footnote_count,
            NoteKind::Endnote => &mut self.endnote_count,
        };
        *counter += 1;
        Note::new(format!("{}{}", kind.prefix(), counter), *counter)
    }

    /// Store a finished note.
    pub fn add_note(&mut self, kind: NoteKind, note: Note) {
        let notes = match kind {
            NoteKind::Footnote => &mut self.footnotes,
            NoteKind::Endnote => &mut self.endnotes,
        };
        notes.insert(note.id.clone(), note);
    }

    /// Hand the collected notes to the document.
    pub fn take_notes(&mut self) -> (BTreeMap<String, Note>, BTreeMap<String, Note>) {
        (
            std::mem::take(&mut self.footnotes),
            std::mem::take(&mut self.endnotes),
        )
    }
}

/// Asset key for a BinData id.
pub fn asset_key(bin_id: u16) -> String {
    format!("BIN{:04X}", bin_id)
}
