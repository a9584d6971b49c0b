//! Table reconstruction.
//!
//! A table control is followed by a TABLE record declaring the grid, then one
//! LIST_HEADER per cell in row-major order, each followed by the cell's
//! paragraphs. Files missing the TABLE record get an approximate grid built
//! from the LIST_HEADER run.

use crate::model::{Paragraph, Table, TableCell, TableLayout};

use super::binary::read_u16;
use super::context::{NoteKind, ParseContext};
use super::note::collect_note;
use super::paragraph::collect_paragraph;
use super::record::{body_tag, ctrl_id, Record};

/// Minimum TABLE payload holding the row and column counts.
const TABLE_GRID_MIN: usize = 8;

/// Largest declared grid taken at face value; bigger grids are corrupt.
const MAX_GRID_CELLS: usize = 1 << 20;

/// Minimum LIST_HEADER payload holding cell spans.
const CELL_SPAN_MIN: usize = 16;

/// Decode the grid size from a TABLE payload.
fn table_grid(payload: &[u8]) -> Option<(usize, usize)> {
    if payload.len() < TABLE_GRID_MIN {
        return None;
    }
    let rows = read_u16(payload, 4)? as usize;
    let cols = read_u16(payload, 6)? as usize;
    if rows * cols > MAX_GRID_CELLS {
        log::warn!("table declares a {}x{} grid, ignoring it", rows, cols);
        return None;
    }
    Some((rows, cols))
}

/// Open a cell from its LIST_HEADER; spans of 0 or absent become 1.
fn open_cell(list_header: &[u8]) -> TableCell {
    let cell = TableCell::empty();
    if list_header.len() < CELL_SPAN_MIN {
        return cell;
    }
    cell.colspan(read_u16(list_header, 12).unwrap_or(1))
        .rowspan(read_u16(list_header, 14).unwrap_or(1))
}

/// Rebuild the table whose `tbl ` control is at `index`.
///
/// Returns the table (if one could be built) and the number of records
/// consumed, which is at least 1 whenever `index` is in range.
pub fn reconstruct_table(records: &[Record<'_>], index: usize, ctx: &mut ParseContext) -> (Option<Table>, usize) {
    let Some(anchor) = records.get(index) else {
        return (None, 0);
    };
    let base_level = anchor.level;

    let grid = records
        .get(index + 1)
        .filter(|r| r.is(body_tag::TABLE))
        .and_then(|r| table_grid(r.payload));

    let Some((rows, cols)) = grid else {
        if ctx.recover_approximate_tables {
            log::debug!("table at record {} has no grid, approximating", index);
            let (table, consumed) = approximate_table(records, index + 1, base_level, ctx);
            return (table, consumed + 1);
        }
        log::debug!("table at record {} has no grid, skipping", index);
        return (None, 1);
    };

    let capacity = rows * cols;
    let mut cells: Vec<TableCell> = Vec::with_capacity(capacity.min(records.len()));
    let mut open: Option<TableCell> = None;
    let mut opened = 0usize;
    let mut surplus = 0usize;

    let mut i = index + 2;
    while let Some(record) = records.get(i).filter(|r| r.level > base_level) {
        match record.tag {
            body_tag::LIST_HEADER => {
                cells.extend(open.take());
                if opened < capacity {
                    open = Some(open_cell(record.payload));
                    opened += 1;
                } else {
                    surplus += 1;
                }
                i += 1;
            }
            body_tag::PARA_HEADER => {
                let collected = collect_paragraph(records, i, ctx);
                if let (Some(cell), Some(paragraph)) = (open.as_mut(), collected.paragraph) {
                    cell.paragraphs.push(paragraph);
                }
                i = collected.next;
            }
            body_tag::CTRL_HEADER => {
                let (paragraphs, consumed) = nested_control(records, i, ctx);
                if let Some(cell) = open.as_mut() {
                    cell.paragraphs.extend(paragraphs);
                }
                i += consumed;
            }
            _ => i += 1,
        }
    }
    cells.extend(open.take());

    if surplus > 0 {
        log::debug!("table at record {} has {} cells beyond its {}x{} grid", index, surplus, rows, cols);
    }

    let mut table = Table::grid(rows, cols, TableLayout::Declared);
    table.fill_row_major(cells);
    log::debug!("table {}x{} ({} cells declared)", rows, cols, opened);
    (Some(table), i - index)
}

/// Handle a control nested inside a cell.
///
/// Nested tables are flattened into their paragraphs. Notes are stored as
/// usual. Any other control consumes only itself.
fn nested_control(records: &[Record<'_>], index: usize, ctx: &mut ParseContext) -> (Vec<Paragraph>, usize) {
    match records[index].ctrl_id() {
        Some(ctrl_id::TABLE) => {
            let (table, consumed) = reconstruct_table(records, index, ctx);
            let paragraphs = table
                .into_iter()
                .flat_map(|t| t.rows)
                .flat_map(|row| row.cells)
                .flat_map(|cell| cell.paragraphs)
                .collect();
            (paragraphs, consumed.max(1))
        }
        Some(ctrl_id::FOOTNOTE) => (Vec::new(), collect_note(records, index, NoteKind::Footnote, ctx)),
        Some(ctrl_id::ENDNOTE) => (Vec::new(), collect_note(records, index, NoteKind::Endnote, ctx)),
        _ => (Vec::new(), 1),
    }
}

/// Column count guessed from the number of cells.
pub fn approximate_columns(cell_count: usize) -> usize {
    match cell_count {
        0..=2 => 1,
        3..=6 => 2,
        _ => 3,
    }
}

/// Build an approximate table from the LIST_HEADER run starting at `start`.
///
/// The walk stops at the first record no deeper than `owner_level` or at the
/// next CTRL_HEADER. Returns the table (`None` without cells) and the number
/// of records walked.
pub fn approximate_table(
    records: &[Record<'_>],
    start: usize,
    owner_level: u16,
    ctx: &ParseContext,
) -> (Option<Table>, usize) {
    let mut cells: Vec<TableCell> = Vec::new();
    let mut open: Option<TableCell> = None;

    let mut i = start;
    while let Some(record) = records
        .get(i)
        .filter(|r| r.level > owner_level && !r.is(body_tag::CTRL_HEADER))
    {
        match record.tag {
            body_tag::LIST_HEADER => {
                cells.extend(open.take());
                open = Some(open_cell(record.payload));
                i += 1;
            }
            body_tag::PARA_HEADER => {
                let collected = collect_paragraph(records, i, ctx);
                if let (Some(cell), Some(paragraph)) = (open.as_mut(), collected.paragraph) {
                    cell.paragraphs.push(paragraph);
                }
                i = collected.next;
            }
            _ => i += 1,
        }
    }
    cells.extend(open.take());

    if cells.is_empty() {
        return (None, i - start);
    }

    let cols = approximate_columns(cells.len());
    let rows = cells.len().div_ceil(cols);
    let mut table = Table::grid(rows, cols, TableLayout::Approximate);
    table.fill_row_major(cells);
    log::debug!("approximate table {}x{}", rows, cols);
    (Some(table), i - start)
}
