//! Picture anchor resolution.

use super::binary::read_u16;
use super::record::{body_tag, subtree_end, Record};

/// Offset of the BinData id inside SHAPE_COMPONENT_PICTURE.
const BIN_ITEM_ID_OFFSET: usize = 74;

/// Find the BinData id referenced under the picture anchor at `index`.
///
/// Returns the id and the number of records consumed. On a hit the whole
/// anchor subtree is consumed. On a miss only the anchor itself is, so text
/// boxes inside a drawing object are still decoded as paragraphs.
pub fn locate_picture(records: &[Record<'_>], index: usize) -> (Option<u16>, usize) {
    let Some(anchor) = records.get(index) else {
        return (None, 0);
    };

    let found = records[index + 1..]
        .iter()
        .take_while(|r| r.level > anchor.level)
        .filter(|r| r.is(body_tag::SHAPE_COMPONENT_PICTURE))
        .find_map(|r| read_u16(r.payload, BIN_ITEM_ID_OFFSET));

    match found {
        Some(id) => (Some(id), subtree_end(records, index) - index),
        None => (None, 1),
    }
}
