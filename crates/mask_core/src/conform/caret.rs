//! Caret placement after a conform pass.
//!
//! The caret follows the raw character that sat immediately before it: it
//! lands right after the output cell that character ended up in. Two
//! adjustments keep typing fluid:
//!
//! - after a freshly typed character, the caret steps over the literal
//!   cells that follow it, so a separator inserted by the mask does not
//!   sit in front of the next keystroke;
//! - when an edit only removed literal characters (backspace over a
//!   separator), the caret retreats to the last filled placeholder before
//!   it. The separator is regenerated anyway, and the next backspace then
//!   deletes real content instead of the same separator again.

use super::align::{Cell, CellKind};
use crate::edit::EditRegion;
use crate::slot::MaskSlot;

pub(crate) fn place_caret(
    cells: &[Cell],
    region: &EditRegion,
    raw_caret: usize,
    previous: &[char],
    previous_slots: &[MaskSlot],
) -> usize {
    let before_caret = |cell: &Cell| cell.token.is_some_and(|t| t.raw_index < raw_caret);

    let anchor = if removed_only_literals(region, previous, previous_slots) {
        cells
            .iter()
            .rposition(|cell| cell.kind == CellKind::Filled && before_caret(cell))
    } else {
        cells.iter().rposition(before_caret)
    };

    let Some(anchor) = anchor else {
        return 0;
    };
    let mut caret = anchor + 1;
    if cells[anchor].token.is_some_and(|t| t.is_new()) {
        while caret < cells.len() && cells[caret].kind == CellKind::Literal {
            caret += 1;
        }
    }
    caret.min(cells.len())
}

fn removed_only_literals(region: &EditRegion, previous: &[char], previous_slots: &[MaskSlot]) -> bool {
    region.inserted_len() == 0
        && region.removed_len() > 0
        && (region.start..region.removed_end).all(|j| {
            let literal = previous_slots.get(j).and_then(MaskSlot::as_literal);
            literal.is_some() && literal == previous.get(j).copied()
        })
}
