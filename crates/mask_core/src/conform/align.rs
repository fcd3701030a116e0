//! Slot-by-slot alignment of the token stream against a resolved mask.

use super::tokens::{Origin, Token};
use crate::slot::MaskSlot;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellKind {
    /// A literal slot; `token` is set when a raw character was consumed by it.
    Literal,
    /// A placeholder filled by a raw character.
    Filled,
    /// A placeholder shown as the placeholder character.
    Blank,
}

/// One output position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub ch: char,
    pub kind: CellKind,
    pub token: Option<Token>,
}

impl Cell {
    /// Cells that pin the end of the value when the guide is off.
    pub fn is_user_content(&self) -> bool {
        match self.kind {
            CellKind::Filled => true,
            CellKind::Literal => self.token.is_some_and(|t| t.is_new()),
            CellKind::Blank => false,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Alignment {
    pub cells: Vec<Cell>,
    /// Index of the first slot the token stream never reached.
    pub stopped_at: usize,
    pub some_chars_rejected: bool,
}

pub(crate) fn align(
    slots: &[MaskSlot],
    tokens: Vec<Token>,
    keep_char_positions: bool,
    placeholder_char: char,
) -> Alignment {
    let mut queue: VecDeque<Token> = tokens.into();
    let mut out = Alignment {
        cells: Vec::with_capacity(slots.len()),
        stopped_at: slots.len(),
        some_chars_rejected: false,
    };

    'slots: for (slot_index, slot) in slots.iter().enumerate() {
        if queue.is_empty() {
            out.stopped_at = slot_index;
            break;
        }
        match slot {
            MaskSlot::Literal(lit) => {
                if keep_char_positions {
                    let typed = typed_over_literal(&queue, *lit);
                    if typed > 0 {
                        queue.drain(..typed);
                        out.some_chars_rejected = true;
                    }
                }
                let consumes = queue
                    .front()
                    .is_some_and(|t| !t.blank && t.origin != Origin::Compensation && t.ch == *lit);
                let token = if consumes { queue.pop_front() } else { None };
                out.cells.push(Cell {
                    ch: *lit,
                    kind: CellKind::Literal,
                    token,
                });
            }
            MaskSlot::Placeholder { .. } => {
                while let Some(token) = queue.pop_front() {
                    if token.blank {
                        out.cells.push(Cell {
                            ch: placeholder_char,
                            kind: CellKind::Blank,
                            token: Some(token),
                        });
                        continue 'slots;
                    }
                    if token.origin == Origin::CarriedLiteral {
                        // Separators are regenerated by the literal slots of
                        // this pass. One the mask no longer produces (a
                        // dynamic mask changed shape) is content if the slot
                        // takes it.
                        let regenerated = slots.iter().any(|s| s.as_literal() == Some(token.ch));
                        if regenerated || slot.accept(token.ch).is_none() {
                            continue;
                        }
                    }
                    let Some(ch) = slot.accept(token.ch) else {
                        out.some_chars_rejected = true;
                        continue;
                    };
                    if keep_char_positions && token.is_new() && !claim_blank(&mut queue) {
                        // Would push a carried character into another slot.
                        out.some_chars_rejected = true;
                        continue;
                    }
                    out.cells.push(Cell {
                        ch,
                        kind: CellKind::Filled,
                        token: Some(token),
                    });
                    continue 'slots;
                }
                out.stopped_at = slot_index;
                break;
            }
        }
    }

    if queue
        .iter()
        .any(|t| !t.blank && t.origin != Origin::CarriedLiteral)
    {
        // Ran out of slots with real characters left over.
        out.some_chars_rejected = true;
    }
    out
}

/// Length of the typed run at the front of `queue` that sits in front of
/// `lit` while the separator itself is still carried over. Zero when
/// there is no such run.
fn typed_over_literal(queue: &VecDeque<Token>, lit: char) -> usize {
    let run = queue
        .iter()
        .take_while(|t| t.is_new() && !t.blank && t.ch != lit)
        .count();
    match queue.get(run) {
        Some(t) if run > 0 && t.origin == Origin::CarriedLiteral && t.ch == lit => run,
        _ => 0,
    }
}

/// Remove the blank a newly typed character displaces.
///
/// Scans forward across the typed run; fails if a carried character comes
/// first. Reaching the end of the stream means nothing can shift, which
/// counts as success.
fn claim_blank(queue: &mut VecDeque<Token>) -> bool {
    for i in 0..queue.len() {
        let token = queue[i];
        if token.blank {
            queue.remove(i);
            return true;
        }
        match token.origin {
            Origin::New | Origin::CarriedLiteral => continue,
            Origin::Carried | Origin::Compensation => return false,
        }
    }
    true
}
