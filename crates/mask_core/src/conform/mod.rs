//! The conform engine.
//!
//! One call conforms the whole field value. The caller threads the previous
//! conformed value and the caret between calls; the engine itself keeps no
//! state.
//!
//! A pass runs in four steps:
//!
//! 1. [`locate_edit`] finds the region the keystroke touched, using the
//!    caret to disambiguate repeated characters.
//! 2. The raw value becomes a token stream. Characters outside the edit
//!    remember whether the previous pass produced them from a literal slot;
//!    those separators are regenerated rather than re-fitted.
//! 3. Tokens are aligned against the resolved slots: literals are consumed
//!    when typed and auto-inserted otherwise, placeholders take the next
//!    token their class accepts and reject the rest.
//! 4. The output is either completed with the guide template or cut after
//!    the last slot the user filled, and the caret is placed.
//!
//! The pass is total: any input, including a broken mask or an out-of-range
//! caret, produces a result.

mod align;
mod caret;
mod tokens;

use crate::edit::locate_edit;
use crate::mask::{MaskSpec, validate};
use crate::slot::MaskSlot;
use align::{Cell, CellKind, align};
use caret::place_caret;
use std::borrow::Cow;
use tokens::{Origin, build_tokens};

/// The placeholder character used when none is configured.
pub const DEFAULT_PLACEHOLDER_CHAR: char = '_';

/// Per-field conform behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConformOptions {
    /// Render unfilled slots after the typed content.
    pub guide: bool,
    /// Character that stands for an unfilled placeholder slot.
    ///
    /// With the guide on (or `keep_char_positions`), this character in the
    /// raw value always reads as an unfilled slot, even where the slot's
    /// class would accept it. Pick one the mask never has to store.
    pub placeholder_char: char,
    /// Keep already-typed characters in their slots when editing in the
    /// middle instead of reflowing them. A character typed in front of a
    /// separator that is still shown is rejected.
    pub keep_char_positions: bool,
}

impl Default for ConformOptions {
    fn default() -> Self {
        Self {
            guide: true,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            keep_char_positions: false,
        }
    }
}

impl ConformOptions {
    /// Options without the guide template.
    pub fn no_guide() -> Self {
        Self {
            guide: false,
            ..Self::default()
        }
    }

    pub fn with_placeholder_char(mut self, placeholder_char: char) -> Self {
        self.placeholder_char = placeholder_char;
        self
    }

    pub fn keeping_char_positions(mut self) -> Self {
        self.keep_char_positions = true;
        self
    }
}

/// Input of one conform pass. Caret offsets are in characters.
#[derive(Clone, Debug)]
pub struct ConformRequest<'a> {
    pub raw_value: &'a str,
    pub previous_conformed_value: &'a str,
    pub current_caret_position: usize,
    pub mask: &'a MaskSpec,
    pub options: ConformOptions,
}

impl<'a> ConformRequest<'a> {
    /// A request with no history, the caret at the end and default options.
    pub fn new(raw_value: &'a str, mask: &'a MaskSpec) -> Self {
        Self {
            raw_value,
            previous_conformed_value: "",
            current_caret_position: raw_value.chars().count(),
            mask,
            options: ConformOptions::default(),
        }
    }

    pub fn previous(mut self, previous_conformed_value: &'a str) -> Self {
        self.previous_conformed_value = previous_conformed_value;
        self
    }

    pub fn caret(mut self, current_caret_position: usize) -> Self {
        self.current_caret_position = current_caret_position;
        self
    }

    pub fn options(mut self, options: ConformOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConformMeta {
    /// At least one raw character was dropped (class mismatch, no room, or
    /// a keep-positions conflict).
    pub some_chars_rejected: bool,
    /// Raw character offsets that ended up in the conformed value, ascending.
    pub consumed_raw_indexes: Vec<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConformResult {
    pub conformed_value: String,
    /// Caret in characters, `<= conformed_value.chars().count()`.
    pub caret_position: usize,
    pub meta: ConformMeta,
}

impl ConformResult {
    fn passthrough(raw: &str, caret: usize) -> Self {
        let len = raw.chars().count();
        Self {
            conformed_value: raw.to_string(),
            caret_position: caret.min(len),
            meta: ConformMeta {
                some_chars_rejected: false,
                consumed_raw_indexes: (0..len).collect(),
            },
        }
    }
}

/// Run one conform pass.
pub fn conform(request: &ConformRequest<'_>) -> ConformResult {
    let options = &request.options;
    let raw: Vec<char> = request.raw_value.chars().collect();
    if raw.is_empty() {
        return ConformResult::default();
    }
    let raw_caret = request.current_caret_position.min(raw.len());

    let slots = request.mask.resolve(request.raw_value);
    if let Err(err) = validate(&slots, options.placeholder_char) {
        log::warn!(target: "mask.conform", "{err}; passing input through");
        return ConformResult::passthrough(request.raw_value, raw_caret);
    }

    let previous: Vec<char> = request.previous_conformed_value.chars().collect();
    let previous_slots: Cow<'_, [MaskSlot]> = if previous.is_empty() {
        Cow::Borrowed(&[])
    } else {
        request.mask.resolve(request.previous_conformed_value)
    };

    let region = locate_edit(&previous, &raw, raw_caret);
    let tokens = build_tokens(&raw, &previous, &previous_slots, &region, options);
    let alignment = align(
        &slots,
        tokens,
        options.keep_char_positions,
        options.placeholder_char,
    );
    let some_chars_rejected = alignment.some_chars_rejected;
    let mut cells = alignment.cells;

    // Without the guide, a separator only ends the previous value if the
    // user typed it there. Carried over in place, it still ends this one.
    let typed_tail = if options.guide {
        None
    } else {
        previous.len().checked_sub(1)
    };
    let pins_end = |cell: &Cell| {
        cell.is_user_content()
            || (cell.kind == CellKind::Literal
                && cell.token.is_some_and(|t| {
                    t.origin == Origin::CarriedLiteral
                        && typed_tail.is_some()
                        && region.previous_index(t.raw_index) == typed_tail
                }))
    };

    // Nothing the user typed survived: leave the field empty rather than
    // showing bare separators or an untouched template.
    let Some(last_content) = cells.iter().rposition(pins_end) else {
        log::trace!(target: "mask.conform", "no content survived; rejected={some_chars_rejected}");
        return ConformResult {
            meta: ConformMeta {
                some_chars_rejected,
                consumed_raw_indexes: Vec::new(),
            },
            ..ConformResult::default()
        };
    };

    if options.guide {
        cells.extend(slots[alignment.stopped_at..].iter().map(|slot| match slot {
            MaskSlot::Literal(ch) => Cell {
                ch: *ch,
                kind: CellKind::Literal,
                token: None,
            },
            MaskSlot::Placeholder { .. } => Cell {
                ch: options.placeholder_char,
                kind: CellKind::Blank,
                token: None,
            },
        }));
    } else {
        cells.truncate(last_content + 1);
    }

    let caret_position = place_caret(&cells, &region, raw_caret, &previous, &previous_slots);
    let conformed_value: String = cells.iter().map(|cell| cell.ch).collect();
    let consumed_raw_indexes = cells
        .iter()
        .filter(|cell| cell.kind != CellKind::Blank)
        .filter_map(|cell| cell.token)
        .filter(|token| token.origin != Origin::Compensation)
        .map(|token| token.raw_index)
        .collect();

    log::trace!(
        target: "mask.conform",
        "{:?} -> {:?} caret {} -> {} (edit {:?}, rejected={})",
        request.raw_value,
        conformed_value,
        raw_caret,
        caret_position,
        region,
        some_chars_rejected
    );

    ConformResult {
        conformed_value,
        caret_position,
        meta: ConformMeta {
            some_chars_rejected,
            consumed_raw_indexes,
        },
    }
}

/// Conform a value with no editing history, caret at the end.
pub fn conform_to_mask(raw_value: &str, mask: &MaskSpec, options: ConformOptions) -> ConformResult {
    conform(&ConformRequest::new(raw_value, mask).options(options))
}
