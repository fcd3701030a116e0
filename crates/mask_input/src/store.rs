//! Central store for masked field state.
//!
//! The store owns the state each conform pass needs from the previous one
//! (the displayed value and its caret), so integration layers only forward
//! raw input events. It performs no layout or rendering.

use crate::event::{Admission, EventGate};
use crate::field::MaskedField;
use crate::id::InputId;
use crate::state::FieldState;
use crate::traits::{PipeContext, PipeOutcome};
use mask_core::{ConformRequest, byte_to_char_offset, char_len, char_to_byte_offset, conform};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Clone, Debug)]
struct Entry {
    field: MaskedField,
    state: FieldState,
    gate: EventGate,
}

/// Masked state for every registered field.
///
/// Carets at this layer are UTF-8 byte offsets into the field value, the
/// convention integration layers already use; the store converts them to
/// character offsets for the conform engine.
///
/// # Example
///
/// ```
/// use mask_core::{ConformOptions, MaskSpec};
/// use mask_input::{InputId, MaskedField, MaskedInputStore};
///
/// let mut store = MaskedInputStore::new();
/// let id = InputId::from_raw(1);
/// let phone = MaskSpec::pattern("(ddd) ddd-dddd").unwrap();
/// store.register(id, MaskedField::new(phone).options(ConformOptions::no_guide()));
///
/// store.update(id, "5551234", 7);
/// assert_eq!(store.value(id), Some("(555) 123-4"));
/// assert_eq!(store.caret(id), Some(11));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MaskedInputStore {
    fields: HashMap<InputId, Entry>,
}

impl MaskedInputStore {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Register (or re-register) a field with an empty value.
    ///
    /// With `show_mask` the field starts out displaying its template.
    pub fn register(&mut self, id: InputId, field: MaskedField) {
        let value = if field.show_mask {
            field.template()
        } else {
            String::new()
        };
        let gate = EventGate::new(field.event_policy);
        self.fields.insert(
            id,
            Entry {
                field,
                state: FieldState {
                    value,
                    ..FieldState::default()
                },
                gate,
            },
        );
    }

    /// Register a field and conform an initial value into it, caret at the end.
    pub fn register_with_value(
        &mut self,
        id: InputId,
        field: MaskedField,
        initial: &str,
    ) -> Option<&FieldState> {
        self.register(id, field);
        self.update(id, initial, initial.len())
    }

    /// Returns `true` if a field is registered under this id.
    pub fn has(&self, id: InputId) -> bool {
        self.fields.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run one conform pass for a raw field value and the caret the platform
    /// reported (byte offset into `raw`).
    ///
    /// Returns `None` for an unregistered id.
    pub fn update(&mut self, id: InputId, raw: &str, caret: usize) -> Option<&FieldState> {
        let entry = self.fields.get_mut(&id)?;
        apply(id, entry, raw, caret);
        Some(&entry.state)
    }

    /// Route a platform input event through the field's coalescing gate.
    ///
    /// On [`Admission::Apply`] the pass runs immediately. On
    /// [`Admission::ApplyAfterCaretSettles`] nothing changes yet: the caller
    /// re-reads the caret once the platform has moved it and calls
    /// [`update`](Self::update). [`Admission::Coalesce`] means the event was
    /// a duplicate and is dropped.
    pub fn handle_input_event(
        &mut self,
        id: InputId,
        raw: &str,
        caret: usize,
        now: Instant,
    ) -> Option<Admission> {
        let entry = self.fields.get_mut(&id)?;
        let admission = entry.gate.admit(now);
        match admission {
            Admission::Apply => apply(id, entry, raw, caret),
            Admission::ApplyAfterCaretSettles => {
                log::trace!(target: "mask.input", "input {id}: deferring pass until caret settles");
            }
            Admission::Coalesce => {
                log::trace!(target: "mask.input", "input {id}: coalesced duplicate event");
            }
        }
        Some(admission)
    }

    /// Returns the displayed value for this field, if registered.
    pub fn value(&self, id: InputId) -> Option<&str> {
        self.fields.get(&id).map(|e| e.state.value.as_str())
    }

    /// Returns the caret byte index for this field, if registered.
    pub fn caret(&self, id: InputId) -> Option<usize> {
        self.fields.get(&id).map(|e| e.state.caret)
    }

    pub fn state(&self, id: InputId) -> Option<&FieldState> {
        self.fields.get(&id).map(|e| &e.state)
    }

    pub fn field(&self, id: InputId) -> Option<&MaskedField> {
        self.fields.get(&id).map(|e| &e.field)
    }

    /// Monotonic revision counter for the field's value.
    ///
    /// Increments whenever a pass changes the displayed value.
    pub fn value_revision(&self, id: InputId) -> u64 {
        self.fields.get(&id).map(|e| e.state.value_rev).unwrap_or(0)
    }

    pub fn remove(&mut self, id: InputId) -> Option<MaskedField> {
        self.fields.remove(&id).map(|e| e.field)
    }

    /// Drop every field, e.g. on navigation.
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

fn apply(id: InputId, entry: &mut Entry, raw: &str, caret: usize) {
    let field = &entry.field;
    let options = field.options;
    let result = conform(
        &ConformRequest::new(raw, &field.mask)
            .previous(&entry.state.value)
            .caret(byte_to_char_offset(raw, caret))
            .options(options),
    );
    let mut value = result.conformed_value;
    let mut caret = result.caret_position;
    let rejected = result.meta.some_chars_rejected;

    if let Some(pipe) = &field.pipe {
        let ctx = PipeContext {
            raw_value: raw,
            previous_value: &entry.state.value,
            caret,
            placeholder_char: options.placeholder_char,
            guide: options.guide,
            consumed_raw_indexes: &result.meta.consumed_raw_indexes,
        };
        match pipe.pipe(&value, &ctx) {
            Ok(PipeOutcome::Keep) => {}
            Ok(PipeOutcome::Replace(piped)) => {
                caret = caret.min(char_len(&piped));
                value = piped;
            }
            Ok(PipeOutcome::ReplaceTracked {
                value: piped,
                piped_indexes,
            }) => {
                let inserted_before = piped_indexes.iter().filter(|&&i| i < caret).count();
                caret = (caret + inserted_before).min(char_len(&piped));
                value = piped;
            }
            Ok(PipeOutcome::Reject) => {
                log::trace!(
                    target: "mask.input",
                    "input {id}: pipe rejected {value:?}, keeping {:?}",
                    entry.state.value
                );
                entry.state.rejected = true;
                return;
            }
            Err(err) => {
                log::warn!(
                    target: "mask.input",
                    "input {id}: pipe failed ({err}), keeping conformed value"
                );
            }
        }
    }

    if value.is_empty() && field.show_mask {
        value = field.template();
        caret = 0;
    }

    log::trace!(
        target: "mask.input",
        "input {id}: {raw:?} -> {value:?} caret {caret} rejected={rejected}"
    );

    let state = &mut entry.state;
    if state.value != value {
        state.value_rev = state.value_rev.wrapping_add(1);
    }
    state.caret = char_to_byte_offset(&value, caret);
    state.value = value;
    state.rejected = rejected;
}
