//! Per-field masked state.

/// What a field shows after its latest conform pass.
///
/// Managed by [`MaskedInputStore`](crate::MaskedInputStore); read-only for
/// integration layers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    /// The value to display (conformed, piped, or the template).
    pub(crate) value: String,

    /// Caret position as a byte index into `value` (always on a UTF-8 char boundary).
    pub(crate) caret: usize,

    /// Monotonic revision counter, incremented whenever `value` changes.
    pub(crate) value_rev: u64,

    /// Whether the latest pass dropped typed characters or was rejected by a pipe.
    pub(crate) rejected: bool,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn value_revision(&self) -> u64 {
        self.value_rev
    }

    pub fn some_chars_rejected(&self) -> bool {
        self.rejected
    }
}
