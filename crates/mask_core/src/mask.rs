//! Mask specifications and the per-pass resolver.

use crate::pattern::{PatternError, parse_pattern};
use crate::slot::MaskSlot;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Why a mask could not be used for a conform pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskError {
    /// The mask has no slots.
    Empty,
    /// A literal slot uses the placeholder character, which would make
    /// guide output ambiguous.
    PlaceholderCollision { position: usize, placeholder_char: char },
    /// A dynamic mask generator gave up on this raw value.
    Generator(String),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Empty => write!(f, "mask has no slots"),
            MaskError::PlaceholderCollision {
                position,
                placeholder_char,
            } => write!(
                f,
                "literal at slot {position} collides with placeholder char {placeholder_char:?}"
            ),
            MaskError::Generator(msg) => write!(f, "mask generator failed: {msg}"),
        }
    }
}

impl std::error::Error for MaskError {}

/// Generator for masks whose shape depends on what has been typed.
///
/// Must be deterministic for a given raw value and must not block.
pub type MaskFn = dyn Fn(&str) -> Result<Vec<MaskSlot>, MaskError> + Send + Sync;

/// A mask: either a fixed slot sequence or a generator evaluated per pass.
#[derive(Clone)]
pub enum MaskSpec {
    Fixed(Vec<MaskSlot>),
    Dynamic(Arc<MaskFn>),
}

impl MaskSpec {
    pub fn fixed(slots: Vec<MaskSlot>) -> Self {
        MaskSpec::Fixed(slots)
    }

    /// Build a fixed mask from pattern syntax (see [`crate::pattern`]).
    pub fn pattern(pattern: &str) -> Result<Self, PatternError> {
        parse_pattern(pattern).map(MaskSpec::Fixed)
    }

    pub fn dynamic<F>(generator: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<MaskSlot>, MaskError> + Send + Sync + 'static,
    {
        MaskSpec::Dynamic(Arc::new(generator))
    }

    /// Resolve the slot sequence to use for `raw`.
    ///
    /// Fixed masks are returned as-is. A dynamic mask that fails or
    /// produces no slots resolves to an empty sequence, which the conform
    /// engine treats as "no constraint".
    pub fn resolve(&self, raw: &str) -> Cow<'_, [MaskSlot]> {
        match self {
            MaskSpec::Fixed(slots) => Cow::Borrowed(slots.as_slice()),
            MaskSpec::Dynamic(generator) => match generator(raw) {
                Ok(slots) if !slots.is_empty() => {
                    log::trace!(
                        target: "mask.resolve",
                        "dynamic mask: {} slots for {} chars",
                        slots.len(),
                        raw.chars().count()
                    );
                    Cow::Owned(slots)
                }
                Ok(_) => {
                    log::warn!(target: "mask.resolve", "{}; passing input through", MaskError::Empty);
                    Cow::Owned(Vec::new())
                }
                Err(err) => {
                    log::warn!(target: "mask.resolve", "{err}; passing input through");
                    Cow::Owned(Vec::new())
                }
            },
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, MaskSpec::Dynamic(_))
    }
}

impl fmt::Debug for MaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskSpec::Fixed(slots) => f.debug_tuple("Fixed").field(slots).finish(),
            MaskSpec::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl From<Vec<MaskSlot>> for MaskSpec {
    fn from(slots: Vec<MaskSlot>) -> Self {
        MaskSpec::Fixed(slots)
    }
}

/// Free-function form of [`MaskSpec::resolve`].
#[inline]
pub fn resolve<'a>(raw: &str, spec: &'a MaskSpec) -> Cow<'a, [MaskSlot]> {
    spec.resolve(raw)
}

/// Check a resolved mask against the placeholder character.
pub(crate) fn validate(slots: &[MaskSlot], placeholder_char: char) -> Result<(), MaskError> {
    if slots.is_empty() {
        return Err(MaskError::Empty);
    }
    match slots
        .iter()
        .position(|slot| slot.as_literal() == Some(placeholder_char))
    {
        Some(position) => Err(MaskError::PlaceholderCollision {
            position,
            placeholder_char,
        }),
        None => Ok(()),
    }
}
