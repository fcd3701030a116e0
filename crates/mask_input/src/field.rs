//! Per-field masking configuration.

use crate::event::EventPolicy;
use crate::traits::Pipe;
use mask_core::{ConformOptions, MaskSpec, placeholder_for};
use std::fmt;
use std::sync::Arc;

/// Everything the store needs to conform one field.
///
/// ```
/// use mask_core::{ConformOptions, MaskSpec};
/// use mask_input::MaskedField;
///
/// let field = MaskedField::new(MaskSpec::pattern("dd/dd/dddd").unwrap())
///     .options(ConformOptions::no_guide())
///     .show_mask(true);
/// assert!(field.show_mask);
/// assert!(field.pipe.is_none());
/// ```
#[derive(Clone)]
pub struct MaskedField {
    pub mask: MaskSpec,
    pub options: ConformOptions,
    pub pipe: Option<Arc<dyn Pipe>>,
    /// Display the placeholder template instead of an empty value.
    pub show_mask: bool,
    pub event_policy: EventPolicy,
}

impl MaskedField {
    pub fn new(mask: MaskSpec) -> Self {
        Self {
            mask,
            options: ConformOptions::default(),
            pipe: None,
            show_mask: false,
            event_policy: EventPolicy::Immediate,
        }
    }

    pub fn options(mut self, options: ConformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pipe(mut self, pipe: impl Pipe + 'static) -> Self {
        self.pipe = Some(Arc::new(pipe));
        self
    }

    pub fn show_mask(mut self, show_mask: bool) -> Self {
        self.show_mask = show_mask;
        self
    }

    pub fn event_policy(mut self, policy: EventPolicy) -> Self {
        self.event_policy = policy;
        self
    }

    /// The template shown for an empty field when `show_mask` is set.
    pub(crate) fn template(&self) -> String {
        placeholder_for(&self.mask.resolve(""), self.options.placeholder_char)
    }
}

impl fmt::Debug for MaskedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskedField")
            .field("mask", &self.mask)
            .field("options", &self.options)
            .field("pipe", &self.pipe.as_ref().map(|_| "<pipe>"))
            .field("show_mask", &self.show_mask)
            .field("event_policy", &self.event_policy)
            .finish()
    }
}
