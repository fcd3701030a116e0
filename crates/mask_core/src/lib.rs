//! # mask_core
//!
//! Mask resolution and the caret-stable conform engine for masked text
//! inputs (phone numbers, dates, currency amounts).
//!
//! - [`MaskSpec`]: a fixed slot sequence or a generator re-evaluated on
//!   every pass, resolved with [`MaskSpec::resolve`].
//! - [`conform`]: one stateless pass over the whole field value, producing
//!   the conformed value and a caret that stays where the typist expects.
//! - [`placeholder_for`] and [`obscure`]: display helpers for guide
//!   templates and hidden digits.
//! - [`presets`]: ready-made dynamic masks.
//!
//! All offsets in this crate are character offsets. Integration layers
//! that track UTF-8 byte offsets convert with [`byte_to_char_offset`] and
//! [`char_to_byte_offset`].
//!
//! ```
//! use mask_core::{ConformOptions, ConformRequest, MaskSpec, conform};
//!
//! let phone = MaskSpec::pattern("(ddd) ddd-dddd").unwrap();
//! let result = conform(
//!     &ConformRequest::new("5551234567", &phone).options(ConformOptions::no_guide()),
//! );
//! assert_eq!(result.conformed_value, "(555) 123-4567");
//! assert_eq!(result.caret_position, 14);
//! ```

pub mod conform;
pub mod display;
pub mod edit;
pub mod mask;
pub mod pattern;
pub mod presets;
pub mod slot;

mod text;

pub use conform::{
    ConformMeta, ConformOptions, ConformRequest, ConformResult, DEFAULT_PLACEHOLDER_CHAR, conform,
    conform_to_mask,
};
pub use display::{obscure, placeholder_for};
pub use edit::{EditRegion, locate_edit};
pub use mask::{MaskError, MaskFn, MaskSpec, resolve};
pub use pattern::{PatternError, parse_pattern};
pub use presets::{NumberMaskConfig, number_mask};
pub use slot::{CharClass, MaskSlot, Transform};

pub use text::{byte_to_char_offset, char_len, char_to_byte_offset, clamp_to_char_boundary};
