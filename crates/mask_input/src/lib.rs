//! # mask_input
//!
//! UI-agnostic masked input state layer.
//!
//! This crate sits between a platform's input events and the conform engine
//! in `mask_core`:
//! - [`InputId`]: a generic, opaque identifier for masked fields
//! - [`MaskedInputStore`]: per-field value, caret and previous-pass state
//! - [`Pipe`]: post-processing hook run after each conform pass, with
//!   [`AutoCorrectedDatePipe`] as a ready-made implementation
//! - [`EventGate`]: coalescing for platforms that fire duplicate input events
//!
//! ## Design Principles
//!
//! This crate does not depend on any graphics framework, DOM or event loop.
//! Integration layers read the raw value and caret from their widget, call
//! [`MaskedInputStore::update`], and write the resulting value and caret
//! back. Carets cross this boundary as UTF-8 byte offsets.
//!
//! ## Integration
//!
//! Convert your own element ids with the `From` implementations on
//! [`InputId`]:
//! ```ignore
//! impl From<dom::NodeId> for InputId {
//!     fn from(id: dom::NodeId) -> Self {
//!         InputId::from_raw(id.0 as u64)
//!     }
//! }
//! ```

mod date_pipe;
mod event;
mod field;
mod id;
mod state;
mod store;
mod traits;

pub use date_pipe::AutoCorrectedDatePipe;
pub use event::{Admission, EventGate, EventPolicy, InputKind, OLD_ANDROID_THROTTLE, Platform};
pub use field::MaskedField;
pub use id::InputId;
pub use state::FieldState;
pub use store::MaskedInputStore;
pub use traits::{Pipe, PipeContext, PipeError, PipeOutcome};
