//! Ready-made masks for common inputs.

mod number;

pub use number::{NumberMaskConfig, number_mask};
