//! Display-only renderings of a mask or a conformed value.

use crate::slot::MaskSlot;

/// Render the guide template for `slots`: literals as-is, placeholders as
/// `placeholder_char`.
pub fn placeholder_for(slots: &[MaskSlot], placeholder_char: char) -> String {
    slots
        .iter()
        .map(|slot| slot.as_literal().unwrap_or(placeholder_char))
        .collect()
}

/// Hide the characters the user typed into placeholder slots.
///
/// Every filled placeholder except the last `reveal_last` ones is replaced
/// by `mask_char`. Literals, guide placeholders and characters past the end
/// of the mask stay visible. The result is for display only; callers keep
/// threading the real conformed value into the next pass.
pub fn obscure(
    conformed: &str,
    slots: &[MaskSlot],
    placeholder_char: char,
    mask_char: char,
    reveal_last: usize,
) -> String {
    let filled: Vec<bool> = conformed
        .chars()
        .enumerate()
        .map(|(i, ch)| ch != placeholder_char && slots.get(i).is_some_and(MaskSlot::is_placeholder))
        .collect();
    let hidden = filled
        .iter()
        .filter(|&&f| f)
        .count()
        .saturating_sub(reveal_last);

    let mut seen = 0;
    conformed
        .chars()
        .zip(filled)
        .map(|(ch, is_filled)| {
            if !is_filled {
                return ch;
            }
            seen += 1;
            if seen <= hidden { mask_char } else { ch }
        })
        .collect()
}
