//! UTF-8 offset utilities.
//!
//! The conform engine works in character offsets (one offset per Unicode
//! scalar value) so that a mask slot always lines up with exactly one
//! character. Integration layers usually track carets as byte offsets into
//! a UTF-8 `String`; these helpers translate between the two.

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// If `index` is beyond the string length, it is clamped to `s.len()`.
/// If `index` falls in the middle of a multi-byte character, it is
/// adjusted backwards to the start of that character.
///
/// # Examples
///
/// ```
/// use mask_core::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 0), 0);
/// assert_eq!(clamp_to_char_boundary(s, 2), 1); // mid '€' -> start of '€'
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5); // beyond end -> len
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Convert a byte offset into a character offset.
///
/// The byte offset is clamped to a character boundary first, so any input
/// produces a valid character offset `<= s.chars().count()`.
///
/// # Examples
///
/// ```
/// use mask_core::byte_to_char_offset;
///
/// let s = "a€b";
/// assert_eq!(byte_to_char_offset(s, 0), 0);
/// assert_eq!(byte_to_char_offset(s, 1), 1);
/// assert_eq!(byte_to_char_offset(s, 4), 2);
/// assert_eq!(byte_to_char_offset(s, 5), 3);
/// assert_eq!(byte_to_char_offset(s, 3), 1); // mid '€'
/// ```
pub fn byte_to_char_offset(s: &str, byte: usize) -> usize {
    let byte = clamp_to_char_boundary(s, byte);
    s[..byte].chars().count()
}

/// Convert a character offset into a byte offset.
///
/// Offsets past the end map to `s.len()`.
///
/// # Examples
///
/// ```
/// use mask_core::char_to_byte_offset;
///
/// let s = "a€b";
/// assert_eq!(char_to_byte_offset(s, 0), 0);
/// assert_eq!(char_to_byte_offset(s, 2), 4);
/// assert_eq!(char_to_byte_offset(s, 3), 5);
/// assert_eq!(char_to_byte_offset(s, 9), 5);
/// ```
pub fn char_to_byte_offset(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
