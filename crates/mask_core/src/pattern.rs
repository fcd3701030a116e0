//! Compact pattern syntax for fixed masks.
//!
//! | token | slot                               |
//! |-------|------------------------------------|
//! | `d`   | digit                              |
//! | `a`   | letter                             |
//! | `A`   | letter, uppercased                 |
//! | `*`   | letter or digit                    |
//! | `x`   | hex digit                          |
//! | `?`   | any character                      |
//! | `\c`  | the literal `c`                    |
//!
//! Everything else is a literal, so `"(ddd) ddd-dddd"` is a US phone mask.

use crate::slot::{CharClass, MaskSlot, Transform};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern ends with an escape character that escapes nothing.
    DanglingEscape { position: usize },
    /// The pattern produced no slots.
    Empty,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::DanglingEscape { position } => {
                write!(f, "dangling escape at character {position}")
            }
            PatternError::Empty => write!(f, "mask pattern is empty"),
        }
    }
}

impl std::error::Error for PatternError {}

pub fn parse_pattern(pattern: &str) -> Result<Vec<MaskSlot>, PatternError> {
    let mut slots = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars().enumerate();
    while let Some((position, ch)) = chars.next() {
        let slot = match ch {
            'd' => MaskSlot::digit(),
            'a' => MaskSlot::letter(),
            'A' => MaskSlot::letter().with_transform(Transform::Uppercase),
            '*' => MaskSlot::alphanumeric(),
            'x' => MaskSlot::placeholder(CharClass::HexDigit),
            '?' => MaskSlot::any(),
            '\\' => match chars.next() {
                Some((_, escaped)) => MaskSlot::literal(escaped),
                None => return Err(PatternError::DanglingEscape { position }),
            },
            other => MaskSlot::literal(other),
        };
        slots.push(slot);
    }
    if slots.is_empty() {
        return Err(PatternError::Empty);
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern() {
        let slots = parse_pattern("(ddd) ddd-dddd").unwrap();
        assert_eq!(slots.len(), 14);
        assert_eq!(slots[0], MaskSlot::literal('('));
        assert_eq!(slots[1], MaskSlot::digit());
        assert_eq!(slots[4], MaskSlot::literal(')'));
        assert_eq!(slots[5], MaskSlot::literal(' '));
        assert_eq!(slots[9], MaskSlot::literal('-'));
        assert_eq!(slots.iter().filter(|s| s.is_placeholder()).count(), 10);
    }

    #[test]
    fn escapes_produce_literals() {
        let slots = parse_pattern(r"\d\\d").unwrap();
        assert_eq!(
            slots,
            vec![
                MaskSlot::literal('d'),
                MaskSlot::literal('\\'),
                MaskSlot::digit()
            ]
        );
    }

    #[test]
    fn uppercase_letter_token() {
        let slots = parse_pattern("AA-dd").unwrap();
        assert_eq!(slots[0].accept('q'), Some('Q'));
        assert_eq!(slots[2], MaskSlot::literal('-'));
    }

    #[test]
    fn errors() {
        assert_eq!(parse_pattern(""), Err(PatternError::Empty));
        assert_eq!(
            parse_pattern(r"dd\"),
            Err(PatternError::DanglingEscape { position: 2 })
        );
        assert_eq!(
            PatternError::DanglingEscape { position: 2 }.to_string(),
            "dangling escape at character 2"
        );
    }
}
