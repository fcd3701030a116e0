//! Raw value -> token stream.
//!
//! Every raw character becomes a token tagged with where it came from, so
//! the aligner can tell a digit the user just typed from a separator the
//! previous pass generated.

use super::ConformOptions;
use crate::edit::EditRegion;
use crate::slot::MaskSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Typed (or pasted) in this edit.
    New,
    /// Carried over from the previous value, where it filled a placeholder.
    Carried,
    /// Carried over from the previous value, where a literal slot emitted it.
    CarriedLiteral,
    /// Stand-in for a removed placeholder character (keep-positions mode).
    Compensation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub ch: char,
    /// Raw offset this token came from. Compensation tokens sit at the end
    /// of the inserted run.
    pub raw_index: usize,
    pub origin: Origin,
    /// Holds a placeholder position open without filling it.
    pub blank: bool,
}

impl Token {
    #[inline]
    pub fn is_new(&self) -> bool {
        self.origin == Origin::New
    }
}

pub(crate) fn build_tokens(
    raw: &[char],
    previous: &[char],
    previous_slots: &[MaskSlot],
    region: &EditRegion,
    options: &ConformOptions,
) -> Vec<Token> {
    let placeholder = options.placeholder_char;
    let blanks_hold_slots = options.guide || options.keep_char_positions;
    let mut tokens = Vec::with_capacity(raw.len() + region.removed_len());

    for (raw_index, &ch) in raw.iter().enumerate() {
        if raw_index == region.inserted_end {
            push_compensation(&mut tokens, previous_slots, region, options);
        }
        let origin = match region.previous_index(raw_index) {
            None => Origin::New,
            Some(prev_index) => {
                let emitted_by_literal = previous.get(prev_index) == Some(&ch)
                    && previous_slots
                        .get(prev_index)
                        .and_then(MaskSlot::as_literal)
                        == Some(ch);
                if emitted_by_literal {
                    Origin::CarriedLiteral
                } else {
                    Origin::Carried
                }
            }
        };
        // A raw placeholder char is a blank whatever the slot would accept.
        tokens.push(Token {
            ch,
            raw_index,
            origin,
            blank: blanks_hold_slots && ch == placeholder && origin != Origin::CarriedLiteral,
        });
    }
    if region.inserted_end >= raw.len() {
        push_compensation(&mut tokens, previous_slots, region, options);
    }
    tokens
}

/// In keep-positions mode every removed placeholder character leaves a
/// blank behind so the characters after it keep their slots.
fn push_compensation(
    tokens: &mut Vec<Token>,
    previous_slots: &[MaskSlot],
    region: &EditRegion,
    options: &ConformOptions,
) {
    if !options.keep_char_positions {
        return;
    }
    let removed_placeholders = (region.start..region.removed_end)
        .filter(|&j| previous_slots.get(j).is_some_and(MaskSlot::is_placeholder))
        .count();
    tokens.extend((0..removed_placeholders).map(|_| Token {
        ch: options.placeholder_char,
        raw_index: region.inserted_end,
        origin: Origin::Compensation,
        blank: true,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::locate_edit;
    use crate::pattern::parse_pattern;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn tokens_for(prev: &str, raw: &str, caret: usize, options: ConformOptions) -> Vec<Token> {
        let slots = parse_pattern("(ddd) ddd-dddd").unwrap();
        let (prev, raw) = (chars(prev), chars(raw));
        let region = locate_edit(&prev, &raw, caret);
        build_tokens(&raw, &prev, &slots, &region, &options)
    }

    #[test]
    fn separators_from_previous_pass_are_tagged() {
        let tokens = tokens_for("(555) 1", "(555) 12", 8, ConformOptions::no_guide());
        let origins: Vec<_> = tokens.iter().map(|t| t.origin).collect();
        assert_eq!(
            origins,
            vec![
                Origin::CarriedLiteral,
                Origin::Carried,
                Origin::Carried,
                Origin::Carried,
                Origin::CarriedLiteral,
                Origin::CarriedLiteral,
                Origin::Carried,
                Origin::New,
            ]
        );
    }

    #[test]
    fn typed_separator_is_new() {
        let tokens = tokens_for("(555", "(555)", 5, ConformOptions::no_guide());
        assert_eq!(tokens[4].ch, ')');
        assert!(tokens[4].is_new());
    }

    #[test]
    fn guide_placeholders_become_blanks() {
        let tokens = tokens_for("(5__) ___-____", "(55__) ___-____", 3, ConformOptions::default());
        assert!(tokens[2].is_new());
        assert!(tokens[3].blank);
        assert!(!tokens[5].blank); // ')' is a carried literal
    }

    #[test]
    fn keep_positions_compensates_removed_placeholders() {
        let options = ConformOptions {
            keep_char_positions: true,
            ..ConformOptions::default()
        };
        // Backspace over the '1' at offset 6.
        let tokens = tokens_for("(555) 123-4567", "(555) 23-4567", 6, options);
        let compensation: Vec<_> = tokens
            .iter()
            .filter(|t| t.origin == Origin::Compensation)
            .collect();
        assert_eq!(compensation.len(), 1);
        assert_eq!(compensation[0].raw_index, 6);
        assert_eq!(tokens[6].origin, Origin::Compensation);
        assert_eq!(tokens[7].ch, '2');
    }

    #[test]
    fn deleting_a_literal_adds_no_compensation() {
        let options = ConformOptions {
            keep_char_positions: true,
            ..ConformOptions::default()
        };
        let tokens = tokens_for("(555) 123-4567", "(555)123-4567", 5, options);
        assert!(tokens.iter().all(|t| t.origin != Origin::Compensation));
    }
}
