//! Variable-length number and currency mask.
//!
//! The slot sequence is rebuilt from the digits of the raw value on every
//! pass: the integer part gets one digit slot per typed digit with
//! thousands separators between groups, and the fraction part (if decimals
//! are enabled and a decimal symbol was typed) gets one slot per typed
//! fraction digit up to the limit.
//!
//! Without `allow_leading_zeroes` the first integer slot of a multi-digit
//! (or non-zero) amount only takes `1-9`, so zeroes typed or pasted in
//! front of the amount are rejected instead of filling the slots the real
//! digits need.

use crate::mask::MaskSpec;
use crate::slot::{CharClass, MaskSlot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberMaskConfig {
    pub prefix: String,
    pub suffix: String,
    pub include_thousands_separator: bool,
    pub thousands_separator: char,
    pub allow_decimal: bool,
    pub decimal_symbol: char,
    /// Maximum fraction digits; `None` for unlimited.
    pub decimal_limit: Option<usize>,
    /// Always render the decimal symbol, even before one is typed.
    pub require_decimal: bool,
    pub allow_negative: bool,
    pub allow_leading_zeroes: bool,
    /// Maximum integer digits; `None` for unlimited.
    pub integer_limit: Option<usize>,
}

impl Default for NumberMaskConfig {
    fn default() -> Self {
        Self {
            prefix: "$".to_string(),
            suffix: String::new(),
            include_thousands_separator: true,
            thousands_separator: ',',
            allow_decimal: false,
            decimal_symbol: '.',
            decimal_limit: Some(2),
            require_decimal: false,
            allow_negative: false,
            allow_leading_zeroes: false,
            integer_limit: None,
        }
    }
}

impl NumberMaskConfig {
    /// Bare integers: no prefix, no grouping.
    pub fn plain() -> Self {
        Self {
            prefix: String::new(),
            include_thousands_separator: false,
            ..Self::default()
        }
    }

    pub fn with_decimals(mut self, limit: Option<usize>) -> Self {
        self.allow_decimal = true;
        self.decimal_limit = limit;
        self
    }

    /// The slot sequence for one raw value.
    pub fn slots_for(&self, raw: &str) -> Vec<MaskSlot> {
        let mut rest = raw;
        let negative = self.allow_negative && rest.starts_with('-');
        if negative {
            rest = &rest[1..];
        }
        rest = rest.strip_prefix(self.prefix.as_str()).unwrap_or(rest);
        if !self.suffix.is_empty() {
            rest = rest.strip_suffix(self.suffix.as_str()).unwrap_or(rest);
        }

        let decimal_at = if self.allow_decimal || self.require_decimal {
            rest.rfind(self.decimal_symbol)
        } else {
            None
        };
        let (integer_part, fraction_part) = match decimal_at {
            Some(at) => (
                &rest[..at],
                Some(&rest[at + self.decimal_symbol.len_utf8()..]),
            ),
            None => (rest, None),
        };

        let mut integer = digits_of(integer_part);
        if !self.allow_leading_zeroes {
            integer = strip_leading_zeroes(integer);
        }
        let nonzero_lead = !self.allow_leading_zeroes && integer.starts_with(|c: char| c != '0');
        if let Some(limit) = self.integer_limit {
            integer.truncate(limit);
        }

        let mut slots = Vec::new();
        if negative {
            slots.push(MaskSlot::placeholder(CharClass::Set("-".to_string())));
        }
        slots.extend(self.prefix.chars().map(MaskSlot::literal));

        if integer.is_empty() && fraction_part.is_some() {
            // Decimal symbol typed first: render a leading zero.
            slots.push(MaskSlot::literal('0'));
        } else {
            self.push_integer(&mut slots, integer.len().max(1), nonzero_lead);
        }

        if fraction_part.is_some() || self.require_decimal {
            slots.push(MaskSlot::literal(self.decimal_symbol));
            let typed = fraction_part.map_or(0, |f| digits_of(f).len());
            let count = self.decimal_limit.map_or(typed, |limit| typed.min(limit));
            slots.extend((0..count).map(|_| MaskSlot::digit()));
        }

        slots.extend(self.suffix.chars().map(MaskSlot::literal));
        slots
    }

    fn push_integer(&self, slots: &mut Vec<MaskSlot>, digits: usize, nonzero_lead: bool) {
        for i in 0..digits {
            if self.include_thousands_separator && i > 0 && (digits - i) % 3 == 0 {
                slots.push(MaskSlot::literal(self.thousands_separator));
            }
            if i == 0 && nonzero_lead {
                slots.push(MaskSlot::placeholder(CharClass::Range('1', '9')));
            } else {
                slots.push(MaskSlot::digit());
            }
        }
    }
}

fn digits_of(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

fn strip_leading_zeroes(digits: String) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A dynamic mask for number and currency entry.
pub fn number_mask(config: NumberMaskConfig) -> MaskSpec {
    MaskSpec::dynamic(move |raw| Ok(config.slots_for(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conform::{ConformOptions, ConformRequest, ConformResult, conform, conform_to_mask};
    use crate::display::placeholder_for;

    fn shape(config: &NumberMaskConfig, raw: &str) -> String {
        placeholder_for(&config.slots_for(raw), '#')
    }

    fn type_at_end(mask: &MaskSpec, keys: &str) -> ConformResult {
        let mut state = ConformResult::default();
        for key in keys.chars() {
            let raw = format!("{}{key}", state.conformed_value);
            let caret = raw.chars().count();
            state = conform(
                &ConformRequest::new(&raw, mask)
                    .previous(&state.conformed_value)
                    .caret(caret)
                    .options(ConformOptions::no_guide()),
            );
        }
        state
    }

    #[test]
    fn groups_thousands() {
        let config = NumberMaskConfig::default();
        assert_eq!(shape(&config, ""), "$#");
        assert_eq!(shape(&config, "$"), "$#");
        assert_eq!(shape(&config, "123"), "$###");
        assert_eq!(shape(&config, "1234"), "$#,###");
        assert_eq!(shape(&config, "$1,234,567"), "$#,###,###");
        assert_eq!(shape(&NumberMaskConfig::plain(), "1234567"), "#######");
    }

    #[test]
    fn leading_zeroes() {
        let config = NumberMaskConfig::default();
        assert_eq!(shape(&config, "0012"), "$##");
        assert_eq!(shape(&config, "000"), "$#");
        let keep = NumberMaskConfig {
            allow_leading_zeroes: true,
            ..NumberMaskConfig::default()
        };
        assert_eq!(shape(&keep, "0012"), "$#,###");

        let slots = config.slots_for("0012");
        assert_eq!(slots[1].accept('0'), None);
        assert_eq!(slots[1].accept('1'), Some('1'));
        assert_eq!(config.slots_for("0")[1].accept('0'), Some('0'));
        assert_eq!(keep.slots_for("0012")[1].accept('0'), Some('0'));
    }

    #[test]
    fn typed_leading_zero_gives_way() {
        let mask = number_mask(NumberMaskConfig::default());
        let zero = type_at_end(&mask, "0");
        assert_eq!(zero.conformed_value, "$0");
        assert_eq!(zero.caret_position, 2);

        let result = type_at_end(&mask, "05");
        assert_eq!(result.conformed_value, "$5");
        assert_eq!(result.caret_position, 2);
        assert!(result.meta.some_chars_rejected);

        let result = type_at_end(&mask, "0512");
        assert_eq!(result.conformed_value, "$512");
        assert_eq!(result.caret_position, 4);
        assert!(!result.meta.some_chars_rejected);
    }

    #[test]
    fn pasted_leading_zeroes_are_dropped() {
        let mask = number_mask(NumberMaskConfig::default());
        let result = conform_to_mask("0012", &mask, ConformOptions::no_guide());
        assert_eq!(result.conformed_value, "$12");
        assert_eq!(result.caret_position, 3);
        assert!(result.meta.some_chars_rejected);

        let result = conform_to_mask("0001234", &mask, ConformOptions::no_guide());
        assert_eq!(result.conformed_value, "$1,234");

        let decimals = number_mask(NumberMaskConfig::default().with_decimals(Some(2)));
        let result = conform_to_mask("0.5", &decimals, ConformOptions::no_guide());
        assert_eq!(result.conformed_value, "$0.5");
        assert!(!result.meta.some_chars_rejected);
    }

    #[test]
    fn decimals() {
        let config = NumberMaskConfig::default().with_decimals(Some(2));
        assert_eq!(shape(&config, "12.345"), "$##.##");
        assert_eq!(shape(&config, "12."), "$##.");
        assert_eq!(shape(&config, "."), "$0.");
        // Without decimals the symbol is just another non-digit.
        assert_eq!(shape(&NumberMaskConfig::default(), "12.3"), "$###");

        let required = NumberMaskConfig {
            require_decimal: true,
            ..NumberMaskConfig::default()
        };
        assert_eq!(shape(&required, "12"), "$##.");
    }

    #[test]
    fn limits_and_suffix() {
        let limited = NumberMaskConfig {
            integer_limit: Some(3),
            ..NumberMaskConfig::default()
        };
        assert_eq!(shape(&limited, "12345"), "$###");

        let percent = NumberMaskConfig {
            prefix: String::new(),
            suffix: " %".to_string(),
            ..NumberMaskConfig::default()
        };
        assert_eq!(shape(&percent, "50 %"), "## %");
    }

    #[test]
    fn negative_sign_is_a_placeholder() {
        let config = NumberMaskConfig {
            allow_negative: true,
            ..NumberMaskConfig::default()
        };
        let slots = config.slots_for("-12");
        assert_eq!(placeholder_for(&slots, '#'), "#$##");
        assert_eq!(slots[0].accept('-'), Some('-'));
        assert_eq!(slots[0].accept('5'), None);
        assert_eq!(shape(&config, "-"), "#$#");
    }

    #[test]
    fn typing_a_currency_amount() {
        let mask = number_mask(NumberMaskConfig::default());
        let result = type_at_end(&mask, "1234567");
        assert_eq!(result.conformed_value, "$1,234,567");
        assert_eq!(result.caret_position, 10);
        assert!(!result.meta.some_chars_rejected);

        let result = type_at_end(&mask, "1234");
        assert_eq!(result.conformed_value, "$1,234");
        assert_eq!(result.caret_position, 6);
    }

    #[test]
    fn backspace_regroups() {
        let mask = number_mask(NumberMaskConfig::default());
        let result = conform(
            &ConformRequest::new("$1,23", &mask)
                .previous("$1,234")
                .caret(5)
                .options(ConformOptions::no_guide()),
        );
        assert_eq!(result.conformed_value, "$123");
        assert_eq!(result.caret_position, 4);
        assert!(!result.meta.some_chars_rejected);
    }

    #[test]
    fn decimal_typed_first() {
        let mask = number_mask(NumberMaskConfig::default().with_decimals(Some(2)));
        let result = type_at_end(&mask, ".5");
        assert_eq!(result.conformed_value, "$0.5");
        assert_eq!(result.caret_position, 4);

        let capped = type_at_end(&mask, "1.234");
        assert_eq!(capped.conformed_value, "$1.23");
        assert!(capped.meta.some_chars_rejected);
    }

    #[test]
    fn negative_amounts() {
        let mask = number_mask(NumberMaskConfig {
            allow_negative: true,
            ..NumberMaskConfig::default()
        });
        let result = type_at_end(&mask, "-5");
        assert_eq!(result.conformed_value, "-$5");
        assert_eq!(result.caret_position, 3);
    }
}
