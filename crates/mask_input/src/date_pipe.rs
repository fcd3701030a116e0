//! Auto-correcting date/time pipe.
//!
//! Built from a format such as `mm/dd/yyyy` or `HH:MM`. On every pass it
//! pads a component whose first digit cannot start a valid value (`5` in a
//! month becomes `05`) and rejects edits that make a component impossible
//! (month `13`, `02/30`, hour `24`).

use crate::traits::{Pipe, PipeContext, PipeError, PipeOutcome};

/// Day maxima indexed by month; index 0 covers "month not typed yet".
const DAYS_IN_MONTH: [u32; 13] = [31, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const DEFAULT_MIN_YEAR: u32 = 1;
const DEFAULT_MAX_YEAR: u32 = 9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DatePart {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "yyyy" => DatePart::Year,
            "yy" => DatePart::ShortYear,
            "mm" => DatePart::Month,
            "dd" => DatePart::Day,
            "HH" => DatePart::Hour,
            "MM" => DatePart::Minute,
            "SS" => DatePart::Second,
            _ => return None,
        })
    }

    fn width(self) -> usize {
        match self {
            DatePart::Year => 4,
            _ => 2,
        }
    }

    /// Months are validated before days so the day check knows the month.
    fn check_order(self) -> u8 {
        match self {
            DatePart::Year => 0,
            DatePart::ShortYear => 1,
            DatePart::Month => 2,
            DatePart::Day => 3,
            DatePart::Hour => 4,
            DatePart::Minute => 5,
            DatePart::Second => 6,
        }
    }
}

fn is_token_char(ch: char) -> bool {
    matches!(ch, 'y' | 'm' | 'd' | 'H' | 'M' | 'S')
}

#[derive(Clone, Debug)]
pub struct AutoCorrectedDatePipe {
    format: String,
    /// Components with their character offset in the format.
    parts: Vec<(DatePart, usize)>,
    min_year: u32,
    max_year: u32,
}

impl AutoCorrectedDatePipe {
    pub fn new(format: &str) -> Result<Self, PipeError> {
        let chars: Vec<char> = format.chars().collect();
        let mut parts = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if !is_token_char(chars[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < chars.len() && is_token_char(chars[i]) {
                i += 1;
            }
            let token: String = chars[start..i].iter().collect();
            let part = DatePart::from_token(&token).ok_or_else(|| PipeError::InvalidFormat {
                format: format.to_string(),
                token: token.clone(),
            })?;
            parts.push((part, start));
        }
        parts.sort_by_key(|(part, _)| part.check_order());
        Ok(Self {
            format: format.to_string(),
            parts,
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        })
    }

    /// Restrict four-digit years to `min_year..=max_year`. Partial years are
    /// compared against the same number of leading digits of the bounds.
    pub fn with_year_range(mut self, min_year: u32, max_year: u32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    fn has_year_range(&self) -> bool {
        self.min_year != DEFAULT_MIN_YEAR || self.max_year != DEFAULT_MAX_YEAR
    }

    fn max_value(&self, part: DatePart) -> u32 {
        match part {
            DatePart::Year => self.max_year,
            DatePart::ShortYear => 99,
            DatePart::Month => 12,
            DatePart::Day => 31,
            DatePart::Hour => 23,
            DatePart::Minute | DatePart::Second => 59,
        }
    }

    fn min_value(&self, part: DatePart) -> u32 {
        match part {
            DatePart::Year => self.min_year,
            DatePart::Month | DatePart::Day => 1,
            _ => 0,
        }
    }

    fn is_invalid(&self, part: DatePart, digits: &str, month: u32) -> bool {
        let value: u32 = digits.parse().unwrap_or(0);
        if part == DatePart::Year && self.has_year_range() {
            let n = digits.len();
            return value < leading_digits(self.min_year, n)
                || value > leading_digits(self.max_year, n);
        }
        let max = if part == DatePart::Day {
            DAYS_IN_MONTH[month.min(12) as usize]
        } else {
            self.max_value(part)
        };
        value > max || (digits.len() == part.width() && value < self.min_value(part))
    }
}

fn first_digit(value: u32) -> u32 {
    let mut value = value;
    while value >= 10 {
        value /= 10;
    }
    value
}

/// The first `n` decimal digits of `value`.
fn leading_digits(value: u32, n: usize) -> u32 {
    let text = value.to_string();
    text[..n.min(text.len())].parse().unwrap_or(value)
}

impl Pipe for AutoCorrectedDatePipe {
    fn pipe(&self, conformed: &str, _ctx: &PipeContext<'_>) -> Result<PipeOutcome, PipeError> {
        let mut chars: Vec<char> = conformed.chars().collect();
        let mut piped_indexes = Vec::new();

        for &(part, position) in &self.parts {
            let Some(digit) = chars.get(position).copied() else {
                continue;
            };
            let Some(first) = digit.to_digit(10) else {
                continue;
            };
            if first > first_digit(self.max_value(part)) {
                match chars.get_mut(position + 1) {
                    Some(next) => *next = digit,
                    None => chars.push(digit),
                }
                chars[position] = '0';
                piped_indexes.push(position);
            }
        }

        let mut month = 0;
        for &(part, position) in &self.parts {
            let digits: String = chars
                .iter()
                .skip(position)
                .take(part.width())
                .filter(|ch| ch.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                continue;
            }
            if part == DatePart::Month {
                month = digits.parse().unwrap_or(0);
            }
            if self.is_invalid(part, &digits, month) {
                log::trace!(
                    target: "mask.input",
                    "date pipe {:?}: {part:?} {digits:?} out of range in {conformed:?}",
                    self.format
                );
                return Ok(PipeOutcome::Reject);
            }
        }

        if piped_indexes.is_empty() {
            Ok(PipeOutcome::Keep)
        } else {
            piped_indexes.sort_unstable();
            Ok(PipeOutcome::ReplaceTracked {
                value: chars.into_iter().collect(),
                piped_indexes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pipe: &AutoCorrectedDatePipe, conformed: &str) -> PipeOutcome {
        let ctx = PipeContext {
            raw_value: conformed,
            previous_value: "",
            caret: conformed.chars().count(),
            placeholder_char: '_',
            guide: false,
            consumed_raw_indexes: &[],
        };
        pipe.pipe(conformed, &ctx).unwrap()
    }

    fn tracked(value: &str, piped_indexes: Vec<usize>) -> PipeOutcome {
        PipeOutcome::ReplaceTracked {
            value: value.to_string(),
            piped_indexes,
        }
    }

    #[test]
    fn pads_first_digits() {
        let pipe = AutoCorrectedDatePipe::new("mm/dd/yyyy").unwrap();
        assert_eq!(run(&pipe, "5"), tracked("05", vec![0]));
        assert_eq!(run(&pipe, "12/4"), tracked("12/04", vec![3]));
        assert_eq!(run(&pipe, "5_/__/____"), tracked("05/__/____", vec![0]));
        assert_eq!(run(&pipe, "1"), PipeOutcome::Keep);
        assert_eq!(run(&pipe, "12/3"), PipeOutcome::Keep);
    }

    #[test]
    fn rejects_impossible_dates() {
        let pipe = AutoCorrectedDatePipe::new("mm/dd/yyyy").unwrap();
        assert_eq!(run(&pipe, "13"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "00"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "0"), PipeOutcome::Keep);
        assert_eq!(run(&pipe, "02/30"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "02/29"), PipeOutcome::Keep);
        assert_eq!(run(&pipe, "04/31"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "12/31/2024"), PipeOutcome::Keep);
    }

    #[test]
    fn component_order_does_not_follow_format_order() {
        let pipe = AutoCorrectedDatePipe::new("dd.mm.yy").unwrap();
        assert_eq!(run(&pipe, "30.02"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "29.02.24"), PipeOutcome::Keep);
        assert_eq!(run(&pipe, "7"), tracked("07", vec![0]));
    }

    #[test]
    fn year_range_checks_prefixes() {
        let pipe = AutoCorrectedDatePipe::new("mm/dd/yyyy")
            .unwrap()
            .with_year_range(1900, 2099);
        assert_eq!(run(&pipe, "12/31/3"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "12/31/19"), PipeOutcome::Keep);
        assert_eq!(run(&pipe, "12/31/18"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "12/31/2100"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "12/31/1999"), PipeOutcome::Keep);
    }

    #[test]
    fn time_formats() {
        let pipe = AutoCorrectedDatePipe::new("HH:MM").unwrap();
        assert_eq!(run(&pipe, "7"), tracked("07", vec![0]));
        assert_eq!(run(&pipe, "23:6"), tracked("23:06", vec![3]));
        assert_eq!(run(&pipe, "24"), PipeOutcome::Reject);
        assert_eq!(run(&pipe, "23:59"), PipeOutcome::Keep);
    }

    #[test]
    fn unknown_tokens_are_errors() {
        let err = AutoCorrectedDatePipe::new("ddd/mm").unwrap_err();
        assert_eq!(
            err,
            PipeError::InvalidFormat {
                format: "ddd/mm".to_string(),
                token: "ddd".to_string()
            }
        );
        assert_eq!(
            AutoCorrectedDatePipe::new("HH:MM:SS").unwrap().format(),
            "HH:MM:SS"
        );
    }
}
