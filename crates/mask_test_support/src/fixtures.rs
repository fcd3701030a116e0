//! Golden conform fixtures.
//!
//! A fixture file is TOML or JSON with a `format` header and a list of
//! cases. Each case names its mask (a pattern string or a number preset),
//! the conform options, and either a single edit (`previous`, `raw`,
//! `caret`) or a key sequence typed at the end of an empty field (`keys`).

use mask_core::{
    ConformOptions, ConformRequest, ConformResult, MaskSpec, NumberMaskConfig, conform,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const CONFORM_FIXTURE_FORMAT_V1: &str = "textmask-conform-v1";

#[derive(Clone, Debug, Deserialize)]
struct FixtureFile {
    format: String,
    cases: Vec<ConformCase>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConformCase {
    pub name: String,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub number: Option<NumberFixture>,
    #[serde(default = "default_guide")]
    pub guide: bool,
    #[serde(default)]
    pub keep_char_positions: bool,
    #[serde(default)]
    pub placeholder_char: Option<char>,
    #[serde(default)]
    pub previous: String,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub keys: Option<String>,
    /// Caret after the edit, in characters; defaults to the end of `raw`.
    #[serde(default)]
    pub caret: Option<usize>,
    pub expected: String,
    pub expected_caret: usize,
    #[serde(default)]
    pub rejected: Option<bool>,
}

fn default_guide() -> bool {
    true
}

/// Overrides on top of [`NumberMaskConfig::default`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberFixture {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub include_thousands_separator: Option<bool>,
    pub thousands_separator: Option<char>,
    pub allow_decimal: Option<bool>,
    pub decimal_symbol: Option<char>,
    pub decimal_limit: Option<usize>,
    pub require_decimal: Option<bool>,
    pub allow_negative: Option<bool>,
    pub allow_leading_zeroes: Option<bool>,
    pub integer_limit: Option<usize>,
}

impl NumberFixture {
    pub fn config(&self) -> NumberMaskConfig {
        let base = NumberMaskConfig::default();
        NumberMaskConfig {
            prefix: self.prefix.clone().unwrap_or(base.prefix),
            suffix: self.suffix.clone().unwrap_or(base.suffix),
            include_thousands_separator: self
                .include_thousands_separator
                .unwrap_or(base.include_thousands_separator),
            thousands_separator: self.thousands_separator.unwrap_or(base.thousands_separator),
            allow_decimal: self.allow_decimal.unwrap_or(base.allow_decimal),
            decimal_symbol: self.decimal_symbol.unwrap_or(base.decimal_symbol),
            decimal_limit: self.decimal_limit.or(base.decimal_limit),
            require_decimal: self.require_decimal.unwrap_or(base.require_decimal),
            allow_negative: self.allow_negative.unwrap_or(base.allow_negative),
            allow_leading_zeroes: self
                .allow_leading_zeroes
                .unwrap_or(base.allow_leading_zeroes),
            integer_limit: self.integer_limit.or(base.integer_limit),
        }
    }
}

impl ConformCase {
    pub fn mask(&self) -> MaskSpec {
        match (&self.pattern, &self.number) {
            (Some(pattern), None) => MaskSpec::pattern(pattern).unwrap_or_else(|err| {
                panic!("fixture '{}' has an invalid pattern {pattern:?}: {err}", self.name)
            }),
            (None, Some(number)) => mask_core::number_mask(number.config()),
            _ => panic!(
                "fixture '{}' must set exactly one of `pattern` and `number`",
                self.name
            ),
        }
    }

    pub fn options(&self) -> ConformOptions {
        let mut options = if self.guide {
            ConformOptions::default()
        } else {
            ConformOptions::no_guide()
        };
        if let Some(placeholder_char) = self.placeholder_char {
            options = options.with_placeholder_char(placeholder_char);
        }
        if self.keep_char_positions {
            options = options.keeping_char_positions();
        }
        options
    }

    pub fn run(&self) -> ConformResult {
        let mask = self.mask();
        let options = self.options();
        match (&self.raw, &self.keys) {
            (Some(raw), None) => {
                let caret = self.caret.unwrap_or_else(|| raw.chars().count());
                conform(
                    &ConformRequest::new(raw, &mask)
                        .previous(&self.previous)
                        .caret(caret)
                        .options(options),
                )
            }
            (None, Some(keys)) => type_keys(&mask, options, keys),
            _ => panic!(
                "fixture '{}' must set exactly one of `raw` and `keys`",
                self.name
            ),
        }
    }

    /// One comparable line for the expected outcome.
    pub fn expected_line(&self) -> String {
        render_line(
            &self.name,
            &self.expected,
            self.expected_caret,
            self.rejected,
        )
    }

    /// The same line for an actual result. The rejected flag is only
    /// compared when the fixture pins it.
    pub fn actual_line(&self, result: &ConformResult) -> String {
        render_line(
            &self.name,
            &result.conformed_value,
            result.caret_position,
            self.rejected.map(|_| result.meta.some_chars_rejected),
        )
    }
}

fn render_line(name: &str, value: &str, caret: usize, rejected: Option<bool>) -> String {
    let value = crate::escape_text(value);
    match rejected {
        Some(rejected) => format!("{name}: \"{value}\" caret={caret} rejected={rejected}"),
        None => format!("{name}: \"{value}\" caret={caret}"),
    }
}

/// Type `keys` one character at a time at the caret, starting from an
/// empty field, threading the previous value and caret between passes.
pub fn type_keys(mask: &MaskSpec, options: ConformOptions, keys: &str) -> ConformResult {
    let mut state = ConformResult::default();
    for key in keys.chars() {
        let mut raw: Vec<char> = state.conformed_value.chars().collect();
        let at = state.caret_position.min(raw.len());
        raw.insert(at, key);
        let raw: String = raw.into_iter().collect();
        state = conform(
            &ConformRequest::new(&raw, mask)
                .previous(&state.conformed_value)
                .caret(at + 1)
                .options(options),
        );
    }
    state
}

pub fn load_conform_fixtures(path: &Path) -> Vec<ConformCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read conform fixtures {path:?}: {err}"));
    let file: FixtureFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse conform fixtures TOML {path:?}: {err}")),
        Some("json") => serde_json::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse conform fixtures JSON {path:?}: {err}")),
        other => panic!("unsupported conform fixture extension {other:?} for {path:?}"),
    };
    assert_eq!(
        file.format, CONFORM_FIXTURE_FORMAT_V1,
        "unsupported conform fixture format in {path:?}"
    );
    assert!(!file.cases.is_empty(), "conform fixtures {path:?} have no cases");

    let mut names = BTreeSet::new();
    for case in &file.cases {
        assert!(
            names.insert(case.name.as_str()),
            "duplicate conform fixture name in {path:?}: {}",
            case.name
        );
    }
    file.cases
}
