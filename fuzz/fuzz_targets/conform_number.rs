#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{ConformOptions, ConformRequest, NumberMaskConfig, conform, number_mask};

fuzz_target!(|data: &[u8]| {
    let [flags, caret, rest @ ..] = data else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let (previous, raw) = text.split_once('\0').unwrap_or(("", text));

    let mut config = NumberMaskConfig::default();
    config.allow_decimal = flags & 1 != 0;
    config.allow_negative = flags & 2 != 0;
    config.allow_leading_zeroes = flags & 4 != 0;
    config.require_decimal = flags & 8 != 0;
    if flags & 16 != 0 {
        config.integer_limit = Some(usize::from(flags >> 5));
    }
    let mask = number_mask(config);

    let options = if flags & 128 == 0 {
        ConformOptions::no_guide()
    } else {
        ConformOptions::default()
    };
    let result = conform(
        &ConformRequest::new(raw, &mask)
            .previous(previous)
            .caret(usize::from(*caret))
            .options(options),
    );
    assert!(result.caret_position <= result.conformed_value.chars().count());
});
