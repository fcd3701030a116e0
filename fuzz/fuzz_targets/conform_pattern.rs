#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{ConformOptions, ConformRequest, MaskSpec, conform, parse_pattern};

// Input layout: flags byte, caret byte, then "pattern\0previous\0raw".
fuzz_target!(|data: &[u8]| {
    let [flags, caret, rest @ ..] = data else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let mut parts = text.splitn(3, '\0');
    let (Some(pattern), Some(previous), Some(raw)) = (parts.next(), parts.next(), parts.next()) else {
        return;
    };
    let Ok(slots) = parse_pattern(pattern) else {
        return;
    };
    let mask_len = slots.len();
    let mask = MaskSpec::fixed(slots);

    let mut options = if flags & 1 == 0 {
        ConformOptions::default()
    } else {
        ConformOptions::no_guide()
    };
    if flags & 2 != 0 {
        options = options.keeping_char_positions();
    }

    let result = conform(
        &ConformRequest::new(raw, &mask)
            .previous(previous)
            .caret(usize::from(*caret))
            .options(options),
    );
    let len = result.conformed_value.chars().count();
    assert!(result.caret_position <= len);

    // Passthrough (empty mask, placeholder collision) returns the raw value.
    if result.conformed_value != raw && mask_len > 0 {
        assert!(len <= mask_len, "{len} chars for a {mask_len}-slot mask");
    }
    let raw_len = raw.chars().count();
    assert!(result.meta.consumed_raw_indexes.iter().all(|&i| i < raw_len));
});
