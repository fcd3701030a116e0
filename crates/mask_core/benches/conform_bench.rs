use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use mask_core::{
    ConformOptions, ConformRequest, ConformResult, MaskSlot, MaskSpec, NumberMaskConfig, conform,
    number_mask,
};

const LONG_MASK_GROUPS: usize = 256;

fn phone() -> MaskSpec {
    MaskSpec::pattern("(ddd) ddd-dddd").unwrap()
}

/// `dddd-dddd-...` with `groups` groups.
fn long_mask(groups: usize) -> MaskSpec {
    let mut slots = Vec::with_capacity(groups * 5);
    for i in 0..groups {
        if i > 0 {
            slots.push(MaskSlot::literal('-'));
        }
        slots.extend(std::iter::repeat_n(MaskSlot::digit(), 4));
    }
    MaskSpec::fixed(slots)
}

fn type_at_end(mask: &MaskSpec, keys: &str, options: ConformOptions) -> ConformResult {
    let mut state = ConformResult::default();
    for key in keys.chars() {
        let raw = format!("{}{key}", state.conformed_value);
        let caret = raw.chars().count();
        state = conform(
            &ConformRequest::new(&raw, mask)
                .previous(&state.conformed_value)
                .caret(caret)
                .options(options),
        );
    }
    state
}

fn bench_conform_phone_paste(c: &mut Criterion) {
    let mask = phone();
    c.bench_function("bench_conform_phone_paste", |b| {
        b.iter(|| {
            let result = conform(
                &ConformRequest::new(black_box("5551234567"), &mask)
                    .options(ConformOptions::no_guide()),
            );
            black_box(result.caret_position);
        });
    });
}

fn bench_conform_phone_session(c: &mut Criterion) {
    let mask = phone();
    c.bench_function("bench_conform_phone_session", |b| {
        b.iter(|| black_box(type_at_end(&mask, black_box("5551234567"), ConformOptions::default())));
    });
}

fn bench_conform_long_mask_mid_insert(c: &mut Criterion) {
    let mask = long_mask(LONG_MASK_GROUPS);
    let digits: String = (0..LONG_MASK_GROUPS * 4)
        .map(|i| char::from(b'0' + (i % 10) as u8))
        .collect();
    let full = conform(&ConformRequest::new(&digits, &mask).options(ConformOptions::no_guide()));
    let mut raw: Vec<char> = full.conformed_value.chars().collect();
    let at = raw.len() / 2;
    raw.insert(at, '7');
    let raw: String = raw.into_iter().collect();

    c.bench_function("bench_conform_long_mask_mid_insert", |b| {
        b.iter_batched(
            || raw.clone(),
            |raw| {
                let result = conform(
                    &ConformRequest::new(&raw, &mask)
                        .previous(&full.conformed_value)
                        .caret(at + 1)
                        .options(ConformOptions::no_guide()),
                );
                black_box(result.conformed_value.len());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_conform_number_mask_session(c: &mut Criterion) {
    let mask = number_mask(NumberMaskConfig::default().with_decimals(Some(2)));
    c.bench_function("bench_conform_number_mask_session", |b| {
        b.iter(|| black_box(type_at_end(&mask, black_box("1234567.89"), ConformOptions::no_guide())));
    });
}

criterion_group!(
    benches,
    bench_conform_phone_paste,
    bench_conform_phone_session,
    bench_conform_long_mask_mid_insert,
    bench_conform_number_mask_session
);
criterion_main!(benches);
