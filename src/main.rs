use clap::Parser;
use mask_core::{
    ConformOptions, MaskSpec, NumberMaskConfig, byte_to_char_offset, char_to_byte_offset,
    number_mask, obscure,
};
use mask_input::{AutoCorrectedDatePipe, FieldState, InputId, MaskedField, MaskedInputStore};
use mimalloc::MiMalloc;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const FIELD: InputId = InputId::from_raw(0);

/// Replay a keystroke script against a mask and print every conform pass.
#[derive(Parser, Debug)]
#[command(name = "textmask")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Script keys: '<' backspace, '~' forward delete, '[' caret left, \
                        ']' caret right. Every other character is typed at the caret.")]
struct Cli {
    /// Mask pattern: d digit, a letter, A uppercase letter, * alphanumeric,
    /// x hex digit, ? any, \c literal c.
    #[arg(short, long, conflicts_with = "number")]
    pattern: Option<String>,

    /// Use the currency/number mask instead of a pattern.
    #[arg(long)]
    number: bool,

    /// Allow decimals in the number mask, with this many fraction digits.
    #[arg(long, requires = "number")]
    decimals: Option<usize>,

    #[arg(long)]
    no_guide: bool,

    #[arg(long)]
    keep_char_positions: bool,

    #[arg(long, default_value_t = mask_core::DEFAULT_PLACEHOLDER_CHAR)]
    placeholder_char: char,

    /// Show the placeholder template while the field is empty.
    #[arg(long)]
    show_mask: bool,

    /// Run the auto-correcting date pipe with this format (e.g. mm/dd/yyyy).
    #[arg(long)]
    date_pipe: Option<String>,

    /// Also print an obscured rendering that reveals only the last N characters.
    #[arg(long, value_name = "N")]
    reveal_last: Option<usize>,

    /// Keystroke script.
    keys: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("textmask: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_field(cli: &Cli) -> Result<MaskedField, Box<dyn std::error::Error>> {
    let mask = if cli.number {
        let config = match cli.decimals {
            Some(limit) => NumberMaskConfig::default().with_decimals(Some(limit)),
            None => NumberMaskConfig::default(),
        };
        number_mask(config)
    } else {
        let pattern = cli.pattern.as_deref().ok_or("either --pattern or --number is required")?;
        MaskSpec::pattern(pattern)?
    };

    let mut options = if cli.no_guide {
        ConformOptions::no_guide()
    } else {
        ConformOptions::default()
    };
    options = options.with_placeholder_char(cli.placeholder_char);
    if cli.keep_char_positions {
        options = options.keeping_char_positions();
    }

    let mut field = MaskedField::new(mask).options(options).show_mask(cli.show_mask);
    if let Some(format) = &cli.date_pipe {
        field = field.pipe(AutoCorrectedDatePipe::new(format)?);
    }
    Ok(field)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let field = build_field(cli)?;
    let placeholder_char = field.options.placeholder_char;
    let mask = field.mask.clone();
    let mut store = MaskedInputStore::new();
    store.register(FIELD, field);

    // Caret in characters; arrow keys move it without a conform pass.
    let mut at = 0;
    for key in cli.keys.chars() {
        let value = store.value(FIELD).unwrap_or_default().to_string();
        let mut chars: Vec<char> = value.chars().collect();
        at = at.min(chars.len());

        let (raw, raw_caret) = match key {
            '[' | ']' => {
                at = if key == '[' {
                    at.saturating_sub(1)
                } else {
                    (at + 1).min(chars.len())
                };
                println!("{key:?} -> {value:?} caret={at}");
                continue;
            }
            '<' if at > 0 => {
                chars.remove(at - 1);
                (chars, at - 1)
            }
            '~' if at < chars.len() => {
                chars.remove(at);
                (chars, at)
            }
            '<' | '~' => (chars, at),
            _ => {
                chars.insert(at, key);
                (chars, at + 1)
            }
        };

        let raw: String = raw.into_iter().collect();
        let raw_caret = char_to_byte_offset(&raw, raw_caret);
        let state = store.update(FIELD, &raw, raw_caret).ok_or("field not registered")?;
        at = byte_to_char_offset(state.value(), state.caret());
        print_state(state, &mask, placeholder_char, key, cli.reveal_last);
    }
    Ok(())
}

fn print_state(
    state: &FieldState,
    mask: &MaskSpec,
    placeholder_char: char,
    key: char,
    reveal_last: Option<usize>,
) {
    let caret = byte_to_char_offset(state.value(), state.caret());
    let mut line = format!("{key:?} -> {:?} caret={caret}", state.value());
    if state.some_chars_rejected() {
        line.push_str(" rejected");
    }
    if let Some(reveal) = reveal_last {
        let slots = mask.resolve(state.value());
        line.push_str(&format!(
            " display={:?}",
            obscure(state.value(), &slots, placeholder_char, '*', reveal)
        ));
    }
    println!("{line}");
}
