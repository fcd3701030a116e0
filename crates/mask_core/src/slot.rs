//! Mask slots: the positions a mask is made of.

/// Character-class test used by a placeholder slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII `0-9`.
    Digit,
    /// Any alphabetic character (Unicode aware).
    Letter,
    /// Any alphabetic or numeric character.
    Alphanumeric,
    /// ASCII hex digit, either case.
    HexDigit,
    /// Any character at all.
    Any,
    /// Exactly one of the listed characters.
    Set(String),
    /// Inclusive character range.
    Range(char, char),
}

impl CharClass {
    pub fn matches(&self, ch: char) -> bool {
        match self {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::Letter => ch.is_alphabetic(),
            CharClass::Alphanumeric => ch.is_alphanumeric(),
            CharClass::HexDigit => ch.is_ascii_hexdigit(),
            CharClass::Any => true,
            CharClass::Set(chars) => chars.contains(ch),
            CharClass::Range(lo, hi) => (*lo..=*hi).contains(&ch),
        }
    }
}

/// Normalization applied to a character accepted by a placeholder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

impl Transform {
    /// Apply the transform.
    ///
    /// Case mappings that expand to several characters (e.g. `ß` -> `SS`)
    /// leave the character untouched so one slot always holds one char.
    pub fn apply(self, ch: char) -> char {
        match self {
            Transform::None => ch,
            Transform::Uppercase => single(ch.to_uppercase()).unwrap_or(ch),
            Transform::Lowercase => single(ch.to_lowercase()).unwrap_or(ch),
        }
    }
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    if it.next().is_some() {
        return None;
    }
    Some(first)
}

/// One position of a mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaskSlot {
    /// An exact character the mask always renders.
    Literal(char),
    /// A position the typist fills with a character of the given class.
    Placeholder { class: CharClass, transform: Transform },
}

impl MaskSlot {
    pub const fn literal(ch: char) -> Self {
        MaskSlot::Literal(ch)
    }

    pub const fn placeholder(class: CharClass) -> Self {
        MaskSlot::Placeholder {
            class,
            transform: Transform::None,
        }
    }

    pub const fn digit() -> Self {
        Self::placeholder(CharClass::Digit)
    }

    pub const fn letter() -> Self {
        Self::placeholder(CharClass::Letter)
    }

    pub const fn alphanumeric() -> Self {
        Self::placeholder(CharClass::Alphanumeric)
    }

    pub const fn any() -> Self {
        Self::placeholder(CharClass::Any)
    }

    /// Attach a transform. No-op on literals.
    pub fn with_transform(self, transform: Transform) -> Self {
        match self {
            MaskSlot::Placeholder { class, .. } => MaskSlot::Placeholder { class, transform },
            literal => literal,
        }
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, MaskSlot::Literal(_))
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, MaskSlot::Placeholder { .. })
    }

    /// The literal character, if this slot is one.
    #[inline]
    pub fn as_literal(&self) -> Option<char> {
        match self {
            MaskSlot::Literal(ch) => Some(*ch),
            MaskSlot::Placeholder { .. } => None,
        }
    }

    /// Test `ch` against this slot and return the character to emit.
    ///
    /// Literals accept only themselves; placeholders accept their class and
    /// apply their transform.
    pub fn accept(&self, ch: char) -> Option<char> {
        match self {
            MaskSlot::Literal(lit) => (*lit == ch).then_some(ch),
            MaskSlot::Placeholder { class, transform } => {
                class.matches(ch).then(|| transform.apply(ch))
            }
        }
    }
}
