//! Opaque identifier for masked fields.
//!
//! A plain `u64` so the store never depends on a DOM or widget id type.
//! Integration layers convert their own ids at the call boundary.

/// Handle for a field registered in a [`MaskedInputStore`](crate::MaskedInputStore).
///
/// The value carries no meaning inside this crate; it is only a key.
///
/// ```
/// use mask_input::InputId;
///
/// let id = InputId::from_raw(7);
/// assert_eq!(u64::from(id), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

impl InputId {
    /// Wrap an external id.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The wrapped external id.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for InputId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for InputId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

impl From<InputId> for u64 {
    #[inline]
    fn from(id: InputId) -> Self {
        id.as_raw()
    }
}

impl std::fmt::Display for InputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn conversions() {
        assert_eq!(InputId::from_raw(42).as_raw(), 42);
        assert_eq!(InputId::from(123u32).as_raw(), 123);
        assert_eq!(u64::from(InputId::from(9u64)), 9);
    }

    #[test]
    fn usable_as_key() {
        let mut set = HashSet::new();
        set.insert(InputId::from_raw(1));
        set.insert(InputId::from_raw(2));
        set.insert(InputId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_for_logs() {
        assert_eq!(InputId::from_raw(5).to_string(), "#5");
    }
}
