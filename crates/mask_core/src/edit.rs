//! Locating the edited region between two successive field values.
//!
//! A keystroke replaces `previous[start..removed_end]` with
//! `raw[start..inserted_end]`. Plain diffs are ambiguous when the edit
//! touches repeated characters (typing `5` into `55` could have happened
//! at any of three places), so the caret is used as the tie-breaker:
//!
//! 1. Pure insertion: the inserted run is taken to end exactly at the
//!    caret, if that reading is consistent with both strings.
//! 2. Pure deletion: the removed run is taken to start exactly at the
//!    caret, if consistent.
//! 3. Otherwise the longest common prefix (capped at the caret) and the
//!    longest common suffix (capped so the region still reaches the caret)
//!    are stripped, leaving the shortest region that explains the change.

/// The region touched by one edit, in character offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditRegion {
    /// First changed offset (same in both strings).
    pub start: usize,
    /// End of the replaced run in the previous value (exclusive).
    pub removed_end: usize,
    /// End of the replacement run in the raw value (exclusive).
    pub inserted_end: usize,
}

impl EditRegion {
    pub fn removed_len(&self) -> usize {
        self.removed_end - self.start
    }

    pub fn inserted_len(&self) -> usize {
        self.inserted_end - self.start
    }

    /// Offset in the previous value that a raw character outside the edit
    /// was carried over from. `None` for freshly typed characters.
    pub fn previous_index(&self, raw_index: usize) -> Option<usize> {
        if raw_index < self.start {
            Some(raw_index)
        } else if raw_index >= self.inserted_end {
            Some(raw_index - self.inserted_end + self.removed_end)
        } else {
            None
        }
    }
}

/// Locate the edit that turned `previous` into `raw`, given the caret in
/// `raw` right after the edit.
pub fn locate_edit(previous: &[char], raw: &[char], caret: usize) -> EditRegion {
    let caret = caret.min(raw.len());

    if raw.len() > previous.len() {
        let added = raw.len() - previous.len();
        if let Some(start) = caret.checked_sub(added) {
            if raw[..start] == previous[..start] && raw[caret..] == previous[start..] {
                return EditRegion {
                    start,
                    removed_end: start,
                    inserted_end: caret,
                };
            }
        }
    } else if raw.len() < previous.len() {
        let removed = previous.len() - raw.len();
        let removed_end = caret + removed;
        if raw[..caret] == previous[..caret] && raw[caret..] == previous[removed_end..] {
            return EditRegion {
                start: caret,
                removed_end,
                inserted_end: caret,
            };
        }
    }

    let prefix = common_prefix(previous, raw).min(caret);
    let max_suffix = previous.len().min(raw.len()) - prefix;
    let suffix = common_suffix(previous, raw)
        .min(max_suffix)
        .min(raw.len() - caret);
    EditRegion {
        start: prefix,
        removed_end: previous.len() - suffix,
        inserted_end: raw.len() - suffix,
    }
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
