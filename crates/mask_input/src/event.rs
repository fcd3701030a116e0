//! Input event coalescing.
//!
//! Old Android WebViews (major version below 5) fire duplicate `input`
//! events for a single keystroke and report the caret before it settles.
//! Fields on those platforms get a leading-edge throttle: the first event of
//! a burst is applied (after the caret settles), the rest of the burst is
//! dropped. Telephone inputs are exempt.

use std::time::{Duration, Instant};

/// Throttle window applied on old Android.
pub const OLD_ANDROID_THROTTLE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Android { major: u32 },
    Other,
}

impl Platform {
    /// Classify a user agent string by its `Android <major>` token.
    pub fn detect(user_agent: &str) -> Self {
        const MARKER: &str = "Android ";
        let Some(at) = user_agent.find(MARKER) else {
            return Platform::Other;
        };
        let digits: String = user_agent[at + MARKER.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        match digits.parse() {
            Ok(major) => Platform::Android { major },
            Err(_) => Platform::Other,
        }
    }

    pub fn is_old_android(self) -> bool {
        matches!(self, Platform::Android { major } if major < 5)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Tel,
}

impl InputKind {
    /// Map an HTML `type` attribute; anything but `tel` is treated as text.
    pub fn from_type_attr(ty: &str) -> Self {
        if ty.eq_ignore_ascii_case("tel") {
            InputKind::Tel
        } else {
            InputKind::Text
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventPolicy {
    #[default]
    Immediate,
    Throttled {
        window: Duration,
        /// Apply the admitted event only once the caret has settled.
        defer_caret_read: bool,
    },
}

impl EventPolicy {
    pub fn for_platform(platform: Platform, kind: InputKind) -> Self {
        if platform.is_old_android() && kind != InputKind::Tel {
            EventPolicy::Throttled {
                window: OLD_ANDROID_THROTTLE,
                defer_caret_read: true,
            }
        } else {
            EventPolicy::Immediate
        }
    }
}

/// What to do with one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Run the conform pass now.
    Apply,
    /// Run the conform pass once the platform has updated the caret.
    ApplyAfterCaretSettles,
    /// Drop the event; it duplicates one already admitted.
    Coalesce,
}

/// Leading-edge throttle for one field.
#[derive(Clone, Debug)]
pub struct EventGate {
    policy: EventPolicy,
    window_start: Option<Instant>,
}

impl EventGate {
    pub fn new(policy: EventPolicy) -> Self {
        Self {
            policy,
            window_start: None,
        }
    }

    pub fn policy(&self) -> EventPolicy {
        self.policy
    }

    pub fn admit(&mut self, now: Instant) -> Admission {
        match self.policy {
            EventPolicy::Immediate => Admission::Apply,
            EventPolicy::Throttled {
                window,
                defer_caret_read,
            } => {
                if let Some(start) = self.window_start
                    && now.saturating_duration_since(start) < window
                {
                    return Admission::Coalesce;
                }
                self.window_start = Some(now);
                if defer_caret_read {
                    Admission::ApplyAfterCaretSettles
                } else {
                    Admission::Apply
                }
            }
        }
    }

    /// Forget the current window, e.g. after the field was reset.
    pub fn reset(&mut self) {
        self.window_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KITKAT: &str = "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5 Build/KOT49H) AppleWebKit/537.36";
    const PIE: &str = "Mozilla/5.0 (Linux; Android 9; Pixel 3) AppleWebKit/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

    #[test]
    fn detects_android_major() {
        assert_eq!(Platform::detect(KITKAT), Platform::Android { major: 4 });
        assert_eq!(Platform::detect(PIE), Platform::Android { major: 9 });
        assert_eq!(Platform::detect(DESKTOP), Platform::Other);
        assert_eq!(Platform::detect("Android x"), Platform::Other);
        assert!(Platform::detect(KITKAT).is_old_android());
        assert!(!Platform::detect(PIE).is_old_android());
    }

    #[test]
    fn policy_per_platform() {
        let old = Platform::detect(KITKAT);
        assert_eq!(
            EventPolicy::for_platform(old, InputKind::Text),
            EventPolicy::Throttled {
                window: OLD_ANDROID_THROTTLE,
                defer_caret_read: true
            }
        );
        assert_eq!(
            EventPolicy::for_platform(old, InputKind::from_type_attr("TEL")),
            EventPolicy::Immediate
        );
        assert_eq!(
            EventPolicy::for_platform(Platform::Other, InputKind::Text),
            EventPolicy::Immediate
        );
    }

    #[test]
    fn immediate_gate_admits_everything() {
        let mut gate = EventGate::new(EventPolicy::Immediate);
        let now = Instant::now();
        assert_eq!(gate.admit(now), Admission::Apply);
        assert_eq!(gate.admit(now), Admission::Apply);
    }

    #[test]
    fn throttle_is_leading_edge() {
        let mut gate = EventGate::new(EventPolicy::Throttled {
            window: OLD_ANDROID_THROTTLE,
            defer_caret_read: true,
        });
        let t0 = Instant::now();
        assert_eq!(gate.admit(t0), Admission::ApplyAfterCaretSettles);
        assert_eq!(gate.admit(t0 + Duration::from_millis(10)), Admission::Coalesce);
        assert_eq!(gate.admit(t0 + Duration::from_millis(299)), Admission::Coalesce);
        assert_eq!(
            gate.admit(t0 + Duration::from_millis(300)),
            Admission::ApplyAfterCaretSettles
        );
        assert_eq!(gate.admit(t0 + Duration::from_millis(350)), Admission::Coalesce);

        gate.reset();
        assert_eq!(
            gate.admit(t0 + Duration::from_millis(360)),
            Admission::ApplyAfterCaretSettles
        );
    }

    #[test]
    fn throttle_without_deferral() {
        let mut gate = EventGate::new(EventPolicy::Throttled {
            window: Duration::from_millis(50),
            defer_caret_read: false,
        });
        let t0 = Instant::now();
        assert_eq!(gate.admit(t0), Admission::Apply);
        assert_eq!(gate.admit(t0 + Duration::from_millis(1)), Admission::Coalesce);
    }
}
