//! Toast notification store.
//!
//! Holds transient user-facing notices. Error toasts are sticky: with no
//! explicit duration they persist until dismissed. Every other kind defaults
//! to a 3-second auto-expiry. Expiry is driven by the clock value callers
//! pass in, so the store stays deterministic under test.

use std::time::{Duration, Instant};

/// Default lifetime for auto-expiring toasts.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    /// Default duration for this kind. `None` means sticky.
    pub fn default_duration(self) -> Option<Duration> {
        match self {
            ToastKind::Error => None,
            ToastKind::Success | ToastKind::Info | ToastKind::Warning => {
                Some(DEFAULT_TOAST_DURATION)
            }
        }
    }
}

/// One notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    duration: Option<Duration>,
    created_at: Instant,
}

impl Toast {
    /// When this toast should be swept, or `None` for sticky toasts.
    pub fn expires_at(&self) -> Option<Instant> {
        self.duration.map(|d| self.created_at + d)
    }

    pub fn is_sticky(&self) -> bool {
        self.duration.is_none()
    }
}

/// Owning store for active toasts.
///
/// Not a global: construct one per application and pass it where needed.
#[derive(Debug, Default)]
pub struct ToastStore {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a toast with the kind's default duration. Returns its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> u64 {
        self.push_with_duration(kind, message, kind.default_duration(), now)
    }

    /// Push a toast with an explicit duration (`None` = sticky).
    pub fn push_with_duration(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Option<Duration>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            duration,
            created_at: now,
        });
        id
    }

    /// Remove a toast by id. Returns false when it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Remove every toast whose duration has elapsed at `now`.
    ///
    /// Sticky toasts are never swept. Returns how many were removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts
            .retain(|t| t.expires_at().is_none_or(|deadline| deadline > now));
        before - self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_toasts_are_sticky_by_default() {
        let mut store = ToastStore::new();
        let now = Instant::now();
        let id = store.push(ToastKind::Error, "save failed", now);

        // No amount of elapsed time sweeps a sticky toast.
        assert_eq!(store.sweep_expired(now + Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);

        assert!(store.dismiss(id));
        assert!(store.is_empty());
    }

    #[test]
    fn success_toasts_expire_after_three_seconds() {
        let mut store = ToastStore::new();
        let now = Instant::now();
        store.push(ToastKind::Success, "mapping confirmed", now);

        // Still visible just before the deadline.
        assert_eq!(store.sweep_expired(now + Duration::from_millis(2999)), 0);
        assert_eq!(store.sweep_expired(now + DEFAULT_TOAST_DURATION), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn explicit_duration_overrides_the_default() {
        let mut store = ToastStore::new();
        let now = Instant::now();
        store.push_with_duration(
            ToastKind::Error,
            "transient error",
            Some(Duration::from_millis(500)),
            now,
        );
        store.push_with_duration(ToastKind::Info, "pinned notice", None, now);

        assert_eq!(store.sweep_expired(now + Duration::from_secs(1)), 1);
        assert_eq!(store.len(), 1);
        assert!(store.iter().next().unwrap().is_sticky());
    }

    #[test]
    fn dismiss_unknown_id_is_a_noop() {
        let mut store = ToastStore::new();
        assert!(!store.dismiss(42));
    }
}
