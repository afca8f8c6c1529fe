//! Transient confirmation toasts.
//!
//! At most one toast exists at a time. A toast goes through
//! `Pending -> Visible -> Fading` and is removed when the host reports that
//! its fade transition has ended. Time is supplied by the caller so the
//! timeline can be driven deterministically; [`Toaster::show`] reads the
//! clock itself.

use std::cell::RefCell;
use std::time::Duration;

use web_time::Instant;

use crate::config::StudioConfig;

/// Lifecycle phase of the current toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted but not yet shown, so a CSS transition can register.
    Pending,
    Visible,
    /// Hidden; waiting for the host's transition end.
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub phase: ToastPhase,
    shown_at: Instant,
}

/// Owner of the single toast slot.
#[derive(Debug)]
pub struct Toaster {
    show_delay: Duration,
    visible_for: Duration,
    current: Option<Toast>,
    next_id: u64,
}

impl Toaster {
    pub fn new(show_delay: Duration, visible_for: Duration) -> Self {
        Self {
            show_delay,
            visible_for,
            current: None,
            next_id: 0,
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.toast_show_delay(), config.toast_visible_for())
    }

    /// Shows a toast now, replacing any existing one.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.show_at(message, Instant::now())
    }

    /// Shows a toast at the given instant, replacing any existing one.
    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(old) = self.current.take() {
            log::debug!("toast {} replaced by {}", old.id, id);
        }
        self.current = Some(Toast {
            id,
            message: message.into(),
            phase: ToastPhase::Pending,
            shown_at: now,
        });
        id
    }

    /// Advances the current toast's phase according to elapsed time.
    pub fn advance(&mut self, now: Instant) -> Option<&Toast> {
        if let Some(toast) = self.current.as_mut() {
            let elapsed = now.saturating_duration_since(toast.shown_at);
            toast.phase = if elapsed >= self.visible_for {
                ToastPhase::Fading
            } else if elapsed >= self.show_delay {
                ToastPhase::Visible
            } else {
                ToastPhase::Pending
            };
        }
        self.current.as_ref()
    }

    /// Removes the toast once its fade has completed.
    ///
    /// Ignored for stale ids and for toasts that have not started fading.
    pub fn transition_ended(&mut self, id: u64) -> bool {
        match &self.current {
            Some(toast) if toast.id == id && toast.phase == ToastPhase::Fading => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::from_config(&StudioConfig::default())
    }
}

// ============================================================================
// ToastSink
// ============================================================================

/// Receiver of success notifications from the copy operations.
///
/// Takes `&self` so that async copy operations never hold a mutable borrow
/// across an await point.
pub trait ToastSink {
    fn show_toast(&self, message: &str);
}

impl ToastSink for RefCell<Toaster> {
    fn show_toast(&self, message: &str) {
        self.borrow_mut().show(message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster() -> Toaster {
        Toaster::new(Duration::from_millis(10), Duration::from_millis(2500))
    }

    #[test]
    fn timeline() {
        let mut t = toaster();
        let start = Instant::now();
        let id = t.show_at("Copied", start);

        assert_eq!(t.advance(start).unwrap().phase, ToastPhase::Pending);
        assert_eq!(
            t.advance(start + Duration::from_millis(10)).unwrap().phase,
            ToastPhase::Visible
        );
        assert_eq!(
            t.advance(start + Duration::from_millis(2499)).unwrap().phase,
            ToastPhase::Visible
        );
        assert_eq!(
            t.advance(start + Duration::from_millis(2500)).unwrap().phase,
            ToastPhase::Fading
        );

        assert!(t.transition_ended(id));
        assert!(t.current().is_none());
    }

    #[test]
    fn transition_end_before_fade_is_ignored() {
        let mut t = toaster();
        let start = Instant::now();
        let id = t.show_at("Copied", start);
        t.advance(start + Duration::from_millis(100));
        assert!(!t.transition_ended(id));
        assert!(t.current().is_some());
    }

    #[test]
    fn new_toast_replaces_old() {
        let mut t = toaster();
        let start = Instant::now();
        let first = t.show_at("one", start);
        t.advance(start + Duration::from_millis(3000));
        let second = t.show_at("two", start + Duration::from_millis(3000));

        assert_ne!(first, second);
        let current = t.current().unwrap();
        assert_eq!(current.message, "two");
        assert_eq!(current.phase, ToastPhase::Pending);

        // The replaced toast's transition end must not remove the new one.
        assert!(!t.transition_ended(first));
        assert!(t.current().is_some());
    }

    #[test]
    fn sink_through_refcell() {
        let cell = RefCell::new(toaster());
        cell.show_toast("hello");
        assert_eq!(cell.borrow().current().unwrap().message, "hello");
    }
}
