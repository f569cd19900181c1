//! Blocking user notifications.
//!
//! Controllers report the result of an action through a [`Notifier`] with one
//! of a fixed set of [`Notice`]s. Every failure of an action maps to the same
//! notice regardless of cause; the cause is logged, not shown.

use std::sync::{Arc, Mutex, PoisonError};

/// A message shown to the user after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The product was added to the cart.
    AddedToCart,
    /// Adding to the cart failed for any reason.
    AddFailed,
    /// Removing a cart item failed for any reason.
    RemoveFailed,
    /// Updating a cart item's quantity failed for any reason.
    UpdateFailed,
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddedToCart => "Added to cart!",
            Self::AddFailed => "Error adding to cart. Maybe you are not logged in.",
            Self::RemoveFailed => "Error removing item.",
            Self::UpdateFailed => "Error updating quantity.",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(self, Self::AddedToCart)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Shows notices to the user.
///
/// `notify` returns once the user has been told; controllers call it after
/// the page has been updated.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Emits notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(?notice, "{notice}");
        } else {
            tracing::info!(?notice, "{notice}");
        }
    }
}

/// Keeps every notice it is given, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `notice` was shown.
    #[must_use]
    pub fn count(&self, notice: Notice) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| **n == notice)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::AddedToCart.to_string(), "Added to cart!");
        assert_eq!(
            Notice::AddFailed.message(),
            "Error adding to cart. Maybe you are not logged in."
        );
        assert_eq!(Notice::RemoveFailed.message(), "Error removing item.");
        assert_eq!(Notice::UpdateFailed.message(), "Error updating quantity.");
    }

    #[test]
    fn test_only_confirmation_is_not_an_error() {
        assert!(!Notice::AddedToCart.is_error());
        assert!(Notice::AddFailed.is_error());
        assert!(Notice::RemoveFailed.is_error());
        assert!(Notice::UpdateFailed.is_error());
    }

    #[test]
    fn test_recording_notifier_through_arc() {
        let recorder = Arc::new(RecordingNotifier::new());
        let shared: Arc<RecordingNotifier> = Arc::clone(&recorder);

        shared.notify(Notice::UpdateFailed);
        shared.notify(Notice::UpdateFailed);
        TracingNotifier.notify(Notice::AddedToCart);

        assert_eq!(recorder.notices(), vec![Notice::UpdateFailed, Notice::UpdateFailed]);
        assert_eq!(recorder.count(Notice::UpdateFailed), 2);
        assert_eq!(recorder.count(Notice::RemoveFailed), 0);
    }
}
