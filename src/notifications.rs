//! Single-slot toast notifications with timed auto-dismiss.
//!
//! Only the most recent message is ever shown. Showing a new toast replaces
//! the current one and restarts the display window; a handle obtained for an
//! earlier toast can no longer dismiss the replacement.

use std::time::{Duration, Instant};

use serde::Serialize;

pub const ITEMS_ASSIGNED: &str = "Items assigned to client";
pub const ITEM_UNASSIGNED: &str = "Unassigned";
pub const ITEMS_UNASSIGNED: &str = "Items unassigned";
pub const ITEMS_MARKED_PAID: &str = "Items marked as paid";
pub const ITEMS_MARKED_UNPAID: &str = "Items marked as unpaid";
pub const CLIENT_ADDED: &str = "Client added";
pub const ADDRESS_ADDED: &str = "Address added";
pub const PRODUCT_REQUEST_ADDED: &str = "Product request added";
pub const SALES_GOAL_SET: &str = "Sales goal successfully set";
pub const SALES_GOAL_FAILED: &str = "Failed to set sales goal";

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Identifies one particular toast; stale handles are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastHandle(u64);

#[derive(Debug)]
struct Slot {
    toast: Toast,
    handle: ToastHandle,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifier {
    window: Duration,
    slot: Option<Slot>,
    generation: u64,
}

impl Notifier {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: None,
            generation: 0,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastHandle {
        self.show_at(message, kind, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        now: Instant,
    ) -> ToastHandle {
        self.generation += 1;
        let handle = ToastHandle(self.generation);
        self.slot = Some(Slot {
            toast: Toast {
                message: message.into(),
                kind,
            },
            handle,
            expires_at: now + self.window,
        });
        handle
    }

    /// Timer callback: clears the slot only if `handle` is still showing.
    pub fn dismiss(&mut self, handle: ToastHandle) -> bool {
        match &self.slot {
            Some(slot) if slot.handle == handle => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn current(&mut self) -> Option<&Toast> {
        self.current_at(Instant::now())
    }

    /// Returns the visible toast, dropping it once its window has elapsed.
    pub fn current_at(&mut self, now: Instant) -> Option<&Toast> {
        if self.slot.as_ref().is_some_and(|slot| now >= slot.expires_at) {
            self.slot = None;
        }
        self.slot.as_ref().map(|slot| &slot.toast)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_window() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_at(ITEMS_ASSIGNED, ToastKind::Success, start);

        assert_eq!(
            notifier
                .current_at(start + Duration::from_millis(2999))
                .map(|t| t.message.as_str()),
            Some(ITEMS_ASSIGNED)
        );
        assert!(notifier.current_at(start + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn new_toast_restarts_window_and_replaces_message() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_at(ITEMS_ASSIGNED, ToastKind::Success, start);
        notifier.show_at(
            ITEMS_MARKED_PAID,
            ToastKind::Success,
            start + Duration::from_secs(2),
        );

        let shown = notifier
            .current_at(start + Duration::from_secs(4))
            .cloned()
            .unwrap();
        assert_eq!(shown.message, ITEMS_MARKED_PAID);
        assert!(notifier.current_at(start + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn stale_handle_cannot_dismiss_replacement() {
        let mut notifier = Notifier::default();
        let first = notifier.show(ITEMS_ASSIGNED, ToastKind::Success);
        let second = notifier.show(SALES_GOAL_FAILED, ToastKind::Error);

        assert!(!notifier.dismiss(first));
        assert_eq!(
            notifier.current().map(|t| t.kind),
            Some(ToastKind::Error)
        );
        assert!(notifier.dismiss(second));
        assert!(notifier.current().is_none());
    }
}
