use std::collections::VecDeque;

use tokio::time::Instant;
use uuid::Uuid;

use crate::notify::Notification;

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    expires_at: Instant,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct ToastTray {
    toasts: VecDeque<Toast>,
}

impl ToastTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        let expires_at = now + notification.display_for;
        self.toasts.push_back(Toast {
            notification,
            expires_at,
        });
    }

    /// Remove a toast before its time is up.
    pub fn dismiss(&mut self, id: Uuid) -> Option<Notification> {
        let idx = self.toasts.iter().position(|t| t.notification.id == id)?;
        self.toasts.remove(idx).map(|t| t.notification)
    }

    pub fn dismiss_oldest(&mut self) -> Option<Notification> {
        self.toasts.pop_front().map(|t| t.notification)
    }

    /// Drop every toast whose display time has run out and return them.
    pub fn expire(&mut self, now: Instant) -> Vec<Notification> {
        let mut expired = Vec::new();
        self.toasts.retain(|t| {
            if t.expires_at <= now {
                expired.push(t.notification.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter().map(|t| &t.notification)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// When the next toast will expire, if any are shown.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.toasts.iter().map(|t| t.expires_at).min()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_expires_after_display_duration() {
        let start = Instant::now();
        let mut tray = ToastTray::new();
        tray.push(Notification::warning("first"), start);
        tray.push(Notification::error("second"), start + Duration::from_secs(4));

        assert!(tray.expire(start + Duration::from_millis(9_999)).is_empty());
        assert_eq!(tray.next_expiry(), Some(start + Duration::from_secs(10)));

        let gone = tray.expire(start + Duration::from_secs(10));
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].message, "first");
        assert_eq!(tray.len(), 1);

        let gone = tray.expire(start + Duration::from_secs(14));
        assert_eq!(gone[0].message, "second");
        assert!(tray.is_empty());
        assert_eq!(tray.next_expiry(), None);
    }

    #[test]
    fn test_dismiss_by_id() {
        let now = Instant::now();
        let mut tray = ToastTray::new();
        let keep = Notification::warning("keep");
        let dismissed = Notification::error("drop");
        let drop_id = dismissed.id;
        tray.push(keep, now);
        tray.push(dismissed, now);

        assert_eq!(tray.dismiss(drop_id).unwrap().message, "drop");
        assert!(tray.dismiss(drop_id).is_none());
        let left: Vec<_> = tray.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(left, ["keep"]);

        assert_eq!(tray.dismiss_oldest().unwrap().message, "keep");
        assert!(tray.dismiss_oldest().is_none());
    }
}
