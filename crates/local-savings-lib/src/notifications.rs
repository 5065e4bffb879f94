use crate::data_structures::Severity;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TOAST_DURATION_MS: i64 = 3000;
pub const TOAST_FADE_MS: i64 = 300;

/// Fire-and-forget user notification.
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    message: String,
    severity: Severity,
    shown_at: DateTime<Utc>,
}

impl Toast {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }
}

/// Holds at most one toast. A new toast replaces whatever is showing.
#[derive(Debug, Clone)]
pub struct ToastCenter {
    current: Option<Toast>,
    duration: Duration,
    now: DateTime<Utc>,
}

impl ToastCenter {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_duration(now, Duration::milliseconds(DEFAULT_TOAST_DURATION_MS))
    }

    pub fn with_duration(now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            now,
        }
    }

    /// Moves the center's notion of "now"; new toasts are stamped with it.
    pub fn set_time(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn show(&mut self, message: &str, severity: Severity, now: DateTime<Utc>) {
        self.now = now;
        self.current = Some(Toast {
            message: message.to_string(),
            severity,
            shown_at: now,
        });
    }

    /// The toast still on screen at `now`, fading or not.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now < toast.shown_at + self.duration + Duration::milliseconds(TOAST_FADE_MS))
    }

    pub fn is_fading(&self, now: DateTime<Utc>) -> bool {
        self.visible_at(now)
            .map(|toast| now >= toast.shown_at + self.duration)
            .unwrap_or(false)
    }

    /// Drops the toast once it has fully faded out.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.now = now;
        if self.visible_at(now).is_none() {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

impl Notifier for ToastCenter {
    fn notify(&mut self, message: &str, severity: Severity) {
        let now = self.now;
        self.show(message, severity, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut toasts = ToastCenter::new(start());
        toasts.show("Added to favorites", Severity::Info, start());

        assert!(toasts.visible_at(start() + Duration::milliseconds(2999)).is_some());
        assert!(!toasts.is_fading(start() + Duration::milliseconds(2999)));
        assert!(toasts.is_fading(start() + Duration::milliseconds(3100)));
        assert!(toasts.visible_at(start() + Duration::milliseconds(3300)).is_none());

        toasts.prune(start() + Duration::milliseconds(3300));
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_new_toast_preempts_prior() {
        let mut toasts = ToastCenter::new(start());
        toasts.show("first", Severity::Info, start());
        toasts.show("second", Severity::Error, start() + Duration::seconds(1));

        let visible = toasts.visible_at(start() + Duration::seconds(3)).unwrap();
        assert_eq!(visible.message(), "second");
        assert_eq!(visible.severity(), Severity::Error);
    }

    #[test]
    fn test_notifier_stamps_with_current_time() {
        let mut toasts = ToastCenter::new(start());
        toasts.set_time(start() + Duration::seconds(10));
        toasts.notify("saved", Severity::Success);
        assert_eq!(
            toasts.current().unwrap().shown_at(),
            start() + Duration::seconds(10)
        );
    }
}
