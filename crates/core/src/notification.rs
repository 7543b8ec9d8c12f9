//! Notifications shown to the operator after a load or write.

use crate::messages;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Why a request failed, as far as the operator is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server could not be reached or the connection broke.
    Network,
    /// Missing or rejected credentials.
    Unauthorized,
    /// The payload was rejected, client- or server-side.
    Validation,
    /// The slide was deleted in the meantime.
    NotFound,
    /// The server failed or answered with something unexpected.
    Server,
}

impl FailureKind {
    /// Generic operator message for this kind of failure.
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Network => messages::NETWORK_FAILURE,
            FailureKind::Unauthorized => messages::UNAUTHORIZED_FAILURE,
            FailureKind::Validation => messages::VALIDATION_FAILURE,
            FailureKind::NotFound => messages::NOT_FOUND_FAILURE,
            FailureKind::Server => messages::SERVER_FAILURE,
        }
    }
}

/// A toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
    /// Set on error notifications.
    pub failure: Option<FailureKind>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
            failure: None,
        }
    }

    /// An error notification titled after the failed action, described
    /// by the failure detail.
    pub fn error(title: impl Into<String>, failure: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: Some(detail.into()),
            failure: Some(failure),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_kind_has_a_distinct_message() {
        let kinds = [
            FailureKind::Network,
            FailureKind::Unauthorized,
            FailureKind::Validation,
            FailureKind::NotFound,
            FailureKind::Server,
        ];
        let mut seen: Vec<&str> = kinds.iter().map(|k| k.user_message()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), kinds.len());
    }

    #[test]
    fn error_notification_carries_failure() {
        let n = Notification::error(messages::DELETE_FAILED, FailureKind::NotFound, "gone");
        assert!(n.is_error());
        assert_eq!(n.failure, Some(FailureKind::NotFound));
        assert_eq!(n.description.as_deref(), Some("gone"));
    }

    #[test]
    fn success_notification_has_no_description() {
        let n = Notification::success(messages::SLIDE_CREATED);
        assert!(!n.is_error());
        assert_eq!(n.title, "Slide creado exitosamente");
        assert_eq!(n.description, None);
    }
}
