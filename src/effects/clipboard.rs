use serde_json::json;
use std::fmt;

use crate::config::SiteConfig;
use crate::telemetry::{log_event, LogLevel};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClipboardError {
    Unavailable,
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard API unavailable"),
            Self::Rejected(reason) => write!(f, "clipboard write rejected: {reason}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait ClipboardAccess {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Selection-and-copy through a detached text field.
    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

pub fn toast_text(message: &str) -> String {
    format!("✓  {message}")
}

/// Copies `text` and returns the toast to show. Both copy paths end in the
/// same toast.
pub async fn copy_text<C: ClipboardAccess>(
    config: &SiteConfig,
    clipboard: &C,
    text: &str,
    message: &str,
) -> String {
    if let Err(error) = clipboard.write_text(text).await {
        log_event(
            config,
            LogLevel::Debug,
            "clipboard_fallback",
            json!({ "reason": error.to_string() }),
        );

        if let Err(error) = clipboard.legacy_copy(text) {
            log_event(
                config,
                LogLevel::Warn,
                "clipboard_legacy_failed",
                json!({ "reason": error.to_string() }),
            );
        }
    }

    toast_text(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeClipboard {
        reject_write: bool,
        writes: RefCell<Vec<String>>,
        legacy: RefCell<Vec<String>>,
    }

    impl ClipboardAccess for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.reject_write {
                return Err(ClipboardError::Rejected("NotAllowedError".to_string()));
            }
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError> {
            self.legacy.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn successful_write_skips_legacy_path() {
        let clipboard = FakeClipboard::default();

        let toast = copy_text(&SiteConfig::default(), &clipboard, "me@example.com", "Email copied!").await;

        assert_eq!(toast, "✓  Email copied!");
        assert_eq!(clipboard.writes.borrow().as_slice(), ["me@example.com"]);
        assert!(clipboard.legacy.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejected_write_falls_back_and_still_toasts() {
        let clipboard = FakeClipboard {
            reject_write: true,
            ..FakeClipboard::default()
        };

        let toast = copy_text(&SiteConfig::default(), &clipboard, "+1 555 0100", "Phone copied!").await;

        assert_eq!(toast, "✓  Phone copied!");
        assert!(clipboard.writes.borrow().is_empty());
        assert_eq!(clipboard.legacy.borrow().as_slice(), ["+1 555 0100"]);
    }

    #[test]
    fn clipboard_errors_describe_the_failure() {
        assert_eq!(ClipboardError::Unavailable.to_string(), "clipboard API unavailable");
        assert_eq!(
            ClipboardError::Rejected("denied".to_string()).to_string(),
            "clipboard write rejected: denied"
        );
    }
}
