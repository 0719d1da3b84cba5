//! Clipboard access for the copy actions.

use std::time::Duration;
#[cfg(target_os = "linux")]
use std::time::Instant;

#[cfg(target_os = "linux")]
use arboard::SetExtLinux;
use thiserror::Error;

/// How long a copy keeps serving the selection when nothing takes it over.
pub const CLIPBOARD_HANDOVER: Duration = Duration::from_secs(10);

/// A failed clipboard write. Callers swallow it; the copy control simply
/// never shows its confirmation.
#[derive(Error, Debug)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Destination of the copy actions.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    handover: Duration,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        Ok(Self {
            inner,
            handover: CLIPBOARD_HANDOVER,
        })
    }

    /// Sets how long a write may block while handing the text over.
    pub fn with_handover(mut self, handover: Duration) -> Self {
        self.handover = handover;
        self
    }

    pub fn handover(&self) -> Duration {
        self.handover
    }
}

impl Clipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        // X11 and Wayland selections are served by the owning process, so the
        // text would vanish when we exit. Block until a clipboard manager
        // takes ownership or the handover deadline passes.
        self.inner
            .set()
            .wait_until(Instant::now() + self.handover)
            .text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handover_default_is_bounded() {
        assert!(CLIPBOARD_HANDOVER > Duration::ZERO);
        assert!(CLIPBOARD_HANDOVER <= Duration::from_secs(30));
    }

    #[test]
    fn test_with_handover_overrides_default() {
        // Given: a display may be absent on the test host
        let Ok(clipboard) = SystemClipboard::new() else {
            return;
        };

        // When: a shorter handover is requested
        let clipboard = clipboard.with_handover(Duration::from_millis(50));

        // Then: writes use it
        assert_eq!(clipboard.handover(), Duration::from_millis(50));
    }
}
