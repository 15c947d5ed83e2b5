// safecp/src/clipboard.rs
//! The arboard-backed clipboard provider.
//!
//! Wraps `arboard::Clipboard` behind the `ClipboardProvider` capability from
//! `safecp-core`. An unavailable clipboard at construction time means the
//! host environment is unsupported, which is fatal at startup; transient
//! read/write failures afterwards are surfaced as provider errors and
//! retried by the monitor.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use safecp_core::{ClipboardProvider, SafecpError};

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .context("Clipboard is not available on this host; unsupported environment")?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read(&mut self) -> Result<Option<String>, SafecpError> {
        match self.inner.get_text() {
            Ok(text) => Ok(Some(text)),
            // No text on the clipboard (or non-text content) is not an error.
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(SafecpError::Provider(e.to_string())),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), SafecpError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| SafecpError::Provider(e.to_string()))
    }
}
