//! Clipboard capabilities and the text-field copy fallback.
//!
//! Copy operations are sequential compositions: try the asynchronous
//! clipboard capability, and if it is missing or fails, run the synchronous
//! staging fallback.

use std::future::Future;

use crate::error::ClipboardError;

// ============================================================================
// Capabilities
// ============================================================================

/// Asynchronous system clipboard.
///
/// Both writes are optional capabilities; hosts report availability through
/// [`supports_text`](Self::supports_text) and
/// [`supports_image`](Self::supports_image).
pub trait Clipboard {
    fn supports_text(&self) -> bool;

    fn supports_image(&self) -> bool;

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;

    fn write_image(&self, data: &[u8], mime: &str)
    -> impl Future<Output = Result<(), ClipboardError>>;
}

/// A transient, focusable, off-screen text field plus a synchronous copy
/// command.
pub trait CopyStaging {
    /// Handle to a staged field.
    type Field;

    /// Inserts a field holding `text`.
    fn stage(&mut self, text: &str) -> Result<Self::Field, ClipboardError>;

    /// Selects the field's whole content.
    fn select(&mut self, field: &Self::Field);

    /// Issues the synchronous copy command for the current selection.
    fn exec_copy(&mut self) -> Result<(), ClipboardError>;

    /// Removes the field from the document.
    fn remove(&mut self, field: Self::Field);
}

/// A clipboard with no capabilities; every copy goes through the fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn supports_text(&self) -> bool {
        false
    }

    fn supports_image(&self) -> bool {
        false
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported("write-text"))
    }

    async fn write_image(&self, _data: &[u8], _mime: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported("write-image"))
    }
}

// ============================================================================
// Fallback
// ============================================================================

/// Removes the staged field when dropped, whatever the copy outcome.
struct StagedField<'a, S: CopyStaging> {
    staging: &'a mut S,
    field: Option<S::Field>,
}

impl<S: CopyStaging> Drop for StagedField<'_, S> {
    fn drop(&mut self) {
        if let Some(field) = self.field.take() {
            self.staging.remove(field);
        }
    }
}

/// Copies `text` through a staged text field.
///
/// Never shows a toast itself; callers decide whether success is announced.
pub fn fallback_copy_text<S: CopyStaging>(
    staging: &mut S,
    text: &str,
) -> Result<(), ClipboardError> {
    let field = staging.stage(text)?;
    let guard = StagedField {
        staging,
        field: Some(field),
    };
    if let Some(field) = guard.field.as_ref() {
        guard.staging.select(field);
    }
    guard.staging.exec_copy()
}

/// Which path delivered a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy.
    Skipped,
    /// The asynchronous clipboard capability succeeded.
    Clipboard,
    /// The staging fallback succeeded.
    Fallback,
    /// Both paths failed; already logged.
    Failed,
}

impl CopyOutcome {
    pub fn is_copied(self) -> bool {
        matches!(self, Self::Clipboard | Self::Fallback)
    }
}

/// Tries the clipboard text write, falling back to the staging field.
pub async fn copy_text<C, S>(clipboard: &C, staging: &mut S, text: &str) -> CopyOutcome
where
    C: Clipboard,
    S: CopyStaging,
{
    if clipboard.supports_text() {
        match clipboard.write_text(text).await {
            Ok(()) => return CopyOutcome::Clipboard,
            Err(err) => log::debug!("clipboard text write failed, using fallback: {err}"),
        }
    }
    run_fallback(staging, text)
}

pub(crate) fn run_fallback<S: CopyStaging>(staging: &mut S, text: &str) -> CopyOutcome {
    match fallback_copy_text(staging, text) {
        Ok(()) => CopyOutcome::Fallback,
        Err(err) => {
            log::warn!("Failed to copy text: {err}");
            CopyOutcome::Failed
        }
    }
}

// ============================================================================
// Test doubles
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::{MockClipboard, MockStaging};
    use super::*;

    #[test]
    fn fallback_removes_field_on_success() {
        let mut staging = MockStaging::default();
        fallback_copy_text(&mut staging, "hi").unwrap();
        assert_eq!(staging.copied, vec!["hi"]);
        assert!(staging.live.is_empty());
    }

    #[test]
    fn fallback_removes_field_on_failure() {
        let mut staging = MockStaging {
            fail_copy: true,
            ..MockStaging::default()
        };
        assert!(fallback_copy_text(&mut staging, "hi").is_err());
        assert!(staging.live.is_empty());
    }

    #[test]
    fn clipboard_path_preferred() {
        let clipboard = MockClipboard::working();
        let mut staging = MockStaging::default();
        let outcome = pollster::block_on(copy_text(&clipboard, &mut staging, "⭐"));
        assert_eq!(outcome, CopyOutcome::Clipboard);
        assert_eq!(*clipboard.texts.borrow(), vec!["⭐"]);
        assert!(staging.staged.is_empty());
    }

    #[test]
    fn rejected_write_falls_back() {
        let clipboard = MockClipboard::failing();
        let mut staging = MockStaging::default();
        let outcome = pollster::block_on(copy_text(&clipboard, &mut staging, "⭐"));
        assert_eq!(outcome, CopyOutcome::Fallback);
        assert_eq!(staging.copied, vec!["⭐"]);
    }

    #[test]
    fn missing_capability_falls_back_without_calling() {
        let mut staging = MockStaging::default();
        let outcome = pollster::block_on(copy_text(&NoClipboard, &mut staging, "x"));
        assert_eq!(outcome, CopyOutcome::Fallback);
    }

    #[test]
    fn both_paths_failing_is_reported() {
        let clipboard = MockClipboard::failing();
        let mut staging = MockStaging {
            fail_copy: true,
            ..MockStaging::default()
        };
        let outcome = pollster::block_on(copy_text(&clipboard, &mut staging, "x"));
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!outcome.is_copied());
    }
}
