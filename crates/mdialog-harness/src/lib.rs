#![forbid(unsafe_code)]

//! Test harness for mdialog.
//!
//! Provides [`MemoryDocument`], a [`DialogHost`](mdialog_core::DialogHost)
//! that mirrors the DOM behavior the dialog depends on, and [`CallLog`], a
//! recorder for completion callbacks.
//!
//! ```
//! use mdialog_core::{DialogController, DialogRequest, Key, SettingsContext};
//! use mdialog_harness::{CallLog, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let calls = CallLog::new();
//! let mut dialogs = DialogController::new(doc.clone(), SettingsContext::default());
//! dialogs
//!     .show(DialogRequest::prompt("Name?", "").callback(calls.recorder()))
//!     .unwrap();
//! doc.type_text("Ann");
//! doc.key_up(Key::Enter);
//! assert_eq!(calls.single().value, "Ann");
//! ```

pub mod document;
pub mod element;

pub use document::{MemoryDocument, MemoryListeners, MemorySurface};
pub use element::Element;

use std::cell::RefCell;
use std::rc::Rc;

use mdialog_core::DialogResult;

/// Records every result passed to callbacks created by [`CallLog::recorder`].
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<DialogResult>>>,
}

impl CallLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends its result to this log.
    pub fn recorder(&self) -> impl FnOnce(DialogResult) + 'static {
        let calls = Rc::clone(&self.calls);
        move |result| calls.borrow_mut().push(result)
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether no call was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// All recorded results.
    #[must_use]
    pub fn results(&self) -> Vec<DialogResult> {
        self.calls.borrow().clone()
    }

    /// The only recorded result.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one call was recorded.
    #[must_use]
    pub fn single(&self) -> DialogResult {
        let calls = self.calls.borrow();
        assert_eq!(calls.len(), 1, "expected exactly one callback, got {}", calls.len());
        calls[0].clone()
    }
}
