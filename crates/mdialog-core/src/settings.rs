#![forbid(unsafe_code)]

//! Default settings and the shared context that holds them.
//!
//! [`DialogSettings`] stores the six host-configurable defaults. Unset or
//! empty fields fall back to built-in literals; [`DialogSettings::fill_defaults`]
//! writes those literals back into the record, which is how resolution
//! lazily populates the shared settings on first use.
//!
//! [`SettingsContext`] is a cheap, cloneable handle to one settings record.
//! A controller holds whichever context the host gives it; the thread-local
//! [`SettingsContext::global`] is the process-wide binding the JS entry point
//! uses.
//!
//! # Invariants
//!
//! 1. After `fill_defaults()`, every field is `Some` and non-empty.
//! 2. Updates made through any clone of a context are visible to all clones.
//! 3. Changes apply to the next resolution only; already-rendered dialogs
//!    keep the labels they were built with.

use std::cell::RefCell;
use std::rc::Rc;

use crate::request::{DialogRequest, ResolvedRequest};
use crate::resolve::resolve;

/// Built-in default type.
pub const DEFAULT_TYPE: &str = "alert";
/// Built-in default title.
pub const DEFAULT_TITLE: &str = "Message";
/// Built-in default content.
pub const DEFAULT_CONTENT: &str = "Missing text";
/// Built-in OK label.
pub const DEFAULT_OK_TEXT: &str = "OK";
/// Built-in continue label.
pub const DEFAULT_CONTINUE_TEXT: &str = "Continue";
/// Built-in cancel label.
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

thread_local! {
    static GLOBAL_SETTINGS: SettingsContext = SettingsContext::default();
}

/// Host-configurable dialog defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct DialogSettings {
    /// Default dialog type.
    pub def_type: Option<String>,
    /// Default title.
    pub def_title: Option<String>,
    /// Default message.
    pub def_content: Option<String>,
    /// Primary button label for alert and prompt.
    pub ok_text: Option<String>,
    /// Primary button label for confirm.
    pub continue_text: Option<String>,
    /// Secondary button label.
    pub cancel_text: Option<String>,
}

fn fill(slot: &mut Option<String>, literal: &str) {
    if slot.as_deref().is_none_or(str::is_empty) {
        *slot = Some(literal.to_owned());
    }
}

fn read<'a>(slot: &'a Option<String>, literal: &'a str) -> &'a str {
    match slot.as_deref() {
        Some(value) if !value.is_empty() => value,
        _ => literal,
    }
}

impl DialogSettings {
    /// Create an empty settings record (every field falls back to its literal).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default type.
    #[must_use]
    pub fn def_type(mut self, value: impl Into<String>) -> Self {
        self.def_type = Some(value.into());
        self
    }

    /// Set the default title.
    #[must_use]
    pub fn def_title(mut self, value: impl Into<String>) -> Self {
        self.def_title = Some(value.into());
        self
    }

    /// Set the default content.
    #[must_use]
    pub fn def_content(mut self, value: impl Into<String>) -> Self {
        self.def_content = Some(value.into());
        self
    }

    /// Set the OK label.
    #[must_use]
    pub fn ok_text(mut self, value: impl Into<String>) -> Self {
        self.ok_text = Some(value.into());
        self
    }

    /// Set the continue label.
    #[must_use]
    pub fn continue_text(mut self, value: impl Into<String>) -> Self {
        self.continue_text = Some(value.into());
        self
    }

    /// Set the cancel label.
    #[must_use]
    pub fn cancel_text(mut self, value: impl Into<String>) -> Self {
        self.cancel_text = Some(value.into());
        self
    }

    /// Write the built-in literal into every unset or empty field.
    pub fn fill_defaults(&mut self) {
        fill(&mut self.def_type, DEFAULT_TYPE);
        fill(&mut self.def_title, DEFAULT_TITLE);
        fill(&mut self.def_content, DEFAULT_CONTENT);
        fill(&mut self.ok_text, DEFAULT_OK_TEXT);
        fill(&mut self.continue_text, DEFAULT_CONTINUE_TEXT);
        fill(&mut self.cancel_text, DEFAULT_CANCEL_TEXT);
    }

    /// Effective default type.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        read(&self.def_type, DEFAULT_TYPE)
    }

    /// Effective default title.
    #[must_use]
    pub fn effective_title(&self) -> &str {
        read(&self.def_title, DEFAULT_TITLE)
    }

    /// Effective default content.
    #[must_use]
    pub fn effective_content(&self) -> &str {
        read(&self.def_content, DEFAULT_CONTENT)
    }

    /// Effective OK label.
    #[must_use]
    pub fn effective_ok_text(&self) -> &str {
        read(&self.ok_text, DEFAULT_OK_TEXT)
    }

    /// Effective continue label.
    #[must_use]
    pub fn effective_continue_text(&self) -> &str {
        read(&self.continue_text, DEFAULT_CONTINUE_TEXT)
    }

    /// Effective cancel label.
    #[must_use]
    pub fn effective_cancel_text(&self) -> &str {
        read(&self.cancel_text, DEFAULT_CANCEL_TEXT)
    }

    /// Overlay the fields `other` sets onto `self`.
    ///
    /// Fields `other` leaves unset keep their current value, so hosts can
    /// push partial updates. A field set to the empty string clears the
    /// slot, so the literal default applies again.
    pub fn merge(&mut self, other: Self) {
        let pairs = [
            (&mut self.def_type, other.def_type),
            (&mut self.def_title, other.def_title),
            (&mut self.def_content, other.def_content),
            (&mut self.ok_text, other.ok_text),
            (&mut self.continue_text, other.continue_text),
            (&mut self.cancel_text, other.cancel_text),
        ];
        for (slot, value) in pairs {
            match value {
                Some(value) if value.is_empty() => *slot = None,
                Some(value) => *slot = Some(value),
                None => {}
            }
        }
    }

    /// Parse settings from a JSON object using the camelCase keys
    /// (`defType`, `defTitle`, `defContent`, `okText`, `continueText`,
    /// `cancelText`). Missing keys stay unset.
    ///
    /// # Errors
    ///
    /// [`DialogError::InvalidSettings`](crate::DialogError::InvalidSettings)
    /// if the input is not a JSON object of optional strings.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::DialogError> {
        serde_json::from_str(json).map_err(|e| crate::DialogError::InvalidSettings(e.to_string()))
    }
}

/// Shared, mutable handle to a [`DialogSettings`] record.
#[derive(Clone, Debug, Default)]
pub struct SettingsContext {
    inner: Rc<RefCell<DialogSettings>>,
}

impl SettingsContext {
    /// Create a context owning `settings`.
    #[must_use]
    pub fn new(settings: DialogSettings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(settings)),
        }
    }

    /// Access the process-wide settings (thread-local).
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_SETTINGS.with(Clone::clone)
    }

    /// Copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> DialogSettings {
        self.inner.borrow().clone()
    }

    /// Mutate the settings in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut DialogSettings) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Replace the settings wholesale, returning the previous record.
    pub fn replace(&self, settings: DialogSettings) -> DialogSettings {
        self.inner.replace(settings)
    }

    /// Resolve `request` against these settings.
    ///
    /// Populates missing settings fields as a side effect.
    pub fn resolve(&self, request: DialogRequest) -> ResolvedRequest {
        resolve(request, &mut self.inner.borrow_mut())
    }

    /// Whether two handles share the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
