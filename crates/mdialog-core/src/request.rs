#![forbid(unsafe_code)]

//! Dialog requests as supplied by callers and as resolved for rendering.
//!
//! # Example
//!
//! ```
//! use mdialog_core::{DialogKind, DialogRequest};
//!
//! let request = DialogRequest::prompt("Name?", "Who are you?")
//!     .placeholder("e.g. Ann")
//!     .id("name1")
//!     .callback(|result| println!("{:?}", result.value));
//! assert_eq!(request.kind, Some(DialogKind::Prompt));
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::kind::DialogKind;
use crate::result::DialogResult;

/// Opaque caller data forwarded into the result by identity.
///
/// Callers keep their own clone of the `Rc` to observe later mutations or to
/// check identity with [`Rc::ptr_eq`].
pub type Vars = Rc<dyn Any>;

/// Completion callback. `FnOnce` because it runs at most once.
pub type Callback = Box<dyn FnOnce(DialogResult)>;

/// A partial dialog request; every field is optional.
#[derive(Default)]
pub struct DialogRequest {
    /// Which affordances appear.
    pub kind: Option<DialogKind>,
    /// Title text.
    pub title: Option<String>,
    /// Message text.
    pub content: Option<String>,
    /// Input placeholder, prompt only.
    pub placeholder: Option<String>,
    /// Opaque token round-tripped into the result.
    pub id: Option<String>,
    /// Opaque reference round-tripped into the result.
    pub vars: Option<Vars>,
    /// Invoked once with the result.
    pub callback: Option<Callback>,
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("placeholder", &self.placeholder)
            .field("id", &self.id)
            .field("vars", &self.vars.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl DialogRequest {
    /// An empty request; every field is defaulted at resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_kind(kind: DialogKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Create an alert request (message + OK).
    pub fn alert(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Alert, title, content)
    }

    /// Create a confirm request (message + Continue/Cancel).
    pub fn confirm(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Confirm, title, content)
    }

    /// Create a prompt request (message + input + OK/Cancel).
    pub fn prompt(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(DialogKind::Prompt, title, content)
    }

    /// Set the dialog kind.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<DialogKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the message.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the input placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the round-trip id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the round-trip vars.
    #[must_use]
    pub fn vars(mut self, vars: Vars) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Set the completion callback.
    #[must_use]
    pub fn callback(mut self, callback: impl FnOnce(DialogResult) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

/// A request with every defaultable field populated.
///
/// Produced by [`resolve`](crate::resolve::resolve). `title`, `content`,
/// the kind string and the three labels are never empty.
pub struct ResolvedRequest {
    /// Resolved kind.
    pub kind: DialogKind,
    /// Resolved title.
    pub title: String,
    /// Resolved message.
    pub content: String,
    /// Placeholder, empty when absent.
    pub placeholder: String,
    /// Primary label for alert/prompt.
    pub ok_text: String,
    /// Primary label for confirm.
    pub continue_text: String,
    /// Secondary label.
    pub cancel_text: String,
    /// Forwarded id.
    pub id: Option<String>,
    /// Forwarded vars.
    pub vars: Option<Vars>,
    /// Forwarded callback.
    pub callback: Option<Callback>,
}

impl fmt::Debug for ResolvedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRequest")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("placeholder", &self.placeholder)
            .field("ok_text", &self.ok_text)
            .field("continue_text", &self.continue_text)
            .field("cancel_text", &self.cancel_text)
            .field("id", &self.id)
            .field("vars", &self.vars.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl ResolvedRequest {
    /// Label for the primary button, per the kind's control table.
    #[must_use]
    pub fn primary_label(&self) -> &str {
        match self.kind.controls().primary_label {
            crate::kind::PrimaryLabel::Ok => &self.ok_text,
            crate::kind::PrimaryLabel::Continue => &self.continue_text,
        }
    }
}
