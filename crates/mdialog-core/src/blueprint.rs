#![forbid(unsafe_code)]

//! Host-agnostic description of a dialog surface.
//!
//! A [`SurfaceBlueprint`] lists exactly what a host must build, with the
//! stable class names host stylesheets target. Every host lays the parts out
//! in the same tree:
//!
//! ```text
//! dialog-window [data-dialog-type=<kind>]
//! └── dialog-wrapper
//!     ├── dialog-title
//!     └── dialog-body
//!         ├── dialog-message
//!         ├── dialog-prompt            (prompt only)
//!         │   └── dialog-prompt-input
//!         └── dialog-actions
//!             ├── dialog-ok-button     [data-action=ok]
//!             └── dialog-cancel-button [data-action=cancel] (confirm/prompt)
//! ```
//!
//! Text is always set as literal text content; markup in titles or messages
//! is never interpreted.

use crate::event::ActionMarker;
use crate::request::ResolvedRequest;

/// Attribute on the window that mirrors the resolved kind.
pub const TYPE_ATTRIBUTE: &str = "data-dialog-type";

/// A distinct, styleable part of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Window,
    Wrapper,
    Title,
    Body,
    Message,
    Prompt,
    Input,
    Actions,
    OkButton,
    CancelButton,
}

impl Part {
    /// Stable class name for this part.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Window => "dialog-window",
            Self::Wrapper => "dialog-wrapper",
            Self::Title => "dialog-title",
            Self::Body => "dialog-body",
            Self::Message => "dialog-message",
            Self::Prompt => "dialog-prompt",
            Self::Input => "dialog-prompt-input",
            Self::Actions => "dialog-actions",
            Self::OkButton => "dialog-ok-button",
            Self::CancelButton => "dialog-cancel-button",
        }
    }
}

/// One action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Which part this is (ok or cancel button).
    pub part: Part,
    /// Marker written to `data-action`.
    pub marker: ActionMarker,
    /// Visible label.
    pub label: String,
}

/// The text input, present for prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    /// Placeholder, possibly empty.
    pub placeholder: String,
    /// Whether the input receives focus right after attachment.
    pub autofocus: bool,
}

/// Everything a host needs to build one dialog surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceBlueprint {
    /// Value of [`TYPE_ATTRIBUTE`].
    pub kind: String,
    /// Title text.
    pub title: String,
    /// Message text.
    pub message: String,
    /// Input, if the kind has one.
    pub input: Option<InputSpec>,
    /// Buttons in document order; the primary button is always first.
    pub buttons: Vec<ButtonSpec>,
}

impl SurfaceBlueprint {
    /// Build the blueprint for a resolved request using the kind's control table.
    #[must_use]
    pub fn from_request(request: &ResolvedRequest) -> Self {
        let controls = request.kind.controls();

        let mut buttons = vec![ButtonSpec {
            part: Part::OkButton,
            marker: ActionMarker::Ok,
            label: request.primary_label().to_owned(),
        }];
        if controls.secondary {
            buttons.push(ButtonSpec {
                part: Part::CancelButton,
                marker: ActionMarker::Cancel,
                label: request.cancel_text.clone(),
            });
        }

        Self {
            kind: request.kind.as_str().to_owned(),
            title: request.title.clone(),
            message: request.content.clone(),
            input: controls.input.then(|| InputSpec {
                placeholder: request.placeholder.clone(),
                autofocus: true,
            }),
            buttons,
        }
    }

    /// The button carrying `marker`, if this surface has one.
    #[must_use]
    pub fn button(&self, marker: ActionMarker) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.marker == marker)
    }
}
