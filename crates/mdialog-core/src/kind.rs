#![forbid(unsafe_code)]

//! Dialog kinds and the control table that drives them.
//!
//! Each kind maps to a [`ControlSet`] describing which affordances the
//! rendered surface carries and which keys may dismiss it. The table is the
//! single source of truth for the alert/confirm/prompt policy; adding a kind
//! means adding a row, never relying on match fallthrough.
//!
//! | Kind      | Input | Secondary button | ESC cancels | Primary label |
//! |-----------|-------|------------------|-------------|---------------|
//! | `alert`   | no    | no               | no          | OK            |
//! | `confirm` | no    | yes              | yes         | Continue      |
//! | `prompt`  | yes   | yes              | yes         | OK            |
//! | other     | no    | no               | no          | OK            |

use std::fmt;

/// Dialog type variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// Message with a single OK button.
    #[default]
    Alert,
    /// Message with Continue + Cancel.
    Confirm,
    /// Message with a text input + OK + Cancel.
    Prompt,
    /// Unrecognized type string, kept verbatim for the type discriminator.
    ///
    /// Behaves exactly like [`DialogKind::Alert`].
    Other(String),
}

/// Which label the primary button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryLabel {
    /// The settings' OK text.
    Ok,
    /// The settings' continue text.
    Continue,
}

/// Controls and key policy for one dialog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSet {
    /// Whether the text input is attached.
    pub input: bool,
    /// Whether the cancel button is attached.
    pub secondary: bool,
    /// Whether ESC dismisses with `action = false`.
    pub escape_cancels: bool,
    /// Label used on the primary button.
    pub primary_label: PrimaryLabel,
}

const ALERT_CONTROLS: ControlSet = ControlSet {
    input: false,
    secondary: false,
    escape_cancels: false,
    primary_label: PrimaryLabel::Ok,
};

const CONFIRM_CONTROLS: ControlSet = ControlSet {
    input: false,
    secondary: true,
    escape_cancels: true,
    primary_label: PrimaryLabel::Continue,
};

const PROMPT_CONTROLS: ControlSet = ControlSet {
    input: true,
    secondary: true,
    escape_cancels: true,
    primary_label: PrimaryLabel::Ok,
};

impl DialogKind {
    /// Parse a type string. Total: unknown strings become [`DialogKind::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "alert" => Self::Alert,
            "confirm" => Self::Confirm,
            "prompt" => Self::Prompt,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The type string written to the surface's discriminator attribute.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
            Self::Other(s) => s,
        }
    }

    /// Empty type strings count as "not supplied" during resolution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Look up the control set for this kind.
    #[must_use]
    pub const fn controls(&self) -> ControlSet {
        match self {
            Self::Confirm => CONFIRM_CONTROLS,
            Self::Prompt => PROMPT_CONTROLS,
            Self::Alert | Self::Other(_) => ALERT_CONTROLS,
        }
    }
}

impl From<&str> for DialogKind {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for DialogKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "alert" | "confirm" | "prompt" => Self::parse(&value),
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
