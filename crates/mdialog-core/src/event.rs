#![forbid(unsafe_code)]

//! Input events as the controller sees them.
//!
//! Hosts translate their native events into [`DialogEvent`]s: a key release
//! on the document becomes [`DialogEvent::KeyUp`]; a click inside the action
//! region becomes [`DialogEvent::Click`] carrying the target's `data-action`
//! marker, if any. The controller never looks at targets itself.

/// Keys the dialog reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    /// Anything else; never causes a transition.
    Other,
}

impl Key {
    /// Legacy `keyCode` for ENTER.
    pub const ENTER_CODE: u32 = 13;
    /// Legacy `keyCode` for ESC.
    pub const ESCAPE_CODE: u32 = 27;

    /// Decode a DOM keyboard event from its `key` name, falling back to the
    /// legacy `keyCode` when the name is missing or unrecognized.
    #[must_use]
    pub fn from_dom(key: &str, key_code: u32) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::from_key_code(key_code),
        }
    }

    /// Decode a legacy `keyCode`.
    #[must_use]
    pub const fn from_key_code(code: u32) -> Self {
        match code {
            Self::ENTER_CODE => Self::Enter,
            Self::ESCAPE_CODE => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Marker carried by action buttons in their `data-action` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMarker {
    /// Primary button (`data-action="ok"`).
    Ok,
    /// Secondary button (`data-action="cancel"`).
    Cancel,
}

impl ActionMarker {
    /// Attribute name the marker lives in.
    pub const ATTRIBUTE: &'static str = "data-action";

    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Cancel => "cancel",
        }
    }

    /// Parse an attribute value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ok" => Some(Self::Ok),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// An event delivered to a live dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// A key was released anywhere in the document.
    KeyUp(Key),
    /// The action region was clicked. `marker` is the raw `data-action`
    /// value of the event target (`None` if the attribute is absent).
    Click { marker: Option<String> },
}

impl DialogEvent {
    /// Click on an element carrying `marker`.
    #[must_use]
    pub fn click(marker: ActionMarker) -> Self {
        Self::Click {
            marker: Some(marker.as_str().to_owned()),
        }
    }

    /// Click on an unmarked element inside the action region.
    #[must_use]
    pub fn click_unmarked() -> Self {
        Self::Click { marker: None }
    }
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    EnterKey,
    EscapeKey,
    PrimaryClick,
    SecondaryClick,
}

impl Trigger {
    /// The `action` value this trigger resolves with.
    #[must_use]
    pub const fn action(self) -> bool {
        matches!(self, Self::EnterKey | Self::PrimaryClick)
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnterKey => "enter",
            Self::EscapeKey => "escape",
            Self::PrimaryClick => "primary",
            Self::SecondaryClick => "secondary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_take_precedence() {
        assert_eq!(Key::from_dom("Enter", 0), Key::Enter);
        assert_eq!(Key::from_dom("Escape", 0), Key::Escape);
        assert_eq!(Key::from_dom("Esc", 0), Key::Escape);
    }

    #[test]
    fn legacy_codes_fill_in() {
        assert_eq!(Key::from_dom("", 13), Key::Enter);
        assert_eq!(Key::from_dom("Unidentified", 27), Key::Escape);
        assert_eq!(Key::from_dom("a", 65), Key::Other);
    }

    #[test]
    fn marker_round_trip() {
        for marker in [ActionMarker::Ok, ActionMarker::Cancel] {
            assert_eq!(ActionMarker::parse(marker.as_str()), Some(marker));
        }
        assert_eq!(ActionMarker::parse("OK"), None);
        assert_eq!(ActionMarker::parse(""), None);
    }

    #[test]
    fn trigger_actions() {
        assert!(Trigger::EnterKey.action());
        assert!(Trigger::PrimaryClick.action());
        assert!(!Trigger::EscapeKey.action());
        assert!(!Trigger::SecondaryClick.action());
    }
}
