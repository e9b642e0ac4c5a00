#![forbid(unsafe_code)]

//! The structured outcome handed to a dialog's callback.

use std::fmt;

use crate::request::Vars;

/// Result of a dismissed dialog.
#[derive(Clone, Default)]
pub struct DialogResult {
    /// The request's id, unchanged.
    pub id: Option<String>,
    /// The request's vars, same `Rc`.
    pub vars: Option<Vars>,
    /// `true` for OK/Continue/ENTER, `false` for Cancel/ESC.
    pub action: bool,
    /// Input contents at dismissal; empty unless the dialog was a prompt.
    pub value: String,
}

impl fmt::Debug for DialogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogResult")
            .field("id", &self.id)
            .field("vars", &self.vars.is_some())
            .field("action", &self.action)
            .field("value", &self.value)
            .finish()
    }
}

impl PartialEq for DialogResult {
    /// `vars` compare by identity.
    fn eq(&self, other: &Self) -> bool {
        let same_vars = match (&self.vars, &other.vars) {
            (None, None) => true,
            (Some(a), Some(b)) => std::rc::Rc::ptr_eq(a, b),
            _ => false,
        };
        same_vars && self.id == other.id && self.action == other.action && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn vars_compare_by_identity() {
        let a: Vars = Rc::new(String::from("x"));
        let b: Vars = Rc::new(String::from("x"));
        let left = DialogResult {
            vars: Some(Rc::clone(&a)),
            ..Default::default()
        };
        let same = DialogResult {
            vars: Some(a),
            ..Default::default()
        };
        let other = DialogResult {
            vars: Some(b),
            ..Default::default()
        };
        assert_eq!(left, same);
        assert_ne!(left, other);
    }

    #[test]
    fn default_is_negative_and_empty() {
        let result = DialogResult::default();
        assert!(!result.action);
        assert!(result.value.is_empty());
        assert!(result.id.is_none() && result.vars.is_none());
    }
}
