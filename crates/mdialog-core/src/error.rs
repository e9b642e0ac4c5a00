#![forbid(unsafe_code)]

//! Host-side failures.
//!
//! The dialog contract itself never fails: missing fields are defaulted,
//! unknown kinds degrade to alert, stray clicks are ignored. The errors here
//! only cover the plumbing a host can get wrong (no document, a rejected DOM
//! call, malformed settings JSON).

/// Errors from host operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The host has no document to render into.
    NoDocument,
    /// The document has no body to attach the surface to.
    NoBody,
    /// A host DOM operation was rejected.
    Host(String),
    /// Settings could not be parsed.
    InvalidSettings(String),
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDocument => write!(f, "no document available"),
            Self::NoBody => write!(f, "document has no body"),
            Self::Host(msg) => write!(f, "host operation failed: {msg}"),
            Self::InvalidSettings(msg) => write!(f, "invalid dialog settings: {msg}"),
        }
    }
}

impl std::error::Error for DialogError {}
