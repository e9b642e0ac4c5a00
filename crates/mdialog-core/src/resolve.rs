#![forbid(unsafe_code)]

//! Merge a partial request with the settings defaults.
//!
//! # Invariants
//!
//! 1. **Total**: every input, including an empty request and empty settings,
//!    resolves.
//! 2. **Non-empty output**: the resolved kind string, title, content and the
//!    three labels are never empty.
//! 3. **Labels are not per-call**: button labels come from settings only.
//! 4. **Shared mutation**: unset settings fields are populated with their
//!    literals, so a host reading the settings after the first dialog sees
//!    the effective defaults.

use crate::kind::DialogKind;
use crate::request::{DialogRequest, ResolvedRequest};
use crate::settings::DialogSettings;

fn pick(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Resolve `partial` against `settings`.
pub fn resolve(partial: DialogRequest, settings: &mut DialogSettings) -> ResolvedRequest {
    settings.fill_defaults();

    let kind = partial
        .kind
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| DialogKind::parse(settings.effective_type()));

    ResolvedRequest {
        kind,
        title: pick(partial.title, settings.effective_title()),
        content: pick(partial.content, settings.effective_content()),
        placeholder: partial.placeholder.unwrap_or_default(),
        ok_text: settings.effective_ok_text().to_owned(),
        continue_text: settings.effective_continue_text().to_owned(),
        cancel_text: settings.effective_cancel_text().to_owned(),
        id: partial.id,
        vars: partial.vars,
        callback: partial.callback,
    }
}
