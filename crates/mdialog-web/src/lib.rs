#![forbid(unsafe_code)]

//! Browser host for mdialog.
//!
//! Exposes three functions to JavaScript:
//!
//! | Export | Behavior |
//! |--------|----------|
//! | `dialog(params)` | Show an alert, confirm, or prompt dialog |
//! | `dialogSettings()` | Current default texts as a plain object |
//! | `setDialogSettings(obj)` | Merge fields into the defaults; `""` restores a built-in |
//!
//! ```js
//! dialog({
//!   type: "prompt",
//!   title: "Rename",
//!   content: "New name:",
//!   id: "rename-1",
//!   callback: ({ id, action, value }) => { if (action) rename(id, value); },
//! });
//! ```
//!
//! `dialog` never throws. Host failures (no document, no body, a rejected
//! DOM call) are reported as console warnings, or through `tracing` with the
//! `tracing` feature, and the callback is not invoked.
//!
//! Rust code running in the page can skip the JS object layer and call
//! [`show`] with a [`DialogRequest`] directly.

mod bridge;
pub mod host;

pub use bridge::{request_from_js, result_to_js, settings_from_js, settings_to_js};
pub use host::{WebHost, WebListeners, WebSurface};

use mdialog_core::{DialogController, DialogError, DialogHandle, DialogRequest, SettingsContext};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

/// Show a dialog in the current window's document with the global settings.
///
/// # Errors
///
/// Any [`DialogError`] raised while building the surface or installing its
/// listeners. Nothing stays attached and the callback is dropped uncalled.
pub fn show(request: DialogRequest) -> Result<DialogHandle, DialogError> {
    let host = WebHost::from_window()?;
    DialogController::with_global_settings(host).show(request)
}

/// JS entry point: `dialog({ type, title, content, placeholder, id, vars, callback })`.
#[wasm_bindgen(js_name = dialog)]
pub fn dialog(params: JsValue) {
    if let Err(err) = show(request_from_js(&params)) {
        report(&err);
    }
}

/// JS entry point: `dialogSettings()`.
#[wasm_bindgen(js_name = dialogSettings)]
#[must_use]
pub fn dialog_settings() -> JsValue {
    settings_to_js(&SettingsContext::global().snapshot()).into()
}

/// JS entry point: `setDialogSettings({ okText: "Yes", ... })`.
///
/// Missing fields leave the current value in place; an empty string clears
/// the field back to its built-in default.
#[wasm_bindgen(js_name = setDialogSettings)]
pub fn set_dialog_settings(settings: JsValue) {
    let patch = settings_from_js(&settings);
    SettingsContext::global().update(|current| current.merge(patch));
}

pub(crate) fn report(err: &DialogError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(error = %err, "mdialog host error");
    #[cfg(not(feature = "tracing"))]
    web_sys::console::warn_1(&JsValue::from_str(&format!("mdialog: {err}")));
}
