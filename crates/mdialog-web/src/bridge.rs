#![forbid(unsafe_code)]

//! Conversions between plain JS objects and mdialog values.
//!
//! Reading is total and follows JS truthiness for text: a missing, `null`,
//! or falsy field is absent, numbers and `true` are shown as their JS string
//! form, and a non-object argument reads as an empty request. `id` and
//! `vars` are the exception: only `undefined` is absent, so `null` round
//! trips as `null`.

use std::rc::Rc;

use js_sys::{Function, Number, Object, Reflect};
use mdialog_core::{DialogError, DialogKind, DialogRequest, DialogResult, DialogSettings, Vars};
use wasm_bindgen::{JsCast, JsValue};

fn raw_field(obj: &JsValue, key: &str) -> Option<JsValue> {
    if !obj.is_object() {
        return None;
    }
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined())
}

fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    raw_field(obj, key).filter(|v| !v.is_null())
}

fn text_field(obj: &JsValue, key: &str) -> Option<String> {
    let value = field(obj, key)?;
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if !value.is_truthy() {
        return None;
    }
    if let Some(n) = value.as_f64() {
        return Number::from(n).to_string(10).ok().map(String::from);
    }
    value.as_bool().map(|b| b.to_string())
}

fn string_field(obj: &JsValue, key: &str) -> Option<String> {
    field(obj, key).and_then(|v| v.as_string())
}

fn set(obj: &Object, key: &str, value: &JsValue) {
    // Defining a data property on a fresh plain object cannot fail.
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

/// Build a request from a JS parameter object.
///
/// Recognized keys: `type`, `title`, `content`, `placeholder`, `id`, `vars`,
/// `callback`. The raw `id` and `vars` values are handed back to the
/// callback untouched, so object identity survives the round trip.
#[must_use]
pub fn request_from_js(params: &JsValue) -> DialogRequest {
    let mut request = DialogRequest::new();
    request.kind = text_field(params, "type").map(DialogKind::from);
    request.title = text_field(params, "title");
    request.content = text_field(params, "content");
    request.placeholder = text_field(params, "placeholder");

    let raw_id = raw_field(params, "id");
    request.id = raw_id.as_ref().and_then(JsValue::as_string);
    request.vars = raw_field(params, "vars").map(|v| Rc::new(v) as Vars);

    if let Some(function) = field(params, "callback").and_then(|f| f.dyn_into::<Function>().ok()) {
        let raw_id = raw_id.unwrap_or(JsValue::UNDEFINED);
        request.callback = Some(Box::new(move |result: DialogResult| {
            let payload = result_to_js(&result, &raw_id);
            if let Err(err) = function.call1(&JsValue::NULL, &payload) {
                crate::report(&DialogError::Host(format!(
                    "dialog callback threw: {}",
                    err.as_string().unwrap_or_else(|| format!("{err:?}"))
                )));
            }
        }));
    }
    request
}

/// The `{ id, action, value, vars }` object passed to a JS callback.
///
/// `vars` is returned as the same JS value when it came from
/// [`request_from_js`]; Rust-side vars of any other type read as
/// `undefined`.
#[must_use]
pub fn result_to_js(result: &DialogResult, id: &JsValue) -> Object {
    let obj = Object::new();
    set(&obj, "id", id);
    set(&obj, "action", &JsValue::from_bool(result.action));
    set(&obj, "value", &JsValue::from_str(&result.value));
    let vars = result
        .vars
        .as_ref()
        .and_then(|v| v.downcast_ref::<JsValue>())
        .cloned()
        .unwrap_or(JsValue::UNDEFINED);
    set(&obj, "vars", &vars);
    obj
}

const SETTINGS_KEYS: [&str; 6] = [
    "defType",
    "defTitle",
    "defContent",
    "okText",
    "continueText",
    "cancelText",
];

fn slots(settings: &mut DialogSettings) -> [&mut Option<String>; 6] {
    [
        &mut settings.def_type,
        &mut settings.def_title,
        &mut settings.def_content,
        &mut settings.ok_text,
        &mut settings.continue_text,
        &mut settings.cancel_text,
    ]
}

/// Read a (possibly partial) settings object with camelCase keys.
#[must_use]
pub fn settings_from_js(obj: &JsValue) -> DialogSettings {
    let mut settings = DialogSettings::new();
    for (key, slot) in SETTINGS_KEYS.into_iter().zip(slots(&mut settings)) {
        *slot = string_field(obj, key);
    }
    settings
}

/// Current settings as a plain object; unset fields are omitted.
#[must_use]
pub fn settings_to_js(settings: &DialogSettings) -> Object {
    let obj = Object::new();
    let mut copy = settings.clone();
    for (key, slot) in SETTINGS_KEYS.into_iter().zip(slots(&mut copy)) {
        if let Some(value) = slot.as_deref() {
            set(&obj, key, &JsValue::from_str(value));
        }
    }
    obj
}
