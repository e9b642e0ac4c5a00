#![forbid(unsafe_code)]

//! End-to-end dialog lifecycles against the in-memory document.
//!
//! # Invariants
//!
//! 1. **Exactly once**: every shown dialog calls back at most once, and
//!    once for any qualifying input.
//! 2. **Ordering**: when the callback runs, the surface is already gone and
//!    no listener of that dialog remains.
//! 3. **Identity**: `id` and `vars` come back unchanged, `vars` by pointer.
//!
//! Run: `cargo test -p mdialog-harness --test dialog_lifecycle`

use std::cell::Cell;
use std::rc::Rc;

use mdialog_core::{
    ActionMarker, DialogController, DialogRequest, DialogSettings, Key, Part, SettingsContext,
    Vars,
};
use mdialog_harness::{CallLog, MemoryDocument};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn setup() -> (MemoryDocument, DialogController<MemoryDocument>, CallLog) {
    let doc = MemoryDocument::new();
    let controller = DialogController::new(doc.clone(), SettingsContext::default());
    (doc, controller, CallLog::new())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn prompt_typed_then_enter() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(
            DialogRequest::new()
                .kind("prompt")
                .title("Name?")
                .placeholder("e.g. Ann")
                .id("name1")
                .callback(calls.recorder()),
        )
        .unwrap();

    let window = doc.top_window().unwrap();
    assert_eq!(window.find(Part::Title).unwrap().text, "Name?");
    assert_eq!(
        window.find(Part::Input).unwrap().attribute("placeholder"),
        Some("e.g. Ann")
    );
    assert_eq!(doc.focused_class(), Some("dialog-prompt-input"));

    assert!(doc.type_text("Ann"));
    assert!(calls.is_empty());
    doc.key_up(Key::Enter);

    let result = calls.single();
    assert_eq!(result.id.as_deref(), Some("name1"));
    assert!(result.action);
    assert_eq!(result.value, "Ann");
    assert!(result.vars.is_none());
}

#[test]
fn confirm_cancel_click() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(
            DialogRequest::new()
                .kind("confirm")
                .content("Proceed?")
                .callback(calls.recorder()),
        )
        .unwrap();

    assert!(doc.click_action(ActionMarker::Cancel));

    let result = calls.single();
    assert!(!result.action);
    assert_eq!(result.value, "");
    assert!(result.id.is_none());
}

// =============================================================================
// Transition table
// =============================================================================

#[test]
fn alert_offers_one_control_and_ignores_escape() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::alert("Saved", "Done.").callback(calls.recorder()))
        .unwrap();

    let window = doc.top_window().unwrap();
    assert_eq!(window.button_count(), 1);
    assert_eq!(window.find(Part::OkButton).unwrap().text, "OK");
    assert_eq!(window.count(Part::Prompt), 0);

    doc.key_up(Key::Escape);
    assert!(calls.is_empty());
    assert_eq!(doc.mounted_surfaces(), 1);

    doc.key_up(Key::Enter);
    assert!(calls.single().action);
}

#[test]
fn confirm_and_prompt_affirmative_paths() {
    for kind in ["confirm", "prompt"] {
        for via_key in [true, false] {
            let (doc, mut dialogs, calls) = setup();
            dialogs
                .show(DialogRequest::new().kind(kind).callback(calls.recorder()))
                .unwrap();
            if via_key {
                doc.key_up(Key::Enter);
            } else {
                assert!(doc.click_action(ActionMarker::Ok));
            }
            assert!(calls.single().action, "{kind} via_key={via_key}");
        }
    }
}

#[test]
fn confirm_and_prompt_negative_paths() {
    for kind in ["confirm", "prompt"] {
        for via_key in [true, false] {
            let (doc, mut dialogs, calls) = setup();
            dialogs
                .show(DialogRequest::new().kind(kind).callback(calls.recorder()))
                .unwrap();
            if via_key {
                doc.key_up(Key::Escape);
            } else {
                assert!(doc.click_action(ActionMarker::Cancel));
            }
            assert!(!calls.single().action, "{kind} via_key={via_key}");
        }
    }
}

#[test]
fn confirm_primary_reads_continue() {
    let (doc, mut dialogs, _calls) = setup();
    dialogs.show(DialogRequest::confirm("t", "c")).unwrap();
    let window = doc.top_window().unwrap();
    assert_eq!(window.find(Part::OkButton).unwrap().text, "Continue");
    assert_eq!(window.find(Part::CancelButton).unwrap().text, "Cancel");
    assert_eq!(doc.focused_class(), None);
}

#[test]
fn enter_resolves_even_while_typing_in_prompt() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::prompt("t", "c").callback(calls.recorder()))
        .unwrap();
    doc.type_text("half");
    doc.key_up(Key::Enter);
    assert_eq!(calls.single().value, "half");
}

#[test]
fn unknown_kind_is_alert_shaped() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::new().kind("toast").callback(calls.recorder()))
        .unwrap();
    let window = doc.top_window().unwrap();
    assert_eq!(window.attribute("data-dialog-type"), Some("toast"));
    assert_eq!(window.button_count(), 1);

    doc.key_up(Key::Escape);
    assert!(!doc.click_action(ActionMarker::Cancel));
    assert!(calls.is_empty());

    doc.key_up(Key::Enter);
    assert!(calls.single().action);
}

#[test]
fn click_in_action_region_off_buttons_keeps_dialog() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::confirm("t", "c").callback(calls.recorder()))
        .unwrap();
    assert!(doc.click_actions_region());
    assert!(calls.is_empty());
    assert_eq!(doc.mounted_surfaces(), 1);
    assert_eq!(doc.key_listener_count(), 1);
}

#[test]
fn other_keys_are_ignored() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::confirm("t", "c").callback(calls.recorder()))
        .unwrap();
    doc.key_up(Key::Other);
    doc.key_up(Key::from_key_code(32));
    assert!(calls.is_empty());
    doc.key_up(Key::from_dom("", 27));
    assert!(!calls.single().action);
}

// =============================================================================
// Exactly-once and ordering
// =============================================================================

#[test]
fn no_second_callback_after_resolution() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::prompt("t", "c").callback(calls.recorder()))
        .unwrap();
    doc.key_up(Key::Enter);
    doc.key_up(Key::Enter);
    doc.key_up(Key::Escape);
    assert!(!doc.click_action(ActionMarker::Ok));
    assert!(!doc.click_actions_region());
    assert_eq!(calls.len(), 1);
}

#[test]
fn surface_and_listeners_gone_when_callback_runs() {
    let (doc, mut dialogs, _) = setup();
    doc.append_content("page");
    let observed = Rc::new(Cell::new(None));
    let probe = doc.clone();
    let sink = Rc::clone(&observed);
    dialogs
        .show(DialogRequest::confirm("t", "c").callback(move |_| {
            sink.set(Some((
                probe.mounted_surfaces(),
                probe.key_listener_count(),
                probe.click_listener_count(),
            )));
        }))
        .unwrap();
    assert!(doc.last_child_is_dialog());
    assert_eq!(doc.body_len(), 2);

    doc.key_up(Key::Escape);
    assert_eq!(observed.get(), Some((0, 0, 0)));
    assert_eq!(doc.body_len(), 1);
}

#[test]
fn missing_callback_still_tears_down() {
    let (doc, mut dialogs, _) = setup();
    dialogs.show(DialogRequest::prompt("t", "c")).unwrap();
    doc.key_up(Key::Escape);
    assert_eq!(doc.mounted_surfaces(), 0);
    assert_eq!(doc.key_listener_count(), 0);
    assert_eq!(doc.focused_class(), None);
}

// =============================================================================
// Round-trip identity
// =============================================================================

#[test]
fn vars_round_trip_by_reference() {
    let (doc, mut dialogs, calls) = setup();
    let vars: Vars = Rc::new(Cell::new(1_u32));
    dialogs
        .show(
            DialogRequest::confirm("t", "c")
                .id("row-7")
                .vars(Rc::clone(&vars))
                .callback(calls.recorder()),
        )
        .unwrap();
    doc.key_up(Key::Enter);

    let result = calls.single();
    let returned = result.vars.unwrap();
    assert!(Rc::ptr_eq(&returned, &vars));
    returned.downcast_ref::<Cell<u32>>().unwrap().set(9);
    assert_eq!(vars.downcast_ref::<Cell<u32>>().unwrap().get(), 9);
    assert_eq!(result.id.as_deref(), Some("row-7"));
}

#[test]
fn absent_id_and_vars_stay_absent() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::new().callback(calls.recorder()))
        .unwrap();
    assert!(doc.click_action(ActionMarker::Ok));
    let result = calls.single();
    assert!(result.id.is_none());
    assert!(result.vars.is_none());
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn empty_request_renders_defaults_and_populates_settings() {
    let (doc, mut dialogs, _) = setup();
    dialogs.show(DialogRequest::new()).unwrap();
    let window = doc.top_window().unwrap();
    assert_eq!(window.attribute("data-dialog-type"), Some("alert"));
    assert_eq!(window.find(Part::Title).unwrap().text, "Message");
    assert_eq!(window.find(Part::Message).unwrap().text, "Missing text");

    let settings = dialogs.settings().snapshot();
    assert_eq!(
        settings,
        DialogSettings::new()
            .def_type("alert")
            .def_title("Message")
            .def_content("Missing text")
            .ok_text("OK")
            .continue_text("Continue")
            .cancel_text("Cancel")
    );
}

#[test]
fn settings_changes_apply_to_next_dialog() {
    let (doc, mut dialogs, _) = setup();
    dialogs.show(DialogRequest::prompt("first", "")).unwrap();
    dialogs.settings().update(|s| {
        s.ok_text = Some("Sure".into());
        s.cancel_text = Some("Nope".into());
    });
    let first = doc.top_window().unwrap();
    assert_eq!(first.find(Part::OkButton).unwrap().text, "OK");

    dialogs.show(DialogRequest::prompt("second", "")).unwrap();
    let second = doc.top_window().unwrap();
    assert_eq!(second.find(Part::OkButton).unwrap().text, "Sure");
    assert_eq!(second.find(Part::CancelButton).unwrap().text, "Nope");
}

#[test]
fn cleared_setting_falls_back_to_literal() {
    let (doc, mut dialogs, _) = setup();
    dialogs
        .settings()
        .update(|s| s.merge(DialogSettings::new().ok_text("Sure")));
    dialogs.show(DialogRequest::alert("t", "c")).unwrap();
    let custom = doc.top_window().unwrap();
    assert_eq!(custom.find(Part::OkButton).unwrap().text, "Sure");
    doc.key_up(Key::Enter);

    dialogs
        .settings()
        .update(|s| s.merge(DialogSettings::new().ok_text("")));
    dialogs.show(DialogRequest::alert("t", "c")).unwrap();
    let restored = doc.top_window().unwrap();
    assert_eq!(restored.find(Part::OkButton).unwrap().text, "OK");
    assert_eq!(dialogs.settings().snapshot().ok_text.as_deref(), Some("OK"));
}

#[test]
fn controller_exposes_its_host() {
    let (doc, mut dialogs, _) = setup();
    dialogs.host_mut().append_content("page");
    dialogs.show(DialogRequest::alert("t", "c")).unwrap();
    assert_eq!(dialogs.host().body_len(), 2);
    assert!(doc.last_child_is_dialog());
}

#[test]
fn settings_loaded_from_json() {
    let settings = DialogSettings::from_json(
        r#"{"defType":"confirm","continueText":"Avanti","cancelText":"Annulla"}"#,
    )
    .unwrap();
    let doc = MemoryDocument::new();
    let mut dialogs = DialogController::new(doc.clone(), SettingsContext::new(settings));
    dialogs.show(DialogRequest::new()).unwrap();
    let window = doc.top_window().unwrap();
    assert_eq!(window.attribute("data-dialog-type"), Some("confirm"));
    assert_eq!(window.find(Part::OkButton).unwrap().text, "Avanti");
    assert_eq!(window.find(Part::CancelButton).unwrap().text, "Annulla");
}

#[test]
fn controllers_can_share_one_context() {
    let shared = SettingsContext::new(DialogSettings::new().def_title("Shared"));
    let doc = MemoryDocument::new();
    let mut a = DialogController::new(doc.clone(), shared.clone());
    let mut b = DialogController::new(doc.clone(), shared);
    a.show(DialogRequest::new()).unwrap();
    b.settings().update(|s| s.def_title = Some("Changed".into()));
    a.show(DialogRequest::new()).unwrap();
    assert_eq!(
        doc.top_window().unwrap().find(Part::Title).unwrap().text,
        "Changed"
    );
    b.show(DialogRequest::new()).unwrap();
    assert_eq!(doc.mounted_surfaces(), 3);
}

// =============================================================================
// Overlapping dialogs (documented limitation)
// =============================================================================

#[test]
fn overlapping_dialogs_resolve_independently() {
    let (doc, mut dialogs, calls) = setup();
    let other = CallLog::new();
    dialogs
        .show(DialogRequest::alert("one", "").callback(calls.recorder()))
        .unwrap();
    dialogs
        .show(DialogRequest::confirm("two", "").callback(other.recorder()))
        .unwrap();
    assert_eq!(doc.mounted_surfaces(), 2);
    assert_eq!(doc.key_listener_count(), 2);

    // ESC reaches both key listeners; only the confirm reacts.
    doc.key_up(Key::Escape);
    assert!(calls.is_empty());
    assert!(!other.single().action);
    assert_eq!(doc.mounted_surfaces(), 1);

    assert!(doc.click_action(ActionMarker::Ok));
    assert!(calls.single().action);
    assert_eq!(doc.key_listener_count(), 0);
}

#[test]
fn enter_resolves_every_overlapping_dialog() {
    let (doc, mut dialogs, calls) = setup();
    for title in ["a", "b", "c"] {
        dialogs
            .show(DialogRequest::alert(title, "").callback(calls.recorder()))
            .unwrap();
    }
    doc.key_up(Key::Enter);
    assert_eq!(calls.len(), 3);
    assert!(calls.results().iter().all(|r| r.action));
    assert_eq!(doc.mounted_surfaces(), 0);
}

#[test]
fn handles_are_distinct_per_show() {
    let (_doc, mut dialogs, _) = setup();
    let a = dialogs.show(DialogRequest::new()).unwrap();
    let b = dialogs.show(DialogRequest::new()).unwrap();
    assert_ne!(a, b);
}

// =============================================================================
// Prompt value capture
// =============================================================================

#[test]
fn prompt_empty_value() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::prompt("t", "c").callback(calls.recorder()))
        .unwrap();
    assert!(doc.click_action(ActionMarker::Ok));
    assert_eq!(calls.single().value, "");
}

#[test]
fn prompt_cancel_still_reports_value() {
    let (doc, mut dialogs, calls) = setup();
    dialogs
        .show(DialogRequest::prompt("t", "c").callback(calls.recorder()))
        .unwrap();
    doc.type_text("draft");
    assert_eq!(doc.top_input_value().as_deref(), Some("draft"));
    doc.key_up(Key::Escape);
    let result = calls.single();
    assert!(!result.action);
    assert_eq!(result.value, "draft");
}

proptest! {
    #[test]
    fn prompt_value_is_literal(text in "[<>&\"' a-zA-Z0-9/=]{0,24}") {
        let (doc, mut dialogs, calls) = setup();
        dialogs
            .show(DialogRequest::prompt("t", "c").callback(calls.recorder()))
            .unwrap();
        prop_assert!(doc.set_input_value(&text));
        doc.key_up(Key::Enter);
        prop_assert_eq!(calls.single().value, text);
    }
}
