#![forbid(unsafe_code)]

//! In-memory document host.
//!
//! [`MemoryDocument`] behaves like the parts of a browser document the
//! dialog touches: an ordered body, document-level key-up listeners,
//! per-surface click listeners on the action region, a single focused
//! input, and input values that survive detachment. Input is simulated
//! with [`MemoryDocument::key_up`], [`MemoryDocument::type_text`] and
//! [`MemoryDocument::click_action`].
//!
//! Dispatch follows the DOM: the listener list is snapshotted when an event
//! fires, so listeners added during dispatch wait for the next event, and a
//! listener removed during dispatch is skipped if it has not run yet.
//!
//! # Failure injection
//!
//! | Switch | Effect |
//! |--------|--------|
//! | [`MemoryDocument::without_body`] | `mount` fails with `NoBody` |
//! | [`MemoryDocument::fail_next_mount`] | next `mount` fails with `Host` |
//! | [`MemoryDocument::fail_next_listen`] | next `listen` fails with `Host` |

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mdialog_core::{
    ActionMarker, DialogError, DialogEvent, DialogHost, DialogSurface, EventListeners, EventSink,
    Key, Part, SurfaceBlueprint,
};

use crate::element::Element;

/// A node in the body.
#[derive(Debug, Clone)]
enum BodyNode {
    /// Pre-existing page content, identified by a label.
    Content(String),
    /// A dialog window.
    Dialog(Rc<SurfaceNode>),
}

#[derive(Debug)]
struct SurfaceNode {
    key: u64,
    window: Element,
    has_input: bool,
    value: RefCell<String>,
}

enum ListenerTarget {
    Document,
    Actions(u64),
}

struct Listener {
    id: u64,
    target: ListenerTarget,
    sink: EventSink,
}

#[derive(Default)]
struct DocState {
    has_body: bool,
    body: Vec<BodyNode>,
    focused: Option<u64>,
    listeners: Vec<Listener>,
    next_id: u64,
    fail_mount: Cell<bool>,
    fail_listen: Cell<bool>,
}

impl DocState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn dialogs(&self) -> impl DoubleEndedIterator<Item = &Rc<SurfaceNode>> {
        self.body.iter().filter_map(|node| match node {
            BodyNode::Dialog(surface) => Some(surface),
            BodyNode::Content(_) => None,
        })
    }

    fn sinks(&self, wanted: impl Fn(&ListenerTarget) -> bool) -> Vec<(u64, EventSink)> {
        self.listeners
            .iter()
            .filter(|l| wanted(&l.target))
            .map(|l| (l.id, Rc::clone(&l.sink)))
            .collect()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }
}

/// In-memory document implementing [`DialogHost`].
///
/// Cloning yields another handle to the same document, so tests can hand one
/// clone to a controller and drive input through another.
#[derive(Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocState>>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryDocument")
            .field("body_len", &state.body.len())
            .field("listeners", &state.listeners.len())
            .field("focused", &state.focused)
            .finish()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty document with a body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(DocState {
                has_body: true,
                ..DocState::default()
            })),
        }
    }

    /// A document without a body; every mount fails.
    #[must_use]
    pub fn without_body() -> Self {
        let doc = Self::new();
        doc.state.borrow_mut().has_body = false;
        doc
    }

    /// Make the next `mount` fail.
    pub fn fail_next_mount(&self) {
        self.state.borrow().fail_mount.set(true);
    }

    /// Make the next `listen` fail.
    pub fn fail_next_listen(&self) {
        self.state.borrow().fail_listen.set(true);
    }

    /// Append page content to the body.
    pub fn append_content(&self, label: impl Into<String>) {
        self.state
            .borrow_mut()
            .body
            .push(BodyNode::Content(label.into()));
    }

    // --- Simulated input ---

    /// Release `key` on the document.
    pub fn key_up(&self, key: Key) {
        self.fire(
            |t| matches!(t, ListenerTarget::Document),
            &DialogEvent::KeyUp(key),
        );
    }

    /// Type `text` into the focused input, one character at a time, firing a
    /// key-up for each. Returns `false` if no input has focus.
    pub fn type_text(&self, text: &str) -> bool {
        for ch in text.chars() {
            let typed = {
                let state = self.state.borrow();
                match focused_node(&state) {
                    Some(node) => {
                        node.value.borrow_mut().push(ch);
                        true
                    }
                    None => false,
                }
            };
            if !typed {
                return false;
            }
            self.key_up(Key::Other);
        }
        true
    }

    /// Replace the focused input's value without key events (paste).
    /// Returns `false` if no input has focus.
    pub fn set_input_value(&self, value: &str) -> bool {
        let state = self.state.borrow();
        match focused_node(&state) {
            Some(node) => {
                *node.value.borrow_mut() = value.to_owned();
                true
            }
            None => false,
        }
    }

    /// Click the button carrying `marker` on the topmost dialog that has
    /// one. Returns `false` if no such button is attached.
    pub fn click_action(&self, marker: ActionMarker) -> bool {
        let part = match marker {
            ActionMarker::Ok => Part::OkButton,
            ActionMarker::Cancel => Part::CancelButton,
        };
        let target = {
            let state = self.state.borrow();
            state
                .dialogs()
                .rev()
                .find(|d| d.window.find(part).is_some())
                .map(|d| d.key)
        };
        match target {
            Some(key) => {
                self.click_on(key, Some(marker.as_str().to_owned()));
                true
            }
            None => false,
        }
    }

    /// Click the topmost dialog's action region outside both buttons.
    /// Returns `false` if no dialog is attached.
    pub fn click_actions_region(&self) -> bool {
        let target = self.state.borrow().dialogs().last().map(|d| d.key);
        match target {
            Some(key) => {
                self.click_on(key, None);
                true
            }
            None => false,
        }
    }

    fn click_on(&self, key: u64, marker: Option<String>) {
        self.fire(
            |t| matches!(t, ListenerTarget::Actions(k) if *k == key),
            &DialogEvent::Click { marker },
        );
    }

    fn fire(&self, wanted: impl Fn(&ListenerTarget) -> bool, event: &DialogEvent) {
        let snapshot = self.state.borrow().sinks(wanted);
        for (id, sink) in snapshot {
            if self.state.borrow().is_registered(id) {
                sink(event);
            }
        }
    }

    // --- Inspection ---

    /// Number of body children, page content included.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.state.borrow().body.len()
    }

    /// Number of attached dialog windows.
    #[must_use]
    pub fn mounted_surfaces(&self) -> usize {
        self.state.borrow().dialogs().count()
    }

    /// Whether the last body child is a dialog window.
    #[must_use]
    pub fn last_child_is_dialog(&self) -> bool {
        matches!(self.state.borrow().body.last(), Some(BodyNode::Dialog(_)))
    }

    /// Copy of the topmost dialog window.
    #[must_use]
    pub fn top_window(&self) -> Option<Element> {
        self.state
            .borrow()
            .dialogs()
            .last()
            .map(|d| d.window.clone())
    }

    /// Class name of the focused element, if an attached input has focus.
    #[must_use]
    pub fn focused_class(&self) -> Option<&'static str> {
        focused_node(&self.state.borrow()).map(|_| Part::Input.class_name())
    }

    /// Value of the topmost attached input.
    #[must_use]
    pub fn top_input_value(&self) -> Option<String> {
        self.state
            .borrow()
            .dialogs()
            .rev()
            .find(|d| d.has_input)
            .map(|d| d.value.borrow().clone())
    }

    /// Number of document key-up listeners.
    #[must_use]
    pub fn key_listener_count(&self) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| matches!(l.target, ListenerTarget::Document))
            .count()
    }

    /// Number of action-region click listeners.
    #[must_use]
    pub fn click_listener_count(&self) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| matches!(l.target, ListenerTarget::Actions(_)))
            .count()
    }
}

fn focused_node(state: &DocState) -> Option<&Rc<SurfaceNode>> {
    let key = state.focused?;
    state.dialogs().find(|d| d.key == key && d.has_input)
}

/// A dialog window attached to a [`MemoryDocument`].
pub struct MemorySurface {
    state: Rc<RefCell<DocState>>,
    node: Rc<SurfaceNode>,
}

impl std::fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySurface")
            .field("key", &self.node.key)
            .field("value", &self.node.value.borrow())
            .finish()
    }
}

impl DialogSurface for MemorySurface {
    fn focus_input(&mut self) {
        if self.node.has_input {
            self.state.borrow_mut().focused = Some(self.node.key);
        }
    }

    fn input_value(&self) -> String {
        self.node.value.borrow().clone()
    }

    fn detach(&mut self) {
        let mut state = self.state.borrow_mut();
        let key = self.node.key;
        state
            .body
            .retain(|n| !matches!(n, BodyNode::Dialog(d) if d.key == key));
        if state.focused == Some(key) {
            state.focused = None;
        }
    }
}

/// Listeners installed for one dialog on a [`MemoryDocument`].
pub struct MemoryListeners {
    state: Rc<RefCell<DocState>>,
    ids: Vec<u64>,
}

impl std::fmt::Debug for MemoryListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryListeners").field("ids", &self.ids).finish()
    }
}

impl EventListeners for MemoryListeners {
    fn remove(&mut self) {
        let ids = std::mem::take(&mut self.ids);
        self.state
            .borrow_mut()
            .listeners
            .retain(|l| !ids.contains(&l.id));
    }
}

impl DialogHost for MemoryDocument {
    type Surface = MemorySurface;
    type Listeners = MemoryListeners;

    fn mount(&mut self, blueprint: &SurfaceBlueprint) -> Result<MemorySurface, DialogError> {
        let mut state = self.state.borrow_mut();
        if !state.has_body {
            return Err(DialogError::NoBody);
        }
        if state.fail_mount.replace(false) {
            return Err(DialogError::Host("appendChild rejected".into()));
        }
        let key = state.next_id();
        let node = Rc::new(SurfaceNode {
            key,
            window: Element::from_blueprint(blueprint),
            has_input: blueprint.input.is_some(),
            value: RefCell::new(String::new()),
        });
        state.body.push(BodyNode::Dialog(Rc::clone(&node)));
        tracing::trace!(key, kind = %blueprint.kind, "memory surface mounted");
        Ok(MemorySurface {
            state: Rc::clone(&self.state),
            node,
        })
    }

    fn listen(
        &mut self,
        surface: &MemorySurface,
        sink: EventSink,
    ) -> Result<MemoryListeners, DialogError> {
        let mut state = self.state.borrow_mut();
        if state.fail_listen.replace(false) {
            return Err(DialogError::Host("addEventListener rejected".into()));
        }
        let key_id = state.next_id();
        let click_id = state.next_id();
        state.listeners.push(Listener {
            id: key_id,
            target: ListenerTarget::Document,
            sink: Rc::clone(&sink),
        });
        state.listeners.push(Listener {
            id: click_id,
            target: ListenerTarget::Actions(surface.node.key),
            sink,
        });
        Ok(MemoryListeners {
            state: Rc::clone(&self.state),
            ids: vec![key_id, click_id],
        })
    }
}
