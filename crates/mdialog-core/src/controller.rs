#![forbid(unsafe_code)]

//! Dialog controller and the per-dialog dismissal state machine.
//!
//! [`DialogController::show`] resolves a request, mounts its surface, focuses
//! the input for prompts, and installs listeners. The call returns right
//! away; the dialog resolves later when the host dispatches a qualifying
//! event.
//!
//! # State machine
//!
//! A [`LiveDialog`] is `ACTIVE` while it owns its surface and listeners and
//! `RESOLVED` once it has given them up. The transition is the `take()` of
//! that ownership, followed immediately by listener removal, so no second
//! event can reach the dialog after the first qualifying one.
//!
//! | Event                 | alert / other | confirm | prompt |
//! |-----------------------|---------------|---------|--------|
//! | ENTER key-up          | `true`        | `true`  | `true` |
//! | ESC key-up            | ignored       | `false` | `false`|
//! | click `ok`            | `true`        | `true`  | `true` |
//! | click `cancel`        | ignored       | `false` | `false`|
//! | click without marker  | ignored       | ignored | ignored|
//!
//! # Invariants
//!
//! 1. **Exactly once**: a live dialog yields at most one [`Resolution`]; the
//!    callback is `FnOnce` and is consumed by it.
//! 2. **Ordering**: listeners are removed, then the surface is detached,
//!    then the input value is read; the callback runs only after all three,
//!    and outside any borrow of the dialog, so it may open another dialog.
//! 3. **Identity**: `id` and `vars` move from the request into the result
//!    untouched.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Mount fails | No document/body, DOM error | `show` returns the error, nothing attached |
//! | Listen fails | Listener registration rejected | Surface detached, error returned, callback dropped uncalled |
//! | Re-entrant event | Host dispatches during a transition | Dropped |

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::blueprint::SurfaceBlueprint;
use crate::error::DialogError;
use crate::event::{ActionMarker, DialogEvent, Key, Trigger};
use crate::host::{DialogHost, DialogSurface, EventListeners, EventSink};
use crate::kind::DialogKind;
use crate::request::{Callback, DialogRequest, ResolvedRequest, Vars};
use crate::result::DialogResult;
use crate::settings::SettingsContext;

/// Global counter for dialog handles.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of one shown dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogHandle(u64);

impl DialogHandle {
    fn next() -> Self {
        Self(DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// The outcome of a transition, not yet delivered.
pub struct Resolution {
    /// Dialog that resolved.
    pub handle: DialogHandle,
    /// What caused it.
    pub trigger: Trigger,
    /// Result for the callback.
    pub result: DialogResult,
    callback: Option<Callback>,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("handle", &self.handle)
            .field("trigger", &self.trigger)
            .field("result", &self.result)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Resolution {
    /// Invoke the callback, if any. Returns whether one ran.
    pub fn deliver(self) -> bool {
        match self.callback {
            Some(callback) => {
                callback(self.result);
                true
            }
            None => false,
        }
    }
}

struct Attached<S, L> {
    surface: S,
    listeners: Option<L>,
}

/// One dialog between render and its first qualifying event.
pub struct LiveDialog<S, L> {
    handle: DialogHandle,
    kind: DialogKind,
    id: Option<String>,
    vars: Option<Vars>,
    callback: Option<Callback>,
    attached: Option<Attached<S, L>>,
}

/// A live dialog shared between its listeners.
pub type SharedDialog<S, L> = Rc<RefCell<LiveDialog<S, L>>>;

impl<S: DialogSurface, L: EventListeners> LiveDialog<S, L> {
    fn new(handle: DialogHandle, request: ResolvedRequest, surface: S) -> Self {
        Self {
            handle,
            kind: request.kind,
            id: request.id,
            vars: request.vars,
            callback: request.callback,
            attached: Some(Attached {
                surface,
                listeners: None,
            }),
        }
    }

    /// Handle of this dialog.
    #[must_use]
    pub fn handle(&self) -> DialogHandle {
        self.handle
    }

    /// Resolved kind.
    #[must_use]
    pub fn kind(&self) -> &DialogKind {
        &self.kind
    }

    /// Whether the dialog is still waiting for input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.attached.is_some()
    }

    fn surface(&self) -> Option<&S> {
        self.attached.as_ref().map(|a| &a.surface)
    }

    fn set_listeners(&mut self, listeners: L) {
        match self.attached.as_mut() {
            Some(attached) => attached.listeners = Some(listeners),
            None => {
                let mut listeners = listeners;
                listeners.remove();
            }
        }
    }

    /// Map an event to a transition per the kind's control table.
    fn classify(&self, event: &DialogEvent) -> Option<Trigger> {
        let controls = self.kind.controls();
        match event {
            DialogEvent::KeyUp(Key::Enter) => Some(Trigger::EnterKey),
            DialogEvent::KeyUp(Key::Escape) if controls.escape_cancels => {
                Some(Trigger::EscapeKey)
            }
            DialogEvent::KeyUp(_) => None,
            DialogEvent::Click { marker } => {
                match marker.as_deref().and_then(ActionMarker::parse)? {
                    ActionMarker::Ok => Some(Trigger::PrimaryClick),
                    ActionMarker::Cancel if controls.secondary => Some(Trigger::SecondaryClick),
                    ActionMarker::Cancel => None,
                }
            }
        }
    }

    /// Feed one event. Returns the resolution on the first qualifying event
    /// and `None` for everything else, including every event after that.
    pub fn dispatch(&mut self, event: &DialogEvent) -> Option<Resolution> {
        if !self.is_active() {
            return None;
        }
        let Some(trigger) = self.classify(event) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(handle = self.handle.id(), ?event, "dialog event ignored");
            return None;
        };

        let Attached {
            mut surface,
            listeners,
        } = self.attached.take()?;
        if let Some(mut listeners) = listeners {
            listeners.remove();
        }
        surface.detach();
        let value = surface.input_value();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            handle = self.handle.id(),
            kind = %self.kind,
            trigger = trigger.name(),
            "dialog resolved"
        );

        Some(Resolution {
            handle: self.handle,
            trigger,
            result: DialogResult {
                id: self.id.take(),
                vars: self.vars.take(),
                action: trigger.action(),
                value,
            },
            callback: self.callback.take(),
        })
    }

    /// Tear down without resolving; the callback is dropped uncalled.
    fn abandon(&mut self) {
        if let Some(Attached {
            mut surface,
            listeners,
        }) = self.attached.take()
        {
            if let Some(mut listeners) = listeners {
                listeners.remove();
            }
            surface.detach();
        }
        self.callback = None;
    }
}

/// Dispatch `event` to a shared dialog and deliver any resolution after the
/// borrow is released. Returns whether a callback ran.
///
/// Events arriving while the dialog is already borrowed (re-entrant host
/// dispatch during a transition) are dropped.
pub fn dispatch_shared<S, L>(dialog: &SharedDialog<S, L>, event: &DialogEvent) -> bool
where
    S: DialogSurface,
    L: EventListeners,
{
    let resolution = match dialog.try_borrow_mut() {
        Ok(mut live) => live.dispatch(event),
        Err(_) => None,
    };
    resolution.is_some_and(Resolution::deliver)
}

/// Shows dialogs on a host using a settings context.
pub struct DialogController<H> {
    host: H,
    settings: SettingsContext,
}

impl<H: std::fmt::Debug> std::fmt::Debug for DialogController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogController")
            .field("host", &self.host)
            .field("settings", &self.settings.snapshot())
            .finish()
    }
}

impl<H> DialogController<H>
where
    H: DialogHost,
    H::Surface: 'static,
    H::Listeners: 'static,
{
    /// Create a controller with an explicit settings context.
    pub fn new(host: H, settings: SettingsContext) -> Self {
        Self { host, settings }
    }

    /// Create a controller bound to the process-wide settings.
    pub fn with_global_settings(host: H) -> Self {
        Self::new(host, SettingsContext::global())
    }

    /// Settings this controller resolves against.
    pub fn settings(&self) -> &SettingsContext {
        &self.settings
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Resolve `request` and show it.
    ///
    /// # Errors
    ///
    /// Host failures only; see [`DialogController::show_resolved`].
    pub fn show(&mut self, request: DialogRequest) -> Result<DialogHandle, DialogError> {
        let resolved = self.settings.resolve(request);
        self.show_resolved(resolved)
    }

    /// Show an already-resolved request.
    ///
    /// # Errors
    ///
    /// Returns the host's error if mounting or listener registration fails.
    /// In either case no surface stays attached and the callback never runs.
    pub fn show_resolved(&mut self, request: ResolvedRequest) -> Result<DialogHandle, DialogError> {
        let handle = DialogHandle::next();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "dialog_show",
            handle = handle.id(),
            kind = %request.kind,
        )
        .entered();

        let blueprint = SurfaceBlueprint::from_request(&request);
        let mut surface = self.host.mount(&blueprint)?;
        if blueprint.input.as_ref().is_some_and(|input| input.autofocus) {
            surface.focus_input();
        }

        let live: SharedDialog<H::Surface, H::Listeners> =
            Rc::new(RefCell::new(LiveDialog::new(handle, request, surface)));

        let sink: EventSink = {
            let live = Rc::clone(&live);
            Rc::new(move |event: &crate::event::DialogEvent| {
                dispatch_shared(&live, event);
            })
        };

        let listened = {
            let dialog = live.borrow();
            match dialog.surface() {
                Some(surface) => self.host.listen(surface, sink),
                None => return Ok(handle),
            }
        };

        match listened {
            Ok(listeners) => {
                live.borrow_mut().set_listeners(listeners);
                #[cfg(feature = "tracing")]
                tracing::debug!("dialog shown");
                Ok(handle)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "dialog listeners could not be installed");
                live.borrow_mut().abandon();
                Err(err)
            }
        }
    }
}
