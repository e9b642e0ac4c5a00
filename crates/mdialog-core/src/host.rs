#![forbid(unsafe_code)]

//! The seam between the controller and whatever document it renders into.
//!
//! A host knows how to turn a [`SurfaceBlueprint`] into visible elements and
//! how to route native input into a dialog. The browser host lives in
//! `mdialog-web`; an in-memory host for tests lives in `mdialog-harness`.
//!
//! # Lifecycle
//!
//! 1. [`DialogHost::mount`] builds the surface and appends it as the last
//!    child of the document body.
//! 2. [`DialogHost::listen`] installs a document-level key-up listener and a
//!    click listener on the surface's action region, both forwarding to the
//!    given [`EventSink`]. The returned [`EventListeners`] object owns them.
//! 3. On resolution the controller calls [`EventListeners::remove`], then
//!    [`DialogSurface::detach`], in that order.

use std::rc::Rc;

use crate::blueprint::SurfaceBlueprint;
use crate::error::DialogError;
use crate::event::DialogEvent;

/// Receives translated input events for one live dialog.
pub type EventSink = Rc<dyn Fn(&DialogEvent)>;

/// A mounted dialog surface.
pub trait DialogSurface {
    /// Move keyboard focus into the text input. No-op without an input.
    fn focus_input(&mut self);

    /// Current text of the input; empty if the surface has none.
    fn input_value(&self) -> String;

    /// Remove the surface from the document.
    fn detach(&mut self);
}

/// Installed listeners for one live dialog.
pub trait EventListeners {
    /// Deregister every listener. Events dispatched afterwards never reach
    /// the sink.
    fn remove(&mut self);
}

/// A document that can show dialogs.
pub trait DialogHost {
    type Surface: DialogSurface;
    type Listeners: EventListeners;

    /// Build `blueprint` and attach it as the last child of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or body is missing, or an element
    /// operation is rejected. Nothing stays attached on error.
    fn mount(&mut self, blueprint: &SurfaceBlueprint) -> Result<Self::Surface, DialogError>;

    /// Wire key-up (document) and click (action region) input to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener cannot be registered. Listeners that
    /// were registered before the failure are removed again.
    fn listen(
        &mut self,
        surface: &Self::Surface,
        sink: EventSink,
    ) -> Result<Self::Listeners, DialogError>;
}
