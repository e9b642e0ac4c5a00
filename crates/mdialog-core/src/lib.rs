#![forbid(unsafe_code)]

//! Non-blocking alert/confirm/prompt dialogs.
//!
//! `mdialog-core` owns everything that does not touch a real document:
//! default resolution, the control table per dialog kind, the surface
//! blueprint, and the dismissal state machine that guarantees a single
//! callback per dialog. Hosts plug in through [`DialogHost`].
//!
//! # Example
//!
//! ```ignore
//! use mdialog_core::{DialogController, DialogRequest};
//!
//! let mut dialogs = DialogController::with_global_settings(host);
//! dialogs.show(
//!     DialogRequest::confirm("Delete file?", "This cannot be undone.")
//!         .callback(|result| if result.action { delete() }),
//! )?;
//! ```

pub mod blueprint;
pub mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod kind;
pub mod request;
pub mod resolve;
pub mod result;
pub mod settings;

pub use blueprint::{ButtonSpec, InputSpec, Part, SurfaceBlueprint, TYPE_ATTRIBUTE};
pub use controller::{
    DialogController, DialogHandle, LiveDialog, Resolution, SharedDialog, dispatch_shared,
};
pub use error::DialogError;
pub use event::{ActionMarker, DialogEvent, Key, Trigger};
pub use host::{DialogHost, DialogSurface, EventListeners, EventSink};
pub use kind::{ControlSet, DialogKind, PrimaryLabel};
pub use request::{Callback, DialogRequest, ResolvedRequest, Vars};
pub use resolve::resolve;
pub use result::DialogResult;
pub use settings::{DialogSettings, SettingsContext};
