#![forbid(unsafe_code)]

//! DOM implementation of [`DialogHost`].
//!
//! The surface is built with `document.createElement`, text is assigned via
//! `textContent` (never parsed as markup), and the window is appended as the
//! last child of `document.body`. The key-up listener sits on the document;
//! the click listener sits on the action region and reads `data-action`
//! from the event target.

use std::rc::Rc;

use mdialog_core::{
    ActionMarker, DialogError, DialogEvent, DialogHost, DialogSurface, EventListeners, EventSink,
    Key, Part, SurfaceBlueprint, TYPE_ATTRIBUTE,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent, MouseEvent};

pub(crate) fn js_error(err: wasm_bindgen::JsValue) -> DialogError {
    DialogError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Dialog host bound to one browser document.
#[derive(Debug, Clone)]
pub struct WebHost {
    document: Document,
}

impl WebHost {
    /// Host for an explicit document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host for the current window's document.
    ///
    /// # Errors
    ///
    /// [`DialogError::NoDocument`] outside a browser window.
    pub fn from_window() -> Result<Self, DialogError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or(DialogError::NoDocument)
    }

    fn part(&self, tag: &str, part: Part) -> Result<Element, DialogError> {
        let el = self.document.create_element(tag).map_err(js_error)?;
        el.set_class_name(part.class_name());
        Ok(el)
    }
}

/// A mounted dialog window.
#[derive(Debug)]
pub struct WebSurface {
    window: Element,
    actions: Element,
    input: HtmlInputElement,
}

impl DialogSurface for WebSurface {
    fn focus_input(&mut self) {
        if let Err(err) = self.input.focus() {
            crate::report(&js_error(err));
        }
    }

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn detach(&mut self) {
        self.window.remove();
    }
}

/// The key-up and click listeners of one dialog.
pub struct WebListeners {
    document: Document,
    actions: Element,
    key: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    click: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl std::fmt::Debug for WebListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebListeners")
            .field("key", &self.key.is_some())
            .field("click", &self.click.is_some())
            .finish()
    }
}

impl EventListeners for WebListeners {
    fn remove(&mut self) {
        if let Some(key) = self.key.take() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keyup", key.as_ref().unchecked_ref());
        }
        if let Some(click) = self.click.take() {
            let _ = self
                .actions
                .remove_event_listener_with_callback("click", click.as_ref().unchecked_ref());
        }
    }
}

impl Drop for WebListeners {
    fn drop(&mut self) {
        self.remove();
    }
}

impl DialogHost for WebHost {
    type Surface = WebSurface;
    type Listeners = WebListeners;

    fn mount(&mut self, blueprint: &SurfaceBlueprint) -> Result<WebSurface, DialogError> {
        let body = self.document.body().ok_or(DialogError::NoBody)?;

        let window = self.part("div", Part::Window)?;
        window
            .set_attribute(TYPE_ATTRIBUTE, &blueprint.kind)
            .map_err(js_error)?;
        let wrapper = self.part("div", Part::Wrapper)?;
        let title = self.part("div", Part::Title)?;
        let dialog_body = self.part("div", Part::Body)?;
        let message = self.part("div", Part::Message)?;
        let actions = self.part("div", Part::Actions)?;

        title.set_text_content(Some(&blueprint.title));
        message.set_text_content(Some(&blueprint.message));

        let input: HtmlInputElement = self
            .part("input", Part::Input)?
            .dyn_into()
            .map_err(|_| DialogError::Host("input element expected".into()))?;
        input.set_type("text");

        window.append_child(&wrapper).map_err(js_error)?;
        wrapper.append_child(&title).map_err(js_error)?;
        wrapper.append_child(&dialog_body).map_err(js_error)?;
        dialog_body.append_child(&message).map_err(js_error)?;

        if let Some(spec) = &blueprint.input {
            input.set_placeholder(&spec.placeholder);
            let prompt = self.part("div", Part::Prompt)?;
            prompt.append_child(&input).map_err(js_error)?;
            dialog_body.append_child(&prompt).map_err(js_error)?;
        }

        for button in &blueprint.buttons {
            let el = self.part("button", button.part)?;
            el.set_attribute("type", "button").map_err(js_error)?;
            el.set_attribute(ActionMarker::ATTRIBUTE, button.marker.as_str())
                .map_err(js_error)?;
            el.set_text_content(Some(&button.label));
            actions.append_child(&el).map_err(js_error)?;
        }
        dialog_body.append_child(&actions).map_err(js_error)?;

        body.append_child(&window).map_err(js_error)?;

        Ok(WebSurface {
            window,
            actions,
            input,
        })
    }

    fn listen(&mut self, surface: &WebSurface, sink: EventSink) -> Result<WebListeners, DialogError> {
        let key_sink = Rc::clone(&sink);
        let key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = Key::from_dom(&event.key(), event.key_code());
            key_sink(&DialogEvent::KeyUp(key));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        let click = Closure::wrap(Box::new(move |event: MouseEvent| {
            let marker = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute(ActionMarker::ATTRIBUTE));
            sink(&DialogEvent::Click { marker });
        }) as Box<dyn FnMut(MouseEvent)>);

        // Dropping a partially-built set deregisters whatever was added.
        let mut listeners = WebListeners {
            document: self.document.clone(),
            actions: surface.actions.clone(),
            key: None,
            click: None,
        };

        self.document
            .add_event_listener_with_callback("keyup", key.as_ref().unchecked_ref())
            .map_err(js_error)?;
        listeners.key = Some(key);

        surface
            .actions
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        listeners.click = Some(click);

        Ok(listeners)
    }
}
