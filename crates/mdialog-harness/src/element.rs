#![forbid(unsafe_code)]

//! A tiny element tree mirroring what the browser host builds.

use std::collections::BTreeMap;

use mdialog_core::{ActionMarker, Part, SurfaceBlueprint, TYPE_ATTRIBUTE};

/// An element in the in-memory document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (`div`, `button`, `input`).
    pub tag: &'static str,
    /// `class` attribute.
    pub class_name: String,
    /// Other attributes.
    pub attributes: BTreeMap<String, String>,
    /// Literal text content.
    pub text: String,
    /// Child elements in order.
    pub children: Vec<Element>,
}

impl Element {
    fn new(tag: &'static str, part: Part) -> Self {
        Self {
            tag,
            class_name: part.class_name().to_owned(),
            attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First descendant (or self) with `part`'s class name, depth first.
    #[must_use]
    pub fn find(&self, part: Part) -> Option<&Element> {
        if self.class_name == part.class_name() {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(part))
    }

    /// Number of descendants (including self) with `part`'s class name.
    #[must_use]
    pub fn count(&self, part: Part) -> usize {
        usize::from(self.class_name == part.class_name())
            + self.children.iter().map(|c| c.count(part)).sum::<usize>()
    }

    /// Number of `button` descendants.
    #[must_use]
    pub fn button_count(&self) -> usize {
        usize::from(self.tag == "button")
            + self.children.iter().map(Element::button_count).sum::<usize>()
    }

    /// Build the window element for `blueprint`.
    #[must_use]
    pub fn from_blueprint(blueprint: &SurfaceBlueprint) -> Self {
        let mut body = Element::new("div", Part::Body)
            .child(Element::new("div", Part::Message).text(&blueprint.message));

        if let Some(input) = &blueprint.input {
            body = body.child(
                Element::new("div", Part::Prompt).child(
                    Element::new("input", Part::Input)
                        .attr("type", "text")
                        .attr("placeholder", &input.placeholder),
                ),
            );
        }

        let actions = blueprint.buttons.iter().fold(
            Element::new("div", Part::Actions),
            |actions, button| {
                actions.child(
                    Element::new("button", button.part)
                        .attr("type", "button")
                        .attr(ActionMarker::ATTRIBUTE, button.marker.as_str())
                        .text(&button.label),
                )
            },
        );

        Element::new("div", Part::Window)
            .attr(TYPE_ATTRIBUTE, &blueprint.kind)
            .child(
                Element::new("div", Part::Wrapper)
                    .child(Element::new("div", Part::Title).text(&blueprint.title))
                    .child(body.child(actions)),
            )
    }
}
