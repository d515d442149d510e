//! `web-sys` backend for the live document.

use super::{Dialogs, Document, Element};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

#[derive(Clone, Debug)]
pub struct BrowserElement(HtmlElement);

impl BrowserElement {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    pub fn as_html(&self) -> &HtmlElement {
        &self.0
    }

    fn input(&self) -> Option<&HtmlInputElement> {
        self.0.dyn_ref::<HtmlInputElement>()
    }

    fn toggle_attribute(&self, name: &str, on: bool) {
        let _ = self.0.toggle_attribute_with_force(name, on);
    }
}

impl Element for BrowserElement {
    fn value(&self) -> String {
        match self.input() {
            Some(input) => input.value(),
            None => self.0.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&self, value: &str) {
        match self.input() {
            Some(input) => input.set_value(value),
            None => {
                let _ = self.0.set_attribute("value", value);
            }
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_required(&self, required: bool) {
        self.toggle_attribute("required", required);
    }

    fn set_disabled(&self, disabled: bool) {
        self.toggle_attribute("disabled", disabled);
    }

    fn is_checked(&self) -> bool {
        self.input().is_some_and(HtmlInputElement::checked)
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

#[derive(Clone, Debug)]
pub struct BrowserDocument(web_sys::Document);

impl BrowserDocument {
    /// The document of the current window, if any.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self)
    }
}

impl Document for BrowserDocument {
    type Element = BrowserElement;

    fn element_by_id(&self, id: &str) -> Option<BrowserElement> {
        self.0
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(BrowserElement)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<BrowserElement> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(BrowserElement)
            .collect()
    }
}

/// `window.alert`, `window.confirm` and `location.reload`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
