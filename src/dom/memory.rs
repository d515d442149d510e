//! In-memory document for headless hosts and tests.
//!
//! Supported selectors are `#id`, `.class` and `*`.
//! Every mutation is kept on the node so callers can inspect the result.

use super::{Dialogs, Document, Element};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

#[derive(Debug)]
struct NodeState {
    id: Option<String>,
    value: String,
    text: String,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    required: bool,
    disabled: bool,
    checked: bool,
    connected: bool,
    removals: usize,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            id: None,
            value: String::new(),
            text: String::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            attributes: BTreeMap::new(),
            required: false,
            disabled: false,
            checked: false,
            connected: true,
            removals: 0,
        }
    }
}

/// A node of the in-memory document.
#[derive(Clone, Debug, Default)]
pub struct MemoryElement(Rc<RefCell<NodeState>>);

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    #[must_use]
    pub fn with_checked(self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn class_name(&self) -> String {
        self.0.borrow().classes.join(" ")
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn is_required(&self) -> bool {
        self.0.borrow().required
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(super::HIDDEN_CLASS)
    }

    pub fn set_checked(&self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }

    /// How many times [`Element::remove`] was called on this node.
    pub fn removals(&self) -> usize {
        self.0.borrow().removals
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.0.borrow().id.as_deref() == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self.has_class(class);
        }
        false
    }
}

impl Element for MemoryElement {
    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|existing| existing == class) {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|existing| existing != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|existing| existing == class)
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.borrow_mut().classes = class_name
            .split_whitespace()
            .map(str::to_string)
            .collect();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_required(&self, required: bool) {
        self.0.borrow_mut().required = required;
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn is_checked(&self) -> bool {
        self.0.borrow().checked
    }

    fn remove(&self) {
        let mut node = self.0.borrow_mut();
        node.removals += 1;
        node.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }
}

/// A flat document: insertion order is document order.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    nodes: Rc<RefCell<Vec<MemoryElement>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns a handle to it.
    pub fn insert(&self, element: MemoryElement) -> MemoryElement {
        self.nodes.borrow_mut().push(element.clone());
        element
    }

    /// Appends an empty node carrying `id`.
    pub fn create(&self, id: &str) -> MemoryElement {
        self.insert(MemoryElement::new().with_id(id))
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.nodes
            .borrow()
            .iter()
            .find(|node| node.is_connected() && node.0.borrow().id.as_deref() == Some(id))
            .cloned()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.nodes
            .borrow()
            .iter()
            .filter(|node| node.is_connected() && node.matches(selector))
            .cloned()
            .collect()
    }
}

/// Dialogs that record what was shown and answer confirmations from a preset.
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    answer: Cell<bool>,
    alerts: RefCell<Vec<String>>,
    confirmations: RefCell<Vec<String>>,
    reloads: Cell<usize>,
}

impl RecordingDialogs {
    /// Dialogs whose confirmations are answered with `answer`.
    pub fn answering(answer: bool) -> Self {
        let dialogs = Self::default();
        dialogs.answer.set(answer);
        dialogs
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}
