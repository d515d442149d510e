//! Rendering abstraction over the live document.
//!
//! Controllers hold element handles resolved once at initialization and talk to
//! them only through [`Element`]. The browser backend wraps `web-sys` nodes; the
//! in-memory backend records every mutation so state can be asserted without a
//! browser. User-facing blocking dialogs go through [`Dialogs`].

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

#[cfg(target_arch = "wasm32")]
pub mod browser;

/// Utility class that hides an element.
pub const HIDDEN_CLASS: &str = "hidden";

/// A handle to one node in the document. Handles are cheap to clone and all
/// clones refer to the same node.
pub trait Element: Clone {
    /// Current value of a form control; empty for other elements.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn set_text(&self, text: &str);

    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Replaces the whole class attribute.
    fn set_class_name(&self, class_name: &str);

    /// Sets one inline style property, e.g. `("background-color", "#DC2626")`.
    fn set_style(&self, property: &str, value: &str);

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    fn set_required(&self, required: bool);
    fn set_disabled(&self, disabled: bool);
    fn is_checked(&self) -> bool;

    /// Detaches the node from the document.
    fn remove(&self);
    fn is_connected(&self) -> bool;

    fn set_hidden(&self, hidden: bool) {
        if hidden {
            self.add_class(HIDDEN_CLASS);
        } else {
            self.remove_class(HIDDEN_CLASS);
        }
    }

    fn toggle_classes(&self, classes: &[&str], on: bool) {
        for class in classes {
            if on {
                self.add_class(class);
            } else {
                self.remove_class(class);
            }
        }
    }
}

/// Element lookup. Only connected nodes are ever returned.
pub trait Document {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query_selector(&self, selector: &str) -> Option<Self::Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Resolves an optional identifier, treating blank identifiers as absent.
    fn optional_by_id(&self, id: Option<&str>) -> Option<Self::Element> {
        id.map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| self.element_by_id(id))
    }
}

/// Blocking, user-facing dialogs.
pub trait Dialogs {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    /// Reloads the whole page.
    fn reload(&self);
}
