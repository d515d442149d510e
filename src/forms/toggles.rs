//! Small presentational toggles used by the admin and mailbox forms.

use crate::dom::Element;

/// Attribute read by the icon renderer to pick a glyph.
pub const ICON_ATTRIBUTE: &str = "data-lucide";
pub const DOMAINS_CARD_DISABLED_CLASSES: [&str; 2] = ["opacity-50", "pointer-events-none"];

/// Flips `field` between a masked and a plain-text input and swaps the icon to
/// match. Returns `true` when the password is now visible.
pub fn toggle_password_visibility<E: Element>(field: &E, icon: Option<&E>) -> bool {
    let reveal = field.attribute("type").as_deref() == Some("password");
    field.set_attribute("type", if reveal { "text" } else { "password" });
    if let Some(icon) = icon {
        icon.set_attribute(ICON_ATTRIBUTE, if reveal { "eye-off" } else { "eye" });
    }
    reveal
}

/// Superadmins manage every domain, so the per-domain card is dimmed and made
/// inert while the checkbox is ticked.
pub fn toggle_domains_card<E: Element>(superadmin: &E, card: &E) {
    card.toggle_classes(&DOMAINS_CARD_DISABLED_CLASSES, superadmin.is_checked());
}
