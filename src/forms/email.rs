//! Email address syntax check and the live address preview on the mailbox form.

use crate::dom::{Document, Element};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_LOCAL_PART: &str = "user";
pub const DEFAULT_DOMAIN: &str = "domain.com";

pub const LOCAL_PART_INPUT_ID: &str = "local_part";
pub const DOMAIN_INPUT_ID: &str = "domain";
pub const LOCAL_PART_PREVIEW_ID: &str = "localPartPreview";
pub const DOMAIN_PREVIEW_ID: &str = "domainPreview";

/// Local part: dot-separated unquoted atoms or a quoted string. Domain: a
/// bracketed IPv4 literal or dot-separated labels ending in at least two letters.
const EMAIL_PATTERN: &str = r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-z\-0-9]+\.)+[a-z]{2,}))$"#;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

pub fn validate_email_syntax(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailPreview {
    pub local_part: String,
    pub domain: String,
}

impl EmailPreview {
    /// Lower-cases the local part and falls back to placeholders for empty input.
    /// The domain is shown as typed.
    pub fn render(local_part: &str, domain: &str) -> Self {
        let local_part = local_part.to_lowercase();
        Self {
            local_part: if local_part.is_empty() {
                DEFAULT_LOCAL_PART.to_string()
            } else {
                local_part
            },
            domain: if domain.is_empty() {
                DEFAULT_DOMAIN.to_string()
            } else {
                domain.to_string()
            },
        }
    }
}

/// Inputs and preview outputs of the "add mailbox" form.
#[derive(Clone, Debug)]
pub struct EmailPreviewBinding<E> {
    pub local_part_input: Option<E>,
    pub domain_input: Option<E>,
    pub local_part_preview: Option<E>,
    pub domain_preview: Option<E>,
}

impl<E: Element> EmailPreviewBinding<E> {
    /// Binds to the standard mailbox form element ids.
    pub fn resolve<D: Document<Element = E>>(document: &D) -> Self {
        Self {
            local_part_input: document.element_by_id(LOCAL_PART_INPUT_ID),
            domain_input: document.element_by_id(DOMAIN_INPUT_ID),
            local_part_preview: document.element_by_id(LOCAL_PART_PREVIEW_ID),
            domain_preview: document.element_by_id(DOMAIN_PREVIEW_ID),
        }
    }

    pub fn update(&self) -> EmailPreview {
        let read = |input: &Option<E>| input.as_ref().map(Element::value).unwrap_or_default();
        let preview = EmailPreview::render(&read(&self.local_part_input), &read(&self.domain_input));
        self.write(&preview);
        preview
    }

    pub fn write(&self, preview: &EmailPreview) {
        if let Some(output) = &self.local_part_preview {
            output.set_text(&preview.local_part);
        }
        if let Some(output) = &self.domain_preview {
            output.set_text(&preview.domain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn accepts_common_addresses() {
        assert!(validate_email_syntax("user@example.com"));
        assert!(validate_email_syntax("First.Last@Mail.Example.ORG"));
        assert!(validate_email_syntax("a@[192.168.0.1]"));
        assert!(validate_email_syntax("\"john doe\"@example.com"));
        assert!(validate_email_syntax("postmaster@sub-domain.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!validate_email_syntax("user@@example.com"));
        assert!(!validate_email_syntax("user@example"));
        assert!(!validate_email_syntax("user@example.c"));
        assert!(!validate_email_syntax("user.@example.com"));
        assert!(!validate_email_syntax("us er@example.com"));
        assert!(!validate_email_syntax("@example.com"));
        assert!(!validate_email_syntax(""));
    }

    #[test]
    fn preview_defaults_and_lowercases() {
        assert_eq!(
            EmailPreview::render("", ""),
            EmailPreview {
                local_part: "user".to_string(),
                domain: "domain.com".to_string(),
            }
        );
        assert_eq!(
            EmailPreview::render("Admin", "Example.com"),
            EmailPreview {
                local_part: "admin".to_string(),
                domain: "Example.com".to_string(),
            }
        );
    }

    #[test]
    fn binding_writes_previews() {
        let document = MemoryDocument::new();
        let local = document.create(LOCAL_PART_INPUT_ID);
        document.create(DOMAIN_INPUT_ID);
        let local_preview = document.create(LOCAL_PART_PREVIEW_ID);
        let domain_preview = document.create(DOMAIN_PREVIEW_ID);

        let binding = EmailPreviewBinding::resolve(&document);
        binding.update();
        assert_eq!(local_preview.text(), "user");
        assert_eq!(domain_preview.text(), "domain.com");

        local.set_value("Sales");
        binding.update();
        assert_eq!(local_preview.text(), "sales");
    }
}
