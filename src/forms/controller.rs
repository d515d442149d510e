//! Password form controller: resolves the form's elements once, feeds input
//! events through a [`FormSession`] and renders the resulting updates.

use super::{
    intent::{ChangeIntent, ChangeIntentFields},
    matching::{MatchIndicator, MatchLabels},
    session::{FormSession, PasswordField, SubmitFailure, SubmitRules, SubmitVerdict, UiUpdate},
    strength::{StrengthLabels, StrengthMeter},
};
use crate::{
    config::DEFAULT_MIN_PASSWORD_LENGTH,
    dom::{Dialogs, Document, Element},
    errors::AppError,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Label bundle for one password form. Pages pass it as a flat object:
/// `{ weak, medium, good, strong, match, noMatch }`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FormLabels {
    #[serde(flatten)]
    pub strength: StrengthLabels,
    #[serde(flatten)]
    pub matching: MatchLabels,
}

/// Alert text for submit-time validation failures.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessages {
    pub min_len: String,
    pub no_match: String,
}

impl ValidationMessages {
    pub fn for_failure(&self, failure: SubmitFailure) -> &str {
        match failure {
            SubmitFailure::TooShort { .. } => &self.min_len,
            SubmitFailure::Mismatch => &self.no_match,
        }
    }
}

/// Element identifiers and text supplied by the page when wiring a form.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFormConfig {
    pub password_id: String,
    pub confirm_id: String,
    #[serde(default)]
    pub meter_id: Option<String>,
    #[serde(default)]
    pub bar_id: Option<String>,
    #[serde(default)]
    pub text_id: Option<String>,
    #[serde(default)]
    pub indicator_id: Option<String>,
    #[serde(default)]
    pub submit_btn_id: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub change_input_id: Option<String>,
    pub labels: FormLabels,
    #[serde(default)]
    pub validation_msgs: Option<ValidationMessages>,
    #[serde(default)]
    pub min_len: Option<usize>,
}

/// Handles for every element a password form touches.
#[derive(Clone, Debug)]
pub struct PasswordFormElements<E> {
    pub password: E,
    pub confirm: E,
    pub meter: Option<E>,
    pub bar: Option<E>,
    pub text: Option<E>,
    pub indicator: Option<E>,
    pub submit: Option<E>,
    pub change_intent: Option<E>,
    pub form: Option<E>,
}

impl<E: Element> PasswordFormElements<E> {
    /// Looks every element up once. Both password inputs are required; anything
    /// else that is missing is skipped from then on.
    pub fn resolve<D: Document<Element = E>>(
        document: &D,
        config: &PasswordFormConfig,
    ) -> Result<Self, AppError> {
        let required = |id: &str| {
            document
                .element_by_id(id)
                .ok_or_else(|| AppError::Config(format!("Password form element #{id} not found")))
        };
        let optional = |name: &str, id: &Option<String>| {
            let element = document.optional_by_id(id.as_deref());
            if element.is_none()
                && let Some(id) = id
            {
                warn!("password form {name} #{id} not found; updates will be skipped");
            }
            element
        };

        Ok(Self {
            password: required(&config.password_id)?,
            confirm: required(&config.confirm_id)?,
            meter: optional("meter", &config.meter_id),
            bar: optional("bar", &config.bar_id),
            text: optional("text", &config.text_id),
            indicator: optional("indicator", &config.indicator_id),
            submit: optional("submit button", &config.submit_btn_id),
            change_intent: optional("change-intent field", &config.change_input_id),
            form: optional("form", &config.form_id),
        })
    }
}

pub struct PasswordForm<E> {
    session: FormSession,
    meter: StrengthMeter<E>,
    indicator: MatchIndicator<E>,
    intent: ChangeIntentFields<E>,
    form: Option<E>,
    labels: FormLabels,
    submit_check: Option<(SubmitRules, ValidationMessages)>,
}

impl<E: Element> PasswordForm<E> {
    pub fn attach<D: Document<Element = E>>(
        document: &D,
        config: &PasswordFormConfig,
    ) -> Result<Self, AppError> {
        let elements = PasswordFormElements::resolve(document, config)?;
        Ok(Self::new(elements, config))
    }

    pub fn new(elements: PasswordFormElements<E>, config: &PasswordFormConfig) -> Self {
        let tracks_intent = elements.change_intent.is_some();
        let preset = elements
            .change_intent
            .as_ref()
            .map_or(ChangeIntent::Unset, |field| {
                ChangeIntent::from_field_value(&field.value())
            });

        let submit_check = match (&elements.form, &config.validation_msgs) {
            (Some(_), Some(messages)) => Some((
                SubmitRules {
                    min_length: config.min_len.unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH),
                },
                messages.clone(),
            )),
            _ => None,
        };

        debug!(
            tracks_intent,
            submit_check = submit_check.is_some(),
            "password form attached"
        );

        Self {
            session: FormSession::new(tracks_intent).with_intent(preset),
            meter: StrengthMeter {
                meter: elements.meter,
                bar: elements.bar,
                text: elements.text,
            },
            indicator: MatchIndicator {
                indicator: elements.indicator,
                submit: elements.submit,
            },
            intent: ChangeIntentFields {
                flag: elements.change_intent,
                password: elements.password,
                confirm: elements.confirm,
            },
            form: elements.form,
            labels: config.labels.clone(),
            submit_check,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn password_input(&self) -> &E {
        &self.intent.password
    }

    pub fn confirm_input(&self) -> &E {
        &self.intent.confirm
    }

    pub fn form(&self) -> Option<&E> {
        self.form.as_ref()
    }

    /// Whether a submit-time check was configured for this form.
    pub fn validates_on_submit(&self) -> bool {
        self.submit_check.is_some()
    }

    /// Handles one input event on `field`.
    pub fn on_input(&mut self, field: PasswordField) {
        let password = self.intent.password.value();
        let confirm = self.intent.confirm.value();
        let updates = self.session.on_input(field, &password, &confirm);
        for update in updates {
            self.apply(update);
        }
    }

    /// Runs the submit-time check. Returns `false` when submission must be
    /// prevented; the operator has been alerted in that case.
    pub fn on_submit<D: Dialogs>(&self, dialogs: &D) -> bool {
        let Some((rules, messages)) = &self.submit_check else {
            return true;
        };
        let password = self.intent.password.value();
        let confirm = self.intent.confirm.value();

        match self.session.check_submit(*rules, &password, &confirm) {
            SubmitVerdict::Skip | SubmitVerdict::Allow => true,
            SubmitVerdict::Block(failure) => {
                debug!(?failure, "password form submission blocked");
                dialogs.alert(messages.for_failure(failure));
                false
            }
        }
    }

    fn apply(&self, update: UiUpdate) {
        match update {
            UiUpdate::ChangeIntent(intent) => self.intent.apply(intent),
            UiUpdate::HideMeter => self.meter.hide(),
            UiUpdate::ShowStrength(strength) => self.meter.show(strength, &self.labels.strength),
            UiUpdate::HideIndicator => self.indicator.hide(),
            UiUpdate::ShowMatch(state) => self.indicator.show(state, &self.labels.matching),
            UiUpdate::SubmitEnabled(enabled) => self.indicator.set_submit_enabled(enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, MemoryElement, RecordingDialogs};

    fn config(edit: bool) -> PasswordFormConfig {
        let json = format!(
            r#"{{
                "passwordId": "password",
                "confirmId": "password_confirm",
                "meterId": "strengthMeter",
                "barId": "strengthBar",
                "textId": "strengthText",
                "indicatorId": "matchIndicator",
                "submitBtnId": "submitBtn",
                "formId": "mailboxForm",
                {}
                "labels": {{
                    "weak": "Weak", "medium": "Medium", "good": "Good", "strong": "Strong",
                    "match": "Passwords match", "noMatch": "Passwords do not match"
                }},
                "validationMsgs": {{ "minLen": "Too short", "noMatch": "Mismatch" }}
            }}"#,
            if edit {
                r#""changeInputId": "change_password","#
            } else {
                ""
            }
        );
        serde_json::from_str(&json).unwrap_or_default()
    }

    struct Page {
        document: MemoryDocument,
        password: MemoryElement,
        confirm: MemoryElement,
        meter: MemoryElement,
        text: MemoryElement,
        indicator: MemoryElement,
        submit: MemoryElement,
        change: MemoryElement,
    }

    fn page() -> Page {
        let document = MemoryDocument::new();
        let page = Page {
            password: document.create("password"),
            confirm: document.create("password_confirm"),
            meter: document.insert(MemoryElement::new().with_id("strengthMeter").with_class("hidden")),
            text: {
                document.create("strengthBar");
                document.create("strengthText")
            },
            indicator: document.insert(
                MemoryElement::new()
                    .with_id("matchIndicator")
                    .with_class("hidden"),
            ),
            submit: document.create("submitBtn"),
            change: document.insert(
                MemoryElement::new()
                    .with_id("change_password")
                    .with_value("false"),
            ),
            document,
        };
        page.document.create("mailboxForm");
        page
    }

    #[test]
    fn config_parses_page_object() {
        let config = config(true);
        assert_eq!(config.password_id, "password");
        assert_eq!(config.change_input_id.as_deref(), Some("change_password"));
        assert_eq!(config.labels.strength.strong, "Strong");
        assert_eq!(config.labels.matching.no_match, "Passwords do not match");
        assert_eq!(config.min_len, None);
    }

    #[test]
    fn missing_password_input_is_a_config_error() {
        let document = MemoryDocument::new();
        document.create("password_confirm");
        let result = PasswordForm::attach(&document, &config(false));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn typing_updates_meter_indicator_and_submit() {
        let page = page();
        let Ok(mut form) = PasswordForm::attach(&page.document, &config(false)) else {
            panic!("form should attach");
        };

        page.password.set_value("Abcdefgh1234!");
        form.on_input(PasswordField::Password);
        assert!(!page.meter.is_hidden());
        assert_eq!(page.text.text(), "Strong");

        page.confirm.set_value("Abcdefgh");
        form.on_input(PasswordField::Confirm);
        assert_eq!(page.indicator.text(), "Passwords do not match");
        assert!(page.submit.is_disabled());

        page.confirm.set_value("Abcdefgh1234!");
        form.on_input(PasswordField::Confirm);
        assert_eq!(page.indicator.text(), "Passwords match");
        assert!(!page.submit.is_disabled());
    }

    #[test]
    fn edit_form_toggles_required_and_force_hides() {
        let page = page();
        let Ok(mut form) = PasswordForm::attach(&page.document, &config(true)) else {
            panic!("form should attach");
        };
        assert!(form.session().tracks_intent());

        page.password.set_value("new-secret");
        form.on_input(PasswordField::Password);
        assert_eq!(page.change.value(), "true");
        assert!(page.password.is_required());
        assert!(page.confirm.is_required());
        assert!(!page.meter.is_hidden());

        page.password.set_value("");
        form.on_input(PasswordField::Password);
        assert_eq!(page.change.value(), "false");
        assert!(!page.password.is_required());
        assert!(page.meter.is_hidden());
        assert!(page.indicator.is_hidden());
    }

    #[test]
    fn edit_form_submit_without_change_is_not_checked() {
        let page = page();
        let Ok(form) = PasswordForm::attach(&page.document, &config(true)) else {
            panic!("form should attach");
        };
        let dialogs = RecordingDialogs::default();

        assert!(form.on_submit(&dialogs));
        assert!(dialogs.alerts().is_empty());
    }

    #[test]
    fn create_form_blocks_short_password_on_submit() {
        let page = page();
        let Ok(form) = PasswordForm::attach(&page.document, &config(false)) else {
            panic!("form should attach");
        };
        let dialogs = RecordingDialogs::default();

        page.password.set_value("abcde");
        page.confirm.set_value("abcde");
        assert!(!form.on_submit(&dialogs));
        assert_eq!(dialogs.alerts(), vec!["Too short".to_string()]);

        page.password.set_value("abcdefgh");
        page.confirm.set_value("abcdefgx");
        assert!(!form.on_submit(&dialogs));
        assert_eq!(dialogs.alerts().last().map(String::as_str), Some("Mismatch"));

        page.confirm.set_value("abcdefgh");
        assert!(form.on_submit(&dialogs));
    }

    #[test]
    fn submit_check_requires_form_and_messages() {
        let page = page();
        let mut config = config(false);
        config.validation_msgs = None;
        let Ok(form) = PasswordForm::attach(&page.document, &config) else {
            panic!("form should attach");
        };
        assert!(!form.validates_on_submit());

        page.password.set_value("x");
        assert!(form.on_submit(&RecordingDialogs::default()));
    }

    #[test]
    fn missing_optional_elements_are_skipped() {
        let document = MemoryDocument::new();
        let password = document.create("password");
        document.create("password_confirm");
        let Ok(mut form) = PasswordForm::attach(&document, &config(true)) else {
            panic!("form should attach");
        };
        assert!(!form.session().tracks_intent());

        password.set_value("abc");
        form.on_input(PasswordField::Password);
        assert!(form.session().strength().is_some());
    }
}
