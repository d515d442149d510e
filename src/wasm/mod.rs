//! `wasm-bindgen` exports called from the server-rendered pages.
//!
//! Page scripts pass plain objects; they are decoded with `serde-wasm-bindgen`
//! into the same config types the native side uses.

mod console;

use crate::{
    api::browser::BrowserApi,
    config::AppConfig,
    dom::{
        Document,
        browser::{BrowserDialogs, BrowserDocument, BrowserElement},
    },
    forms::{
        DeleteRequest, GenerateRequest, PasswordField, PasswordForm, PasswordFormConfig,
        StrengthLabels, compute_strength, confirm_and_delete,
        email::EmailPreviewBinding,
        request_generated_password,
        toggles::{toggle_domains_card, toggle_password_visibility},
        validate_email_syntax,
    },
    notify::{
        DismissHandle, NotifyOptions, Notifier, PartialNotifyOptions, browser::BrowserScheduler,
    },
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::{cell::RefCell, rc::Rc};
use tracing::{Level, info, warn};
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;

const SUPERADMIN_CHECKBOX_ID: &str = "superadmin";
const DOMAINS_CARD_ID: &str = "domainsCard";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(Level::INFO);
    info!(commit = crate::GIT_COMMIT_HASH, "postfixadmin-ui loaded");
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn decode<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|err| js_error(format!("Invalid {what}: {err}")))
}

fn document() -> Result<BrowserDocument, JsValue> {
    BrowserDocument::current().ok_or_else(|| js_error("No document available"))
}

fn notify_options(value: JsValue, config: &AppConfig) -> NotifyOptions {
    if value.is_undefined() || value.is_null() {
        return NotifyOptions::with_delay(config.flash_delay_ms);
    }
    serde_wasm_bindgen::from_value::<PartialNotifyOptions>(value)
        .unwrap_or_else(|err| {
            warn!("Ignoring invalid notification options: {err}");
            PartialNotifyOptions::default()
        })
        .resolve(config.flash_delay_ms)
}

fn listen(target: &BrowserElement, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
    if target
        .as_html()
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("failed to attach {event} listener");
    }
    // Listeners live as long as the page.
    callback.forget();
}

/// Wires strength, match and change-intent tracking plus the submit check.
#[wasm_bindgen(js_name = initPasswordForm)]
pub fn init_password_form(config: JsValue) -> Result<(), JsValue> {
    let mut config: PasswordFormConfig = decode(config, "password form config")?;
    if config.min_len.is_none() {
        config.min_len = Some(AppConfig::load().min_password_length);
    }

    let form = PasswordForm::attach(&document()?, &config).map_err(js_error)?;
    let password = form.password_input().clone();
    let confirm = form.confirm_input().clone();
    let submit_target = form.form().filter(|_| form.validates_on_submit()).cloned();
    let form = Rc::new(RefCell::new(form));

    for (input, field) in [
        (password, PasswordField::Password),
        (confirm, PasswordField::Confirm),
    ] {
        let form = Rc::clone(&form);
        listen(&input, "input", move |_event| {
            form.borrow_mut().on_input(field);
        });
    }

    if let Some(target) = submit_target {
        let form = Rc::clone(&form);
        listen(&target, "submit", move |event| {
            if !form.borrow().on_submit(&BrowserDialogs) {
                event.prevent_default();
            }
        });
    }

    Ok(())
}

/// Scores `password` without touching the document: `{ score, label, color }`.
#[wasm_bindgen(js_name = checkPasswordStrength)]
pub fn check_password_strength(password: &str, labels: JsValue) -> Result<JsValue, JsValue> {
    let labels: StrengthLabels = if labels.is_undefined() || labels.is_null() {
        StrengthLabels::default()
    } else {
        decode(labels, "strength labels")?
    };
    let report = compute_strength(password, &labels);
    serde_wasm_bindgen::to_value(&report).map_err(js_error)
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    validate_email_syntax(email)
}

#[wasm_bindgen(js_name = updateEmailPreview)]
pub fn update_email_preview() -> Result<(), JsValue> {
    EmailPreviewBinding::resolve(&document()?).update();
    Ok(())
}

/// Fills both password inputs from the generation endpoint. `on_success`
/// receives the generated password.
#[wasm_bindgen(js_name = generatePassword)]
pub fn generate_password(config: JsValue, on_success: Option<js_sys::Function>) -> Result<(), JsValue> {
    let request: GenerateRequest = decode(config, "generate password config")?;
    let document = document()?;
    let (Some(password), Some(confirm)) = (
        document.element_by_id(&request.password_id),
        document.element_by_id(&request.confirm_id),
    ) else {
        return Err(js_error("Password inputs not found"));
    };

    let api = BrowserApi::new(&AppConfig::load());
    spawn_local(async move {
        request_generated_password(
            &api,
            &password,
            &confirm,
            &BrowserDialogs,
            request.fail_msg.as_deref(),
            |generated| {
                if let Some(callback) = &on_success {
                    let value = JsValue::from_str(generated.expose_secret());
                    if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                        warn!("generate password callback failed: {err:?}");
                    }
                }
            },
        )
        .await;
    });
    Ok(())
}

#[wasm_bindgen(js_name = confirmDeleteResource)]
pub fn confirm_delete_resource(config: JsValue) -> Result<(), JsValue> {
    let request: DeleteRequest = decode(config, "delete config")?;
    let api = BrowserApi::new(&AppConfig::load());
    spawn_local(async move {
        confirm_and_delete(
            &api,
            &BrowserDialogs,
            &request.url,
            &request.msgs,
            &request.replacements,
        )
        .await;
    });
    Ok(())
}

/// Shows one notification, given as an element or a selector, and returns a
/// function that dismisses it.
#[wasm_bindgen(js_name = fadeAlert)]
pub fn fade_alert(target: JsValue, options: JsValue) -> Result<js_sys::Function, JsValue> {
    let config = AppConfig::load();
    let options = notify_options(options, &config);
    let notifier = Notifier::new(BrowserScheduler);
    let handle = match target.dyn_into::<web_sys::HtmlElement>() {
        Ok(element) => notifier.show_element(BrowserElement::new(element), &options),
        Err(target) => match target.as_string() {
            Some(selector) => notifier.show(&document()?, &selector, &options),
            None => {
                warn!("fadeAlert target is neither an element nor a selector");
                DismissHandle::noop()
            }
        },
    };

    let dismiss = Closure::<dyn FnMut()>::wrap(Box::new(move || handle.dismiss()));
    Ok(dismiss.into_js_value().unchecked_into())
}

/// Shows every current flash message. Returns how many were found.
#[wasm_bindgen(js_name = flashMessages)]
pub fn flash_messages(selector: Option<String>, options: JsValue) -> Result<u32, JsValue> {
    let config = AppConfig::load();
    let options = notify_options(options, &config);
    let selector = selector.unwrap_or_else(|| config.flash_selector.clone());
    let handles =
        Notifier::new(BrowserScheduler).show_all(&document()?, Some(&selector), &options);
    Ok(u32::try_from(handles.len()).unwrap_or(u32::MAX))
}

#[wasm_bindgen(js_name = togglePassword)]
pub fn toggle_password(field_id: &str, button: web_sys::HtmlElement) -> Result<bool, JsValue> {
    let field = document()?
        .element_by_id(field_id)
        .ok_or_else(|| js_error(format!("Password field #{field_id} not found")))?;
    let icon = button
        .query_selector("i")
        .ok()
        .flatten()
        .and_then(|icon| icon.dyn_into::<web_sys::HtmlElement>().ok())
        .map(BrowserElement::new);

    let visible = toggle_password_visibility(&field, icon.as_ref());
    refresh_icons();
    Ok(visible)
}

#[wasm_bindgen(js_name = toggleDomains)]
pub fn toggle_domains() -> Result<(), JsValue> {
    let document = document()?;
    if let (Some(checkbox), Some(card)) = (
        document.element_by_id(SUPERADMIN_CHECKBOX_ID),
        document.element_by_id(DOMAINS_CARD_ID),
    ) {
        toggle_domains_card(&checkbox, &card);
    }
    Ok(())
}

/// Re-renders `data-lucide` icons when the icon library is loaded.
fn refresh_icons() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(lucide) = js_sys::Reflect::get(&window, &JsValue::from_str("lucide")) else {
        return;
    };
    if lucide.is_undefined() {
        return;
    }
    if let Ok(create_icons) = js_sys::Reflect::get(&lucide, &JsValue::from_str("createIcons"))
        && let Some(create_icons) = create_icons.dyn_ref::<js_sys::Function>()
        && let Err(err) = create_icons.call0(&lucide)
    {
        warn!("icon refresh failed: {err:?}");
    }
}
