//! Build-time configuration for the console endpoints and UI defaults, with an
//! optional runtime override. In the browser the override is read from
//! `window.POSTFIXADMIN_CONFIG` (if present) so the server templates can change
//! endpoints without rebuilding the bundle; native hosts read the process
//! environment instead. Configuration values are public; do not store secrets here.

use tracing::warn;

/// Endpoint that returns a freshly generated password.
pub const DEFAULT_GENERATE_PASSWORD_PATH: &str = "/api/generate-password";
/// Flash messages rendered by the server carry this class.
pub const DEFAULT_FLASH_SELECTOR: &str = ".flash-message";
/// Auto-dismiss delay for flash messages (milliseconds).
pub const DEFAULT_FLASH_DELAY_MS: u32 = 4_000;
/// Minimum password length enforced at submit time when a form does not set one.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Console configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub generate_password_path: String,
    pub flash_selector: String,
    pub flash_delay_ms: u32,
    pub min_password_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            generate_password_path: DEFAULT_GENERATE_PASSWORD_PATH.to_string(),
            flash_selector: DEFAULT_FLASH_SELECTOR.to_string(),
            flash_delay_ms: DEFAULT_FLASH_DELAY_MS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(value) = option_env!("POSTFIXADMIN_UI_API_URL") {
            config.api_base_url = value.to_string();
        }
        if let Some(value) = option_env!("POSTFIXADMIN_UI_GENERATE_PATH") {
            config.generate_password_path = value.to_string();
        }

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    generate_password_path: Option<String>,
    flash_selector: Option<String>,
    flash_delay_ms: Option<String>,
    min_password_length: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.generate_password_path {
        config.generate_password_path = value;
    }
    if let Some(value) = runtime.flash_selector {
        config.flash_selector = value;
    }
    if let Some(value) = runtime.flash_delay_ms {
        match value.parse() {
            Ok(delay) => config.flash_delay_ms = delay,
            Err(_) => warn!("Ignoring invalid flash delay override: {value}"),
        }
    }
    if let Some(value) = runtime.min_password_length {
        match value.parse() {
            Ok(length) => config.min_password_length = length,
            Err(_) => warn!("Ignoring invalid minimum password length override: {value}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("POSTFIXADMIN_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        generate_password_path: read_runtime_value(&object, "generate_password_path"),
        flash_selector: read_runtime_value(&object, "flash_selector"),
        flash_delay_ms: read_runtime_value(&object, "flash_delay_ms"),
        min_password_length: read_runtime_value(&object, "min_password_length"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    let read = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|value| normalize_runtime_value(&value))
    };

    Some(RuntimeConfig {
        api_base_url: read("POSTFIXADMIN_UI_API_URL"),
        generate_password_path: read("POSTFIXADMIN_UI_GENERATE_PATH"),
        flash_selector: read("POSTFIXADMIN_UI_FLASH_SELECTOR"),
        flash_delay_ms: read("POSTFIXADMIN_UI_FLASH_DELAY_MS"),
        min_password_length: read("POSTFIXADMIN_UI_MIN_PASSWORD_LENGTH"),
    })
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    // Numeric overrides are commonly written as JS numbers.
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| number.to_string()))?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, DEFAULT_FLASH_DELAY_MS, DEFAULT_GENERATE_PASSWORD_PATH, RuntimeConfig,
        apply_runtime_overrides, normalize_runtime_value,
    };

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://mail.example.com "),
            Some("https://mail.example.com".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            ..AppConfig::default()
        };
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            generate_password_path: normalize_runtime_value("  "),
            flash_selector: normalize_runtime_value(""),
            flash_delay_ms: normalize_runtime_value(" "),
            min_password_length: None,
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.generate_password_path, DEFAULT_GENERATE_PASSWORD_PATH);
        assert_eq!(config.flash_delay_ms, DEFAULT_FLASH_DELAY_MS);
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            generate_password_path: normalize_runtime_value("/v2/passwords"),
            flash_selector: normalize_runtime_value(".alert"),
            flash_delay_ms: normalize_runtime_value("2500"),
            min_password_length: normalize_runtime_value("12"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.generate_password_path, "/v2/passwords");
        assert_eq!(config.flash_selector, ".alert");
        assert_eq!(config.flash_delay_ms, 2_500);
        assert_eq!(config.min_password_length, 12);
    }

    #[test]
    fn apply_runtime_overrides_skips_unparseable_numbers() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            flash_delay_ms: Some("soon".to_string()),
            min_password_length: Some("-3".to_string()),
            ..RuntimeConfig::default()
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_reads_process_environment() {
        temp_env::with_vars(
            [
                ("POSTFIXADMIN_UI_API_URL", Some("http://127.0.0.1:8080")),
                ("POSTFIXADMIN_UI_FLASH_DELAY_MS", Some("1000")),
                ("POSTFIXADMIN_UI_GENERATE_PATH", None),
                ("POSTFIXADMIN_UI_FLASH_SELECTOR", None),
                ("POSTFIXADMIN_UI_MIN_PASSWORD_LENGTH", None),
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
                assert_eq!(config.flash_delay_ms, 1_000);
                assert_eq!(config.generate_password_path, DEFAULT_GENERATE_PASSWORD_PATH);
            },
        );
    }
}
