//! Notification Lifecycle Manager.
//!
//! A flash message fades in on the second paint after it is shown, stays for
//! [`NotifyOptions::delay`] milliseconds, then fades out and is detached. The
//! returned [`DismissHandle`] ends it early and cancels the pending
//! auto-dismiss, so every notification is removed exactly once.

pub mod lifecycle;
pub mod manager;
pub mod scheduler;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use crate::config::{DEFAULT_FLASH_DELAY_MS, DEFAULT_FLASH_SELECTOR};
pub use lifecycle::Phase;
pub use manager::{DismissHandle, Notifier};
pub use scheduler::{ManualScheduler, Scheduler, TimerGuard};

use serde::Deserialize;

/// Per-call notification settings. A zero `delay` or `auto: false` keeps the
/// notification until it is dismissed by hand.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NotifyOptions {
    pub delay: u32,
    pub auto: bool,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_FLASH_DELAY_MS,
            auto: true,
        }
    }
}

impl NotifyOptions {
    pub fn with_delay(delay: u32) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

/// Options as a page passes them: any field may be left out.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialNotifyOptions {
    pub delay: Option<u32>,
    pub auto: Option<bool>,
}

impl PartialNotifyOptions {
    /// Fills missing fields, taking the delay from the configured default.
    pub fn resolve(self, default_delay: u32) -> NotifyOptions {
        NotifyOptions {
            delay: self.delay.unwrap_or(default_delay),
            auto: self.auto.unwrap_or(true),
        }
    }
}
