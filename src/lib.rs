//! # Mail administration console: client interaction layer
//!
//! `postfixadmin-ui` drives the interactive parts of the server-rendered admin
//! console: password forms and flash notifications. It ships as a WASM bundle
//! for the browser and as a native library/CLI for headless use and testing.
//!
//! ## Form Interaction Controller
//!
//! Password forms are wired once per page from a [`forms::PasswordFormConfig`].
//! Every keystroke recomputes, in order:
//!
//! 1. **Change intention** (edit forms only): whether the operator is typing a new
//!    password at all. When not, both fields become optional and the meter and
//!    match indicator are force-hidden.
//! 2. **Strength**: a 0-100 score with four bands (`weak`, `medium`, `good`,
//!    `strong`) rendered into a meter.
//! 3. **Match**: whether the confirmation equals the password, gating the submit
//!    button when one is configured.
//!
//! A submit-time check re-validates length and equality from the live field
//! values, so autofilled forms are still checked.
//!
//! ## Notification Lifecycle Manager
//!
//! Flash messages fade in over two animation frames, auto-dismiss after a delay,
//! and can be dismissed manually. Each notification owns the cancellation token of
//! its auto-dismiss timer, so whichever dismissal comes first wins and the other
//! becomes a no-op.
//!
//! ## Host Abstraction
//!
//! All decision logic is written against the [`dom`] traits and the
//! [`notify::Scheduler`] trait. The browser backend (`web-sys`, `gloo`) is compiled
//! only for `wasm32`; native builds use the in-memory document and the manual
//! scheduler.

pub mod api;
pub mod config;
pub mod dom;
pub mod errors;
pub mod forms;
pub mod notify;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use errors::AppError;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
