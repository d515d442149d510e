//! Form Interaction Controller.
//!
//! Pure scoring and comparison rules live in their own modules and never touch
//! the document. [`session::FormSession`] turns input events into a list of
//! [`session::UiUpdate`]s, and [`controller::PasswordForm`] applies them to the
//! elements it resolved at attach time.

pub mod actions;
pub mod controller;
pub mod email;
pub mod intent;
pub mod matching;
pub mod session;
pub mod strength;
pub mod toggles;

pub use actions::{
    DeleteMessages, DeleteOutcome, DeleteRequest, GenerateRequest, confirm_and_delete,
    request_generated_password,
};
pub use controller::{PasswordForm, PasswordFormConfig, ValidationMessages};
pub use email::{EmailPreview, validate_email_syntax};
pub use intent::{ChangeIntent, compute_change_intention};
pub use matching::{MatchState, compute_match};
pub use session::{FormSession, PasswordField, SubmitVerdict, UiUpdate};
pub use strength::{StrengthBand, StrengthLabels, compute_strength};
