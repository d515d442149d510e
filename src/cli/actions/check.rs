//! Offline checks: the same rules the forms apply, run against arguments.

use crate::forms::{
    EmailPreview, StrengthLabels, compute_strength, validate_email_syntax,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::io::Write;

#[derive(Debug)]
pub struct StrengthArgs {
    pub password: SecretString,
}

#[derive(Debug)]
pub struct EmailArgs {
    pub address: String,
}

#[derive(Debug)]
pub struct PreviewArgs {
    pub local_part: String,
    pub domain: String,
}

fn labels() -> StrengthLabels {
    StrengthLabels {
        weak: "Weak".to_string(),
        medium: "Medium".to_string(),
        good: "Good".to_string(),
        strong: "Strong".to_string(),
    }
}

/// # Errors
/// Returns an error if the output cannot be written.
pub fn strength<W: Write>(args: &StrengthArgs, out: &mut W) -> Result<bool> {
    let labels = labels();
    let report = compute_strength(args.password.expose_secret(), &labels);
    writeln!(out, "score: {}", report.score)?;
    writeln!(out, "strength: {}", report.label)?;
    writeln!(out, "color: {}", report.color)?;
    Ok(true)
}

/// Reports whether the address is valid; invalid addresses fail the command.
/// # Errors
/// Returns an error if the output cannot be written.
pub fn email<W: Write>(args: &EmailArgs, out: &mut W) -> Result<bool> {
    let valid = validate_email_syntax(&args.address);
    writeln!(
        out,
        "{}: {}",
        args.address,
        if valid { "valid" } else { "invalid" }
    )?;
    Ok(valid)
}

/// # Errors
/// Returns an error if the output cannot be written.
pub fn preview<W: Write>(args: &PreviewArgs, out: &mut W) -> Result<bool> {
    let preview = EmailPreview::render(&args.local_part, &args.domain);
    writeln!(out, "{}@{}", preview.local_part, preview.domain)?;
    Ok(true)
}
