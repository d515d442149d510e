use crate::{
    cli::{
        actions::{
            Action,
            check::{EmailArgs, PreviewArgs, StrengthArgs},
            remote::{ConnectionArgs, DeleteArgs},
        },
        commands::{self, api},
    },
    config::AppConfig,
};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use std::collections::BTreeMap;

fn connection(matches: &clap::ArgMatches) -> ConnectionArgs {
    let mut config = AppConfig::load();
    if let Some(url) = matches.get_one::<String>(api::ARG_API_URL) {
        config.api_base_url.clone_from(url);
    }
    ConnectionArgs {
        config,
        session_cookie: matches
            .get_one::<String>(api::ARG_SESSION_COOKIE)
            .map(|cookie| SecretString::from(cookie.clone())),
    }
}

fn parse_replacements<'a>(
    values: impl Iterator<Item = &'a String>,
) -> Result<BTreeMap<String, String>> {
    values
        .map(|raw| {
            raw.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| anyhow!("invalid --set value {raw:?}, expected key=value"))
        })
        .collect()
}

/// # Errors
/// Returns an error if required arguments are missing or malformed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let required = |sub: &clap::ArgMatches, name: &str| {
        sub.get_one::<String>(name)
            .cloned()
            .with_context(|| format!("missing required argument: {name}"))
    };

    match matches.subcommand() {
        Some((commands::CMD_STRENGTH, sub)) => Ok(Action::Strength(StrengthArgs {
            password: SecretString::from(required(sub, "password")?),
        })),
        Some((commands::CMD_EMAIL, sub)) => Ok(Action::Email(EmailArgs {
            address: required(sub, "address")?,
        })),
        Some((commands::CMD_PREVIEW, sub)) => Ok(Action::Preview(PreviewArgs {
            local_part: sub.get_one::<String>("local-part").cloned().unwrap_or_default(),
            domain: sub.get_one::<String>("domain").cloned().unwrap_or_default(),
        })),
        Some((commands::CMD_GENERATE, _)) => Ok(Action::Generate(connection(matches))),
        Some((commands::CMD_DELETE, sub)) => {
            let url = required(sub, "url")?;
            let mut replacements =
                parse_replacements(sub.get_many::<String>("set").into_iter().flatten())?;
            replacements
                .entry("url".to_string())
                .or_insert_with(|| url.clone());

            Ok(Action::Delete(DeleteArgs {
                connection: connection(matches),
                message: required(sub, "message")?,
                replacements,
                assume_yes: sub.get_flag("yes"),
                url,
            }))
        }
        _ => Err(anyhow!("missing subcommand")),
    }
}
