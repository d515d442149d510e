use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "POSTFIXADMIN_UI_LOG_LEVEL";

/// Level names in verbosity order; the index is the `-v` count.
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Parses a level name or a verbosity count from the environment.
pub fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_lowercase();
    let index = match level.parse::<usize>() {
        Ok(count) => Some(count.min(LEVELS.len() - 1)),
        Err(_) => LEVELS.iter().position(|name| *name == level),
    };
    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level '{level}', expected one of: {}", LEVELS.join(", ")))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log to stderr; repeat for more detail (-v warn ... -vvvv trace)")
            .long_help(format!(
                "Log to stderr; repeat for more detail. {ENV_LOG_LEVEL} accepts {} \
                 or a count. Command output on stdout is unaffected.",
                LEVELS.join(", ")
            ))
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_level)),
    )
}
