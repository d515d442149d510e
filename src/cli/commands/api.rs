use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_COOKIE: &str = "session-cookie";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the admin console, example: https://mail.example.com")
                .env("POSTFIXADMIN_UI_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .long("session-cookie")
                .help("Cookie header of an authenticated console session")
                .env("POSTFIXADMIN_UI_SESSION_COOKIE")
                .hide_env_values(true)
                .global(true),
        )
}
