pub mod api;
pub mod logging;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_STRENGTH: &str = "strength";
pub const CMD_EMAIL: &str = "email";
pub const CMD_PREVIEW: &str = "preview";
pub const CMD_GENERATE: &str = "generate";
pub const CMD_DELETE: &str = "delete";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("postfixadmin-ui")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_STRENGTH)
                .about("Score a password the way the password forms do")
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(
            Command::new(CMD_EMAIL)
                .about("Check email address syntax; exits with 1 when invalid")
                .arg(Arg::new("address").required(true)),
        )
        .subcommand(
            Command::new(CMD_PREVIEW)
                .about("Render the mailbox address preview")
                .arg(
                    Arg::new("local-part")
                        .long("local-part")
                        .default_value(""),
                )
                .arg(Arg::new("domain").long("domain").default_value("")),
        )
        .subcommand(
            Command::new(CMD_GENERATE).about("Request a generated password from the console"),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a console resource after confirmation")
                .arg(
                    Arg::new("url")
                        .required(true)
                        .help("Resource URL, relative to --api-url"),
                )
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .help("Confirmation prompt; ${key} placeholders are filled from --set")
                        .default_value("Delete ${url}?"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .help("Placeholder value as key=value")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Answer the confirmation with yes")
                        .action(ArgAction::SetTrue),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
