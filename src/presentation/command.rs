// ABOUTME: Interactive shell command grammar, parsed with clap.
// ABOUTME: Mirrors the form: edit fields, pull, reset, status, quit.

use crate::types::Architecture;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pullwatch",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Start pulling an image (defaults to the form's image)
    Pull {
        /// Image reference, e.g. alpine or ghcr.io/org/app:1.0
        image: Option<String>,

        /// Registry address
        #[arg(short, long)]
        registry: Option<String>,

        /// Target architecture
        #[arg(short, long, value_enum)]
        arch: Option<Architecture>,
    },

    /// Set a form field
    Set {
        #[arg(value_enum)]
        field: FormField,

        /// New value (omit to clear the image)
        value: Option<String>,
    },

    /// Clear the log and restore default form values
    Reset,

    /// Show session state, progress, and form values
    Status,

    /// Leave the shell once any running pull has finished
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormField {
    Image,
    Registry,
    #[value(alias = "architecture")]
    Arch,
}

/// Result of parsing one input line.
#[derive(Debug)]
pub enum Parsed {
    Empty,
    Command(ShellCommand),
    /// Help or usage text the user asked for.
    Help(String),
    Invalid(String),
}

pub fn parse_line(line: &str) -> Parsed {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Parsed::Empty;
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => Parsed::Command(parsed.command),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Parsed::Help(e.render().to_string())
            }
            _ => Parsed::Invalid(e.render().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_with_overrides() {
        let Parsed::Command(cmd) = parse_line("pull alpine -r mirror.local --arch arm64") else {
            panic!("expected a command");
        };
        assert_eq!(
            cmd,
            ShellCommand::Pull {
                image: Some("alpine".to_string()),
                registry: Some("mirror.local".to_string()),
                arch: Some(Architecture::Arm64),
            }
        );
    }

    #[test]
    fn bare_pull_uses_form() {
        let Parsed::Command(cmd) = parse_line("  pull  ") else {
            panic!("expected a command");
        };
        assert_eq!(
            cmd,
            ShellCommand::Pull {
                image: None,
                registry: None,
                arch: None,
            }
        );
    }

    #[test]
    fn set_architecture_alias() {
        let Parsed::Command(cmd) = parse_line("set architecture i386") else {
            panic!("expected a command");
        };
        assert_eq!(
            cmd,
            ShellCommand::Set {
                field: FormField::Arch,
                value: Some("i386".to_string()),
            }
        );
    }

    #[test]
    fn blank_line_is_empty() {
        assert!(matches!(parse_line(" \t "), Parsed::Empty));
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(matches!(parse_line("help"), Parsed::Help(_)));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(parse_line("push alpine"), Parsed::Invalid(_)));
        assert!(matches!(parse_line("pull alpine --arch sparc"), Parsed::Invalid(_)));
    }

    #[test]
    fn exit_is_an_alias_for_quit() {
        assert!(matches!(
            parse_line("exit"),
            Parsed::Command(ShellCommand::Quit)
        ));
    }
}
