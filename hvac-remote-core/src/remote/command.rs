use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::remote::types::{FanSpeed, InvalidFanSpeed, InvalidMode, Mode};

/// Everything a user can ask the remote to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RemoteCommand {
    PowerOn,
    PowerOff,
    SetMode(Mode),
    IncreaseTemp,
    DecreaseTemp,
    SetTemp(i64),
    SetFanSpeed(FanSpeed),
    ApplySettings,
    Status,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("{0} takes no more than one argument")]
    TooManyArguments(&'static str),
    #[error(transparent)]
    Mode(#[from] InvalidMode),
    #[error(transparent)]
    FanSpeed(#[from] InvalidFanSpeed),
    #[error("Invalid temperature: {0}")]
    Temperature(String),
}

fn single_arg<'a, I: Iterator<Item = &'a str>>(
    name: &'static str,
    mut words: I,
) -> Result<&'a str, CommandParseError> {
    let arg = words.next().ok_or(CommandParseError::MissingArgument(name))?;
    match words.next() {
        Some(_) => Err(CommandParseError::TooManyArguments(name)),
        None => Ok(arg),
    }
}

fn no_args<'a, I: Iterator<Item = &'a str>>(
    command: RemoteCommand,
    name: &'static str,
    mut words: I,
) -> Result<RemoteCommand, CommandParseError> {
    match words.next() {
        Some(_) => Err(CommandParseError::TooManyArguments(name)),
        None => Ok(command),
    }
}

impl FromStr for RemoteCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().ok_or(CommandParseError::Empty)?;
        match head.to_lowercase().as_str() {
            "on" | "poweron" => no_args(RemoteCommand::PowerOn, "on", words),
            "off" | "poweroff" => no_args(RemoteCommand::PowerOff, "off", words),
            "up" | "+" => no_args(RemoteCommand::IncreaseTemp, "up", words),
            "down" | "-" => no_args(RemoteCommand::DecreaseTemp, "down", words),
            "apply" => no_args(RemoteCommand::ApplySettings, "apply", words),
            "status" => no_args(RemoteCommand::Status, "status", words),
            "mode" => Ok(RemoteCommand::SetMode(single_arg("mode", words)?.parse()?)),
            "fan" => Ok(RemoteCommand::SetFanSpeed(
                single_arg("fan", words)?.parse()?,
            )),
            "set" | "temp" => {
                let arg = single_arg("set", words)?;
                let value = arg
                    .to_lowercase()
                    .trim_end_matches('c')
                    .trim_end_matches('°')
                    .parse()
                    .map_err(|_| CommandParseError::Temperature(arg.to_string()))?;
                Ok(RemoteCommand::SetTemp(value))
            }
            _ => Err(CommandParseError::Unknown(head.to_string())),
        }
    }
}

impl Display for RemoteCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteCommand::PowerOn => write!(f, "on"),
            RemoteCommand::PowerOff => write!(f, "off"),
            RemoteCommand::SetMode(m) => write!(f, "mode {}", m),
            RemoteCommand::IncreaseTemp => write!(f, "up"),
            RemoteCommand::DecreaseTemp => write!(f, "down"),
            RemoteCommand::SetTemp(t) => write!(f, "set {}", t),
            RemoteCommand::SetFanSpeed(s) => write!(f, "fan {}", s),
            RemoteCommand::ApplySettings => write!(f, "apply"),
            RemoteCommand::Status => write!(f, "status"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_simple_commands_and_aliases() {
        assert_eq!("on".parse::<RemoteCommand>(), Ok(RemoteCommand::PowerOn));
        assert_eq!("PowerOff".parse::<RemoteCommand>(), Ok(RemoteCommand::PowerOff));
        assert_eq!("+".parse::<RemoteCommand>(), Ok(RemoteCommand::IncreaseTemp));
        assert_eq!("  down ".parse::<RemoteCommand>(), Ok(RemoteCommand::DecreaseTemp));
        assert_eq!("apply".parse::<RemoteCommand>(), Ok(RemoteCommand::ApplySettings));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!("mode heat".parse::<RemoteCommand>(), Ok(RemoteCommand::SetMode(Mode::Heat)));
        assert_eq!(
            "fan Medium".parse::<RemoteCommand>(),
            Ok(RemoteCommand::SetFanSpeed(FanSpeed::Medium))
        );
        assert_eq!("set 35".parse::<RemoteCommand>(), Ok(RemoteCommand::SetTemp(35)));
        assert_eq!("temp 22°C".parse::<RemoteCommand>(), Ok(RemoteCommand::SetTemp(22)));
        assert_eq!("set -5".parse::<RemoteCommand>(), Ok(RemoteCommand::SetTemp(-5)));
    }

    #[test]
    fn temperature_suffix_ignores_case() {
        for arg in ["22c", "22C", "22°c", "22°C"].iter() {
            assert_eq!(
                format!("set {}", arg).parse::<RemoteCommand>(),
                Ok(RemoteCommand::SetTemp(22))
            );
        }
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!("".parse::<RemoteCommand>(), Err(CommandParseError::Empty));
        assert_eq!(
            "jump".parse::<RemoteCommand>(),
            Err(CommandParseError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "mode".parse::<RemoteCommand>(),
            Err(CommandParseError::MissingArgument("mode"))
        );
        assert_eq!(
            "on now".parse::<RemoteCommand>(),
            Err(CommandParseError::TooManyArguments("on"))
        );
        assert!(matches!(
            "mode dry".parse::<RemoteCommand>(),
            Err(CommandParseError::Mode(_))
        ));
        assert!(matches!(
            "set warm".parse::<RemoteCommand>(),
            Err(CommandParseError::Temperature(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        let commands = [
            RemoteCommand::PowerOn,
            RemoteCommand::SetMode(Mode::Auto),
            RemoteCommand::SetTemp(19),
            RemoteCommand::SetFanSpeed(FanSpeed::High),
            RemoteCommand::Status,
        ];
        for cmd in commands.iter() {
            assert_eq!(cmd.to_string().parse::<RemoteCommand>(), Ok(*cmd));
        }
    }
}
