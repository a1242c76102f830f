mod render;
mod session;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use std::path::PathBuf;

use color_eyre::eyre::{eyre, WrapErr};
use eyre::Result;
use hvac_remote_core::remote::profile::DEFAULT_PROFILE;
use hvac_remote_core::{FanSpeed, Mode, Power, RemoteController, RemoteProfile, RemoteState};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct InitialState {
    /// Start with the system powered on
    #[structopt(short, long)]
    powered: bool,
    /// Starting mode
    #[structopt(short, long)]
    mode: Option<Mode>,
    /// Starting target temperature in °C
    #[structopt(short, long)]
    temperature: Option<u8>,
    /// Starting fan speed, for remotes with fan control
    #[structopt(short, long)]
    fan: Option<FanSpeed>,
}

impl InitialState {
    fn apply(&self, profile: &RemoteProfile) -> RemoteState {
        let initial = profile.initial_state();
        RemoteState {
            power: if self.powered { Power::On } else { initial.power },
            mode: self.mode.unwrap_or(initial.mode),
            target_temp: self.temperature.unwrap_or(initial.target_temp),
            fan_speed: self.fan.or(initial.fan_speed),
        }
    }
}

#[derive(StructOpt, Debug)]
struct RemoteConfig {
    /// Built-in profile to use, or the profile to pick from --profile-file
    #[structopt(long)]
    profile: Option<String>,
    /// TOML file with custom profiles
    #[structopt(long, parse(from_os_str))]
    profile_file: Option<PathBuf>,
    #[structopt(flatten)]
    initial_state: InitialState,
}

impl RemoteConfig {
    fn load_profile(&self) -> Result<RemoteProfile> {
        match &self.profile_file {
            Some(path) => {
                let profiles = RemoteProfile::load_file(path)
                    .wrap_err_with(|| format!("Could not load profiles from {}", path.display()))?;
                match &self.profile {
                    Some(name) => profiles
                        .into_iter()
                        .find(|p| &p.name == name)
                        .ok_or_else(|| eyre!("No profile named {} in {}", name, path.display())),
                    // parsing guarantees at least one profile
                    None => profiles
                        .into_iter()
                        .next()
                        .ok_or_else(|| eyre!("No profiles in {}", path.display())),
                }
            }
            None => {
                let name = self.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
                RemoteProfile::builtin(name).wrap_err("Could not select profile")
            }
        }
    }

    fn build(&self) -> Result<RemoteController> {
        let profile = self.load_profile()?;
        info!("using profile {}", profile);
        let state = self.initial_state.apply(&profile);
        RemoteController::with_state(profile, state).wrap_err("Invalid initial state")
    }
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Control the remote from stdin (default)
    Interactive,
    /// Run commands in order, e.g. `run on "mode heat" up apply`
    Run {
        /// Commands to run
        commands: Vec<String>,
    },
    /// List the built-in profiles
    Profiles,
}

#[derive(StructOpt, Debug)]
#[structopt(name = "hvac-remote", about = "Mock remote for a central heating and cooling system")]
struct Opt {
    #[structopt(flatten)]
    config: RemoteConfig,
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;

    let opts = Opt::from_args();

    debug!("opts: {:?}", opts);

    match opts.command.unwrap_or(Command::Interactive) {
        Command::Interactive => session::interactive(opts.config.build()?).await?,
        Command::Run { commands } => session::scripted(opts.config.build()?, &commands)?,
        Command::Profiles => {
            for profile in RemoteProfile::builtins() {
                println!("{}", profile);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    const CUSTOM: &str = r#"
[[profile]]
name = "summer"
modes = ["Cool", "Fan"]
control = "buttons"

[[profile]]
name = "winter"
modes = ["Heat"]
control = "slider"
temperature = { min = 16, max = 26 }
"#;

    fn overrides() -> InitialState {
        InitialState {
            powered: false,
            mode: None,
            temperature: None,
            fan: None,
        }
    }

    fn config(profile: Option<&str>, profile_file: Option<PathBuf>) -> RemoteConfig {
        RemoteConfig {
            profile: profile.map(String::from),
            profile_file,
            initial_state: overrides(),
        }
    }

    #[test]
    fn builtin_profile_is_selected_by_name() {
        assert_eq!(config(None, None).load_profile().unwrap().name, DEFAULT_PROFILE);
        assert_eq!(
            config(Some("slider"), None).load_profile().unwrap().name,
            "slider"
        );
        assert!(config(Some("nope"), None).load_profile().is_err());
    }

    #[test]
    fn profile_file_picks_named_or_first_profile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.toml");
        std::fs::write(&path, CUSTOM).unwrap();

        let first = config(None, Some(path.clone())).load_profile().unwrap();
        assert_eq!(first.name, "summer");

        let named = config(Some("winter"), Some(path.clone()))
            .load_profile()
            .unwrap();
        assert_eq!(named.name, "winter");
        assert_eq!(named.temperature.max, 26);

        let err = config(Some("classic"), Some(path)).load_profile().unwrap_err();
        assert!(err.to_string().contains("No profile named classic"));
    }

    #[test]
    fn missing_profile_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = config(None, Some(path)).load_profile().unwrap_err();
        assert!(err.to_string().contains("Could not load profiles"));
    }

    #[test]
    fn overrides_replace_initial_state() {
        let mut cfg = config(Some("fan-control"), None);
        cfg.initial_state = InitialState {
            powered: true,
            mode: Some(Mode::Auto),
            temperature: Some(20),
            fan: Some(FanSpeed::High),
        };
        let state = cfg.build().unwrap().state();
        assert_eq!(
            state,
            RemoteState {
                power: Power::On,
                mode: Mode::Auto,
                target_temp: 20,
                fan_speed: Some(FanSpeed::High),
            }
        );
    }

    #[test]
    fn overrides_are_checked_against_the_profile() {
        let rejected = [
            InitialState {
                mode: Some(Mode::Fan),
                ..overrides()
            },
            InitialState {
                temperature: Some(30),
                ..overrides()
            },
            InitialState {
                fan: Some(FanSpeed::Low),
                ..overrides()
            },
        ];
        for initial_state in rejected {
            let cfg = RemoteConfig {
                initial_state,
                ..config(Some("classic"), None)
            };
            assert!(cfg.build().is_err(), "{:?} should be rejected", cfg);
        }
    }
}
