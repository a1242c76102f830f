use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Deserialize;
use thiserror::Error;

use crate::remote::types::{FanSpeed, Mode, Power, RemoteState, TemperatureRange};

const BUILTIN_PROFILES_RAW: &str = include_str!("profiles.toml");

pub const DEFAULT_PROFILE: &str = "classic";

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureControl {
    Buttons,
    Slider,
}

impl Display for TemperatureControl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureControl::Buttons => write!(f, "step buttons"),
            TemperatureControl::Slider => write!(f, "slider"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Could not read profile file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse profiles")]
    Parse(#[from] toml::de::Error),
    #[error("Profile {0} has no modes")]
    NoModes(String),
    #[error("Profile {profile} lists mode {mode} more than once")]
    DuplicateMode { profile: String, mode: Mode },
    #[error("Profile {profile} has an inverted temperature range {min}..{max}")]
    InvertedRange { profile: String, min: u8, max: u8 },
    #[error("Profile {profile} starts in mode {mode}, which it does not support")]
    InitialModeUnsupported { profile: String, mode: Mode },
    #[error("Profile {profile} starts at {temp}°C, outside {range}")]
    InitialTemperatureOutOfRange {
        profile: String,
        temp: u8,
        range: TemperatureRange,
    },
    #[error("Profile {0} sets a fan speed but has no fan control")]
    FanWithoutControl(String),
    #[error("Unknown profile: {0}")]
    Unknown(String),
    #[error("No profiles defined")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Deserialize, Debug, Default, Clone)]
struct RawInitial {
    mode: Option<Mode>,
    target_temp: Option<u8>,
    fan_speed: Option<FanSpeed>,
}

#[derive(Deserialize, Debug)]
struct RawProfile {
    name: String,
    title: Option<String>,
    modes: Vec<Mode>,
    control: TemperatureControl,
    #[serde(default)]
    fan_control: bool,
    #[serde(default)]
    temperature: TemperatureRange,
    #[serde(default)]
    initial: RawInitial,
}

#[derive(Deserialize, Debug)]
struct RawProfiles {
    #[serde(default)]
    profile: Vec<RawProfile>,
}

/// One configuration of the remote: which modes it offers, its temperature bounds and
/// which controls it shows.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteProfile {
    pub name: String,
    pub title: String,
    pub modes: Vec<Mode>,
    pub temperature: TemperatureRange,
    pub control: TemperatureControl,
    pub fan_control: bool,
    initial: RemoteState,
}

impl RemoteProfile {
    pub fn supports_mode(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    /// The state a fresh session starts in.
    pub fn initial_state(&self) -> RemoteState {
        self.initial
    }

    pub fn builtin(name: &str) -> Result<RemoteProfile> {
        BUILTIN_PROFILES
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| ProfileError::Unknown(name.to_string()))
    }

    pub fn builtins() -> &'static [RemoteProfile] {
        &BUILTIN_PROFILES
    }

    pub fn parse_all(raw: &str) -> Result<Vec<RemoteProfile>> {
        let RawProfiles { profile } = toml::from_str(raw)?;
        if profile.is_empty() {
            return Err(ProfileError::Empty);
        }
        profile.into_iter().map(RemoteProfile::try_from_raw).collect()
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<RemoteProfile>> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded profile file {}", path.display());
        Self::parse_all(&raw)
    }

    fn try_from_raw(raw: RawProfile) -> Result<RemoteProfile> {
        let RawProfile {
            name,
            title,
            modes,
            control,
            fan_control,
            temperature,
            initial,
        } = raw;

        if modes.is_empty() {
            return Err(ProfileError::NoModes(name));
        }
        if let Some(mode) = modes.iter().duplicates().next() {
            return Err(ProfileError::DuplicateMode {
                profile: name,
                mode: *mode,
            });
        }
        if temperature.min > temperature.max {
            return Err(ProfileError::InvertedRange {
                profile: name,
                min: temperature.min,
                max: temperature.max,
            });
        }

        let defaults = RemoteState::default();
        let mode = initial.mode.unwrap_or(if modes.contains(&defaults.mode) {
            defaults.mode
        } else {
            modes[0]
        });
        if !modes.contains(&mode) {
            return Err(ProfileError::InitialModeUnsupported {
                profile: name,
                mode,
            });
        }
        let target_temp = match initial.target_temp {
            Some(temp) if !temperature.contains(temp) => {
                return Err(ProfileError::InitialTemperatureOutOfRange {
                    profile: name,
                    temp,
                    range: temperature,
                })
            }
            Some(temp) => temp,
            None => temperature.clamp(i64::from(defaults.target_temp)),
        };
        let fan_speed = match (fan_control, initial.fan_speed) {
            (true, speed) => Some(speed.unwrap_or_default()),
            (false, None) => None,
            (false, Some(_)) => return Err(ProfileError::FanWithoutControl(name)),
        };

        Ok(RemoteProfile {
            title: title.unwrap_or_else(|| name.clone()),
            name,
            modes,
            temperature,
            control,
            fan_control,
            initial: RemoteState {
                power: Power::Off,
                mode,
                target_temp,
                fan_speed,
            },
        })
    }
}

impl Default for RemoteProfile {
    fn default() -> Self {
        BUILTIN_PROFILES[0].clone()
    }
}

impl Display for RemoteProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: modes [{}], {}, {}",
            self.name,
            self.modes.iter().join(", "),
            self.temperature,
            self.control
        )?;
        if self.fan_control {
            write!(f, ", fan speed")?;
        }
        Ok(())
    }
}

lazy_static! {
    static ref BUILTIN_PROFILES: Vec<RemoteProfile> = RemoteProfile::parse_all(BUILTIN_PROFILES_RAW)
        .expect("Could not parse built-in remote profiles");
}
