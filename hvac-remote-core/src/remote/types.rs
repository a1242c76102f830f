use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_traits::clamp;
use serde::Deserialize;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Power {
    Off,
    On,
}

impl Default for Power {
    fn default() -> Self {
        Power::Off
    }
}

impl Power {
    pub fn is_on(&self) -> bool {
        *self == Power::On
    }
}

impl Display for Power {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Power::Off => write!(f, "OFF"),
            Power::On => write!(f, "ON"),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, EnumIter, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    Cool,
    Heat,
    Fan,
    Auto,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Cool
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Cool => "Cool",
            Mode::Heat => "Heat",
            Mode::Fan => "Fan",
            Mode::Auto => "Auto",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid mode: {0}")]
pub struct InvalidMode(String);

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cool" => Ok(Mode::Cool),
            "heat" => Ok(Mode::Heat),
            "fan" => Ok(Mode::Fan),
            "auto" => Ok(Mode::Auto),
            _ => Err(InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = InvalidMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, EnumIter, Deserialize)]
#[serde(try_from = "String")]
pub enum FanSpeed {
    Low,
    Medium,
    High,
    Auto,
}

impl Default for FanSpeed {
    fn default() -> Self {
        FanSpeed::Auto
    }
}

impl Display for FanSpeed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FanSpeed::Low => "Low",
            FanSpeed::Medium => "Medium",
            FanSpeed::High => "High",
            FanSpeed::Auto => "Auto",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid fan speed: {0}")]
pub struct InvalidFanSpeed(String);

impl FromStr for FanSpeed {
    type Err = InvalidFanSpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(FanSpeed::Low),
            "medium" | "mid" => Ok(FanSpeed::Medium),
            "high" => Ok(FanSpeed::High),
            "auto" => Ok(FanSpeed::Auto),
            _ => Err(InvalidFanSpeed(s.to_string())),
        }
    }
}

impl TryFrom<String> for FanSpeed {
    type Error = InvalidFanSpeed;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inclusive bounds for the target temperature, in whole degrees Celsius.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Deserialize)]
pub struct TemperatureRange {
    pub min: u8,
    pub max: u8,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        TemperatureRange { min: 18, max: 29 }
    }
}

impl TemperatureRange {
    pub fn contains(&self, temp: u8) -> bool {
        temp >= self.min && temp <= self.max
    }

    /// One degree warmer, or `None` at the ceiling.
    pub fn up(&self, temp: u8) -> Option<u8> {
        (temp < self.max).then(|| temp + 1)
    }

    /// One degree cooler, or `None` at the floor.
    pub fn down(&self, temp: u8) -> Option<u8> {
        (temp > self.min).then(|| temp - 1)
    }

    pub fn clamp(&self, value: i64) -> u8 {
        // bounded by min and max, both u8, so the cast cannot truncate
        clamp(value, i64::from(self.min), i64::from(self.max)) as u8
    }
}

impl Display for TemperatureRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°C ~ {}°C", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct RemoteState {
    pub power: Power,
    pub mode: Mode,
    pub target_temp: u8,
    pub fan_speed: Option<FanSpeed>,
}

impl Default for RemoteState {
    fn default() -> Self {
        RemoteState {
            power: Power::Off,
            mode: Mode::Cool,
            target_temp: 25,
            fan_speed: None,
        }
    }
}

impl Display for RemoteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ power: {}, mode: {}, temperature: {}°C",
            self.power, self.mode, self.target_temp
        )?;
        if let Some(fan) = self.fan_speed {
            write!(f, ", fan: {}", fan)?;
        }
        write!(f, " }}")
    }
}
