use std::fmt::{Display, Formatter};

use crate::remote::types::{FanSpeed, Mode};

/// Short feedback for the user, shown transiently by whatever renders the remote.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notice {
    TemperatureRaised(u8),
    TemperatureLowered(u8),
    TemperatureSet(u8),
    SettingsApplied {
        mode: Mode,
        target_temp: u8,
        fan_speed: Option<FanSpeed>,
    },
}

impl Notice {
    pub fn icon(&self) -> &'static str {
        match self {
            Notice::TemperatureRaised(_) => "🔼",
            Notice::TemperatureLowered(_) => "🔽",
            Notice::TemperatureSet(_) => "🌡️",
            Notice::SettingsApplied { .. } => "✅",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::TemperatureRaised(t) => write!(f, "Temperature +1°C (now {}°C)", t),
            Notice::TemperatureLowered(t) => write!(f, "Temperature -1°C (now {}°C)", t),
            Notice::TemperatureSet(t) => write!(f, "Temperature set to {}°C", t),
            Notice::SettingsApplied {
                mode,
                target_temp,
                fan_speed,
            } => {
                write!(
                    f,
                    "Settings applied: mode={}, temperature={}°C",
                    mode, target_temp
                )?;
                if let Some(fan) = fan_speed {
                    write!(f, ", fan={}", fan)?;
                }
                Ok(())
            }
        }
    }
}
