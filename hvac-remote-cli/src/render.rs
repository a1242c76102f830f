use std::fmt::{Display, Formatter};

use hvac_remote_core::{
    FanSpeed, Mode, RemoteProfile, RemoteState, TemperatureControl, TemperatureRange,
};
use strum::IntoEnumIterator;

const RULE: &str = "────────────────────────────────────────";

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Cool => "🧊 Cool",
        Mode::Heat => "🔥 Heat",
        Mode::Fan => "🌀 Fan",
        Mode::Auto => "♻️ Auto",
    }
}

fn choice<T: Display>(f: &mut Formatter<'_>, value: T, selected: bool) -> std::fmt::Result {
    if selected {
        write!(f, " [{}]", value)
    } else {
        write!(f, "  {} ", value)
    }
}

fn slider(range: &TemperatureRange, temp: u8) -> String {
    (range.min..=range.max)
        .map(|t| if t == temp { '●' } else { '─' })
        .collect()
}

/// The whole remote as text, redrawn after every change.
pub struct Panel<'a> {
    pub profile: &'a RemoteProfile,
    pub state: &'a RemoteState,
}

impl<'a> Panel<'a> {
    pub fn new(profile: &'a RemoteProfile, state: &'a RemoteState) -> Panel<'a> {
        Panel { profile, state }
    }

    fn fmt_controls(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Panel { profile, state } = self;

        writeln!(f, "Current settings")?;
        writeln!(f, "  - Mode: {}", state.mode)?;
        writeln!(f, "  - Target temperature: {}°C", state.target_temp)?;
        if let Some(fan) = state.fan_speed {
            writeln!(f, "  - Fan speed: {}", fan)?;
        }
        writeln!(f)?;

        writeln!(f, "1. Operating mode  (mode <name>)")?;
        for mode in profile.modes.iter() {
            choice(f, mode_label(*mode), *mode == state.mode)?;
        }
        writeln!(f)?;

        match profile.control {
            TemperatureControl::Buttons => {
                writeln!(f, "2. Target temperature  (up / down)")?;
                writeln!(f, "      ▲")?;
                writeln!(f, "     {}°C", state.target_temp)?;
                writeln!(f, "      ▼")?;
            }
            TemperatureControl::Slider => {
                writeln!(f, "2. Target temperature  (set <n>)")?;
                writeln!(
                    f,
                    "  {}°C {} {}°C   {}°C",
                    profile.temperature.min,
                    slider(&profile.temperature, state.target_temp),
                    profile.temperature.max,
                    state.target_temp
                )?;
            }
        }
        writeln!(f, "  Temperature range: {}", profile.temperature)?;

        if let Some(current) = state.fan_speed {
            writeln!(f, "3. Fan speed  (fan <speed>)")?;
            for speed in FanSpeed::iter() {
                choice(f, speed, speed == current)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Apply settings (send command to system)  (apply)")
    }
}

impl<'a> Display for Panel<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let powered = self.state.power.is_on();

        writeln!(f, "❄️ {}", self.profile.title)?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "System status {}  {}",
            if powered { "🟢" } else { "🔴" },
            self.state.power
        )?;
        writeln!(f)?;

        if powered {
            self.fmt_controls(f)?;
        } else {
            writeln!(
                f,
                "⚠️ The system is currently off. Press the power button to turn it on."
            )?;
        }

        writeln!(f)?;
        if powered {
            write!(f, "  [ Power off 🔴 ]  (off)")
        } else {
            write!(f, "  [ Power on 🟢 ]  (on)")
        }
    }
}
