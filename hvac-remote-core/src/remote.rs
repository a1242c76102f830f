pub mod command;
pub mod notice;
pub mod profile;
pub mod types;

use thiserror::Error;
use tokio::sync::{broadcast, watch};

use crate::remote::command::RemoteCommand;
use crate::remote::notice::Notice;
use crate::remote::profile::{RemoteProfile, TemperatureControl};
use crate::remote::types::{FanSpeed, Mode, Power, RemoteState};

const NOTICE_CAPACITY: usize = 16;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum RemoteError {
    #[error("The remote is powered off")]
    PoweredOff,
    #[error("Mode {0} is not available on this remote")]
    UnsupportedMode(Mode),
    #[error("This remote has no fan speed control")]
    NoFanControl,
    #[error("This remote adjusts temperature with {0}")]
    UnsupportedControl(TemperatureControl),
    #[error("Invalid state for profile {profile}: {reason}")]
    InvalidState { profile: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// One session of the remote. Owns the state, applies transitions and tells subscribers
/// about the results.
///
/// Every command returns the [`Notice`] it produced, if any. `Ok(None)` means nothing
/// observable happened, such as powering on a remote that is already on.
#[derive(Debug)]
pub struct RemoteController {
    profile: RemoteProfile,
    state: RemoteState,
    state_sender: watch::Sender<RemoteState>,
    notice_sender: broadcast::Sender<Notice>,
}

impl RemoteController {
    pub fn new(profile: RemoteProfile) -> RemoteController {
        let state = profile.initial_state();
        Self::start(profile, state)
    }

    /// Resumes a session from an existing state, which must fit the profile.
    pub fn with_state(profile: RemoteProfile, state: RemoteState) -> Result<RemoteController> {
        let invalid = |reason: String| RemoteError::InvalidState {
            profile: profile.name.clone(),
            reason,
        };
        if !profile.supports_mode(state.mode) {
            return Err(invalid(format!("mode {} is not supported", state.mode)));
        }
        if !profile.temperature.contains(state.target_temp) {
            return Err(invalid(format!(
                "{}°C is outside {}",
                state.target_temp, profile.temperature
            )));
        }
        match (profile.fan_control, state.fan_speed) {
            (true, None) => return Err(invalid(String::from("fan speed is missing"))),
            (false, Some(_)) => return Err(invalid(String::from("fan speed is not supported"))),
            _ => {}
        }
        Ok(Self::start(profile, state))
    }

    fn start(profile: RemoteProfile, state: RemoteState) -> RemoteController {
        let (state_sender, _) = watch::channel(state);
        let (notice_sender, _) = broadcast::channel(NOTICE_CAPACITY);
        debug!("starting remote session with profile {}: {}", profile.name, state);
        RemoteController {
            profile,
            state,
            state_sender,
            notice_sender,
        }
    }

    pub fn state(&self) -> RemoteState {
        self.state
    }

    pub fn profile(&self) -> &RemoteProfile {
        &self.profile
    }

    /// Receives the latest state, waking only when a transition actually changed it.
    pub fn subscribe_state(&self) -> watch::Receiver<RemoteState> {
        self.state_sender.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_sender.subscribe()
    }

    pub fn power_on(&mut self) -> Result<Option<Notice>> {
        self.set_power(Power::On)
    }

    pub fn power_off(&mut self) -> Result<Option<Notice>> {
        self.set_power(Power::Off)
    }

    fn set_power(&mut self, power: Power) -> Result<Option<Notice>> {
        if self.state.power == power {
            trace!("remote already {}", power);
            return Ok(None);
        }
        info!("powering {}", power);
        self.state.power = power;
        self.publish_state();
        Ok(None)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<Option<Notice>> {
        self.ensure_powered()?;
        if !self.profile.supports_mode(mode) {
            return Err(self.reject(RemoteError::UnsupportedMode(mode)));
        }
        if self.state.mode != mode {
            debug!("mode {} -> {}", self.state.mode, mode);
            self.state.mode = mode;
            self.publish_state();
        }
        Ok(None)
    }

    pub fn increase_temp(&mut self) -> Result<Option<Notice>> {
        self.ensure_control(TemperatureControl::Buttons)?;
        match self.profile.temperature.up(self.state.target_temp) {
            Some(temp) => Ok(Some(self.change_temp(temp, Notice::TemperatureRaised(temp)))),
            None => {
                trace!("temperature already at ceiling {}°C", self.state.target_temp);
                Ok(None)
            }
        }
    }

    pub fn decrease_temp(&mut self) -> Result<Option<Notice>> {
        self.ensure_control(TemperatureControl::Buttons)?;
        match self.profile.temperature.down(self.state.target_temp) {
            Some(temp) => Ok(Some(self.change_temp(temp, Notice::TemperatureLowered(temp)))),
            None => {
                trace!("temperature already at floor {}°C", self.state.target_temp);
                Ok(None)
            }
        }
    }

    /// Sets an absolute target, saturating at the profile's bounds.
    pub fn set_temp(&mut self, value: i64) -> Result<Option<Notice>> {
        self.ensure_control(TemperatureControl::Slider)?;
        let temp = self.profile.temperature.clamp(value);
        if temp == self.state.target_temp {
            trace!("temperature already {}°C", temp);
            return Ok(None);
        }
        Ok(Some(self.change_temp(temp, Notice::TemperatureSet(temp))))
    }

    fn change_temp(&mut self, temp: u8, notice: Notice) -> Notice {
        debug!("temperature {}°C -> {}°C", self.state.target_temp, temp);
        self.state.target_temp = temp;
        self.publish_state();
        self.publish_notice(notice);
        notice
    }

    pub fn set_fan_speed(&mut self, speed: FanSpeed) -> Result<Option<Notice>> {
        self.ensure_powered()?;
        if !self.profile.fan_control {
            return Err(self.reject(RemoteError::NoFanControl));
        }
        if self.state.fan_speed != Some(speed) {
            debug!("fan speed -> {}", speed);
            self.state.fan_speed = Some(speed);
            self.publish_state();
        }
        Ok(None)
    }

    /// Confirms the current settings without changing them.
    pub fn apply_settings(&mut self) -> Result<Option<Notice>> {
        self.ensure_powered()?;
        let RemoteState {
            mode,
            target_temp,
            fan_speed,
            ..
        } = self.state;
        let notice = Notice::SettingsApplied {
            mode,
            target_temp,
            fan_speed,
        };
        info!("{}", notice);
        self.publish_notice(notice);
        Ok(Some(notice))
    }

    pub fn execute(&mut self, command: RemoteCommand) -> Result<Option<Notice>> {
        trace!("executing {}", command);
        match command {
            RemoteCommand::PowerOn => self.power_on(),
            RemoteCommand::PowerOff => self.power_off(),
            RemoteCommand::SetMode(mode) => self.set_mode(mode),
            RemoteCommand::IncreaseTemp => self.increase_temp(),
            RemoteCommand::DecreaseTemp => self.decrease_temp(),
            RemoteCommand::SetTemp(value) => self.set_temp(value),
            RemoteCommand::SetFanSpeed(speed) => self.set_fan_speed(speed),
            RemoteCommand::ApplySettings => self.apply_settings(),
            RemoteCommand::Status => Ok(None),
        }
    }

    fn ensure_powered(&self) -> Result<()> {
        if self.state.power.is_on() {
            Ok(())
        } else {
            Err(self.reject(RemoteError::PoweredOff))
        }
    }

    fn ensure_control(&self, control: TemperatureControl) -> Result<()> {
        self.ensure_powered()?;
        if self.profile.control == control {
            Ok(())
        } else {
            Err(self.reject(RemoteError::UnsupportedControl(self.profile.control)))
        }
    }

    fn reject(&self, err: RemoteError) -> RemoteError {
        warn!("rejected command: {}", err);
        err
    }

    fn publish_state(&self) {
        self.state_sender.send_replace(self.state);
    }

    fn publish_notice(&self, notice: Notice) {
        if self.notice_sender.send(notice).is_err() {
            trace!("sent notice to no receivers");
        }
    }
}

impl Default for RemoteController {
    fn default() -> Self {
        Self::new(RemoteProfile::default())
    }
}
