#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub mod remote;

pub use remote::command::{CommandParseError, RemoteCommand};
pub use remote::notice::Notice;
pub use remote::profile::{ProfileError, RemoteProfile, TemperatureControl};
pub use remote::types::{FanSpeed, Mode, Power, RemoteState, TemperatureRange};
pub use remote::{RemoteController, RemoteError};
