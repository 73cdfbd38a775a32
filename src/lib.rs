//! Control of a differential drive robot built on NearZero brushless motor
//! controllers reached over I2C.

mod commands;
mod intent;
mod joint;
mod kinematics;
mod robot;
mod transport;

pub use crate::commands::{
    Channel, Error as CommandError, Frame, Mode, FRAME_LEN, MAX_CURRENT, MAX_SPEED,
};
pub use crate::intent::{Intent, HELP_KEY, KEY_HELP, QUIT_KEY};
pub use crate::joint::{Joint, CONTROL_REGISTER};
pub use crate::kinematics::{compute as compute_drive, current_for, DriveCommand, WheelCommand};
pub use crate::robot::{Joints, MotionState, Robot, RobotConfig};
pub use crate::transport::{
    Bus, DummyTransport, I2cTransport, Transport, TransportConfig, TransportError,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("error with command: {0}")]
    Command(#[from] commands::Error),
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    #[error("address 0x{0:02X} is not a 7-bit I2C address")]
    InvalidAddress(u16),
    #[error("channel {0:?} does not exist on a NearZero board")]
    InvalidChannel(char),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
