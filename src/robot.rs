use crate::commands::{Channel, Mode};
use crate::intent::Intent;
use crate::joint::Joint;
use crate::kinematics::{self, DriveCommand};
use crate::transport::{Bus, Transport, TransportConfig};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::info;

pub const FORWARD_STEP: i32 = 20;
pub const SIDEWAYS_STEP: i32 = 10;
pub const PITCH_STEP: i32 = 150;
pub const YAW_STEP: i32 = 500;
pub const ROLL_STEP: i32 = 100;

/// Current used to hold the head at a position.
pub const HEAD_CURRENT: u64 = 50;

/// How to reach the boards of a robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotConfig {
    /// I2C bus of the wheel board.
    pub wheel_dev: PathBuf,
    pub wheel_addr: u16,
    /// I2C bus of the head board(s).
    pub head_dev: PathBuf,
    pub head_addr: u16,
    /// Board for the head roll axis, if fitted. Uses channel 1 on `head_dev`.
    pub head_roll_addr: Option<u16>,
    pub transport: TransportConfig,
    /// Log the computed wheel commands on every move.
    pub verbose: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            wheel_dev: PathBuf::from("/dev/i2c-0"),
            wheel_addr: 0x40,
            head_dev: PathBuf::from("/dev/i2c-0"),
            head_addr: 0x41,
            head_roll_addr: None,
            transport: TransportConfig::default(),
            verbose: false,
        }
    }
}

/// Requested motion. Head angles accumulate without bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionState {
    pub forward: i32,
    pub sideways: i32,
    pub yaw: i32,
    pub pitch: i32,
    pub roll: i32,
}

/// The actuators of a robot.
pub struct Joints<T> {
    pub left_wheel: Joint<T>,
    pub right_wheel: Joint<T>,
    pub head_yaw: Joint<T>,
    pub head_pitch: Joint<T>,
    pub head_roll: Option<Joint<T>>,
}

/// A differential drive robot with a pan/tilt head.
pub struct Robot<T = Bus> {
    joints: Joints<T>,
    state: MotionState,
    verbose: bool,
}

impl Robot<Bus> {
    /// Opens every joint described by `config`.
    pub fn new(config: &RobotConfig) -> Result<Self> {
        let wheel = |name: &str, channel| -> Result<Joint<Bus>> {
            let bus = Bus::open(&config.wheel_dev, config.wheel_addr, &config.transport)?;
            Joint::new(name, config.wheel_addr, channel, bus)
        };
        let head = |name: &str, address, channel| -> Result<Joint<Bus>> {
            let bus = Bus::open(&config.head_dev, address, &config.transport)?;
            Joint::new(name, address, channel, bus)
        };

        let joints = Joints {
            left_wheel: wheel("LeftWheel", Channel::One)?,
            right_wheel: wheel("RightWheel", Channel::Two)?,
            head_yaw: head("HeadYaw", config.head_addr, Channel::One)?,
            head_pitch: head("HeadPitch", config.head_addr, Channel::Two)?,
            head_roll: config
                .head_roll_addr
                .map(|address| head("HeadRoll", address, Channel::One))
                .transpose()?,
        };
        Ok(Robot::from_joints(joints, config.verbose))
    }
}

impl<T: Transport> Robot<T> {
    pub fn from_joints(joints: Joints<T>, verbose: bool) -> Self {
        Robot {
            joints,
            state: MotionState::default(),
            verbose,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn joints(&self) -> &Joints<T> {
        &self.joints
    }

    pub fn apply(&mut self, intent: Intent) -> Result {
        match intent {
            Intent::GoForward => self.go_forward(),
            Intent::GoBackwards => self.go_backwards(),
            Intent::GoLeft => self.go_left(),
            Intent::GoRight => self.go_right(),
            Intent::StopMove => self.stop_move(),
            Intent::MoveAhead(speed) => self.move_ahead(speed),
            Intent::MoveSideways(speed) => self.move_sideways(speed),
            Intent::HeadUp => self.head_up(),
            Intent::HeadDown => self.head_down(),
            Intent::HeadLeft => self.head_left(),
            Intent::HeadRight => self.head_right(),
            Intent::HeadRollLeft => self.head_roll_left(),
            Intent::HeadRollRight => self.head_roll_right(),
            Intent::HeadStop => self.head_stop(),
        }
    }

    pub fn go_forward(&mut self) -> Result {
        self.state.forward = self.state.forward.saturating_add(FORWARD_STEP);
        self.move_base()
    }

    pub fn go_backwards(&mut self) -> Result {
        self.state.forward = self.state.forward.saturating_sub(FORWARD_STEP);
        self.move_base()
    }

    pub fn go_left(&mut self) -> Result {
        self.state.sideways = self.state.sideways.saturating_sub(SIDEWAYS_STEP);
        self.move_base()
    }

    pub fn go_right(&mut self) -> Result {
        self.state.sideways = self.state.sideways.saturating_add(SIDEWAYS_STEP);
        self.move_base()
    }

    pub fn stop_move(&mut self) -> Result {
        self.state.forward = 0;
        self.state.sideways = 0;
        self.move_base()
    }

    /// Drives straight at a fixed `speed`, negative for backwards.
    pub fn move_ahead(&mut self, speed: i32) -> Result {
        self.state.forward = speed;
        self.move_base()
    }

    /// Turns at a fixed `speed`.
    pub fn move_sideways(&mut self, speed: i32) -> Result {
        self.state.sideways = speed;
        self.move_base()
    }

    pub fn head_up(&mut self) -> Result {
        self.state.pitch = self.state.pitch.saturating_add(PITCH_STEP);
        let pitch = self.state.pitch;
        self.joints
            .head_pitch
            .write(Mode::Position, pitch.into(), HEAD_CURRENT)
    }

    pub fn head_down(&mut self) -> Result {
        self.state.pitch = self.state.pitch.saturating_sub(PITCH_STEP);
        let pitch = self.state.pitch;
        self.joints
            .head_pitch
            .write(Mode::Position, pitch.into(), HEAD_CURRENT)
    }

    pub fn head_left(&mut self) -> Result {
        self.state.yaw = self.state.yaw.saturating_sub(YAW_STEP);
        let yaw = self.state.yaw;
        self.joints
            .head_yaw
            .write(Mode::Position, yaw.into(), HEAD_CURRENT)
    }

    pub fn head_right(&mut self) -> Result {
        self.state.yaw = self.state.yaw.saturating_add(YAW_STEP);
        let yaw = self.state.yaw;
        self.joints
            .head_yaw
            .write(Mode::Position, yaw.into(), HEAD_CURRENT)
    }

    /// Fails with [`Error::Unsupported`], leaving the roll untouched, when no roll joint is fitted.
    pub fn head_roll_left(&mut self) -> Result {
        let roll = self.joints.head_roll.as_mut().ok_or(Error::Unsupported("head roll"))?;
        self.state.roll = self.state.roll.saturating_sub(ROLL_STEP);
        roll.write(Mode::Position, self.state.roll.into(), HEAD_CURRENT)
    }

    pub fn head_roll_right(&mut self) -> Result {
        let roll = self.joints.head_roll.as_mut().ok_or(Error::Unsupported("head roll"))?;
        self.state.roll = self.state.roll.saturating_add(ROLL_STEP);
        roll.write(Mode::Position, self.state.roll.into(), HEAD_CURRENT)
    }

    /// De-energizes the head, leaving every axis where it is.
    pub fn head_stop(&mut self) -> Result {
        let state = self.state;
        self.joints
            .head_pitch
            .write(Mode::Position, state.pitch.into(), 0)?;
        self.joints
            .head_yaw
            .write(Mode::Position, state.yaw.into(), 0)?;
        if let Some(roll) = self.joints.head_roll.as_mut() {
            roll.write(Mode::Position, state.roll.into(), 0)?;
        }
        Ok(())
    }

    pub fn odometry(&mut self) -> Result<Vec<u8>> {
        self.joints.left_wheel.read_odometry()
    }

    /// Sends the wheel commands for the current forward/sideways velocity.
    pub fn move_base(&mut self) -> Result {
        let DriveCommand { left, right } =
            kinematics::compute(self.state.forward, self.state.sideways);
        self.joints
            .left_wheel
            .write(Mode::Velocity, left.velocity, left.current)?;
        self.joints
            .right_wheel
            .write(Mode::Velocity, right.velocity, right.current)?;
        if self.verbose {
            info!(
                "current_left={} current_right={} vel_left={} vel_right={}",
                left.current, right.current, left.velocity, right.velocity
            );
        }
        Ok(())
    }
}
