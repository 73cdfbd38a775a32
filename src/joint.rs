use crate::commands::{Channel, Frame, Mode};
use crate::transport::Transport;
use crate::{Error, Result};
use tracing::debug;

/// Register every command frame is written to.
pub const CONTROL_REGISTER: u8 = 0x0;

const MAX_ADDRESS: u16 = 0x7F;

/// One actuator driven by a channel of a NearZero board.
pub struct Joint<T> {
    name: String,
    address: u16,
    channel: Channel,
    transport: T,
}

impl<T: Transport> Joint<T> {
    pub fn new(name: impl Into<String>, address: u16, channel: Channel, transport: T) -> Result<Self> {
        if address > MAX_ADDRESS {
            return Err(Error::InvalidAddress(address));
        }
        Ok(Joint {
            name: name.into(),
            address,
            channel,
            transport,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one command to this joint's channel.
    pub fn write(&mut self, mode: Mode, speed: i64, current: u64) -> Result {
        let frame = Frame {
            channel: self.channel,
            mode,
            speed,
            current,
        };
        let data = frame.encode()?;
        debug!("{} @ 0x{:02X}: {}", self.name, self.address, frame);
        self.transport.write(CONTROL_REGISTER, &data[..])?;
        Ok(())
    }

    /// Odometry is not decoded by the boards' firmware yet, so nothing is read.
    pub fn read_odometry(&mut self) -> Result<Vec<u8>> {
        Err(Error::Unsupported("odometry readout"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{DummyTransport, TransportError};

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn write(&mut self, _register: u8, _payload: &[u8]) -> Result<(), TransportError> {
            Err(TransportError::NoBus("/dev/i2c-7".into()))
        }

        fn read(&mut self, _register: u8, _length: usize) -> Result<Vec<u8>, TransportError> {
            panic!("odometry must not touch the bus");
        }
    }

    #[test]
    fn write_sends_frame_for_own_channel() {
        let dummy = DummyTransport::new("/dev/i2c-0", 0x40);
        let mut joint = Joint::new("LeftWheel", 0x40, Channel::One, dummy).unwrap();
        joint.write(Mode::Velocity, 30, 20).unwrap();
        assert_eq!(joint.transport().last_command(), Some(&b"1v+00030c00020"[..]));
    }

    #[test]
    fn rejects_ten_bit_address() {
        let dummy = DummyTransport::new("/dev/i2c-0", 0x80);
        assert!(matches!(
            Joint::new("HeadYaw", 0x80, Channel::One, dummy),
            Err(Error::InvalidAddress(0x80))
        ));
    }

    #[test]
    fn overflow_is_caught_before_dispatch() {
        let dummy = DummyTransport::new("/dev/i2c-0", 0x40);
        let mut joint = Joint::new("RightWheel", 0x40, Channel::Two, dummy).unwrap();
        let err = joint.write(Mode::Velocity, 100_000, 0).unwrap_err();
        assert!(matches!(err, Error::Command(_)));
        assert_eq!(joint.transport().last_command(), None);
    }

    #[test]
    fn transport_failure_propagates() {
        let mut joint = Joint::new("HeadPitch", 0x41, Channel::Two, FailingTransport).unwrap();
        let err = joint.write(Mode::Position, 150, 50).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::NoBus(_))));
    }

    #[test]
    fn odometry_is_unsupported() {
        let mut joint = Joint::new("LeftWheel", 0x40, Channel::One, FailingTransport).unwrap();
        assert!(matches!(joint.read_odometry(), Err(Error::Unsupported(_))));
    }
}
