use std::fmt;

/// Number of bytes in an encoded command frame.
pub const FRAME_LEN: usize = 14;

/// Largest speed magnitude that fits in the `+DDDDD` field.
pub const MAX_SPEED: i64 = 99_999;

/// Largest current that fits in the `DDDDD` field.
pub const MAX_CURRENT: u64 = 99_999;

const CURRENT_SEPARATOR: u8 = b'c';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("speed {0} does not fit in the 6 character speed field")]
    SpeedOverflow(i64),
    #[error("current {0} does not fit in the 5 character current field")]
    CurrentOverflow(u64),
    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// Output selector on a NearZero board. Each board drives two outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    One,
    Two,
}

impl Channel {
    pub fn from_char(c: char) -> crate::Result<Channel> {
        Channel::try_from(c).map_err(crate::Error::InvalidChannel)
    }

    pub fn as_char(&self) -> char {
        match self {
            Channel::One => '1',
            Channel::Two => '2',
        }
    }
}

impl TryFrom<char> for Channel {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            '1' => Ok(Channel::One),
            '2' => Ok(Channel::Two),
            other => Err(other),
        }
    }
}

/// Control mode of a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Velocity,
    Position,
}

impl Mode {
    pub fn as_char(&self) -> char {
        match self {
            Mode::Velocity => 'v',
            Mode::Position => 'p',
        }
    }
}

impl TryFrom<char> for Mode {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            'v' => Ok(Mode::Velocity),
            'p' => Ok(Mode::Position),
            other => Err(other),
        }
    }
}

/// One command for one channel of a NearZero board.
///
/// On the wire a frame is 14 ASCII bytes:
/// `<channel><mode><sign><5 speed digits>c<5 current digits>`, e.g.
/// `1v+00030c00020`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub channel: Channel,
    pub mode: Mode,
    pub speed: i64,
    pub current: u64,
}

impl Frame {
    /// Encodes the frame, rejecting values wider than their fields instead of truncating them.
    pub fn encode(&self) -> Result<[u8; FRAME_LEN], Error> {
        if self.speed.unsigned_abs() > MAX_SPEED.unsigned_abs() {
            return Err(Error::SpeedOverflow(self.speed));
        }
        if self.current > MAX_CURRENT {
            return Err(Error::CurrentOverflow(self.current));
        }
        let text = format!(
            "{}{}{:+06}{}{:05}",
            self.channel.as_char(),
            self.mode.as_char(),
            self.speed,
            CURRENT_SEPARATOR as char,
            self.current,
        );
        let mut out = [0u8; FRAME_LEN];
        out.copy_from_slice(text.as_bytes());
        Ok(out)
    }

    /// Parses an encoded frame back into its fields.
    pub fn parse(data: &[u8]) -> Result<Frame, Error> {
        if data.len() != FRAME_LEN {
            return Err(Error::Malformed(format!(
                "expected {FRAME_LEN} bytes, got {}",
                data.len()
            )));
        }
        let text = std::str::from_utf8(data)
            .map_err(|_| Error::Malformed("frame is not ASCII".to_string()))?;
        if !text.is_ascii() {
            return Err(Error::Malformed("frame is not ASCII".to_string()));
        }

        let channel = Channel::try_from(data[0] as char)
            .map_err(|c| Error::Malformed(format!("unknown channel {c:?}")))?;
        let mode = Mode::try_from(data[1] as char)
            .map_err(|c| Error::Malformed(format!("unknown mode {c:?}")))?;

        let speed_field = &text[2..8];
        if !matches!(data[2], b'+' | b'-') || !all_digits(&speed_field[1..]) {
            return Err(Error::Malformed(format!("bad speed field {speed_field:?}")));
        }
        let speed = speed_field
            .parse::<i64>()
            .map_err(|e| Error::Malformed(format!("bad speed field {speed_field:?}: {e}")))?;

        if data[8] != CURRENT_SEPARATOR {
            return Err(Error::Malformed(format!(
                "expected current separator, got {:?}",
                data[8] as char
            )));
        }
        let current_field = &text[9..];
        if !all_digits(current_field) {
            return Err(Error::Malformed(format!(
                "bad current field {current_field:?}"
            )));
        }
        let current = current_field
            .parse::<u64>()
            .map_err(|e| Error::Malformed(format!("bad current field {current_field:?}: {e}")))?;

        Ok(Frame {
            channel,
            mode,
            speed,
            current,
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel={} mode={} speed={} current={}",
            self.channel.as_char(),
            self.mode.as_char(),
            self.speed,
            self.current
        )
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(channel: Channel, mode: Mode, speed: i64, current: u64) -> Frame {
        Frame {
            channel,
            mode,
            speed,
            current,
        }
    }

    #[test]
    fn encodes_velocity_frame() {
        let out = frame(Channel::One, Mode::Velocity, 30, 20).encode().unwrap();
        assert_eq!(&out, b"1v+00030c00020");
    }

    #[test]
    fn encodes_negative_position_frame() {
        let out = frame(Channel::Two, Mode::Position, -150, 50).encode().unwrap();
        assert_eq!(&out, b"2p-00150c00050");
    }

    #[test]
    fn zero_speed_has_plus_sign() {
        let out = frame(Channel::One, Mode::Velocity, 0, 0).encode().unwrap();
        assert_eq!(&out, b"1v+00000c00000");
    }

    #[test]
    fn speed_limits_fit_without_truncation() {
        let out = frame(Channel::One, Mode::Velocity, 99_999, 99_999)
            .encode()
            .unwrap();
        assert_eq!(&out, b"1v+99999c99999");
        let out = frame(Channel::One, Mode::Velocity, -99_999, 0)
            .encode()
            .unwrap();
        assert_eq!(&out, b"1v-99999c00000");
    }

    #[test]
    fn rejects_wide_values() {
        assert_eq!(
            frame(Channel::One, Mode::Velocity, 100_000, 0).encode(),
            Err(Error::SpeedOverflow(100_000))
        );
        assert_eq!(
            frame(Channel::One, Mode::Velocity, -100_000, 0).encode(),
            Err(Error::SpeedOverflow(-100_000))
        );
        assert_eq!(
            frame(Channel::One, Mode::Velocity, i64::MIN, 0).encode(),
            Err(Error::SpeedOverflow(i64::MIN))
        );
        assert_eq!(
            frame(Channel::Two, Mode::Position, 0, 100_000).encode(),
            Err(Error::CurrentOverflow(100_000))
        );
    }

    #[test]
    fn parse_recovers_encoded_fields() {
        let speeds = [-99_999, -54_321, -150, -1, 0, 1, 40, 500, 99_999];
        let currents = [0, 1, 50, 12_345, 99_999];
        for channel in [Channel::One, Channel::Two] {
            for mode in [Mode::Velocity, Mode::Position] {
                for &speed in &speeds {
                    for &current in &currents {
                        let original = frame(channel, mode, speed, current);
                        let parsed = Frame::parse(&original.encode().unwrap()).unwrap();
                        assert_eq!(parsed, original);
                    }
                }
            }
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(Frame::parse(b"1v+00030c0002"), Err(Error::Malformed(_))));
        assert!(matches!(Frame::parse(b"3v+00030c00020"), Err(Error::Malformed(_))));
        assert!(matches!(Frame::parse(b"1x+00030c00020"), Err(Error::Malformed(_))));
        assert!(matches!(Frame::parse(b"1v 00030c00020"), Err(Error::Malformed(_))));
        assert!(matches!(Frame::parse(b"1v+00030x00020"), Err(Error::Malformed(_))));
        assert!(matches!(Frame::parse(b"1v+00030c-0020"), Err(Error::Malformed(_))));
    }

    #[test]
    fn channel_from_char() {
        assert_eq!(Channel::try_from('1'), Ok(Channel::One));
        assert_eq!(Channel::try_from('2'), Ok(Channel::Two));
        assert_eq!(Channel::try_from('3'), Err('3'));
        assert!(matches!(
            Channel::from_char('x'),
            Err(crate::Error::InvalidChannel('x'))
        ));
    }
}
