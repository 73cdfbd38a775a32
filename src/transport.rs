use crate::commands::Frame;
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("I2C error: {0}")]
    I2c(#[from] LinuxI2CError),
    #[error("I2C bus {} does not exist", .0.display())]
    NoBus(PathBuf),
}

/// Register-style access to one device on a bus.
pub trait Transport {
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError>;
    fn read(&mut self, register: u8, length: usize) -> Result<Vec<u8>, TransportError>;
}

/// Tuning shared by every transport a robot opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Use [`DummyTransport`] instead of touching the bus.
    pub debug: bool,
    /// Pause between pages of a multi-page write.
    pub delay: Duration,
    /// Largest payload written in a single bus transaction.
    pub page_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            debug: false,
            delay: Duration::from_millis(10),
            page_bytes: 16,
        }
    }
}

/// A device on a Linux I2C bus.
pub struct I2cTransport {
    device: LinuxI2CDevice,
    address: u16,
    delay: Duration,
    page_bytes: usize,
}

impl I2cTransport {
    pub fn open<P: AsRef<Path>>(
        bus: P,
        address: u16,
        config: &TransportConfig,
    ) -> Result<I2cTransport, TransportError> {
        let bus = bus.as_ref();
        if !bus.exists() {
            return Err(TransportError::NoBus(bus.to_path_buf()));
        }
        info!("Opening I2C device 0x{:02X} on {}", address, bus.display());
        Ok(I2cTransport {
            device: LinuxI2CDevice::new(bus, address)?,
            address,
            delay: config.delay,
            page_bytes: config.page_bytes.max(1),
        })
    }
}

impl Transport for I2cTransport {
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        for (page, chunk) in payload.chunks(self.page_bytes).enumerate() {
            if page > 0 {
                std::thread::sleep(self.delay);
            }
            let offset = (page * self.page_bytes) as u8;
            let mut data = Vec::with_capacity(chunk.len() + 1);
            data.push(register.wrapping_add(offset));
            data.extend_from_slice(chunk);
            debug!("i2c 0x{:02X} <- {:02X?}", self.address, data);
            self.device.write(&data[..])?;
        }
        Ok(())
    }

    fn read(&mut self, register: u8, length: usize) -> Result<Vec<u8>, TransportError> {
        self.device.write(&[register])?;
        let mut data = vec![0; length];
        self.device.read(&mut data[..])?;
        Ok(data)
    }
}

/// Stand-in for a bus device that only logs what it is sent.
#[derive(Debug, Clone)]
pub struct DummyTransport {
    bus: PathBuf,
    address: u16,
    last_command: Option<Vec<u8>>,
}

impl DummyTransport {
    pub fn new<P: AsRef<Path>>(bus: P, address: u16) -> DummyTransport {
        DummyTransport {
            bus: bus.as_ref().to_path_buf(),
            address,
            last_command: None,
        }
    }

    pub fn last_command(&self) -> Option<&[u8]> {
        self.last_command.as_deref()
    }
}

impl Transport for DummyTransport {
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        match Frame::parse(payload) {
            Ok(frame) => info!(
                "i2c: {} 0x{:02X} reg {} {} ({})",
                self.bus.display(),
                self.address,
                register,
                String::from_utf8_lossy(payload),
                frame
            ),
            Err(_) => info!(
                "i2c: {} 0x{:02X} reg {} {:02X?}",
                self.bus.display(),
                self.address,
                register,
                payload
            ),
        }
        self.last_command = Some(payload.to_vec());
        Ok(())
    }

    fn read(&mut self, register: u8, length: usize) -> Result<Vec<u8>, TransportError> {
        info!(
            "i2c read: 0x{:02X} reg {} last command {:?}",
            self.address,
            register,
            self.last_command.as_deref().map(String::from_utf8_lossy)
        );
        let mut data = self.last_command.clone().unwrap_or_default();
        data.resize(length, 0);
        Ok(data)
    }
}

/// The bus a joint talks through, picked by [`TransportConfig::debug`].
pub enum Bus {
    I2c(I2cTransport),
    Dummy(DummyTransport),
}

impl Bus {
    pub fn open<P: AsRef<Path>>(
        bus: P,
        address: u16,
        config: &TransportConfig,
    ) -> Result<Bus, TransportError> {
        if config.debug {
            Ok(Bus::Dummy(DummyTransport::new(bus, address)))
        } else {
            Ok(Bus::I2c(I2cTransport::open(bus, address, config)?))
        }
    }
}

impl Transport for Bus {
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        match self {
            Bus::I2c(t) => t.write(register, payload),
            Bus::Dummy(t) => t.write(register, payload),
        }
    }

    fn read(&mut self, register: u8, length: usize) -> Result<Vec<u8>, TransportError> {
        match self {
            Bus::I2c(t) => t.read(register, length),
            Bus::Dummy(t) => t.read(register, length),
        }
    }
}
