/// Register-level access to the APDS-9960 ambient light engine
use embedded_hal::i2c::I2c;

/// Fixed bus address of the APDS-9960.
pub const I2C_ADDRESS: u8 = 0x39;

const REG_ENABLE: u8 = 0x80;
const REG_ID: u8 = 0x92;
const REG_CDATAL: u8 = 0x94;

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

// Known ID register values across chip revisions.
const DEVICE_IDS: [u8; 2] = [0xAB, 0x9C];

/// Driver for the ambient-light half of the APDS-9960.
///
/// Only the color/ALS engine is touched; proximity and gesture stay
/// disabled. Generic over any `embedded_hal` I2C bus so tests can run
/// against a fake bus.
pub struct Apds9960<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Apds9960<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Apds9960 { i2c }
    }

    /// Read the ID register and confirm the chip responds with a known
    /// revision value.
    pub fn is_supported_device(&mut self) -> Result<bool, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(I2C_ADDRESS, &[REG_ID], &mut buf)?;
        Ok(DEVICE_IDS.contains(&buf[0]))
    }

    /// Power the chip on with the ambient-light engine enabled.
    pub fn enable_light_sensor(&mut self) -> Result<(), I2C::Error> {
        self.i2c
            .write(I2C_ADDRESS, &[REG_ENABLE, ENABLE_PON | ENABLE_AEN])
    }

    /// Current clear-channel ambient light count.
    ///
    /// CDATAL/CDATAH are read in one transaction; the chip auto-increments
    /// the register pointer, so the two bytes form one coherent
    /// little-endian sample.
    pub fn read_ambient_light(&mut self) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(I2C_ADDRESS, &[REG_CDATAL], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }
}
