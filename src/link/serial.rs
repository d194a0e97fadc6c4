use embedded_hal::serial::{Read, Write};

use super::traits::ModemLink;

/// Runtime baud rate control
///
/// `embedded-hal` 0.2 has no portable way to change the baud rate of an open
/// port, but the modem's wake sequence requires dropping to 300 baud and
/// back. HAL serial types (or wrappers around them) implement this to make
/// the [`SerialLink`] adapter usable with sleep/wake.
pub trait BaudControl {
    /// Reconfigure the port to `baud`
    fn set_baud_rate(&mut self, baud: u32);
}

/// Adapter from an `embedded-hal` serial port to [`ModemLink`]
pub struct SerialLink<S> {
    serial: S,
}

impl<S> SerialLink<S> {
    /// Wrap a serial port
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Release the wrapped port
    pub fn release(self) -> S {
        self.serial
    }
}

impl<S, E> ModemLink for SerialLink<S>
where
    S: Read<u8, Error = E> + Write<u8, Error = E> + BaudControl,
{
    type Error = E;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), E> {
        for byte in bytes {
            nb::block!(self.serial.write(*byte))?;
        }
        Ok(())
    }

    fn read(&mut self) -> nb::Result<u8, E> {
        self.serial.read()
    }

    fn flush(&mut self) -> Result<(), E> {
        nb::block!(self.serial.flush())
    }

    fn set_baud(&mut self, baud: u32) -> Result<(), E> {
        self.serial.set_baud_rate(baud);
        Ok(())
    }
}
