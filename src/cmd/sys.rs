//! SYS command group: firmware, EEPROM, pins, supply voltage, reset

use core::fmt::Write as _;

use heapless::String;

use crate::device::decode_fixed;
use crate::link::{Clock, ModemLink};
use crate::protocol::keywords::{sys, Domain, GET, SET};
use crate::protocol::request::{RequestEngine, RequestError, Response};
use crate::types::Eui;

/// GPIO pin function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital output
    DigitalOut,
    /// Digital input
    DigitalIn,
    /// Analog input
    Analog,
}

impl PinMode {
    /// Protocol keyword (`digout`, `digin`, `ana`)
    pub fn keyword(self) -> &'static str {
        match self {
            PinMode::DigitalOut => "digout",
            PinMode::DigitalIn => "digin",
            PinMode::Analog => "ana",
        }
    }
}

/// SYS command group, borrowed from the driver
pub struct SysCommands<'a, L: ModemLink, C: Clock> {
    engine: &'a mut RequestEngine<L, C>,
}

impl<'a, L: ModemLink, C: Clock> SysCommands<'a, L, C> {
    pub(crate) fn new(engine: &'a mut RequestEngine<L, C>) -> Self {
        Self { engine }
    }

    /// Firmware version banner
    pub fn version(&mut self) -> Result<Response, RequestError<L::Error>> {
        self.engine.get(Domain::Sys, sys::VERSION)
    }

    /// Preprogrammed hardware EUI
    pub fn hardware_eui(&mut self) -> Result<Eui, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Sys, sys::HW_EUI)?;
        decode_fixed(self.engine, &response)
    }

    /// Supply voltage in millivolts
    pub fn vdd_mv(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Sys, sys::VDD)
    }

    /// Read one byte of user EEPROM; valid addresses are 0x300–0x3FF
    pub fn nvm_get(&mut self, address: u16) -> Result<u8, RequestError<L::Error>> {
        let addr = hex_value::<4>(address);
        let response = self
            .engine
            .request(Domain::Sys, GET, Some(sys::NVM), Some(&addr))?;
        match u8::from_str_radix(response.as_str().trim(), 16) {
            Ok(value) => Ok(value),
            Err(_) => self.engine.invalid(),
        }
    }

    /// Write one byte of user EEPROM; valid addresses are 0x300–0x3FF
    pub fn nvm_set(&mut self, address: u16, value: u8) -> Result<(), RequestError<L::Error>> {
        let mut arg: String<8> = hex_value::<8>(address);
        let _ = arg.push(' ');
        let _ = arg.push_str(&hex_value::<2>(value));
        self.engine
            .request(Domain::Sys, SET, Some(sys::NVM), Some(&arg))
            .map(|_| ())
    }

    /// Digital pin state
    pub fn pin_dig(&mut self, pin: &str) -> Result<bool, RequestError<L::Error>> {
        let response = self
            .engine
            .request(Domain::Sys, GET, Some(sys::PIN_DIG), Some(pin))?;
        match response.as_str().trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => self.engine.invalid(),
        }
    }

    /// Drive a digital pin
    pub fn set_pin_dig(&mut self, pin: &str, high: bool) -> Result<(), RequestError<L::Error>> {
        let mut arg: String<16> = String::new();
        let _ = arg.push_str(pin);
        let _ = arg.push(' ');
        let _ = arg.push(if high { '1' } else { '0' });
        self.engine
            .request(Domain::Sys, SET, Some(sys::PIN_DIG), Some(&arg))
            .map(|_| ())
    }

    /// Analog pin reading
    pub fn pin_ana(&mut self, pin: &str) -> Result<u16, RequestError<L::Error>> {
        let response = self
            .engine
            .request(Domain::Sys, GET, Some(sys::PIN_ANA), Some(pin))?;
        self.engine.parse_value(&response)
    }

    /// Configure a pin's function
    pub fn set_pin_mode(&mut self, pin: &str, mode: PinMode) -> Result<(), RequestError<L::Error>> {
        let mut arg: String<24> = String::new();
        let _ = arg.push_str(pin);
        let _ = arg.push(' ');
        let _ = arg.push_str(mode.keyword());
        self.engine
            .request(Domain::Sys, SET, Some(sys::PIN_MODE), Some(&arg))
            .map(|_| ())
    }

    /// Software-reset the modem; the response is the version banner
    pub fn reset(&mut self) -> Result<Response, RequestError<L::Error>> {
        self.engine.request(Domain::Sys, sys::RESET, None, None)
    }

    /// Put the modem to sleep for `ms` milliseconds
    pub fn sleep(&mut self, ms: u32) -> Result<bool, RequestError<L::Error>> {
        self.engine.sleep(ms)
    }
}

/// Format a value as uppercase hex ASCII
fn hex_value<const N: usize>(value: impl core::fmt::UpperHex) -> String<N> {
    let mut out = String::new();
    let _ = write!(out, "{:X}", value);
    out
}
