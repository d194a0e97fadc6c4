//! RADIO command group: direct access to the transceiver parameters
//!
//! These commands address the radio below the MAC layer. Most of them only
//! take effect while the MAC is paused.

use crate::device::on_off;
use crate::link::{Clock, ModemLink};
use crate::protocol::decimal;
use crate::protocol::keywords::{radio, Domain, OFF, ON};
use crate::protocol::request::{RequestEngine, RequestError};
use crate::types::{CodingRate, DataShaping, Modulation, SpreadingFactor};

/// RADIO command group, borrowed from the driver
pub struct RadioCommands<'a, L: ModemLink, C: Clock> {
    engine: &'a mut RequestEngine<L, C>,
}

impl<'a, L: ModemLink, C: Clock> RadioCommands<'a, L, C> {
    pub(crate) fn new(engine: &'a mut RequestEngine<L, C>) -> Self {
        Self { engine }
    }

    /// Gaussian data shaping used for FSK
    pub fn data_shaping(&mut self) -> Result<DataShaping, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::BT)?;
        match DataShaping::from_keyword(response.as_str().trim()) {
            Some(value) => Ok(value),
            None => self.engine.invalid(),
        }
    }

    /// Select the Gaussian data shaping
    pub fn set_data_shaping(
        &mut self,
        shaping: DataShaping,
    ) -> Result<(), RequestError<L::Error>> {
        self.engine.set(Domain::Radio, radio::BT, shaping.keyword())
    }

    /// Current modulation
    pub fn modulation(&mut self) -> Result<Modulation, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::MODULATION)?;
        match Modulation::from_keyword(response.as_str().trim()) {
            Some(value) => Ok(value),
            None => self.engine.invalid(),
        }
    }

    /// Switch between LoRa and FSK modulation
    pub fn set_modulation(&mut self, modulation: Modulation) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::MODULATION, modulation.keyword())
    }

    /// Operating frequency in hertz
    pub fn frequency(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::FREQ)
    }

    /// Tune the operating frequency in hertz
    pub fn set_frequency(&mut self, hz: u32) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::FREQ, &decimal::<12>(hz))
    }

    /// Output power in dBm
    pub fn output_power(&mut self) -> Result<i8, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::POWER)
    }

    /// Set the output power in dBm, -3 to 15
    pub fn set_output_power(&mut self, dbm: i8) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::POWER, &decimal::<8>(dbm))
    }

    /// Current spreading factor
    pub fn spreading_factor(&mut self) -> Result<SpreadingFactor, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::SPREADING_FACTOR)?;
        let parsed = response
            .as_str()
            .trim()
            .strip_prefix("sf")
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(SpreadingFactor::from_value);
        match parsed {
            Some(value) => Ok(value),
            None => self.engine.invalid(),
        }
    }

    /// Select the spreading factor
    pub fn set_spreading_factor(
        &mut self,
        sf: SpreadingFactor,
    ) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::SPREADING_FACTOR, sf.keyword())
    }

    /// Automatic frequency correction bandwidth in kilohertz
    pub fn afc_bandwidth(&mut self) -> Result<f32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::AFC_BW)
    }

    /// Set the automatic frequency correction bandwidth in kilohertz
    pub fn set_afc_bandwidth(&mut self, khz: f32) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::AFC_BW, &decimal::<16>(khz))
    }

    /// Receiver bandwidth in kilohertz
    pub fn rx_bandwidth(&mut self) -> Result<f32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::RX_BW)
    }

    /// FSK bit rate in bits per second
    pub fn bit_rate(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::BIT_RATE)
    }

    /// FSK frequency deviation in hertz
    pub fn freq_deviation(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::FREQ_DEV)
    }

    /// Preamble length in symbols
    pub fn preamble_length(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::PREAMBLE_LEN)
    }

    /// Whether a CRC header is transmitted
    pub fn crc(&mut self) -> Result<bool, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::CRC)?;
        on_off(self.engine, &response)
    }

    /// Enable or disable the CRC header
    pub fn set_crc(&mut self, enabled: bool) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Radio, radio::CRC, if enabled { ON } else { OFF })
    }

    /// Whether the IQ signal is inverted
    pub fn iq_invert(&mut self) -> Result<bool, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::IQ_INVERT)?;
        on_off(self.engine, &response)
    }

    /// Current forward error correction coding rate
    pub fn coding_rate(&mut self) -> Result<CodingRate, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::CODING_RATE)?;
        match CodingRate::from_keyword(response.as_str().trim()) {
            Some(value) => Ok(value),
            None => self.engine.invalid(),
        }
    }

    /// Watchdog timeout in milliseconds, 0 disabled
    pub fn watchdog(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::WATCHDOG)
    }

    /// LoRa bandwidth in kilohertz, 125/250/500
    pub fn bandwidth(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::BANDWIDTH)
    }

    /// Signal-to-noise ratio of the last received packet, in dB
    pub fn snr(&mut self) -> Result<i16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Radio, radio::SNR)
    }

    /// Radio sync word
    pub fn sync_word(&mut self) -> Result<u8, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Radio, radio::SYNC)?;
        match u8::from_str_radix(response.as_str().trim(), 16) {
            Ok(value) => Ok(value),
            Err(_) => self.engine.invalid(),
        }
    }
}
