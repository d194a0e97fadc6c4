//! High-level modem driver
//!
//! [`Rn2483`] owns one [`RequestEngine`] and exposes the typed parameter
//! surface on top of it: MAC-level getters/setters here, the SYS and RADIO
//! command groups through [`Rn2483::sys`] and [`Rn2483::radio`]. The joined
//! flag gates uplinks; the driver never rejoins on its own.

use crate::cmd::{RadioCommands, SysCommands};
use crate::codec::hex;
use crate::link::{Clock, ModemLink};
use crate::protocol::decimal;
use crate::protocol::downlink::DownlinkMessage;
use crate::protocol::keywords::{mac, Domain, GET, JOIN_TIMEOUT_MS, OFF, ON, OTAA, SET};
use crate::protocol::request::{RequestEngine, RequestError, Response};
use crate::protocol::response::{ErrorKind, SuccessKind};
use crate::types::{AesKey, DataRate, DevAddr, Eui, PowerIndex, Uplink};

/// RN2483 modem driver
pub struct Rn2483<L: ModemLink, C: Clock> {
    engine: RequestEngine<L, C>,
    downlink: DownlinkMessage,
    joined: bool,
}

impl<L: ModemLink, C: Clock> Rn2483<L, C> {
    /// Create a driver over the given link and clock
    pub fn new(link: L, clock: C) -> Self {
        Self {
            engine: RequestEngine::new(link, clock),
            downlink: DownlinkMessage::new(),
            joined: false,
        }
    }

    /// Release the link and clock
    pub fn free(self) -> (L, C) {
        self.engine.free()
    }

    /// SYS command group
    pub fn sys(&mut self) -> SysCommands<'_, L, C> {
        SysCommands::new(&mut self.engine)
    }

    /// RADIO command group
    pub fn radio(&mut self) -> RadioCommands<'_, L, C> {
        RadioCommands::new(&mut self.engine)
    }

    /// Success kind of the latest resolved transaction
    pub fn last_success(&self) -> Option<SuccessKind> {
        self.engine.last_success()
    }

    /// Error kind of the latest resolved transaction
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.engine.last_error()
    }

    /// Whether a join has succeeded during this session
    pub fn joined(&self) -> bool {
        self.joined
    }

    /// The latest downlink message
    pub fn downlink(&self) -> &DownlinkMessage {
        &self.downlink
    }

    // --- activation and transmission ---

    /// Configure OTAA keys and join the network
    pub fn join_otaa(
        &mut self,
        dev_eui: &Eui,
        app_eui: &Eui,
        app_key: &AesKey,
    ) -> Result<(), RequestError<L::Error>> {
        self.set_dev_eui(dev_eui)?;
        self.set_app_eui(app_eui)?;
        self.set_app_key(app_key)?;
        self.join()
    }

    /// Join using the modem's preprogrammed hardware EUI as device EUI
    pub fn join_otaa_with_hw_eui(
        &mut self,
        app_eui: &Eui,
        app_key: &AesKey,
    ) -> Result<(), RequestError<L::Error>> {
        let hw_eui = self.sys().hardware_eui()?;
        self.join_otaa(&hw_eui, app_eui, app_key)
    }

    /// Load ABP session keys
    pub fn set_abp_keys(
        &mut self,
        nwk_skey: &AesKey,
        app_skey: &AesKey,
    ) -> Result<(), RequestError<L::Error>> {
        self.set_nwk_skey(nwk_skey)?;
        self.set_app_skey(app_skey)
    }

    /// Issue `mac join otaa` and wait out the join exchange
    ///
    /// Two-stage: the immediate `ok`, then `accepted` or `denied` within
    /// the join timeout (time on air plus the RX2 window delay).
    pub fn join(&mut self) -> Result<(), RequestError<L::Error>> {
        self.joined = false;
        self.engine
            .request(Domain::Mac, mac::JOIN, Some(OTAA), None)?;
        self.engine.read_response(JOIN_TIMEOUT_MS)?;
        if self.engine.last_success() == Some(SuccessKind::Accepted) {
            self.joined = true;
            Ok(())
        } else {
            self.engine.set_last_error(ErrorKind::JoinDenied);
            Err(RequestError::Failed(ErrorKind::JoinDenied))
        }
    }

    /// Transmit an uplink on `port`
    ///
    /// Requires a prior successful join; network-not-joined is surfaced to
    /// the caller, never auto-rejoined. A downlink received in response is
    /// stored and readable through [`Rn2483::downlink`] until the next
    /// uplink attempt, successful or not, invalidates it.
    pub fn send(
        &mut self,
        kind: Uplink,
        port: u8,
        data: &[u8],
    ) -> Result<(), RequestError<L::Error>> {
        if !self.joined {
            self.engine.set_last_error(ErrorKind::NotJoined);
            return Err(RequestError::Failed(ErrorKind::NotJoined));
        }
        // Every transmission attempt drops the stored downlink, including
        // attempts that fail mid-flight.
        self.downlink.clear();
        let second = self.engine.uplink(kind, port, data)?;
        if let Some(response) = second {
            if self.engine.last_success() == Some(SuccessKind::Rx) {
                self.downlink.set_from_notice(response.as_str());
            }
        }
        Ok(())
    }

    /// Transmit an unconfirmed uplink on `port`
    pub fn send_unconfirmed(
        &mut self,
        port: u8,
        data: &[u8],
    ) -> Result<(), RequestError<L::Error>> {
        self.send(Uplink::Unconfirmed, port, data)
    }

    // --- power management ---

    /// Put the modem to sleep for `ms` milliseconds
    ///
    /// Returns whether the modem is now believed asleep; subsequent
    /// requests wake it transparently.
    pub fn sleep(&mut self, ms: u32) -> Result<bool, RequestError<L::Error>> {
        self.engine.sleep(ms)
    }

    /// Whether the modem is believed asleep
    pub fn is_asleep(&self) -> bool {
        self.engine.is_asleep()
    }

    // --- session persistence ---

    /// Persist MAC configuration to the modem's EEPROM
    pub fn save(&mut self) -> Result<(), RequestError<L::Error>> {
        self.engine
            .request(Domain::Mac, mac::SAVE, None, None)
            .map(|_| ())
    }

    /// Pause the MAC layer for direct radio access
    pub fn pause(&mut self) -> Result<(), RequestError<L::Error>> {
        self.engine
            .request(Domain::Mac, mac::PAUSE, None, None)
            .map(|_| ())
    }

    /// Resume the MAC layer after a pause
    pub fn resume(&mut self) -> Result<(), RequestError<L::Error>> {
        self.engine
            .request(Domain::Mac, mac::RESUME, None, None)
            .map(|_| ())
    }

    // --- addresses and keys ---

    /// Device address
    pub fn dev_addr(&mut self) -> Result<DevAddr, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Mac, mac::DEV_ADDR)?;
        decode_fixed(&mut self.engine, &response)
    }

    /// Set the device address
    pub fn set_dev_addr(&mut self, dev_addr: &DevAddr) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::DEV_ADDR, dev_addr)
    }

    /// Device EUI
    pub fn dev_eui(&mut self) -> Result<Eui, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Mac, mac::DEV_EUI)?;
        decode_fixed(&mut self.engine, &response)
    }

    /// Set the device EUI
    pub fn set_dev_eui(&mut self, dev_eui: &Eui) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::DEV_EUI, dev_eui)
    }

    /// Application EUI
    pub fn app_eui(&mut self) -> Result<Eui, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Mac, mac::APP_EUI)?;
        decode_fixed(&mut self.engine, &response)
    }

    /// Set the application EUI
    pub fn set_app_eui(&mut self, app_eui: &Eui) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::APP_EUI, app_eui)
    }

    /// Set the network session key
    pub fn set_nwk_skey(&mut self, key: &AesKey) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::NWK_SKEY, key)
    }

    /// Set the application session key
    pub fn set_app_skey(&mut self, key: &AesKey) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::APP_SKEY, key)
    }

    /// Set the application key
    pub fn set_app_key(&mut self, key: &AesKey) -> Result<(), RequestError<L::Error>> {
        self.set_bin(mac::APP_KEY, key)
    }

    // --- MAC parameters ---

    /// Frequency band in MHz (433 or 868)
    pub fn band(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::BAND)
    }

    /// Current data rate
    pub fn data_rate(&mut self) -> Result<DataRate, RequestError<L::Error>> {
        let index: u8 = self.engine.get_parsed(Domain::Mac, mac::DATA_RATE)?;
        match DataRate::from_index(index) {
            Some(dr) => Ok(dr),
            None => self.engine.invalid(),
        }
    }

    /// Set the data rate
    pub fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<3>(data_rate.index());
        self.engine.set(Domain::Mac, mac::DATA_RATE, &value)
    }

    /// Current output power index
    pub fn power_index(&mut self) -> Result<PowerIndex, RequestError<L::Error>> {
        let index: u8 = self.engine.get_parsed(Domain::Mac, mac::PWR_IDX)?;
        match PowerIndex::from_index(index) {
            Some(power) => Ok(power),
            None => self.engine.invalid(),
        }
    }

    /// Set the output power index
    pub fn set_power_index(&mut self, power: PowerIndex) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<3>(power.index());
        self.engine.set(Domain::Mac, mac::PWR_IDX, &value)
    }

    /// Whether adaptive data rate is enabled
    pub fn adr(&mut self) -> Result<bool, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Mac, mac::ADR)?;
        on_off(&mut self.engine, &response)
    }

    /// Enable or disable adaptive data rate
    pub fn set_adr(&mut self, enabled: bool) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Mac, mac::ADR, if enabled { ON } else { OFF })
    }

    /// Number of retransmissions for confirmed uplinks
    pub fn retransmissions(&mut self) -> Result<u8, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::RETX)
    }

    /// Set the number of retransmissions for confirmed uplinks
    pub fn set_retransmissions(&mut self, retx: u8) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<3>(retx);
        self.engine.set(Domain::Mac, mac::RETX, &value)
    }

    /// First receive window delay in milliseconds
    pub fn rx_delay_1(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::RX_DELAY_1)
    }

    /// Set the first receive window delay in milliseconds
    pub fn set_rx_delay_1(&mut self, delay_ms: u16) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<6>(delay_ms);
        self.engine.set(Domain::Mac, mac::RX_DELAY_1, &value)
    }

    /// Second receive window delay in milliseconds
    pub fn rx_delay_2(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::RX_DELAY_2)
    }

    /// Whether automatic reply is enabled
    pub fn auto_reply(&mut self) -> Result<bool, RequestError<L::Error>> {
        let response = self.engine.get(Domain::Mac, mac::AUTO_REPLY)?;
        on_off(&mut self.engine, &response)
    }

    /// Enable or disable automatic reply
    pub fn set_auto_reply(&mut self, enabled: bool) -> Result<(), RequestError<L::Error>> {
        self.engine
            .set(Domain::Mac, mac::AUTO_REPLY, if enabled { ON } else { OFF })
    }

    /// Second receive window data rate and frequency
    pub fn rx2(&mut self, freq_band: u16) -> Result<(u8, u32), RequestError<L::Error>> {
        let band = decimal::<6>(freq_band);
        let response = self
            .engine
            .request(Domain::Mac, GET, Some(mac::RX2), Some(&band))?;
        let mut fields = response.as_str().split(' ').filter(|f| !f.is_empty());
        let dr = fields.next().and_then(|f| f.parse().ok());
        let freq = fields.next().and_then(|f| f.parse().ok());
        match (dr, freq) {
            (Some(dr), Some(freq)) => Ok((dr, freq)),
            _ => self.engine.invalid(),
        }
    }

    /// Set the second receive window data rate and frequency
    pub fn set_rx2(
        &mut self,
        data_rate: DataRate,
        frequency: u32,
    ) -> Result<(), RequestError<L::Error>> {
        let mut value = decimal::<16>(data_rate.index());
        let _ = value.push(' ');
        let _ = value.push_str(&decimal::<12>(frequency));
        self.engine.set(Domain::Mac, mac::RX2, &value)
    }

    /// Duty cycle prescaler
    pub fn duty_cycle_prescaler(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::DCYCLE_PS)
    }

    /// Demodulation margin from the last link check
    pub fn demod_margin(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::DEMOD_MARGIN)
    }

    /// Gateway count from the last link check
    pub fn gateway_count(&mut self) -> Result<u16, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::GATEWAY_NB)
    }

    /// Raw MAC status word
    pub fn status(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::STATUS)
    }

    /// Synchronization word
    pub fn sync_word(&mut self) -> Result<u8, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::SYNC)
    }

    /// Set the synchronization word
    pub fn set_sync_word(&mut self, sync: u8) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<3>(sync);
        self.engine.set(Domain::Mac, mac::SYNC, &value)
    }

    /// Uplink frame counter
    pub fn up_counter(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::UP_CTR)
    }

    /// Set the uplink frame counter
    pub fn set_up_counter(&mut self, counter: u32) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<12>(counter);
        self.engine.set(Domain::Mac, mac::UP_CTR, &value)
    }

    /// Downlink frame counter
    pub fn down_counter(&mut self) -> Result<u32, RequestError<L::Error>> {
        self.engine.get_parsed(Domain::Mac, mac::DOWN_CTR)
    }

    /// Set the downlink frame counter
    pub fn set_down_counter(&mut self, counter: u32) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<12>(counter);
        self.engine.set(Domain::Mac, mac::DOWN_CTR, &value)
    }

    /// Report the battery level (0–255) to the network
    pub fn set_battery_level(&mut self, level: u8) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<3>(level);
        self.engine.set(Domain::Mac, mac::BAT_LVL, &value)
    }

    /// Set the link check interval in seconds
    pub fn set_link_check(&mut self, seconds: u16) -> Result<(), RequestError<L::Error>> {
        let value = decimal::<6>(seconds);
        self.engine.set(Domain::Mac, mac::LINK_CHECK, &value)
    }

    fn set_bin(&mut self, param: &str, value: &[u8]) -> Result<(), RequestError<L::Error>> {
        self.engine
            .request_bin(Domain::Mac, SET, param, value)
            .map(|_| ())
    }
}

/// Decode a fixed-width hex response (addresses, EUIs)
pub(crate) fn decode_fixed<const N: usize, L: ModemLink, C: Clock>(
    engine: &mut RequestEngine<L, C>,
    response: &Response,
) -> Result<[u8; N], RequestError<L::Error>> {
    let decoded = match hex::decode::<N>(response.as_str().trim().as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => return engine.invalid(),
    };
    if decoded.len() != N {
        return engine.invalid();
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&decoded);
    Ok(out)
}

/// Interpret an `on`/`off` response, recording invalid-parameter otherwise
pub(crate) fn on_off<L: ModemLink, C: Clock>(
    engine: &mut RequestEngine<L, C>,
    response: &Response,
) -> Result<bool, RequestError<L::Error>> {
    match response.as_on_off() {
        Some(value) => Ok(value),
        None => engine.invalid(),
    }
}
