//! Protocol keywords, timeouts and framing constants
//!
//! The keyword tables mirror the RN2483 command reference; the strings are
//! the exact case-sensitive tokens the modem expects.

/// Default response timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u32 = 200;
/// Timeout for `mac save`, which performs an EEPROM write
pub const SAVE_TIMEOUT_MS: u32 = 2_000;
/// Second-stage timeout for an uplink's transmit result or downlink notice
pub const UPLINK_TIMEOUT_MS: u32 = 7_000;
/// Timeout for the join exchange: time on air plus the RX2 window delay
pub const JOIN_TIMEOUT_MS: u32 = 10_000;

/// Maximum response line length, terminator included
pub const MAX_RESPONSE_LEN: usize = 64;
/// Largest binary parameter accepted for hex expansion
pub const MAX_BINARY_PARAM: usize = 64;

/// Command line terminator
pub const CRLF: &[u8] = b"\r\n";
/// Token separator within a command line
pub const SEPARATOR: &[u8] = b" ";

/// Nominal UART baud rate of the modem
pub const NOMINAL_BAUD: u32 = 57_600;
/// Baud rate used to stretch a null byte into a break condition
pub const BREAK_BAUD: u32 = 300;
/// Autobaud resynchronization byte sent after a wake
pub const WAKE_MARK: u8 = 0x55;
/// Settle delay between the break condition and the resync byte
pub const WAKE_SETTLE_MS: u32 = 100;

/// Command domain, the first token of every command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Domain {
    /// LoRaWAN MAC commands
    Mac,
    /// System commands
    Sys,
    /// Raw radio commands
    Radio,
}

impl Domain {
    /// Protocol keyword for this domain
    pub fn keyword(self) -> &'static str {
        match self {
            Domain::Mac => "mac",
            Domain::Sys => "sys",
            Domain::Radio => "radio",
        }
    }
}

/// Verb for parameter reads
pub const GET: &str = "get";
/// Verb for parameter writes
pub const SET: &str = "set";

/// Over-the-air activation keyword
pub const OTAA: &str = "otaa";
/// Activation-by-personalization keyword
pub const ABP: &str = "abp";
/// Boolean "on" literal
pub const ON: &str = "on";
/// Boolean "off" literal
pub const OFF: &str = "off";
/// Confirmed uplink keyword
pub const CNF: &str = "cnf";
/// Unconfirmed uplink keyword
pub const UNCNF: &str = "uncnf";

/// MAC parameter and command keywords
#[allow(missing_docs)] // keyword names are the documentation
pub mod mac {
    pub const DEV_ADDR: &str = "devaddr";
    pub const DEV_EUI: &str = "deveui";
    pub const APP_EUI: &str = "appeui";
    pub const BAND: &str = "band";
    pub const DATA_RATE: &str = "dr";
    pub const PWR_IDX: &str = "pwridx";
    pub const ADR: &str = "adr";
    pub const RETX: &str = "retx";
    pub const RX_DELAY_1: &str = "rxdelay1";
    pub const RX_DELAY_2: &str = "rxdelay2";
    pub const AUTO_REPLY: &str = "ar";
    pub const RX2: &str = "rx2";
    pub const DCYCLE_PS: &str = "dcycleps";
    pub const DEMOD_MARGIN: &str = "mrgn";
    pub const GATEWAY_NB: &str = "gwnb";
    pub const STATUS: &str = "status";
    pub const SYNC: &str = "sync";
    pub const UP_CTR: &str = "upctr";
    pub const DOWN_CTR: &str = "dnctr";
    pub const NWK_SKEY: &str = "nwkskey";
    pub const APP_SKEY: &str = "appskey";
    pub const APP_KEY: &str = "appkey";
    pub const JOIN: &str = "join";
    pub const TX: &str = "tx";
    pub const BAT_LVL: &str = "bat";
    pub const LINK_CHECK: &str = "linkchk";
    pub const SAVE: &str = "save";
    pub const PAUSE: &str = "pause";
    pub const RESUME: &str = "resume";
}

/// SYS parameter and command keywords
#[allow(missing_docs)] // keyword names are the documentation
pub mod sys {
    pub const VERSION: &str = "ver";
    pub const NVM: &str = "nvm";
    pub const VDD: &str = "vdd";
    pub const PIN_DIG: &str = "pindig";
    pub const PIN_ANA: &str = "pinana";
    pub const PIN_MODE: &str = "pinmode";
    pub const HW_EUI: &str = "hweui";
    pub const SLEEP: &str = "sleep";
    pub const RESET: &str = "reset";
}

/// RADIO parameter keywords
#[allow(missing_docs)] // keyword names are the documentation
pub mod radio {
    pub const BT: &str = "bt";
    pub const MODULATION: &str = "mod";
    pub const FREQ: &str = "freq";
    pub const POWER: &str = "pwr";
    pub const SPREADING_FACTOR: &str = "sf";
    pub const AFC_BW: &str = "afcbw";
    pub const RX_BW: &str = "rxbw";
    pub const BIT_RATE: &str = "bitrate";
    pub const FREQ_DEV: &str = "fdev";
    pub const PREAMBLE_LEN: &str = "prlen";
    pub const CRC: &str = "crc";
    pub const IQ_INVERT: &str = "iqi";
    pub const CODING_RATE: &str = "cr";
    pub const WATCHDOG: &str = "wdt";
    pub const BANDWIDTH: &str = "bw";
    pub const SNR: &str = "snr";
    pub const SYNC: &str = "sync";
}
