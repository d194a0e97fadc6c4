//! Public value types for modem parameters
//!
//! Each enum maps one-to-one onto the keyword the modem expects, so an
//! out-of-range value is unrepresentable and rejected before any byte is
//! transmitted.

use crate::protocol::keywords::{CNF, UNCNF};

/// EUI-64 (8 bytes)
pub type Eui = [u8; 8];
/// AES-128 key (16 bytes)
pub type AesKey = [u8; 16];
/// Device address (4 bytes)
pub type DevAddr = [u8; 4];

/// Uplink confirmation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Uplink {
    /// Requires a device-received acknowledgement from the network
    Confirmed,
    /// Fire-and-forget
    Unconfirmed,
}

impl Uplink {
    /// Protocol keyword (`cnf` / `uncnf`)
    pub fn keyword(self) -> &'static str {
        match self {
            Uplink::Confirmed => CNF,
            Uplink::Unconfirmed => UNCNF,
        }
    }
}

/// LoRaWAN data rate index, 0–7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// Index 0 (slowest, longest range)
    Dr0,
    /// Index 1
    Dr1,
    /// Index 2
    Dr2,
    /// Index 3
    Dr3,
    /// Index 4
    Dr4,
    /// Index 5
    Dr5,
    /// Index 6
    Dr6,
    /// Index 7 (fastest)
    Dr7,
}

impl DataRate {
    /// Convert a raw index, rejecting anything above 7
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(DataRate::Dr0),
            1 => Some(DataRate::Dr1),
            2 => Some(DataRate::Dr2),
            3 => Some(DataRate::Dr3),
            4 => Some(DataRate::Dr4),
            5 => Some(DataRate::Dr5),
            6 => Some(DataRate::Dr6),
            7 => Some(DataRate::Dr7),
            _ => None,
        }
    }

    /// Raw index as transmitted
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Output power index, 0–5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerIndex {
    /// Index 0 (highest power)
    P0,
    /// Index 1
    P1,
    /// Index 2
    P2,
    /// Index 3
    P3,
    /// Index 4
    P4,
    /// Index 5 (lowest power)
    P5,
}

impl PowerIndex {
    /// Convert a raw index, rejecting anything above 5
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PowerIndex::P0),
            1 => Some(PowerIndex::P1),
            2 => Some(PowerIndex::P2),
            3 => Some(PowerIndex::P3),
            4 => Some(PowerIndex::P4),
            5 => Some(PowerIndex::P5),
            _ => None,
        }
    }

    /// Raw index as transmitted
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Radio spreading factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpreadingFactor {
    /// SF7
    Sf7 = 7,
    /// SF8
    Sf8 = 8,
    /// SF9
    Sf9 = 9,
    /// SF10
    Sf10 = 10,
    /// SF11
    Sf11 = 11,
    /// SF12
    Sf12 = 12,
}

impl SpreadingFactor {
    /// Protocol keyword (`sf7`…`sf12`)
    pub fn keyword(self) -> &'static str {
        match self {
            SpreadingFactor::Sf7 => "sf7",
            SpreadingFactor::Sf8 => "sf8",
            SpreadingFactor::Sf9 => "sf9",
            SpreadingFactor::Sf10 => "sf10",
            SpreadingFactor::Sf11 => "sf11",
            SpreadingFactor::Sf12 => "sf12",
        }
    }

    /// Parse the numeric part of an `sf<N>` response
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            7 => Some(SpreadingFactor::Sf7),
            8 => Some(SpreadingFactor::Sf8),
            9 => Some(SpreadingFactor::Sf9),
            10 => Some(SpreadingFactor::Sf10),
            11 => Some(SpreadingFactor::Sf11),
            12 => Some(SpreadingFactor::Sf12),
            _ => None,
        }
    }
}

/// Forward error correction coding rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodingRate {
    /// 4/5
    Cr4_5,
    /// 4/6
    Cr4_6,
    /// 4/7
    Cr4_7,
    /// 4/8
    Cr4_8,
}

impl CodingRate {
    /// Protocol keyword (`4/5`…`4/8`)
    pub fn keyword(self) -> &'static str {
        match self {
            CodingRate::Cr4_5 => "4/5",
            CodingRate::Cr4_6 => "4/6",
            CodingRate::Cr4_7 => "4/7",
            CodingRate::Cr4_8 => "4/8",
        }
    }

    /// Parse a coding rate response
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "4/5" => Some(CodingRate::Cr4_5),
            "4/6" => Some(CodingRate::Cr4_6),
            "4/7" => Some(CodingRate::Cr4_7),
            "4/8" => Some(CodingRate::Cr4_8),
            _ => None,
        }
    }
}

/// Radio modulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modulation {
    /// LoRa chirp spread spectrum
    Lora,
    /// Frequency-shift keying
    Fsk,
}

impl Modulation {
    /// Protocol keyword (`lora` / `fsk`)
    pub fn keyword(self) -> &'static str {
        match self {
            Modulation::Lora => "lora",
            Modulation::Fsk => "fsk",
        }
    }

    /// Parse a modulation response
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "lora" => Some(Modulation::Lora),
            "fsk" => Some(Modulation::Fsk),
            _ => None,
        }
    }
}

/// Gaussian data shaping applied to FSK transmissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataShaping {
    /// No shaping
    None,
    /// BT = 1.0
    Bt1_0,
    /// BT = 0.5
    Bt0_5,
    /// BT = 0.3
    Bt0_3,
}

impl DataShaping {
    /// Protocol keyword (`none`, `1.0`, `0.5`, `0.3`)
    pub fn keyword(self) -> &'static str {
        match self {
            DataShaping::None => "none",
            DataShaping::Bt1_0 => "1.0",
            DataShaping::Bt0_5 => "0.5",
            DataShaping::Bt0_3 => "0.3",
        }
    }

    /// Parse a data shaping response
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(DataShaping::None),
            "1.0" => Some(DataShaping::Bt1_0),
            "0.5" => Some(DataShaping::Bt0_5),
            "0.3" => Some(DataShaping::Bt0_3),
            _ => None,
        }
    }
}
