//! Response line classification
//!
//! Every line the modem sends is either one of a small set of success
//! tokens, one of the documented error tokens, or free-form data (the value
//! of a `get`, a version banner, and so on). Success tokens are matched by
//! prefix because the modem appends fields after some of them (a received
//! downlink notice is `mac_rx <port> <payload>`). Error tokens are matched
//! exactly.

use heapless::Vec;

use super::keywords::MAX_RESPONSE_LEN;

/// Success acknowledgement kinds, most generic first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SuccessKind {
    /// Bare `ok`
    Ok,
    /// `mac_tx_ok`, uplink transmitted
    MacTxOk,
    /// `accepted`, join accepted
    Accepted,
    /// `mac_rx`, downlink data received
    Rx,
}

/// Failure kinds: device-reported tokens plus driver-local conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// `invalid_param`, parameters outside the expected range
    InvalidParam,
    /// `keys_not_init`, join keys were never configured
    KeysNotInit,
    /// `no_free_ch`, all channels busy
    NoFreeChannel,
    /// `silent`, device is in a Silent Immediately state
    Silent,
    /// `busy`, MAC state is not idle
    Busy,
    /// `mac_paused`, MAC was paused and not resumed
    MacPaused,
    /// `denied`, join request rejected by the network
    JoinDenied,
    /// `invalid_data_len`, payload exceeds the current data rate's maximum
    InvalidDataLen,
    /// `frame_counter_err_rejoin_needed`, frame counter rolled over
    FrameCounterRollover,
    /// Driver-local: the link was never initialized
    NotInitialized,
    /// Driver-local: the network has not been joined
    NotJoined,
    /// Driver-local: no response within the time budget
    Timeout,
    /// Driver-local: the modem is believed asleep
    Asleep,
}

/// Result of classifying one raw response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// Line starts with a success token
    Success(SuccessKind),
    /// Line is exactly a device error token
    Error(ErrorKind),
    /// The transport produced bytes the protocol does not understand
    ///
    /// Not the same as no data: this is how `get` values and other
    /// free-form responses arrive.
    Unrecognized,
    /// No line was available
    NoData,
}

/// A single terminated response line, terminator stripped
pub type ResponseLine = Vec<u8, MAX_RESPONSE_LEN>;

// Table order is the tie-break between tokens where one is a prefix of
// another; it must match the modem's command reference order.
const SUCCESS_PREFIXES: [(&[u8], SuccessKind); 4] = [
    (b"ok", SuccessKind::Ok),
    (b"mac_tx_ok", SuccessKind::MacTxOk),
    (b"accepted", SuccessKind::Accepted),
    (b"mac_rx", SuccessKind::Rx),
];

const ERROR_TOKENS: [(&[u8], ErrorKind); 9] = [
    (b"invalid_param", ErrorKind::InvalidParam),
    (b"keys_not_init", ErrorKind::KeysNotInit),
    (b"no_free_ch", ErrorKind::NoFreeChannel),
    (b"silent", ErrorKind::Silent),
    (b"busy", ErrorKind::Busy),
    (b"mac_paused", ErrorKind::MacPaused),
    (b"denied", ErrorKind::JoinDenied),
    (b"invalid_data_len", ErrorKind::InvalidDataLen),
    (b"frame_counter_err_rejoin_needed", ErrorKind::FrameCounterRollover),
];

/// Classify one response line
///
/// Success prefixes are probed in table order, case-sensitively; the first
/// match wins. Error tokens require an exact match. A line matching neither
/// table is [`Classification::Unrecognized`]; an empty line is
/// [`Classification::NoData`].
pub fn classify(line: &[u8]) -> Classification {
    if line.is_empty() {
        return Classification::NoData;
    }
    for (token, kind) in SUCCESS_PREFIXES {
        if line.starts_with(token) {
            return Classification::Success(kind);
        }
    }
    for (token, kind) in ERROR_TOKENS {
        if line == token {
            return Classification::Error(kind);
        }
    }
    Classification::Unrecognized
}
