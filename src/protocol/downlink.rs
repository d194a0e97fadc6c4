//! Downlink message storage
//!
//! A downlink arrives opportunistically after an uplink as a
//! `mac_rx <port> <hex-payload>` notice. The latest message is kept in
//! string form and decoded to bytes on demand; it is overwritten by each
//! new downlink and cleared when an uplink yields none.

use heapless::{String, Vec};

use crate::codec::hex::{self, HexError};

/// Maximum decoded downlink payload in bytes
pub const MAX_DOWNLINK_PAYLOAD: usize = 32;

const MAX_HEX_LEN: usize = MAX_DOWNLINK_PAYLOAD * 2;

/// The latest received downlink message
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownlinkMessage {
    port: u8,
    message: String<MAX_HEX_LEN>,
}

impl DownlinkMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Port the downlink was addressed to, `None` when no message is held
    pub fn port(&self) -> Option<u8> {
        if self.message.is_empty() && self.port == 0 {
            None
        } else {
            Some(self.port)
        }
    }

    /// Hex string form of the payload
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Decoded payload bytes
    ///
    /// `Ok(None)` is the distinct empty-payload condition: the far end sent
    /// a downlink notice carrying no data, which is legitimate.
    pub fn payload(&self) -> Result<Option<Vec<u8, MAX_DOWNLINK_PAYLOAD>>, HexError> {
        if self.message.is_empty() {
            return Ok(None);
        }
        hex::decode(self.message.as_bytes()).map(Some)
    }

    /// Whether any message is held
    pub fn is_empty(&self) -> bool {
        self.port().is_none()
    }

    /// Drop the held message
    pub fn clear(&mut self) {
        self.port = 0;
        self.message.clear();
    }

    /// Replace the held message from a `<type> <port> <hex-payload>` notice
    ///
    /// The leading acknowledgement token is discarded; a notice without a
    /// payload field stores an empty message for the port.
    pub fn set_from_notice(&mut self, notice: &str) {
        self.clear();
        let mut fields = notice.split(' ').filter(|f| !f.is_empty());
        let _ack_type = fields.next();
        let port = fields.next().and_then(|p| p.parse().ok());
        let Some(port) = port else { return };
        self.port = port;
        if let Some(payload) = fields.next() {
            // Oversized payloads are truncated at the storage cap rather
            // than rejected; the cap matches the frame buffer capacity.
            let take = payload.len().min(MAX_HEX_LEN);
            let _ = self.message.push_str(&payload[..take]);
        }
    }
}
