//! Driver for the Microchip RN2483/RN2903 LoRaWAN modem
//!
//! This crate drives an RN2483-class modem over its line-delimited ASCII
//! command protocol ("AT-command" style). The modem implements the LoRaWAN
//! MAC layer itself; the driver frames commands, waits for terminated
//! responses within bounded time windows, classifies them, and exposes a
//! typed parameter/join/send surface on top of that.
//!
//! # Features
//! - Command/response transaction engine with per-command timeouts
//! - Two-stage uplink (immediate acknowledgement, then transmit result or
//!   downlink notification)
//! - Sleep/wake gating with the UART break + 0x55 resynchronization sequence
//! - Big-endian frame payload encoder for uplink application payloads
//! - Hardware abstraction over any serial link and monotonic clock
//! - No unsafe code
//!
//! # Example
//! ```no_run
//! use rn2483::{device::Rn2483, types::{DataRate, Uplink}};
//!
//! # fn demo<L: rn2483::link::ModemLink, C: rn2483::link::Clock>(link: L, clock: C)
//! #     -> Result<(), rn2483::protocol::request::RequestError<L::Error>> {
//! let mut modem = Rn2483::new(link, clock);
//!
//! modem.set_data_rate(DataRate::Dr5)?;
//! modem.join_otaa(&[0x01; 8], &[0x02; 8], &[0x03; 16])?;
//! modem.send(Uplink::Unconfirmed, 1, &[0x01, 0x02, 0x03])?;
//!
//! if let Some(payload) = modem.downlink().payload().ok().flatten() {
//!     let _port = modem.downlink().port();
//!     let _ = payload;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![no_std]

/// SYS and RADIO command groups
pub mod cmd;

/// Frame payload encoder and hex nibble codec
pub mod codec;

/// High-level modem driver
pub mod device;

/// Serial link and clock abstractions
pub mod link;

/// Command/response protocol engine
pub mod protocol;

/// Public value types for modem parameters
pub mod types;
