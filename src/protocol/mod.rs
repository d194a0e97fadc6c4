//! Command/response protocol engine
//!
//! The wire protocol is ASCII, newline-terminated and case-sensitive:
//! `<domain> <verb-or-bare-command> [<param>] [<value>] [<port>]\r\n`
//! going out, a single line of at most 64 bytes coming back.

/// Downlink message parsing and storage
pub mod downlink;

/// Keywords, timeouts and framing constants
pub mod keywords;

/// Transaction engine and sleep/wake gate
pub mod request;

/// Response line classification
pub mod response;

/// Format a value as decimal ASCII into a stack string
pub(crate) fn decimal<const N: usize>(value: impl core::fmt::Display) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let _ = core::fmt::write(&mut out, format_args!("{}", value));
    out
}
