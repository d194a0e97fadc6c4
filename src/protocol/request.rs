//! Transaction engine
//!
//! One engine instance owns the serial link, the monotonic clock and the
//! session state (last success kind, last error kind, asleep flag). A
//! transaction frames a command line, writes it, then polls the link for a
//! terminated response until the per-command timeout elapses. The model is
//! strictly single-threaded and half-duplex: one transaction in flight,
//! never re-entered.

use core::str::FromStr;

use crate::codec::hex;
use crate::link::{Clock, ModemLink};
use crate::types::Uplink;

use super::decimal;
use super::keywords::{
    mac, sys, Domain, BREAK_BAUD, CRLF, DEFAULT_TIMEOUT_MS, GET, MAX_BINARY_PARAM, NOMINAL_BAUD,
    SAVE_TIMEOUT_MS, SEPARATOR, SET, UPLINK_TIMEOUT_MS, WAKE_MARK, WAKE_SETTLE_MS,
};
use super::response::{classify, Classification, ErrorKind, ResponseLine, SuccessKind};

/// Transaction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError<E> {
    /// Transport-level fault
    Link(E),
    /// Protocol or driver-state failure; timeouts are `Failed(Timeout)`
    Failed(ErrorKind),
}

/// One resolved response line, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    line: ResponseLine,
}

impl Response {
    pub(crate) fn new(line: ResponseLine) -> Self {
        Self { line }
    }

    /// Raw response bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.line
    }

    /// Response as a string slice; modem output is always ASCII
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.line).unwrap_or("")
    }

    /// Parse the whole line as a value
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.as_str().trim().parse().ok()
    }

    /// Interpret an `on` / `off` response
    pub fn as_on_off(&self) -> Option<bool> {
        match self.as_str() {
            "on" => Some(true),
            "off" => Some(false),
            _ => None,
        }
    }
}

/// Command/response transaction engine and sleep/wake gate
pub struct RequestEngine<L: ModemLink, C: Clock> {
    link: L,
    clock: C,
    last_success: Option<SuccessKind>,
    last_error: Option<ErrorKind>,
    asleep: bool,
}

impl<L: ModemLink, C: Clock> RequestEngine<L, C> {
    /// Create an engine owning the link and clock
    pub fn new(link: L, clock: C) -> Self {
        Self {
            link,
            clock,
            last_success: None,
            last_error: None,
            asleep: false,
        }
    }

    /// Release the link and clock
    pub fn free(self) -> (L, C) {
        (self.link, self.clock)
    }

    /// Success kind of the latest resolved transaction
    ///
    /// Overwritten by the next transaction; read it immediately after the
    /// call it describes.
    pub fn last_success(&self) -> Option<SuccessKind> {
        self.last_success
    }

    /// Error kind of the latest resolved transaction
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Record a driver-local error kind
    pub fn set_last_error(&mut self, kind: ErrorKind) {
        self.last_error = Some(kind);
    }

    /// Whether the modem is believed asleep
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Issue a command with an optional textual parameter value
    ///
    /// `param` and `value` may be absent; a `None` or empty value sends the
    /// keyword alone rather than failing.
    pub fn request(
        &mut self,
        domain: Domain,
        command: &str,
        param: Option<&str>,
        value: Option<&str>,
    ) -> Result<Response, RequestError<L::Error>> {
        self.ensure_awake()?;
        self.write_command(domain, command, param)?;
        if let Some(value) = value {
            if !value.is_empty() {
                self.write_token(value.as_bytes())?;
            }
        }
        self.write(CRLF)?;
        self.read_response(timeout_for(command))
    }

    /// Read a parameter: `<domain> get <param>`
    pub fn get(
        &mut self,
        domain: Domain,
        param: &str,
    ) -> Result<Response, RequestError<L::Error>> {
        self.request(domain, GET, Some(param), None)
    }

    /// Read a parameter and parse its value
    pub fn get_parsed<T: FromStr>(
        &mut self,
        domain: Domain,
        param: &str,
    ) -> Result<T, RequestError<L::Error>> {
        let response = self.get(domain, param)?;
        self.parse_value(&response)
    }

    /// Write a parameter: `<domain> set <param> <value>`
    pub fn set(
        &mut self,
        domain: Domain,
        param: &str,
        value: &str,
    ) -> Result<(), RequestError<L::Error>> {
        self.request(domain, SET, Some(param), Some(value)).map(|_| ())
    }

    /// Parse a response value, recording an invalid-parameter error when the
    /// line does not have the expected shape
    pub(crate) fn parse_value<T: FromStr>(
        &mut self,
        response: &Response,
    ) -> Result<T, RequestError<L::Error>> {
        match response.parse() {
            Some(value) => Ok(value),
            None => self.invalid(),
        }
    }

    pub(crate) fn invalid<T>(&mut self) -> Result<T, RequestError<L::Error>> {
        self.last_error = Some(ErrorKind::InvalidParam);
        Err(RequestError::Failed(ErrorKind::InvalidParam))
    }

    /// Issue a command whose value is a byte array, hex-expanded on the wire
    ///
    /// Used for key material and fixed-width addresses. The encoded length
    /// is checked against [`MAX_BINARY_PARAM`] before anything is written.
    pub fn request_bin(
        &mut self,
        domain: Domain,
        command: &str,
        param: &str,
        value: &[u8],
    ) -> Result<Response, RequestError<L::Error>> {
        self.ensure_awake()?;
        if value.len() > MAX_BINARY_PARAM {
            self.last_error = Some(ErrorKind::InvalidParam);
            return Err(RequestError::Failed(ErrorKind::InvalidParam));
        }
        self.write_command(domain, command, Some(param))?;
        if !value.is_empty() {
            self.write(SEPARATOR)?;
            self.write_hex(value)?;
        }
        self.write(CRLF)?;
        self.read_response(DEFAULT_TIMEOUT_MS)
    }

    /// Transmit an uplink: `mac tx <cnf|uncnf> <port> <hex-payload>`
    ///
    /// Two sequential waits: the default timeout for the immediate
    /// accepted/queued acknowledgement, then a much longer one for the
    /// transmit confirmation or a downlink notice. For an unconfirmed
    /// uplink, silence during the second wait still counts as success;
    /// no second response is owed. A confirmed uplink that never sees its
    /// acknowledgement fails with `Timeout`.
    pub fn uplink(
        &mut self,
        kind: Uplink,
        port: u8,
        payload: &[u8],
    ) -> Result<Option<Response>, RequestError<L::Error>> {
        self.ensure_awake()?;
        if payload.len() > MAX_BINARY_PARAM {
            self.last_error = Some(ErrorKind::InvalidDataLen);
            return Err(RequestError::Failed(ErrorKind::InvalidDataLen));
        }
        self.write_command(Domain::Mac, mac::TX, Some(kind.keyword()))?;
        let port = decimal::<3>(port);
        self.write_token(port.as_bytes())?;
        if !payload.is_empty() {
            self.write(SEPARATOR)?;
            self.write_hex(payload)?;
        }
        self.write(CRLF)?;

        self.read_response(DEFAULT_TIMEOUT_MS)?;

        match self.read_response(UPLINK_TIMEOUT_MS) {
            Ok(response) => Ok(Some(response)),
            Err(RequestError::Failed(ErrorKind::Timeout)) if kind == Uplink::Unconfirmed => {
                self.last_error = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Request sleep for `ms` milliseconds
    ///
    /// The acknowledgement logic is inverted: the modem goes silent
    /// once it sleeps, so *absence* of a response marks the request
    /// as successful and sets the asleep flag, while any response within
    /// the window means the modem stayed awake. [`Self::ensure_awake`]
    /// depends on this inversion.
    pub fn sleep(&mut self, ms: u32) -> Result<bool, RequestError<L::Error>> {
        let duration = decimal::<12>(ms);
        match self.request(Domain::Sys, sys::SLEEP, None, Some(duration.as_str())) {
            Ok(_) => {
                self.asleep = false;
                Ok(false)
            }
            Err(RequestError::Failed(ErrorKind::Timeout)) => {
                self.asleep = true;
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll for a complete response line within `timeout_ms`
    ///
    /// The resulting classification updates the session state. Recognized
    /// error tokens and timeouts fail; success tokens and unrecognized
    /// lines (the shape every `get` value arrives in) are returned as data.
    pub fn read_response(
        &mut self,
        timeout_ms: u32,
    ) -> Result<Response, RequestError<L::Error>> {
        match self.read_line(timeout_ms)? {
            None => {
                self.last_error = Some(ErrorKind::Timeout);
                Err(RequestError::Failed(ErrorKind::Timeout))
            }
            Some(line) => match classify(&line) {
                Classification::Success(kind) => {
                    self.last_success = Some(kind);
                    Ok(Response::new(line))
                }
                Classification::Error(kind) => {
                    self.last_success = None;
                    self.last_error = Some(kind);
                    Err(RequestError::Failed(kind))
                }
                Classification::Unrecognized | Classification::NoData => {
                    self.last_success = None;
                    self.last_error = None;
                    Ok(Response::new(line))
                }
            },
        }
    }

    /// Wake the modem if a sleep request previously succeeded
    ///
    /// Break condition (null byte stretched at 300 baud), settle delay,
    /// 0x55 resynchronization byte at the nominal rate, then one read to
    /// absorb the wake acknowledgement. The asleep flag is cleared even
    /// when no acknowledgement arrives: legacy behavior assumes the wake
    /// always succeeded, which can mask a genuine wake failure, so the
    /// silent case is logged.
    fn ensure_awake(&mut self) -> Result<(), RequestError<L::Error>> {
        if !self.asleep {
            return Ok(());
        }
        self.link.flush().map_err(RequestError::Link)?;
        self.link.set_baud(BREAK_BAUD).map_err(RequestError::Link)?;
        self.write(&[0x00])?;
        self.link.flush().map_err(RequestError::Link)?;
        self.clock.delay_ms(WAKE_SETTLE_MS);
        self.link.set_baud(NOMINAL_BAUD).map_err(RequestError::Link)?;
        self.write(&[WAKE_MARK])?;
        self.link.flush().map_err(RequestError::Link)?;
        match self.read_response(DEFAULT_TIMEOUT_MS) {
            Ok(_) => {}
            Err(RequestError::Failed(_)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("wake attempted without acknowledgement");
            }
            Err(e) => return Err(e),
        }
        self.asleep = false;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), RequestError<L::Error>> {
        self.link.write_all(bytes).map_err(RequestError::Link)
    }

    fn write_token(&mut self, token: &[u8]) -> Result<(), RequestError<L::Error>> {
        self.write(SEPARATOR)?;
        self.write(token)
    }

    fn write_command(
        &mut self,
        domain: Domain,
        command: &str,
        param: Option<&str>,
    ) -> Result<(), RequestError<L::Error>> {
        self.write(domain.keyword().as_bytes())?;
        self.write_token(command.as_bytes())?;
        if let Some(param) = param {
            self.write_token(param.as_bytes())?;
        }
        Ok(())
    }

    fn write_hex(&mut self, bytes: &[u8]) -> Result<(), RequestError<L::Error>> {
        for byte in bytes {
            self.write(&hex::byte_to_chars(*byte))?;
        }
        Ok(())
    }

    /// Poll the link for one terminated line, `None` on timeout
    ///
    /// Carriage returns and bare terminators are skipped; bytes beyond the
    /// 64-byte line cap are dropped rather than allowed to grow the line.
    fn read_line(
        &mut self,
        timeout_ms: u32,
    ) -> Result<Option<ResponseLine>, RequestError<L::Error>> {
        let deadline = self.clock.now_ms() + u64::from(timeout_ms);
        let mut line = ResponseLine::new();
        loop {
            if self.clock.now_ms() >= deadline {
                return Ok(None);
            }
            match self.link.read() {
                Ok(b'\n') => {
                    if !line.is_empty() {
                        return Ok(Some(line));
                    }
                }
                Ok(b'\r') => {}
                Ok(byte) => {
                    let _ = line.push(byte);
                }
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => return Err(RequestError::Link(e)),
            }
        }
    }
}

fn timeout_for(command: &str) -> u32 {
    if command == mac::SAVE {
        SAVE_TIMEOUT_MS
    } else {
        DEFAULT_TIMEOUT_MS
    }
}
