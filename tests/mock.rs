//! Scripted serial link and deterministic clock for driver tests
//!
//! Responses are queued as lines with a poll threshold: a line becomes
//! readable once the link has been polled that many times. The clock
//! advances one millisecond per query, so a threshold doubles as the
//! number of milliseconds into the transaction the line arrives.
#![allow(dead_code)]

use heapless::Vec;

use rn2483::link::{Clock, ModemLink};

/// Transport fault injected by a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

pub struct MockLink {
    tx: Vec<u8, 512>,
    rx: Vec<u8, 256>,
    rx_cursor: usize,
    pending: Vec<(usize, Vec<u8, 64>), 16>,
    next: usize,
    polls: usize,
    bauds: Vec<u32, 8>,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            tx: Vec::new(),
            rx: Vec::new(),
            rx_cursor: 0,
            pending: Vec::new(),
            next: 0,
            polls: 0,
            bauds: Vec::new(),
        }
    }

    /// Queue a response line, readable immediately
    pub fn push_line(&mut self, line: &str) {
        self.push_line_at(0, line);
    }

    /// Queue a response line, readable once `poll` read attempts have passed
    pub fn push_line_at(&mut self, poll: usize, line: &str) {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(line.as_bytes()).unwrap();
        self.pending.push((poll, bytes)).unwrap();
    }

    /// Everything the driver wrote, in order
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn written_str(&self) -> &str {
        core::str::from_utf8(&self.tx).unwrap_or("")
    }

    /// Baud rate changes, in order
    pub fn bauds(&self) -> &[u32] {
        &self.bauds
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl ModemLink for MockLink {
    type Error = MockError;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.tx.extend_from_slice(bytes).map_err(|_| MockError)
    }

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.polls += 1;
        while let Some((ready, line)) = self.pending.get(self.next) {
            if *ready > self.polls {
                break;
            }
            self.rx.extend_from_slice(line).unwrap();
            self.rx.extend_from_slice(b"\r\n").unwrap();
            self.next += 1;
        }
        match self.rx.get(self.rx_cursor) {
            Some(byte) => {
                self.rx_cursor += 1;
                Ok(*byte)
            }
            None => Err(nb::Error::WouldBlock),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_baud(&mut self, baud: u32) -> Result<(), Self::Error> {
        self.bauds.push(baud).map_err(|_| MockError)
    }
}

pub struct MockClock {
    now: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self { now: 0 }
    }
}

impl Clock for MockClock {
    fn now_ms(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}
