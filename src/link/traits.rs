/// Byte-stream link to the modem
///
/// The transaction engine only needs four primitives from the UART: write a
/// buffer, poll a single byte without blocking, drain the transmitter, and
/// reopen the port at a different baud rate. The last one exists solely for
/// the wake sequence, which emulates a break condition by sending a null
/// byte at 300 baud before returning to the nominal rate.
pub trait ModemLink {
    /// Error type for link operations
    type Error;

    /// Write every byte of `bytes` to the modem
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Poll a single received byte
    ///
    /// Returns `nb::Error::WouldBlock` while no byte is pending.
    fn read(&mut self) -> nb::Result<u8, Self::Error>;

    /// Block until all written bytes have left the transmitter
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Reopen the link at the given baud rate
    fn set_baud(&mut self, baud: u32) -> Result<(), Self::Error>;
}

/// Monotonic clock used for timeout measurement
///
/// Millisecond resolution is sufficient; the shortest protocol timeout is
/// 200 ms. The clock must never go backwards while a transaction is in
/// flight.
pub trait Clock {
    /// Milliseconds since some fixed epoch
    fn now_ms(&mut self) -> u64;

    /// Busy-wait for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        let deadline = self.now_ms() + u64::from(ms);
        while self.now_ms() < deadline {}
    }
}
