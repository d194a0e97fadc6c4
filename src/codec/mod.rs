//! Binary payload encoding
//!
//! Uplink application payloads are built field by field into a fixed
//! 64-byte buffer; downlink payloads arrive as hex-ASCII and are decoded
//! back to bytes. Integers are written big-endian. Floats are written with
//! their four IEEE-754 bytes reversed relative to big-endian order: the
//! wire format stores float bytes least-significant first, an intentional
//! asymmetry that peers depend on.

/// Capacity of the frame payload buffer in bytes
pub const MAX_FRAME_PAYLOAD: usize = 64;

/// Codec failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// The value does not fit in the remaining buffer capacity
    Overflow,
}

/// Frame payload encoder
///
/// Maintains a write cursor into a fixed buffer. Every append either fully
/// succeeds or fails with [`CodecError::Overflow`] leaving the buffer and
/// cursor untouched.
pub struct FrameEncoder {
    buf: [u8; MAX_FRAME_PAYLOAD],
    counter: usize,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_FRAME_PAYLOAD],
            counter: 0,
        }
    }

    /// Clear the buffer and rewind the cursor
    pub fn reset(&mut self) {
        self.counter = 0;
        self.buf = [0; MAX_FRAME_PAYLOAD];
    }

    /// Bytes written so far, `[0, cursor)`
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.counter]
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.counter
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }

    fn push_slice(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        if self.counter + bytes.len() > MAX_FRAME_PAYLOAD {
            return Err(CodecError::Overflow);
        }
        self.buf[self.counter..self.counter + bytes.len()].copy_from_slice(bytes);
        self.counter += bytes.len();
        Ok(())
    }

    /// Append a signed byte
    pub fn push_i8(&mut self, value: i8) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append an unsigned byte
    pub fn push_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.push_slice(&[value])
    }

    /// Append a boolean as a single 0/1 byte
    pub fn push_bool(&mut self, value: bool) -> Result<(), CodecError> {
        self.push_u8(value as u8)
    }

    /// Append a signed 16-bit integer, big-endian
    pub fn push_i16(&mut self, value: i16) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append an unsigned 16-bit integer, big-endian
    pub fn push_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append a signed 32-bit integer, big-endian
    pub fn push_i32(&mut self, value: i32) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append an unsigned 32-bit integer, big-endian
    pub fn push_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append a signed 64-bit integer, big-endian
    pub fn push_i64(&mut self, value: i64) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append an unsigned 64-bit integer, big-endian
    pub fn push_u64(&mut self, value: u64) -> Result<(), CodecError> {
        self.push_slice(&value.to_be_bytes())
    }

    /// Append an IEEE-754 float with its bytes reversed
    ///
    /// The wire format stores the four float bytes least-significant first,
    /// unlike every integer field.
    pub fn push_f32(&mut self, value: f32) -> Result<(), CodecError> {
        self.push_slice(&value.to_le_bytes())
    }
}

/// Hex-ASCII conversion for binary command parameters and downlink payloads
pub mod hex {
    use heapless::Vec;

    /// Hex decoding failure
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum HexError {
        /// Input length is not a multiple of two
        OddLength,
        /// Input contains a character outside `0-9`, `a-f`, `A-F`
        InvalidDigit,
        /// Decoded output does not fit the destination
        Overflow,
    }

    /// Map a nibble (0–15) to its uppercase ASCII hex digit
    pub fn nibble_to_char(nibble: u8) -> u8 {
        if nibble <= 9 {
            b'0' + nibble
        } else {
            b'A' - 10 + nibble
        }
    }

    /// Expand a byte to its two ASCII hex digits, most-significant first
    pub fn byte_to_chars(byte: u8) -> [u8; 2] {
        [nibble_to_char(byte >> 4), nibble_to_char(byte & 0x0F)]
    }

    fn char_to_nibble(c: u8) -> Result<u8, HexError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            _ => Err(HexError::InvalidDigit),
        }
    }

    /// Decode an even-length hex-ASCII string to bytes
    ///
    /// Upper- and lowercase digits are accepted. An empty input decodes to
    /// an empty vector; the far end may legitimately send no payload, so
    /// this is not an error.
    pub fn decode<const N: usize>(input: &[u8]) -> Result<Vec<u8, N>, HexError> {
        if input.len() % 2 != 0 {
            return Err(HexError::OddLength);
        }
        let mut out = Vec::new();
        for pair in input.chunks_exact(2) {
            let byte = char_to_nibble(pair[0])? * 16 + char_to_nibble(pair[1])?;
            out.push(byte).map_err(|_| HexError::Overflow)?;
        }
        Ok(out)
    }
}
