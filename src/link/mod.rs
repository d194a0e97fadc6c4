//! Hardware abstraction for the serial link to the modem

mod serial;
mod traits;

pub use serial::{BaudControl, SerialLink};
pub use traits::{Clock, ModemLink};
