//! SYS and RADIO command groups
//!
//! Thin typed wrappers over the transaction engine, split the same way the
//! modem's command reference splits its chapters. Borrow one through
//! [`crate::device::Rn2483::sys`] or [`crate::device::Rn2483::radio`].

mod radio;
mod sys;

pub use radio::RadioCommands;
pub use sys::{PinMode, SysCommands};
