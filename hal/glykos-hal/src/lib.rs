//! Display bus abstraction for the Glykos TFT subsystem
//!
//! The panel driver never talks to a bus peripheral directly; it only uses
//! the four primitive operations of [`DisplayBus`]:
//!
//! - chip select assert/deassert
//! - command/data line select
//! - blocking byte-burst write
//! - blocking delay (reset and init only)
//!
//! [`SpiTransport`] is the stock implementation over the blocking
//! `embedded-hal` 1.0 traits (SPI bus + CS/DC output pins + delay).

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod spi;

pub use bus::DisplayBus;
pub use spi::{SpiTransport, TransportError};
