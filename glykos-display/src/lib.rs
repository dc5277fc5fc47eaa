//! ILI9341 panel driver, glyph renderer and trend UI
//!
//! Three layers, leaf first:
//!
//! - [`ili9341`]: the panel driver. Owns rotation-dependent geometry and
//!   translates draw requests into addressing-window + pixel-stream
//!   command sequences over a [`glykos_hal::DisplayBus`].
//! - [`gfx`]: cursor/style state machine rendering 5x7 glyphs through the
//!   panel driver's drawing contract.
//! - [`ui`]: the trend UI - a numeric readout header over a scrolling
//!   graph with column-level partial redraws.
//!
//! No layer calls upward, and nothing here assumes a specific bus
//! peripheral; the transport is whatever implements `DisplayBus`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod font;
pub mod gfx;
pub mod ili9341;
pub mod ui;

#[cfg(test)]
pub(crate) mod testbus;

pub use gfx::Gfx;
pub use ili9341::{Ili9341, Rotation};
pub use ui::{TraceStyle, TrendUi};
