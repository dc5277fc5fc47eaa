//! Board-agnostic core logic for the Glykos trend display
//!
//! This crate contains the parts of the display subsystem that do not
//! depend on any hardware:
//!
//! - Raw-sample to screen-Y mapping (integer only)
//! - The circular trend buffer (one slot per graph column)
//! - The bounded header label

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod label;
pub mod trend;

pub use label::{truncated, Label, LABEL_CAPACITY};
pub use trend::{sample_to_y, TrendBuffer, ADC_MAX};
