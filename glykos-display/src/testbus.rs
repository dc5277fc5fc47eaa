//! Recording bus for driver tests
//!
//! Captures the full select/mode/write/delay stream so tests can assert
//! on exactly what a draw call put on the wire.

use std::vec::Vec;

use glykos_hal::DisplayBus;

use crate::ili9341::cmd;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Select,
    Deselect,
    CommandMode,
    DataMode,
    Write(Vec<u8>),
    Delay(u32),
}

/// A `DisplayBus` that records every operation and never fails
#[derive(Default)]
pub struct RecordingBus {
    pub ops: Vec<BusOp>,
}

/// Replay of the recorded stream as (opcode, data bytes) transactions
fn transactions(ops: &[BusOp]) -> Vec<(u8, Vec<u8>)> {
    let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
    let mut command_mode = false;
    for op in ops {
        match op {
            BusOp::CommandMode => command_mode = true,
            BusOp::DataMode => command_mode = false,
            BusOp::Write(bytes) => {
                if command_mode {
                    for &opcode in bytes {
                        out.push((opcode, Vec::new()));
                    }
                } else if let Some(last) = out.last_mut() {
                    last.1.extend_from_slice(bytes);
                }
            }
            _ => {}
        }
    }
    out
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opcodes in the order they were issued
    pub fn commands(&self) -> Vec<u8> {
        transactions(&self.ops).iter().map(|(c, _)| *c).collect()
    }

    /// Data bytes following the most recent occurrence of `opcode`
    pub fn data_after_command(&self, opcode: u8) -> Vec<u8> {
        transactions(&self.ops)
            .into_iter()
            .rev()
            .find(|(c, _)| *c == opcode)
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    /// All recorded delays, in order
    pub fn delays(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Addressing windows opened by RAMWR, as (x0, x1, y0, y1)
    pub fn windows(&self) -> Vec<(u16, u16, u16, u16)> {
        self.windows_with_data()
            .into_iter()
            .map(|(w, _)| w)
            .collect()
    }

    /// Pixel-stream bytes of the `index`th RAMWR window
    pub fn data_at_window(&self, index: usize) -> Vec<u8> {
        self.windows_with_data()
            .into_iter()
            .nth(index)
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    /// Origins of all 1x1 addressing windows, in draw order
    pub fn pixel_windows(&self) -> Vec<(u16, u16)> {
        self.windows_with_data()
            .into_iter()
            .filter(|((x0, x1, y0, y1), _)| x0 == x1 && y0 == y1)
            .map(|((x0, _, y0, _), _)| (x0, y0))
            .collect()
    }

    fn windows_with_data(&self) -> Vec<((u16, u16, u16, u16), Vec<u8>)> {
        let mut out = Vec::new();
        let mut col: Option<(u16, u16)> = None;
        let mut row: Option<(u16, u16)> = None;

        let range = |data: &[u8]| -> Option<(u16, u16)> {
            if data.len() != 4 {
                return None;
            }
            let start = u16::from_be_bytes([data[0], data[1]]);
            let end = u16::from_be_bytes([data[2], data[3]]);
            Some((start, end))
        };

        for (opcode, data) in transactions(&self.ops) {
            match opcode {
                cmd::CASET => col = range(&data),
                cmd::PASET => row = range(&data),
                cmd::RAMWR => {
                    if let (Some((x0, x1)), Some((y0, y1))) = (col, row) {
                        out.push(((x0, x1, y0, y1), data));
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl DisplayBus for RecordingBus {
    type Error = core::convert::Infallible;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Select);
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Deselect);
        Ok(())
    }

    fn command_mode(&mut self) -> Result<(), Self::Error> {
        self.ops.push(BusOp::CommandMode);
        Ok(())
    }

    fn data_mode(&mut self) -> Result<(), Self::Error> {
        self.ops.push(BusOp::DataMode);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Write(bytes.to_vec()));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ops.push(BusOp::Delay(ms));
    }
}

/// A `DisplayBus` whose every fallible operation fails
pub struct FailingBus;

impl DisplayBus for FailingBus {
    type Error = ();

    fn select(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    fn command_mode(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    fn data_mode(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    fn write(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
        Err(())
    }

    fn delay_ms(&mut self, _ms: u32) {}
}
