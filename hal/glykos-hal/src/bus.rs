//! Display bus trait
//!
//! A command/data serial bus as seen by a TFT controller: a chip-select
//! line, a command-vs-data select line, and a blocking byte pipe.

/// Blocking command/data bus to a display controller
///
/// All operations are synchronous; a call returns only once the transfer
/// has completed. Geometry never reaches this layer - callers clip before
/// writing - so every error here is a transport fault and is propagated.
pub trait DisplayBus {
    /// Error type for bus operations
    type Error;

    /// Assert the chip-select line
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Deassert the chip-select line
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Drive the command/data line to command state
    fn command_mode(&mut self) -> Result<(), Self::Error>;

    /// Drive the command/data line to data state
    fn data_mode(&mut self) -> Result<(), Self::Error>;

    /// Write a byte burst to the bus
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Blocking wait, used only during controller reset/initialization
    fn delay_ms(&mut self, ms: u32);
}
