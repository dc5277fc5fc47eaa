//! ILI9341 TFT panel driver
//!
//! Drives a 240x320 ILI9341 controller over a [`DisplayBus`]. The command
//! stream is wire-compatible with the usual Adafruit-derived init and
//! addressing sequences: CASET/PASET set a window, RAMWR opens a row-major
//! pixel stream, and the driver sends exactly `w*h` RGB565 values
//! high-byte-first.
//!
//! Geometry policy: out-of-bounds requests clip silently and never emit
//! bus traffic. Transport faults propagate as `B::Error`.

use glykos_hal::DisplayBus;

/// Native panel width (portrait)
pub const TFT_WIDTH: u16 = 240;
/// Native panel height (portrait)
pub const TFT_HEIGHT: u16 = 320;

/// Soft-reset and init-table settle time
const SETTLE_MS: u32 = 150;

/// ILI9341 command opcodes
#[allow(dead_code)]
pub mod cmd {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const RDDID: u8 = 0x04;
    pub const RDDST: u8 = 0x09;

    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const PTLON: u8 = 0x12;
    pub const NORON: u8 = 0x13;

    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const GAMMASET: u8 = 0x26;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;

    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const RAMRD: u8 = 0x2E;

    pub const PTLAR: u8 = 0x30;
    pub const VSCRDEF: u8 = 0x33;
    pub const MADCTL: u8 = 0x36;
    pub const VSCRSADD: u8 = 0x37;
    pub const PIXFMT: u8 = 0x3A;

    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const DFUNCTR: u8 = 0xB6;

    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const VMCTR1: u8 = 0xC5;
    pub const VMCTR2: u8 = 0xC7;

    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL bit flags
#[allow(dead_code)]
mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const ML: u8 = 0x10;
    pub const RGB: u8 = 0x00;
    pub const BGR: u8 = 0x08;
    pub const MH: u8 = 0x04;
}

/// Initialization script, Adafruit initcmd format
///
/// Entries are `opcode, argcount, args...`; bit 7 of the argcount requests
/// a settle delay after the command. A zero opcode terminates the table.
const INIT_SEQUENCE: &[u8] = &[
    0xEF, 3, 0x03, 0x80, 0x02,
    0xCF, 3, 0x00, 0xC1, 0x30,
    0xED, 4, 0x64, 0x03, 0x12, 0x81,
    0xE8, 3, 0x85, 0x00, 0x78,
    0xCB, 5, 0x39, 0x2C, 0x00, 0x34, 0x02,
    0xF7, 1, 0x20,
    0xEA, 2, 0x00, 0x00,
    cmd::PWCTR1, 1, 0x23,                   // Power control VRH[5:0]
    cmd::PWCTR2, 1, 0x10,                   // Power control SAP[2:0];BT[3:0]
    cmd::VMCTR1, 2, 0x3E, 0x28,             // VCM control
    cmd::VMCTR2, 1, 0x86,                   // VCM control2
    cmd::MADCTL, 1, 0x48,                   // Memory Access Control
    cmd::VSCRSADD, 1, 0x00,                 // Vertical scroll zero
    cmd::PIXFMT, 1, 0x55,                   // 16-bit pixel
    cmd::FRMCTR1, 2, 0x00, 0x18,
    cmd::DFUNCTR, 3, 0x08, 0x82, 0x27,      // Display Function Control
    0xF2, 1, 0x00,                          // 3Gamma Function Disable
    cmd::GAMMASET, 1, 0x01,                 // Gamma curve selected
    cmd::GMCTRP1, 15,                       // Positive Gamma
    0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08,
    0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03,
    0x0E, 0x09, 0x00,
    cmd::GMCTRN1, 15,                       // Negative Gamma
    0x00, 0x0E, 0x14, 0x03, 0x11, 0x07,
    0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C,
    0x31, 0x36, 0x0F,
    cmd::SLPOUT, 0x80,                      // Exit sleep, delay flag
    cmd::DISPON, 0x80,                      // Display on, delay flag
    0x00,                                   // End of list
];

/// Panel orientation
///
/// Each variant maps to a fixed MADCTL byte; the 90 and 270 degree
/// variants swap the logical width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// 0 degrees, 240x320
    Portrait,
    /// 90 degrees, 320x240
    Landscape,
    /// 180 degrees, 240x320
    PortraitFlipped,
    /// 270 degrees, 320x240
    LandscapeFlipped,
}

impl Rotation {
    /// Rotation for index `r`, taken modulo 4
    pub fn from_index(r: u8) -> Self {
        match r % 4 {
            0 => Rotation::Portrait,
            1 => Rotation::Landscape,
            2 => Rotation::PortraitFlipped,
            _ => Rotation::LandscapeFlipped,
        }
    }

    /// Memory-access-control byte for this orientation
    pub fn madctl(self) -> u8 {
        match self {
            Rotation::Portrait => madctl::MX | madctl::BGR,
            Rotation::Landscape => madctl::MV | madctl::BGR,
            Rotation::PortraitFlipped => madctl::MY | madctl::BGR,
            Rotation::LandscapeFlipped => madctl::MX | madctl::MY | madctl::MV | madctl::BGR,
        }
    }

    /// Logical (width, height) for this orientation
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            Rotation::Portrait | Rotation::PortraitFlipped => (TFT_WIDTH, TFT_HEIGHT),
            Rotation::Landscape | Rotation::LandscapeFlipped => (TFT_HEIGHT, TFT_WIDTH),
        }
    }
}

/// ILI9341 panel driver
///
/// Owns the bus and the rotation-dependent logical dimensions. Every draw
/// call validates coordinates against the current dimensions before any
/// bus traffic is emitted.
pub struct Ili9341<B> {
    pub(crate) bus: B,
    width: u16,
    height: u16,
    rotation: Rotation,
}

impl<B: DisplayBus> Ili9341<B> {
    /// Create a driver in native portrait orientation
    ///
    /// No bus traffic until [`init`](Self::init).
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            width: TFT_WIDTH,
            height: TFT_HEIGHT,
            rotation: Rotation::Portrait,
        }
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Current logical width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Current logical height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Reset the controller and run the initialization script
    ///
    /// Ends in landscape orientation, the layout the trend UI expects.
    pub fn init(&mut self) -> Result<(), B::Error> {
        self.bus.deselect()?;

        // Command-based soft reset; the controller needs time to settle.
        self.write_command(cmd::SWRESET)?;
        self.bus.delay_ms(SETTLE_MS);

        self.run_init_sequence()?;
        self.set_rotation(1)
    }

    fn run_init_sequence(&mut self) -> Result<(), B::Error> {
        let mut i = 0;
        loop {
            let opcode = INIT_SEQUENCE[i];
            if opcode == 0 {
                break;
            }
            i += 1;

            let control = INIT_SEQUENCE[i];
            i += 1;
            let num_args = (control & 0x7F) as usize;

            self.write_command(opcode)?;
            if num_args > 0 {
                self.write_data(&INIT_SEQUENCE[i..i + num_args])?;
                i += num_args;
            }

            if control & 0x80 != 0 {
                self.bus.delay_ms(SETTLE_MS);
            }
        }
        Ok(())
    }

    /// Set the orientation; `r` is taken modulo 4
    pub fn set_rotation(&mut self, r: u8) -> Result<(), B::Error> {
        let rotation = Rotation::from_index(r);
        self.write_command(cmd::MADCTL)?;
        self.write_data(&[rotation.madctl()])?;

        let (width, height) = rotation.dimensions();
        self.rotation = rotation;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn write_command(&mut self, opcode: u8) -> Result<(), B::Error> {
        self.bus.select()?;
        self.bus.command_mode()?;
        self.bus.write(&[opcode])?;
        self.bus.deselect()
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        self.bus.select()?;
        self.bus.data_mode()?;
        self.bus.write(bytes)?;
        self.bus.deselect()
    }

    /// Open an addressing window; the next data bytes fill it row-major
    fn set_addr_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), B::Error> {
        self.write_command(cmd::CASET)?;
        self.write_data(&[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8])?;

        self.write_command(cmd::PASET)?;
        self.write_data(&[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8])?;

        self.write_command(cmd::RAMWR)
    }

    /// Stream `count` copies of a packed color, high byte first
    fn push_pixels(&mut self, color: u16, count: u32) -> Result<(), B::Error> {
        let hi = (color >> 8) as u8;
        let lo = color as u8;

        let mut chunk = [0u8; 64];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.bus.select()?;
        self.bus.data_mode()?;

        let mut remaining = count as usize * 2;
        while remaining > 0 {
            let n = remaining.min(chunk.len());
            self.bus.write(&chunk[..n])?;
            remaining -= n;
        }

        self.bus.deselect()
    }

    /// Set a single pixel; silently dropped when off-panel
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), B::Error> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        self.set_addr_window(x, y, x, y)?;
        self.write_data(&[(color >> 8) as u8, color as u8])
    }

    /// Fill a rectangle, clipped to the panel
    ///
    /// Exactly `w*h` pixel values go out for the clipped rectangle; a
    /// zero-area or fully off-panel request emits nothing.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), B::Error> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }

        let w = (x as u32 + w as u32).min(self.width as u32) as u16 - x;
        let h = (y as u32 + h as u32).min(self.height as u32) as u16 - y;
        if w == 0 || h == 0 {
            return Ok(());
        }

        self.set_addr_window(x, y, x + w - 1, y + h - 1)?;
        self.push_pixels(color, w as u32 * h as u32)
    }

    /// Horizontal line of length `w`
    pub fn draw_hline(&mut self, x: u16, y: u16, w: u16, color: u16) -> Result<(), B::Error> {
        self.fill_rect(x, y, w, 1, color)
    }

    /// Vertical line of length `h`
    pub fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: u16) -> Result<(), B::Error> {
        self.fill_rect(x, y, 1, h, color)
    }

    /// Fill the whole panel
    pub fn fill_screen(&mut self, color: u16) -> Result<(), B::Error> {
        self.fill_rect(0, 0, self.width, self.height, color)
    }

    /// Integer Bresenham line, both endpoints included
    ///
    /// Each point goes through [`draw_pixel`](Self::draw_pixel) and
    /// inherits its clipping.
    pub fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16) -> Result<(), B::Error> {
        let (mut x0, mut y0) = (x0 as i32, y0 as i32);
        let (x1, y1) = (x1 as i32, y1 as i32);

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.draw_pixel(x0 as u16, y0 as u16, color)?;
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
        Ok(())
    }
}
